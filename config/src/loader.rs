use crate::{ConfigError, FexpConfig};
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

#[derive(Default)]
pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn load(&self) -> Result<FexpConfig, ConfigError> {
        let config = match self.explicit_file {
            Some(ref explicit) => {
                let content =
                    std::fs::read_to_string(explicit).map_err(|e| ConfigError::ReadFile {
                        path: explicit.clone(),
                        source: e,
                    })?;
                debug!(path = %explicit.display(), "loading config file");
                self.parse_yaml(&content)?
            }
            None => FexpConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_yaml(&self, content: &str) -> Result<FexpConfig, ConfigError> {
        let expanded = self.expand_env_vars(content)?;
        // An empty document deserializes to unit, not to an empty map.
        if expanded.trim().is_empty() {
            return Ok(FexpConfig::default());
        }
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        Ok(re
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_default()
            })
            .to_string())
    }
}
