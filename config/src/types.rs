use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FexpConfig {
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

impl FexpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shell.prompt.is_empty() {
            return Err(ConfigError::InvalidValue(
                "shell.prompt must not be empty".to_string(),
            ));
        }
        if self.shell.history.enabled && self.shell.history.max_entries == 0 {
            return Err(ConfigError::InvalidValue(
                "shell.history.max_entries must be positive when history is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt template; `{cwd}` is replaced with the working directory.
    pub prompt: String,
    pub banner: bool,
    /// Use the interactive line editor when stdin is a terminal.
    pub line_editor: bool,
    pub history: HistoryConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "{cwd} $ ".to_string(),
            banner: true,
            line_editor: true,
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Empty keeps history in memory only.
    pub file: String,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: String::new(),
            max_entries: 1000,
        }
    }
}

impl HistoryConfig {
    /// Resolved history file, with `~` expanded. `None` when history is not persisted.
    pub fn path(&self) -> Option<PathBuf> {
        if !self.enabled || self.file.is_empty() {
            return None;
        }
        Some(PathBuf::from(shellexpand::tilde(&self.file).into_owned()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
}
