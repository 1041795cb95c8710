//! Session state: the working directory and prompt

use crate::error::{FexpError, FexpResult};
use std::path::{Path, PathBuf};

pub struct Shell {
    /// Absolute and canonical; only `cd` changes it.
    pub(crate) cwd: PathBuf,
    prompt: String,
}

impl Shell {
    pub const DEFAULT_PROMPT: &'static str = "{cwd} $ ";

    /// Start a session in `start`, which must be an existing directory.
    pub fn new(start: impl AsRef<Path>) -> FexpResult<Self> {
        let start = start.as_ref();
        let cwd = start
            .canonicalize()
            .map_err(|_| FexpError::NotFound(start.to_path_buf()))?;
        if !cwd.is_dir() {
            return Err(FexpError::NotADirectory(cwd));
        }

        Ok(Self {
            cwd,
            prompt: Self::DEFAULT_PROMPT.to_string(),
        })
    }

    /// Prompt template; `{cwd}` is replaced with the working directory.
    #[must_use]
    pub fn with_prompt(mut self, template: impl Into<String>) -> Self {
        self.prompt = template.into();
        self
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        self.prompt
            .replace("{cwd}", &self.cwd.display().to_string())
    }

    /// Interpret a command argument relative to the working directory.
    /// Absolute arguments are taken as they are.
    #[must_use]
    pub fn resolve_path(&self, arg: &str) -> PathBuf {
        self.cwd.join(arg)
    }
}
