//! fexp configuration
//!
//! Typed configuration for the `fexp` explorer shell. Nothing is read
//! implicitly: the compiled-in defaults apply unless a YAML file is named
//! explicitly (the binary's `--config` flag).
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{cwd} $ "
//!   banner: true
//!   history:
//!     enabled: true
//!     file: "~/.fexp_history"
//!     max_entries: 500
//!
//! logging:
//!   level: debug
//!   format: compact
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Defaults only; no file is consulted.
pub fn load() -> Result<FexpConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<FexpConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}
