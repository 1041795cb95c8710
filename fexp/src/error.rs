//! Error types for fexp

use crate::command::CommandKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fexp operations
pub type FexpResult<T> = Result<T, FexpError>;

/// Which kind of failure an error represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid arguments, unknown command.
    Input,
    /// The target is missing or of the wrong kind; nothing was attempted.
    Precondition,
    /// The operating system rejected the operation.
    Native,
}

/// Where an error message is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Error types for fexp commands. The `Display` form is the message shown to the user.
#[derive(Error, Debug)]
pub enum FexpError {
    /// Required arguments are missing
    #[error("Usage: {}", .0.usage())]
    Usage(CommandKind),

    #[error("Unknown command: {0} (type help)")]
    UnknownCommand(String),

    #[error("Invalid mode. Provide octal like 755 or 0755")]
    InvalidMode(String),

    #[error("Use absolute or relative path. '-' not supported here.")]
    PreviousDirUnsupported,

    #[error("Path doesn't exist: {0:?}")]
    NotFound(PathBuf),

    #[error("Start path doesn't exist: {0:?}")]
    StartNotFound(PathBuf),

    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("File does not exist or not a regular file: {0:?}")]
    NotRegularFile(PathBuf),

    #[error("Cannot change directory to: {0:?}")]
    CannotChangeDir(PathBuf),

    #[error("Copy failed: {source}")]
    Copy { source: std::io::Error },

    #[error("Copy failed: source and destination are the same file")]
    SameFile(PathBuf),

    #[error("Move directory fallback not implemented.")]
    DirectoryMove(PathBuf),

    /// Rename failed and the source is not a regular file that could be copied instead.
    #[error("Rename failed: {source}")]
    Rename { source: std::io::Error },

    /// A move that neither renamed nor copied; `0` is the underlying cause.
    #[error("Move failed")]
    MoveFailed(Box<FexpError>),

    #[error("Remove failed: {source}")]
    Remove { source: std::io::Error },

    #[error("Could not create: {source}")]
    Create { source: std::io::Error },

    #[error("Could not touch {path:?}: {source}")]
    Touch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("chmod failed: {source}")]
    Chmod { source: std::io::Error },

    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Search stopped: {source}")]
    SearchStopped { source: std::io::Error },

    /// Reading the next command line failed
    #[error("Input error: {0}")]
    Input(String),

    /// Writing to the console failed
    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),
}

impl FexpError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage(_)
            | Self::UnknownCommand(_)
            | Self::InvalidMode(_)
            | Self::PreviousDirUnsupported => ErrorCategory::Input,
            Self::NotFound(_)
            | Self::StartNotFound(_)
            | Self::NotADirectory(_)
            | Self::NotRegularFile(_)
            | Self::CannotChangeDir(_)
            | Self::SameFile(_)
            | Self::DirectoryMove(_) => ErrorCategory::Precondition,
            Self::MoveFailed(cause) => cause.category(),
            Self::Copy { .. }
            | Self::Rename { .. }
            | Self::Remove { .. }
            | Self::Create { .. }
            | Self::Touch { .. }
            | Self::Chmod { .. }
            | Self::Read { .. }
            | Self::SearchStopped { .. }
            | Self::Input(_)
            | Self::Console(_) => ErrorCategory::Native,
        }
    }

    /// Copy diagnostics go to stderr; everything else is regular command feedback.
    #[must_use]
    pub fn stream(&self) -> Stream {
        match self {
            Self::Copy { .. } | Self::SameFile(_) => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    #[cfg(test)]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::StartNotFound(_))
    }
}
