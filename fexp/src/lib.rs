//! fexp - Interactive explorer shell for the local filesystem
//!
//! This crate provides:
//! - A quote-aware command-line tokenizer
//! - A fixed command table (`ls`, `cd`, `cp`, `mv`, `rm`, `search`, `chmod`, ...)
//!   dispatched against a session working directory
//! - Thin wrappers over native filesystem calls that report outcomes as text
//! - A read-eval-print loop over any line source

pub mod command;
pub mod error;
pub mod eval;
pub mod help;
pub mod lexer;
pub mod perms;
pub mod session;
pub mod shell;

pub use command::{CommandKind, Invocation};
pub use error::{ErrorCategory, FexpError, FexpResult, Stream};
pub use eval::local_fs::{DirectoryEntry, EntryKind, MoveOutcome};
pub use eval::{ExecContext, Flow, Output};
pub use perms::PermissionSet;
pub use session::{BufReadSource, LineSource};
pub use shell::Shell;
