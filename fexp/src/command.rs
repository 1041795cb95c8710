//! Command table and typed invocations
//!
//! Every command the shell understands is a [`CommandKind`]. Its name, help
//! text and arity live here so that dispatch, `help` and usage errors all read
//! from the same table.

use crate::error::{FexpError, FexpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Ls,
    Pwd,
    Cd,
    Cat,
    Cp,
    Mv,
    Rm,
    Touch,
    Mkdir,
    Search,
    Chmod,
    Help,
    Exit,
}

impl CommandKind {
    pub const ALL: [Self; 13] = [
        Self::Ls,
        Self::Pwd,
        Self::Cd,
        Self::Cat,
        Self::Cp,
        Self::Mv,
        Self::Rm,
        Self::Touch,
        Self::Mkdir,
        Self::Search,
        Self::Chmod,
        Self::Help,
        Self::Exit,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ls => "ls",
            Self::Pwd => "pwd",
            Self::Cd => "cd",
            Self::Cat => "cat",
            Self::Cp => "cp",
            Self::Mv => "mv",
            Self::Rm => "rm",
            Self::Touch => "touch",
            Self::Mkdir => "mkdir",
            Self::Search => "search",
            Self::Chmod => "chmod",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Ls => "List files (default: current directory)",
            Self::Pwd => "Print current directory",
            Self::Cd => "Change directory (relative or absolute)",
            Self::Cat => "Show file contents",
            Self::Cp => "Copy file, overwriting the destination",
            Self::Mv => "Move or rename file",
            Self::Rm => "Remove file or directory (recursive for directories)",
            Self::Touch => "Create empty file",
            Self::Mkdir => "Create directory and missing parents",
            Self::Search => "Recursive search for pattern in filenames",
            Self::Chmod => "Change permissions (e.g. 755)",
            Self::Help => "Show this help",
            Self::Exit => "Quit",
        }
    }

    #[must_use]
    pub fn usage(self) -> &'static str {
        match self {
            Self::Ls => "ls [path]",
            Self::Pwd => "pwd",
            Self::Cd => "cd <dir>",
            Self::Cat => "cat <file>",
            Self::Cp => "cp <src> <dst>",
            Self::Mv => "mv <src> <dst>",
            Self::Rm => "rm <path>",
            Self::Touch => "touch <file>",
            Self::Mkdir => "mkdir <dir>",
            Self::Search => "search <pattern> [start-path]",
            Self::Chmod => "chmod <octal> <path>",
            Self::Help => "help [command]",
            Self::Exit => "exit",
        }
    }

    /// Number of arguments (after the command name) that must be present.
    #[must_use]
    pub fn required_args(self) -> usize {
        match self {
            Self::Ls | Self::Pwd | Self::Help | Self::Exit => 0,
            Self::Cd | Self::Cat | Self::Rm | Self::Touch | Self::Mkdir | Self::Search => 1,
            Self::Cp | Self::Mv | Self::Chmod => 2,
        }
    }
}

/// A command line after table lookup and arity checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Ls { path: Option<String> },
    Pwd,
    Cd { target: String },
    Cat { file: String },
    Cp { src: String, dst: String },
    Mv { src: String, dst: String },
    Rm { path: String },
    Touch { file: String },
    Mkdir { dir: String },
    Search { pattern: String, start: Option<String> },
    Chmod { mode: String, path: String },
    Help { topic: Option<String> },
    Exit,
}

impl Invocation {
    /// Resolve `name` against the command table. Surplus arguments are ignored.
    pub fn parse(name: &str, args: &[String]) -> FexpResult<Self> {
        let kind = CommandKind::from_name(name)
            .ok_or_else(|| FexpError::UnknownCommand(name.to_string()))?;
        if args.len() < kind.required_args() {
            return Err(FexpError::Usage(kind));
        }

        let arg = |i: usize| args[i].clone();
        let opt = |i: usize| args.get(i).cloned();

        Ok(match kind {
            CommandKind::Ls => Self::Ls { path: opt(0) },
            CommandKind::Pwd => Self::Pwd,
            CommandKind::Cd => Self::Cd { target: arg(0) },
            CommandKind::Cat => Self::Cat { file: arg(0) },
            CommandKind::Cp => Self::Cp {
                src: arg(0),
                dst: arg(1),
            },
            CommandKind::Mv => Self::Mv {
                src: arg(0),
                dst: arg(1),
            },
            CommandKind::Rm => Self::Rm { path: arg(0) },
            CommandKind::Touch => Self::Touch { file: arg(0) },
            CommandKind::Mkdir => Self::Mkdir { dir: arg(0) },
            CommandKind::Search => Self::Search {
                pattern: arg(0),
                start: opt(1),
            },
            CommandKind::Chmod => Self::Chmod {
                mode: arg(0),
                path: arg(1),
            },
            CommandKind::Help => Self::Help { topic: opt(0) },
            CommandKind::Exit => Self::Exit,
        })
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Ls { .. } => CommandKind::Ls,
            Self::Pwd => CommandKind::Pwd,
            Self::Cd { .. } => CommandKind::Cd,
            Self::Cat { .. } => CommandKind::Cat,
            Self::Cp { .. } => CommandKind::Cp,
            Self::Mv { .. } => CommandKind::Mv,
            Self::Rm { .. } => CommandKind::Rm,
            Self::Touch { .. } => CommandKind::Touch,
            Self::Mkdir { .. } => CommandKind::Mkdir,
            Self::Search { .. } => CommandKind::Search,
            Self::Chmod { .. } => CommandKind::Chmod,
            Self::Help { .. } => CommandKind::Help,
            Self::Exit => CommandKind::Exit,
        }
    }
}
