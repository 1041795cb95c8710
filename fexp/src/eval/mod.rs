//! Command dispatch and output plumbing

use crate::command::Invocation;
use crate::error::{FexpError, FexpResult, Stream};
use crate::lexer::tokenize;
use crate::shell::Shell;
use std::io::Write;
use tracing::debug;

mod builtins_fs;
mod builtins_shell;
pub mod local_fs;

/// Where command output goes.
pub enum Output {
    Stdout,
    Stderr,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(data)?;
                out.flush()
            }
            Output::Stderr => std::io::stderr().write_all(data),
            Output::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Output::Stdout => std::io::stdout().flush(),
            Output::Stderr => std::io::stderr().flush(),
            Output::Buffer(_) => Ok(()),
        }
    }

    /// Captured bytes; empty for the process streams.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        match self {
            Output::Buffer(buf) => buf.as_slice(),
            Output::Stdout | Output::Stderr => &[],
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.contents()).into_owned()
    }

    /// Drain captured output.
    pub fn take(&mut self) -> String {
        match self {
            Output::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
            Output::Stdout | Output::Stderr => String::new(),
        }
    }
}

pub struct ExecContext {
    pub stdout: Output,
    pub stderr: Output,
}

impl Default for ExecContext {
    fn default() -> Self {
        Self {
            stdout: Output::Stdout,
            stderr: Output::Stderr,
        }
    }
}

impl ExecContext {
    /// Both streams captured in memory.
    #[must_use]
    pub fn captured() -> Self {
        Self {
            stdout: Output::Buffer(Vec::new()),
            stderr: Output::Buffer(Vec::new()),
        }
    }

    /// Print a command failure on the stream it belongs to. A failed move
    /// reports its cause first.
    pub fn report(&mut self, err: &FexpError) -> FexpResult<()> {
        if let FexpError::MoveFailed(cause) = err {
            self.report(cause)?;
        }
        let line = err.to_string();
        match err.stream() {
            Stream::Stdout => self.stdout.writeln(&line)?,
            Stream::Stderr => self.stderr.writeln(&line)?,
        }
        Ok(())
    }
}

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Shell {
    /// Tokenize and run one input line.
    ///
    /// Command failures are reported on `ctx` and do not end the session;
    /// only a failure to write to the console is returned.
    pub fn execute(&mut self, line: &str, ctx: &mut ExecContext) -> FexpResult<Flow> {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };

        match Invocation::parse(name, args).and_then(|inv| self.dispatch(inv, ctx)) {
            Ok(flow) => Ok(flow),
            Err(FexpError::Console(e)) => Err(FexpError::Console(e)),
            Err(err) => {
                debug!(command = %name, category = ?err.category(), error = %err, "command failed");
                ctx.report(&err)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn dispatch(&mut self, invocation: Invocation, ctx: &mut ExecContext) -> FexpResult<Flow> {
        debug!(command = invocation.kind().name(), cwd = %self.cwd.display(), "dispatch");

        match invocation {
            Invocation::Exit => return Ok(Flow::Exit),
            Invocation::Help { topic } => self.cmd_help(topic.as_deref(), ctx)?,
            Invocation::Pwd => self.cmd_pwd(ctx)?,
            Invocation::Cd { target } => self.cmd_cd(&target)?,
            Invocation::Ls { path } => self.cmd_ls(path.as_deref(), ctx)?,
            Invocation::Cat { file } => self.cmd_cat(&file, ctx)?,
            Invocation::Cp { src, dst } => self.cmd_cp(&src, &dst, ctx)?,
            Invocation::Mv { src, dst } => self.cmd_mv(&src, &dst, ctx)?,
            Invocation::Rm { path } => self.cmd_rm(&path, ctx)?,
            Invocation::Touch { file } => self.cmd_touch(&file, ctx)?,
            Invocation::Mkdir { dir } => self.cmd_mkdir(&dir, ctx)?,
            Invocation::Search { pattern, start } => {
                self.cmd_search(&pattern, start.as_deref(), ctx)?;
            }
            Invocation::Chmod { mode, path } => self.cmd_chmod(&mode, &path, ctx)?,
        }
        Ok(Flow::Continue)
    }
}
