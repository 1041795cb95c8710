//! The read-eval-print loop

use crate::error::{FexpError, FexpResult};
use crate::eval::{ExecContext, Flow, Output};
use crate::shell::Shell;
use std::io::BufRead;
use std::path::Path;
use tracing::warn;

pub const BANNER: &str = "Simple File Explorer - type 'help' for commands";

/// Supplies command lines to the loop.
pub trait LineSource {
    /// Show `prompt` and read the next line. `Ok(None)` means end of input.
    fn read_line(
        &mut self,
        prompt: &str,
        cwd: &Path,
        out: &mut Output,
    ) -> FexpResult<Option<String>>;
}

/// Lines from any buffered reader; the prompt is written to `out`.
pub struct BufReadSource<R> {
    reader: R,
}

impl<R: BufRead> BufReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufReadSource<R> {
    fn read_line(
        &mut self,
        prompt: &str,
        _cwd: &Path,
        out: &mut Output,
    ) -> FexpResult<Option<String>> {
        out.write(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| FexpError::Input(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Run the loop until `exit`, end of input, or an input failure, then print `Bye`.
pub fn run<S>(shell: &mut Shell, source: &mut S, ctx: &mut ExecContext) -> FexpResult<()>
where
    S: LineSource + ?Sized,
{
    loop {
        let prompt = shell.prompt();
        let line = match source.read_line(&prompt, shell.cwd(), &mut ctx.stdout) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err @ FexpError::Input(_)) => {
                warn!(error = %err, "ending session");
                break;
            }
            Err(err) => return Err(err),
        };

        if shell.execute(&line, ctx)? == Flow::Exit {
            break;
        }
    }

    ctx.stdout.writeln("Bye")?;
    ctx.stdout.flush()?;
    Ok(())
}
