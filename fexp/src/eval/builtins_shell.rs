use super::ExecContext;
use crate::command::CommandKind;
use crate::error::FexpResult;
use crate::help::{format_help, format_help_list};
use crate::shell::Shell;

impl Shell {
    pub(crate) fn cmd_pwd(&self, ctx: &mut ExecContext) -> FexpResult<()> {
        ctx.stdout.writeln(&self.cwd.display().to_string())?;
        Ok(())
    }

    pub(crate) fn cmd_help(&self, topic: Option<&str>, ctx: &mut ExecContext) -> FexpResult<()> {
        let text = match topic {
            None => format_help_list(),
            Some(name) => match CommandKind::from_name(name) {
                Some(kind) => format_help(kind),
                None => format!("No help for: {name}\n"),
            },
        };
        ctx.stdout.write(text.as_bytes())?;
        Ok(())
    }
}
