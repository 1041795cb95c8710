use std::io::{BufRead, BufReader};

use tracing::{debug, info, warn};

use super::local_fs::{self, EntryKind, MoveOutcome};
use super::ExecContext;
use crate::error::{FexpError, FexpResult};
use crate::perms::PermissionSet;
use crate::shell::Shell;

impl Shell {
    pub(crate) fn cmd_ls(&self, path: Option<&str>, ctx: &mut ExecContext) -> FexpResult<()> {
        let target = path.map_or_else(|| self.cwd.clone(), |p| self.resolve_path(p));

        if !target.exists() {
            return Err(FexpError::NotFound(target));
        }
        if !target.is_dir() {
            return Err(FexpError::NotADirectory(target));
        }

        let entries = local_fs::read_entries(&target).map_err(|e| FexpError::Read {
            path: target.clone(),
            source: e,
        })?;

        ctx.stdout.writeln(&format!(
            "{:<12}{:<10}{:<12}{}",
            "Permissions", "Size", "Type", "Name"
        ))?;
        for entry in entries {
            let line = format!(
                "{:<12}{:<10}{:<12}{}",
                entry.permissions.symbolic(),
                entry.size,
                entry.kind.label(),
                entry.name()
            );
            ctx.stdout.writeln(&line)?;
        }
        Ok(())
    }

    pub(crate) fn cmd_cd(&mut self, target: &str) -> FexpResult<()> {
        let requested = match target {
            ".." => local_fs::parent_dir(&self.cwd),
            "-" => return Err(FexpError::PreviousDirUnsupported),
            other => self.resolve_path(other),
        };

        let resolved = local_fs::weakly_canonical(&requested)
            .map_err(|_| FexpError::CannotChangeDir(requested.clone()))?;
        if !resolved.is_dir() {
            return Err(FexpError::CannotChangeDir(requested));
        }

        info!(from = %self.cwd.display(), to = %resolved.display(), "changed directory");
        self.cwd = resolved;
        Ok(())
    }

    pub(crate) fn cmd_cat(&self, file: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let path = self.resolve_path(file);
        let reader = BufReader::new(local_fs::open_regular(&path)?);

        for line in reader.split(b'\n') {
            let line = line.map_err(|e| FexpError::Read {
                path: path.clone(),
                source: e,
            })?;
            ctx.stdout.write(&line)?;
            ctx.stdout.write(b"\n")?;
        }
        Ok(())
    }

    pub(crate) fn cmd_cp(&self, src: &str, dst: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let from = self.resolve_path(src);
        let to = self.resolve_path(dst);

        let bytes = local_fs::copy_file(&from, &to)?;
        debug!(bytes, from = %from.display(), to = %to.display(), "copied");
        ctx.stdout.writeln(&format!("Copied {from:?} -> {to:?}"))?;
        Ok(())
    }

    pub(crate) fn cmd_mv(&self, src: &str, dst: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let from = self.resolve_path(src);
        let to = self.resolve_path(dst);

        match local_fs::move_path(&from, &to)? {
            MoveOutcome::Renamed => {}
            MoveOutcome::Copied => debug!(from = %from.display(), "moved by copy and delete"),
            MoveOutcome::CopiedSourceKept(e) => {
                warn!(from = %from.display(), error = %e, "source left behind after copy");
                ctx.stdout
                    .writeln(&format!("Warning: removed source failed: {e}"))?;
            }
        }
        ctx.stdout.writeln("Moved")?;
        Ok(())
    }

    pub(crate) fn cmd_rm(&self, path: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let path = self.resolve_path(path);

        match local_fs::entry_kind(&path) {
            None => return Err(FexpError::NotFound(path)),
            Some(EntryKind::Directory) => {
                ctx.stdout
                    .writeln(&format!("Removing directory recursively: {path:?}"))?;
                local_fs::remove_tree(&path)?;
            }
            Some(_) => local_fs::remove_file(&path)?,
        }
        ctx.stdout.writeln("Removed")?;
        Ok(())
    }

    pub(crate) fn cmd_touch(&self, file: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let path = self.resolve_path(file);
        local_fs::touch(&path)?;
        ctx.stdout.writeln(&format!("Touched {path:?}"))?;
        Ok(())
    }

    pub(crate) fn cmd_mkdir(&self, dir: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let path = self.resolve_path(dir);
        let line = if local_fs::make_dirs(&path)? {
            format!("Created {path:?}")
        } else {
            format!("Already exists: {path:?}")
        };
        ctx.stdout.writeln(&line)?;
        Ok(())
    }

    pub(crate) fn cmd_search(
        &self,
        pattern: &str,
        start: Option<&str>,
        ctx: &mut ExecContext,
    ) -> FexpResult<()> {
        let start = start.map_or_else(|| self.cwd.clone(), |s| self.resolve_path(s));
        if !start.exists() {
            return Err(FexpError::StartNotFound(start));
        }

        let count = local_fs::search(&start, pattern, |found| {
            ctx.stdout.writeln(&found.display().to_string())?;
            Ok(())
        })?;
        debug!(pattern, count, start = %start.display(), "search finished");
        Ok(())
    }

    pub(crate) fn cmd_chmod(&self, mode: &str, path: &str, ctx: &mut ExecContext) -> FexpResult<()> {
        let perms = PermissionSet::from_octal(mode)?;
        let path = self.resolve_path(path);
        if !path.exists() {
            return Err(FexpError::NotFound(path));
        }

        local_fs::set_permissions(&path, perms)?;
        debug!(mode = %perms.octal(), path = %path.display(), "permissions set");
        ctx.stdout.writeln("Permissions updated")?;
        Ok(())
    }
}
