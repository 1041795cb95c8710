use crate::completer::FexpHelper;
use fexp::{FexpError, FexpResult, LineSource, Output};
use fexp_config::HistoryConfig;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{CompletionType, Config, Editor};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Interactive line source backed by rustyline.
pub struct EditorSource {
    editor: Editor<FexpHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(cwd: &Path, history: &HistoryConfig) -> Result<Self, ReadlineError> {
        let max_entries = history.max_entries.max(1);
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .max_history_size(max_entries)?
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .auto_add_history(false)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(FexpHelper::new(cwd.to_path_buf())));

        let history_path = if history.enabled { history.path() } else { None };
        if let Some(path) = &history_path {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    pub fn save_history(&mut self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }
}

impl LineSource for EditorSource {
    fn read_line(
        &mut self,
        prompt: &str,
        cwd: &Path,
        out: &mut Output,
    ) -> FexpResult<Option<String>> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_cwd(cwd);
        }

        match self.editor.readline(prompt) {
            Ok(line) => {
                record_history(self.editor.history_mut(), &line);
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                out.writeln("^C")?;
                Ok(Some(String::new()))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(FexpError::Input(e.to_string())),
        }
    }
}

impl Drop for EditorSource {
    fn drop(&mut self) {
        self.save_history();
    }
}

/// Add a non-blank line to the in-memory history.
fn record_history(history: &mut DefaultHistory, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    if let Err(e) = history.add(line) {
        debug!(error = %e, "history entry not recorded");
    }
}
