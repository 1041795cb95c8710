use fexp::CommandKind;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Tab completion for command names and paths under the session directory.
pub struct FexpHelper {
    cwd: PathBuf,
}

impl FexpHelper {
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        if self.cwd != cwd {
            self.cwd = cwd.to_path_buf();
        }
    }
}

impl Completer for FexpHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);
        let is_first_word = line_to_cursor[..start].trim().is_empty();

        let mut completions = Vec::new();

        if is_first_word {
            if word.is_empty() {
                return Ok((pos, completions));
            }
            for kind in CommandKind::ALL {
                if kind.name().starts_with(word) {
                    completions.push(Pair {
                        display: kind.name().to_string(),
                        replacement: format!("{} ", kind.name()),
                    });
                }
            }
            if !word.contains('/') && !word.starts_with('.') {
                return Ok((start, completions));
            }
        }

        let (dir_part, partial) = match word.rfind('/') {
            Some(idx) => (&word[..=idx], &word[idx + 1..]),
            None => ("", word),
        };
        let dir = if dir_part.is_empty() {
            self.cwd.clone()
        } else {
            self.cwd.join(dir_part)
        };

        for name in complete_path(&dir, partial) {
            completions.push(Pair {
                replacement: format!("{dir_part}{name}"),
                display: name,
            });
        }

        Ok((start, completions))
    }
}

/// Entry names in `dir` starting with `partial`; directories get a trailing `/`.
/// Hidden entries only show up once the partial name starts with a dot.
fn complete_path(dir: &Path, partial: &str) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(partial) || (name.starts_with('.') && !partial.starts_with('.')) {
                return None;
            }
            let is_dir = std::fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            Some(if is_dir { format!("{name}/") } else { name })
        })
        .collect();
    names.sort();
    names
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for FexpHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for FexpHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for FexpHelper {}

impl Helper for FexpHelper {}
