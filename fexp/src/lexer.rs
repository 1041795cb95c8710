//! Lexer for command lines
//!
//! Splits a line into argument tokens. Double-quoted segments keep their
//! whitespace and lose their quotes; a quoted segment touching bare
//! characters belongs to the same token.

use chumsky::prelude::*;
use tracing::debug;

pub fn lexer() -> impl Parser<char, Vec<String>, Error = Simple<char>> {
    let ws = filter(|c: &char| c.is_whitespace()).repeated();

    // Inside quotes only \" and \\ are escapes; any other \X stays literal.
    let dq_seg = just('"')
        .ignore_then(
            just('\\')
                .ignore_then(any())
                .map(|c: char| match c {
                    '"' | '\\' => c.to_string(),
                    _ => format!("\\{c}"),
                })
                .or(filter(|c: &char| *c != '"' && *c != '\\').map(|c: char| c.to_string()))
                .repeated(),
        )
        .then_ignore(just('"'))
        .map(|parts: Vec<String>| parts.concat());

    let bare_seg = filter(|c: &char| !c.is_whitespace() && *c != '"')
        .repeated()
        .at_least(1)
        .collect::<String>();

    let word = bare_seg
        .or(dq_seg)
        .repeated()
        .at_least(1)
        .map(|segments: Vec<String>| segments.concat());

    word.padded_by(ws).repeated().then_ignore(end())
}

/// Tokenize one input line into non-empty arguments.
///
/// Falls back to plain whitespace splitting when quote-aware lexing produces
/// nothing, e.g. on an unterminated quote.
pub fn tokenize(line: &str) -> Vec<String> {
    let tokens: Vec<String> = match lexer().parse(line) {
        Ok(tokens) => tokens.into_iter().filter(|t| !t.is_empty()).collect(),
        Err(errs) => {
            debug!(line, errors = errs.len(), "quote-aware tokenizing failed");
            Vec::new()
        }
    };

    if tokens.is_empty() {
        line.split_whitespace().map(str::to_string).collect()
    } else {
        tokens
    }
}
