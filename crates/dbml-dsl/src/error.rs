use std::fmt;

use pest::error::{ErrorVariant, InputLocation};
use serde::Serialize;

use crate::grammar::{describe, Rule};

/// A positioned syntax error.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
/// `offset` is the byte offset into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    /// The full text of the offending line, without its terminator.
    pub source_line: String,
    /// Descriptions of what the grammar would have accepted at `offset`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected: Vec<String>,
}

impl SyntaxError {
    /// Builds an error at `offset` in `source`, computing line and column.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = clamp_to_char_boundary(source, offset);
        let before = &source[..offset];
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line = before.matches('\n').count() + 1;
        let column = source[line_start..offset].chars().count() + 1;
        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let source_line = source[line_start..line_end]
            .trim_end_matches('\r')
            .to_string();

        Self {
            message: message.into(),
            line,
            column,
            offset,
            source_line,
            expected: Vec::new(),
        }
    }

    /// Converts a grammar failure into a positioned error.
    pub fn from_pest(err: &pest::error::Error<Rule>, source: &str) -> Self {
        let offset = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };

        let (message, expected) = match &err.variant {
            ErrorVariant::ParsingError { positives, .. } => {
                let mut expected: Vec<String> = Vec::new();
                for rule in positives {
                    let text = describe(rule);
                    if !expected.contains(&text) {
                        expected.push(text);
                    }
                }
                let found = found_at(source, offset);
                let message = if expected.is_empty() {
                    format!("unexpected {found}")
                } else {
                    format!("expected {}, found {found}", join_alternatives(&expected))
                };
                (message, expected)
            }
            ErrorVariant::CustomError { message } => (message.clone(), Vec::new()),
        };

        let mut error = Self::at(source, offset, message);
        error.expected = expected;
        error
    }

    /// Renders the offending line with a caret under the error column.
    pub fn snippet(&self) -> String {
        // Keep tabs in the prefix so the caret lines up under them.
        let pad: String = self
            .source_line
            .chars()
            .take(self.column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!("{}\n{pad}^", self.source_line)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "syntax error at line {}, column {}: {}",
            self.line, self.column, self.message
        )?;
        write!(f, "{}", self.snippet())
    }
}

impl std::error::Error for SyntaxError {}

fn clamp_to_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Describes the token starting at `offset`: a word, or a single character.
fn found_at(source: &str, offset: usize) -> String {
    let rest = &source[clamp_to_char_boundary(source, offset)..];
    let mut chars = rest.char_indices();
    match chars.next() {
        None => "end of input".to_string(),
        Some((_, c)) if c.is_alphanumeric() || c == '_' => {
            let end = rest
                .char_indices()
                .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            format!("'{}'", &rest[..end])
        }
        Some((_, '\n')) => "end of line".to_string(),
        Some((_, c)) => format!("'{c}'"),
    }
}

fn join_alternatives(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}
