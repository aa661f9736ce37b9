use dbml_dsl::SyntaxError;
use miette::{Diagnostic, NamedSource, SourceSpan};

/// A diagnostic wrapping a [`SyntaxError`] for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(dbml::syntax))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

/// Convert a [`SyntaxError`] into a miette [`SyntaxDiagnostic`].
///
/// The span covers the offending token: a whole word, or one character.
pub fn syntax_error_to_diagnostic(
    error: &SyntaxError,
    source: &str,
    filename: &str,
) -> SyntaxDiagnostic {
    let offset = error.offset.min(source.len());
    let length = token_len(source.get(offset..).unwrap_or(""));

    let label = match error.expected.as_slice() {
        [] => "unexpected input".to_string(),
        [only] => format!("expected {only}"),
        _ => "unexpected input here".to_string(),
    };
    let suggestion = (error.expected.len() > 1)
        .then(|| format!("Expected one of: {}.", error.expected.join(", ")));

    SyntaxDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span: (offset, length).into(),
        message: format!(
            "{} (line {}, column {})",
            error.message, error.line, error.column
        ),
        label,
        suggestion,
    }
}

/// Render a syntax error for a file as a miette report.
pub fn render_diagnostic(error: &SyntaxError, source: &str, filename: &str) -> miette::Report {
    miette::Report::new(syntax_error_to_diagnostic(error, source, filename))
}

/// Byte length of the token starting `rest`: a run of word characters,
/// a single other character, or zero at a line end or end of input.
fn token_len(rest: &str) -> usize {
    let mut chars = rest.chars();
    match chars.next() {
        None | Some('\n') | Some('\r') => 0,
        Some(c) if c.is_alphanumeric() || c == '_' => rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
            .unwrap_or(rest.len()),
        Some(c) => c.len_utf8(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_for(source: &str) -> SyntaxError {
        dbml_dsl::parse(source).unwrap_err()
    }

    #[test]
    fn span_covers_offending_word() {
        let source = "Table t { id integer [bogus_setting] }";
        let diag = syntax_error_to_diagnostic(&error_for(source), source, "shop.dbml");
        assert_eq!(diag.span.offset(), 22);
        assert_eq!(diag.span.len(), "bogus_setting".len());
        assert!(diag.message.contains("line 1, column 23"));
    }

    #[test]
    fn several_alternatives_go_into_help() {
        let source = "Table t { id integer [bogus_setting] }";
        let diag = syntax_error_to_diagnostic(&error_for(source), source, "shop.dbml");
        let help = diag.suggestion.expect("help text");
        assert!(help.starts_with("Expected one of:"));
        assert!(help.contains("'pk'"));
    }

    #[test]
    fn end_of_input_has_empty_span() {
        let source = "Table t {";
        let diag = syntax_error_to_diagnostic(&error_for(source), source, "t.dbml");
        assert_eq!(diag.span.offset(), source.len());
        assert_eq!(diag.span.len(), 0);
    }

    #[test]
    fn single_alternative_becomes_label() {
        let error = SyntaxError {
            message: "expected '}'".into(),
            line: 1,
            column: 3,
            offset: 2,
            source_line: "{ x".into(),
            expected: vec!["'}'".into()],
        };
        let diag = syntax_error_to_diagnostic(&error, "{ x", "t.dbml");
        assert_eq!(diag.label, "expected '}'");
        assert!(diag.suggestion.is_none());
        assert_eq!(diag.span.len(), 1);
    }

    #[test]
    fn token_len_cases() {
        assert_eq!(token_len("word rest"), 4);
        assert_eq!(token_len("[x"), 1);
        assert_eq!(token_len("é"), 2);
        assert_eq!(token_len("\nnext"), 0);
        assert_eq!(token_len(""), 0);
    }

    #[test]
    fn render_produces_report() {
        let source = "Table {";
        let report = render_diagnostic(&error_for(source), source, "t.dbml");
        assert!(report.to_string().contains("line 1"));
    }
}
