use logos::Logos;

/// Pieces of a quoted string body: escape sequences and the literal runs
/// between them.
#[derive(Logos, Debug, Clone, PartialEq)]
enum Fragment<'s> {
    #[regex(r"\\[\s\S]", |lex| lex.slice()[1..].chars().next())]
    Escape(char),

    #[regex(r"[^\\]+")]
    Literal(&'s str),
}

/// Resolves backslash escapes in the body of a single- or double-quoted
/// string.
///
/// `\n`, `\r` and `\t` become control characters; any other escaped
/// character stands for itself, so `\'`, `\"` and `\\` drop the backslash.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut lexer = Fragment::lexer(body);
    while let Some(fragment) = lexer.next() {
        match fragment {
            Ok(Fragment::Literal(text)) => out.push_str(text),
            Ok(Fragment::Escape('n')) => out.push('\n'),
            Ok(Fragment::Escape('r')) => out.push('\r'),
            Ok(Fragment::Escape('t')) => out.push('\t'),
            Ok(Fragment::Escape(c)) => out.push(c),
            // A trailing lone backslash is kept as written.
            Err(()) => out.push_str(lexer.slice()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(unescape("hello world"), "hello world");
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn quote_and_backslash_escapes() {
        assert_eq!(unescape(r"it\'s"), "it's");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"C:\\temp"), r"C:\temp");
    }

    #[test]
    fn control_escapes() {
        assert_eq!(unescape(r"a\nb\tc\rd"), "a\nb\tc\rd");
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(unescape(r"\q\%"), "q%");
    }

    #[test]
    fn escaped_newline_and_multibyte() {
        assert_eq!(unescape("a\\\nb"), "a\nb");
        assert_eq!(unescape(r"caf\é"), "café");
    }

    #[test]
    fn trailing_backslash_is_kept() {
        assert_eq!(unescape("abc\\"), "abc\\");
    }
}
