use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar literal as written in the source: strings are already
/// unescaped, numbers parsed, booleans normalized.
///
/// Serializes as the bare JSON scalar. A bare word (`default: null`,
/// `type: btree`) is kept apart from a quoted string as `Identifier` but
/// serializes the same way, so decoding JSON always yields `String` for
/// text. Compare through [`Value::as_str`] when a value may have come back
/// from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Identifier(String),
}

impl Value {
    /// Returns the string payload of `String` and `Identifier` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Identifier(s) => Some(s),
            Self::Number(_) | Self::Boolean(_) => None,
        }
    }

    /// Returns the numeric payload of `Number` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as plain text, without quoting.
    pub fn into_text(self) -> String {
        match self {
            Self::String(s) | Self::Identifier(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{s}'"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Identifier(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_variants() {
        assert_eq!(Value::String("hello".into()).to_string(), "'hello'");
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Identifier("null".into()).to_string(), "null");
    }

    #[test]
    fn into_text_strips_quoting() {
        assert_eq!(Value::String("a b".into()).into_text(), "a b");
        assert_eq!(Value::Number(3.0).into_text(), "3");
        assert_eq!(Value::Boolean(false).into_text(), "false");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Identifier("btree".into()).as_str(), Some("btree"));
        assert_eq!(Value::Number(1.5).as_str(), None);
        assert_eq!(Value::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Boolean(true).as_f64(), None);
    }

    #[test]
    fn serializes_as_bare_scalar() {
        assert_eq!(
            serde_json::to_string(&Value::String("x".into())).unwrap(),
            "\"x\""
        );
        assert_eq!(serde_json::to_string(&Value::Number(7.5)).unwrap(), "7.5");
        assert_eq!(serde_json::to_string(&Value::Boolean(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&Value::Identifier("now".into())).unwrap(),
            "\"now\""
        );
    }

    #[test]
    fn bare_words_decode_as_strings() {
        let json = serde_json::to_value(Value::Identifier("null".into())).unwrap();
        assert_eq!(json, serde_json::json!("null"));

        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, Value::String("null".into()));
        assert_eq!(back.as_str(), Value::Identifier("null".into()).as_str());
    }
}
