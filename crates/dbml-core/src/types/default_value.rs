use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// A column default: either a typed literal or an opaque backtick expression.
///
/// Literals serialize as the bare value; expressions serialize as
/// `{"kind": "expression", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DefaultValueRepr", into = "DefaultValueRepr")]
pub enum DefaultValue {
    Literal(Value),
    /// Raw text between backticks, not interpreted.
    Expression(String),
}

impl DefaultValue {
    /// Returns the literal value, if this default is not an expression.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Expression(_) => None,
        }
    }

    /// Returns the expression text, if this default is an expression.
    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Self::Expression(text) => Some(text),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Expression(text) => write!(f, "`{text}`"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DefaultValueRepr {
    Expression { kind: ExpressionTag, text: String },
    Literal(Value),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ExpressionTag {
    Expression,
}

impl From<DefaultValueRepr> for DefaultValue {
    fn from(repr: DefaultValueRepr) -> Self {
        match repr {
            DefaultValueRepr::Expression { text, .. } => Self::Expression(text),
            DefaultValueRepr::Literal(v) => Self::Literal(v),
        }
    }
}

impl From<DefaultValue> for DefaultValueRepr {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Expression(text) => Self::Expression {
                kind: ExpressionTag::Expression,
                text,
            },
            DefaultValue::Literal(v) => Self::Literal(v),
        }
    }
}
