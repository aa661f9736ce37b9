use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::default_value::DefaultValue;
use super::reference::{Endpoint, RelationKind};

/// A table column with its type and the merged result of its settings list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// The type as written, including any `[]` suffix or `(params)` list.
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,
    /// `Some(true)` for `not null`, `Some(false)` for an explicit `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<bool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub increment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityGeneration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<InlineReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

impl Column {
    /// Creates a column with no settings applied.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            primary_key: false,
            unique: false,
            not_null: None,
            increment: false,
            identity: None,
            generated: None,
            default: None,
            note: None,
            reference: None,
            check: None,
        }
    }

    /// Returns true if the column was explicitly marked `not null`.
    pub fn is_not_null(&self) -> bool {
        self.not_null == Some(true)
    }
}

/// Mode of a `generated ... as identity` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityGeneration {
    #[serde(rename = "always")]
    Always,
    #[serde(rename = "by default")]
    ByDefault,
}

impl fmt::Display for IdentityGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::ByDefault => write!(f, "by default"),
        }
    }
}

impl FromStr for IdentityGeneration {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "by default" => Ok(Self::ByDefault),
            _ => Err(CoreError::UnknownIdentityGeneration(s.to_string())),
        }
    }
}

/// A `generated always as `expr` [stored]` column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    pub expression: String,
    #[serde(default)]
    pub stored: bool,
}

/// A `ref:` column setting. The source endpoint is the owning column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineReference {
    pub relation: RelationKind,
    pub endpoint: Endpoint,
}
