use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An entry of a table's `indexes { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub columns: Vec<IndexColumn>,
    /// Written in the parenthesized form, even with a single column.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub composite: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl Index {
    /// Creates an index over `columns` with no settings applied.
    pub fn new(columns: Vec<IndexColumn>) -> Self {
        Self {
            columns,
            composite: false,
            index_type: None,
            unique: false,
            primary_key: false,
            name: None,
            where_clause: None,
        }
    }

    /// Creates an index written as `(col, ...)`.
    pub fn composite(columns: Vec<IndexColumn>) -> Self {
        Self {
            composite: true,
            ..Self::new(columns)
        }
    }

    /// Returns true for the parenthesized form, whatever its column count.
    pub fn is_composite(&self) -> bool {
        self.composite
    }
}

/// A column of an index with its optional sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    /// `None` means the engine's default order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortOrder>,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(CoreError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Index access method. Names outside the known set are kept as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndexType {
    Btree,
    Hash,
    Gin,
    Gist,
    Spgist,
    Brin,
    Custom(String),
}

impl IndexType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Btree => "btree",
            Self::Hash => "hash",
            Self::Gin => "gin",
            Self::Gist => "gist",
            Self::Spgist => "spgist",
            Self::Brin => "brin",
            Self::Custom(s) => s,
        }
    }
}

impl From<&str> for IndexType {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "btree" => Self::Btree,
            "hash" => Self::Hash,
            "gin" => Self::Gin,
            "gist" => Self::Gist,
            "spgist" => Self::Spgist,
            "brin" => Self::Brin,
            _ => Self::Custom(s.to_string()),
        }
    }
}

impl From<String> for IndexType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<IndexType> for String {
    fn from(t: IndexType) -> String {
        t.as_str().to_string()
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
