use serde::{Deserialize, Serialize};

/// An entry of a table's `constraints { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: ConstraintKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deferrable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub initially_deferred: bool,
}

impl Constraint {
    /// Creates an unnamed, non-deferrable constraint.
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            name: None,
            kind,
            deferrable: false,
            initially_deferred: false,
        }
    }
}

/// The constraint variant and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintKind {
    Check {
        expression: String,
    },
    Unique {
        columns: Vec<String>,
    },
    PrimaryKey {
        columns: Vec<String>,
    },
    Exclude {
        method: String,
        elements: Vec<ExcludeElement>,
    },
}

impl ConstraintKind {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Check { .. } => "check",
            Self::Unique { .. } => "unique",
            Self::PrimaryKey { .. } => "primary_key",
            Self::Exclude { .. } => "exclude",
        }
    }
}

/// One `column with operator` pair of an exclusion constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeElement {
    pub column: String,
    pub operator: String,
}
