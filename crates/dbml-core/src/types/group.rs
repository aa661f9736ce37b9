use serde::{Deserialize, Serialize};

use super::qualified_name::QualifiedName;

/// A `TableGroup name { ... }` listing member tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub tables: Vec<QualifiedName>,
}
