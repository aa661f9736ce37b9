use serde::{Deserialize, Serialize};

use super::enum_def::Enum;
use super::group::Group;
use super::project::Project;
use super::reference::Reference;
use super::table::{Table, TablePartial};

/// The parsed representation of one schema source text.
///
/// Each collection keeps source order. Nothing is deduplicated or
/// cross-checked: duplicate names and dangling references are left for
/// downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Set from the `Project` block's name, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default)]
    pub table_partials: Vec<TablePartial>,
}

impl Document {
    /// Looks up the first table with the given name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Looks up the first enum with the given name.
    pub fn enum_def(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Looks up the first table partial with the given name.
    pub fn table_partial(&self, name: &str) -> Option<&TablePartial> {
        self.table_partials.iter().find(|p| p.name == name)
    }

    /// Returns true if the document declares nothing.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.references.is_empty()
            && self.enums.is_empty()
            && self.groups.is_empty()
            && self.project.is_none()
            && self.table_partials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert!(doc.table("users").is_none());
    }

    #[test]
    fn lookups_return_first_match() {
        let mut doc = Document::default();
        let mut first = Table::new("users");
        first.note = Some("first".into());
        doc.tables.push(first);
        doc.tables.push(Table::new("users"));
        assert_eq!(doc.table("users").unwrap().note.as_deref(), Some("first"));
        assert!(!doc.is_empty());
    }

    #[test]
    fn serde_roundtrip_empty() {
        let json = serde_json::to_string(&Document::default()).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Document::default());
    }
}
