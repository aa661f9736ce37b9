use serde::{Deserialize, Serialize};

use super::column::Column;
use super::constraint::Constraint;
use super::index::Index;
use super::value::Value;

/// A table definition.
///
/// `elements` records columns and `~partial` references in exact source
/// order; `columns` is the column-only subsequence of `elements`. Both are
/// filled from the same traversal and never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_color: Option<Value>,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    pub elements: Vec<TableElement>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
            note: None,
            header_color: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Appends a column to both `columns` and `elements`.
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column.clone());
        self.elements.push(TableElement::Column(column));
    }

    /// Appends a `~name` partial reference to `elements`.
    pub fn push_partial_reference(&mut self, name: impl Into<String>) {
        self.elements
            .push(TableElement::PartialReference { name: name.into() });
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the table partials this table includes, in source order.
    pub fn partial_references(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            TableElement::PartialReference { name } => Some(name.as_str()),
            TableElement::Column(_) => None,
        })
    }

    /// Applies `f` to every column, keeping `columns` and `elements` in step.
    pub fn for_each_column_mut(&mut self, mut f: impl FnMut(&mut Column)) {
        for column in &mut self.columns {
            f(column);
        }
        for element in &mut self.elements {
            if let TableElement::Column(column) = element {
                f(column);
            }
        }
    }
}

/// An ordered entry of a table body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableElement {
    Column(Column),
    PartialReference { name: String },
}

/// A named, reusable field set (`TablePartial name { ... }`).
///
/// Never merged into tables here; `~name` references stay unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePartial {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_color: Option<Value>,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl TablePartial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: None,
            header_color: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
        }
    }
}
