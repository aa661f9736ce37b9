use std::collections::BTreeMap;

use dbml_core::{Column, Document};

/// Built-in spellings rewritten unless the caller overrides them.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("bool", "boolean"),
    ("int4", "integer"),
    ("int8", "bigint"),
    ("timestamptz", "timestamp with time zone"),
];

/// Column type substitutions applied after parsing.
///
/// Matching is on the whole type string: `text[]` and `varchar(255)` are
/// only rewritten when that exact string is a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    aliases: BTreeMap<String, String>,
}

impl TypeMap {
    /// The built-in aliases only.
    pub fn new() -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { aliases }
    }

    /// The built-in aliases overlaid with `aliases`; caller entries win.
    pub fn with_aliases<K, V>(aliases: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        map.aliases
            .extend(aliases.into_iter().map(|(k, v)| (k.into(), v.into())));
        map
    }

    pub fn get(&self, column_type: &str) -> Option<&str> {
        self.aliases.get(column_type).map(String::as_str)
    }

    /// Rewrites the type of every column of every table and table partial.
    pub fn apply(&self, document: &mut Document) {
        for table in &mut document.tables {
            table.for_each_column_mut(|column| self.rewrite(column));
        }
        for partial in &mut document.table_partials {
            for column in &mut partial.columns {
                self.rewrite(column);
            }
        }
    }

    fn rewrite(&self, column: &mut Column) {
        if let Some(mapped) = self.get(&column.column_type) {
            tracing::trace!(column = %column.name, from = %column.column_type, to = mapped, "type alias");
            column.column_type = mapped.to_string();
        }
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}
