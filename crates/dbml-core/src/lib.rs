//! # dbml-core
//!
//! The typed document model produced by `dbml-dsl`: tables, columns,
//! indexes, constraints, references, enums, groups, table partials and the
//! project block. Every entity is a plain value with `serde` support so
//! downstream renderers can consume it directly or as JSON.

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::*;

#[cfg(test)]
mod tests {
    #[test]
    fn model_types_are_reachable_from_the_crate_root() {
        let mut document = crate::Document::default();
        document.tables.push(crate::Table::new("users"));
        let name = crate::QualifiedName::new(Some("public".into()), "users");
        assert_eq!(document.tables[0].name, name.name);
    }
}
