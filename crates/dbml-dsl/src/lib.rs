//! # dbml-dsl
//!
//! Parser for the DBML schema description language.
//!
//! This crate provides:
//! - A PEG grammar (`dbml.pest`) with case-insensitive keywords and ordered choice
//! - A transform from the parse tree into a typed [`Document`](dbml_core::Document)
//! - A post-parse type alias mapper
//! - Syntax-only validation with line/column diagnostics
//!
//! # Example
//!
//! ```
//! use dbml_dsl::{parse, validate};
//!
//! let source = r#"
//! Table users {
//!     id integer [pk, increment]
//!     email varchar(255) [unique, not null]
//!     created_at timestamptz [default: `now()`]
//! }
//!
//! Ref: posts.user_id > users.id
//! "#;
//!
//! let document = parse(source).expect("parse failed");
//! assert_eq!(document.tables.len(), 1);
//! assert_eq!(document.tables[0].columns[2].column_type, "timestamp with time zone");
//! assert_eq!(document.references.len(), 1);
//!
//! assert!(!validate("Table users {").valid);
//! ```

pub mod error;
pub mod grammar;
mod lexer;
pub mod parser;
mod transform;
pub mod type_map;

pub use error::SyntaxError;
pub use parser::{ParseOptions, Parser, Validation};
pub use type_map::TypeMap;

/// Parses `source` with default options.
///
/// # Errors
///
/// Returns a [`SyntaxError`] when `source` does not match the grammar.
pub fn parse(source: &str) -> Result<dbml_core::Document, SyntaxError> {
    Parser::default().parse(source)
}

/// Checks `source` against the grammar with default options.
pub fn validate(source: &str) -> Validation {
    Parser::default().validate(source)
}
