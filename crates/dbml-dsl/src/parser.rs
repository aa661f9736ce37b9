use std::collections::BTreeMap;

use dbml_core::Document;
use pest::Parser as _;
use serde::{Deserialize, Serialize};

use crate::error::SyntaxError;
use crate::grammar::{DbmlGrammar, Rule};
use crate::transform;
use crate::type_map::TypeMap;

/// Caller configuration for a [`Parser`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Extra type aliases, overlaid on the built-in ones.
    pub type_aliases: BTreeMap<String, String>,
    /// Reserved. Accepted and recorded; parsing is unaffected.
    pub strict: bool,
}

impl ParseOptions {
    pub fn with_type_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.type_aliases.insert(from.into(), to.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Outcome of a syntax-only check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn failed(error: &SyntaxError) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// A configured parser. Holds only immutable settings, so one instance can
/// be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    type_map: TypeMap,
    strict: bool,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        if options.strict {
            tracing::debug!("strict mode requested; no additional checks are defined");
        }
        Self {
            type_map: TypeMap::with_aliases(options.type_aliases),
            strict: options.strict,
        }
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses `source` into a [`Document`], then applies type aliases.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] positioned at the furthest point the grammar
    /// reached. No partial document is produced.
    pub fn parse(&self, source: &str) -> Result<Document, SyntaxError> {
        tracing::debug!(bytes = source.len(), "parsing document");

        let root = DbmlGrammar::parse(Rule::document, source)
            .map_err(|err| SyntaxError::from_pest(&err, source))?
            .next()
            .ok_or_else(|| SyntaxError::at(source, 0, "empty parse tree"))?;
        let mut document =
            transform::document(root).map_err(|malformed| malformed.into_syntax_error(source))?;
        self.type_map.apply(&mut document);

        tracing::debug!(
            tables = document.tables.len(),
            references = document.references.len(),
            enums = document.enums.len(),
            groups = document.groups.len(),
            partials = document.table_partials.len(),
            "parsed document"
        );
        Ok(document)
    }

    /// Checks `source` against the grammar without building a document.
    pub fn validate(&self, source: &str) -> Validation {
        match self.check(source) {
            Ok(()) => Validation::ok(),
            Err(error) => Validation::failed(&error),
        }
    }

    /// Like [`validate`](Self::validate), but keeps the positioned error.
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] for the first grammar failure.
    pub fn check(&self, source: &str) -> Result<(), SyntaxError> {
        DbmlGrammar::parse(Rule::document, source)
            .map(|_| ())
            .map_err(|err| {
                let error = SyntaxError::from_pest(&err, source);
                tracing::debug!(line = error.line, column = error.column, "validation failed");
                error
            })
    }
}
