use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A document-level relationship between two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from: Endpoint,
    pub to: Endpoint,
    pub relation: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

/// One side of a reference: `[schema.]table.column` or
/// `[schema.]table.(col, col, ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub table: String,
    #[serde(flatten)]
    pub columns: EndpointColumns,
}

impl Endpoint {
    /// Returns the referenced column names, one for a single-column endpoint.
    pub fn column_names(&self) -> Vec<&str> {
        match &self.columns {
            EndpointColumns::Column(c) => vec![c.as_str()],
            EndpointColumns::Columns(cs) => cs.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        match &self.columns {
            EndpointColumns::Column(c) => write!(f, "{}.{c}", self.table),
            EndpointColumns::Columns(cs) => write!(f, "{}.({})", self.table, cs.join(", ")),
        }
    }
}

/// Single column or composite key; serialized as `column` or `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointColumns {
    Column(String),
    Columns(Vec<String>),
}

/// The relationship token between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// `>`: many-to-one, the right side is the "one" target.
    #[serde(rename = ">")]
    ManyToOne,
    /// `<`: one-to-many, the left side is the "one" target.
    #[serde(rename = "<")]
    OneToMany,
    /// `-`
    #[serde(rename = "-")]
    OneToOne,
    /// `<>`
    #[serde(rename = "<>")]
    ManyToMany,
}

impl RelationKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::ManyToOne => ">",
            Self::OneToMany => "<",
            Self::OneToOne => "-",
            Self::ManyToMany => "<>",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for RelationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::ManyToOne),
            "<" => Ok(Self::OneToMany),
            "-" => Ok(Self::OneToOne),
            "<>" => Ok(Self::ManyToMany),
            _ => Err(CoreError::UnknownRelation(s.to_string())),
        }
    }
}

/// `delete:` / `update:` action of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[serde(rename = "cascade")]
    Cascade,
    #[serde(rename = "restrict")]
    Restrict,
    #[serde(rename = "set null")]
    SetNull,
    #[serde(rename = "set default")]
    SetDefault,
    #[serde(rename = "no action")]
    NoAction,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cascade => "cascade",
            Self::Restrict => "restrict",
            Self::SetNull => "set null",
            Self::SetDefault => "set default",
            Self::NoAction => "no action",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ReferentialAction {
    type Err = CoreError;

    /// Case-insensitive; any run of whitespace between words is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match normalized.as_str() {
            "cascade" => Ok(Self::Cascade),
            "restrict" => Ok(Self::Restrict),
            "set null" => Ok(Self::SetNull),
            "set default" => Ok(Self::SetDefault),
            "no action" => Ok(Self::NoAction),
            _ => Err(CoreError::UnknownReferentialAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(table: &str, column: &str) -> Endpoint {
        Endpoint {
            schema: None,
            table: table.into(),
            columns: EndpointColumns::Column(column.into()),
        }
    }

    #[test]
    fn relation_symbols_parse() {
        for (text, kind) in [
            (">", RelationKind::ManyToOne),
            ("<", RelationKind::OneToMany),
            ("-", RelationKind::OneToOne),
            ("<>", RelationKind::ManyToMany),
        ] {
            assert_eq!(text.parse::<RelationKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), text);
        }
        assert!("=".parse::<RelationKind>().is_err());
    }

    #[test]
    fn referential_action_parse_is_case_and_space_insensitive() {
        assert_eq!(
            "SET   NULL".parse::<ReferentialAction>().unwrap(),
            ReferentialAction::SetNull
        );
        assert_eq!(
            "No Action".parse::<ReferentialAction>().unwrap(),
            ReferentialAction::NoAction
        );
        assert!("drop".parse::<ReferentialAction>().is_err());
    }

    #[test]
    fn endpoint_serializes_single_column() {
        let json = serde_json::to_value(endpoint("users", "id")).unwrap();
        assert_eq!(json, serde_json::json!({"table": "users", "column": "id"}));
    }

    #[test]
    fn endpoint_serializes_composite_columns() {
        let ep = Endpoint {
            schema: Some("core".into()),
            table: "orders".into(),
            columns: EndpointColumns::Columns(vec!["a".into(), "b".into()]),
        };
        let json = serde_json::to_value(&ep).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"schema": "core", "table": "orders", "columns": ["a", "b"]})
        );
        let back: Endpoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, ep);
    }

    #[test]
    fn endpoint_display() {
        assert_eq!(endpoint("users", "id").to_string(), "users.id");
        let ep = Endpoint {
            schema: Some("s".into()),
            table: "t".into(),
            columns: EndpointColumns::Columns(vec!["a".into(), "b".into()]),
        };
        assert_eq!(ep.to_string(), "s.t.(a, b)");
        assert_eq!(ep.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn reference_serde_shape() {
        let r = Reference {
            name: None,
            from: endpoint("posts", "user_id"),
            to: endpoint("users", "id"),
            relation: RelationKind::ManyToOne,
            on_delete: Some(ReferentialAction::Cascade),
            on_update: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["relation"], ">");
        assert_eq!(json["on_delete"], "cascade");
        assert!(json.get("on_update").is_none());
        assert!(json.get("name").is_none());
    }
}
