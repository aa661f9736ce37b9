//! Parse tree to [`Document`] conversion.
//!
//! Each submodule handles one family of constructs. Nodes are read through
//! [`Children`], which skips keyword tokens and turns missing or misplaced
//! children into a [`MalformedTree`] instead of panicking.

mod column;
mod index;
mod reference;
mod table;

use dbml_core::{Document, Enum, EnumValue, Group, Project, QualifiedName, Value};
use pest::iterators::{Pair, Pairs};

use crate::error::SyntaxError;
use crate::grammar::{is_keyword, Rule};
use crate::lexer::unescape;

/// A tree node that does not have the shape the grammar guarantees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MalformedTree {
    pub offset: usize,
    pub expected: &'static str,
}

impl MalformedTree {
    pub fn at(pair: &Pair<'_, Rule>, expected: &'static str) -> Self {
        Self {
            offset: pair.as_span().start(),
            expected,
        }
    }

    pub fn into_syntax_error(self, source: &str) -> SyntaxError {
        SyntaxError::at(
            source,
            self.offset,
            format!("malformed parse tree: expected {}", self.expected),
        )
    }
}

pub(crate) type Result<T> = std::result::Result<T, MalformedTree>;

/// Cursor over the data-carrying children of a node.
pub(crate) struct Children<'i> {
    inner: Pairs<'i, Rule>,
    peeked: Option<Pair<'i, Rule>>,
    end: usize,
}

impl<'i> Children<'i> {
    pub fn of(pair: Pair<'i, Rule>) -> Self {
        let end = pair.as_span().end();
        Self {
            inner: pair.into_inner(),
            peeked: None,
            end,
        }
    }

    pub fn peek_rule(&mut self) -> Option<Rule> {
        if self.peeked.is_none() {
            self.peeked = self.inner.find(|p| !is_keyword(p.as_rule()));
        }
        self.peeked.as_ref().map(Pair::as_rule)
    }

    /// Takes the next child only if it was produced by `rule`.
    pub fn next_if(&mut self, rule: Rule) -> Option<Pair<'i, Rule>> {
        if self.peek_rule() == Some(rule) {
            self.next()
        } else {
            None
        }
    }

    /// Takes the next child, whatever its rule.
    pub fn expect(&mut self, expected: &'static str) -> Result<Pair<'i, Rule>> {
        let end = self.end;
        self.next().ok_or(MalformedTree {
            offset: end,
            expected,
        })
    }

    /// Takes the next child, which must have been produced by `rule`.
    pub fn expect_rule(&mut self, rule: Rule, expected: &'static str) -> Result<Pair<'i, Rule>> {
        let pair = self.expect(expected)?;
        if pair.as_rule() == rule {
            Ok(pair)
        } else {
            Err(MalformedTree::at(&pair, expected))
        }
    }
}

impl<'i> Iterator for Children<'i> {
    type Item = Pair<'i, Rule>;

    fn next(&mut self) -> Option<Self::Item> {
        self.peeked
            .take()
            .or_else(|| self.inner.find(|p| !is_keyword(p.as_rule())))
    }
}

/// Builds a document from the root `document` node.
pub(crate) fn document(root: Pair<'_, Rule>) -> Result<Document> {
    let mut document = Document::default();

    for element in Children::of(root) {
        match element.as_rule() {
            Rule::project => {
                let project = project(element)?;
                document.name = project.name.clone();
                document.project = Some(project);
            }
            Rule::table => document.tables.push(table::table(element)?),
            Rule::table_partial => document.table_partials.push(table::table_partial(element)?),
            Rule::reference => document.references.push(reference::reference(element)?),
            Rule::enum_def => document.enums.push(enum_def(element)?),
            Rule::table_group => document.groups.push(group(element)?),
            Rule::EOI => {}
            _ => return Err(MalformedTree::at(&element, "top-level element")),
        }
    }

    Ok(document)
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Reads an `ident` or `quoted_ident` node.
pub(crate) fn name(pair: Pair<'_, Rule>) -> Result<String> {
    match pair.as_rule() {
        Rule::ident => Ok(pair.as_str().to_string()),
        Rule::quoted_ident => Ok(delimited_text(pair)?.to_string()),
        _ => Err(MalformedTree::at(&pair, "identifier")),
    }
}

/// Reads the single name inside a wrapper node such as `ref_name`.
pub(crate) fn inner_name(pair: Pair<'_, Rule>) -> Result<String> {
    name(Children::of(pair).expect("identifier")?)
}

/// Reads a `qualified_name` node into `(schema, name)`.
pub(crate) fn qualified_name(pair: Pair<'_, Rule>) -> Result<(Option<String>, String)> {
    let at = pair.as_span().start();
    let parts = Children::of(pair).map(name).collect::<Result<Vec<_>>>()?;
    match <[String; 2]>::try_from(parts) {
        Ok([schema, name]) => Ok((Some(schema), name)),
        Err(mut parts) if parts.len() == 1 => Ok((None, parts.remove(0))),
        Err(_) => Err(MalformedTree {
            offset: at,
            expected: "[schema.]name",
        }),
    }
}

/// Reads a parenthesized `column_list` node.
pub(crate) fn column_list(pair: Pair<'_, Rule>) -> Result<Vec<String>> {
    Children::of(pair).map(name).collect()
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Reads a `value` node.
pub(crate) fn value(pair: Pair<'_, Rule>) -> Result<Value> {
    let literal = Children::of(pair).expect("value")?;
    match literal.as_rule() {
        Rule::triple_string => Ok(Value::String(delimited_text(literal)?.to_string())),
        Rule::double_string | Rule::single_string => {
            Ok(Value::String(unescape(delimited_text(literal)?)))
        }
        Rule::number => literal
            .as_str()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| MalformedTree::at(&literal, "number")),
        Rule::boolean => Ok(Value::Boolean(literal.as_str().eq_ignore_ascii_case("true"))),
        Rule::ident => Ok(Value::Identifier(literal.as_str().to_string())),
        _ => Err(MalformedTree::at(&literal, "value")),
    }
}

/// Reads the body of an `expression` node, backticks stripped.
pub(crate) fn expression(pair: Pair<'_, Rule>) -> Result<String> {
    if pair.as_rule() != Rule::expression {
        return Err(MalformedTree::at(&pair, "backtick expression"));
    }
    Ok(delimited_text(pair)?.to_string())
}

/// Reads the text of a note setting or note block.
pub(crate) fn note(pair: Pair<'_, Rule>) -> Result<String> {
    let value_pair = Children::of(pair).expect_rule(Rule::value, "note text")?;
    Ok(value(value_pair)?.into_text())
}

/// Reads a `header_color` node: hex colors stay raw, anything else is a value.
pub(crate) fn header_color(pair: Pair<'_, Rule>) -> Result<Value> {
    let color = Children::of(pair).expect("color")?;
    match color.as_rule() {
        Rule::hex_color => Ok(Value::String(color.as_str().to_string())),
        _ => value(color),
    }
}

/// Text between the delimiters of a quoted node.
fn delimited_text<'i>(pair: Pair<'i, Rule>) -> Result<&'i str> {
    let at = pair.as_span().start();
    pair.into_inner()
        .next()
        .map(|text| text.as_str())
        .ok_or(MalformedTree {
            offset: at,
            expected: "quoted text",
        })
}

// ---------------------------------------------------------------------------
// Project, enums, groups
// ---------------------------------------------------------------------------

fn project(pair: Pair<'_, Rule>) -> Result<Project> {
    let mut children = Children::of(pair);
    let project_name = match children.peek_rule() {
        Some(Rule::ident | Rule::quoted_ident) => Some(name(children.expect("project name")?)?),
        _ => None,
    };
    let mut project = Project {
        name: project_name,
        properties: Default::default(),
    };

    for item in children {
        match item.as_rule() {
            Rule::note_block => {
                project
                    .properties
                    .insert("note".to_string(), Value::String(note(item)?));
            }
            Rule::project_property => {
                let mut parts = Children::of(item);
                let key = name(parts.expect("property name")?)?;
                let key = if key.eq_ignore_ascii_case("note") {
                    "note".to_string()
                } else {
                    key
                };
                let property = value(parts.expect_rule(Rule::value, "property value")?)?;
                project.properties.insert(key, property);
            }
            _ => return Err(MalformedTree::at(&item, "project property")),
        }
    }

    Ok(project)
}

fn enum_def(pair: Pair<'_, Rule>) -> Result<Enum> {
    let mut children = Children::of(pair);
    let (schema, name) = qualified_name(children.expect_rule(Rule::qualified_name, "enum name")?)?;
    let values = children.map(enum_value).collect::<Result<Vec<_>>>()?;
    Ok(Enum {
        name,
        schema,
        values,
    })
}

fn enum_value(pair: Pair<'_, Rule>) -> Result<EnumValue> {
    if pair.as_rule() != Rule::enum_value {
        return Err(MalformedTree::at(&pair, "enum value"));
    }
    let mut children = Children::of(pair);
    let name = name(children.expect("enum value name")?)?;
    let note = match children.next_if(Rule::enum_value_settings) {
        Some(settings) => Some(note(
            Children::of(settings).expect_rule(Rule::setting_note, "note setting")?,
        )?),
        None => None,
    };
    Ok(EnumValue { name, note })
}

fn group(pair: Pair<'_, Rule>) -> Result<Group> {
    let mut children = Children::of(pair);
    let name = name(children.expect("group name")?)?;
    let tables = children
        .map(|member| -> Result<QualifiedName> {
            let (schema, name) = qualified_name(member)?;
            Ok(QualifiedName::new(schema, name))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Group { name, tables })
}
