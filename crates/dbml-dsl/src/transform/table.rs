use dbml_core::{Column, Constraint, Index, Table, TableElement, TablePartial, Value};
use pest::iterators::Pair;

use super::{
    column, header_color, index, inner_name, name, note, qualified_name, Children, MalformedTree,
    Result,
};
use crate::grammar::Rule;

/// Scalar settings shared by the `[...]` header and the body items.
#[derive(Debug, Default)]
struct TableSettings {
    note: Option<String>,
    header_color: Option<Value>,
}

impl TableSettings {
    fn overlay(mut self, setting: Pair<'_, Rule>) -> Result<Self> {
        match setting.as_rule() {
            Rule::note_setting | Rule::note_block => self.note = Some(note(setting)?),
            Rule::header_color => self.header_color = Some(header_color(setting)?),
            _ => return Err(MalformedTree::at(&setting, "table setting")),
        }
        Ok(self)
    }
}

/// Everything a table or table partial body can carry.
#[derive(Debug, Default)]
struct Body {
    settings: TableSettings,
    elements: Vec<TableElement>,
    indexes: Vec<Index>,
    constraints: Vec<Constraint>,
}

impl Body {
    /// Reads the optional header settings and then every body item in order.
    fn read(children: &mut Children<'_>) -> Result<Self> {
        let mut body = Body::default();
        if let Some(settings) = children.next_if(Rule::table_settings) {
            body.settings = Children::of(settings).try_fold(body.settings, TableSettings::overlay)?;
        }

        for item in children {
            match item.as_rule() {
                Rule::column => body.elements.push(TableElement::Column(column::column(item)?)),
                Rule::partial_ref => body.elements.push(TableElement::PartialReference {
                    name: inner_name(item)?,
                }),
                Rule::note_setting | Rule::note_block | Rule::header_color => {
                    body.settings = body.settings.overlay(item)?;
                }
                Rule::indexes_block => body.indexes = index::indexes(item)?,
                Rule::constraints_block => body.constraints = index::constraints(item)?,
                _ => return Err(MalformedTree::at(&item, "table item")),
            }
        }

        Ok(body)
    }
}

pub(super) fn table(pair: Pair<'_, Rule>) -> Result<Table> {
    let mut children = Children::of(pair);
    let (schema, table_name) =
        qualified_name(children.expect_rule(Rule::qualified_name, "table name")?)?;

    let mut table = Table::new(table_name);
    table.schema = schema;
    if let Some(alias) = children.next_if(Rule::table_alias) {
        table.alias = Some(inner_name(alias)?);
    }

    let body = Body::read(&mut children)?;
    table.note = body.settings.note;
    table.header_color = body.settings.header_color;
    table.indexes = body.indexes;
    table.constraints = body.constraints;
    for element in body.elements {
        match element {
            TableElement::Column(column) => table.push_column(column),
            TableElement::PartialReference { name } => table.push_partial_reference(name),
        }
    }

    Ok(table)
}

pub(super) fn table_partial(pair: Pair<'_, Rule>) -> Result<TablePartial> {
    let mut children = Children::of(pair);
    let mut partial = TablePartial::new(name(children.expect("table partial name")?)?);

    let body = Body::read(&mut children)?;
    partial.note = body.settings.note;
    partial.header_color = body.settings.header_color;
    partial.indexes = body.indexes;
    partial.constraints = body.constraints;
    partial.columns = body
        .elements
        .into_iter()
        .filter_map(|element| match element {
            TableElement::Column(column) => Some(column),
            TableElement::PartialReference { .. } => None,
        })
        .collect::<Vec<Column>>();

    Ok(partial)
}
