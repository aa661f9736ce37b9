use std::str::FromStr;

use dbml_core::{
    Column, DefaultValue, GeneratedColumn, IdentityGeneration, InlineReference, RelationKind,
};
use pest::iterators::Pair;

use super::{expression, name, note, reference, value, Children, MalformedTree, Result};
use crate::grammar::Rule;

pub(super) fn column(pair: Pair<'_, Rule>) -> Result<Column> {
    let mut children = Children::of(pair);
    let column_name = name(children.expect("column name")?)?;
    let column_type = column_type(children.expect_rule(Rule::column_type, "column type")?)?;

    let column = Column::new(column_name, column_type);
    match children.next_if(Rule::column_settings) {
        Some(settings) => Children::of(settings).try_fold(column, overlay),
        None => Ok(column),
    }
}

/// Composes the type string: dotted name parts, then `[]` or `(params)`.
fn column_type(pair: Pair<'_, Rule>) -> Result<String> {
    let mut composed = String::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::type_name => {
                let names = part.into_inner().map(name).collect::<Result<Vec<_>>>()?;
                composed.push_str(&names.join("."));
            }
            Rule::array_suffix => composed.push_str("[]"),
            Rule::type_params => {
                let params = part
                    .into_inner()
                    .next()
                    .map(|text| text.as_str())
                    .unwrap_or_default();
                composed.push('(');
                composed.push_str(params);
                composed.push(')');
            }
            _ => return Err(MalformedTree::at(&part, "column type")),
        }
    }
    Ok(composed)
}

/// Applies one written setting on top of the settings seen so far.
fn overlay(mut column: Column, setting: Pair<'_, Rule>) -> Result<Column> {
    match setting.as_rule() {
        Rule::setting_primary_key | Rule::setting_pk => column.primary_key = true,
        Rule::setting_not_null => column.not_null = Some(true),
        Rule::setting_null => column.not_null = Some(false),
        Rule::setting_unique => column.unique = true,
        Rule::setting_increment => column.increment = true,
        Rule::setting_identity_always => column.identity = Some(IdentityGeneration::Always),
        Rule::setting_identity_by_default => {
            column.identity = Some(IdentityGeneration::ByDefault);
        }
        Rule::setting_generated => {
            let mut parts = Children::of(setting);
            let generated = expression(parts.expect("generation expression")?)?;
            column.generated = Some(GeneratedColumn {
                expression: generated,
                stored: parts.next_if(Rule::stored).is_some(),
            });
        }
        Rule::setting_check => {
            column.check = Some(expression(Children::of(setting).expect("check expression")?)?);
        }
        Rule::setting_default => {
            let literal = Children::of(setting).expect("default value")?;
            column.default = Some(match literal.as_rule() {
                Rule::expression => DefaultValue::Expression(expression(literal)?),
                _ => DefaultValue::Literal(value(literal)?),
            });
        }
        Rule::setting_note => column.note = Some(note(setting)?),
        Rule::setting_ref => {
            let mut parts = Children::of(setting);
            let relation = parts.expect_rule(Rule::relation, "relationship")?;
            let relation = RelationKind::from_str(relation.as_str())
                .map_err(|_| MalformedTree::at(&relation, "relationship"))?;
            let endpoint = reference::endpoint(parts.expect_rule(Rule::endpoint, "endpoint")?)?;
            column.reference = Some(InlineReference { relation, endpoint });
        }
        _ => return Err(MalformedTree::at(&setting, "column setting")),
    }
    Ok(column)
}
