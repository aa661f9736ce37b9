use std::str::FromStr;

use dbml_core::{Endpoint, EndpointColumns, ReferentialAction, Reference, RelationKind};
use pest::iterators::Pair;

use super::{column_list, inner_name, name, Children, MalformedTree, Result};
use crate::grammar::Rule;

pub(super) fn reference(pair: Pair<'_, Rule>) -> Result<Reference> {
    let mut children = Children::of(pair);
    let reference_name = match children.next_if(Rule::ref_name) {
        Some(named) => Some(inner_name(named)?),
        None => None,
    };

    let from = endpoint(children.expect_rule(Rule::endpoint, "endpoint")?)?;
    let relation = children.expect_rule(Rule::relation, "relationship")?;
    let relation_kind = RelationKind::from_str(relation.as_str())
        .map_err(|_| MalformedTree::at(&relation, "relationship"))?;
    let to = endpoint(children.expect_rule(Rule::endpoint, "endpoint")?)?;

    let reference = Reference {
        name: reference_name,
        from,
        to,
        relation: relation_kind,
        on_delete: None,
        on_update: None,
    };
    match children.next_if(Rule::ref_settings) {
        Some(settings) => Children::of(settings).try_fold(reference, overlay),
        None => Ok(reference),
    }
}

/// Reads `[schema.]table.column` or `[schema.]table.(col, ...)`.
pub(super) fn endpoint(pair: Pair<'_, Rule>) -> Result<Endpoint> {
    let at = pair.as_span().start();
    let malformed = MalformedTree {
        offset: at,
        expected: "[schema.]table.column",
    };
    let parts: Vec<Pair<'_, Rule>> = Children::of(pair).collect();
    let Some((last, qualifiers)) = parts.split_last() else {
        return Err(malformed);
    };

    let columns = match last.as_rule() {
        Rule::column_list => EndpointColumns::Columns(column_list(last.clone())?),
        _ => EndpointColumns::Column(name(last.clone())?),
    };
    let (schema, table) = match qualifiers {
        [table] => (None, name(table.clone())?),
        [schema, table] => (Some(name(schema.clone())?), name(table.clone())?),
        _ => return Err(malformed),
    };

    Ok(Endpoint {
        schema,
        table,
        columns,
    })
}

fn overlay(mut reference: Reference, setting: Pair<'_, Rule>) -> Result<Reference> {
    let rule = setting.as_rule();
    let action = referential_action(Children::of(setting.clone()).expect("referential action")?)?;
    match rule {
        Rule::on_delete => reference.on_delete = Some(action),
        Rule::on_update => reference.on_update = Some(action),
        _ => return Err(MalformedTree::at(&setting, "'delete' or 'update'")),
    }
    Ok(reference)
}

fn referential_action(pair: Pair<'_, Rule>) -> Result<ReferentialAction> {
    match pair.as_rule() {
        Rule::action_cascade => Ok(ReferentialAction::Cascade),
        Rule::action_restrict => Ok(ReferentialAction::Restrict),
        Rule::action_set_null => Ok(ReferentialAction::SetNull),
        Rule::action_set_default => Ok(ReferentialAction::SetDefault),
        Rule::action_no_action => Ok(ReferentialAction::NoAction),
        _ => Err(MalformedTree::at(&pair, "referential action")),
    }
}
