use std::str::FromStr;

use dbml_core::{
    Constraint, ConstraintKind, ExcludeElement, Index, IndexColumn, IndexType, SortOrder,
};
use pest::iterators::Pair;

use super::{column_list, expression, name, value, Children, MalformedTree, Result};
use crate::grammar::Rule;

/// Reads an `indexes { ... }` block.
pub(super) fn indexes(pair: Pair<'_, Rule>) -> Result<Vec<Index>> {
    Children::of(pair).map(index).collect()
}

fn index(pair: Pair<'_, Rule>) -> Result<Index> {
    let mut children = Children::of(pair);
    let form = children.expect("index columns")?;
    let index = match form.as_rule() {
        Rule::composite_index => Index::composite(
            Children::of(form)
                .map(index_column)
                .collect::<Result<Vec<_>>>()?,
        ),
        Rule::single_index => Index::new(vec![index_column(
            Children::of(form).expect_rule(Rule::index_column, "index column")?,
        )?]),
        _ => return Err(MalformedTree::at(&form, "index columns")),
    };

    match children.next_if(Rule::index_settings) {
        Some(settings) => Children::of(settings).try_fold(index, overlay_index),
        None => Ok(index),
    }
}

fn index_column(pair: Pair<'_, Rule>) -> Result<IndexColumn> {
    let mut children = Children::of(pair);
    let mut column = IndexColumn::new(name(children.expect("column name")?)?);
    if let Some(order) = children.next_if(Rule::sort_order) {
        let direction = SortOrder::from_str(order.as_str())
            .map_err(|_| MalformedTree::at(&order, "'asc' or 'desc'"))?;
        column.direction = Some(direction);
    }
    Ok(column)
}

fn overlay_index(mut index: Index, setting: Pair<'_, Rule>) -> Result<Index> {
    match setting.as_rule() {
        Rule::index_type => {
            let kind = value(Children::of(setting).expect("index type")?)?;
            index.index_type = Some(IndexType::from(kind.into_text()));
        }
        Rule::index_name => {
            let index_name = value(Children::of(setting).expect("index name")?)?;
            index.name = Some(index_name.into_text());
        }
        Rule::index_where => {
            let predicate = Children::of(setting).expect("where predicate")?;
            index.where_clause = Some(match predicate.as_rule() {
                Rule::expression => expression(predicate)?,
                _ => value(predicate)?.into_text(),
            });
        }
        Rule::index_pk => index.primary_key = true,
        Rule::index_unique => index.unique = true,
        _ => return Err(MalformedTree::at(&setting, "index setting")),
    }
    Ok(index)
}

/// Reads a `constraints { ... }` block.
pub(super) fn constraints(pair: Pair<'_, Rule>) -> Result<Vec<Constraint>> {
    Children::of(pair).map(constraint).collect()
}

fn constraint(pair: Pair<'_, Rule>) -> Result<Constraint> {
    let mut children = Children::of(pair);
    let constraint_name = match children.next_if(Rule::constraint_name) {
        Some(named) => Some(super::inner_name(named)?),
        None => None,
    };

    let body = children.expect("constraint body")?;
    let kind = match body.as_rule() {
        Rule::check_constraint => ConstraintKind::Check {
            expression: expression(Children::of(body).expect("check expression")?)?,
        },
        Rule::unique_constraint => ConstraintKind::Unique {
            columns: column_list(Children::of(body).expect_rule(Rule::column_list, "column list")?)?,
        },
        Rule::primary_key_constraint => ConstraintKind::PrimaryKey {
            columns: column_list(Children::of(body).expect_rule(Rule::column_list, "column list")?)?,
        },
        Rule::exclude_constraint => {
            let mut parts = Children::of(body);
            let method = name(parts.expect("index method")?)?;
            let elements = parts.map(exclude_element).collect::<Result<Vec<_>>>()?;
            ConstraintKind::Exclude { method, elements }
        }
        _ => return Err(MalformedTree::at(&body, "constraint")),
    };

    let mut constraint = Constraint::new(kind);
    constraint.name = constraint_name;
    match children.next_if(Rule::constraint_settings) {
        Some(settings) => Children::of(settings).try_fold(constraint, overlay_constraint),
        None => Ok(constraint),
    }
}

fn exclude_element(pair: Pair<'_, Rule>) -> Result<ExcludeElement> {
    let mut children = Children::of(pair);
    let column = name(children.expect("column name")?)?;
    let operator = children
        .expect_rule(Rule::exclude_operator, "operator")?
        .as_str()
        .to_string();
    Ok(ExcludeElement { column, operator })
}

fn overlay_constraint(mut constraint: Constraint, setting: Pair<'_, Rule>) -> Result<Constraint> {
    match setting.as_rule() {
        Rule::deferrable => constraint.deferrable = true,
        Rule::not_deferrable => constraint.deferrable = false,
        Rule::initially_deferred => constraint.initially_deferred = true,
        Rule::initially_immediate => constraint.initially_deferred = false,
        _ => return Err(MalformedTree::at(&setting, "constraint setting")),
    }
    Ok(constraint)
}
