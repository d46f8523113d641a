//! SQL transpiler for the query expression tree.
//!
//! Renders a [`QueryNode`] tree into a SQL boolean expression (no `WHERE`
//! prefix, no trailing terminator), consulting the [`RuleSet`] operator
//! tables at the leaves. Rendering is deterministic: the same tree and
//! rules always produce byte-identical output.
//!
//! String literals are escaped by doubling embedded single quotes before
//! interpolation.

use crate::ast::{BoolOp, QueryNode, Scalar, TermValue};
use crate::rules::RuleSet;

/// Trait for converting expression nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string under the given rules.
    fn to_sql(&self, rules: &RuleSet) -> String;
}

impl ToSql for QueryNode {
    fn to_sql(&self, rules: &RuleSet) -> String {
        match self {
            QueryNode::Bool { op, children } => {
                let parts: Vec<String> = children.iter().map(|c| c.to_sql(rules)).collect();
                match op {
                    BoolOp::Filter | BoolOp::Must => format!("({})", parts.join(" AND ")),
                    BoolOp::Should => format!("({})", parts.join(" OR ")),
                    BoolOp::MustNot => format!("NOT ({})", parts.join(" AND ")),
                }
            }
            QueryNode::Term {
                field,
                column,
                value,
            } => term_sql(field, column, value, rules),
            QueryNode::Exists { field, column } => {
                if rules.null_to_empty(field) {
                    format!("(NOT {} = '')", column)
                } else {
                    format!("({} IS NOT NULL)", column)
                }
            }
            // The nested path is informational only; the sub-query gets one
            // extra level of parentheses.
            QueryNode::Nested { query, .. } => format!("({})", query.to_sql(rules)),
        }
    }
}

/// Render a term predicate. Branch order is ignore, then value shape, then
/// numeric, then eq2like, then eq2reg, then plain equality; the first match
/// wins.
fn term_sql(field: &str, column: &str, value: &TermValue, rules: &RuleSet) -> String {
    if rules.is_ignored(field) {
        return "(1=1)".to_string();
    }

    match value {
        TermValue::Many(values) => {
            if rules.in_to_like(field) {
                let alternatives: Vec<String> = values
                    .iter()
                    .map(|v| format!("({} LIKE {})", column, like_pattern(v)))
                    .collect();
                format!("({})", alternatives.join(" OR "))
            } else {
                let items: Vec<String> = values.iter().map(literal).collect();
                format!("({} IN ({}))", column, items.join(", "))
            }
        }
        TermValue::One(Scalar::Int(n)) => format!("(CAST({} AS UInt8) = {})", column, n),
        TermValue::One(Scalar::Str(s)) => {
            if rules.eq_to_like(field) {
                format!("({} LIKE '%{}%')", column, escape(s))
            } else if rules.eq_to_regexp(field) {
                format!("({} REGEXP '(?i).*{}.*')", column, escape(s))
            } else {
                format!("({} = '{}')", column, escape(s))
            }
        }
    }
}

/// A scalar as a SQL literal: quoted and escaped for strings, bare for
/// integers.
fn literal(value: &Scalar) -> String {
    match value {
        Scalar::Str(s) => format!("'{}'", escape(s)),
        Scalar::Int(n) => n.to_string(),
    }
}

/// A scalar as a quoted `%...%` LIKE pattern.
fn like_pattern(value: &Scalar) -> String {
    match value {
        Scalar::Str(s) => format!("'%{}%'", escape(s)),
        Scalar::Int(n) => format!("'%{}%'", n),
    }
}

/// Double embedded single quotes so a literal cannot break out of its
/// quoting.
fn escape(s: &str) -> String {
    s.replace('\'', "''")
}
