//! Query document parser.
//!
//! Classifies an untyped JSON query document into a [`QueryNode`] tree.
//! Classification is a closed dispatch over a fixed key set:
//!
//! ```text
//! {"bool":   {...}}  → QueryNode::Bool
//! {"term":   {...}}  → QueryNode::Term
//! {"terms":  {...}}  → QueryNode::Term   (same value shapes)
//! {"exists": {...}}  → QueryNode::Exists
//! {"nested": {...}}  → QueryNode::Nested
//! ```
//!
//! Anything else fails fast with a structural error carrying the offending
//! object; no partial tree is ever returned. Field renames and value
//! substitutions from the [`RuleSet`] are resolved here, at build time, so
//! the transpiler only has to consult the operator tables.

use serde_json::{Map, Value};

use crate::ast::{BoolOp, QueryNode, Scalar, TermValue};
use crate::error::{Es2SqlError, Es2SqlResult};
use crate::rules::RuleSet;

/// Parse a query document into an expression tree.
pub fn parse(doc: &Value, rules: &RuleSet) -> Es2SqlResult<QueryNode> {
    let obj = as_object(doc, "query node is not an object")?;

    if let Some(payload) = obj.get("bool") {
        parse_bool(payload, rules)
    } else if let Some(payload) = obj.get("term").or_else(|| obj.get("terms")) {
        parse_term(payload, rules)
    } else if let Some(payload) = obj.get("exists") {
        parse_exists(payload, rules)
    } else if let Some(payload) = obj.get("nested") {
        parse_nested(payload, rules)
    } else {
        Err(Es2SqlError::structural(
            "no recognized query key (expected one of bool/term/terms/exists/nested)",
            doc,
        ))
    }
}

/// A `bool` payload holds exactly one connective key; its value is an
/// ordered list of sub-queries.
fn parse_bool(payload: &Value, rules: &RuleSet) -> Es2SqlResult<QueryNode> {
    let obj = as_object(payload, "bool payload is not an object")?;

    for op in [BoolOp::Filter, BoolOp::Must, BoolOp::MustNot, BoolOp::Should] {
        let Some(items) = obj.get(op.key()) else {
            continue;
        };
        let items = items.as_array().ok_or_else(|| {
            Es2SqlError::structural(format!("bool '{}' is not a list", op.key()), payload)
        })?;
        let children = items
            .iter()
            .map(|item| parse(item, rules))
            .collect::<Es2SqlResult<Vec<_>>>()?;
        return Ok(QueryNode::Bool { op, children });
    }

    Err(Es2SqlError::structural(
        "bool payload has no connective (expected one of filter/must/must_not/should)",
        payload,
    ))
}

/// A `term`/`terms` payload is a single-entry map from field name to either
/// a list of scalars or a `{"value": scalar}` wrapper.
fn parse_term(payload: &Value, rules: &RuleSet) -> Es2SqlResult<QueryNode> {
    let obj = as_object(payload, "term payload is not an object")?;
    let (field, raw) = obj
        .iter()
        .next()
        .ok_or_else(|| Es2SqlError::structural("term payload is empty", payload))?;

    let value = if let Some(items) = raw.as_array() {
        let scalars = items
            .iter()
            .map(|item| parse_scalar(field, item, rules))
            .collect::<Es2SqlResult<Vec<_>>>()?;
        TermValue::Many(scalars)
    } else {
        let inner = raw
            .get("value")
            .ok_or_else(|| Es2SqlError::structural("term payload is missing 'value'", raw))?;
        TermValue::One(parse_scalar(field, inner, rules)?)
    };

    Ok(QueryNode::Term {
        field: field.clone(),
        column: rules.column_for(field),
        value,
    })
}

/// An `exists` payload names its field under a `field` key.
fn parse_exists(payload: &Value, rules: &RuleSet) -> Es2SqlResult<QueryNode> {
    let obj = as_object(payload, "exists payload is not an object")?;
    let field = obj
        .get("field")
        .and_then(Value::as_str)
        .ok_or_else(|| Es2SqlError::structural("exists payload is missing 'field'", payload))?;

    Ok(QueryNode::Exists {
        field: field.to_string(),
        column: rules.column_for(field),
    })
}

/// A `nested` payload carries a `path` string and a `query` sub-document,
/// classified recursively with the same rules.
fn parse_nested(payload: &Value, rules: &RuleSet) -> Es2SqlResult<QueryNode> {
    let obj = as_object(payload, "nested payload is not an object")?;
    let path = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| Es2SqlError::structural("nested payload is missing 'path'", payload))?;
    let query = obj
        .get("query")
        .ok_or_else(|| Es2SqlError::structural("nested payload is missing 'query'", payload))?;

    Ok(QueryNode::Nested {
        path: path.to_string(),
        query: Box::new(parse(query, rules)?),
    })
}

/// Accept a string or integer literal, applying any `value_map` rewrite.
/// Floats, booleans, nulls, and nested containers are not representable.
fn parse_scalar(field: &str, value: &Value, rules: &RuleSet) -> Es2SqlResult<Scalar> {
    match value {
        Value::String(s) => Ok(Scalar::Str(rules.rewrite_value(field, s))),
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .ok_or_else(|| Es2SqlError::unsupported(field, value)),
        _ => Err(Es2SqlError::unsupported(field, value)),
    }
}

fn as_object<'a>(value: &'a Value, message: &str) -> Es2SqlResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Es2SqlError::structural(message, value))
}
