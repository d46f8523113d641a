//! # es2sql — ES bool-queries to SQL WHERE expressions
//!
//! es2sql translates the boolean-query subset of the Elasticsearch query
//! DSL into an equivalent SQL boolean expression, applying per-field
//! rewrite rules along the way.
//!
//! ## Quick Example
//!
//! ```rust
//! use es2sql::prelude::*;
//! use serde_json::json;
//!
//! let doc = json!({"bool": {"must": [
//!     {"term": {"status": {"value": "active"}}},
//!     {"exists": {"field": "email"}}
//! ]}});
//!
//! let sql = es2sql::translate(&doc, &RuleSet::new()).unwrap();
//! assert_eq!(sql, "((status = 'active') AND (email IS NOT NULL))");
//! ```
//!
//! ## Supported query shapes
//!
//! | Key      | Meaning                                          |
//! |----------|--------------------------------------------------|
//! | `bool`   | compound of `filter`/`must`/`must_not`/`should`  |
//! | `term`   | single-field equality or membership              |
//! | `terms`  | same as `term`                                   |
//! | `exists` | field is not null (or not empty, under a rule)   |
//! | `nested` | sub-query scoped to a document path              |
//!
//! Rewrite rules (field renames, value substitutions, operator swaps) are
//! configured per field through [`rules::RuleSet`]; see that module for the
//! full table.

pub mod ast;
pub mod error;
pub mod parser;
pub mod rules;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::parser::parse;
    pub use crate::rules::RuleSet;
    pub use crate::transpiler::ToSql;
}

use crate::transpiler::ToSql;

/// Translate a query document into a SQL boolean expression.
///
/// Builds the expression tree and renders it in one step. Use
/// [`parser::parse`] directly to inspect the tree before rendering.
///
/// # Example
///
/// ```
/// use es2sql::rules::RuleSet;
/// use serde_json::json;
///
/// let doc = json!({"term": {"status": {"value": "active"}}});
/// let sql = es2sql::translate(&doc, &RuleSet::new()).unwrap();
/// assert_eq!(sql, "(status = 'active')");
/// ```
pub fn translate(
    doc: &serde_json::Value,
    rules: &rules::RuleSet,
) -> Result<String, error::Es2SqlError> {
    let node = parser::parse(doc, rules)?;
    Ok(node.to_sql(rules))
}
