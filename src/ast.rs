//! The query expression tree.
//!
//! Every supported Elasticsearch query shape maps onto one variant of
//! [`QueryNode`]; classification happens once in the parser and the tree is
//! immutable afterwards.

/// Connective of a `bool` compound query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// `filter` — children joined with AND.
    Filter,
    /// `must` — children joined with AND.
    Must,
    /// `must_not` — children joined with AND, the whole group negated.
    MustNot,
    /// `should` — children joined with OR.
    Should,
}

impl BoolOp {
    /// The DSL key this connective was parsed from.
    pub fn key(&self) -> &'static str {
        match self {
            BoolOp::Filter => "filter",
            BoolOp::Must => "must",
            BoolOp::MustNot => "must_not",
            BoolOp::Should => "should",
        }
    }
}

/// A leaf literal. Only strings and integers are representable; anything
/// else is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Str(String),
    Int(i64),
}

/// The value shape of a term predicate: one scalar (`term` with a `value`
/// key) or an ordered list of scalars (`term`/`terms` with an array).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// A classified query node.
///
/// `Term` and `Exists` keep the original field name alongside the emitted
/// column name: rewrite rules are keyed by the field as it appears in the
/// query document, while `column` already reflects any `field_map` rename.
/// Term values are stored post-`value_map`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// A `bool` compound query with exactly one connective.
    Bool {
        op: BoolOp,
        children: Vec<QueryNode>,
    },
    /// A `term`/`terms` equality or membership predicate.
    Term {
        field: String,
        column: String,
        value: TermValue,
    },
    /// An `exists` predicate.
    Exists { field: String, column: String },
    /// A `nested` query wrapping a sub-query under a document path.
    /// The path is recorded but not emitted in SQL.
    Nested { path: String, query: Box<QueryNode> },
}
