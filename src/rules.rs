//! Per-field rewrite rules applied during SQL emission.
//!
//! A [`RuleSet`] is built once by the caller (programmatically or from a
//! JSON file) and consulted read-only by the parser and the transpiler. All
//! lookups are keyed by the field name as it appears in the query document,
//! never by a renamed column.

use std::collections::HashMap;

use serde::Deserialize;

/// The seven independent rewrite tables.
///
/// Every table is optional; a field absent from a table gets the default
/// behavior for that concern. A shared `RuleSet` is safe to use from many
/// translations at once since nothing here is mutated after construction.
///
/// | Table       | Effect on the field's predicate                      |
/// |-------------|------------------------------------------------------|
/// | `ignore`    | replaced with the tautology `(1=1)`                  |
/// | `field_map` | emitted column renamed                               |
/// | `value_map` | each literal replaced via a value→value table        |
/// | `eq2like`   | string equality becomes `LIKE '%v%'`                 |
/// | `eq2reg`    | string equality becomes `REGEXP '(?i).*v.*'`         |
/// | `in2like`   | membership becomes an OR of `LIKE '%v%'` terms       |
/// | `nn2empty`  | existence becomes `NOT col = ''`                     |
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    ignore: HashMap<String, bool>,
    field_map: HashMap<String, String>,
    value_map: HashMap<String, HashMap<String, String>>,
    eq2like: HashMap<String, bool>,
    eq2reg: HashMap<String, bool>,
    in2like: HashMap<String, bool>,
    nn2empty: HashMap<String, bool>,
}

impl RuleSet {
    /// An empty rule set: every field renders with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace this field's predicates with `(1=1)`.
    pub fn ignore(mut self, field: impl Into<String>) -> Self {
        self.ignore.insert(field.into(), true);
        self
    }

    /// Emit `column` wherever `field` would appear in SQL.
    pub fn rename_field(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.field_map.insert(field.into(), column.into());
        self
    }

    /// Replace occurrences of `from` with `to` in this field's literals.
    pub fn rename_value(
        mut self,
        field: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.value_map
            .entry(field.into())
            .or_default()
            .insert(from.into(), to.into());
        self
    }

    /// Render single-value string equality as a substring match.
    pub fn eq_as_like(mut self, field: impl Into<String>) -> Self {
        self.eq2like.insert(field.into(), true);
        self
    }

    /// Render single-value string equality as a case-insensitive regex match.
    pub fn eq_as_regexp(mut self, field: impl Into<String>) -> Self {
        self.eq2reg.insert(field.into(), true);
        self
    }

    /// Render membership as a disjunction of substring matches.
    pub fn in_as_like(mut self, field: impl Into<String>) -> Self {
        self.in2like.insert(field.into(), true);
        self
    }

    /// Render existence as `NOT col = ''` instead of `IS NOT NULL`.
    pub fn exists_as_not_empty(mut self, field: impl Into<String>) -> Self {
        self.nn2empty.insert(field.into(), true);
        self
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        self.flag(&self.ignore, field)
    }

    /// The column name to emit for `field`, after any `field_map` rename.
    pub fn column_for(&self, field: &str) -> String {
        self.field_map
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.to_string())
    }

    /// The literal to emit for `value` of `field`, after any `value_map`
    /// substitution.
    pub fn rewrite_value(&self, field: &str, value: &str) -> String {
        self.value_map
            .get(field)
            .and_then(|m| m.get(value))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }

    pub fn eq_to_like(&self, field: &str) -> bool {
        self.flag(&self.eq2like, field)
    }

    pub fn eq_to_regexp(&self, field: &str) -> bool {
        self.flag(&self.eq2reg, field)
    }

    pub fn in_to_like(&self, field: &str) -> bool {
        self.flag(&self.in2like, field)
    }

    pub fn null_to_empty(&self, field: &str) -> bool {
        self.flag(&self.nn2empty, field)
    }

    fn flag(&self, table: &HashMap<String, bool>, field: &str) -> bool {
        table.get(field).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rules_are_all_default() {
        let rules = RuleSet::new();
        assert!(!rules.is_ignored("status"));
        assert_eq!(rules.column_for("status"), "status");
        assert_eq!(rules.rewrite_value("status", "active"), "active");
        assert!(!rules.eq_to_like("status"));
        assert!(!rules.eq_to_regexp("status"));
        assert!(!rules.in_to_like("status"));
        assert!(!rules.null_to_empty("status"));
    }

    #[test]
    fn test_builder_tables_are_independent() {
        let rules = RuleSet::new()
            .ignore("a")
            .rename_field("b", "b_col")
            .rename_value("c", "old", "new")
            .eq_as_like("d")
            .eq_as_regexp("e")
            .in_as_like("f")
            .exists_as_not_empty("g");

        assert!(rules.is_ignored("a"));
        assert!(!rules.is_ignored("b"));
        assert_eq!(rules.column_for("b"), "b_col");
        assert_eq!(rules.rewrite_value("c", "old"), "new");
        assert_eq!(rules.rewrite_value("c", "other"), "other");
        assert!(rules.eq_to_like("d"));
        assert!(rules.eq_to_regexp("e"));
        assert!(rules.in_to_like("f"));
        assert!(rules.null_to_empty("g"));
    }

    #[test]
    fn test_deserialize_partial_tables() {
        let rules: RuleSet = serde_json::from_str(
            r#"{
                "ignore": {"debug_flag": true},
                "field_map": {"user": "user_name"},
                "value_map": {"status": {"on": "active"}},
                "in2like": {"city": true}
            }"#,
        )
        .unwrap();

        assert!(rules.is_ignored("debug_flag"));
        assert_eq!(rules.column_for("user"), "user_name");
        assert_eq!(rules.rewrite_value("status", "on"), "active");
        assert!(rules.in_to_like("city"));
        // Tables absent from the file stay empty.
        assert!(!rules.eq_to_like("user"));
        assert!(!rules.null_to_empty("user"));
    }

    #[test]
    fn test_deserialize_false_flag_is_default() {
        let rules: RuleSet = serde_json::from_str(r#"{"eq2like": {"name": false}}"#).unwrap();
        assert!(!rules.eq_to_like("name"));
    }
}
