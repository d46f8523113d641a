//! Error types for es2sql.

use serde_json::Value;
use thiserror::Error;

/// The main error type for es2sql translations.
///
/// Both variants carry the offending piece of the input document so a
/// rejected query can be diagnosed without re-walking the source.
#[derive(Debug, Error)]
pub enum Es2SqlError {
    /// An object in the query document does not match any recognized node
    /// shape, or is missing a mandatory key for the shape it matched.
    #[error("structural error: {message}: {object}")]
    Structural { message: String, object: Value },

    /// A leaf value is not a string, an integer, or a list of those.
    #[error("unsupported value for field '{field}': {value}")]
    UnsupportedValue { field: String, value: Value },
}

impl Es2SqlError {
    /// Create a structural error pointing at the offending object.
    pub fn structural(message: impl Into<String>, object: &Value) -> Self {
        Self::Structural {
            message: message.into(),
            object: object.clone(),
        }
    }

    /// Create an unsupported-value error for a field's literal.
    pub fn unsupported(field: impl Into<String>, value: &Value) -> Self {
        Self::UnsupportedValue {
            field: field.into(),
            value: value.clone(),
        }
    }
}

/// Result type alias for es2sql operations.
pub type Es2SqlResult<T> = Result<T, Es2SqlError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_display() {
        let err = Es2SqlError::structural("no recognized query key", &json!({"match": {}}));
        assert_eq!(
            err.to_string(),
            r#"structural error: no recognized query key: {"match":{}}"#
        );
    }

    #[test]
    fn test_unsupported_display() {
        let err = Es2SqlError::unsupported("score", &json!(1.5));
        assert_eq!(err.to_string(), "unsupported value for field 'score': 1.5");
    }
}
