use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field-level schema violation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the offending field, `$` for the root value.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors from schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The value does not satisfy the schema. Carries every violation
    /// found, not just the first.
    #[error("schema validation failed: {}", render(.violations))]
    Validation { violations: Vec<Violation> },

    /// The raw bytes could not be decoded as JSON at all. Raised for
    /// stored payloads that no longer parse; an integrity signal, never
    /// mapped to "not found".
    #[error("payload is not valid JSON: {0}")]
    Decode(String),
}

impl SchemaError {
    /// Convenience constructor for a single-violation failure.
    pub fn violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::Validation {
            violations: vec![Violation::new(path, message)],
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
