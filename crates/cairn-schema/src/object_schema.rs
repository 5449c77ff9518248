//! Structural object schema with field-level diagnostics.
//!
//! [`ObjectSchema`] validates that a value is a JSON object whose fields
//! have the declared kinds. Violations are collected across the whole
//! object before failing, so a caller sees every problem at once.

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult, Violation};
use crate::schema::RecordSchema;

/// JSON kind a field must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// Any JSON value, including null.
    Any,
}

impl FieldKind {
    fn admits(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::Any => true,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Any => "any",
        }
    }
}

#[derive(Clone, Debug)]
struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
}

/// Structural schema over a JSON object.
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
    deny_unknown: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Declare an optional field.
    pub fn optional_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    /// Reject fields the schema does not declare.
    pub fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }
}

impl RecordSchema for ObjectSchema {
    fn validate(&self, raw: &Value) -> SchemaResult<Value> {
        let Some(object) = raw.as_object() else {
            return Err(SchemaError::violation("$", "value must be a JSON object"));
        };

        let mut violations = Vec::new();
        for spec in &self.fields {
            let path = format!("$.{}", spec.name);
            match object.get(&spec.name) {
                Some(value) => {
                    if !spec.kind.admits(value) {
                        violations.push(Violation::new(
                            path,
                            format!("expected {}, found {}", spec.kind.name(), kind_of(value)),
                        ));
                    }
                }
                None if spec.required => {
                    violations.push(Violation::new(path, "required field is missing"));
                }
                None => {}
            }
        }

        if self.deny_unknown {
            for name in object.keys() {
                if !self.fields.iter().any(|spec| &spec.name == name) {
                    violations.push(Violation::new(
                        format!("$.{name}"),
                        "field is not declared by the schema",
                    ));
                }
            }
        }

        if violations.is_empty() {
            Ok(raw.clone())
        } else {
            Err(SchemaError::Validation { violations })
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field("name", FieldKind::String)
            .field("age", FieldKind::Number)
            .optional_field("email", FieldKind::String)
    }

    #[test]
    fn accepts_matching_object() {
        let value = json!({"name": "ada", "age": 36});
        assert_eq!(user_schema().validate(&value).unwrap(), value);
    }

    #[test]
    fn optional_field_may_be_absent_or_present() {
        assert!(user_schema()
            .validate(&json!({"name": "ada", "age": 36, "email": "ada@example.com"}))
            .is_ok());
        assert!(user_schema()
            .validate(&json!({"name": "ada", "age": 36}))
            .is_ok());
    }

    #[test]
    fn rejects_non_object() {
        let err = user_schema().validate(&json!("just a string")).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = user_schema().validate(&json!({"name": "ada"})).unwrap_err();
        let SchemaError::Validation { violations } = &err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.age");
    }

    #[test]
    fn rejects_wrong_kind() {
        let err = user_schema()
            .validate(&json!({"name": "ada", "age": "old"}))
            .unwrap_err();
        assert!(err.to_string().contains("expected number, found string"));
    }

    #[test]
    fn collects_all_violations() {
        let err = user_schema()
            .validate(&json!({"age": true, "email": 7}))
            .unwrap_err();
        let SchemaError::Validation { violations } = err else {
            panic!("expected validation error");
        };
        // missing name, wrong-kind age, wrong-kind email
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn deny_unknown_rejects_extra_fields() {
        let schema = user_schema().deny_unknown();
        let err = schema
            .validate(&json!({"name": "ada", "age": 36, "admin": true}))
            .unwrap_err();
        assert!(err.to_string().contains("$.admin"));
    }

    #[test]
    fn unknown_fields_allowed_by_default() {
        assert!(user_schema()
            .validate(&json!({"name": "ada", "age": 36, "admin": true}))
            .is_ok());
    }
}
