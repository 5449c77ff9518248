use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};

/// The validation capability: check a raw decoded value against a
/// contract and return the typed (possibly coerced) value.
///
/// Implementations must be deterministic and side-effect free; the same
/// schema is applied on both write and read.
pub trait RecordSchema: Send + Sync {
    /// Validate `raw`, returning the value to store or serve.
    fn validate(&self, raw: &Value) -> SchemaResult<Value>;
}

/// Schema backed by a serde-deserializable Rust type.
///
/// A value is valid iff it deserializes into `T`; the stored value is
/// `T` re-serialized, so serde's coercion and default rules apply.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordSchema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize,
{
    fn validate(&self, raw: &Value) -> SchemaResult<Value> {
        let typed: T = serde_json::from_value(raw.clone())
            .map_err(|e| SchemaError::violation("$", e.to_string()))?;
        serde_json::to_value(typed).map_err(|e| SchemaError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn typed_schema_accepts_matching_value() {
        let schema = TypedSchema::<User>::new();
        let value = json!({"name": "ada", "age": 36});
        assert_eq!(schema.validate(&value).unwrap(), value);
    }

    #[test]
    fn typed_schema_rejects_wrong_shape() {
        let schema = TypedSchema::<User>::new();
        let err = schema.validate(&json!({"name": "ada"})).unwrap_err();
        assert!(matches!(err, SchemaError::Validation { .. }));
    }

    #[test]
    fn typed_schema_rejects_wrong_type() {
        let schema = TypedSchema::<User>::new();
        let err = schema
            .validate(&json!({"name": "ada", "age": "old"}))
            .unwrap_err();
        assert!(err.to_string().contains("$"));
    }
}
