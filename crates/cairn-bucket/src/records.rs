//! Validated single-record I/O against the object store.
//!
//! Every write validates before touching storage and every read
//! validates after decoding, so a value that reaches or leaves the
//! bucket always satisfies its record type's schema. A stored object
//! that no longer decodes or validates is an integrity failure and
//! propagates as an error; it is never collapsed into "not found".

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use cairn_object::{ObjectStore, CONTENT_TYPE_JSON};
use cairn_schema::{SchemaError, SchemaMap};

use crate::error::{BucketError, BucketResult};

/// Metadata key carrying the record-type name on every stored object.
pub const METADATA_RECORD_TYPE: &str = "record-type";

/// Metadata key prefix for one partition value (`part:year` = `2023`).
pub const METADATA_PARTITION_PREFIX: &str = "part:";

/// Schema-checked record operations on physical keys.
#[derive(Clone)]
pub(crate) struct RecordOps {
    store: Arc<dyn ObjectStore>,
    schemas: Arc<SchemaMap>,
}

impl RecordOps {
    pub(crate) fn new(store: Arc<dyn ObjectStore>, schemas: Arc<SchemaMap>) -> Self {
        Self { store, schemas }
    }

    pub(crate) fn schemas(&self) -> &SchemaMap {
        &self.schemas
    }

    /// Validate `value` against `record_type`'s schema and overwrite the
    /// object at `physical_key`. Nothing is written when validation
    /// fails.
    pub(crate) async fn write(
        &self,
        record_type: &str,
        physical_key: &str,
        value: &Value,
        metadata: BTreeMap<String, String>,
    ) -> BucketResult<()> {
        let schema = self
            .schemas
            .get(record_type)
            .ok_or_else(|| BucketError::UnknownSchema(record_type.to_string()))?;
        let validated = schema.validate(value)?;
        let bytes =
            serde_json::to_vec(&validated).map_err(|e| SchemaError::Decode(e.to_string()))?;
        self.store
            .put(physical_key, bytes, CONTENT_TYPE_JSON, metadata)
            .await?;
        Ok(())
    }

    /// Read and re-validate the record at `physical_key`. A missing
    /// object is `Ok(None)`; a present object that fails to decode or
    /// validate is an error.
    pub(crate) async fn read(
        &self,
        record_type: &str,
        physical_key: &str,
    ) -> BucketResult<Option<Value>> {
        let schema = self
            .schemas
            .get(record_type)
            .ok_or_else(|| BucketError::UnknownSchema(record_type.to_string()))?;
        let Some(object) = self.store.get(physical_key).await? else {
            return Ok(None);
        };
        let raw: Value = serde_json::from_slice(&object.bytes)
            .map_err(|e| SchemaError::Decode(e.to_string()))?;
        Ok(Some(schema.validate(&raw)?))
    }

    /// Delete the object at `physical_key` if it exists.
    ///
    /// The existence check runs first so a delete of an absent record is
    /// a visible no-op (`false`) rather than a storage call. A "not
    /// found" raced away between the check and the delete also maps to
    /// `false`.
    pub(crate) async fn remove(&self, physical_key: &str) -> BucketResult<bool> {
        if !self.store.exists(physical_key).await? {
            return Ok(false);
        }
        Ok(self.store.delete(physical_key).await?)
    }
}
