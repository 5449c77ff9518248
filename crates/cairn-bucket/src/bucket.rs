//! The bucket facade: validated records over an object store.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use cairn_lock::{CleanupReport, LockStore, MutexConfig, WriteMutex};
use cairn_object::ObjectStore;
use cairn_path::{PartitionSchema, PathCodec};
use cairn_schema::SchemaMap;

use crate::error::{BucketError, BucketResult};
use crate::records::{RecordOps, METADATA_RECORD_TYPE};

/// Listing entry for one present record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordListing {
    /// The declared record type this object stores.
    pub record_type: String,
    /// When the record was last written.
    pub last_modified: DateTime<Utc>,
    /// Serialized size in bytes.
    pub size: u64,
}

/// A schema-validated, optionally partitioned key-value layer over an
/// object store.
///
/// A bucket is constructed with an immutable set of record types (each
/// with a schema), an optional key prefix, an optional partition scheme,
/// and an optional write mutex. Values are checked against their record
/// type's schema on both write and read. All state lives in the object
/// store; the bucket caches nothing and can be cloned freely across
/// tasks.
#[derive(Clone)]
pub struct Bucket {
    store: Arc<dyn ObjectStore>,
    records: RecordOps,
    codec: PathCodec,
    partitions: Option<Arc<PartitionSchema>>,
    mutex: Option<WriteMutex>,
}

impl Bucket {
    /// Start configuring a bucket.
    pub fn builder() -> BucketBuilder {
        BucketBuilder::default()
    }

    /// Store a record, overwriting any previous value.
    ///
    /// The value must satisfy the record type's schema; nothing is
    /// written otherwise.
    pub async fn set(&self, record_type: &str, value: Value) -> BucketResult<()> {
        let key = self.codec.to_physical(record_type);
        let mut metadata = BTreeMap::new();
        metadata.insert(METADATA_RECORD_TYPE.to_string(), record_type.to_string());
        self.guarded(&key, self.records.write(record_type, &key, &value, metadata))
            .await
    }

    /// Read a record. Returns `None` if it has never been written (or
    /// was deleted); errors if the stored value no longer matches its
    /// schema.
    pub async fn get(&self, record_type: &str) -> BucketResult<Option<Value>> {
        let key = self.codec.to_physical(record_type);
        self.records.read(record_type, &key).await
    }

    /// Delete a record. Returns `false` if it was not present.
    pub async fn delete(&self, record_type: &str) -> BucketResult<bool> {
        let key = self.codec.to_physical(record_type);
        self.guarded(&key, self.records.remove(&key)).await
    }

    /// Whether a record is present.
    pub async fn exists(&self, record_type: &str) -> BucketResult<bool> {
        if !self.records.schemas().contains(record_type) {
            return Err(BucketError::UnknownSchema(record_type.to_string()));
        }
        let key = self.codec.to_physical(record_type);
        Ok(self.store.exists(&key).await?)
    }

    /// List all present records of declared types.
    ///
    /// Objects under the bucket's prefix that do not correspond to a
    /// declared record type (partitioned records included) are silently
    /// excluded.
    pub async fn list(&self) -> BucketResult<Vec<RecordListing>> {
        let listed = self.store.list(&self.codec.root()).await?;
        Ok(listed
            .into_iter()
            .filter_map(|meta| {
                let record_type = self.codec.to_logical(&meta.key);
                self.records
                    .schemas()
                    .contains(record_type)
                    .then(|| RecordListing {
                        record_type: record_type.to_string(),
                        last_modified: meta.last_modified,
                        size: meta.size,
                    })
            })
            .collect())
    }

    /// Read every present record, keyed by record type.
    pub async fn get_all(&self) -> BucketResult<BTreeMap<String, Value>> {
        let mut values = BTreeMap::new();
        let record_types: Vec<String> = self
            .records
            .schemas()
            .record_types()
            .map(str::to_string)
            .collect();
        for record_type in record_types {
            if let Some(value) = self.get(&record_type).await? {
                values.insert(record_type, value);
            }
        }
        Ok(values)
    }

    /// Sweep stale lock records, per [`WriteMutex::cleanup_stale_locks`].
    ///
    /// A bucket without a write mutex has no lock collaborator; the
    /// report is empty.
    pub async fn cleanup_stale_locks(
        &self,
        older_than_ms: i64,
        dry_run: bool,
    ) -> BucketResult<CleanupReport> {
        match &self.mutex {
            Some(mutex) => Ok(mutex.cleanup_stale_locks(older_than_ms, dry_run).await?),
            None => Ok(CleanupReport::default()),
        }
    }

    /// Run a mutating operation under the write mutex, when one is
    /// configured. `op` is a not-yet-polled future; it makes no progress
    /// until the lock is held, and the lock is released on both success
    /// and failure of the operation.
    pub(crate) async fn guarded<T, Fut>(&self, resource: &str, op: Fut) -> BucketResult<T>
    where
        Fut: Future<Output = BucketResult<T>>,
    {
        let Some(mutex) = &self.mutex else {
            return op.await;
        };
        mutex.acquire(resource).await?;
        let outcome = op.await;
        if let Err(e) = mutex.release(resource).await {
            warn!(resource, error = %e, "failed to release write lock");
        }
        outcome
    }

    pub(crate) fn records(&self) -> &RecordOps {
        &self.records
    }

    pub(crate) fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub(crate) fn codec(&self) -> &PathCodec {
        &self.codec
    }

    /// The partition schema, or [`BucketError::PartitionNotConfigured`].
    pub(crate) fn partition_schema(&self) -> BucketResult<&PartitionSchema> {
        self.partitions
            .as_deref()
            .ok_or(BucketError::PartitionNotConfigured)
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("prefix", &self.codec.prefix())
            .field("record_types", &self.records.schemas().len())
            .field("partitioned", &self.partitions.is_some())
            .field("mutex", &self.mutex.is_some())
            .finish()
    }
}

/// Builder for [`Bucket`].
#[derive(Default)]
pub struct BucketBuilder {
    store: Option<Arc<dyn ObjectStore>>,
    schemas: Option<SchemaMap>,
    prefix: Option<String>,
    partitions: Option<PartitionSchema>,
    mutex: Option<(Arc<dyn LockStore>, MutexConfig)>,
}

impl BucketBuilder {
    /// The object store holding this bucket's records. Required.
    pub fn store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The record types this bucket serves. Required.
    pub fn schemas(mut self, schemas: SchemaMap) -> Self {
        self.schemas = Some(schemas);
        self
    }

    /// Key prefix under which all of this bucket's objects live.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Enable partitioned operations with the given partition scheme.
    pub fn partitions(mut self, schema: PartitionSchema) -> Self {
        self.partitions = Some(schema);
        self
    }

    /// Enable the write mutex: mutating operations will serialize
    /// through lock records in `lock_store`. Without this call the
    /// bucket never touches a lock collaborator.
    pub fn write_mutex(mut self, lock_store: Arc<dyn LockStore>, config: MutexConfig) -> Self {
        self.mutex = Some((lock_store, config));
        self
    }

    pub fn build(self) -> BucketResult<Bucket> {
        let store = self
            .store
            .ok_or_else(|| BucketError::Config("an object store is required".into()))?;
        let schemas = Arc::new(
            self.schemas
                .ok_or_else(|| BucketError::Config("a schema map is required".into()))?,
        );
        Ok(Bucket {
            records: RecordOps::new(store.clone(), schemas),
            store,
            codec: PathCodec::new(self.prefix.as_deref()),
            partitions: self.partitions.map(Arc::new),
            mutex: self
                .mutex
                .map(|(lock_store, config)| WriteMutex::new(lock_store, config)),
        })
    }
}
