use thiserror::Error;

use cairn_lock::LockError;
use cairn_object::StoreError;
use cairn_path::PartitionError;
use cairn_schema::SchemaError;

/// Errors from bucket operations.
///
/// "Not found" is never an error: `get` and `get_partitioned` return
/// `None`, `delete` returns `false`. Everything here is a real failure,
/// and the variants keep the conditions a caller must distinguish
/// distinct: an undeclared record type, a value that fails its schema,
/// a malformed partition path, lock contention, and backend I/O.
#[derive(Debug, Error)]
pub enum BucketError {
    /// The record type is not declared in the schema map.
    #[error("record type {0:?} is not declared")]
    UnknownSchema(String),

    /// The payload, or a stored value read back, fails schema
    /// validation or no longer decodes as JSON.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A partitioned operation was invoked on a bucket configured
    /// without a partition schema.
    #[error("no partition schema is configured for this bucket")]
    PartitionNotConfigured,

    /// A partition path or partial specification does not match the
    /// partition schema.
    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),

    /// Lock acquisition failed; the mutating operation did not run.
    #[error("lock error: {0}")]
    Lock(#[from] LockError),

    /// I/O failure from the object store, surfaced unchanged.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The bucket builder was given an incomplete configuration.
    #[error("bucket misconfigured: {0}")]
    Config(String),
}

/// Result alias for bucket operations.
pub type BucketResult<T> = Result<T, BucketError>;
