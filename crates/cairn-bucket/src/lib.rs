//! The Cairn bucket: a validated, partition-aware key-value layer over
//! object storage.
//!
//! A [`Bucket`] is configured once with a set of named record types
//! (each with a schema), an optional key prefix, an optional partition
//! scheme, and an optional distributed write mutex. It then exposes:
//!
//! - **Plain records** -- [`Bucket::set`], [`Bucket::get`],
//!   [`Bucket::delete`], [`Bucket::exists`], [`Bucket::list`],
//!   [`Bucket::get_all`]: one JSON object per record type, validated on
//!   both write and read.
//! - **Partitioned records** -- [`Bucket::set_partitioned`],
//!   [`Bucket::get_partitioned`], [`Bucket::delete_partitioned`],
//!   [`Bucket::find_partitioned`]: records filed under hierarchical
//!   `name=value` paths, with glob-based partial-partition queries.
//! - **Write serialization** -- when a mutex is configured, every
//!   mutating operation runs under a lock named by the target's
//!   physical key, so concurrent writers to the same record serialize.
//!
//! The bucket holds no state of its own: every read and listing goes to
//! the object store, and the schema map and partition schema are
//! immutable after construction. Clones share the same collaborators
//! and can be used freely across tasks.

pub mod bucket;
pub mod error;
pub mod partitioned;

mod records;

// Re-export primary types at crate root for ergonomic imports.
pub use bucket::{Bucket, BucketBuilder, RecordListing};
pub use error::{BucketError, BucketResult};
pub use partitioned::{PartitionedKey, PartitionedRecord};
pub use records::{METADATA_PARTITION_PREFIX, METADATA_RECORD_TYPE};

// Re-export the collaborator vocabulary so embedders can configure a
// bucket from this crate alone.
pub use cairn_lock::{CleanupReport, InMemoryLockStore, LockStore, MutexConfig};
pub use cairn_object::{InMemoryObjectStore, ObjectMeta, ObjectStore, StoredObject};
pub use cairn_path::{PartitionKey, PartitionSchema, PartitionValues, PathCodec, ValueConstraint};
pub use cairn_schema::{FieldKind, ObjectSchema, RecordSchema, SchemaMap, TypedSchema};
