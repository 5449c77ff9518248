use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::object::{ObjectMeta, StoredObject};

/// Key-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - A `put` is an unconditional overwrite with read-after-write
///   consistency for that key.
/// - "Not found" is expressed in the types: `get` returns `Ok(None)` and
///   `delete` returns `Ok(false)` for a missing key. An `Err` always means
///   a real backend failure.
/// - `list` returns every object whose key starts with the given prefix;
///   an empty prefix lists the whole bucket.
/// - Metadata round-trips verbatim; the store never interprets payloads.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, replacing any previous value at `key`.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: BTreeMap<String, String>,
    ) -> StoreResult<()>;

    /// Read an object. Returns `Ok(None)` if the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<StoredObject>>;

    /// Delete an object. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// List all objects whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>>;

    /// Check whether a key exists.
    ///
    /// Default implementation reads the object. Backends may override with
    /// a cheaper HEAD-style call.
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
