use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::StoreResult;
use crate::object::{ObjectMeta, StoredObject};
use crate::traits::ObjectStore;

/// In-memory, `BTreeMap`-based object store.
///
/// Intended for tests and embedding. Objects are held in memory behind a
/// `RwLock` and cloned on read. Keys iterate in lexicographic order, so
/// listings are deterministic.
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|obj| obj.size())
            .sum()
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Return all keys in lexicographic order.
    pub fn all_keys(&self) -> Vec<String> {
        let map = self.objects.read().expect("lock poisoned");
        map.keys().cloned().collect()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        metadata: BTreeMap<String, String>,
    ) -> StoreResult<()> {
        let object = StoredObject {
            bytes,
            content_type: content_type.to_string(),
            metadata,
            last_modified: Utc::now(),
        };
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoredObject>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, obj)| ObjectMeta {
                key: key.clone(),
                last_modified: obj.last_modified,
                size: obj.size(),
            })
            .collect())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::CONTENT_TYPE_JSON;

    async fn put_simple(store: &InMemoryObjectStore, key: &str, payload: &[u8]) {
        store
            .put(key, payload.to_vec(), CONTENT_TYPE_JSON, BTreeMap::new())
            .await
            .unwrap();
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "config", b"{\"a\":1}").await;

        let obj = store.get("config").await.unwrap().expect("should exist");
        assert_eq!(obj.bytes, b"{\"a\":1}");
        assert_eq!(obj.content_type, CONTENT_TYPE_JSON);
        assert_eq!(obj.size(), 7);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryObjectStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_in_place() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "k", b"old").await;
        put_simple(&store, "k", b"new").await;

        let obj = store.get("k").await.unwrap().unwrap();
        assert_eq!(obj.bytes, b"new");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_present_and_missing() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "k", b"v").await;

        assert!(store.delete("k").await.unwrap());
        assert!(!store.exists("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn exists_reports_presence() {
        let store = InMemoryObjectStore::new();
        assert!(!store.exists("k").await.unwrap());
        put_simple(&store, "k", b"v").await;
        assert!(store.exists("k").await.unwrap());
    }

    // -----------------------------------------------------------------------
    // Metadata round-trip
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn metadata_round_trips_verbatim() {
        let store = InMemoryObjectStore::new();
        let mut metadata = BTreeMap::new();
        metadata.insert("record-type".to_string(), "user".to_string());
        metadata.insert("part:year".to_string(), "2023".to_string());

        store
            .put("year=2023/user.json", b"{}".to_vec(), CONTENT_TYPE_JSON, metadata.clone())
            .await
            .unwrap();

        let obj = store.get("year=2023/user.json").await.unwrap().unwrap();
        assert_eq!(obj.metadata, metadata);
    }

    // -----------------------------------------------------------------------
    // Prefix listing
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "data/a", b"1").await;
        put_simple(&store, "data/b", b"22").await;
        put_simple(&store, "other/c", b"333").await;

        let listed = store.list("data/").await.unwrap();
        let keys: Vec<&str> = listed.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["data/a", "data/b"]);
        assert_eq!(listed[1].size, 2);
    }

    #[tokio::test]
    async fn empty_prefix_lists_everything() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "a", b"1").await;
        put_simple(&store, "b", b"2").await;

        assert_eq!(store.list("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn listing_order_is_lexicographic() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "z", b"1").await;
        put_simple(&store, "a", b"1").await;
        put_simple(&store, "m", b"1").await;

        let keys: Vec<String> = store
            .list("")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn len_and_total_bytes() {
        let store = InMemoryObjectStore::new();
        assert!(store.is_empty());

        put_simple(&store, "a", b"12345").await;
        put_simple(&store, "b", b"123456789").await;
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_bytes(), 14);

        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn last_modified_advances_on_overwrite() {
        let store = InMemoryObjectStore::new();
        put_simple(&store, "k", b"old").await;
        let first = store.get("k").await.unwrap().unwrap().last_modified;

        put_simple(&store, "k", b"new").await;
        let second = store.get("k").await.unwrap().unwrap().last_modified;
        assert!(second >= first);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
