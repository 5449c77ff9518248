use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::entry::LockEntry;
use crate::error::LockResult;

/// Lock-record store.
///
/// Implementations must make [`try_acquire`](LockStore::try_acquire)
/// atomic: two concurrent calls for the same resource must not both
/// succeed. Everything else is plain record CRUD.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Create the lock unless a live lock is already present.
    ///
    /// An existing lock whose expiry predates `stale_before_ms` is
    /// treated as abandoned and overwritten. Returns `true` when the
    /// entry was written.
    async fn try_acquire(&self, entry: &LockEntry, stale_before_ms: i64) -> LockResult<bool>;

    /// Read the current lock record for a resource, if any.
    async fn get(&self, resource: &str) -> LockResult<Option<LockEntry>>;

    /// Delete the lock record. Returns `true` if one existed.
    async fn release(&self, resource: &str) -> LockResult<bool>;

    /// List all lock records.
    async fn list(&self) -> LockResult<Vec<LockEntry>>;
}

/// In-memory, `HashMap`-based lock store.
///
/// Intended for tests and single-process embedding. Atomicity of
/// `try_acquire` comes from holding the write lock across the
/// check-and-insert.
pub struct InMemoryLockStore {
    locks: RwLock<HashMap<String, LockEntry>>,
}

impl InMemoryLockStore {
    /// Create a new empty lock store.
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Number of lock records currently present.
    pub fn len(&self) -> usize {
        self.locks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no lock records are present.
    pub fn is_empty(&self) -> bool {
        self.locks.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn try_acquire(&self, entry: &LockEntry, stale_before_ms: i64) -> LockResult<bool> {
        let mut locks = self.locks.write().expect("lock poisoned");
        if let Some(existing) = locks.get(&entry.resource) {
            if !existing.is_stale(stale_before_ms) {
                return Ok(false);
            }
        }
        locks.insert(entry.resource.clone(), entry.clone());
        Ok(true)
    }

    async fn get(&self, resource: &str) -> LockResult<Option<LockEntry>> {
        let locks = self.locks.read().expect("lock poisoned");
        Ok(locks.get(resource).cloned())
    }

    async fn release(&self, resource: &str) -> LockResult<bool> {
        let mut locks = self.locks.write().expect("lock poisoned");
        Ok(locks.remove(resource).is_some())
    }

    async fn list(&self) -> LockResult<Vec<LockEntry>> {
        let locks = self.locks.read().expect("lock poisoned");
        let mut entries: Vec<LockEntry> = locks.values().cloned().collect();
        entries.sort_by(|a, b| a.resource.cmp(&b.resource));
        Ok(entries)
    }
}

impl std::fmt::Debug for InMemoryLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLockStore")
            .field("lock_count", &self.len())
            .finish()
    }
}
