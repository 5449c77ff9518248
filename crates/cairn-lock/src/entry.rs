use serde::{Deserialize, Serialize};

/// One lock record: the unit of mutual exclusion.
///
/// Lock records live only in the lock store; they are created on acquire
/// and deleted on release or swept after expiry. The `holder` tag is an
/// opaque identifier for out-of-band inspection and plays no part in the
/// exclusion algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Name of the locked resource.
    pub resource: String,
    /// Epoch milliseconds after which the lock no longer counts as held.
    pub expires_at_ms: i64,
    /// Opaque tag identifying the writer that created the lock.
    pub holder: String,
}

impl LockEntry {
    pub fn new(resource: impl Into<String>, expires_at_ms: i64, holder: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            expires_at_ms,
            holder: holder.into(),
        }
    }

    /// Whether this lock's expiry predates `stale_before_ms`.
    pub fn is_stale(&self, stale_before_ms: i64) -> bool {
        self.expires_at_ms < stale_before_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staleness_is_a_strict_comparison() {
        let entry = LockEntry::new("r", 1_000, "h");
        assert!(entry.is_stale(1_001));
        assert!(!entry.is_stale(1_000));
        assert!(!entry.is_stale(999));
    }
}
