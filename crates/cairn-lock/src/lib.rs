//! Distributed write mutex for Cairn.
//!
//! Serializes concurrent writers on a named resource using lock records
//! with an expiry timestamp, stored in a pluggable [`LockStore`]. The
//! protocol:
//!
//! - **acquire**: atomic create-if-absent-or-stale with expiry
//!   `now + lock_timeout`; on contention, bounded exponential backoff
//!   (optionally jittered) up to a retry budget, then
//!   [`LockError::AcquireTimeout`].
//! - **release**: delete the lock record; idempotent.
//! - **staleness**: a remote lock counts as abandoned only once its
//!   expiry plus the configured clock-skew tolerance has passed, so
//!   drifting writer clocks do not steal live locks.
//! - **cleanup**: [`WriteMutex::cleanup_stale_locks`] sweeps abandoned
//!   records, with a dry-run mode that only counts.
//!
//! An abandoned holder is a liveness bound, not an instant release: the
//! resource stays blocked until the lock times out.

pub mod config;
pub mod entry;
pub mod error;
pub mod mutex;
pub mod store;

// Re-export primary types at crate root for ergonomic imports.
pub use config::MutexConfig;
pub use entry::LockEntry;
pub use error::{LockError, LockResult};
pub use mutex::{now_ms, CleanupReport, WriteMutex};
pub use store::{InMemoryLockStore, LockStore};
