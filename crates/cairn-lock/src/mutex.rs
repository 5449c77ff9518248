//! The acquire/retry/release protocol over a [`LockStore`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::MutexConfig;
use crate::entry::LockEntry;
use crate::error::{LockError, LockResult};
use crate::store::LockStore;

/// Outcome of a stale-lock sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Lock records examined.
    pub total: usize,
    /// Records whose expiry predated the cutoff.
    pub stale: usize,
    /// Records actually deleted (0 on a dry run).
    pub deleted: usize,
}

/// Serializes writers on a named resource through lock records with
/// expiry.
///
/// Acquire is an explicit retry loop: attempt an atomic
/// create-if-absent-or-stale, and on contention sleep a bounded
/// exponential backoff before trying again. A remote lock is considered
/// stale only once its expiry plus the configured clock-skew tolerance
/// has passed. Exhausting the retry budget fails the acquire; the
/// guarded operation must not run.
#[derive(Clone)]
pub struct WriteMutex {
    store: Arc<dyn LockStore>,
    config: MutexConfig,
    holder: String,
}

impl WriteMutex {
    pub fn new(store: Arc<dyn LockStore>, config: MutexConfig) -> Self {
        let holder = format!("{}-{:08x}", std::process::id(), rand::random::<u32>());
        Self {
            store,
            config,
            holder,
        }
    }

    pub fn config(&self) -> &MutexConfig {
        &self.config
    }

    /// Acquire the lock on `resource`, retrying with backoff while a
    /// live lock is held by someone else.
    pub async fn acquire(&self, resource: &str) -> LockResult<()> {
        let timeout_ms = self.config.lock_timeout.as_millis() as i64;
        let skew_ms = self.config.clock_skew_tolerance.as_millis() as i64;

        let mut attempt = 0u32;
        loop {
            let now = now_ms();
            let entry = LockEntry::new(resource, now + timeout_ms, self.holder.clone());
            if self.store.try_acquire(&entry, now - skew_ms).await? {
                debug!(resource, attempt, "lock acquired");
                return Ok(());
            }

            if attempt >= self.config.max_retries {
                return Err(LockError::AcquireTimeout {
                    resource: resource.to_string(),
                    attempts: attempt + 1,
                });
            }

            let delay = self.backoff_delay(attempt);
            debug!(
                resource,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "lock held, backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Release the lock on `resource`. Idempotent: releasing a lock that
    /// is already gone (released or expired and swept) is not an error.
    pub async fn release(&self, resource: &str) -> LockResult<()> {
        self.store.release(resource).await?;
        debug!(resource, "lock released");
        Ok(())
    }

    /// Sweep lock records whose expiry predates `older_than_ms`.
    ///
    /// On a dry run the stale subset is only counted. Live locks are
    /// never touched either way.
    pub async fn cleanup_stale_locks(
        &self,
        older_than_ms: i64,
        dry_run: bool,
    ) -> LockResult<CleanupReport> {
        let locks = self.store.list().await?;
        let mut report = CleanupReport {
            total: locks.len(),
            ..Default::default()
        };

        for lock in locks {
            if !lock.is_stale(older_than_ms) {
                continue;
            }
            report.stale += 1;
            if !dry_run && self.store.release(&lock.resource).await? {
                report.deleted += 1;
                warn!(
                    resource = %lock.resource,
                    holder = %lock.holder,
                    expired_at_ms = lock.expires_at_ms,
                    "deleted stale lock"
                );
            }
        }
        Ok(report)
    }

    /// Per-attempt delay: `retry_delay * 2^attempt`, capped at
    /// `max_retry_delay`, optionally jittered into the upper half of the
    /// bound.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.config.retry_delay.as_millis() as u64;
        let cap_ms = self.config.max_retry_delay.as_millis() as u64;
        let bound_ms = base_ms
            .checked_shl(attempt)
            .unwrap_or(u64::MAX)
            .min(cap_ms)
            .max(1);

        let delay_ms = if self.config.use_jitter {
            let half = bound_ms / 2;
            half + rand::thread_rng().gen_range(0..=bound_ms - half)
        } else {
            bound_ms
        };
        Duration::from_millis(delay_ms)
    }
}

impl std::fmt::Debug for WriteMutex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteMutex")
            .field("holder", &self.holder)
            .field("config", &self.config)
            .finish()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
