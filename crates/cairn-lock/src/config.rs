use std::time::Duration;

/// Configuration for the write mutex.
#[derive(Clone, Debug)]
pub struct MutexConfig {
    /// How long an acquired lock stays valid. An abandoned holder blocks
    /// the resource until this elapses.
    pub lock_timeout: Duration,
    /// How many times to retry after the initial acquire attempt fails.
    pub max_retries: u32,
    /// Base delay before the first retry; doubles each attempt.
    pub retry_delay: Duration,
    /// Upper bound on the per-attempt backoff delay.
    pub max_retry_delay: Duration,
    /// When `true`, each delay is randomized within its backoff bound so
    /// contending writers do not retry in lockstep.
    pub use_jitter: bool,
    /// Grace period added to a remote lock's expiry before treating it
    /// as stale, tolerating clock drift between writers.
    pub clock_skew_tolerance: Duration,
}

impl Default for MutexConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(30),
            max_retries: 10,
            retry_delay: Duration::from_millis(100),
            max_retry_delay: Duration::from_secs(5),
            use_jitter: true,
            clock_skew_tolerance: Duration::from_millis(500),
        }
    }
}

impl MutexConfig {
    /// A configuration that gives up quickly. Useful for interactive
    /// callers that would rather fail than wait out contention.
    pub fn fail_fast() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_millis(20),
            max_retry_delay: Duration::from_millis(100),
            ..Default::default()
        }
    }
}
