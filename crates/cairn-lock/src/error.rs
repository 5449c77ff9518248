use thiserror::Error;

/// Errors from lock acquisition and lock-store operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock stayed held through the whole retry budget. The guarded
    /// operation must not run; the caller may retry it as a whole.
    #[error("timed out acquiring lock on {resource:?} after {attempts} attempt(s)")]
    AcquireTimeout { resource: String, attempts: u32 },

    /// Backend-specific failure from the lock store.
    #[error("lock backend error: {0}")]
    Backend(String),

    /// I/O error from the underlying lock store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for lock operations.
pub type LockResult<T> = Result<T, LockError>;
