/// Errors from object store operations.
///
/// "Object not found" is not an error: reads return `Ok(None)` and deletes
/// return `Ok(false)` for missing keys. Every `Err` from a store is a real
/// backend failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (service error, auth, throttling).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
