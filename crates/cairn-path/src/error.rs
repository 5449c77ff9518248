use thiserror::Error;

/// Errors from partition-path parsing and pattern construction.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// The path does not match the partition schema.
    #[error("invalid partition path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A partition key not declared by the schema was supplied.
    #[error("unknown partition key {name:?}")]
    UnknownKey { name: String },
}

/// Result alias for path operations.
pub type PathResult<T> = Result<T, PartitionError>;
