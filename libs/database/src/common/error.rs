/// Storage error surfaced by every data access call.
///
/// Nothing here is retried; the first failure reaches the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure (unreachable server, malformed query, write error)
    #[cfg(feature = "mongodb")]
    #[error("{0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The store could not be reached
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
