use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures reported by a persistence collaborator.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Failures reported by a [`Mapper`](crate::mapper::Mapper).
///
/// Storage failures are not distinguished by cause once they reach this
/// layer; callers only learn that the operation failed.
#[derive(Debug, Clone, Error)]
pub enum MapperError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for MapperError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}
