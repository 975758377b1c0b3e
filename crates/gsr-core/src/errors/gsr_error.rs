use super::{StorageError, ValidationError};

/// Top-level error for every registry operation.
#[derive(Debug, thiserror::Error)]
pub enum GsrError {
    #[error("validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("operation cancelled: {operation}")]
    Cancelled { operation: String },

    #[error("deadline exceeded during {operation}: {elapsed_ms}ms elapsed of {budget_ms}ms")]
    DeadlineExceeded {
        operation: String,
        elapsed_ms: u64,
        budget_ms: u64,
    },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("identity hashing secret has not been initialized")]
    HashingNotInitialized,
}

impl GsrError {
    /// True for failures caused by caller input rather than the registry itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// True for failures a caller may reasonably retry in full.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageError(StorageError::SqliteError { .. }) | Self::DeadlineExceeded { .. }
        )
    }
}
