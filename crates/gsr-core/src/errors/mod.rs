mod gsr_error;
mod storage_error;
mod validation_error;

pub use gsr_error::GsrError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Convenience alias used across the workspace.
pub type GsrResult<T> = Result<T, GsrError>;
