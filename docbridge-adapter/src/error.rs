//! Adapter error types.

use thiserror::Error;

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The engine refused to mount. The adapter stays unmounted and the
    /// next render pass tries again.
    #[error("engine mount failed: {0}")]
    MountFailed(String),

    #[error("session store error: {0}")]
    Session(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
