//! Runtime error types.

use docbridge_content::ContentError;
use thiserror::Error;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors reported to the engine through its runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Upload or content request failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// No style service is configured.
    #[error("style service unavailable")]
    StylesUnavailable,

    /// Style service request failed.
    #[error("style request failed: {0}")]
    Styles(String),
}
