//! Content service error types.

use docbridge_auth::AuthError;
use thiserror::Error;

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur talking to the content service.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The upload request failed or its response could not be understood.
    #[error("upload of '{file_name}' failed: {cause}")]
    UploadFailed { file_name: String, cause: String },

    /// A listing or delete request failed.
    #[error("content request failed: {0}")]
    Request(String),

    /// Endpoint resolution failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ContentError {
    pub(crate) fn upload(file_name: &str, cause: impl std::fmt::Display) -> Self {
        ContentError::UploadFailed {
            file_name: file_name.to_string(),
            cause: cause.to_string(),
        }
    }
}
