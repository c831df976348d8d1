//! Error types for credential and endpoint resolution.

use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while resolving endpoints and credentials.
///
/// `Clone` because one failed fetch is reported to every caller that was
/// waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A configuration resource was unreachable or unreadable.
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// The token endpoint failed or returned something unusable.
    #[error("credential unavailable: {0}")]
    CredentialUnavailable(String),
}
