//! Endpoint discovery and bearer credentials for docbridge.
//!
//! Two static configuration resources drive this crate:
//! - the runtime configuration, naming the content endpoint;
//! - the keycloak adapter configuration, naming the token server, realm and
//!   client credentials.
//!
//! [`CredentialCache`] resolves both lazily, shares in-flight fetches between
//! callers and keeps the bearer token for its lifetime (five minutes by
//! default). Requests that need authorization go through
//! [`CredentialCache::intercept`], which fails open: if no credential can be
//! obtained the request is sent without one.

mod config;
mod credential;
mod credentials;
mod error;
mod resources;

pub use config::AuthConfig;
pub use credential::{Credential, TokenRequest, DEFAULT_TOKEN_TTL};
pub use credentials::CredentialCache;
pub use error::{AuthError, AuthResult};
pub use resources::{content_endpoint, token_request, DEFAULT_CONTENT_ENDPOINT};
