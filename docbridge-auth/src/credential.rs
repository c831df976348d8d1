use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;

/// Token lifetime used when the token server does not state one.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// A bearer credential ready to be sent as an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Token type reported by the server, e.g. `Bearer`.
    pub scheme: String,
    /// The access token.
    pub token: String,
    /// When the credential stops being served from cache.
    pub expires_at: Instant,
}

impl Credential {
    /// The `Authorization` header value: `"{scheme} {token}"`.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.token)
    }

    /// Returns true once `expires_at` has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// A client-credentials token request derived from the keycloak config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// Absolute URL of the realm's token endpoint.
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl TokenRequest {
    /// The form-encoded body fields.
    pub fn form(&self) -> [(&'static str, &str); 3] {
        [
            ("grant_type", "client_credentials"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ]
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: Option<u64>,
}
