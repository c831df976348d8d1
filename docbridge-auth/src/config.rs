use crate::credential::DEFAULT_TOKEN_TTL;
use crate::resources::DEFAULT_CONTENT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where to find the configuration resources and how long to keep tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL that relative resource paths and endpoints resolve against
    /// (the host shell's origin).
    pub origin: String,
    /// Path of the runtime configuration resource.
    pub runtime_config_path: String,
    /// Path of the keycloak adapter configuration resource.
    pub keycloak_config_path: String,
    /// Endpoint used when the runtime configuration does not name one.
    pub default_endpoint: String,
    /// Token lifetime when the token response does not state one.
    pub token_ttl_secs: u64,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:4200".to_string(),
            runtime_config_path: "assets/runtime-config.json5".to_string(),
            keycloak_config_path: "assets/keycloak.json".to_string(),
            default_endpoint: DEFAULT_CONTENT_ENDPOINT.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL.as_secs(),
            request_timeout_secs: None,
        }
    }
}

impl AuthConfig {
    /// Creates a config whose resources live under `origin`.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }

    /// Token lifetime as a `Duration`.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Builds the HTTP client used for every auth request.
    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}
