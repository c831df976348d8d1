//! Parsing of the static configuration resources.
//!
//! Both resources are read leniently: malformed JSON or a missing field
//! yields the documented default instead of an error, so a broken
//! configuration degrades the pipeline rather than aborting it.

use crate::credential::TokenRequest;
use crate::error::{AuthError, AuthResult};
use docbridge_types::{resolve_url, slash};
use serde_json::Value;
use tracing::warn;

/// Content endpoint used when the runtime configuration names none.
pub const DEFAULT_CONTENT_ENDPOINT: &str = "movia/content";

/// Reads `contentEndpoint` from the runtime configuration body.
pub fn content_endpoint(body: &str, default: &str) -> String {
    parse_lenient(body, "runtime configuration")
        .get("contentEndpoint")
        .and_then(Value::as_str)
        .map_or_else(|| default.to_string(), str::to_string)
}

/// Builds the client-credentials token request from the keycloak adapter
/// configuration body.
///
/// The token URL is `{auth-server-url}/realms/{realm}/protocol/openid-connect/token`,
/// resolved against `origin` when the server URL is relative. Only an
/// unusable origin or server URL is an error.
pub fn token_request(body: &str, origin: &str) -> AuthResult<TokenRequest> {
    let json = parse_lenient(body, "keycloak configuration");
    let field = |key: &str| {
        json.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let server = field("auth-server-url");
    let realm = field("realm");
    let url = slash(&server, &["realms", realm.as_str(), "protocol/openid-connect/token"]);

    let url = resolve_url(origin, &url).map_err(|e| {
        AuthError::ConfigUnavailable(format!("invalid token url '{url}': {e}"))
    })?;

    Ok(TokenRequest {
        url,
        client_id: field("resource"),
        client_secret: json
            .pointer("/credentials/secret")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn parse_lenient(body: &str, resource: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(resource, error = %e, "Malformed configuration, using defaults");
        Value::Null
    })
}
