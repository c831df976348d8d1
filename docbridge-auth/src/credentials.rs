//! The process-wide endpoint and credential cache.

use crate::config::AuthConfig;
use crate::credential::{Credential, TokenRequest, TokenResponse};
use crate::error::{AuthError, AuthResult};
use crate::resources::{content_endpoint, token_request};
use docbridge_cache::{CachedAsyncValue, Lifetime};
use docbridge_types::resolve_url;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Resolves and caches the content endpoint and the bearer credential.
///
/// Owned by a single composition root and shared through `Arc`; every cached
/// value allows at most one fetch in flight.
pub struct CredentialCache {
    config: AuthConfig,
    client: Client,
    endpoint: CachedAsyncValue<String, AuthError>,
    token_request: CachedAsyncValue<TokenRequest, AuthError>,
    token: CachedAsyncValue<Credential, AuthError>,
}

impl CredentialCache {
    /// Creates a cache with its own HTTP client.
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        let client = config
            .build_client()
            .map_err(|e| AuthError::ConfigUnavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a cache that issues requests through `client`.
    pub fn with_client(config: AuthConfig, client: Client) -> Self {
        Self {
            config,
            client,
            endpoint: CachedAsyncValue::new("content-endpoint"),
            token_request: CachedAsyncValue::new("token-request"),
            token: CachedAsyncValue::new("bearer-token"),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// The HTTP client shared by everything that talks to the services.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolves `link` against the configured origin.
    ///
    /// Fails with `ConfigUnavailable` when the origin or link is not a URL.
    pub fn resolve(&self, link: &str) -> AuthResult<String> {
        resolve_url(&self.config.origin, link).map_err(|e| {
            AuthError::ConfigUnavailable(format!(
                "cannot resolve '{link}' against '{}': {e}",
                self.config.origin
            ))
        })
    }

    /// Returns the content endpoint, as written in the runtime configuration.
    ///
    /// Never fails in practice: a missing field or malformed resource yields
    /// the default endpoint, cached permanently. An unreachable resource also
    /// yields the default but is retried on the next call, as does an origin
    /// the resource path cannot be resolved against.
    pub async fn endpoint(&self) -> AuthResult<String> {
        let client = self.client.clone();
        let target = self.resolve(&self.config.runtime_config_path);
        let default = self.config.default_endpoint.clone();

        self.endpoint
            .get_or_fetch(move || async move {
                let body = match target {
                    Ok(url) => fetch_resource(&client, &url).await,
                    Err(e) => Err(e),
                };
                match body {
                    Ok(body) => {
                        let endpoint = content_endpoint(&body, &default);
                        info!(endpoint = %endpoint, "Resolved content endpoint");
                        Ok((endpoint, Lifetime::Forever))
                    }
                    Err(e) => {
                        warn!(error = %e, "Falling back to default content endpoint");
                        Ok((default, Lifetime::For(Duration::ZERO)))
                    }
                }
            })
            .await
    }

    /// Returns the bearer credential, requesting a new one if the cached
    /// credential is missing or expired.
    pub async fn token(&self) -> AuthResult<Credential> {
        let request = self.token_request().await?;
        let client = self.client.clone();
        let ttl = self.config.token_ttl();

        self.token
            .get_or_fetch(move || async move {
                let credential = request_token(&client, &request, ttl).await?;
                let lifetime = credential.expires_at.saturating_duration_since(Instant::now());
                Ok((credential, Lifetime::For(lifetime)))
            })
            .await
    }

    /// Returns the credential, or `None` (logged) when it cannot be obtained.
    pub async fn credential_or_none(&self) -> Option<Credential> {
        match self.token().await {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!(error = %e, "Proceeding without credential");
                None
            }
        }
    }

    /// Attaches the `Authorization` header to `request` when a credential is
    /// available; otherwise returns the request unchanged.
    pub async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credential_or_none().await {
            Some(credential) => request.header(AUTHORIZATION, credential.header_value()),
            None => request,
        }
    }

    /// Authorizes `request` and hands it to `proceed`.
    ///
    /// Fails open: a credential failure never blocks the request.
    pub async fn intercept<F, Fut, T>(&self, request: RequestBuilder, proceed: F) -> T
    where
        F: FnOnce(RequestBuilder) -> Fut,
        Fut: Future<Output = T>,
    {
        let request = self.authorize(request).await;
        proceed(request).await
    }

    /// Drops the cached credential; the next `token()` requests a new one.
    pub fn invalidate_token(&self) {
        self.token.invalidate();
    }

    /// Drops the cached endpoint; the next `endpoint()` refetches it.
    pub fn invalidate_endpoint(&self) {
        self.endpoint.invalidate();
    }

    /// The token request is derived once from the keycloak configuration
    /// and kept for the life of the cache.
    async fn token_request(&self) -> AuthResult<TokenRequest> {
        let client = self.client.clone();
        let target = self.resolve(&self.config.keycloak_config_path);
        let origin = self.config.origin.clone();

        self.token_request
            .get_or_fetch(move || async move {
                let unavailable = |e: AuthError| {
                    AuthError::CredentialUnavailable(format!("keycloak configuration: {e}"))
                };
                let url = target.map_err(unavailable)?;
                let body = fetch_resource(&client, &url).await.map_err(unavailable)?;
                let request = token_request(&body, &origin).map_err(unavailable)?;
                debug!(token_url = %request.url, client_id = %request.client_id, "Built token request");
                Ok((request, Lifetime::Forever))
            })
            .await
    }
}

impl std::fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCache")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .finish()
    }
}

async fn fetch_resource(client: &Client, url: &str) -> AuthResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AuthError::ConfigUnavailable(format!("{url}: {e}")))?;

    if !response.status().is_success() {
        return Err(AuthError::ConfigUnavailable(format!(
            "{url}: status {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| AuthError::ConfigUnavailable(format!("{url}: {e}")))
}

async fn request_token(
    client: &Client,
    request: &TokenRequest,
    default_ttl: Duration,
) -> AuthResult<Credential> {
    debug!(token_url = %request.url, "Requesting bearer token");

    let response = client
        .post(&request.url)
        .header(ACCEPT, "application/json")
        .form(&request.form())
        .send()
        .await
        .map_err(|e| AuthError::CredentialUnavailable(format!("token request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let error = response.text().await.unwrap_or_default();
        return Err(AuthError::CredentialUnavailable(format!(
            "token request failed: {status}: {error}"
        )));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        AuthError::CredentialUnavailable(format!("failed to parse token response: {e}"))
    })?;

    let ttl = token.expires_in.map_or(default_ttl, Duration::from_secs);
    info!(scheme = %token.token_type, ttl_secs = ttl.as_secs(), "Obtained bearer token");

    Ok(Credential {
        scheme: token.token_type,
        token: token.access_token,
        expires_at: Instant::now() + ttl,
    })
}
