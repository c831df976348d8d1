//! Style service client with a cached catalogue.

use crate::error::{RuntimeError, RuntimeResult};
use crate::runtime::StylesRuntime;
use async_trait::async_trait;
use docbridge_cache::{CachedAsyncValue, Lifetime};
use docbridge_types::{join_with_slash, StyleRecord};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the style service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub base_url: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4200/style-service".to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenameRequest<'a> {
    old_name: &'a str,
    new_name: &'a str,
}

/// Keeps the style list in memory and refetches it after every change.
pub struct StyleStore {
    config: StyleConfig,
    client: Client,
    styles: CachedAsyncValue<Vec<StyleRecord>, String>,
}

impl StyleStore {
    pub fn new(config: StyleConfig, client: Client) -> Self {
        Self {
            config,
            client,
            styles: CachedAsyncValue::new("styles"),
        }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// The cached list, if one has been fetched.
    pub fn cached(&self) -> Option<Vec<StyleRecord>> {
        self.styles.peek()
    }

    fn url(&self, path: &str) -> String {
        join_with_slash(&self.config.base_url, path)
    }

    async fn mutate(&self, action: &str, request: RequestBuilder) -> RuntimeResult<Vec<StyleRecord>> {
        let response = request
            .send()
            .await
            .map_err(|e| RuntimeError::Styles(format!("{action} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(RuntimeError::Styles(format!("{action} failed: {status}: {error}")));
        }

        info!(action, "Style catalogue changed");
        self.styles.invalidate();
        self.get_styles().await
    }
}

#[async_trait]
impl StylesRuntime for StyleStore {
    async fn get_styles(&self) -> RuntimeResult<Vec<StyleRecord>> {
        let client = self.client.clone();
        let url = self.url("styles");

        self.styles
            .get_or_fetch(move || async move {
                fetch_styles(&client, &url)
                    .await
                    .map(|styles| (styles, Lifetime::Forever))
            })
            .await
            .map_err(RuntimeError::Styles)
    }

    async fn save_style(&self, style: StyleRecord) -> RuntimeResult<Vec<StyleRecord>> {
        debug!(style_name = %style.style_name, "Saving style");
        let request = self.client.post(self.url("styles")).json(&style);
        self.mutate("save style", request).await
    }

    async fn rename_style(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> RuntimeResult<Vec<StyleRecord>> {
        debug!(old_name, new_name, "Renaming style");
        let request = self
            .client
            .patch(self.url("styles/rename"))
            .json(&RenameRequest { old_name, new_name });
        self.mutate("rename style", request).await
    }

    async fn remove_style(&self, name: &str) -> RuntimeResult<Vec<StyleRecord>> {
        debug!(style_name = name, "Removing style");
        let url = join_with_slash(&self.url("styles"), &urlencoding::encode(name));
        self.mutate("remove style", self.client.delete(url)).await
    }
}

async fn fetch_styles(client: &Client, url: &str) -> Result<Vec<StyleRecord>, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("style list failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("style list failed: status {}", response.status()));
    }

    let styles: Vec<StyleRecord> = response
        .json()
        .await
        .map_err(|e| format!("failed to parse style list: {e}"))?;
    debug!(count = styles.len(), "Fetched styles");
    Ok(styles)
}
