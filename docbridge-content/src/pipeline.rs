//! Multipart upload and file management against the content endpoint.

use crate::config::ContentConfig;
use crate::error::{ContentError, ContentResult};
use crate::response::UploadResponse;
use docbridge_auth::{Credential, CredentialCache};
use docbridge_types::{join_with_slash, FileMeta, ImageReference, UploadFile};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Uploads files to the content service and reports what was stored.
pub struct UploadPipeline {
    credentials: Arc<CredentialCache>,
    config: ContentConfig,
    uploaded: broadcast::Sender<ImageReference>,
}

impl UploadPipeline {
    pub fn new(credentials: Arc<CredentialCache>, config: ContentConfig) -> Self {
        let (uploaded, _) = broadcast::channel(config.notification_capacity.max(1));
        Self {
            credentials,
            config,
            uploaded,
        }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Receives every `ImageReference` produced by a successful upload.
    pub fn subscribe(&self) -> broadcast::Receiver<ImageReference> {
        self.uploaded.subscribe()
    }

    /// Uploads `file` as the multipart field `file` and returns the stored
    /// image's reference.
    ///
    /// Endpoint and credential are resolved concurrently; a missing
    /// credential does not stop the upload. No retries.
    pub async fn upload(&self, file: UploadFile) -> ContentResult<ImageReference> {
        let UploadFile {
            file_name,
            mime_type,
            bytes,
        } = file;

        let (endpoint, credential) =
            futures::join!(self.credentials.endpoint(), self.upload_credential());
        let endpoint = endpoint.map_err(|e| ContentError::upload(&file_name, e))?;
        let url = self
            .credentials
            .resolve(&endpoint)
            .map_err(|e| ContentError::upload(&file_name, e))?;

        debug!(file_name = %file_name, size = bytes.len(), url = %url, "Uploading file");

        let mut part = Part::bytes(bytes).file_name(file_name.clone());
        if let Some(mime) = &mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| ContentError::upload(&file_name, e))?;
        }
        let form = Form::new().part("file", part);

        let mut request = self.credentials.client().post(&url).multipart(form);
        if let Some(credential) = credential {
            request = request.header(AUTHORIZATION, credential.header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ContentError::upload(&file_name, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(ContentError::upload(&file_name, format!("{status}: {error}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ContentError::upload(&file_name, e))?;
        let image = UploadResponse::decode(&body)
            .and_then(|shape| shape.into_image_reference(&endpoint))
            .map_err(|cause| ContentError::upload(&file_name, cause))?;

        info!(file_name = %file_name, id = %image.id, src = %image.src, "Uploaded file");
        // Nobody listening is fine.
        let _ = self.uploaded.send(image.clone());

        Ok(image)
    }

    /// Lists the files stored at the content endpoint.
    pub async fn list_files(&self) -> ContentResult<Vec<FileMeta>> {
        let endpoint = self.credentials.endpoint().await?;
        let url = self.credentials.resolve(&endpoint)?;

        let request = self.authorize(self.credentials.client().get(&url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| ContentError::Request(format!("file list failed: {e}")))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(ContentError::Request(format!("file list failed: {error}")));
        }

        response
            .json()
            .await
            .map_err(|e| ContentError::Request(format!("failed to parse file list: {e}")))
    }

    /// Deletes a stored file. Deleting a file that no longer exists succeeds.
    pub async fn delete_file(&self, entity_id: &str) -> ContentResult<()> {
        let endpoint = self.credentials.endpoint().await?;
        let url = self
            .credentials
            .resolve(&join_with_slash(&endpoint, &urlencoding::encode(entity_id)))?;

        debug!(entity_id, "Deleting file");

        let request = self.authorize(self.credentials.client().delete(&url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| ContentError::Request(format!("delete failed: {e}")))?;

        if response.status().as_u16() == 404 {
            warn!(entity_id, "File already gone");
            return Ok(());
        }
        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(ContentError::Request(format!("delete failed: {error}")));
        }

        info!(entity_id, "Deleted file");
        Ok(())
    }

    async fn upload_credential(&self) -> Option<Credential> {
        if self.config.require_auth {
            self.credentials.credential_or_none().await
        } else {
            None
        }
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.config.require_auth {
            self.credentials.authorize(request).await
        } else {
            request
        }
    }
}
