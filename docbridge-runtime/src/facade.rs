//! The runtime handed to the engine.

use crate::error::{RuntimeError, RuntimeResult};
use crate::proxy::ProxyRules;
use crate::runtime::{EditorRuntime, StylesRuntime};
use crate::styles::StyleStore;
use async_trait::async_trait;
use docbridge_content::UploadPipeline;
use docbridge_types::{ImageReference, StyleRecord, UploadFile};
use std::sync::Arc;

/// Uploads through the content pipeline, rewrites image sources through
/// [`ProxyRules`] and serves styles from an optional [`StyleStore`].
pub struct RuntimeFacade {
    uploads: Arc<UploadPipeline>,
    styles: Option<Arc<StyleStore>>,
    proxy: ProxyRules,
}

impl RuntimeFacade {
    pub fn new(uploads: Arc<UploadPipeline>) -> Self {
        Self {
            uploads,
            styles: None,
            proxy: ProxyRules::default(),
        }
    }

    #[must_use]
    pub fn with_styles(mut self, styles: Arc<StyleStore>) -> Self {
        self.styles = Some(styles);
        self
    }

    #[must_use]
    pub fn with_proxy_rules(mut self, proxy: ProxyRules) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn uploads(&self) -> &Arc<UploadPipeline> {
        &self.uploads
    }

    fn style_store(&self) -> RuntimeResult<&StyleStore> {
        self.styles.as_deref().ok_or(RuntimeError::StylesUnavailable)
    }
}

#[async_trait]
impl EditorRuntime for RuntimeFacade {
    fn can_upload_image(&self) -> bool {
        true
    }

    async fn upload_image(&self, file: UploadFile) -> RuntimeResult<ImageReference> {
        Ok(self.uploads.upload(file).await?)
    }

    fn can_proxy_image_src(&self, src: &str) -> bool {
        self.proxy.matches(src)
    }

    fn get_proxy_image_src(&self, src: &str) -> String {
        self.proxy.rewrite(src)
    }

    fn styles(&self) -> Option<&dyn StylesRuntime> {
        self.styles.is_some().then_some(self as &dyn StylesRuntime)
    }
}

#[async_trait]
impl StylesRuntime for RuntimeFacade {
    async fn get_styles(&self) -> RuntimeResult<Vec<StyleRecord>> {
        self.style_store()?.get_styles().await
    }

    async fn save_style(&self, style: StyleRecord) -> RuntimeResult<Vec<StyleRecord>> {
        self.style_store()?.save_style(style).await
    }

    async fn rename_style(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> RuntimeResult<Vec<StyleRecord>> {
        self.style_store()?.rename_style(old_name, new_name).await
    }

    async fn remove_style(&self, name: &str) -> RuntimeResult<Vec<StyleRecord>> {
        self.style_store()?.remove_style(name).await
    }
}
