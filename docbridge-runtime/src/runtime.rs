//! Capability traits handed to the engine.

use crate::error::RuntimeResult;
use async_trait::async_trait;
use docbridge_types::{ImageReference, StyleRecord, UploadFile};

/// Network capabilities the engine may call while editing.
#[async_trait]
pub trait EditorRuntime: Send + Sync {
    /// Returns whether image upload is available.
    fn can_upload_image(&self) -> bool;

    /// Uploads an image and returns the reference to embed in the document.
    async fn upload_image(&self, file: UploadFile) -> RuntimeResult<ImageReference>;

    /// Returns whether `src` would be rewritten by [`get_proxy_image_src`].
    ///
    /// [`get_proxy_image_src`]: EditorRuntime::get_proxy_image_src
    fn can_proxy_image_src(&self, src: &str) -> bool;

    /// Returns the URL the engine should load `src` from.
    fn get_proxy_image_src(&self, src: &str) -> String;

    /// Returns the style catalogue served by this same runtime, if it has one.
    fn styles(&self) -> Option<&dyn StylesRuntime> {
        None
    }
}

/// Paragraph style catalogue. Every call returns the full, current list.
#[async_trait]
pub trait StylesRuntime: Send + Sync {
    async fn get_styles(&self) -> RuntimeResult<Vec<StyleRecord>>;

    async fn save_style(&self, style: StyleRecord) -> RuntimeResult<Vec<StyleRecord>>;

    async fn rename_style(&self, old_name: &str, new_name: &str)
    -> RuntimeResult<Vec<StyleRecord>>;

    async fn remove_style(&self, name: &str) -> RuntimeResult<Vec<StyleRecord>>;
}
