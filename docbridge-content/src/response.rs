//! Upload response shapes.
//!
//! Backends disagree on what a successful upload returns. The body is
//! decoded once, here, into a tagged union; callers only ever see the
//! normalised [`ImageReference`].

use docbridge_types::{join_with_slash, FileMeta, ImageReference};
use serde::Deserialize;
use serde_json::Value;

/// Response of a content-manager backend: `{statusCode, items: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsShape {
    #[serde(default)]
    pub status_code: Option<u16>,
    pub items: Vec<FileMeta>,
}

/// Response of an entity backend: `{link, entity: {id, type, label}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityShape {
    #[serde(default)]
    pub link: Option<String>,
    pub entity: UploadedEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedEntity {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: Value,
    #[serde(default)]
    pub label: String,
}

/// Either known upload response shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Items(ItemsShape),
    Entity(EntityShape),
}

impl UploadResponse {
    /// Decodes a response body into one of the known shapes.
    pub fn decode(body: &[u8]) -> Result<Self, String> {
        serde_json::from_slice(body)
            .map_err(|_| format!("unrecognised upload response: {}", String::from_utf8_lossy(body)))
    }

    /// Maps the response to the reference the engine expects.
    ///
    /// Item urls are paths under `endpoint`; entity ids are appended to it
    /// percent-encoded. Dimensions are left at 0.
    pub fn into_image_reference(self, endpoint: &str) -> Result<ImageReference, String> {
        match self {
            UploadResponse::Items(shape) => {
                let item = shape
                    .items
                    .into_iter()
                    .next()
                    .ok_or_else(|| "upload response contained no items".to_string())?;
                let src = join_with_slash(endpoint, &item.url);
                Ok(ImageReference::new(item.entity_id, src))
            }
            UploadResponse::Entity(shape) => {
                let src = join_with_slash(endpoint, &urlencoding::encode(&shape.entity.id));
                Ok(ImageReference::new(shape.entity.id, src))
            }
        }
    }
}
