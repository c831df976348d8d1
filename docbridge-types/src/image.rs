use serde::{Deserialize, Serialize};

/// Reference to an uploaded image, in the shape the engine expects.
///
/// The pipeline never probes image dimensions, so `width` and `height` are
/// reported as 0 and the engine measures the image itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub id: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl ImageReference {
    /// Creates a reference with unknown (zero) dimensions.
    #[must_use]
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            width: 0,
            height: 0,
        }
    }
}
