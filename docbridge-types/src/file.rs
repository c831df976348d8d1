//! Content service file types.

use serde::{Deserialize, Serialize};

/// Metadata for a file stored by the content service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Path of the file relative to the content endpoint.
    pub url: String,
    /// Identifier assigned by the content service.
    pub entity_id: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub file_name: String,
}

/// A binary file handed to the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, sent as the multipart filename.
    pub file_name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates an upload payload without a MIME type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true when the payload has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
