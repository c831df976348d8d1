//! Core type definitions for docbridge.
//!
//! This crate defines the plain data exchanged between the host shell, the
//! embedded editing engine and the content services:
//! - Image references handed back to the engine after an upload
//! - File metadata and upload payloads for the content service
//! - Style records for the style service
//! - Plugin descriptors forwarded to the engine
//! - Helpers for inspecting opaque documents and joining URL paths
//!
//! The document itself stays an opaque `serde_json::Value`; its schema
//! belongs to the engine, not here.

mod document;
mod file;
mod image;
mod path;
mod plugin;
mod style;

pub use document::{is_empty_document, normalize_document, Document};
pub use file::{FileMeta, UploadFile};
pub use image::ImageReference;
pub use path::{join_with_slash, resolve_url, slash};
pub use url::ParseError as UrlError;
pub use plugin::PluginDescriptor;
pub use style::StyleRecord;
