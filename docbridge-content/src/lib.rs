//! Content service client for docbridge.
//!
//! The [`UploadPipeline`] uploads images for the embedded engine and
//! normalises whichever response shape the active backend returns into an
//! [`ImageReference`](docbridge_types::ImageReference). It also lists and
//! deletes stored files for the host shell's file sidebar.
//!
//! Successful uploads are broadcast to [`UploadPipeline::subscribe`]rs so
//! observers outside the engine can react to them.

mod config;
mod error;
mod pipeline;
mod response;

pub use config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use pipeline::UploadPipeline;
pub use response::{EntityShape, ItemsShape, UploadResponse, UploadedEntity};
