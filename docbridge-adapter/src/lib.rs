//! Embedding adapter for docbridge.
//!
//! The host shell speaks a synchronous form-control contract: it writes a
//! value, toggles the disabled flag, changes configuration inputs in
//! batches and expects change and touched callbacks. The engine has its own
//! mount / patch / unmount lifecycle. [`EditorAdapter`] keeps one
//! [`PropertySnapshot`] between the two and turns every host batch into at
//! most one render pass.
//!
//! Engine edits flow back through the [`ChangeSink`] handed over at mount.
//! [`HeadlessEngine`] is an in-memory engine used by the playground and in
//! tests; [`DocumentMirror`] keeps the current document in a
//! [`SessionStore`] so it survives a reload.

mod adapter;
mod engine;
mod error;
mod headless;
mod session;
mod sink;
mod snapshot;

pub use adapter::{AdapterState, ClickTarget, EditorAdapter};
pub use engine::{EmbeddedEngine, EmbeddedInstanceHandle, EngineError, HostAnchor, RenderStrategy};
pub use error::{AdapterError, AdapterResult};
pub use headless::{EngineStats, EngineVariant, HeadlessEngine, HeadlessHandle};
pub use session::{
    DocumentMirror, FileSessionStore, MemorySessionStore, SessionStore, DOCUMENT_KEY,
};
pub use sink::{ChangeSink, EditorChange, HostCallbacks};
pub use snapshot::{InputBatch, PropertySnapshot, DEFAULT_LENGTH};
