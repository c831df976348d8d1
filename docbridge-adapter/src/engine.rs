//! The contract between the adapter and an embedded engine.

use crate::sink::ChangeSink;
use crate::snapshot::PropertySnapshot;
use std::fmt;
use thiserror::Error;

/// Failure reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The host element the engine renders into. Fixed for the adapter's life.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostAnchor(String);

impl HostAnchor {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an already mounted instance receives new properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Properties are applied to the live instance.
    Patch,
    /// The instance is torn down and mounted again.
    Remount,
}

/// A rendering engine that owns its own lifecycle.
///
/// The engine only ever borrows the snapshot for the duration of a call.
/// Edits made by the user are reported through the [`ChangeSink`] given to
/// [`mount`](EmbeddedEngine::mount).
pub trait EmbeddedEngine {
    /// The engine's reference to a mounted instance.
    type Handle;

    fn mount(
        &mut self,
        anchor: &HostAnchor,
        props: &PropertySnapshot,
        sink: ChangeSink,
    ) -> Result<Self::Handle, EngineError>;

    /// Whether `handle` accepts [`patch`](EmbeddedEngine::patch). Asked once
    /// per mount.
    fn supports_patch(&self, handle: &Self::Handle) -> bool;

    fn patch(&mut self, handle: &mut Self::Handle, props: &PropertySnapshot)
    -> Result<(), EngineError>;

    fn unmount(&mut self, handle: Self::Handle);

    /// Moves the cursor to the end of the document and focuses the editor.
    fn focus_end(&mut self, _handle: &mut Self::Handle) {}
}

/// A mounted instance together with the strategy probed at mount.
#[derive(Debug)]
pub struct EmbeddedInstanceHandle<H> {
    inner: H,
    strategy: RenderStrategy,
}

impl<H> EmbeddedInstanceHandle<H> {
    pub(crate) fn new(inner: H, strategy: RenderStrategy) -> Self {
        Self { inner, strategy }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    pub(crate) fn into_inner(self) -> H {
        self.inner
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }
}
