//! The form-control adapter around an embedded engine.

use crate::engine::{EmbeddedEngine, EmbeddedInstanceHandle, HostAnchor, RenderStrategy};
use crate::error::{AdapterError, AdapterResult};
use crate::session::DocumentMirror;
use crate::sink::{ChangeSink, HostCallbacks};
use crate::snapshot::{
    lock, normalize_length, normalize_placeholder, InputBatch, PropertySnapshot,
};
use docbridge_runtime::EditorRuntime;
use docbridge_types::{normalize_document, PluginDescriptor};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Whether an engine instance is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Unmounted,
    Mounted,
}

/// Where inside the host a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// On the editable surface; the engine handles it.
    EditingSurface,
    /// Inside the editor frame but outside the editable surface.
    Frame,
    /// Elsewhere on the page.
    Outside,
}

/// Presents an [`EmbeddedEngine`] to the host as a form control.
///
/// Every host mutation patches one [`PropertySnapshot`]. Value and disabled
/// changes render immediately unless a [`batch`](EditorAdapter::batch) is
/// open, in which case all render requests of the batch collapse into one
/// pass when it closes.
pub struct EditorAdapter<E: EmbeddedEngine> {
    anchor: HostAnchor,
    engine: E,
    props: PropertySnapshot,
    instance: Option<EmbeddedInstanceHandle<E::Handle>>,
    callbacks: Arc<Mutex<HostCallbacks>>,
    mirror: Option<DocumentMirror>,
    batch_depth: usize,
    render_pending: bool,
    render_count: u64,
}

impl<E: EmbeddedEngine> EditorAdapter<E> {
    /// Attaches to `anchor`. Nothing is mounted until the first render.
    pub fn new(anchor: HostAnchor, engine: E, runtime: Arc<dyn EditorRuntime>) -> Self {
        Self {
            anchor,
            engine,
            props: PropertySnapshot::new(runtime),
            instance: None,
            callbacks: Arc::new(Mutex::new(HostCallbacks::default())),
            mirror: None,
            batch_depth: 0,
            render_pending: false,
            render_count: 0,
        }
    }

    /// Mirrors every value written by the host into `mirror`.
    #[must_use]
    pub fn with_mirror(mut self, mirror: DocumentMirror) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn anchor(&self) -> &HostAnchor {
        &self.anchor
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn snapshot(&self) -> &PropertySnapshot {
        &self.props
    }

    pub fn instance(&self) -> Option<&EmbeddedInstanceHandle<E::Handle>> {
        self.instance.as_ref()
    }

    pub fn state(&self) -> AdapterState {
        if self.instance.is_some() {
            AdapterState::Mounted
        } else {
            AdapterState::Unmounted
        }
    }

    /// Number of render passes run so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    // ================================================================
    // Form-control contract
    // ================================================================

    /// Replaces the document. A JSON `null` clears it.
    pub fn set_value(&mut self, content: Option<Value>) -> AdapterResult<()> {
        let content = normalize_document(content);
        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.save(content.as_ref()) {
                warn!(anchor = %self.anchor, error = %e, "Failed to mirror document");
            }
        }
        self.props.set_data(content);
        self.request_render()
    }

    pub fn set_disabled(&mut self, disabled: bool) -> AdapterResult<()> {
        self.props.disabled = disabled;
        self.request_render()
    }

    pub fn register_on_change(&mut self, callback: impl Fn(Option<Value>) + Send + Sync + 'static) {
        lock(&self.callbacks).set_on_change(callback);
    }

    pub fn register_on_touched(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        lock(&self.callbacks).set_on_touched(callback);
    }

    // ================================================================
    // Configuration inputs
    // ================================================================

    pub fn set_read_only(&mut self, read_only: bool) {
        self.props.read_only = read_only;
    }

    pub fn set_embedded(&mut self, embedded: bool) {
        self.props.embedded = embedded;
    }

    /// An empty width falls back to `100%`.
    pub fn set_width(&mut self, width: impl Into<String>) {
        self.props.width = normalize_length(width.into());
    }

    /// An empty height falls back to `100%`.
    pub fn set_height(&mut self, height: impl Into<String>) {
        self.props.height = normalize_length(height.into());
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.props.debug = debug;
    }

    pub fn set_plugins(&mut self, plugins: Vec<PluginDescriptor>) {
        self.props.plugins = plugins;
    }

    pub fn set_doc_id(&mut self, doc_id: u64) {
        self.props.doc_id = doc_id;
    }

    pub fn set_fit_to_content(&mut self, fit_to_content: bool) {
        self.props.fit_to_content = fit_to_content;
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.props.placeholder = normalize_placeholder(placeholder);
    }

    /// Marks the end of a round of input changes and renders once.
    pub fn inputs_changed(&mut self) -> AdapterResult<()> {
        self.request_render()
    }

    /// Applies every set field of `inputs`, then renders once.
    pub fn apply_inputs(&mut self, inputs: InputBatch) -> AdapterResult<()> {
        let InputBatch {
            read_only,
            embedded,
            width,
            height,
            debug,
            plugins,
            doc_id,
            fit_to_content,
            placeholder,
        } = inputs;

        if let Some(read_only) = read_only {
            self.set_read_only(read_only);
        }
        if let Some(embedded) = embedded {
            self.set_embedded(embedded);
        }
        if let Some(width) = width {
            self.set_width(width);
        }
        if let Some(height) = height {
            self.set_height(height);
        }
        if let Some(debug) = debug {
            self.set_debug(debug);
        }
        if let Some(plugins) = plugins {
            self.set_plugins(plugins);
        }
        if let Some(doc_id) = doc_id {
            self.set_doc_id(doc_id);
        }
        if let Some(fit_to_content) = fit_to_content {
            self.set_fit_to_content(fit_to_content);
        }
        if placeholder.is_some() {
            self.set_placeholder(placeholder);
        }
        self.inputs_changed()
    }

    /// Runs `f` as one host change cycle.
    ///
    /// Render requests made inside `f` are deferred; if there were any, one
    /// pass runs when the outermost batch closes. Batches nest.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> AdapterResult<R>) -> AdapterResult<R> {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;

        if self.batch_depth == 0 && std::mem::take(&mut self.render_pending) {
            self.render()?;
        }
        result
    }

    // ================================================================
    // Lifecycle
    // ================================================================

    /// Unmounts the engine instance, if any. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.engine.unmount(instance.into_inner());
            info!(anchor = %self.anchor, "Editor unmounted");
        }
    }

    /// Moves focus to the end of the document when the click landed in the
    /// frame around the editing surface. Returns whether focus moved.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        if target != ClickTarget::Frame {
            return false;
        }
        match self.instance.as_mut() {
            Some(instance) => {
                self.engine.focus_end(instance.inner_mut());
                debug!(anchor = %self.anchor, "Focused end of document");
                true
            }
            None => false,
        }
    }

    /// Loads the mirrored document, if any, and applies it as the value.
    /// Returns whether a document was restored.
    pub fn restore_from_session(&mut self) -> AdapterResult<bool> {
        let restored = match &self.mirror {
            Some(mirror) => mirror.load()?,
            None => return Ok(false),
        };
        match restored {
            Some(document) => {
                info!(anchor = %self.anchor, "Restoring document from session");
                self.set_value(Some(document))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ================================================================
    // Rendering
    // ================================================================

    fn request_render(&mut self) -> AdapterResult<()> {
        if self.batch_depth > 0 {
            self.render_pending = true;
            Ok(())
        } else {
            self.render()
        }
    }

    fn render(&mut self) -> AdapterResult<()> {
        self.render_count += 1;

        let Some(mut instance) = self.instance.take() else {
            return self.mount();
        };

        match instance.strategy() {
            RenderStrategy::Patch => match self.engine.patch(instance.inner_mut(), &self.props) {
                Ok(()) => {
                    debug!(anchor = %self.anchor, "Editor patched");
                    self.instance = Some(instance);
                    Ok(())
                }
                Err(e) => {
                    warn!(anchor = %self.anchor, error = %e, "Patch failed, remounting");
                    self.engine.unmount(instance.into_inner());
                    self.mount()
                }
            },
            RenderStrategy::Remount => {
                self.engine.unmount(instance.into_inner());
                self.mount()
            }
        }
    }

    fn mount(&mut self) -> AdapterResult<()> {
        let sink = ChangeSink::new(self.props.document_cell(), Arc::clone(&self.callbacks));

        match self.engine.mount(&self.anchor, &self.props, sink) {
            Ok(handle) => {
                let strategy = if self.engine.supports_patch(&handle) {
                    RenderStrategy::Patch
                } else {
                    RenderStrategy::Remount
                };
                debug!(anchor = %self.anchor, strategy = ?strategy, "Editor mounted");
                self.instance = Some(EmbeddedInstanceHandle::new(handle, strategy));
                Ok(())
            }
            Err(e) => {
                warn!(anchor = %self.anchor, error = %e, "Editor mount failed");
                Err(AdapterError::MountFailed(e.0))
            }
        }
    }
}

impl<E: EmbeddedEngine> Drop for EditorAdapter<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
