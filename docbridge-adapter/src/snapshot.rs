//! The engine's configuration as the adapter holds it.

use docbridge_runtime::EditorRuntime;
use docbridge_types::{normalize_document, PluginDescriptor};
use serde_json::{json, Value};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Width and height used when the host leaves them unset.
pub const DEFAULT_LENGTH: &str = "100%";

/// The document is shared with the [`ChangeSink`](crate::ChangeSink) so
/// engine edits land in the snapshot without going through the adapter.
pub(crate) type DocumentCell = Arc<Mutex<Option<Value>>>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything the engine is rendered with.
///
/// Cloning copies the current document; a clone does not follow later edits.
pub struct PropertySnapshot {
    document: DocumentCell,
    pub read_only: bool,
    pub disabled: bool,
    pub embedded: bool,
    /// CSS length.
    pub width: String,
    /// CSS length.
    pub height: String,
    pub debug: bool,
    /// Engine plugins, in the order they are enabled.
    pub plugins: Vec<PluginDescriptor>,
    /// Collaboration session id.
    pub doc_id: u64,
    pub fit_to_content: bool,
    pub placeholder: Option<String>,
    pub runtime: Arc<dyn EditorRuntime>,
}

impl PropertySnapshot {
    pub fn new(runtime: Arc<dyn EditorRuntime>) -> Self {
        Self {
            document: Arc::new(Mutex::new(None)),
            read_only: false,
            disabled: false,
            embedded: true,
            width: DEFAULT_LENGTH.to_string(),
            height: DEFAULT_LENGTH.to_string(),
            debug: false,
            plugins: Vec::new(),
            doc_id: 0,
            fit_to_content: false,
            placeholder: None,
            runtime,
        }
    }

    /// The current document; `None` when there is none.
    pub fn data(&self) -> Option<Value> {
        lock(&self.document).clone()
    }

    pub(crate) fn set_data(&self, data: Option<Value>) {
        *lock(&self.document) = normalize_document(data);
    }

    pub(crate) fn document_cell(&self) -> DocumentCell {
        Arc::clone(&self.document)
    }

    /// Whether the engine should accept edits.
    pub fn is_editable(&self) -> bool {
        !self.read_only && !self.disabled
    }

    /// The snapshot without its runtime, as JSON.
    pub fn to_json(&self) -> Value {
        json!({
            "data": self.data(),
            "readOnly": self.read_only,
            "disabled": self.disabled,
            "embedded": self.embedded,
            "width": self.width,
            "height": self.height,
            "debug": self.debug,
            "plugins": self.plugins,
            "docID": self.doc_id,
            "fitToContent": self.fit_to_content,
            "placeholder": self.placeholder,
        })
    }
}

impl Clone for PropertySnapshot {
    fn clone(&self) -> Self {
        Self {
            document: Arc::new(Mutex::new(self.data())),
            read_only: self.read_only,
            disabled: self.disabled,
            embedded: self.embedded,
            width: self.width.clone(),
            height: self.height.clone(),
            debug: self.debug,
            plugins: self.plugins.clone(),
            doc_id: self.doc_id,
            fit_to_content: self.fit_to_content,
            placeholder: self.placeholder.clone(),
            runtime: Arc::clone(&self.runtime),
        }
    }
}

impl fmt::Debug for PropertySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySnapshot")
            .field("data", &self.data())
            .field("read_only", &self.read_only)
            .field("disabled", &self.disabled)
            .field("embedded", &self.embedded)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("debug", &self.debug)
            .field("plugins", &self.plugins)
            .field("doc_id", &self.doc_id)
            .field("fit_to_content", &self.fit_to_content)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

/// Configuration inputs changed together by the host.
///
/// Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBatch {
    pub read_only: Option<bool>,
    pub embedded: Option<bool>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub debug: Option<bool>,
    pub plugins: Option<Vec<PluginDescriptor>>,
    pub doc_id: Option<u64>,
    pub fit_to_content: Option<bool>,
    pub placeholder: Option<String>,
}

impl InputBatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub(crate) fn normalize_length(length: String) -> String {
    if length.trim().is_empty() {
        DEFAULT_LENGTH.to_string()
    } else {
        length
    }
}

pub(crate) fn normalize_placeholder(placeholder: Option<String>) -> Option<String> {
    placeholder.filter(|text| !text.is_empty())
}
