//! Change notification from the engine back to the host.

use crate::snapshot::{lock, DocumentCell};
use docbridge_types::normalize_document;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex};

type ChangeCallback = Arc<dyn Fn(Option<Value>) + Send + Sync>;
type TouchedCallback = Arc<dyn Fn() + Send + Sync>;

/// An edit reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorChange {
    pub data: Option<Value>,
    /// True when the document has no visible content.
    pub is_empty: bool,
}

/// The host's change and touched callbacks. Both default to no-ops.
#[derive(Clone)]
pub struct HostCallbacks {
    on_change: ChangeCallback,
    on_touched: TouchedCallback,
}

impl Default for HostCallbacks {
    fn default() -> Self {
        Self {
            on_change: Arc::new(|_: Option<Value>| {}),
            on_touched: Arc::new(|| {}),
        }
    }
}

impl HostCallbacks {
    pub(crate) fn set_on_change(&mut self, callback: impl Fn(Option<Value>) + Send + Sync + 'static) {
        self.on_change = Arc::new(callback);
    }

    pub(crate) fn set_on_touched(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_touched = Arc::new(callback);
    }
}

/// Handed to the engine at mount; reports edits to the adapter and host.
#[derive(Clone)]
pub struct ChangeSink {
    document: DocumentCell,
    callbacks: Arc<Mutex<HostCallbacks>>,
}

impl ChangeSink {
    pub(crate) fn new(document: DocumentCell, callbacks: Arc<Mutex<HostCallbacks>>) -> Self {
        Self {
            document,
            callbacks,
        }
    }

    /// Records `change` in the snapshot, then calls the host's change
    /// callback (with `None` for an empty document) and its touched callback.
    pub fn emit(&self, change: EditorChange) {
        let data = normalize_document(change.data);
        *lock(&self.document) = data.clone();

        // Callbacks run without the lock so they may re-register.
        let callbacks = lock(&self.callbacks).clone();
        (callbacks.on_change)(if change.is_empty { None } else { data });
        (callbacks.on_touched)();
    }
}

impl fmt::Debug for ChangeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSink")
            .field("document", &*lock(&self.document))
            .finish_non_exhaustive()
    }
}
