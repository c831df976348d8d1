//! An in-memory engine with no rendering.

use crate::engine::{EmbeddedEngine, EngineError, HostAnchor};
use crate::sink::{ChangeSink, EditorChange};
use crate::snapshot::PropertySnapshot;
use docbridge_types::is_empty_document;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// How the headless engine takes new properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineVariant {
    /// Mounted instances accept property patches.
    Patching,
    /// Every render remounts.
    RemountOnly,
}

/// Lifecycle counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub mounts: u64,
    pub patches: u64,
    pub unmounts: u64,
    pub focus_requests: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessHandle {
    id: u64,
    variant: EngineVariant,
}

struct Instance {
    anchor: HostAnchor,
    document: Option<Value>,
    editable: bool,
    cursor_at_end: bool,
    sink: ChangeSink,
}

/// Holds a copy of the document for every mounted anchor.
pub struct HeadlessEngine {
    variant: EngineVariant,
    instances: HashMap<u64, Instance>,
    next_id: u64,
    stats: EngineStats,
}

impl HeadlessEngine {
    pub fn new(variant: EngineVariant) -> Self {
        Self {
            variant,
            instances: HashMap::new(),
            next_id: 1,
            stats: EngineStats::default(),
        }
    }

    pub fn variant(&self) -> EngineVariant {
        self.variant
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn is_mounted(&self, anchor: &HostAnchor) -> bool {
        self.instance(anchor).is_some()
    }

    /// The engine's copy of the document mounted at `anchor`.
    pub fn document(&self, anchor: &HostAnchor) -> Option<Value> {
        self.instance(anchor).and_then(|i| i.document.clone())
    }

    /// Whether the cursor was last moved to the end of the document.
    pub fn cursor_at_end(&self, anchor: &HostAnchor) -> bool {
        self.instance(anchor).is_some_and(|i| i.cursor_at_end)
    }

    /// Simulates a user replacing the document at `anchor`.
    pub fn edit(&mut self, anchor: &HostAnchor, document: Value) -> Result<(), EngineError> {
        let instance = self
            .instances
            .values_mut()
            .find(|i| &i.anchor == anchor)
            .ok_or_else(|| EngineError::new(format!("nothing mounted at '{anchor}'")))?;

        if !instance.editable {
            return Err(EngineError::new(format!("editor at '{anchor}' is not editable")));
        }

        let is_empty = is_empty_document(&document);
        instance.document = Some(document.clone());
        instance.cursor_at_end = false;
        let sink = instance.sink.clone();

        sink.emit(EditorChange {
            data: Some(document),
            is_empty,
        });
        Ok(())
    }

    fn instance(&self, anchor: &HostAnchor) -> Option<&Instance> {
        self.instances.values().find(|i| &i.anchor == anchor)
    }
}

impl EmbeddedEngine for HeadlessEngine {
    type Handle = HeadlessHandle;

    fn mount(
        &mut self,
        anchor: &HostAnchor,
        props: &PropertySnapshot,
        sink: ChangeSink,
    ) -> Result<HeadlessHandle, EngineError> {
        let id = self.next_id;
        self.next_id += 1;
        self.instances.insert(
            id,
            Instance {
                anchor: anchor.clone(),
                document: props.data(),
                editable: props.is_editable(),
                cursor_at_end: false,
                sink,
            },
        );
        self.stats.mounts += 1;
        debug!(anchor = %anchor, id, "Headless editor mounted");
        Ok(HeadlessHandle {
            id,
            variant: self.variant,
        })
    }

    fn supports_patch(&self, handle: &HeadlessHandle) -> bool {
        handle.variant == EngineVariant::Patching
    }

    fn patch(
        &mut self,
        handle: &mut HeadlessHandle,
        props: &PropertySnapshot,
    ) -> Result<(), EngineError> {
        let instance = self
            .instances
            .get_mut(&handle.id)
            .ok_or_else(|| EngineError::new(format!("instance {} is gone", handle.id)))?;
        instance.document = props.data();
        instance.editable = props.is_editable();
        self.stats.patches += 1;
        Ok(())
    }

    fn unmount(&mut self, handle: HeadlessHandle) {
        if self.instances.remove(&handle.id).is_some() {
            self.stats.unmounts += 1;
        }
    }

    fn focus_end(&mut self, handle: &mut HeadlessHandle) {
        if let Some(instance) = self.instances.get_mut(&handle.id) {
            instance.cursor_at_end = true;
            self.stats.focus_requests += 1;
        }
    }
}
