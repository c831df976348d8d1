#![allow(dead_code)]

use async_trait::async_trait;
use docbridge_adapter::{
    ChangeSink, EditorAdapter, EmbeddedEngine, EngineError, HostAnchor, PropertySnapshot,
};
use docbridge_runtime::{EditorRuntime, RuntimeResult, StylesRuntime};
use docbridge_types::{ImageReference, StyleRecord, UploadFile};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Runtime with no network behind it.
pub struct StubRuntime;

#[async_trait]
impl EditorRuntime for StubRuntime {
    fn can_upload_image(&self) -> bool {
        true
    }

    async fn upload_image(&self, file: UploadFile) -> RuntimeResult<ImageReference> {
        Ok(ImageReference::new(file.file_name.clone(), format!("stub/{}", file.file_name)))
    }

    fn can_proxy_image_src(&self, _src: &str) -> bool {
        false
    }

    fn get_proxy_image_src(&self, src: &str) -> String {
        src.to_string()
    }
}

pub fn runtime() -> Arc<dyn EditorRuntime> {
    Arc::new(StubRuntime)
}

/// Runtime that also serves an in-memory style catalogue.
#[derive(Default)]
pub struct StyledRuntime {
    styles: Mutex<Vec<StyleRecord>>,
}

impl StyledRuntime {
    fn update(&self, change: impl FnOnce(&mut Vec<StyleRecord>)) -> Vec<StyleRecord> {
        let mut styles = self.styles.lock().unwrap();
        change(&mut styles);
        styles.clone()
    }
}

#[async_trait]
impl EditorRuntime for StyledRuntime {
    fn can_upload_image(&self) -> bool {
        false
    }

    async fn upload_image(&self, file: UploadFile) -> RuntimeResult<ImageReference> {
        StubRuntime.upload_image(file).await
    }

    fn can_proxy_image_src(&self, _src: &str) -> bool {
        false
    }

    fn get_proxy_image_src(&self, src: &str) -> String {
        src.to_string()
    }

    fn styles(&self) -> Option<&dyn StylesRuntime> {
        Some(self)
    }
}

#[async_trait]
impl StylesRuntime for StyledRuntime {
    async fn get_styles(&self) -> RuntimeResult<Vec<StyleRecord>> {
        Ok(self.update(|_| {}))
    }

    async fn save_style(&self, style: StyleRecord) -> RuntimeResult<Vec<StyleRecord>> {
        Ok(self.update(|styles| {
            styles.retain(|s| !s.is_named(&style.style_name));
            styles.push(style);
        }))
    }

    async fn rename_style(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> RuntimeResult<Vec<StyleRecord>> {
        Ok(self.update(|styles| {
            for style in styles.iter_mut().filter(|s| s.is_named(old_name)) {
                style.style_name = new_name.to_string();
            }
        }))
    }

    async fn remove_style(&self, name: &str) -> RuntimeResult<Vec<StyleRecord>> {
        Ok(self.update(|styles| styles.retain(|s| !s.is_named(name))))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Mount(Option<Value>),
    Patch(Option<Value>),
    Unmount(u32),
    FocusEnd(u32),
}

/// Engine that records every call and can be told to fail.
#[derive(Default)]
pub struct ScriptedEngine {
    pub calls: Vec<Call>,
    pub remount_only: bool,
    pub failing_mounts: u32,
    pub failing_patches: u32,
    pub sinks: Vec<ChangeSink>,
    /// What the engine was last rendered with.
    pub last_props: Option<PropertySnapshot>,
    /// The runtime the engine was mounted with.
    pub runtime: Option<Arc<dyn EditorRuntime>>,
    next_handle: u32,
}

impl ScriptedEngine {
    pub fn patching() -> Self {
        Self::default()
    }

    pub fn remounting() -> Self {
        Self {
            remount_only: true,
            ..Self::default()
        }
    }

    pub fn mounts(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Mount(_))).count()
    }

    pub fn patches(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Patch(_))).count()
    }

    pub fn unmounts(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Unmount(_))).count()
    }

    pub fn sink(&self) -> &ChangeSink {
        self.sinks.last().expect("engine was never mounted")
    }
}

impl EmbeddedEngine for ScriptedEngine {
    type Handle = u32;

    fn mount(
        &mut self,
        _anchor: &HostAnchor,
        props: &PropertySnapshot,
        sink: ChangeSink,
    ) -> Result<u32, EngineError> {
        self.calls.push(Call::Mount(props.data()));
        if self.failing_mounts > 0 {
            self.failing_mounts -= 1;
            return Err(EngineError::new("anchor not attached"));
        }
        self.sinks.push(sink);
        self.runtime = Some(Arc::clone(&props.runtime));
        self.last_props = Some(props.clone());
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn supports_patch(&self, _handle: &u32) -> bool {
        !self.remount_only
    }

    fn patch(&mut self, _handle: &mut u32, props: &PropertySnapshot) -> Result<(), EngineError> {
        self.calls.push(Call::Patch(props.data()));
        if self.failing_patches > 0 {
            self.failing_patches -= 1;
            return Err(EngineError::new("instance lost"));
        }
        self.last_props = Some(props.clone());
        Ok(())
    }

    fn unmount(&mut self, handle: u32) {
        self.calls.push(Call::Unmount(handle));
    }

    fn focus_end(&mut self, handle: &mut u32) {
        self.calls.push(Call::FocusEnd(*handle));
    }
}

pub fn adapter(engine: ScriptedEngine) -> EditorAdapter<ScriptedEngine> {
    EditorAdapter::new(HostAnchor::new("editor"), engine, runtime())
}

pub fn doc(text: &str) -> Value {
    serde_json::json!({
        "type": "doc",
        "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": text }] }]
    })
}

pub fn empty_doc() -> Value {
    serde_json::json!({ "type": "doc", "content": [{ "type": "paragraph" }] })
}

/// Collects every value and touched event the host receives, in order.
#[derive(Clone, Default)]
pub struct HostLog(pub Arc<Mutex<Vec<String>>>);

impl HostLog {
    pub fn attach<E: EmbeddedEngine>(&self, adapter: &mut EditorAdapter<E>) {
        let changes = self.clone();
        adapter.register_on_change(move |value| changes.push(format!("change:{}", render(&value))));
        let touches = self.clone();
        adapter.register_on_touched(move || touches.push("touched".to_string()));
    }

    pub fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn render(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}
