//! Composition root for the docbridge playground.
//!
//! [`Playground`] wires one credential cache, upload pipeline, style store
//! and runtime facade to a headless editor, the same way a host shell wires
//! them to a real engine.

use anyhow::{Context, Result};
use docbridge_adapter::{
    DocumentMirror, EditorAdapter, EngineVariant, FileSessionStore, HeadlessEngine, HostAnchor,
    MemorySessionStore, SessionStore,
};
use docbridge_auth::{AuthConfig, CredentialCache};
use docbridge_content::{ContentConfig, UploadPipeline};
use docbridge_runtime::{
    EditorRuntime, ProxyRules, RuntimeFacade, StyleConfig, StyleStore, StylesRuntime,
};
use docbridge_types::{FileMeta, ImageReference, StyleRecord, UploadFile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Which headless engine the playground mounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Patches properties in place.
    #[default]
    Patching,
    /// Remounts on every render.
    RemountOnly,
}

impl From<EngineKind> for EngineVariant {
    fn from(kind: EngineKind) -> Self {
        match kind {
            EngineKind::Patching => EngineVariant::Patching,
            EngineKind::RemountOnly => EngineVariant::RemountOnly,
        }
    }
}

/// Everything the playground needs to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub auth: AuthConfig,
    pub content: ContentConfig,
    pub styles: StyleConfig,
    pub proxy: ProxyRules,
    pub engine: EngineKind,
    /// Host element id the editor mounts into.
    pub anchor: String,
    /// Session file. Without one the session lives in memory.
    pub session_path: Option<PathBuf>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            content: ContentConfig::default(),
            styles: StyleConfig::default(),
            proxy: ProxyRules::default(),
            engine: EngineKind::default(),
            anchor: "editor".to_string(),
            session_path: None,
        }
    }
}

impl PlaygroundConfig {
    /// Reads the config from a JSON file, or returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// What `edit` should do to the editor.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub document: Option<Value>,
    pub read_only: bool,
    pub disabled: bool,
}

pub struct Playground {
    config: PlaygroundConfig,
    credentials: Arc<CredentialCache>,
    uploads: Arc<UploadPipeline>,
    styles: Arc<StyleStore>,
    runtime: Arc<RuntimeFacade>,
    editor: EditorAdapter<HeadlessEngine>,
}

impl Playground {
    pub fn new(config: PlaygroundConfig) -> Result<Self> {
        let credentials = Arc::new(
            CredentialCache::new(config.auth.clone()).context("failed to set up credentials")?,
        );
        let uploads = Arc::new(UploadPipeline::new(
            Arc::clone(&credentials),
            config.content.clone(),
        ));
        let styles = Arc::new(StyleStore::new(
            config.styles.clone(),
            credentials.client().clone(),
        ));
        let runtime = Arc::new(
            RuntimeFacade::new(Arc::clone(&uploads))
                .with_styles(Arc::clone(&styles))
                .with_proxy_rules(config.proxy.clone()),
        );

        let store: Arc<dyn SessionStore> = match &config.session_path {
            Some(path) => Arc::new(FileSessionStore::open(path).context("failed to open session")?),
            None => Arc::new(MemorySessionStore::new()),
        };
        let editor_runtime: Arc<dyn EditorRuntime> = runtime.clone();
        let editor = EditorAdapter::new(
            HostAnchor::new(config.anchor.clone()),
            HeadlessEngine::new(config.engine.into()),
            editor_runtime,
        )
        .with_mirror(DocumentMirror::new(store));

        debug!(anchor = %config.anchor, engine = ?config.engine, "Playground ready");

        Ok(Self {
            config,
            credentials,
            uploads,
            styles,
            runtime,
            editor,
        })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    pub fn uploads(&self) -> &Arc<UploadPipeline> {
        &self.uploads
    }

    pub fn runtime(&self) -> &Arc<RuntimeFacade> {
        &self.runtime
    }

    pub fn editor(&self) -> &EditorAdapter<HeadlessEngine> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorAdapter<HeadlessEngine> {
        &mut self.editor
    }

    /// Uploads the file at `path` through the editor's runtime.
    pub async fn upload_path(&self, path: &Path) -> Result<ImageReference> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut file = UploadFile::new(file_name, bytes);
        if let Some(mime) = mime_type(path) {
            file = file.with_mime_type(mime);
        }

        let image = self.runtime.upload_image(file).await?;
        Ok(image)
    }

    pub async fn list_files(&self) -> Result<Vec<FileMeta>> {
        Ok(self.uploads.list_files().await?)
    }

    pub async fn delete_file(&self, entity_id: &str) -> Result<()> {
        Ok(self.uploads.delete_file(entity_id).await?)
    }

    pub async fn styles(&self) -> Result<Vec<StyleRecord>> {
        Ok(self.styles.get_styles().await?)
    }

    /// Mounts the editor with the session document, applies `options` in one
    /// host change cycle and returns the resulting snapshot.
    pub fn edit(&mut self, options: EditOptions) -> Result<Value> {
        let EditOptions {
            document,
            read_only,
            disabled,
        } = options;

        self.editor
            .batch(|editor| {
                if editor.restore_from_session()? {
                    info!("Restored document from session");
                }
                if document.is_some() {
                    editor.set_value(document)?;
                }
                editor.set_read_only(read_only);
                editor.set_disabled(disabled)?;
                editor.inputs_changed()
            })
            .context("failed to render editor")?;

        Ok(self.editor.snapshot().to_json())
    }
}

/// Guesses an image MIME type from the file extension.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}
