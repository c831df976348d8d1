//! Session persistence for the edited document.

use crate::error::{AdapterError, AdapterResult};
use crate::snapshot::lock;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Key the document is stored under.
pub const DOCUMENT_KEY: &str = "docbridge.document";

/// A string key-value store scoped to one browsing session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> AdapterResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AdapterResult<()>;
    fn remove(&self, key: &str) -> AdapterResult<()>;
}

/// Keeps entries in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> AdapterResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AdapterResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AdapterResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Keeps entries in a single JSON file, rewritten on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(AdapterError::Session(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), "Opened session store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the entries and keeps it only once
    /// the copy is on disk. A change that reports `false` writes nothing.
    fn update(
        &self,
        change: impl FnOnce(&mut HashMap<String, String>) -> bool,
    ) -> AdapterResult<()> {
        let mut entries = lock(&self.entries);
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &HashMap<String, String>) -> AdapterResult<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents).map_err(|e| {
            AdapterError::Session(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> AdapterResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AdapterResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> AdapterResult<()> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

/// Reads and writes the document under [`DOCUMENT_KEY`].
#[derive(Clone)]
pub struct DocumentMirror {
    store: Arc<dyn SessionStore>,
}

impl DocumentMirror {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored document, if any.
    pub fn load(&self) -> AdapterResult<Option<Value>> {
        match self.store.get(DOCUMENT_KEY)? {
            Some(raw) => {
                let document: Value = serde_json::from_str(&raw)?;
                Ok(Some(document).filter(|d| !d.is_null()))
            }
            None => Ok(None),
        }
    }

    /// Stores `document`; `None` clears the entry.
    pub fn save(&self, document: Option<&Value>) -> AdapterResult<()> {
        match document {
            Some(document) => self.store.set(DOCUMENT_KEY, &serde_json::to_string(document)?),
            None => self.store.remove(DOCUMENT_KEY),
        }
    }
}
