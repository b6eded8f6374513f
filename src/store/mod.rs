//! Flat key/value storage behind the engine's persistence needs
//!
//! Two instances back the engine: an extension-scoped store for the currency
//! preferences and a page-local store for the cached rate table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Narrow persistence capability: string keys, string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile store for tests and hosts that bring their own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Store persisted as a single JSON object on disk, written through on every
/// change. Write failures are logged and otherwise absorbed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let values = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        Ok(Self { path, values })
    }

    fn flush(&self) {
        let data = match serde_json::to_string(&self.values) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("failed to serialize store: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, data) {
            tracing::warn!("failed to write store {}: {e}", self.path.display());
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.flush();
    }
}
