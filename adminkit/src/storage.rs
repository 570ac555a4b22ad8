// adminkit/src/storage.rs
//
// Key-value storage standing in for the browser's local storage. The session
// keys are the only state that survives a restart.
//

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::AdminError;

pub const AUTH_USER_KEY: &str = "auth_user";
pub const AUTH_TOKEN_KEY: &str = "auth_token";

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AdminError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AdminError>;
    fn remove(&self, key: &str) -> Result<(), AdminError>;
}

/// Volatile storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AdminError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AdminError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AdminError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AdminError> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    AdminError::StorageError(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened storage {} with {} keys", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), AdminError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| AdminError::StorageError(e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AdminError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    // Changes are staged on a copy and only committed once the file is written.
    fn set(&self, key: &str, value: &str) -> Result<(), AdminError> {
        let mut entries = self.entries.lock();
        let mut staged = entries.clone();
        staged.insert(key.to_string(), value.to_string());
        self.flush(&staged)?;
        *entries = staged;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AdminError> {
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut staged = entries.clone();
        staged.remove(key);
        self.flush(&staged)?;
        *entries = staged;
        Ok(())
    }
}

pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStorage>, AdminError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::File => {
            info!("Using file storage at {}", config.path.display());
            Ok(Arc::new(FileStorage::open(&config.path)?))
        }
    }
}
