//! File-backed storage: one JSON object holding every key.
//!
//! The whole map is rewritten on each `write`. That is deliberate -- the
//! payload is a handful of small values and the write must be durable
//! before the call returns (no buffering, no retry queue).

use std::cell::RefCell;
use std::path::PathBuf;

use serde_json::{Map, Value};

use super::StorageBackend;
use crate::error::StorageError;

pub struct JsonFileStore {
    path: PathBuf,
    cache: RefCell<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing content.
    ///
    /// A missing file starts empty. A file that exists but does not parse
    /// also starts empty (it will be overwritten on the next write) -- a
    /// corrupt store must never prevent startup.
    ///
    /// # Errors
    /// Returns an error only when the file exists but cannot be read at
    /// the IO level.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let cache = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("store file {} is corrupt, starting empty: {e}", path.display());
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        Ok(Self {
            path,
            cache: RefCell::new(cache),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(&*self.cache.borrow()).map_err(|source| {
                StorageError::Serialize {
                    key: "<store>".to_string(),
                    source,
                }
            })?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl StorageBackend for JsonFileStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.cache.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.cache.borrow_mut().insert(key.to_string(), value);
        self.flush()
    }
}
