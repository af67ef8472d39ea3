//! In-memory storage backend.
//!
//! Used by tests and as the degraded runtime mode when the data directory
//! is unusable: the app keeps its state for the session and loses it on
//! exit, which beats refusing to run.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::StorageBackend;
use crate::error::StorageError;

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
