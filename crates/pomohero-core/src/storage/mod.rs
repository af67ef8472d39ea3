//! Persistent key-value storage.
//!
//! Every piece of durable state lives under one of the well-known keys in
//! [`keys`], as an independently keyed JSON value. The [`Store`] is the
//! single source of truth; in-memory state elsewhere in the crate is a
//! cache rehydrated on load.
//!
//! Failure policy: a read or parse failure falls back to the caller's
//! default, a write failure is logged and swallowed. Neither is ever
//! allowed to surface into the timer's transition logic. Writes are
//! synchronous and unbuffered -- local storage is assumed fast.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::StorageError;

/// Well-known storage keys. One entry per key, JSON-serializable.
pub mod keys {
    pub const SETTINGS: &str = "pomodoroSettings";
    pub const COMPLETED_POMODOROS: &str = "completedPomodoros";
    pub const TOTAL_FOCUS_TIME: &str = "totalFocusTime";
    pub const DAILY_STREAK: &str = "dailyStreak";
    pub const LAST_ACTIVE_DATE: &str = "lastActiveDate";
    pub const ACHIEVEMENTS: &str = "achievements";
    pub const TASKS: &str = "pomodoroTasks";
}

/// Returns `~/.config/pomohero[-dev]/` based on POMOHERO_ENV.
///
/// Set POMOHERO_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOHERO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomohero-dev")
    } else {
        base_dir.join("pomohero")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Raw storage access. Implementations use interior mutability; the store
/// is only ever touched from a single logical session (no locking).
pub trait StorageBackend {
    /// Read the raw JSON value under `key`, if present.
    fn read(&self, key: &str) -> Option<serde_json::Value>;

    /// Write the JSON value under `key`, durably and synchronously.
    fn write(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;
}

/// Typed key-value store injected into each component.
///
/// There is no ambient/global instance: whoever needs persistence takes a
/// `&Store` explicitly.
pub struct Store {
    backend: Box<dyn StorageBackend>,
}

impl Store {
    /// Open the file-backed store in the default data directory.
    ///
    /// If the data directory is unusable the store degrades to a purely
    /// in-memory backend so the timer keeps working for this session.
    pub fn open() -> Self {
        match data_dir().and_then(|dir| JsonFileStore::open(dir.join("store.json"))) {
            Ok(backend) => Self {
                backend: Box::new(backend),
            },
            Err(e) => {
                tracing::warn!("falling back to in-memory storage: {e}");
                Self::in_memory()
            }
        }
    }

    /// A store that persists nothing beyond this process. Used in tests
    /// and as the degraded mode when local storage is unavailable.
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryStore::default()),
        }
    }

    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Typed read. `None` when the key is absent or the stored value does
    /// not deserialize (the malformed value is left in place and logged).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.read(key)?;
        match serde_json::from_value(raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("malformed value under '{key}', using default: {e}");
                None
            }
        }
    }

    /// Typed read with a fallback default.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Typed write. Failures are logged and swallowed; the caller's
    /// in-memory copy stays authoritative for the rest of the session.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("cannot serialize value for '{key}': {e}");
                return;
            }
        };
        if let Err(e) = self.backend.write(key, raw) {
            tracing::warn!("write failed for '{key}', continuing in-memory: {e}");
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_falls_back_when_key_absent() {
        let store = Store::in_memory();
        assert_eq!(store.get_or(keys::DAILY_STREAK, 0u32), 0);
    }

    #[test]
    fn get_or_falls_back_on_malformed_value() {
        let store = Store::in_memory();
        store.set(keys::DAILY_STREAK, &"not a number");
        assert_eq!(store.get_or(keys::DAILY_STREAK, 7u32), 7);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = Store::in_memory();
        store.set(keys::COMPLETED_POMODOROS, &42u64);
        assert_eq!(store.get::<u64>(keys::COMPLETED_POMODOROS), Some(42));
    }

    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn read(&self, _key: &str) -> Option<serde_json::Value> {
            None
        }
        fn write(&self, key: &str, _value: serde_json::Value) -> Result<(), StorageError> {
            Err(StorageError::Serialize {
                key: key.to_string(),
                source: serde_json::from_str::<u8>("x").unwrap_err(),
            })
        }
    }

    #[test]
    fn write_failure_is_swallowed() {
        let store = Store::with_backend(Box::new(FailingBackend));
        // Must not panic or surface the error.
        store.set(keys::TOTAL_FOCUS_TIME, &100u64);
        assert_eq!(store.get::<u64>(keys::TOTAL_FOCUS_TIME), None);
    }
}
