//! Core error types for pomohero-core.
//!
//! Storage and collaborator failures are deliberately *not* represented
//! here in most public APIs: per the error-handling policy, peripheral
//! failures are logged and swallowed so they can never stall the timer.
//! These types cover the few places where an error is the caller's
//! business (invalid settings, explicit store construction).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomohero-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected settings update
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings { field: &'static str, message: String },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be determined or created
    #[error("Cannot use data directory: {0}")]
    DataDir(String),

    /// Reading or writing the backing file failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized for persistence
    #[error("Serialization failed for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
