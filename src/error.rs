//! Error types for the wallpaper-archive crate.

use std::path::Path;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
///
/// The transport and API layers raise these; [`WallpaperClient`] swallows
/// them at its boundary and surfaces `None` instead.
///
/// [`WallpaperClient`]: crate::client::WallpaperClient
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, DNS, or transport failure below HTTP.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded its configured timeout and was aborted.
    #[error("request timed out")]
    Timeout,

    /// Non-success HTTP status from the archive.
    #[error("HTTP status {status}")]
    Status {
        /// The numeric status code.
        status: u16,
    },

    /// Response body was not valid JSON, or did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Persisted cache value could not be decoded.
    #[error("cache decode error: {0}")]
    CacheDecode(String),

    /// Storage backend I/O failure.
    #[error("storage error at {path}: {message}")]
    StorageIo {
        /// Path of the backing file.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },

    /// Storage (de)serialization failure.
    #[error("storage serialization error: {0}")]
    StorageSerialization(String),

    /// Invalid configuration (bad base URL, malformed header, ...).
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::StorageIo`] from a path and message.
    pub(crate) fn storage_io(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::StorageIo {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}
