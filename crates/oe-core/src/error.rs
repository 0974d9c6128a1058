//! Error types for the progress ledger and its storage.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by storage backends and by name lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A write would exceed the storage quota.
    #[error("storage quota of {limit} bytes exceeded while writing \"{key}\"")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// The quota in bytes.
        limit: usize,
    },

    /// A score delta named an ending that does not exist.
    #[error("unknown ending: \"{0}\"")]
    UnknownEnding(String),

    /// A scene name did not match any scene.
    #[error("unknown scene: \"{0}\"")]
    UnknownScene(String),

    /// An energy level name did not match any level.
    #[error("unknown energy level: \"{0}\"")]
    UnknownEnergyLevel(String),
}
