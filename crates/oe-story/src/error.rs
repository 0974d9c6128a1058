//! Error types for the story layer.

use oe_core::StoreError;
use oe_dialog::DialogError;
use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that stop a scene.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A dialog could not be shown.
    #[error("dialog error: {0}")]
    Dialog(#[from] DialogError),

    /// The progress ledger rejected an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The player left while a dialog was waiting.
    #[error("session cancelled")]
    Cancelled,
}

impl StoryError {
    /// Map a dialog failure, treating cancellation as the player leaving.
    pub fn from_dialog(e: DialogError) -> Self {
        match e {
            DialogError::Cancelled => StoryError::Cancelled,
            other => StoryError::Dialog(other),
        }
    }
}
