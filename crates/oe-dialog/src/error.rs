//! Error types for dialog presentation.

use thiserror::Error;

/// Result type for dialog operations.
pub type DialogResult<T> = Result<T, DialogError>;

/// Ways a dialog can fail to produce a player response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// No surface has been bound with `init`.
    #[error("dialog sequencer has no surface; call init first")]
    NotInitialized,

    /// The surface could not create its frame and text elements.
    #[error("dialog surface failed to create its elements")]
    ElementsUnavailable,

    /// Another dialog is still waiting for the player.
    #[error("another dialog is still waiting for the player")]
    Busy,

    /// A newer dialog replaced this one before the player answered.
    #[error("dialog was replaced by a newer one")]
    Superseded,

    /// The dialog was hidden or its scene torn down before the player answered.
    #[error("dialog was cancelled")]
    Cancelled,
}
