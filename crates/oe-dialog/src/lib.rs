//! One-at-a-time dialog presentation.
//!
//! [`DialogSequencer`] turns click-driven dialog boxes into sequential async
//! control flow: scene logic awaits [`DialogSequencer::show_dialog`] and gets
//! back the option the player picked (or an empty string for a plain
//! dismissal). At most one dialog is live at any time. Rendering is delegated
//! to a [`DialogSurface`] bound per scene.

/// Error types for dialog presentation.
pub mod error;
/// Dialog requests, kinds, and player input.
pub mod request;
/// The sequencer that serializes dialogs.
pub mod sequencer;
/// The rendering seam and a headless implementation.
pub mod surface;

pub use error::{DialogError, DialogResult};
pub use request::{DialogInput, DialogKind, DialogRequest, Frame};
pub use sequencer::{DialogSequencer, PendingDialog};
pub use surface::{BlockerMode, DialogSurface, MemorySurface, SurfaceEvent, SurfaceSnapshot};
