//! Scene scripts for Office Escape.
//!
//! A [`GameSession`] walks the player from the main menu through the office,
//! the skytrain and the bus to one of four endings. Every scene is plain
//! async code: it awaits dialogs on a shared
//! [`DialogSequencer`](oe_dialog::DialogSequencer) and writes the player's
//! decisions into a [`StateStore`](oe_core::StateStore). Drawing and typing
//! input come from a [`Frontend`].

/// Story configuration.
pub mod config;
/// Scored decisions and their outcomes.
pub mod decision;
/// Ending cards shown in the final scene.
pub mod ending_card;
/// Error types for the story layer.
pub mod error;
/// Interactive objects in the office.
pub mod hotspot;
/// Per-scene scripts.
pub mod scene;
/// The session driver and its frontend seam.
pub mod session;
/// The report typing challenge.
pub mod typing;

pub use config::StoryConfig;
pub use decision::{Decision, DecisionOption};
pub use ending_card::EndingCard;
pub use error::{StoryError, StoryResult};
pub use hotspot::Hotspot;
pub use session::{Frontend, GameSession, Transition};
pub use typing::{TypingAttempt, TypingChallenge};
