//! Core types for Office Escape: the progress ledger, endings, and storage.
//!
//! [`StateStore`] is the single source of truth for everything that has to
//! survive a scene transition. It owns one [`GameProgress`] record and writes
//! it to a [`KeyValueStore`] after every mutation. The ending shown in the
//! last scene is derived from the accumulated [`EndingScores`].

/// Endings, score accumulators, and score deltas.
pub mod ending;
/// The player's energy level shown between scenes.
pub mod energy;
/// Error types used throughout the crate.
pub mod error;
/// The persisted progress record.
pub mod progress;
/// Scene identifiers in play order.
pub mod scene;
/// Key-value storage backends.
pub mod storage;
/// The progress ledger.
pub mod store;

pub use ending::{Ending, EndingScores, ScoreDelta};
pub use energy::EnergyLevel;
pub use error::{StoreError, StoreResult};
pub use progress::GameProgress;
pub use scene::SceneId;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::StateStore;
