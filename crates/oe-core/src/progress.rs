//! The persisted progress record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ending::EndingScores;
use crate::scene::SceneId;

/// Everything about the player's run that must survive scene transitions.
///
/// This is the canonical persisted shape: choices and ending scores live
/// inside it rather than under separate storage keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProgress {
    /// Hotspots the player has interacted with.
    pub interacted_with: BTreeMap<String, bool>,
    /// Whether the typing minigame was finished successfully.
    pub has_completed_typing_game: bool,
    /// The last scene entered.
    pub current_scene_id: Option<SceneId>,
    /// Open-ended state (counters, ad hoc markers).
    pub flags: BTreeMap<String, Value>,
    /// Accumulated ending scores.
    pub ending_scores: EndingScores,
    /// Decision id to the literal choice the player made.
    pub choices: BTreeMap<String, String>,
}

impl GameProgress {
    /// A fresh record with all scores at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the player interacted with a hotspot.
    pub fn has_interacted_with(&self, id: &str) -> bool {
        self.interacted_with.get(id).copied().unwrap_or(false)
    }

    /// Clear the per-visit office state, keeping choices and scores.
    pub fn clear_office_visit(&mut self) {
        self.interacted_with.clear();
        self.has_completed_typing_game = false;
    }
}
