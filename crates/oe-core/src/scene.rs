//! Scene identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A scene of the game, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    /// Title screen.
    MainMenu,
    /// The office at the end of the workday.
    #[serde(rename = "Scene1_Office")]
    Office,
    /// Walking to and riding the skytrain.
    #[serde(rename = "Scene2_Skytrain")]
    Skytrain,
    /// The bus ride home.
    #[serde(rename = "Scene3_Bus")]
    Bus,
    /// The ending selected by the accumulated scores.
    #[serde(rename = "Scene4_Ending")]
    Ending,
}

impl SceneId {
    /// All scenes in play order.
    pub const ALL: [SceneId; 5] = [
        SceneId::MainMenu,
        SceneId::Office,
        SceneId::Skytrain,
        SceneId::Bus,
        SceneId::Ending,
    ];

    /// The persisted key of this scene.
    pub fn key(self) -> &'static str {
        match self {
            SceneId::MainMenu => "MainMenu",
            SceneId::Office => "Scene1_Office",
            SceneId::Skytrain => "Scene2_Skytrain",
            SceneId::Bus => "Scene3_Bus",
            SceneId::Ending => "Scene4_Ending",
        }
    }

    /// The scene that follows this one, if any.
    pub fn next(self) -> Option<SceneId> {
        let pos = SceneId::ALL.iter().position(|s| *s == self)?;
        SceneId::ALL.get(pos + 1).copied()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SceneId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneId::ALL
            .into_iter()
            .find(|scene| scene.key() == s)
            .ok_or_else(|| StoreError::UnknownScene(s.to_string()))
    }
}
