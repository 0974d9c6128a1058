//! Configuration for a story session.

use crate::typing::DEFAULT_PROMPTS;

/// Configuration for a story session.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// RNG seed for reproducible prompt selection.
    pub seed: u64,
    /// Sentences the typing challenge picks from. Never empty.
    pub typing_prompts: Vec<String>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            typing_prompts: DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl StoryConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the typing prompts. An empty list keeps the current ones.
    pub fn with_prompts<I, S>(mut self, prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompts: Vec<String> = prompts
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.trim().is_empty())
            .collect();
        if !prompts.is_empty() {
            self.typing_prompts = prompts;
        }
        self
    }
}
