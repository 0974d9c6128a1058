//! The report typing challenge.
//!
//! Only the comparison lives here. Collecting keystrokes is up to the
//! frontend, which hands back whole attempts.

use rand::Rng;
use rand::rngs::StdRng;

/// The built-in report sentences.
pub const DEFAULT_PROMPTS: [&str; 5] = [
    "The client has requested additional information about our services.",
    "Please review the attached documents before tomorrow's meeting.",
    "Our department needs to improve efficiency by 15% this quarter.",
    "I'll schedule a follow-up meeting to discuss next steps.",
    "The quarterly report shows strong growth in our key metrics.",
];

/// One attempt at typing the target sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingAttempt {
    /// The player submitted this text.
    Typed(String),
    /// The player gave up.
    Cancelled,
}

/// A sentence the player must type exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingChallenge {
    target: String,
}

impl TypingChallenge {
    /// A challenge for a fixed sentence.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Pick one of `prompts` at random, falling back to the first built-in
    /// sentence when the list is empty.
    pub fn pick(prompts: &[String], rng: &mut StdRng) -> Self {
        if prompts.is_empty() {
            return Self::new(DEFAULT_PROMPTS[0]);
        }
        Self::new(prompts[rng.random_range(0..prompts.len())].clone())
    }

    /// The sentence to type.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `typed` matches the target. Surrounding whitespace is ignored;
    /// everything else, including case and punctuation, must match.
    pub fn check(&self, typed: &str) -> bool {
        typed.trim() == self.target.trim()
    }
}
