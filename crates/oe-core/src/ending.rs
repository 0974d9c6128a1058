//! Endings and the score accumulators that select between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One of the four mutually exclusive narrative outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Work and personal life in balance.
    Balanced,
    /// Work above everything else.
    Workaholic,
    /// Personal freedom over professional expectations.
    Carefree,
    /// Self-care ignored until it breaks.
    Burnout,
}

impl Ending {
    /// All endings in tie-break order: the first one wins a tie.
    pub const ALL: [Ending; 4] = [
        Ending::Balanced,
        Ending::Workaholic,
        Ending::Carefree,
        Ending::Burnout,
    ];

    /// The persisted identifier of this ending.
    pub fn id(self) -> &'static str {
        match self {
            Ending::Balanced => "balanced",
            Ending::Workaholic => "workaholic",
            Ending::Carefree => "carefree",
            Ending::Burnout => "burnout",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Ending {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ending::ALL
            .into_iter()
            .find(|e| e.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StoreError::UnknownEnding(s.to_string()))
    }
}

/// A non-negative amount added to one ending's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDelta {
    /// The ending that receives the points.
    pub ending: Ending,
    /// Points to add.
    pub amount: u32,
}

impl ScoreDelta {
    /// Create a delta of `amount` points toward `ending`.
    pub const fn new(ending: Ending, amount: u32) -> Self {
        Self { ending, amount }
    }
}

/// Score accumulators for exactly the four endings.
///
/// Persisted as a JSON object keyed by ending id. Missing keys load as zero
/// and unknown keys are dropped, so the record can never hold anything but
/// the four known endings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingScores {
    balanced: i64,
    workaholic: i64,
    carefree: i64,
    burnout: i64,
}

impl EndingScores {
    /// All scores at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The score of one ending.
    pub fn get(&self, ending: Ending) -> i64 {
        match ending {
            Ending::Balanced => self.balanced,
            Ending::Workaholic => self.workaholic,
            Ending::Carefree => self.carefree,
            Ending::Burnout => self.burnout,
        }
    }

    fn slot(&mut self, ending: Ending) -> &mut i64 {
        match ending {
            Ending::Balanced => &mut self.balanced,
            Ending::Workaholic => &mut self.workaholic,
            Ending::Carefree => &mut self.carefree,
            Ending::Burnout => &mut self.burnout,
        }
    }

    /// Add a delta. Saturates instead of overflowing.
    pub fn add(&mut self, delta: ScoreDelta) {
        let slot = self.slot(delta.ending);
        *slot = slot.saturating_add(i64::from(delta.amount));
    }

    /// Overwrite one score. Only used when loading persisted data.
    pub(crate) fn set(&mut self, ending: Ending, score: i64) {
        *self.slot(ending) = score;
    }

    /// Iterate over `(ending, score)` pairs in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Ending, i64)> + '_ {
        Ending::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// The ending with the strictly greatest score.
    ///
    /// Ties go to the ending declared first in [`Ending::ALL`], so all-equal
    /// scores select [`Ending::Balanced`].
    pub fn leader(&self) -> Ending {
        let mut best = Ending::ALL[0];
        let mut best_score = self.get(best);
        for (ending, score) in self.iter().skip(1) {
            if score > best_score {
                best = ending;
                best_score = score;
            }
        }
        best
    }

    /// Whether more than one ending shares the highest score.
    pub fn is_tied(&self) -> bool {
        let max = self.iter().map(|(_, s)| s).max().unwrap_or(0);
        self.iter().filter(|(_, s)| *s == max).count() > 1
    }
}
