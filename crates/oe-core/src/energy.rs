//! The player's energy level.
//!
//! Stored as a free-standing string under its own key, outside of
//! [`GameProgress`](crate::GameProgress).

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// How much energy the player has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyLevel {
    /// Nothing left.
    Empty,
    /// Start of the evening, drained by the office.
    #[default]
    Low,
    /// Out of the office.
    Medium,
    /// Almost home.
    High,
}

impl EnergyLevel {
    /// The stored string of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Empty => "empty",
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(EnergyLevel::Empty),
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(StoreError::UnknownEnergyLevel(other.to_string())),
        }
    }
}
