//! Circuit classification types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RaceError, Result};

/// How hard a circuit is on its tires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitType {
    LowDegradation,
    HighDegradation,
}

impl CircuitType {
    /// Scale applied to the baseline tire life on this kind of circuit.
    pub const fn tire_life_factor(&self) -> f64 {
        match self {
            CircuitType::LowDegradation => 1.2,
            CircuitType::HighDegradation => 0.8,
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitType::LowDegradation => f.write_str("low degradation"),
            CircuitType::HighDegradation => f.write_str("high degradation"),
        }
    }
}

impl FromStr for CircuitType {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "low_degradation" | "low" => Ok(CircuitType::LowDegradation),
            "high_degradation" | "high" => Ok(CircuitType::HighDegradation),
            _ => Err(RaceError::validation(
                "circuit type",
                format!("'{}' is not one of low_degradation, high_degradation", s),
            )),
        }
    }
}

/// Difficulty rating of a single corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerDifficulty {
    Low,
    Medium,
    High,
}

impl CornerDifficulty {
    /// Numeric score used for averaging: low=1, medium=2, high=3.
    pub const fn score(&self) -> u32 {
        match self {
            CornerDifficulty::Low => 1,
            CornerDifficulty::Medium => 2,
            CornerDifficulty::High => 3,
        }
    }
}

impl FromStr for CornerDifficulty {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(CornerDifficulty::Low),
            "medium" | "med" => Ok(CornerDifficulty::Medium),
            "high" => Ok(CornerDifficulty::High),
            other => Err(RaceError::validation(
                "corner difficulty",
                format!("'{}' is not one of low, medium, high", other),
            )),
        }
    }
}
