//! Tire compound definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RaceError, Result};

/// Dry-weather tire compounds available to every car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TireCompound {
    /// Fastest compound, shortest life
    Soft,
    /// Balanced compound
    Medium,
    /// Slowest compound, longest life
    Hard,
}

impl TireCompound {
    /// All compounds, softest first.
    pub const ALL: [TireCompound; 3] =
        [TireCompound::Soft, TireCompound::Medium, TireCompound::Hard];

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TireCompound::Soft => "soft",
            TireCompound::Medium => "medium",
            TireCompound::Hard => "hard",
        }
    }

    /// Multiplier applied to a lap time on this compound.
    pub const fn lap_time_factor(&self) -> f64 {
        match self {
            TireCompound::Soft => 0.95,
            TireCompound::Medium => 1.0,
            TireCompound::Hard => 1.05,
        }
    }
}

impl fmt::Display for TireCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TireCompound {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(TireCompound::Soft),
            "medium" => Ok(TireCompound::Medium),
            "hard" => Ok(TireCompound::Hard),
            other => Err(RaceError::validation(
                "tire compound",
                format!("'{}' is not one of soft, medium, hard", other),
            )),
        }
    }
}
