//! Lifecycle states and labels for cars, drivers, strategies and races

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RaceError, Result};

/// What a car is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarState {
    Racing,
    InPits,
    Reserve,
    Development,
}

/// Driving approach a driver adopts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingStyle {
    Aggressive,
    Conservative,
    Development,
}

/// Aggressiveness label attached to a pit strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggressiveness {
    Low,
    Medium,
    High,
}

impl FromStr for Aggressiveness {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Aggressiveness::Low),
            "medium" => Ok(Aggressiveness::Medium),
            "high" => Ok(Aggressiveness::High),
            other => Err(RaceError::validation(
                "aggressiveness",
                format!("'{}' is not one of low, medium, high", other),
            )),
        }
    }
}

/// Overall progress of a race event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceState {
    Pending,
    Started,
    InProgress,
    Finished,
}

impl fmt::Display for RaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RaceState::Pending => "pending",
            RaceState::Started => "started",
            RaceState::InProgress => "in progress",
            RaceState::Finished => "finished",
        };
        f.write_str(label)
    }
}
