//! Technical areas shared by team development and car parts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RaceError, Result};

/// The four technical areas a team can develop and a car can receive parts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentArea {
    Engine,
    Aero,
    Tires,
    Suspension,
}

impl DevelopmentArea {
    pub const ALL: [DevelopmentArea; 4] = [
        DevelopmentArea::Engine,
        DevelopmentArea::Aero,
        DevelopmentArea::Tires,
        DevelopmentArea::Suspension,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DevelopmentArea::Engine => "engine",
            DevelopmentArea::Aero => "aero",
            DevelopmentArea::Tires => "tires",
            DevelopmentArea::Suspension => "suspension",
        }
    }

    /// Names of the two statistics each area improves.
    pub const fn stat_names(&self) -> (&'static str, &'static str) {
        match self {
            DevelopmentArea::Engine => ("power", "efficiency"),
            DevelopmentArea::Aero => ("downforce", "drag"),
            DevelopmentArea::Tires => ("durability", "grip"),
            DevelopmentArea::Suspension => ("stability", "response"),
        }
    }
}

impl fmt::Display for DevelopmentArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevelopmentArea {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engine" | "motor" => Ok(DevelopmentArea::Engine),
            "aero" | "aerodynamics" => Ok(DevelopmentArea::Aero),
            "tires" | "tyres" => Ok(DevelopmentArea::Tires),
            "suspension" => Ok(DevelopmentArea::Suspension),
            other => Err(RaceError::validation(
                "development area",
                format!("'{}' is not one of engine, aero, tires, suspension", other),
            )),
        }
    }
}

/// Team counters that can be bumped through `Team::update_stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Win,
    Podium,
    FastestLap,
    Retirement,
}

impl FromStr for StatKind {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(StatKind::Win),
            "podium" => Ok(StatKind::Podium),
            "fastest_lap" | "fastestlap" => Ok(StatKind::FastestLap),
            "retirement" => Ok(StatKind::Retirement),
            other => Err(RaceError::validation(
                "stat kind",
                format!("'{}' is not one of win, podium, fastest_lap, retirement", other),
            )),
        }
    }
}
