//! Weather and track surface conditions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RaceError, Result};

/// Sky condition over the circuit, ordered from driest to wettest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Dry,
    /// Humid air, occasional drizzle
    Damp,
    Wet,
    Rain,
}

impl WeatherCondition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Dry => "dry",
            WeatherCondition::Damp => "damp",
            WeatherCondition::Wet => "wet",
            WeatherCondition::Rain => "rain",
        }
    }

    /// Multiplier applied to lap times under this condition.
    pub const fn lap_time_factor(&self) -> f64 {
        match self {
            WeatherCondition::Dry | WeatherCondition::Damp => 1.0,
            WeatherCondition::Wet => 1.10,
            WeatherCondition::Rain => 1.15,
        }
    }

    /// Multiplier applied to a driver's skills under this condition.
    pub const fn grip_factor(&self) -> f64 {
        match self {
            WeatherCondition::Dry => 1.0,
            WeatherCondition::Damp => 0.95,
            WeatherCondition::Wet => 0.9,
            WeatherCondition::Rain => 0.8,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" | "sunny" | "clear" => Ok(WeatherCondition::Dry),
            "damp" | "humid" => Ok(WeatherCondition::Damp),
            "wet" => Ok(WeatherCondition::Wet),
            "rain" | "rainy" => Ok(WeatherCondition::Rain),
            other => Err(RaceError::validation(
                "weather condition",
                format!("'{}' is not one of dry, damp, wet, rain", other),
            )),
        }
    }
}

/// How far drivers can see, derived from condition and humidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Low,
    Medium,
    High,
}

impl Visibility {
    /// Derive visibility: rain with humidity >= 80 is low, damp air with
    /// humidity >= 50 is medium, anything else is high.
    pub fn derive(condition: WeatherCondition, humidity: f64) -> Self {
        match condition {
            WeatherCondition::Rain if humidity >= 80.0 => Visibility::Low,
            WeatherCondition::Damp if humidity >= 50.0 => Visibility::Medium,
            _ => Visibility::High,
        }
    }
}

/// State of the racing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSurface {
    Dry,
    Damp,
    Wet,
}

impl FromStr for TrackSurface {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" => Ok(TrackSurface::Dry),
            "damp" => Ok(TrackSurface::Damp),
            "wet" => Ok(TrackSurface::Wet),
            other => Err(RaceError::validation(
                "track surface",
                format!("'{}' is not one of dry, damp, wet", other),
            )),
        }
    }
}

/// Weather snapshot for a circuit or race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: WeatherCondition,
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    pub visibility: Visibility,
}

impl Weather {
    /// Build a snapshot, deriving visibility from condition and humidity.
    pub fn new(condition: WeatherCondition, temperature: f64, humidity: f64) -> Self {
        let visibility = Visibility::derive(condition, humidity);
        Self { condition, temperature, humidity, visibility }
    }
}

impl Default for Weather {
    fn default() -> Self {
        Weather::new(WeatherCondition::Dry, 25.0, 50.0)
    }
}
