//! Simulation tuning parameters
//!
//! Every constant the rules depend on lives here so a harness can load a
//! different rule set from YAML without touching the entities. Missing keys
//! fall back to the reference values.
//!
//! ```rust
//! use paddock::SimulationConfig;
//!
//! let config = SimulationConfig::from_yaml(
//!     "race:\n  target_duration_minutes: 60\nlap:\n  mistake_probability: 0.0\nseed: 7\n",
//! ).unwrap();
//! assert_eq!(config.race.target_duration_minutes, 60.0);
//! assert_eq!(config.race.min_participants, 10);
//! assert_eq!(config.seed, Some(7));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RaceError, Result};

/// Root configuration for a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub race: RaceConfig,
    pub lap: LapConfig,
    pub strategy: StrategyConfig,
    pub team: TeamConfig,
    pub circuit: CircuitConfig,
    /// Seed for the race random source; `None` draws one from the OS
    pub seed: Option<u64>,
}

/// Race validity and lap-count parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Minimum participants for a race to be valid
    pub min_participants: usize,
    /// Target session length used by the time budget
    pub target_duration_minutes: f64,
    /// Fuel available for the whole race, in tank units
    pub fuel_tank: f64,
    /// Fraction of top speed sustained over a lap
    pub race_pace_factor: f64,
    /// Cars eliminated at the end of Q1 and Q2
    pub qualifying_cut: usize,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            min_participants: 10,
            target_duration_minutes: 90.0,
            fuel_tank: 110.0,
            race_pace_factor: 0.8,
            qualifying_cut: 5,
        }
    }
}

/// Lap-time and wear parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LapConfig {
    /// Laps a fresh set of tires lasts before circuit scaling
    pub baseline_tire_laps: f64,
    /// Fuel burnt per lap on a 5 km circuit
    pub fuel_per_lap: f64,
    /// Reference circuit length for fuel consumption
    pub reference_length_km: f64,
    /// Chance that a driver makes a mistake on any lap
    pub mistake_probability: f64,
    /// Fractional lap-time penalty for a mistake
    pub mistake_penalty: f64,
    /// Maximum fractional lap-time noise
    pub jitter: f64,
}

impl Default for LapConfig {
    fn default() -> Self {
        Self {
            baseline_tire_laps: 40.0,
            fuel_per_lap: 2.5,
            reference_length_km: 5.0,
            mistake_probability: 0.3,
            mistake_penalty: 0.05,
            jitter: 0.01,
        }
    }
}

/// Windows used to judge whether a pit plan is evenly spaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub min_stops: usize,
    pub max_stops: usize,
    /// Inclusive lap window for the first stop
    pub first_stop_window: (u32, u32),
    /// Inclusive window for the gap between consecutive stops
    pub gap_window: (u32, u32),
    /// Largest allowed difference between consecutive gaps
    pub gap_tolerance: u32,
    /// Estimated duration of a scheduled stop, in seconds
    pub estimated_stop_time: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            min_stops: 2,
            max_stops: 4,
            first_stop_window: (15, 25),
            gap_window: (10, 20),
            gap_tolerance: 5,
            estimated_stop_time: 3.0,
        }
    }
}

/// Development economics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub cost_per_level: u64,
    /// Stat points gained per development level
    pub points_per_level: f64,
    pub improvement_factor: f64,
    /// Chance a risky investment loses one level
    pub setback_probability: f64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            cost_per_level: 100_000,
            points_per_level: 5.0,
            improvement_factor: 1.0,
            setback_probability: 0.2,
        }
    }
}

/// Thresholds for classifying a circuit as challenging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// A challenging circuit has strictly more corners than this
    pub challenging_min_corners: usize,
    pub challenging_min_drs_zones: usize,
    pub challenging_min_length_km: f64,
    /// Mean difficulty score that must be exceeded
    pub challenging_min_difficulty: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            challenging_min_corners: 2,
            challenging_min_drs_zones: 2,
            challenging_min_length_km: 5.0,
            challenging_min_difficulty: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        debug!(seed = ?config.seed, "Loaded simulation config");
        Ok(config)
    }

    /// Reject values the rules cannot work with.
    pub fn validate(&self) -> Result<()> {
        probability("lap.mistake_probability", self.lap.mistake_probability)?;
        probability("race.race_pace_factor", self.race.race_pace_factor)?;
        positive("race.target_duration_minutes", self.race.target_duration_minutes)?;
        positive("race.fuel_tank", self.race.fuel_tank)?;
        positive("lap.baseline_tire_laps", self.lap.baseline_tire_laps)?;
        positive("lap.fuel_per_lap", self.lap.fuel_per_lap)?;
        positive("lap.reference_length_km", self.lap.reference_length_km)?;
        window("strategy.first_stop_window", self.strategy.first_stop_window)?;
        window("strategy.gap_window", self.strategy.gap_window)?;
        self.team.validate()?;

        if self.strategy.min_stops > self.strategy.max_stops {
            return Err(RaceError::config("strategy.min_stops exceeds strategy.max_stops"));
        }
        if self.race.min_participants == 0 {
            return Err(RaceError::config("race.min_participants must be non-zero"));
        }
        Ok(())
    }
}

impl TeamConfig {
    /// Reject development economics that cannot price a level.
    pub fn validate(&self) -> Result<()> {
        probability("team.setback_probability", self.setback_probability)?;
        positive("team.improvement_factor", self.improvement_factor)?;
        if !self.points_per_level.is_finite() || self.points_per_level < 0.0 {
            return Err(RaceError::config(format!(
                "team.points_per_level must be non-negative, got {}",
                self.points_per_level
            )));
        }
        if self.cost_per_level == 0 {
            return Err(RaceError::config("team.cost_per_level must be non-zero"));
        }
        Ok(())
    }
}

fn probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RaceError::config(format!("{} must be between 0 and 1, got {}", name, value)))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RaceError::config(format!("{} must be positive, got {}", name, value)))
    }
}

fn window(name: &str, (low, high): (u32, u32)) -> Result<()> {
    if low <= high {
        Ok(())
    } else {
        Err(RaceError::config(format!("{} is empty: [{}, {}]", name, low, high)))
    }
}
