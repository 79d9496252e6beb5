//! Circuit definition, weather and lap record ledger

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CircuitConfig;
use crate::error::{ensure_in_range, ensure_present};
use crate::types::{CircuitType, CornerDifficulty, Weather, WeatherCondition};
use crate::Result;

/// A numbered corner of the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub name: String,
    /// Speed limit through the corner, km/h
    pub speed_limit: f64,
    pub difficulty: CornerDifficulty,
    /// 1-based position along the lap
    pub number: usize,
}

/// A numbered DRS activation zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrsZone {
    pub name: String,
    /// Zone length in meters
    pub length: f64,
    pub number: usize,
}

/// Best lap ever recorded on the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Lap time in seconds
    pub time: f64,
    pub driver: String,
    pub date: NaiveDate,
}

/// Outcome of a lap record submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    /// The stored record after the submission; `None` only when nothing valid was ever submitted
    pub record: Option<LapRecord>,
    pub improved: bool,
}

/// Coarse difficulty label of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLabel {
    Medium,
    High,
}

/// Snapshot returned by [`Circuit::stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitStats {
    pub corners: usize,
    pub drs_zones: usize,
    pub lap_record: Option<LapRecord>,
    pub weather: Weather,
    pub difficulty: DifficultyLabel,
}

/// Static track description plus the weather and lap record that change over a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    location: String,
    length_km: f64,
    circuit_type: CircuitType,
    corners: Vec<Corner>,
    drs_zones: Vec<DrsZone>,
    weather: Weather,
    lap_record: Option<LapRecord>,
}

impl Circuit {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        length_km: f64,
        circuit_type: CircuitType,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            length_km,
            circuit_type,
            corners: Vec::new(),
            drs_zones: Vec::new(),
            weather: Weather::default(),
            lap_record: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    pub fn circuit_type(&self) -> CircuitType {
        self.circuit_type
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn drs_zones(&self) -> &[DrsZone] {
        &self.drs_zones
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn lap_record(&self) -> Option<&LapRecord> {
        self.lap_record.as_ref()
    }

    /// Append a corner, numbered after the existing ones.
    pub fn add_corner(
        &mut self,
        name: impl Into<String>,
        speed_limit: f64,
        difficulty: CornerDifficulty,
    ) -> Result<&Corner> {
        let name = name.into();
        ensure_present("corner name", &name)?;
        ensure_in_range("corner speed limit", speed_limit, 0.0, f64::MAX)?;

        let number = self.corners.len() + 1;
        self.corners.push(Corner { name, speed_limit, difficulty, number });
        Ok(&self.corners[number - 1])
    }

    /// Append a DRS zone, numbered independently of corners.
    pub fn add_drs_zone(&mut self, name: impl Into<String>, length: f64) -> Result<&DrsZone> {
        let name = name.into();
        ensure_present("DRS zone name", &name)?;
        ensure_in_range("DRS zone length", length, 0.0, f64::MAX)?;

        let number = self.drs_zones.len() + 1;
        self.drs_zones.push(DrsZone { name, length, number });
        Ok(&self.drs_zones[number - 1])
    }

    /// Replace the current weather, deriving visibility.
    pub fn set_weather(
        &mut self,
        condition: WeatherCondition,
        temperature: f64,
        humidity: f64,
    ) -> Result<&Weather> {
        ensure_in_range("temperature", temperature, -50.0, 70.0)?;
        ensure_in_range("humidity", humidity, 0.0, 100.0)?;

        self.weather = Weather::new(condition, temperature, humidity);
        debug!(circuit = %self.name, weather = ?self.weather, "Weather updated");
        Ok(&self.weather)
    }

    /// Submit a lap time dated today. See [`Circuit::update_lap_record_on`].
    pub fn update_lap_record(&mut self, time: f64, driver: impl Into<String>) -> RecordUpdate {
        self.update_lap_record_on(time, driver, Utc::now().date_naive())
    }

    /// Submit a lap time; the record is replaced only when `time` is strictly lower.
    pub fn update_lap_record_on(
        &mut self,
        time: f64,
        driver: impl Into<String>,
        date: NaiveDate,
    ) -> RecordUpdate {
        let improved = time.is_finite()
            && self.lap_record.as_ref().is_none_or(|record| time < record.time);

        if improved {
            let driver = driver.into();
            debug!(circuit = %self.name, time, driver = %driver, "New lap record");
            self.lap_record = Some(LapRecord { time, driver, date });
        }

        RecordUpdate { record: self.lap_record.clone(), improved }
    }

    /// Mean corner difficulty score (low=1, medium=2, high=3); zero without corners.
    pub fn mean_difficulty(&self) -> f64 {
        if self.corners.is_empty() {
            return 0.0;
        }
        let total: u32 = self.corners.iter().map(|corner| corner.difficulty.score()).sum();
        total as f64 / self.corners.len() as f64
    }

    /// Whether the circuit passes every challenging threshold.
    pub fn is_challenging(&self, config: &CircuitConfig) -> bool {
        self.corners.len() > config.challenging_min_corners
            && self.drs_zones.len() >= config.challenging_min_drs_zones
            && self.length_km > config.challenging_min_length_km
            && self.mean_difficulty() > config.challenging_min_difficulty
    }

    pub fn stats(&self) -> CircuitStats {
        CircuitStats {
            corners: self.corners.len(),
            drs_zones: self.drs_zones.len(),
            lap_record: self.lap_record.clone(),
            weather: self.weather,
            difficulty: if self.mean_difficulty() > 2.0 {
                DifficultyLabel::High
            } else {
                DifficultyLabel::Medium
            },
        }
    }
}
