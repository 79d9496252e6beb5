//! Race weekend orchestration
//!
//! A [`Race`] owns its circuit and participating cars for the whole event.
//! The sequence is qualifying, then the lap loop, then classification:
//!
//! ```rust
//! use paddock::{Car, Circuit, Driver, Race, Skills, TireCompound};
//! use paddock::random::SequenceRandom;
//! use paddock::types::{CircuitType, RaceState, WeatherCondition};
//!
//! let circuit = Circuit::new("Monza", "Italy", 5.793, CircuitType::LowDegradation);
//! let mut race = Race::new("Italian Grand Prix", circuit, "2024-09-01")
//!     .with_random(SequenceRandom::constant(0.5));
//!
//! for number in 1..=10 {
//!     let mut car = Car::new(number, "Team", "Chassis", TireCompound::Medium, 330.0, 100.0);
//!     let mut driver = Driver::new(format!("Driver {}", number), "Italy", 0);
//!     driver.set_skills(Skills::new(90.0, 90.0, 90.0)).unwrap();
//!     driver.assign_to_car(&mut car).unwrap();
//!     race.register_car(car).unwrap();
//! }
//! race.set_weather(WeatherCondition::Dry, 24.0, 40.0).unwrap();
//! assert!(race.is_valid());
//!
//! let summary = race.start_race().unwrap();
//! let classification = race.finish_race().unwrap();
//! assert_eq!(summary.total_laps, 37);
//! assert_eq!(classification.podium.len(), 3);
//! assert_eq!(race.state(), RaceState::Finished);
//! ```

mod lap;
mod qualifying;
mod results;

pub use lap::{FastestLap, LapSummary, LapTime};
pub use qualifying::{GridSlot, QualifyingResult, QualifyingStage, QualifyingTime};
pub use results::{
    format_gap, format_race_time, AwardReason, Classification, PodiumEntry, PointsAward,
    RaceResults, Standing,
};

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::car::{Car, PitStopReport, PitStopRequest};
use crate::circuit::Circuit;
use crate::config::SimulationConfig;
use crate::observer::{Observer, ObserverSlot};
use crate::random::{RandomSource, SeededRandom};
use crate::types::{RaceState, Weather, WeatherCondition};
use crate::{RaceError, Result};

/// Format race dates are written in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returned by [`Race::begin_race`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStart {
    pub total_laps: u32,
    pub participants: usize,
    pub weather: Weather,
    pub grid: Vec<GridSlot>,
}

/// Returned by [`Race::start_race`] once the lap loop has run to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    pub state: RaceState,
    pub total_laps: u32,
    pub participants: usize,
    pub weather: Weather,
    pub fastest_lap: Option<FastestLap>,
}

/// One race event on a circuit.
pub struct Race {
    name: String,
    circuit: Circuit,
    date: String,
    cars: Vec<Car>,
    weather: Option<Weather>,
    total_laps: u32,
    current_lap: u32,
    qualifying: Option<QualifyingResult>,
    grid: Vec<GridSlot>,
    fastest_lap: Option<FastestLap>,
    state: RaceState,
    config: SimulationConfig,
    rng: Box<dyn RandomSource>,
    observer: ObserverSlot,
}

impl fmt::Debug for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Race")
            .field("name", &self.name)
            .field("circuit", &self.circuit.name())
            .field("date", &self.date)
            .field("cars", &self.cars.len())
            .field("weather", &self.weather)
            .field("total_laps", &self.total_laps)
            .field("current_lap", &self.current_lap)
            .field("state", &self.state)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

impl Race {
    /// Create a pending race. `date` is expected as `YYYY-MM-DD`; an unparseable
    /// date is accepted here and makes the race invalid.
    pub fn new(name: impl Into<String>, circuit: Circuit, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            circuit,
            date: date.into(),
            cars: Vec::new(),
            weather: None,
            total_laps: 0,
            current_lap: 0,
            qualifying: None,
            grid: Vec::new(),
            fastest_lap: None,
            state: RaceState::Pending,
            config: SimulationConfig::default(),
            rng: Box::new(SeededRandom::from_entropy()),
            observer: ObserverSlot::default(),
        }
    }

    /// Replace the rule set after validating it. A configured seed also
    /// reseeds the random source.
    pub fn with_config(mut self, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if let Some(seed) = config.seed {
            self.rng = Box::new(SeededRandom::from_seed(seed));
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer.set(observer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The race date, when it parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn total_laps(&self) -> u32 {
        self.total_laps
    }

    pub fn current_lap(&self) -> u32 {
        self.current_lap
    }

    pub fn participants(&self) -> &[Car] {
        &self.cars
    }

    pub fn qualifying(&self) -> Option<&QualifyingResult> {
        self.qualifying.as_ref()
    }

    pub fn grid(&self) -> &[GridSlot] {
        &self.grid
    }

    pub fn fastest_lap(&self) -> Option<&FastestLap> {
        self.fastest_lap.as_ref()
    }

    /// Enter a car. Only allowed before the race starts; numbers must be unique.
    pub fn register_car(&mut self, car: Car) -> Result<()> {
        if self.state != RaceState::Pending {
            return Err(self.reject("register car", format!("race is {}", self.state)));
        }
        if self.cars.iter().any(|existing| existing.number() == car.number()) {
            return Err(RaceError::validation(
                "car number",
                format!("#{} is already registered", car.number()),
            ));
        }
        debug!(
            race = %self.name,
            car = car.number(),
            driver = %car.driver_name(),
            "Car registered"
        );
        self.cars.push(car);
        // A new entrant invalidates any grid set without it
        if self.qualifying.take().is_some() {
            self.grid.clear();
            debug!(race = %self.name, "Qualifying result discarded");
        }
        Ok(())
    }

    /// Set the race weather; the circuit weather follows.
    pub fn set_weather(
        &mut self,
        condition: WeatherCondition,
        temperature: f64,
        humidity: f64,
    ) -> Result<Weather> {
        let weather = *self.circuit.set_weather(condition, temperature, humidity)?;
        self.weather = Some(weather);
        Ok(weather)
    }

    pub fn car(&self, number: u32) -> Result<&Car> {
        self.cars
            .iter()
            .find(|car| car.number() == number)
            .ok_or(RaceError::UnknownCar { car_number: number })
    }

    pub fn car_mut(&mut self, number: u32) -> Result<&mut Car> {
        self.cars
            .iter_mut()
            .find(|car| car.number() == number)
            .ok_or(RaceError::UnknownCar { car_number: number })
    }

    /// Enough cars, a named circuit, weather set and a parseable date.
    pub fn is_valid(&self) -> bool {
        self.cars.len() >= self.config.race.min_participants
            && !self.circuit.name().trim().is_empty()
            && self.weather.is_some()
            && self.parsed_date().is_some()
    }

    fn ensure_valid(&self, operation: &str) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let reason = if self.cars.len() < self.config.race.min_participants {
            format!(
                "{} cars registered, {} required",
                self.cars.len(),
                self.config.race.min_participants
            )
        } else if self.weather.is_none() {
            "weather not set".to_string()
        } else if self.parsed_date().is_none() {
            format!("'{}' is not a valid date", self.date)
        } else {
            "circuit has no name".to_string()
        };
        Err(self.reject(operation, reason))
    }

    fn reject(&self, operation: &str, reason: impl Into<String>) -> RaceError {
        let reason = reason.into();
        warn!(race = %self.name, operation, reason = %reason, "Race operation rejected");
        RaceError::invalid_state(operation, reason)
    }

    /// Number of race laps: the smallest of the time, fuel and tire budgets,
    /// rounded down and never below one.
    pub fn compute_lap_count(&mut self) -> Result<u32> {
        let slowest = self
            .cars
            .iter()
            .map(Car::max_speed)
            .min_by(f64::total_cmp)
            .ok_or_else(|| self.reject("compute lap count", "no cars registered"))?;

        let length = self.circuit.length_km();
        if !length.is_finite() || length <= 0.0 {
            return Err(RaceError::validation("circuit length", "must be positive"));
        }
        if !slowest.is_finite() || slowest <= 0.0 {
            return Err(RaceError::validation("max speed", "every car needs a positive top speed"));
        }

        let race = &self.config.race;
        let lap = &self.config.lap;
        let lap_seconds = length / (slowest * race.race_pace_factor) * 3600.0;
        let by_time = race.target_duration_minutes * 60.0 / lap_seconds;
        let by_fuel = race.fuel_tank / (lap.fuel_per_lap * (length / lap.reference_length_km));
        let by_tires = lap.baseline_tire_laps * self.circuit.circuit_type().tire_life_factor();

        let laps = by_time.min(by_fuel).min(by_tires).floor().max(1.0) as u32;
        debug!(race = %self.name, by_time, by_fuel, by_tires, laps, "Lap count computed");
        self.total_laps = laps;
        Ok(laps)
    }

    /// Validate, size the race, qualify if needed and put the cars on the grid.
    pub fn begin_race(&mut self) -> Result<RaceStart> {
        if self.state != RaceState::Pending {
            return Err(self.reject("start race", format!("race is {}", self.state)));
        }
        self.ensure_valid("start race")?;
        let weather = self
            .weather
            .ok_or_else(|| self.reject("start race", "weather not set"))?;

        let total_laps = self.compute_lap_count()?;
        if self.grid.is_empty() {
            self.run_qualifying()?;
        }

        for car in &mut self.cars {
            car.reset_race_progress();
            car.resume_racing();
        }
        self.current_lap = 0;
        self.fastest_lap = None;
        self.state = RaceState::Started;
        info!(race = %self.name, laps = total_laps, cars = self.cars.len(), "Race started");

        let participants = self.cars.len();
        Ok(RaceStart { total_laps, participants, weather, grid: self.grid.clone() })
    }

    /// Run the whole race from lights out to the last lap.
    pub fn start_race(&mut self) -> Result<RaceSummary> {
        let start = self.begin_race()?;
        while self.current_lap < self.total_laps {
            self.advance_lap()?;
        }

        Ok(RaceSummary {
            state: self.state,
            total_laps: start.total_laps,
            participants: start.participants,
            weather: start.weather,
            fastest_lap: self.fastest_lap.clone(),
        })
    }

    /// Pit a car between laps.
    pub fn pit_stop(&mut self, car_number: u32, request: PitStopRequest) -> Result<PitStopReport> {
        if !matches!(self.state, RaceState::Started | RaceState::InProgress) {
            return Err(self.reject("pit stop", format!("race is {}", self.state)));
        }
        self.car_mut(car_number)?.pit_stop(request)
    }

    fn record_date(&self) -> NaiveDate {
        self.parsed_date().unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_circuit, sample_race, seat};
    use crate::types::{CircuitType, TireCompound};

    #[test]
    fn validity_needs_every_precondition() {
        let mut race = Race::new("GP", sample_circuit(), "2024-09-01");
        for number in 1..=9 {
            race.register_car(seat(number, 330.0)).unwrap();
        }
        race.set_weather(WeatherCondition::Dry, 25.0, 50.0).unwrap();
        assert!(!race.is_valid(), "nine cars");

        race.register_car(seat(10, 330.0)).unwrap();
        assert!(race.is_valid());

        let mut undated = Race::new("GP", sample_circuit(), "not a date");
        for number in 1..=10 {
            undated.register_car(seat(number, 330.0)).unwrap();
        }
        undated.set_weather(WeatherCondition::Dry, 25.0, 50.0).unwrap();
        assert!(!undated.is_valid());
        let err = undated.begin_race().unwrap_err();
        assert!(err.to_string().contains("not a valid date"));
    }

    #[test]
    fn start_without_weather_fails() {
        let mut race = Race::new("GP", sample_circuit(), "2024-09-01");
        for number in 1..=10 {
            race.register_car(seat(number, 330.0)).unwrap();
        }
        let err = race.start_race().unwrap_err();
        assert!(matches!(err, RaceError::InvalidState { .. }));
        assert!(err.to_string().contains("weather not set"));
        assert_eq!(race.state(), RaceState::Pending);
    }

    #[test]
    fn duplicate_numbers_rejected() {
        let mut race = Race::new("GP", sample_circuit(), "2024-09-01");
        race.register_car(seat(7, 330.0)).unwrap();
        assert!(matches!(race.register_car(seat(7, 330.0)), Err(RaceError::Validation { .. })));
        assert!(matches!(race.car(8), Err(RaceError::UnknownCar { car_number: 8 })));
    }

    #[test]
    fn lap_count_takes_smallest_budget() {
        let mut race = sample_race(12);
        assert_eq!(race.compute_lap_count().unwrap(), 37);

        let mut empty = Race::new("GP", sample_circuit(), "2024-09-01");
        assert!(matches!(empty.compute_lap_count(), Err(RaceError::InvalidState { .. })));

        let short = Circuit::new("Short", "Nowhere", 2.0, CircuitType::HighDegradation);
        let mut race = Race::new("GP", short, "2024-09-01");
        race.register_car(seat(1, 330.0)).unwrap();
        assert_eq!(race.compute_lap_count().unwrap(), 32, "tire budget 40 * 0.8");
    }

    #[test]
    fn slowest_car_drives_time_budget() {
        let mut config = SimulationConfig::default();
        config.race.target_duration_minutes = 30.0;
        let mut race = sample_race(10).with_config(config).unwrap();
        race.register_car(Car::new(99, "Slow", "One", TireCompound::Hard, 150.0, 100.0)).unwrap();
        // 5.793 km at 120 km/h is 173.79 s per lap
        assert_eq!(race.compute_lap_count().unwrap(), 10);
    }

    #[test]
    fn registration_closes_once_started() {
        let mut race = sample_race(10);
        race.begin_race().unwrap();
        assert_eq!(race.state(), RaceState::Started);
        assert!(matches!(race.register_car(seat(50, 330.0)), Err(RaceError::InvalidState { .. })));
        assert!(matches!(race.begin_race(), Err(RaceError::InvalidState { .. })));
    }

    #[test]
    fn late_entrant_forces_fresh_qualifying() {
        let mut race = sample_race(10);
        race.run_qualifying().unwrap();
        assert_eq!(race.grid().len(), 10);

        race.register_car(seat(11, 330.0)).unwrap();
        assert!(race.grid().is_empty());
        assert!(race.qualifying().is_none());

        let start = race.begin_race().unwrap();
        assert_eq!(start.grid.len(), 11);
        assert_eq!(race.grid().len(), race.participants().len());
        assert!(race.grid().iter().any(|slot| slot.car_number == 11));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.team.cost_per_level = 0;
        let err = sample_race(10).with_config(config).unwrap_err();
        assert!(matches!(err, RaceError::Config { .. }));
    }

    #[test]
    fn pit_stop_only_during_race() {
        let mut race = sample_race(10);
        let request = PitStopRequest::tires(TireCompound::Hard);
        assert!(race.pit_stop(1, request).is_err());

        race.begin_race().unwrap();
        let report = race.pit_stop(1, request).unwrap();
        assert_eq!(report.total_time, 3.5);
        assert_eq!(race.car(1).unwrap().race_time(), 3.5);
        assert!(matches!(race.pit_stop(77, request), Err(RaceError::UnknownCar { .. })));
    }

    #[test]
    fn weather_is_shared_with_circuit() {
        let mut race = Race::new("GP", sample_circuit(), "2024-09-01");
        race.set_weather(WeatherCondition::Rain, 15.0, 90.0).unwrap();
        assert_eq!(race.circuit().weather().condition, WeatherCondition::Rain);
        assert!(race.set_weather(WeatherCondition::Dry, 120.0, 50.0).is_err());
        assert_eq!(race.weather().unwrap().condition, WeatherCondition::Rain);
    }

    #[test]
    fn configured_seed_reproduces_race() {
        let run = || {
            let config = SimulationConfig { seed: Some(17), ..SimulationConfig::default() };
            let mut race = sample_race(12).with_config(config).unwrap();
            race.start_race().unwrap();
            race.results()
                .standings
                .iter()
                .map(|s| (s.car_number, s.race_time.to_bits()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
