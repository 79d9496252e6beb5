//! Cars: tires, fuel, engine wear, parts and pit history
//!
//! A [`Car`] owns the [`Driver`] assigned to it. The assignment is made only
//! through [`Driver::assign_to_car`] and undone through [`Car::release_driver`],
//! so both sides of the pairing always agree.
//!
//! ```rust
//! use paddock::{Car, LapConditions, TireCompound, CircuitType};
//! use paddock::config::LapConfig;
//!
//! let mut car = Car::new(44, "Mercedes", "W13", TireCompound::Soft, 340.0, 80.0);
//! let wear = car.compute_lap_wear(
//!     &LapConditions {
//!         lap_number: 1,
//!         speed: 200.0,
//!         temperature: 25.0,
//!         humidity: 50.0,
//!         circuit_length_km: 5.0,
//!         circuit_type: CircuitType::HighDegradation,
//!     },
//!     &LapConfig::default(),
//! ).unwrap();
//! assert_eq!(wear.fuel_consumed, 2.5);
//! assert_eq!(wear.fuel_remaining, 77.5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LapConfig;
use crate::driver::Driver;
use crate::error::{ensure_in_range, ensure_present};
use crate::types::{CarState, CircuitType, DevelopmentArea, TireCompound};
use crate::{RaceError, Result};

/// Fuel tank capacity in percent.
pub const FUEL_CAPACITY: f64 = 100.0;
/// Upper bound for tire and engine wear.
pub const MAX_WEAR: f64 = 100.0;

/// Time cost of a pit stop, in seconds.
pub const PIT_BASE_TIME: f64 = 1.0;
pub const PIT_TIRE_CHANGE_TIME: f64 = 2.5;
pub const PIT_REFUEL_TIME: f64 = 1.8;

/// Starting wear and fuel levels, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialWear {
    pub tire_wear: f64,
    pub engine_wear: f64,
    pub fuel: f64,
}

/// A part fitted to the car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub kind: DevelopmentArea,
    pub spec: String,
}

/// Result of [`Car::install_part`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInstallation {
    pub installed: Part,
    pub state: CarState,
    pub history: Vec<Part>,
}

/// Result of [`Car::change_tires`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireChange {
    pub previous: TireCompound,
    pub new: TireCompound,
    pub wear_reset: bool,
}

/// Result of [`Car::refuel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Refuel {
    pub previous: f64,
    pub new: f64,
}

/// Inputs to one lap of wear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapConditions {
    /// Laps driven on the current tires, including this one
    pub lap_number: u32,
    /// Average speed over the lap, km/h
    pub speed: f64,
    /// Air temperature, °C
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub circuit_length_km: f64,
    pub circuit_type: CircuitType,
}

/// Cumulative wear after a lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapWear {
    pub tire_wear: f64,
    pub engine_wear: f64,
    pub fuel_consumed: f64,
    pub fuel_remaining: f64,
}

/// Service requested at a pit stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitStopRequest {
    pub tire_compound: Option<TireCompound>,
    pub fuel_amount: Option<f64>,
}

impl PitStopRequest {
    pub fn tires(compound: TireCompound) -> Self {
        Self { tire_compound: Some(compound), fuel_amount: None }
    }

    pub fn with_fuel(mut self, amount: f64) -> Self {
        self.fuel_amount = Some(amount);
        self
    }
}

/// Work carried out during a pit stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitOperation {
    TireChange,
    Refuel,
}

/// Result of [`Car::pit_stop`], also kept in the car's pit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitStopReport {
    /// Race laps completed when the car stopped
    pub lap: u32,
    pub state: CarState,
    pub operations: Vec<PitOperation>,
    pub total_time: f64,
}

/// Snapshot returned by [`Car::wear_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WearStats {
    pub tire_wear: f64,
    pub fuel: f64,
    pub engine_wear: f64,
    pub state: CarState,
}

/// A racing car and its running state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    number: u32,
    make: String,
    model: String,
    tires: TireCompound,
    max_speed: f64,
    fuel: f64,
    state: CarState,
    driver: Option<Driver>,
    tire_wear: f64,
    engine_wear: f64,
    distance_km: f64,
    parts: Vec<Part>,
    pit_history: Vec<PitStopReport>,
    race_time: f64,
    last_lap_time: Option<f64>,
    laps_completed: u32,
    stint_laps: u32,
}

impl Car {
    /// Create a car. Fuel is clamped into the tank.
    pub fn new(
        number: u32,
        make: impl Into<String>,
        model: impl Into<String>,
        tires: TireCompound,
        max_speed: f64,
        fuel: f64,
    ) -> Self {
        Self {
            number,
            make: make.into(),
            model: model.into(),
            tires,
            max_speed,
            fuel: fuel.clamp(0.0, FUEL_CAPACITY),
            state: CarState::Racing,
            driver: None,
            tire_wear: 0.0,
            engine_wear: 0.0,
            distance_km: 0.0,
            parts: Vec::new(),
            pit_history: Vec::new(),
            race_time: 0.0,
            last_lap_time: None,
            laps_completed: 0,
            stint_laps: 0,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// "Make Model" label.
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn tires(&self) -> TireCompound {
        self.tires
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn tire_wear(&self) -> f64 {
        self.tire_wear
    }

    pub fn engine_wear(&self) -> f64 {
        self.engine_wear
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn pit_history(&self) -> &[PitStopReport] {
        &self.pit_history
    }

    /// Accumulated race time in seconds, pit stops included.
    pub fn race_time(&self) -> f64 {
        self.race_time
    }

    pub fn last_lap_time(&self) -> Option<f64> {
        self.last_lap_time
    }

    pub fn laps_completed(&self) -> u32 {
        self.laps_completed
    }

    /// Laps driven since the last tire change.
    pub fn stint_laps(&self) -> u32 {
        self.stint_laps
    }

    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    pub fn driver_mut(&mut self) -> Option<&mut Driver> {
        self.driver.as_mut()
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    /// Name of the assigned driver, or a placeholder naming the car.
    pub fn driver_name(&self) -> String {
        match &self.driver {
            Some(driver) => driver.name().to_string(),
            None => format!("Car #{}", self.number),
        }
    }

    pub(crate) fn seat(&mut self, driver: Driver) {
        self.driver = Some(driver);
    }

    /// End the current assignment, clearing both sides of it.
    pub fn release_driver(&mut self) -> Option<Driver> {
        let mut driver = self.driver.take()?;
        driver.clear_current_car();
        debug!(car = self.number, driver = %driver.name(), "Driver released");
        Some(driver)
    }

    pub fn set_state(&mut self, state: CarState) {
        self.state = state;
    }

    /// Return to racing after a pit stop or development work.
    pub fn resume_racing(&mut self) {
        self.state = CarState::Racing;
    }

    /// Overwrite tire wear, engine wear and fuel. All three are validated first.
    pub fn set_initial_wear(&mut self, wear: InitialWear) -> Result<()> {
        ensure_in_range("tire wear", wear.tire_wear, 0.0, MAX_WEAR)?;
        ensure_in_range("engine wear", wear.engine_wear, 0.0, MAX_WEAR)?;
        ensure_in_range("fuel", wear.fuel, 0.0, FUEL_CAPACITY)?;

        self.tire_wear = wear.tire_wear;
        self.engine_wear = wear.engine_wear;
        self.fuel = wear.fuel;
        Ok(())
    }

    /// Ready to race: fresh-enough tires and engine, enough fuel, and a driver when racing.
    pub fn is_optimal_condition(&self) -> bool {
        self.tire_wear < 30.0
            && self.fuel > 20.0
            && self.engine_wear < 40.0
            && (self.state != CarState::Racing || self.driver.is_some())
    }

    /// Fit a new set of tires; wear and the stint counter reset to zero.
    pub fn change_tires(&mut self, compound: TireCompound) -> TireChange {
        let previous = self.tires;
        self.tires = compound;
        self.tire_wear = 0.0;
        self.stint_laps = 0;
        TireChange { previous, new: compound, wear_reset: true }
    }

    /// Add fuel. Fails without touching the tank when the amount is out of
    /// range or would overflow it.
    pub fn refuel(&mut self, amount: f64) -> Result<Refuel> {
        ensure_in_range("refuel amount", amount, 0.0, FUEL_CAPACITY)?;
        if self.fuel + amount > FUEL_CAPACITY {
            return Err(RaceError::validation(
                "refuel amount",
                format!("tank exceeded: {} + {} > {}", self.fuel, amount, FUEL_CAPACITY),
            ));
        }

        let previous = self.fuel;
        self.fuel += amount;
        Ok(Refuel { previous, new: self.fuel })
    }

    /// Fit a part; the car moves to the development state.
    pub fn install_part(
        &mut self,
        kind: DevelopmentArea,
        spec: impl Into<String>,
    ) -> Result<PartInstallation> {
        let spec = spec.into();
        ensure_present("part spec", &spec)?;

        let part = Part { kind, spec };
        self.state = CarState::Development;
        self.parts.push(part.clone());
        debug!(car = self.number, kind = %kind, "Part installed");

        Ok(PartInstallation { installed: part, state: self.state, history: self.parts.clone() })
    }

    /// Accumulate one lap of tire wear, engine wear and fuel burn.
    pub fn compute_lap_wear(&mut self, lap: &LapConditions, config: &LapConfig) -> Result<LapWear> {
        if lap.lap_number == 0 {
            return Err(RaceError::validation("lap number", "laps are counted from 1"));
        }
        ensure_in_range("speed", lap.speed, 0.0, f64::MAX)?;
        ensure_in_range("humidity", lap.humidity, 0.0, 100.0)?;
        if !lap.temperature.is_finite() {
            return Err(RaceError::validation("temperature", "must be a finite number"));
        }
        if !lap.circuit_length_km.is_finite() || lap.circuit_length_km <= 0.0 {
            return Err(RaceError::validation("circuit length", "must be positive"));
        }

        let tire_life = config.baseline_tire_laps * lap.circuit_type.tire_life_factor();
        let temperature_factor = if lap.temperature > 35.0 {
            1.03
        } else if lap.temperature < 15.0 {
            1.05
        } else {
            0.98
        };
        let tire_delta = (lap.lap_number as f64 / tire_life) * 100.0 * temperature_factor;

        let humidity_factor = if lap.humidity >= 60.0 { 1.1 } else { 1.0 };
        let engine_delta = (lap.speed / self.max_speed) * humidity_factor;

        let fuel_needed =
            config.fuel_per_lap * (lap.circuit_length_km / config.reference_length_km);
        let fuel_consumed = fuel_needed.min(self.fuel);

        self.tire_wear = (self.tire_wear + tire_delta).min(MAX_WEAR);
        self.engine_wear = (self.engine_wear + engine_delta).min(MAX_WEAR);
        self.fuel -= fuel_consumed;

        Ok(LapWear {
            tire_wear: self.tire_wear,
            engine_wear: self.engine_wear,
            fuel_consumed,
            fuel_remaining: self.fuel,
        })
    }

    /// Service the car. The stop time is added to the car's race time and the
    /// report appended to its pit history.
    pub fn pit_stop(&mut self, request: PitStopRequest) -> Result<PitStopReport> {
        if let Some(amount) = request.fuel_amount {
            ensure_in_range("refuel amount", amount, 0.0, FUEL_CAPACITY)?;
        }

        let mut operations = Vec::new();
        let mut total_time = PIT_BASE_TIME;

        if let Some(compound) = request.tire_compound {
            self.change_tires(compound);
            operations.push(PitOperation::TireChange);
            total_time += PIT_TIRE_CHANGE_TIME;
        }

        if let Some(amount) = request.fuel_amount {
            self.fuel = (self.fuel + amount).min(FUEL_CAPACITY);
            operations.push(PitOperation::Refuel);
            total_time += PIT_REFUEL_TIME;
        }

        self.state = CarState::InPits;
        self.race_time += total_time;

        let report =
            PitStopReport { lap: self.laps_completed, state: self.state, operations, total_time };
        debug!(car = self.number, lap = report.lap, time = total_time, "Pit stop");
        self.pit_history.push(report.clone());
        Ok(report)
    }

    pub fn wear_stats(&self) -> WearStats {
        WearStats {
            tire_wear: self.tire_wear,
            fuel: self.fuel,
            engine_wear: self.engine_wear,
            state: self.state,
        }
    }

    pub(crate) fn set_last_lap_time(&mut self, time: f64) {
        self.last_lap_time = Some(time);
    }

    /// Book a completed race lap.
    pub(crate) fn complete_lap(&mut self, lap_time: f64, distance_km: f64) {
        self.race_time += lap_time;
        self.distance_km += distance_km;
        self.laps_completed += 1;
        self.stint_laps += 1;
        self.last_lap_time = Some(lap_time);
    }

    /// Clear per-race accumulators before a new event.
    pub(crate) fn reset_race_progress(&mut self) {
        self.race_time = 0.0;
        self.distance_km = 0.0;
        self.laps_completed = 0;
        self.last_lap_time = None;
        self.pit_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Skills;
    use proptest::prelude::*;

    fn car() -> Car {
        Car::new(44, "Mercedes", "W13", TireCompound::Soft, 330.0, 50.0)
    }

    fn lap(lap_number: u32) -> LapConditions {
        LapConditions {
            lap_number,
            speed: 200.0,
            temperature: 25.0,
            humidity: 50.0,
            circuit_length_km: 5.0,
            circuit_type: CircuitType::HighDegradation,
        }
    }

    proptest! {
        #[test]
        fn prop_change_tires_always_resets_wear(
            compounds in
                prop::collection::vec(prop::sample::select(TireCompound::ALL.to_vec()), 1..10),
            wear in 0.0f64..=100.0,
        ) {
            let mut car = car();
            car.set_initial_wear(InitialWear { tire_wear: wear, engine_wear: 0.0, fuel: 50.0 })
            .unwrap();
            for compound in compounds {
                let change = car.change_tires(compound);
                prop_assert!(change.wear_reset);
                prop_assert_eq!(car.tire_wear(), 0.0);
            }
        }

        #[test]
        fn prop_split_refuel_matches_single_refuel(
            initial in 0.0f64..=100.0,
            a in 0.0f64..=50.0,
            b in 0.0f64..=50.0,
        ) {
            prop_assume!(initial + a + b <= 100.0);
            let mut split = Car::new(1, "A", "B", TireCompound::Medium, 300.0, initial);
            let mut single = split.clone();
            split.refuel(a).unwrap();
            split.refuel(b).unwrap();
            single.refuel(a + b).unwrap();
            prop_assert!((split.fuel() - single.fuel()).abs() < 1e-9);
        }

        #[test]
        fn prop_overflowing_refuel_leaves_tank_untouched(
            initial in 50.0f64..=100.0,
            amount in 50.0f64..=100.0,
        ) {
            prop_assume!(initial + amount > 100.0);
            let mut car = Car::new(1, "A", "B", TireCompound::Medium, 300.0, initial);
            prop_assert!(car.refuel(amount).is_err());
            prop_assert_eq!(car.fuel(), initial);
        }

        #[test]
        fn prop_wear_never_decreases_within_stint(laps in 1u32..60) {
            let mut car = Car::new(1, "A", "B", TireCompound::Medium, 300.0, 100.0);
            let config = LapConfig::default();
            let mut previous = (car.tire_wear(), car.engine_wear(), car.fuel());
            for n in 1..=laps {
                let wear = car.compute_lap_wear(&lap(n), &config).unwrap();
                prop_assert!(wear.tire_wear >= previous.0);
                prop_assert!(wear.engine_wear >= previous.1);
                prop_assert!(wear.fuel_remaining <= previous.2);
                prop_assert!(wear.fuel_remaining >= 0.0);
                previous = (wear.tire_wear, wear.engine_wear, wear.fuel_remaining);
            }
        }
    }

    #[test]
    fn initial_wear_validates_before_mutating() {
        let mut car = car();
        let err = car
            .set_initial_wear(InitialWear { tire_wear: 10.0, engine_wear: 120.0, fuel: 80.0 })
            .unwrap_err();
        assert!(matches!(err, RaceError::Validation { .. }));
        assert_eq!(car.tire_wear(), 0.0);
        assert_eq!(car.fuel(), 50.0);

        car.set_initial_wear(InitialWear { tire_wear: 10.0, engine_wear: 20.0, fuel: 80.0 })
            .unwrap();
        assert_eq!(car.wear_stats().engine_wear, 20.0);
    }

    #[test]
    fn optimal_condition_requires_driver_when_racing() {
        let mut car = Car::new(44, "Mercedes", "W13", TireCompound::Soft, 330.0, 100.0);
        assert!(!car.is_optimal_condition());
        car.set_state(CarState::Reserve);
        assert!(car.is_optimal_condition());

        car.resume_racing();
        let mut driver = Driver::new("Lewis Hamilton", "United Kingdom", 0);
        driver.set_skills(Skills::new(95.0, 90.0, 85.0)).unwrap();
        driver.assign_to_car(&mut car).unwrap();
        assert!(car.is_optimal_condition());

        car.set_initial_wear(InitialWear { tire_wear: 30.0, engine_wear: 0.0, fuel: 100.0 })
            .unwrap();
        assert!(!car.is_optimal_condition());
    }

    #[test]
    fn refuel_reports_levels() {
        let mut car = car();
        let refuel = car.refuel(30.0).unwrap();
        assert_eq!(refuel, Refuel { previous: 50.0, new: 80.0 });
        assert!(car.refuel(-1.0).is_err());
        assert!(car.refuel(21.0).unwrap_err().to_string().contains("tank exceeded"));
        assert_eq!(car.fuel(), 80.0);
    }

    #[test]
    fn install_part_tracks_history() {
        let mut car = car();
        car.install_part(DevelopmentArea::Engine, "spec 2").unwrap();
        let installation = car.install_part(DevelopmentArea::Aero, "low drag wing").unwrap();
        assert_eq!(installation.state, CarState::Development);
        assert_eq!(installation.history.len(), 2);
        assert!(car.install_part(DevelopmentArea::Suspension, "").is_err());
        assert_eq!(car.parts().len(), 2);
    }

    #[test]
    fn lap_wear_formula() {
        let mut car = Car::new(44, "Mercedes", "W13", TireCompound::Soft, 340.0, 80.0);
        car.set_initial_wear(InitialWear { tire_wear: 10.0, engine_wear: 20.0, fuel: 80.0 })
            .unwrap();

        let wear = car.compute_lap_wear(&lap(10), &LapConfig::default()).unwrap();
        // 10 / (40 * 0.8) * 100 * 0.98
        assert!((wear.tire_wear - (10.0 + 30.625)).abs() < 1e-9);
        assert!((wear.engine_wear - (20.0 + 200.0 / 340.0)).abs() < 1e-9);
        assert_eq!(wear.fuel_consumed, 2.5);
        assert_eq!(wear.fuel_remaining, 77.5);
    }

    #[test]
    fn lap_wear_weather_factors() {
        let config = LapConfig::default();
        let mut hot = Car::new(1, "A", "B", TireCompound::Medium, 300.0, 100.0);
        let wear = hot
            .compute_lap_wear(
                &LapConditions {
                    temperature: 40.0,
                    humidity: 70.0,
                    speed: 300.0,
                    circuit_type: CircuitType::LowDegradation,
                    ..lap(12)
                },
                &config,
            )
            .unwrap();
        assert!((wear.tire_wear - 12.0 / 48.0 * 100.0 * 1.03).abs() < 1e-9);
        assert!((wear.engine_wear - 1.1).abs() < 1e-9);

        let mut cold = Car::new(1, "A", "B", TireCompound::Medium, 300.0, 1.0);
        let wear =
            cold.compute_lap_wear(&LapConditions { temperature: 10.0, ..lap(1) }, &config).unwrap();
        assert!((wear.tire_wear - 1.0 / 32.0 * 100.0 * 1.05).abs() < 1e-9);
        assert_eq!(wear.fuel_consumed, 1.0, "cannot burn more than the tank holds");
        assert_eq!(wear.fuel_remaining, 0.0);
    }

    #[test]
    fn lap_wear_rejects_bad_input() {
        let mut car = car();
        let config = LapConfig::default();
        assert!(car.compute_lap_wear(&lap(0), &config).is_err());
        let zero_length = LapConditions { circuit_length_km: 0.0, ..lap(1) };
        assert!(car.compute_lap_wear(&zero_length, &config).is_err());
        let soaked = LapConditions { humidity: 101.0, ..lap(1) };
        assert!(car.compute_lap_wear(&soaked, &config).is_err());
        assert_eq!(car.fuel(), 50.0);
    }

    #[test]
    fn pit_stop_times_and_history() {
        let mut car = car();
        car.set_initial_wear(InitialWear { tire_wear: 60.0, engine_wear: 10.0, fuel: 50.0 })
            .unwrap();

        let request = PitStopRequest::tires(TireCompound::Hard).with_fuel(30.0);
        let report = car.pit_stop(request).unwrap();
        assert_eq!(report.operations, vec![PitOperation::TireChange, PitOperation::Refuel]);
        assert!((report.total_time - 5.3).abs() < 1e-9);
        assert_eq!(report.state, CarState::InPits);
        assert_eq!(car.tire_wear(), 0.0);
        assert_eq!(car.fuel(), 80.0);
        assert_eq!(car.tires(), TireCompound::Hard);

        let report = car.pit_stop(PitStopRequest::default().with_fuel(40.0)).unwrap();
        assert_eq!(report.operations, vec![PitOperation::Refuel]);
        assert!((report.total_time - 2.8).abs() < 1e-9);
        assert_eq!(car.fuel(), 100.0);

        let report = car.pit_stop(PitStopRequest::default()).unwrap();
        assert!(report.operations.is_empty());
        assert_eq!(report.total_time, 1.0);

        assert_eq!(car.pit_history().len(), 3);
        assert!((car.race_time() - 9.1).abs() < 1e-9);

        assert!(car.pit_stop(PitStopRequest::default().with_fuel(150.0)).is_err());
        assert_eq!(car.pit_history().len(), 3);
    }

    #[test]
    fn release_clears_both_sides() {
        let mut car = car();
        let mut driver = Driver::new("George Russell", "United Kingdom", 0);
        driver.set_skills(Skills::new(92.0, 90.0, 88.0)).unwrap();
        driver.assign_to_car(&mut car).unwrap();
        assert_eq!(car.driver().unwrap().current_car(), Some(44));

        let driver = car.release_driver().unwrap();
        assert!(!car.has_driver());
        assert_eq!(driver.current_car(), None);
        assert_eq!(driver.cars_driven().len(), 1);
        assert!(car.release_driver().is_none());
        assert_eq!(car.driver_name(), "Car #44");
    }
}
