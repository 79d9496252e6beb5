//! Deterministic motorsport championship simulation.
//!
//! Paddock models a race weekend as a set of plain entities with validated
//! mutating operations: circuits with weather and lap records, cars that wear
//! tires and burn fuel, drivers with skill profiles and career statistics,
//! teams investing in development, advisory pit strategies, and a race that
//! drives qualifying, the lap loop and the final classification.
//!
//! # Features
//!
//! - **Validated state**: every setter checks its input before mutating
//! - **Injectable randomness**: lap noise and development setbacks draw from a
//!   [`RandomSource`](random::RandomSource), seeded or scripted
//! - **Observable**: strategy checks and race progress emit events to an
//!   optional [`Observer`](observer::Observer)
//! - **Configurable rules**: every constant lives in [`SimulationConfig`] and
//!   can be loaded from YAML
//!
//! # Quick Start
//!
//! ```rust
//! use paddock::{Car, Circuit, Driver, Race, Skills, TireCompound};
//! use paddock::random::SeededRandom;
//! use paddock::types::{CircuitType, WeatherCondition};
//!
//! fn main() -> paddock::Result<()> {
//!     let circuit =
//!         Circuit::new("Silverstone", "United Kingdom", 5.891, CircuitType::HighDegradation);
//!     let mut race = Race::new("British Grand Prix", circuit, "2024-07-07")
//!         .with_random(SeededRandom::from_seed(2024));
//!
//!     for number in 1..=12 {
//!         let mut car = Car::new(number, "Team", "Car", TireCompound::Medium, 320.0, 100.0);
//!         let mut driver = Driver::new(format!("Driver {}", number), "United Kingdom", 0);
//!         driver.set_skills(Skills::new(92.0, 88.0, 90.0))?;
//!         driver.assign_to_car(&mut car)?;
//!         race.register_car(car)?;
//!     }
//!     race.set_weather(WeatherCondition::Dry, 21.0, 55.0)?;
//!
//!     race.start_race()?;
//!     let classification = race.finish_race()?;
//!     for entry in &classification.podium {
//!         println!("P{} {} {}", entry.position, entry.driver, entry.display);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
pub mod observer;
pub mod random;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Entities
pub mod car;
pub mod circuit;
pub mod driver;
pub mod strategy;
pub mod team;

// Event orchestration
pub mod race;

// Core exports
pub use error::*;
pub use types::*;

// Entity exports
pub use car::{Car, InitialWear, LapConditions, LapWear, PitStopReport, PitStopRequest};
pub use circuit::{Circuit, LapRecord};
pub use config::SimulationConfig;
pub use driver::{Driver, DrivingConditions, Skills};
pub use race::{Classification, Race, RaceResults};
pub use strategy::Strategy;
pub use team::Team;
