//! Fixtures shared by unit tests and benchmarks
//!
//! Builds circuits, seated cars and ready-to-start races so tests only spell
//! out the part of the setup they care about.

#![cfg(any(test, feature = "benchmark"))]

use crate::car::Car;
use crate::circuit::Circuit;
use crate::driver::{Driver, Skills};
use crate::race::Race;
use crate::random::SequenceRandom;
use crate::types::{CircuitType, CornerDifficulty, TireCompound, WeatherCondition};

/// Race date used by every fixture.
pub const SAMPLE_DATE: &str = "2024-09-01";

/// Monza: 5.793 km, low degradation, three corners and two DRS zones.
pub fn sample_circuit() -> Circuit {
    let mut circuit = Circuit::new("Monza", "Italy", 5.793, CircuitType::LowDegradation);
    for (name, speed, difficulty) in [
        ("Variante del Rettifilo", 80.0, CornerDifficulty::High),
        ("Curva di Lesmo", 180.0, CornerDifficulty::Medium),
        ("Parabolica", 200.0, CornerDifficulty::High),
    ] {
        // Fixture data is always valid
        let _ = circuit.add_corner(name, speed, difficulty);
    }
    let _ = circuit.add_drs_zone("Main straight", 1120.0);
    let _ = circuit.add_drs_zone("Curva Grande straight", 720.0);
    circuit
}

/// Skills for fixture driver `number`: speed between 90 and 99.
pub fn sample_skills(number: u32) -> Skills {
    Skills::new(90.0 + (number % 10) as f64, 90.0, 90.0)
}

/// A car on medium tires with a full tank and "Driver {number}" seated in it.
pub fn seat(number: u32, max_speed: f64) -> Car {
    let mut car = Car::new(number, "Paddock", "P1", TireCompound::Medium, max_speed, 100.0);
    let mut driver = Driver::new(format!("Driver {}", number), "Italy", 0);
    if driver.set_skills(sample_skills(number)).is_ok() {
        // Rejected only when the car is too fast for the fixture skills
        let _ = driver.assign_to_car(&mut car);
    }
    car
}

/// A dry race at Monza with `cars` seated 330 km/h cars and a noise-free
/// random source that never triggers mistakes.
pub fn sample_race(cars: u32) -> Race {
    let mut race = Race::new("Italian Grand Prix", sample_circuit(), SAMPLE_DATE)
        .with_random(SequenceRandom::constant(0.5));
    for number in 1..=cars {
        let _ = race.register_car(seat(number, 330.0));
    }
    let _ = race.set_weather(WeatherCondition::Dry, 25.0, 50.0);
    race
}

/// Install a fmt subscriber once per test binary.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
