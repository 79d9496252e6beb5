//! Fixtures shared by the integration tests

#![allow(dead_code)]

use paddock::random::RandomSource;
use paddock::types::{CircuitType, CornerDifficulty, TireCompound, WeatherCondition};
use paddock::{Car, Circuit, Driver, Race, Skills};

pub const RACE_DATE: &str = "2024-09-01";

pub fn monza() -> Circuit {
    let mut circuit = Circuit::new("Monza", "Italy", 5.793, CircuitType::LowDegradation);
    circuit.add_corner("Variante del Rettifilo", 80.0, CornerDifficulty::High).unwrap();
    circuit.add_corner("Curva di Lesmo", 180.0, CornerDifficulty::Medium).unwrap();
    circuit.add_corner("Parabolica", 200.0, CornerDifficulty::High).unwrap();
    circuit.add_drs_zone("Main straight", 1120.0).unwrap();
    circuit.add_drs_zone("Curva Grande straight", 720.0).unwrap();
    circuit
}

pub fn driver(name: &str, skills: Skills) -> Driver {
    let mut driver = Driver::new(name, "Italy", 0);
    driver.set_skills(skills).unwrap();
    driver
}

/// A 330 km/h car with a seated driver whose speed grows with the car number.
pub fn seated_car(number: u32) -> Car {
    let mut car = Car::new(number, "Paddock", "P1", TireCompound::Medium, 330.0, 100.0);
    let skills = Skills::new(90.0 + (number % 10) as f64, 88.0 + (number % 3) as f64, 90.0);
    driver(&format!("Driver {}", number), skills).assign_to_car(&mut car).unwrap();
    car
}

/// A dry, valid race with `cars` seated cars.
pub fn dry_race(cars: u32, rng: impl RandomSource + 'static) -> Race {
    let mut race = Race::new("Italian Grand Prix", monza(), RACE_DATE).with_random(rng);
    for number in 1..=cars {
        race.register_car(seated_car(number)).unwrap();
    }
    race.set_weather(WeatherCondition::Dry, 25.0, 50.0).unwrap();
    race
}
