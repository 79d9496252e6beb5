//! Lap timing and the race lap loop

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Race;
use crate::car::LapConditions;
use crate::observer::SimEvent;
use crate::types::{RaceState, WeatherCondition};
use crate::{RaceError, Result};

/// Wear-related lap time loss per point of tire wear.
const TIRE_WEAR_PENALTY: f64 = 0.001;

/// One car's time over one lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTime {
    pub car_number: u32,
    pub driver: String,
    pub time: f64,
    pub mistake: bool,
}

/// Fastest lap of the race so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastestLap {
    pub car_number: u32,
    pub driver: String,
    pub time: f64,
    pub lap: u32,
}

/// Returned by [`Race::advance_lap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapSummary {
    pub lap: u32,
    pub times: Vec<LapTime>,
    /// Set when this lap produced a new race fastest lap
    pub new_fastest: Option<FastestLap>,
    pub leader: Option<u32>,
}

impl Race {
    /// Time one lap for the car at `index` without booking it as a race lap.
    ///
    /// The lap may set a new circuit record.
    pub(super) fn time_lap(&mut self, index: usize, lap: u32) -> LapTime {
        let condition = self.weather.map_or(WeatherCondition::Dry, |weather| weather.condition);
        let length = self.circuit.length_km();
        let jitter = self.config.lap.jitter;
        let mistake_probability = self.config.lap.mistake_probability;
        let mistake_penalty = self.config.lap.mistake_penalty;

        let noise = self.rng.next_f64();
        let slipped = self.rng.chance(mistake_probability);

        let car = &mut self.cars[index];
        let base = length / car.max_speed() * 3600.0;
        let wear_factor = 1.0 + car.tire_wear() * TIRE_WEAR_PENALTY;
        let driver_factor = car.driver().map_or(1.0, |driver| {
            let skills = driver.skills();
            1.0 - ((skills.speed + skills.consistency) / 200.0) * 0.1
        });

        let mistake = slipped && car.has_driver();
        let mut random_factor = 1.0 + jitter * noise;
        if mistake {
            random_factor += mistake_penalty;
            if let Some(driver) = car.driver_mut() {
                driver.record_mistake();
            }
        }

        let time = base
            * condition.lap_time_factor()
            * random_factor
            * wear_factor
            * car.tires().lap_time_factor()
            * driver_factor;
        car.set_last_lap_time(time);

        let car_number = car.number();
        let driver = car.driver_name();
        if mistake {
            self.observer.emit(SimEvent::DriverMistake { car_number, driver: driver.clone(), lap });
        }

        let date = self.record_date();
        self.circuit.update_lap_record_on(time, driver.clone(), date);
        LapTime { car_number, driver, time, mistake }
    }

    /// Time a single lap for `car_number` outside the race loop.
    pub fn simulate_lap(&mut self, car_number: u32) -> Result<LapTime> {
        if self.weather.is_none() {
            return Err(self.reject("simulate lap", "weather not set"));
        }
        let index = self
            .cars
            .iter()
            .position(|car| car.number() == car_number)
            .ok_or(RaceError::UnknownCar { car_number })?;
        Ok(self.time_lap(index, self.current_lap))
    }

    /// Run the next race lap for every car.
    ///
    /// Cars sitting in the pits rejoin first. Each lap books time and distance,
    /// accumulates wear and fuel burn, and checks for a new fastest lap.
    pub fn advance_lap(&mut self) -> Result<LapSummary> {
        if !matches!(self.state, RaceState::Started | RaceState::InProgress) {
            return Err(self.reject("advance lap", format!("race is {}", self.state)));
        }
        if self.current_lap >= self.total_laps {
            return Err(self.reject("advance lap", "all laps completed"));
        }

        self.current_lap += 1;
        self.state = RaceState::InProgress;
        let lap = self.current_lap;
        let length = self.circuit.length_km();
        let circuit_type = self.circuit.circuit_type();
        let (temperature, humidity) =
            self.weather.map_or((25.0, 50.0), |weather| (weather.temperature, weather.humidity));

        let mut times = Vec::with_capacity(self.cars.len());
        let mut new_fastest = None;
        for index in 0..self.cars.len() {
            self.cars[index].resume_racing();
            let lap_time = self.time_lap(index, lap);

            let car = &mut self.cars[index];
            car.complete_lap(lap_time.time, length);
            car.compute_lap_wear(
                &LapConditions {
                    lap_number: car.stint_laps(),
                    speed: length / lap_time.time * 3600.0,
                    temperature,
                    humidity,
                    circuit_length_km: length,
                    circuit_type,
                },
                &self.config.lap,
            )?;
            if let Some(driver) = car.driver_mut() {
                driver.record_lap_completed();
            }

            if self.fastest_lap.as_ref().is_none_or(|fastest| lap_time.time < fastest.time) {
                let fastest = FastestLap {
                    car_number: lap_time.car_number,
                    driver: lap_time.driver.clone(),
                    time: lap_time.time,
                    lap,
                };
                self.observer.emit(SimEvent::FastestLap {
                    car_number: fastest.car_number,
                    time: fastest.time,
                    lap,
                });
                self.fastest_lap = Some(fastest.clone());
                new_fastest = Some(fastest);
            }
            times.push(lap_time);
        }

        let leader = self
            .cars
            .iter()
            .min_by(|a, b| a.race_time().total_cmp(&b.race_time()))
            .map(|car| car.number());
        trace!(race = %self.name, lap, leader = ?leader, "Lap complete");
        self.observer.emit(SimEvent::LapCompleted { lap, leader });

        Ok(LapSummary { lap, times, new_fastest, leader })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::PitStopRequest;
    use crate::observer::RecordingObserver;
    use crate::random::SequenceRandom;
    use crate::test_utils::sample_race;
    use crate::types::{CarState, TireCompound};

    #[test]
    fn lap_time_formula_without_noise() {
        // noise 0, no mistake
        let mut race = sample_race(10).with_random(SequenceRandom::new(vec![0.0, 0.9]));
        let lap = race.simulate_lap(1).unwrap();

        let skills = race.car(1).unwrap().driver().unwrap().skills();
        let base = 5.793 / 330.0 * 3600.0;
        let driver_factor = 1.0 - ((skills.speed + skills.consistency) / 200.0) * 0.1;
        let expected = base * TireCompound::Medium.lap_time_factor() * driver_factor;
        assert!((lap.time - expected).abs() < 1e-9);
        assert!(!lap.mistake);
        assert_eq!(race.circuit().lap_record().unwrap().time, lap.time);
    }

    #[test]
    fn mistakes_cost_time_and_are_counted() {
        let recorder = RecordingObserver::new();
        let mut race = sample_race(10)
            .with_random(SequenceRandom::new(vec![0.0, 0.1]))
            .with_observer(Box::new(recorder.clone()));
        let lap = race.simulate_lap(3).unwrap();
        assert!(lap.mistake);

        let skills = race.car(3).unwrap().driver().unwrap().skills();
        let driver_factor = 1.0 - ((skills.speed + skills.consistency) / 200.0) * 0.1;
        let base = 5.793 / 330.0 * 3600.0 * driver_factor;
        assert!((lap.time - base * 1.05).abs() < 1e-9);
        assert_eq!(race.car(3).unwrap().driver().unwrap().performance().mistakes, 1);
        assert!(recorder.events().contains(&SimEvent::DriverMistake {
            car_number: 3,
            driver: "Driver 3".into(),
            lap: 0
        }));
    }

    #[test]
    fn wet_weather_slows_laps() {
        let mut race = sample_race(10).with_random(SequenceRandom::new(vec![0.0, 0.9]));
        let dry = race.simulate_lap(1).unwrap().time;
        race.set_weather(WeatherCondition::Rain, 18.0, 85.0).unwrap();
        let wet = race.simulate_lap(1).unwrap().time;
        assert!((wet / dry - 1.15).abs() < 1e-9);
    }

    #[test]
    fn advance_lap_books_progress() {
        let mut race = sample_race(10);
        assert!(race.advance_lap().is_err(), "race not started");
        race.begin_race().unwrap();

        let summary = race.advance_lap().unwrap();
        assert_eq!(summary.lap, 1);
        assert_eq!(summary.times.len(), 10);
        assert!(summary.new_fastest.is_some());
        assert_eq!(race.state(), RaceState::InProgress);

        let car = race.car(1).unwrap();
        assert_eq!(car.laps_completed(), 1);
        assert_eq!(car.stint_laps(), 1);
        assert!((car.distance_km() - 5.793).abs() < 1e-9);
        assert!(car.tire_wear() > 0.0);
        assert!(car.fuel() < 100.0);
        assert_eq!(car.driver().unwrap().performance().laps_completed, 1);
    }

    #[test]
    fn pitted_car_rejoins_on_next_lap() {
        let mut race = sample_race(10);
        race.begin_race().unwrap();
        race.advance_lap().unwrap();
        race.pit_stop(2, PitStopRequest::tires(TireCompound::Hard)).unwrap();
        assert_eq!(race.car(2).unwrap().state(), CarState::InPits);
        assert_eq!(race.car(2).unwrap().stint_laps(), 0);

        race.advance_lap().unwrap();
        let car = race.car(2).unwrap();
        assert_eq!(car.state(), CarState::Racing);
        assert_eq!(car.stint_laps(), 1);
        assert_eq!(car.laps_completed(), 2);
    }

    #[test]
    fn lap_loop_stops_at_total() {
        let mut race = sample_race(10);
        race.begin_race().unwrap();
        for _ in 0..race.total_laps() {
            race.advance_lap().unwrap();
        }
        assert!(race.advance_lap().is_err());
        assert_eq!(race.current_lap(), race.total_laps());

        // 37 laps at 2.8965 per lap burn more than a full tank
        let car = race.car(1).unwrap();
        assert_eq!(car.fuel(), 0.0);
        assert_eq!(car.laps_completed(), race.total_laps());
        assert_eq!(car.state(), CarState::Racing);
    }
}
