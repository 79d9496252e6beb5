//! Three-stage knockout qualifying

use serde::{Deserialize, Serialize};
use tracing::info;

use super::lap::LapTime;
use super::Race;
use crate::observer::SimEvent;
use crate::types::RaceState;
use crate::Result;

/// A car's single timed lap in a qualifying stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingTime {
    pub car_number: u32,
    pub driver: String,
    pub time: f64,
}

impl From<LapTime> for QualifyingTime {
    fn from(lap: LapTime) -> Self {
        Self { car_number: lap.car_number, driver: lap.driver, time: lap.time }
    }
}

/// One stage, fastest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualifyingStage {
    pub stage: u8,
    pub times: Vec<QualifyingTime>,
    /// Car numbers knocked out at the end of this stage, fastest first
    pub eliminated: Vec<u32>,
}

impl QualifyingStage {
    /// Car numbers that made it through to the next stage.
    pub fn advanced(&self) -> Vec<u32> {
        self.times
            .iter()
            .map(|time| time.car_number)
            .filter(|number| !self.eliminated.contains(number))
            .collect()
    }
}

/// A starting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSlot {
    /// 1-based
    pub position: usize,
    pub car_number: u32,
    pub driver: String,
}

/// Result of [`Race::run_qualifying`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingResult {
    pub q1: QualifyingStage,
    pub q2: QualifyingStage,
    pub q3: QualifyingStage,
    pub grid: Vec<GridSlot>,
}

impl Race {
    /// Run Q1, Q2 and Q3 and set the starting grid.
    ///
    /// Each stage times one lap per remaining car and knocks out the slowest
    /// `qualifying_cut`, always leaving at least one car to go through. The
    /// grid is the Q3 order followed by the Q2 and then the Q1 eliminations.
    /// Only a pending race can qualify.
    pub fn run_qualifying(&mut self) -> Result<QualifyingResult> {
        if self.state != RaceState::Pending {
            return Err(self.reject("run qualifying", format!("race is {}", self.state)));
        }
        self.ensure_valid("run qualifying")?;
        let cut = self.config.race.qualifying_cut;

        let entrants: Vec<usize> = (0..self.cars.len()).collect();
        let q1 = self.qualifying_stage(1, &entrants, cut);
        let q2_entrants = self.indices_of(&q1.advanced());
        let q2 = self.qualifying_stage(2, &q2_entrants, cut);
        let q3_entrants = self.indices_of(&q2.advanced());
        let q3 = self.qualifying_stage(3, &q3_entrants, 0);

        let order = q3
            .times
            .iter()
            .map(|time| time.car_number)
            .chain(q2.eliminated.iter().copied())
            .chain(q1.eliminated.iter().copied());
        let grid: Vec<GridSlot> = order
            .enumerate()
            .map(|(index, car_number)| GridSlot {
                position: index + 1,
                car_number,
                driver: self
                    .car(car_number)
                    .map(|car| car.driver_name())
                    .unwrap_or_else(|_| format!("Car #{}", car_number)),
            })
            .collect();

        info!(
            race = %self.name,
            pole = ?grid.first().map(|slot| slot.car_number),
            "Qualifying complete"
        );
        self.grid = grid.clone();
        let result = QualifyingResult { q1, q2, q3, grid };
        self.qualifying = Some(result.clone());
        Ok(result)
    }

    fn indices_of(&self, numbers: &[u32]) -> Vec<usize> {
        numbers
            .iter()
            .filter_map(|number| self.cars.iter().position(|car| car.number() == *number))
            .collect()
    }

    fn qualifying_stage(&mut self, stage: u8, entrants: &[usize], cut: usize) -> QualifyingStage {
        let mut times: Vec<QualifyingTime> =
            entrants.iter().map(|&index| QualifyingTime::from(self.time_lap(index, 0))).collect();
        times.sort_by(|a, b| a.time.total_cmp(&b.time));

        let cut = cut.min(times.len().saturating_sub(1));
        let eliminated: Vec<u32> =
            times[times.len() - cut..].iter().map(|time| time.car_number).collect();

        self.observer.emit(SimEvent::QualifyingStage { stage, eliminated: eliminated.clone() });
        QualifyingStage { stage, times, eliminated }
    }
}
