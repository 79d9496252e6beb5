//! Standings, classification and points

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::lap::FastestLap;
use super::Race;
use crate::driver::{FASTEST_LAP_POINTS, SECOND_PLACE_POINTS, THIRD_PLACE_POINTS, WIN_POINTS};
use crate::observer::SimEvent;
use crate::types::RaceState;
use crate::Result;

/// Format a race time as `H:MM:SS.mmm`.
pub fn format_race_time(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let minutes = millis / 60_000 % 60;
    let secs = millis / 1000 % 60;
    format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, millis % 1000)
}

/// Format a gap to the leader as `+S.mmm`.
pub fn format_gap(seconds: f64) -> String {
    format!("+{:.3}", seconds.max(0.0))
}

/// One row of the running order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub position: usize,
    pub car_number: u32,
    pub driver: String,
    pub race_time: f64,
    /// Seconds behind the leader; zero for the leader
    pub gap: f64,
    /// Absolute time for the leader, gap for everyone else
    pub display: String,
}

/// Returned by [`Race::results`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResults {
    pub standings: Vec<Standing>,
    pub laps_completed: u32,
    pub laps_remaining: u32,
    pub state: RaceState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodiumEntry {
    pub position: usize,
    pub car_number: u32,
    pub driver: String,
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardReason {
    Win,
    SecondPlace,
    ThirdPlace,
    FastestLap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsAward {
    pub car_number: u32,
    pub driver: String,
    pub points: u32,
    pub reason: AwardReason,
}

/// Returned by [`Race::finish_race`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub podium: Vec<PodiumEntry>,
    pub fastest_lap: Option<FastestLap>,
    pub points: Vec<PointsAward>,
    pub standings: Vec<Standing>,
}

impl Race {
    fn standings(&self) -> Vec<Standing> {
        let mut order: Vec<usize> = (0..self.cars.len()).collect();
        order.sort_by(|&a, &b| self.cars[a].race_time().total_cmp(&self.cars[b].race_time()));

        let leader_time = order.first().map_or(0.0, |&index| self.cars[index].race_time());
        order
            .into_iter()
            .enumerate()
            .map(|(position, index)| {
                let car = &self.cars[index];
                let gap = car.race_time() - leader_time;
                Standing {
                    position: position + 1,
                    car_number: car.number(),
                    driver: car.driver_name(),
                    race_time: car.race_time(),
                    gap,
                    display: if position == 0 {
                        format_race_time(car.race_time())
                    } else {
                        format_gap(gap)
                    },
                }
            })
            .collect()
    }

    /// Current running order and lap progress.
    pub fn results(&self) -> RaceResults {
        RaceResults {
            standings: self.standings(),
            laps_completed: self.current_lap,
            laps_remaining: self.total_laps.saturating_sub(self.current_lap),
            state: self.state,
        }
    }

    /// Classify the race once every lap has run: credit the podium, the
    /// fastest lap and the positions gained from the grid.
    pub fn finish_race(&mut self) -> Result<Classification> {
        if self.state != RaceState::InProgress {
            return Err(self.reject("finish race", format!("race is {}", self.state)));
        }
        if self.current_lap < self.total_laps {
            return Err(self.reject(
                "finish race",
                format!("{} of {} laps completed", self.current_lap, self.total_laps),
            ));
        }

        let standings = self.standings();
        let mut podium = Vec::new();
        let mut points = Vec::new();
        let awards = [
            (AwardReason::Win, WIN_POINTS),
            (AwardReason::SecondPlace, SECOND_PLACE_POINTS),
            (AwardReason::ThirdPlace, THIRD_PLACE_POINTS),
        ];
        for (standing, (reason, award)) in standings.iter().zip(awards) {
            let car = self.car_mut(standing.car_number)?;
            if let Some(driver) = car.driver_mut() {
                match standing.position {
                    1 => {
                        driver.record_win();
                    }
                    position => {
                        driver.record_podium(position as u8)?;
                    }
                }
                points.push(PointsAward {
                    car_number: standing.car_number,
                    driver: standing.driver.clone(),
                    points: award,
                    reason,
                });
            }
            podium.push(PodiumEntry {
                position: standing.position,
                car_number: standing.car_number,
                driver: standing.driver.clone(),
                display: standing.display.clone(),
            });
        }

        if let Some(fastest) = self.fastest_lap.clone() {
            if let Some(driver) = self.car_mut(fastest.car_number)?.driver_mut() {
                driver.record_fastest_lap();
                points.push(PointsAward {
                    car_number: fastest.car_number,
                    driver: fastest.driver.clone(),
                    points: FASTEST_LAP_POINTS,
                    reason: AwardReason::FastestLap,
                });
            }
        }

        let grid_positions: HashMap<u32, usize> =
            self.grid.iter().map(|slot| (slot.car_number, slot.position)).collect();
        for standing in &standings {
            let Some(&start) = grid_positions.get(&standing.car_number) else {
                continue;
            };
            let gained = start.saturating_sub(standing.position) as u32;
            if gained > 0 {
                if let Some(driver) = self.car_mut(standing.car_number)?.driver_mut() {
                    driver.record_overtakes(gained);
                }
            }
        }

        self.state = RaceState::Finished;
        let winner = standings.first().map(|standing| standing.car_number);
        info!(race = %self.name, winner = ?winner, "Race finished");
        self.observer.emit(SimEvent::RaceFinished { winner });

        Ok(Classification { podium, fastest_lap: self.fastest_lap.clone(), points, standings })
    }
}
