//! Pit strategies and their optimality heuristics
//!
//! A [`Strategy`] is advisory: [`Strategy::is_optimal`] grades the plan but
//! nothing stops a harness from executing a non-optimal one.
//!
//! ```rust
//! use paddock::Strategy;
//! use paddock::types::{Aggressiveness, TireCompound};
//!
//! let mut strategy = Strategy::new(
//!     Aggressiveness::Medium,
//!     vec![20, 35],
//!     vec![TireCompound::Medium, TireCompound::Hard],
//! ).unwrap();
//! assert!(strategy.is_optimal());
//!
//! let stop = strategy.register_stop(2.5).unwrap();
//! assert_eq!(stop.scheduled_lap, Some(20));
//! assert_eq!(strategy.next_stop().unwrap().lap, 35);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::error::ensure_in_range;
use crate::observer::{Observer, ObserverSlot, SimEvent};
use crate::types::{Aggressiveness, TireCompound};
use crate::{RaceError, Result};

/// Result of [`Strategy::register_stop`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub stop_number: usize,
    pub time: f64,
    /// `None` once more stops are made than were planned
    pub scheduled_lap: Option<u32>,
    pub tire: Option<TireCompound>,
    pub cumulative_time: f64,
}

/// The next unexecuted stop of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextStop {
    pub lap: u32,
    pub tire: TireCompound,
    pub estimated_time: f64,
    pub stop_number: usize,
}

/// A planned sequence of pit stops.
#[derive(Debug)]
pub struct Strategy {
    aggressiveness: Aggressiveness,
    laps: Vec<u32>,
    tires: Vec<TireCompound>,
    stops_made: usize,
    total_pit_time: f64,
    config: StrategyConfig,
    observer: ObserverSlot,
}

impl Strategy {
    /// Build a plan. `laps` and `tires` pair up one entry per stop and laps must
    /// be strictly increasing.
    pub fn new(
        aggressiveness: Aggressiveness,
        laps: Vec<u32>,
        tires: Vec<TireCompound>,
    ) -> Result<Self> {
        if laps.len() != tires.len() {
            return Err(RaceError::validation(
                "strategy",
                format!("{} stop laps but {} tire choices", laps.len(), tires.len()),
            ));
        }
        if laps.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(RaceError::validation("strategy", "stop laps must be strictly increasing"));
        }

        Ok(Self {
            aggressiveness,
            laps,
            tires,
            stops_made: 0,
            total_pit_time: 0.0,
            config: StrategyConfig::default(),
            observer: ObserverSlot::default(),
        })
    }

    pub fn with_config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer.set(observer);
        self
    }

    pub fn aggressiveness(&self) -> Aggressiveness {
        self.aggressiveness
    }

    pub fn planned_laps(&self) -> &[u32] {
        &self.laps
    }

    pub fn planned_tires(&self) -> &[TireCompound] {
        &self.tires
    }

    pub fn planned_stops(&self) -> usize {
        self.laps.len()
    }

    pub fn stops_made(&self) -> usize {
        self.stops_made
    }

    pub fn stops_remaining(&self) -> usize {
        self.laps.len().saturating_sub(self.stops_made)
    }

    pub fn total_pit_time(&self) -> f64 {
        self.total_pit_time
    }

    /// Stop count within bounds, tires matching aggressiveness, and even spacing.
    pub fn is_optimal(&self) -> bool {
        let stops = self.laps.len();
        self.observer.emit(SimEvent::StrategyCheckStarted { stops });

        let count_ok = (self.config.min_stops..=self.config.max_stops).contains(&stops);
        self.observer.emit(SimEvent::StrategyRule { rule: "stop_count", passed: count_ok });
        let tires_ok = self.aggressiveness_consistent();
        self.observer.emit(SimEvent::StrategyRule { rule: "aggressiveness", passed: tires_ok });
        let spacing_ok = self.stops_evenly_spaced();
        self.observer.emit(SimEvent::StrategyRule { rule: "even_spacing", passed: spacing_ok });

        let optimal = count_ok && tires_ok && spacing_ok;
        self.observer.emit(SimEvent::StrategyCheckFinished { optimal });
        optimal
    }

    /// High aggressiveness runs only hard tires, low only soft; medium is unconstrained.
    pub fn aggressiveness_consistent(&self) -> bool {
        match self.aggressiveness {
            Aggressiveness::High => self.tires.iter().all(|tire| *tire == TireCompound::Hard),
            Aggressiveness::Low => self.tires.iter().all(|tire| *tire == TireCompound::Soft),
            Aggressiveness::Medium => true,
        }
    }

    pub fn stops_evenly_spaced(&self) -> bool {
        let Some(&first) = self.laps.first() else {
            return false;
        };
        let (first_low, first_high) = self.config.first_stop_window;
        if !(first_low..=first_high).contains(&first) {
            return false;
        }

        let (gap_low, gap_high) = self.config.gap_window;
        let mut previous_gap: Option<u32> = None;
        for pair in self.laps.windows(2) {
            let gap = pair[1] - pair[0];
            if !(gap_low..=gap_high).contains(&gap) {
                return false;
            }
            if let Some(previous) = previous_gap {
                if gap.abs_diff(previous) > self.config.gap_tolerance {
                    return false;
                }
            }
            previous_gap = Some(gap);
        }
        true
    }

    /// Book an executed stop that took `time` seconds.
    pub fn register_stop(&mut self, time: f64) -> Result<StopRecord> {
        ensure_in_range("pit stop time", time, 0.0, f64::MAX)?;

        let index = self.stops_made;
        self.stops_made += 1;
        self.total_pit_time += time;

        let tire = self.tires.get(index).copied();
        self.observer.emit(SimEvent::StopRegistered { stop_number: self.stops_made, time, tire });

        Ok(StopRecord {
            stop_number: self.stops_made,
            time,
            scheduled_lap: self.laps.get(index).copied(),
            tire,
            cumulative_time: self.total_pit_time,
        })
    }

    /// Next planned stop, or `None` once the plan is exhausted.
    pub fn next_stop(&self) -> Option<NextStop> {
        let lap = *self.laps.get(self.stops_made)?;
        let tire = *self.tires.get(self.stops_made)?;
        Some(NextStop {
            lap,
            tire,
            estimated_time: self.config.estimated_stop_time,
            stop_number: self.stops_made + 1,
        })
    }

    /// Whether the next planned stop falls on `lap`.
    pub fn is_stop_due(&self, lap: u32) -> bool {
        self.next_stop().is_some_and(|stop| stop.lap == lap)
    }
}
