//! Observability hooks for strategy checks and race progress
//!
//! Decision points inside [`Strategy`](crate::Strategy) and [`Race`](crate::Race)
//! emit [`SimEvent`]s to an optional [`Observer`]. Nothing in the rules depends
//! on an observer being attached.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, trace};

use crate::types::TireCompound;

/// Something that happened during a simulation step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A strategy optimality check began
    StrategyCheckStarted { stops: usize },
    /// One rule of a strategy check was evaluated
    StrategyRule { rule: &'static str, passed: bool },
    /// A strategy optimality check finished
    StrategyCheckFinished { optimal: bool },
    /// A pit stop was registered against a strategy
    StopRegistered { stop_number: usize, time: f64, tire: Option<TireCompound> },
    /// A qualifying stage was completed
    QualifyingStage { stage: u8, eliminated: Vec<u32> },
    /// A driver lost time through a mistake
    DriverMistake { car_number: u32, driver: String, lap: u32 },
    /// Every car completed a race lap
    LapCompleted { lap: u32, leader: Option<u32> },
    /// A new race fastest lap was set
    FastestLap { car_number: u32, time: f64, lap: u32 },
    /// The race was classified
    RaceFinished { winner: Option<u32> },
}

/// Receives simulation events.
pub trait Observer {
    fn observe(&self, event: &SimEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &SimEvent) {
        match event {
            SimEvent::StrategyCheckStarted { stops } => debug!(stops, "Strategy check started"),
            SimEvent::StrategyRule { rule, passed } => debug!(rule, passed, "Strategy rule"),
            SimEvent::StrategyCheckFinished { optimal } => {
                debug!(optimal, "Strategy check finished")
            }
            SimEvent::StopRegistered { stop_number, time, tire } => {
                debug!(stop_number, time, tire = ?tire, "Pit stop registered")
            }
            SimEvent::QualifyingStage { stage, eliminated } => {
                info!(stage, eliminated = ?eliminated, "Qualifying stage complete")
            }
            SimEvent::DriverMistake { car_number, driver, lap } => {
                debug!(car_number, driver = %driver, lap, "Driver mistake")
            }
            SimEvent::LapCompleted { lap, leader } => {
                trace!(lap, leader = ?leader, "Lap completed")
            }
            SimEvent::FastestLap { car_number, time, lap } => {
                debug!(car_number, time, lap, "New fastest lap")
            }
            SimEvent::RaceFinished { winner } => info!(winner = ?winner, "Race finished"),
        }
    }
}

/// Keeps every event in memory, in order.
///
/// Clones share the same buffer, so one handle can be attached to a race
/// while the other is inspected afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<SimEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, event: &SimEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Optional observer slot held by entities.
#[derive(Default)]
pub(crate) struct ObserverSlot(Option<Box<dyn Observer>>);

impl ObserverSlot {
    pub(crate) fn set(&mut self, observer: Box<dyn Observer>) {
        self.0 = Some(observer);
    }

    pub(crate) fn emit(&self, event: SimEvent) {
        if let Some(observer) = &self.0 {
            observer.observe(&event);
        }
    }
}

impl fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() { "Some(<observer>)" } else { "None" })
    }
}
