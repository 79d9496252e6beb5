//! Teams: roster, development budget and results record
//!
//! ```rust
//! use paddock::Team;
//! use paddock::types::DevelopmentArea;
//!
//! let mut team = Team::new("Mercedes", "Germany", 1_000_000);
//! let engine: DevelopmentArea = "motor".parse().unwrap();
//! let investment = team.invest(engine, 100_000).unwrap();
//! assert_eq!(investment.new_level, 1);
//! assert_eq!(team.development().get(engine).primary, 5.0);
//! assert_eq!(team.budget(), 900_000);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::car::Car;
use crate::config::TeamConfig;
use crate::driver::{Driver, FASTEST_LAP_POINTS, SECOND_PLACE_POINTS, WIN_POINTS};
use crate::random::RandomSource;
use crate::types::{DevelopmentArea, StatKind};
use crate::{RaceError, Result};

/// Level and stat pair of one development area.
///
/// The stat names depend on the area, see [`DevelopmentArea::stat_names`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaDevelopment {
    pub level: u32,
    pub primary: f64,
    pub secondary: f64,
}

/// Development state across the four areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Development {
    pub engine: AreaDevelopment,
    pub aero: AreaDevelopment,
    pub tires: AreaDevelopment,
    pub suspension: AreaDevelopment,
}

impl Development {
    pub fn get(&self, area: DevelopmentArea) -> &AreaDevelopment {
        match area {
            DevelopmentArea::Engine => &self.engine,
            DevelopmentArea::Aero => &self.aero,
            DevelopmentArea::Tires => &self.tires,
            DevelopmentArea::Suspension => &self.suspension,
        }
    }

    fn get_mut(&mut self, area: DevelopmentArea) -> &mut AreaDevelopment {
        match area {
            DevelopmentArea::Engine => &mut self.engine,
            DevelopmentArea::Aero => &mut self.aero,
            DevelopmentArea::Tires => &mut self.tires,
            DevelopmentArea::Suspension => &mut self.suspension,
        }
    }
}

/// Wins, podiums, fastest laps and retirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub retirements: u32,
}

impl TeamRecord {
    fn counter_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Win => &mut self.wins,
            StatKind::Podium => &mut self.podiums,
            StatKind::FastestLap => &mut self.fastest_laps,
            StatKind::Retirement => &mut self.retirements,
        }
    }

    /// Championship points derived from the counters.
    ///
    /// Saturates at `u32::MAX`.
    pub fn championship_points(&self) -> u32 {
        self.wins
            .saturating_mul(WIN_POINTS)
            .saturating_add(self.podiums.saturating_mul(SECOND_PLACE_POINTS))
            .saturating_add(self.fastest_laps.saturating_mul(FASTEST_LAP_POINTS))
    }
}

/// Preview of an investment, see [`Team::expected_improvement`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub area: DevelopmentArea,
    pub levels: u32,
    /// Gain applied to each stat of the pair
    pub stat_gain: f64,
}

/// Result of [`Team::invest`] and [`Team::invest_with_risk`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub area: DevelopmentArea,
    pub amount: u64,
    pub remaining_budget: u64,
    pub previous_level: u32,
    pub new_level: u32,
    pub expected_levels: u32,
    pub achieved_levels: u32,
    /// No development setback occurred
    pub successful: bool,
}

/// Result of [`Team::update_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatUpdate {
    pub kind: StatKind,
    pub previous: u32,
    pub new: u32,
    pub record: TeamRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub total: u64,
    pub available: u64,
    pub invested: u64,
}

/// Snapshot returned by [`Team::stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub development: Development,
    pub record: TeamRecord,
    pub championship_points: u32,
    pub budget: BudgetBreakdown,
}

/// A constructor entered in the championship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    name: String,
    country: String,
    budget: u64,
    invested: u64,
    cars: Vec<Car>,
    drivers: Vec<Driver>,
    development: Development,
    record: TeamRecord,
    config: TeamConfig,
}

impl Team {
    pub fn new(name: impl Into<String>, country: impl Into<String>, budget: u64) -> Self {
        Self::build(name.into(), country.into(), budget, TeamConfig::default())
    }

    /// A team with its own development economics. The config is validated.
    pub fn with_config(
        name: impl Into<String>,
        country: impl Into<String>,
        budget: u64,
        config: TeamConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(name.into(), country.into(), budget, config))
    }

    fn build(name: String, country: String, budget: u64, config: TeamConfig) -> Self {
        Self {
            name,
            country,
            budget,
            invested: 0,
            cars: Vec::new(),
            drivers: Vec::new(),
            development: Development::default(),
            record: TeamRecord::default(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Budget still available for investment.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn invested(&self) -> u64 {
        self.invested
    }

    pub fn development(&self) -> &Development {
        &self.development
    }

    pub fn record(&self) -> TeamRecord {
        self.record
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn add_car(&mut self, car: Car) {
        debug!(team = %self.name, car = car.number(), "Car added to roster");
        self.cars.push(car);
    }

    pub fn add_driver(&mut self, driver: Driver) {
        debug!(team = %self.name, driver = %driver.name(), "Driver added to roster");
        self.drivers.push(driver);
    }

    /// Remove a car from the roster, for example to enter it in a race.
    pub fn take_car(&mut self, number: u32) -> Result<Car> {
        let index = self
            .cars
            .iter()
            .position(|car| car.number() == number)
            .ok_or(RaceError::UnknownCar { car_number: number })?;
        Ok(self.cars.remove(index))
    }

    /// Remove a driver from the roster by name.
    pub fn take_driver(&mut self, name: &str) -> Option<Driver> {
        let index = self.drivers.iter().position(|driver| driver.name() == name)?;
        Some(self.drivers.remove(index))
    }

    /// Levels and stat gain an investment of `amount` would buy, ignoring setbacks.
    pub fn expected_improvement(&self, area: DevelopmentArea, amount: u64) -> Improvement {
        let levels = amount
            .checked_div(self.config.cost_per_level)
            .map_or(0, |levels| u32::try_from(levels).unwrap_or(u32::MAX));
        Improvement { area, levels, stat_gain: self.stat_gain(levels) }
    }

    fn stat_gain(&self, levels: u32) -> f64 {
        levels as f64 * self.config.points_per_level * self.config.improvement_factor
    }

    /// Spend `amount` on `area`. Every purchased level is delivered.
    pub fn invest(&mut self, area: DevelopmentArea, amount: u64) -> Result<Investment> {
        self.check_investment(amount)?;
        let levels = self.expected_improvement(area, amount).levels;
        Ok(self.apply_investment(area, amount, levels, levels))
    }

    /// Spend `amount` on `area`, losing one level with the configured setback probability.
    pub fn invest_with_risk(
        &mut self,
        area: DevelopmentArea,
        amount: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<Investment> {
        self.check_investment(amount)?;
        let expected = self.expected_improvement(area, amount).levels;
        let achieved = if rng.chance(self.config.setback_probability) {
            warn!(team = %self.name, area = %area, "Development setback");
            expected.saturating_sub(1)
        } else {
            expected
        };
        Ok(self.apply_investment(area, amount, expected, achieved))
    }

    fn check_investment(&self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(RaceError::validation("investment amount", "must be positive"));
        }
        if amount > self.budget {
            return Err(RaceError::InsufficientBudget { requested: amount, available: self.budget });
        }
        Ok(())
    }

    fn apply_investment(
        &mut self,
        area: DevelopmentArea,
        amount: u64,
        expected_levels: u32,
        achieved_levels: u32,
    ) -> Investment {
        let gain = self.stat_gain(achieved_levels);
        let development = self.development.get_mut(area);
        let previous_level = development.level;
        development.level = development.level.saturating_add(achieved_levels);
        development.primary += gain;
        development.secondary += gain;
        let new_level = development.level;

        self.budget -= amount;
        self.invested = self.invested.saturating_add(amount);
        info!(team = %self.name, area = %area, amount, level = new_level, "Development investment");

        Investment {
            area,
            amount,
            remaining_budget: self.budget,
            previous_level,
            new_level,
            expected_levels,
            achieved_levels,
            successful: expected_levels == achieved_levels,
        }
    }

    /// Increase one of the team counters.
    pub fn update_stats(&mut self, kind: StatKind, amount: u32) -> StatUpdate {
        let counter = self.record.counter_mut(kind);
        let previous = *counter;
        *counter = counter.saturating_add(amount);
        StatUpdate { kind, previous, new: *counter, record: self.record }
    }

    pub fn stats(&self) -> TeamStats {
        TeamStats {
            development: self.development,
            record: self.record,
            championship_points: self.record.championship_points(),
            budget: BudgetBreakdown {
                total: self.budget.saturating_add(self.invested),
                available: self.budget,
                invested: self.invested,
            },
        }
    }
}
