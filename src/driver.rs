//! Drivers: skill profile, car eligibility and career statistics

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::car::Car;
use crate::error::ensure_in_range;
use crate::types::{DrivingStyle, TrackSurface, Visibility, Weather, WeatherCondition};
use crate::{RaceError, Result};

/// Minimum overall skill to be eligible for any car.
pub const MIN_OVERALL_SKILL: f64 = 60.0;
/// Minimum ratio of overall skill to car top speed.
pub const MIN_SKILL_SPEED_RATIO: f64 = 0.27;

pub const WIN_POINTS: u32 = 25;
pub const SECOND_PLACE_POINTS: u32 = 18;
pub const THIRD_PLACE_POINTS: u32 = 15;
pub const FASTEST_LAP_POINTS: u32 = 1;

/// Speed, consistency and aggression, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub speed: f64,
    pub consistency: f64,
    pub aggression: f64,
}

impl Skills {
    pub const fn new(speed: f64, consistency: f64, aggression: f64) -> Self {
        Self { speed, consistency, aggression }
    }

    /// Arithmetic mean of the three skills.
    pub fn overall(&self) -> f64 {
        (self.speed + self.consistency + self.aggression) / 3.0
    }

    fn validate(&self) -> Result<()> {
        ensure_in_range("speed", self.speed, 0.0, 100.0)?;
        ensure_in_range("consistency", self.consistency, 0.0, 100.0)?;
        ensure_in_range("aggression", self.aggression, 0.0, 100.0)
    }

    fn clamped(self) -> Self {
        Self {
            speed: self.speed.clamp(0.0, 100.0),
            consistency: self.consistency.clamp(0.0, 100.0),
            aggression: self.aggression.clamp(0.0, 100.0),
        }
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0)
    }
}

/// A car the driver has been assigned to at some point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarEntry {
    pub number: u32,
    pub label: String,
}

/// Confirmation returned by [`Driver::assign_to_car`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub driver: String,
    pub car_number: u32,
    pub car: String,
}

/// Wins, podiums, fastest laps and the points they earned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCounters {
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub retirements: u32,
    pub points: u32,
}

/// On-track counters accumulated over a career.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceCounters {
    pub overtakes: u32,
    pub mistakes: u32,
    pub laps_completed: u32,
}

/// Snapshot returned by [`Driver::stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStats {
    pub name: String,
    pub nationality: String,
    pub style: DrivingStyle,
    pub general: ResultCounters,
    pub skills: Skills,
    pub overall_skill: f64,
    pub performance: PerformanceCounters,
}

/// Result of [`Driver::compute_performance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// 0.4 speed + 0.4 aggression + 0.2 consistency, on the adjusted skills
    pub total: f64,
    pub skills: Skills,
}

/// Track conditions a driver adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingConditions {
    pub weather: WeatherCondition,
    pub visibility: Visibility,
    pub surface: TrackSurface,
}

impl DrivingConditions {
    fn band(&self) -> ConditionBand {
        if self.weather == WeatherCondition::Rain
            || self.visibility == Visibility::Low
            || self.surface == TrackSurface::Wet
        {
            ConditionBand::Severe
        } else if matches!(self.weather, WeatherCondition::Damp | WeatherCondition::Wet)
            || self.visibility == Visibility::Medium
            || self.surface == TrackSurface::Damp
        {
            ConditionBand::Moderate
        } else {
            ConditionBand::Ideal
        }
    }
}

/// Condition severity used by [`Driver::adapt_driving_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionBand {
    Ideal,
    Moderate,
    Severe,
}

/// Result of [`Driver::adapt_driving_style`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleAdaptation {
    pub band: ConditionBand,
    pub previous: DrivingStyle,
    pub new: DrivingStyle,
    pub aggression_delta: f64,
    pub consistency_delta: f64,
}

/// A competitor with a skill profile and career record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    name: String,
    nationality: String,
    style: DrivingStyle,
    skills: Skills,
    overall_skill: f64,
    current_car: Option<u32>,
    cars_driven: Vec<CarEntry>,
    results: ResultCounters,
    performance: PerformanceCounters,
}

impl Driver {
    pub fn new(name: impl Into<String>, nationality: impl Into<String>, points: u32) -> Self {
        let skills = Skills::default();
        Self {
            name: name.into(),
            nationality: nationality.into(),
            style: DrivingStyle::Conservative,
            skills,
            overall_skill: skills.overall(),
            current_car: None,
            cars_driven: Vec::new(),
            results: ResultCounters { points, ..ResultCounters::default() },
            performance: PerformanceCounters::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn points(&self) -> u32 {
        self.results.points
    }

    pub fn style(&self) -> DrivingStyle {
        self.style
    }

    pub fn skills(&self) -> Skills {
        self.skills
    }

    pub fn overall_skill(&self) -> f64 {
        self.overall_skill
    }

    /// Number of the car the driver currently sits in.
    pub fn current_car(&self) -> Option<u32> {
        self.current_car
    }

    pub fn cars_driven(&self) -> &[CarEntry] {
        &self.cars_driven
    }

    pub fn results(&self) -> ResultCounters {
        self.results
    }

    pub fn performance(&self) -> PerformanceCounters {
        self.performance
    }

    /// Replace the skill profile. Any value outside `[0, 100]` rejects the whole update.
    pub fn set_skills(&mut self, skills: Skills) -> Result<()> {
        skills.validate()?;
        self.apply_skills(skills);
        Ok(())
    }

    fn apply_skills(&mut self, skills: Skills) {
        self.skills = skills;
        self.overall_skill = skills.overall();
    }

    pub fn can_drive(&self, car: &Car) -> bool {
        self.ineligibility(car).is_none()
    }

    fn ineligibility(&self, car: &Car) -> Option<String> {
        if let Some(current) = self.current_car {
            return Some(format!("already driving car #{}", current));
        }
        if car.has_driver() {
            return Some(format!("car already driven by {}", car.driver_name()));
        }
        if self.overall_skill < MIN_OVERALL_SKILL {
            return Some(format!(
                "overall skill {:.1} is below {}",
                self.overall_skill, MIN_OVERALL_SKILL
            ));
        }
        let ratio = self.overall_skill / car.max_speed();
        if !ratio.is_finite() || ratio < MIN_SKILL_SPEED_RATIO {
            return Some(format!(
                "skill to top speed ratio {:.3} is below {}",
                ratio, MIN_SKILL_SPEED_RATIO
            ));
        }
        None
    }

    /// Seat the driver in `car`. On failure the driver comes back inside the error.
    pub fn assign_to_car(mut self, car: &mut Car) -> Result<Assignment> {
        if let Some(reason) = self.ineligibility(car) {
            warn!(driver = %self.name, car = car.number(), reason = %reason, "Assignment rejected");
            return Err(RaceError::incompatible_assignment(self, car.number(), reason));
        }

        let assignment =
            Assignment { driver: self.name.clone(), car_number: car.number(), car: car.label() };
        self.current_car = Some(car.number());
        self.cars_driven.push(CarEntry { number: car.number(), label: car.label() });
        debug!(driver = %self.name, car = car.number(), "Driver assigned");
        car.seat(self);
        Ok(assignment)
    }

    pub(crate) fn clear_current_car(&mut self) {
        self.current_car = None;
    }

    /// Adjust the stored skills for the weather and return the weighted performance.
    ///
    /// Speed takes the temperature, humidity and grip factors; consistency and
    /// aggression take grip only. The adjusted skills replace the stored ones.
    pub fn compute_performance(&mut self, weather: &Weather) -> Performance {
        let grip = weather.condition.grip_factor();
        let temperature = if weather.temperature < 15.0 {
            0.95
        } else if weather.temperature > 35.0 {
            0.97
        } else {
            1.02
        };
        let humidity = if weather.humidity < 20.0 {
            0.98
        } else if weather.humidity > 70.0 {
            0.96
        } else {
            1.01
        };

        let adjusted = Skills {
            speed: self.skills.speed * temperature * humidity * grip,
            consistency: self.skills.consistency * grip,
            aggression: self.skills.aggression * grip,
        }
        .clamped();
        self.apply_skills(adjusted);

        let total = adjusted.speed * 0.4 + adjusted.aggression * 0.4 + adjusted.consistency * 0.2;
        Performance { total, skills: adjusted }
    }

    /// Switch style and shift aggression/consistency for the conditions.
    pub fn adapt_driving_style(&mut self, conditions: DrivingConditions) -> StyleAdaptation {
        let band = conditions.band();
        let (style, aggression_delta, consistency_delta) = match band {
            ConditionBand::Ideal => (DrivingStyle::Aggressive, 20.0, -10.0),
            ConditionBand::Moderate => (DrivingStyle::Conservative, -10.0, 10.0),
            ConditionBand::Severe => (DrivingStyle::Conservative, -20.0, 15.0),
        };

        let previous = self.style;
        self.style = style;
        let adjusted = Skills {
            aggression: self.skills.aggression + aggression_delta,
            consistency: self.skills.consistency + consistency_delta,
            ..self.skills
        }
        .clamped();
        self.apply_skills(adjusted);

        StyleAdaptation { band, previous, new: style, aggression_delta, consistency_delta }
    }

    pub fn record_win(&mut self) -> ResultCounters {
        self.results.wins += 1;
        self.results.points = self.results.points.saturating_add(WIN_POINTS);
        self.results
    }

    /// Record a second or third place finish.
    pub fn record_podium(&mut self, position: u8) -> Result<ResultCounters> {
        let points = match position {
            2 => SECOND_PLACE_POINTS,
            3 => THIRD_PLACE_POINTS,
            other => {
                return Err(RaceError::validation(
                    "podium position",
                    format!("must be 2 or 3, got {}", other),
                ));
            }
        };
        self.results.podiums += 1;
        self.results.points = self.results.points.saturating_add(points);
        Ok(self.results)
    }

    pub fn record_fastest_lap(&mut self) -> ResultCounters {
        self.results.fastest_laps += 1;
        self.results.points = self.results.points.saturating_add(FASTEST_LAP_POINTS);
        self.results
    }

    pub fn record_retirement(&mut self) -> ResultCounters {
        self.results.retirements += 1;
        self.results
    }

    pub fn record_overtakes(&mut self, count: u32) {
        self.performance.overtakes = self.performance.overtakes.saturating_add(count);
    }

    pub fn record_mistake(&mut self) {
        self.performance.mistakes += 1;
    }

    pub fn record_lap_completed(&mut self) {
        self.performance.laps_completed += 1;
    }

    pub fn stats(&self) -> DriverStats {
        DriverStats {
            name: self.name.clone(),
            nationality: self.nationality.clone(),
            style: self.style,
            general: self.results,
            skills: self.skills,
            overall_skill: self.overall_skill,
            performance: self.performance,
        }
    }
}
