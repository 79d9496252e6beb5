//! Error types for the championship simulation.
//!
//! Every fallible operation in the crate returns [`RaceError`]. Errors are
//! raised at the point of detection and never retried internally: the caller
//! decides whether to log and continue or abort the weekend.
//!
//! ## Error Categories
//!
//! - **Validation**: an argument is missing, malformed or out of its range
//! - **Budget**: a team tried to invest more than it has available
//! - **Assignment**: a driver is not eligible for the car they asked for
//! - **State**: a race operation was invoked before its precondition holds
//! - **Lookup**: a car number is not registered in the race
//! - **Config**: a YAML configuration could not be parsed or is inconsistent
//!
//! ## Recovery
//!
//! ```rust
//! use paddock::RaceError;
//!
//! let error = RaceError::validation("fuel", "must be between 0 and 100");
//! assert!(error.is_recoverable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```
//!
//! ## Rejected assignments
//!
//! A failed [`Driver::assign_to_car`](crate::Driver::assign_to_car) hands the
//! driver back inside the error so the value is never lost:
//!
//! ```rust
//! use paddock::{Car, Driver, Skills, TireCompound};
//!
//! let mut driver = Driver::new("Rookie", "Italy", 0);
//! driver.set_skills(Skills::new(40.0, 40.0, 40.0)).unwrap();
//! let mut car = Car::new(7, "Ferrari", "SF21", TireCompound::Soft, 340.0, 100.0);
//!
//! let error = driver.assign_to_car(&mut car).unwrap_err();
//! let driver = error.into_rejected_driver().expect("driver travels back");
//! assert_eq!(driver.name(), "Rookie");
//! ```

use thiserror::Error;

use crate::driver::Driver;

/// Result type alias for simulation operations.
pub type Result<T, E = RaceError> = std::result::Result<T, E>;

/// Main error type for simulation operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RaceError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget { requested: u64, available: u64 },

    #[error("Driver {driver} cannot take car #{car_number}: {reason}")]
    IncompatibleAssignment {
        driver: String,
        car_number: u32,
        reason: String,
        rejected: Box<Driver>,
    },

    #[error("Cannot {operation}: {reason}")]
    InvalidState { operation: String, reason: String },

    #[error("Car #{car_number} is not registered in this race")]
    UnknownCar { car_number: u32 },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl RaceError {
    /// Returns whether the caller can fix the input and try the operation again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RaceError::Validation { .. } => true,
            RaceError::InsufficientBudget { .. } => true,
            RaceError::IncompatibleAssignment { .. } => true,
            RaceError::InvalidState { .. } => true,
            RaceError::UnknownCar { .. } => false,
            RaceError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RaceError::Validation { .. } => vec![
                "Check the value lies within its declared range",
                "Use one of the documented variant names",
            ],
            RaceError::InsufficientBudget { .. } => vec![
                "Invest a smaller amount",
                "Wait for the team budget to be replenished",
            ],
            RaceError::IncompatibleAssignment { .. } => vec![
                "Raise the driver's skills before assigning",
                "Pick a car with a lower top speed",
                "Release the current driver of the car first",
            ],
            RaceError::InvalidState { .. } => vec![
                "Register at least the minimum number of cars",
                "Set the race weather before starting",
                "Follow the qualifying, start, finish sequence",
            ],
            RaceError::UnknownCar { .. } => vec![
                "Register the car with the race first",
                "Check the car number",
            ],
            RaceError::Config { .. } => vec![
                "Check the YAML syntax",
                "Verify probabilities lie between 0 and 1",
            ],
        }
    }

    /// Helper constructor for validation errors.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RaceError::Validation { field: field.into(), reason: reason.into() }
    }

    /// Helper constructor for invalid state errors.
    pub fn invalid_state(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        RaceError::InvalidState { operation: operation.into(), reason: reason.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        RaceError::Config { details: details.into() }
    }

    /// Helper constructor for rejected driver assignments.
    pub fn incompatible_assignment(
        driver: Driver,
        car_number: u32,
        reason: impl Into<String>,
    ) -> Self {
        RaceError::IncompatibleAssignment {
            driver: driver.name().to_string(),
            car_number,
            reason: reason.into(),
            rejected: Box::new(driver),
        }
    }

    /// Recover the driver carried by an [`RaceError::IncompatibleAssignment`].
    pub fn into_rejected_driver(self) -> Option<Driver> {
        match self {
            RaceError::IncompatibleAssignment { rejected, .. } => Some(*rejected),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for RaceError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        RaceError::Config { details: err.to_string() }
    }
}

/// Validate that `value` is a finite number within `[min, max]`.
pub(crate) fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(RaceError::validation(
            field,
            format!("must be a value between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

/// Validate that a text field is present.
pub(crate) fn ensure_present(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RaceError::validation(field, "is required"));
    }
    Ok(())
}
