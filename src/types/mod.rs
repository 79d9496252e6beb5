//! Closed vocabularies used across the simulation.
//!
//! Tire compounds, weather conditions, car and race states and development
//! areas are all modelled as enums with a single canonical lowercase spelling.
//! Text coming from a harness is normalized through [`FromStr`](std::str::FromStr),
//! which trims, lowercases and rejects anything unknown with a
//! [`RaceError::Validation`](crate::RaceError::Validation).
//!
//! ```rust
//! use paddock::types::{TireCompound, WeatherCondition};
//!
//! let compound: TireCompound = " Soft ".parse().unwrap();
//! assert_eq!(compound, TireCompound::Soft);
//! assert!("slicks".parse::<TireCompound>().is_err());
//!
//! let condition: WeatherCondition = "RAIN".parse().unwrap();
//! assert_eq!(condition.lap_time_factor(), 1.15);
//! ```

mod compound;
mod development;
mod status;
mod track;
mod weather;

pub use compound::TireCompound;
pub use development::{DevelopmentArea, StatKind};
pub use status::{Aggressiveness, CarState, DrivingStyle, RaceState};
pub use track::{CircuitType, CornerDifficulty};
pub use weather::{TrackSurface, Visibility, Weather, WeatherCondition};

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_compound_parsing_ignores_case_and_padding(
            compound in prop::sample::select(TireCompound::ALL.to_vec()),
            upper in any::<bool>(),
            pad in 0..3usize,
        ) {
            let name = if upper {
                compound.as_str().to_ascii_uppercase()
            } else {
                compound.as_str().to_string()
            };
            let padded = format!("{}{}{}", " ".repeat(pad), name, " ".repeat(pad));
            prop_assert_eq!(padded.parse::<TireCompound>().unwrap(), compound);
        }

        #[test]
        fn prop_visibility_is_high_when_dry(humidity in 0.0f64..=100.0) {
            prop_assert_eq!(Visibility::derive(WeatherCondition::Dry, humidity), Visibility::High);
        }

        #[test]
        fn prop_unknown_area_names_rejected(name in "[x-z]{3,8}") {
            prop_assert!(name.parse::<DevelopmentArea>().is_err());
        }
    }

    #[test]
    fn visibility_thresholds() {
        assert_eq!(Visibility::derive(WeatherCondition::Rain, 85.0), Visibility::Low);
        assert_eq!(Visibility::derive(WeatherCondition::Rain, 79.9), Visibility::High);
        assert_eq!(Visibility::derive(WeatherCondition::Damp, 50.0), Visibility::Medium);
        assert_eq!(Visibility::derive(WeatherCondition::Damp, 49.0), Visibility::High);
        assert_eq!(Visibility::derive(WeatherCondition::Wet, 95.0), Visibility::High);
    }

    #[test]
    fn lap_time_factors() {
        assert_eq!(TireCompound::Soft.lap_time_factor(), 0.95);
        assert_eq!(TireCompound::Medium.lap_time_factor(), 1.0);
        assert_eq!(TireCompound::Hard.lap_time_factor(), 1.05);
        assert_eq!(WeatherCondition::Dry.lap_time_factor(), 1.0);
        assert_eq!(WeatherCondition::Wet.lap_time_factor(), 1.10);
        assert_eq!(WeatherCondition::Rain.lap_time_factor(), 1.15);
    }

    #[test]
    fn canonical_spellings_parse() {
        assert_eq!(
            "high degradation".parse::<CircuitType>().unwrap(),
            CircuitType::HighDegradation
        );
        assert_eq!("Low-Degradation".parse::<CircuitType>().unwrap(), CircuitType::LowDegradation);
        assert_eq!("med".parse::<CornerDifficulty>().unwrap(), CornerDifficulty::Medium);
        assert_eq!("humid".parse::<WeatherCondition>().unwrap(), WeatherCondition::Damp);
        assert_eq!("fastest_lap".parse::<StatKind>().unwrap(), StatKind::FastestLap);
        assert_eq!("High".parse::<Aggressiveness>().unwrap(), Aggressiveness::High);
        assert_eq!("wet".parse::<TrackSurface>().unwrap(), TrackSurface::Wet);
        assert!("snow".parse::<WeatherCondition>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let yaml = serde_yaml_ng::to_string(&DevelopmentArea::Suspension).unwrap();
        assert_eq!(yaml.trim(), "suspension");
        let state: CarState = serde_yaml_ng::from_str("in_pits").unwrap();
        assert_eq!(state, CarState::InPits);
    }
}
