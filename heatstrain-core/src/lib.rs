//! ISO 7933 Predicted Heat Strain (PHS) engine
//!
//! Simulates the thermophysiological state of a working subject minute by
//! minute and reports the predicted rectal temperature, the limiting times
//! at which the rectal-temperature and dehydration safety criteria are
//! crossed, and a discrete 0-4 heat-strain severity.
//!
//! Designed as a pure calculation primitive: no I/O, no shared state, one
//! call per exposure. Larger comfort pipelines own weather ingestion,
//! unit conversion and aggregation.
//!
//! ```
//! use heatstrain_core::{
//!     predicted_heat_strain, ActivityParameters, ClothingParameters,
//!     EnvironmentalInputs, SimulationInput, SubjectParameters,
//! };
//!
//! let input = SimulationInput {
//!     subject: SubjectParameters::standard(),
//!     environment: EnvironmentalInputs {
//!         air_temperature: 30.0,
//!         mean_radiant_temperature: 30.0,
//!         dew_point: None,
//!         wind_speed: 0.5,
//!         solar_radiation: None,
//!         vapour_pressure_hpa: 20.0,
//!     },
//!     clothing: ClothingParameters::new(0.5),
//!     activity: ActivityParameters::new(150.0, 480),
//! };
//!
//! let result = predicted_heat_strain(&input).expect("valid input");
//! let (rectal_temp, effect_level, comfortable) = result.summary();
//! assert!(effect_level <= 4);
//! # let _ = (rectal_temp, comfortable);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod errors;
pub mod inputs;
pub mod results;
pub mod simulation;
pub mod solver;
pub mod state;

// Public API
pub use errors::{ValidationError, ValidationResult};
pub use inputs::{
    ActivityParameters, BodyPosition, ClothingParameters, EnvironmentalInputs, Sex,
    SimulationInput, SubjectParameters,
};
pub use results::{classify, HeatStrainEffect, PhsResult, SolverDiagnostics};
pub use simulation::{predicted_heat_strain, HeatStrainSimulator};
pub use state::BodyState;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
