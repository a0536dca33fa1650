//! Error Types for Simulation Input Validation
//!
//! ## Design Philosophy
//!
//! The PHS engine validates every input before a single minute is simulated,
//! so errors here are precondition failures, never runtime faults:
//!
//! 1. **One Variant Per Precondition**: Each violated range gets its own
//!    variant naming the offending field, so callers can point users at the
//!    exact input that is wrong without parsing messages.
//!
//! 2. **Small and Copy**: Error payloads carry the rejected value inline -
//!    no String, no allocation - so the type stays cheap to return and safe
//!    to use from `no_std` callers.
//!
//! 3. **Fail Fast, No Partial State**: Validation runs before the simulation
//!    loop allocates any state. A returned error guarantees nothing was
//!    computed.
//!
//! Numeric edge cases *inside* the simulation (non-positive evaporative
//! capacity, solver iteration caps) are deliberately not errors: the
//! reference model clamps and continues, and this crate preserves that
//! behavior while surfacing non-convergence through
//! [`SolverDiagnostics`](crate::results::SolverDiagnostics).

use thiserror_no_std::Error;

/// Result type for input validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Precondition failures raised before the simulation loop starts
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Acclimatization must be a population fraction in [0, 100]
    #[error("acclimatization {value} outside range [0, 100]")]
    Acclimatization {
        /// The rejected acclimatization value
        value: f64,
    },

    /// Clothing insulation must be within the model's [0, 1] clo range
    #[error("clothing insulation {value} clo outside range [0, 1]")]
    Insulation {
        /// The rejected insulation value in clo
        value: f64,
    },

    /// Reflective clothing coverage is a body-surface fraction
    #[error("reflective clothing fraction {value} outside range [0, 1]")]
    ReflectiveFraction {
        /// The rejected coverage fraction
        value: f64,
    },

    /// Emissivity is physically bounded to [0, 1]
    #[error("reflective clothing emissivity {value} outside range [0, 1]")]
    ReflectiveEmissivity {
        /// The rejected emissivity
        value: f64,
    },

    /// Static moisture permeability index is dimensionless in [0, 1]
    #[error("static permeability index {value} outside range [0, 1]")]
    PermeabilityIndex {
        /// The rejected permeability index
        value: f64,
    },

    /// Partial water vapour pressure cannot be negative
    #[error("ambient vapour pressure {value} hPa is negative")]
    VapourPressure {
        /// The rejected vapour pressure in hPa
        value: f64,
    },

    /// Body weight cannot be negative
    #[error("body weight {value} kg is negative")]
    Weight {
        /// The rejected weight in kg
        value: f64,
    },

    /// Body height cannot be negative
    #[error("body height {value} m is negative")]
    Height {
        /// The rejected height in m
        value: f64,
    },

    /// Effective mechanical work cannot be negative
    #[error("mechanical work {value} W/m2 is negative")]
    MechanicalWork {
        /// The rejected work rate in W/m²
        value: f64,
    },

    /// The work sequence must last at least one minute
    #[error("activity duration must be at least one minute")]
    Duration,

    /// A floating-point input was NaN or infinite
    #[error("non-finite value in field `{field}`")]
    NonFinite {
        /// Name of the offending input field
        field: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ValidationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Acclimatization { value } =>
                defmt::write!(fmt, "acclimatization {} outside [0, 100]", value),
            Self::Insulation { value } =>
                defmt::write!(fmt, "insulation {} clo outside [0, 1]", value),
            Self::ReflectiveFraction { value } =>
                defmt::write!(fmt, "reflective fraction {} outside [0, 1]", value),
            Self::ReflectiveEmissivity { value } =>
                defmt::write!(fmt, "reflective emissivity {} outside [0, 1]", value),
            Self::PermeabilityIndex { value } =>
                defmt::write!(fmt, "permeability index {} outside [0, 1]", value),
            Self::VapourPressure { value } =>
                defmt::write!(fmt, "vapour pressure {} hPa negative", value),
            Self::Weight { value } =>
                defmt::write!(fmt, "weight {} kg negative", value),
            Self::Height { value } =>
                defmt::write!(fmt, "height {} m negative", value),
            Self::MechanicalWork { value } =>
                defmt::write!(fmt, "mechanical work {} W/m2 negative", value),
            Self::Duration =>
                defmt::write!(fmt, "activity duration below one minute"),
            Self::NonFinite { field } =>
                defmt::write!(fmt, "non-finite value in `{}`", field),
        }
    }
}
