//! Input Records for the PHS Simulation
//!
//! One [`SimulationInput`] bundles everything the engine needs: who is
//! working ([`SubjectParameters`]), where ([`EnvironmentalInputs`]), what
//! they wear ([`ClothingParameters`]) and what they do
//! ([`ActivityParameters`]).
//!
//! ## Units
//!
//! All temperatures are °C, speeds m/s, pressures hPa (converted to kPa
//! internally), rates W/m², insulation clo, durations whole minutes.
//!
//! ## Carried-through fields
//!
//! Dew point, solar radiation, subject sex and age are accepted but not
//! used by the ISO 7933 formula. They are kept on the records because
//! calling pipelines feed complete weather/subject rows and rely on the
//! signature shape; dropping them silently would break those callers.
//!
//! ## Validation
//!
//! [`SimulationInput::validate`] checks every precondition before the
//! simulation mutates any state. Each violation maps to a distinct
//! [`ValidationError`] variant; there is no silent coercion.

use crate::{
    constants::body::{
        RADIATING_AREA_CROUCHING, RADIATING_AREA_SITTING, RADIATING_AREA_STANDING,
    },
    errors::{ValidationError, ValidationResult},
};

/// Posture of the working subject.
///
/// Determines the effective radiating area fraction of the body used in
/// the radiative exchange coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyPosition {
    /// Seated work (radiating area fraction 0.70)
    Sitting,
    /// Standing work (radiating area fraction 0.77)
    Standing,
    /// Crouched work (radiating area fraction 0.67)
    Crouching,
}

impl BodyPosition {
    /// Effective radiating area fraction for this posture.
    pub fn radiating_area(self) -> f64 {
        match self {
            Self::Sitting => RADIATING_AREA_SITTING,
            Self::Standing => RADIATING_AREA_STANDING,
            Self::Crouching => RADIATING_AREA_CROUCHING,
        }
    }
}

/// Biological sex of the subject.
///
/// Accepted for signature compatibility with calling pipelines; the
/// ISO 7933 formula does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sex {
    /// Female subject
    Female,
    /// Male subject
    Male,
}

/// Who is doing the work.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubjectParameters {
    /// Body height in meters
    pub height_m: f64,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Posture during the work sequence
    pub body_position: BodyPosition,
    /// Fraction of the population acclimatized to heat, 0-100
    pub acclimatization: f64,
    /// Subject sex; accepted but unused by the formula
    pub sex: Option<Sex>,
    /// Subject age in years; accepted but unused by the formula
    pub age: Option<u32>,
}

impl SubjectParameters {
    /// Standard subject: 1.8 m, 75 kg, standing, fully acclimatized.
    pub fn standard() -> Self {
        Self {
            height_m: 1.8,
            weight_kg: 75.0,
            body_position: BodyPosition::Standing,
            acclimatization: 100.0,
            sex: None,
            age: None,
        }
    }
}

/// The thermal environment around the subject.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentalInputs {
    /// Air (dry-bulb) temperature in °C
    pub air_temperature: f64,
    /// Mean radiant temperature in °C
    pub mean_radiant_temperature: f64,
    /// Dew point in °C; accepted but unused (vapour pressure is supplied
    /// independently)
    pub dew_point: Option<f64>,
    /// Air velocity in m/s
    pub wind_speed: f64,
    /// Solar radiation in W/m²; accepted but unused by the formula
    pub solar_radiation: Option<f64>,
    /// Partial water vapour pressure in hPa
    pub vapour_pressure_hpa: f64,
}

/// What the subject wears.
///
/// Defaults carry the ISO 7933 reference values for the tunable constants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothingParameters {
    /// Static thermal insulation of the ensemble, 0-1 clo
    pub insulation_clo: f64,
    /// Static moisture permeability index `imst`, 0-1
    pub permeability_index: f64,
    /// Fraction of the body surface covered by reflective clothing, 0-1
    pub reflective_fraction: f64,
    /// Emissivity of the reflective clothing, 0-1
    pub reflective_emissivity: f64,
}

impl ClothingParameters {
    /// Ensemble with the given insulation and the ISO 7933 reference
    /// values for permeability (0.38), reflective coverage (0.54) and
    /// reflective emissivity (0.97).
    pub fn new(insulation_clo: f64) -> Self {
        Self {
            insulation_clo,
            permeability_index: 0.38,
            reflective_fraction: 0.54,
            reflective_emissivity: 0.97,
        }
    }
}

/// What the subject does, and for how long.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityParameters {
    /// Metabolic rate in W/m²
    pub metabolic_rate: f64,
    /// Effective mechanical work in W/m², non-negative
    pub mechanical_work: f64,
    /// Duration of the work sequence in whole minutes, at least one
    pub duration_min: u32,
    /// Walking speed in m/s; derived from the metabolic rate when absent
    pub walking_speed: Option<f64>,
    /// Angle between walking and wind direction in degrees; when absent a
    /// supplied walking speed is treated as omni-directional
    pub walking_angle_deg: Option<f64>,
    /// Whether the subject may drink freely during the sequence
    pub drinking_allowed: bool,
}

impl ActivityParameters {
    /// Activity with the given metabolic rate and duration, no external
    /// work, unspecified walking, free drinking permitted.
    pub fn new(metabolic_rate: f64, duration_min: u32) -> Self {
        Self {
            metabolic_rate,
            mechanical_work: 0.0,
            duration_min,
            walking_speed: None,
            walking_angle_deg: None,
            drinking_allowed: true,
        }
    }
}

/// Complete input record for one simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationInput {
    /// The working subject
    pub subject: SubjectParameters,
    /// The thermal environment
    pub environment: EnvironmentalInputs,
    /// The clothing ensemble
    pub clothing: ClothingParameters,
    /// The activity being performed
    pub activity: ActivityParameters,
}

/// Reject NaN and infinities before any range comparison.
fn check_finite(value: f64, field: &'static str) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

impl SimulationInput {
    /// Check every precondition of the model.
    ///
    /// Runs before the first simulated minute; an `Err` guarantees no
    /// simulation state was touched.
    pub fn validate(&self) -> ValidationResult<()> {
        check_finite(self.subject.height_m, "height_m")?;
        check_finite(self.subject.weight_kg, "weight_kg")?;
        check_finite(self.subject.acclimatization, "acclimatization")?;
        check_finite(self.environment.air_temperature, "air_temperature")?;
        check_finite(
            self.environment.mean_radiant_temperature,
            "mean_radiant_temperature",
        )?;
        check_finite(self.environment.wind_speed, "wind_speed")?;
        check_finite(self.environment.vapour_pressure_hpa, "vapour_pressure_hpa")?;
        check_finite(self.clothing.insulation_clo, "insulation_clo")?;
        check_finite(self.clothing.permeability_index, "permeability_index")?;
        check_finite(self.clothing.reflective_fraction, "reflective_fraction")?;
        check_finite(self.clothing.reflective_emissivity, "reflective_emissivity")?;
        check_finite(self.activity.metabolic_rate, "metabolic_rate")?;
        check_finite(self.activity.mechanical_work, "mechanical_work")?;
        if let Some(speed) = self.activity.walking_speed {
            check_finite(speed, "walking_speed")?;
        }
        if let Some(angle) = self.activity.walking_angle_deg {
            check_finite(angle, "walking_angle_deg")?;
        }

        let acclimatization = self.subject.acclimatization;
        if !(0.0..=100.0).contains(&acclimatization) {
            return Err(ValidationError::Acclimatization {
                value: acclimatization,
            });
        }
        let insulation = self.clothing.insulation_clo;
        if !(0.0..=1.0).contains(&insulation) {
            return Err(ValidationError::Insulation { value: insulation });
        }
        let fraction = self.clothing.reflective_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError::ReflectiveFraction { value: fraction });
        }
        let emissivity = self.clothing.reflective_emissivity;
        if !(0.0..=1.0).contains(&emissivity) {
            return Err(ValidationError::ReflectiveEmissivity { value: emissivity });
        }
        let permeability = self.clothing.permeability_index;
        if !(0.0..=1.0).contains(&permeability) {
            return Err(ValidationError::PermeabilityIndex {
                value: permeability,
            });
        }
        if self.environment.vapour_pressure_hpa < 0.0 {
            return Err(ValidationError::VapourPressure {
                value: self.environment.vapour_pressure_hpa,
            });
        }
        if self.subject.weight_kg < 0.0 {
            return Err(ValidationError::Weight {
                value: self.subject.weight_kg,
            });
        }
        if self.subject.height_m < 0.0 {
            return Err(ValidationError::Height {
                value: self.subject.height_m,
            });
        }
        if self.activity.mechanical_work < 0.0 {
            return Err(ValidationError::MechanicalWork {
                value: self.activity.mechanical_work,
            });
        }
        if self.activity.duration_min == 0 {
            return Err(ValidationError::Duration);
        }
        Ok(())
    }
}
