//! Anthropometric and Physiological Baselines
//!
//! Initial state of the simulated subject and the body-geometry constants
//! the derived quantities are built from. All temperatures in °C.

// ===== INITIAL PHYSIOLOGICAL STATE =====

/// Core temperature at the start of the work sequence (°C).
///
/// Resting deep-body temperature of a healthy subject; both the core and
/// rectal temperatures start here.
///
/// Source: ISO 7933:2004, reference program initialisation
pub const CORE_TEMP_BASELINE_C: f64 = 36.8;

/// Mean skin temperature at the start of the work sequence (°C).
///
/// Source: ISO 7933:2004, reference program initialisation
pub const SKIN_TEMP_BASELINE_C: f64 = 34.1;

/// Rectal temperature at the start of the work sequence (°C).
pub const RECTAL_TEMP_BASELINE_C: f64 = 36.8;

/// Rectal temperature above which heat-strain exposure must stop (°C).
///
/// First crossing of this limit sets the `Dlimtre` limiting time.
///
/// Source: ISO 7933:2004, §4.4 (maximum rectal temperature criterion)
pub const RECTAL_TEMP_LIMIT_C: f64 = 38.0;

// ===== SKIN/CORE HEAT DISTRIBUTION =====

/// Upper bound of the skin/core mass weighting (dimensionless).
///
/// At rest roughly 30% of body mass is thermally associated with the skin
/// shell; the weighting shrinks as the core heats up.
pub const SKIN_CORE_WEIGHTING_MAX: f64 = 0.3;

/// Lower bound of the skin/core mass weighting (dimensionless).
pub const SKIN_CORE_WEIGHTING_MIN: f64 = 0.1;

/// Slope of the weighting decrease per °C of core temperature above
/// baseline (1/°C).
pub const SKIN_CORE_WEIGHTING_SLOPE: f64 = 0.09;

// ===== BODY GEOMETRY =====

/// Du Bois body surface area coefficient (m² · kg⁻⁰·⁴²⁵ · m⁻⁰·⁷²⁵).
///
/// `Adu = 0.202 · weight^0.425 · height^0.725`
///
/// Source: Du Bois & Du Bois (1916), as used by ISO 7933
pub const DU_BOIS_COEFFICIENT: f64 = 0.202;

/// Weight exponent of the Du Bois formula.
pub const DU_BOIS_WEIGHT_EXPONENT: f64 = 0.425;

/// Height exponent of the Du Bois formula.
pub const DU_BOIS_HEIGHT_EXPONENT: f64 = 0.725;

/// Reference body surface area used when scaling water loss to grams (m²).
///
/// The ISO 7933 sweat-rate criteria are expressed for a standard subject
/// of 1.8 m²; per-subject rates are rescaled through this reference.
pub const REFERENCE_BODY_AREA_M2: f64 = 1.8;

/// Specific heat coefficient of the body (W·min/(m²·°C) per kg/m²).
///
/// `spHeat = 57.83 · weight / Adu` gives the heat capacity that converts a
/// one-minute core temperature change into stored power per square meter.
pub const SPECIFIC_HEAT_COEFFICIENT: f64 = 57.83;

/// Effective radiating area fraction of a seated body (dimensionless).
pub const RADIATING_AREA_SITTING: f64 = 0.70;

/// Effective radiating area fraction of a standing body (dimensionless).
pub const RADIATING_AREA_STANDING: f64 = 0.77;

/// Effective radiating area fraction of a crouching body (dimensionless).
pub const RADIATING_AREA_CROUCHING: f64 = 0.67;

/// Emissivity of bare skin and ordinary (non-reflective) clothing.
pub const SKIN_EMISSIVITY: f64 = 0.97;

// ===== DEHYDRATION LIMITS =====

/// Body-mass fraction of water loss protecting 50% of the population.
///
/// `Dmax50 = 0.075 · weight · 1000` grams.
///
/// Source: ISO 7933:2004, §4.5 (maximum water loss criterion)
pub const DEHYDRATION_FRACTION_50TH: f64 = 0.075;

/// Body-mass fraction of water loss protecting 95% of the population.
///
/// `Dmax95 = 0.05 · weight · 1000` grams.
pub const DEHYDRATION_FRACTION_95TH: f64 = 0.05;
