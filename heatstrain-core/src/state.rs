//! Loop-Carried Simulation State
//!
//! [`BodyState`] holds everything that survives from one simulated minute
//! to the next. The per-minute step takes the previous state by reference
//! and returns a fresh one, so the minute loop is a plain fold with no
//! shared mutation. The record lives exactly as long as one simulation
//! call and is discarded once the [`PhsResult`](crate::results::PhsResult)
//! is assembled.

use crate::constants::body::{
    CORE_TEMP_BASELINE_C, DEHYDRATION_FRACTION_50TH, DEHYDRATION_FRACTION_95TH,
    DU_BOIS_COEFFICIENT, DU_BOIS_HEIGHT_EXPONENT, DU_BOIS_WEIGHT_EXPONENT,
    RECTAL_TEMP_BASELINE_C, SKIN_CORE_WEIGHTING_MAX, SKIN_TEMP_BASELINE_C,
    SPECIFIC_HEAT_COEFFICIENT,
};
use crate::constants::model::{
    CORE_EQUILIBRIUM_TIME_CONSTANT_MIN, SKIN_TIME_CONSTANT_MIN, SWEAT_TIME_CONSTANT_MIN,
};

/// Physiological state of the subject at the end of a simulated minute.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    /// Mean skin temperature in °C
    pub skin_temperature: f64,
    /// Core temperature in °C
    pub core_temperature: f64,
    /// Core temperature the metabolic rate is driving towards, in °C
    pub core_equilibrium_temperature: f64,
    /// Rectal temperature in °C
    pub rectal_temperature: f64,
    /// Skin/core mass weighting, always within [0.1, 0.3]
    pub skin_core_weighting: f64,
    /// Predicted sweat rate in W/m²
    pub predicted_sweat_rate: f64,
    /// Accumulated sweat plus respiratory evaporative power, in
    /// W/m²-minutes; converted to grams only when limits are checked
    pub cumulative_water_loss: f64,
}

impl BodyState {
    /// State of a rested subject at minute zero.
    ///
    /// Fixed physiological baselines; the simulation never resets these
    /// mid-run.
    pub fn baseline() -> Self {
        Self {
            skin_temperature: SKIN_TEMP_BASELINE_C,
            core_temperature: CORE_TEMP_BASELINE_C,
            core_equilibrium_temperature: CORE_TEMP_BASELINE_C,
            rectal_temperature: RECTAL_TEMP_BASELINE_C,
            skin_core_weighting: SKIN_CORE_WEIGHTING_MAX,
            predicted_sweat_rate: 0.0,
            cumulative_water_loss: 0.0,
        }
    }
}

/// Quantities computed once per run from the validated input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DerivedConstants {
    /// Du Bois body surface area in m²
    pub body_surface_area: f64,
    /// Body heat capacity per area, W·min/(m²·°C)
    pub specific_heat: f64,
    /// Water loss in grams protecting 50% of the population
    pub loss_limit_50_g: f64,
    /// Water loss in grams protecting 95% of the population
    pub loss_limit_95_g: f64,
    /// `e^(-1/10)` decay of the core equilibrium filter
    pub core_equilibrium_decay: f64,
    /// `e^(-1/3)` decay of the skin temperature filter
    pub skin_decay: f64,
    /// `e^(-1/10)` decay of the sweat rate filter
    pub sweat_decay: f64,
}

impl DerivedConstants {
    /// Derive the per-run constants from subject height and weight.
    pub fn new(height_m: f64, weight_kg: f64) -> Self {
        let body_surface_area = DU_BOIS_COEFFICIENT
            * libm::pow(weight_kg, DU_BOIS_WEIGHT_EXPONENT)
            * libm::pow(height_m, DU_BOIS_HEIGHT_EXPONENT);
        Self {
            body_surface_area,
            specific_heat: SPECIFIC_HEAT_COEFFICIENT * weight_kg / body_surface_area,
            loss_limit_50_g: DEHYDRATION_FRACTION_50TH * weight_kg * 1000.0,
            loss_limit_95_g: DEHYDRATION_FRACTION_95TH * weight_kg * 1000.0,
            core_equilibrium_decay: libm::exp(-1.0 / CORE_EQUILIBRIUM_TIME_CONSTANT_MIN),
            skin_decay: libm::exp(-1.0 / SKIN_TIME_CONSTANT_MIN),
            sweat_decay: libm::exp(-1.0 / SWEAT_TIME_CONSTANT_MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_matches_reference_initialisation() {
        let state = BodyState::baseline();
        assert_eq!(state.core_temperature, 36.8);
        assert_eq!(state.skin_temperature, 34.1);
        assert_eq!(state.rectal_temperature, 36.8);
        assert_eq!(state.skin_core_weighting, 0.3);
        assert_eq!(state.predicted_sweat_rate, 0.0);
        assert_eq!(state.cumulative_water_loss, 0.0);
    }

    #[test]
    fn du_bois_area_for_standard_subject() {
        // 1.8 m, 75 kg: Adu = 0.202 * 75^0.425 * 1.8^0.725 ≈ 1.936 m²
        let derived = DerivedConstants::new(1.8, 75.0);
        assert!((derived.body_surface_area - 1.936).abs() < 0.01);
        assert!(
            (derived.specific_heat - 57.83 * 75.0 / derived.body_surface_area).abs() < 1e-12
        );
    }

    #[test]
    fn dehydration_limits_scale_with_weight() {
        let derived = DerivedConstants::new(1.75, 80.0);
        assert_eq!(derived.loss_limit_50_g, 6000.0);
        assert_eq!(derived.loss_limit_95_g, 4000.0);
    }

    #[test]
    fn smoothing_decays_are_fractions() {
        let derived = DerivedConstants::new(1.8, 75.0);
        assert!(derived.core_equilibrium_decay > 0.0 && derived.core_equilibrium_decay < 1.0);
        assert!(derived.skin_decay > 0.0 && derived.skin_decay < 1.0);
        assert_eq!(derived.core_equilibrium_decay, derived.sweat_decay);
    }
}
