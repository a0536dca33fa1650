//! Simulation Results and Heat-Strain Classification
//!
//! [`PhsResult`] is the full output of one run: the final rectal
//! temperature, the cumulative water loss, the three limiting times, the
//! discrete severity level, and the solver diagnostics. The compact
//! `(rectal temperature, effect level, comfortable)` triple most callers
//! want is available through [`PhsResult::summary`].
//!
//! ## Classification
//!
//! The severity level is decided from the rectal-temperature limiting time
//! and the 95th-percentile dehydration limiting time by strict precedence:
//! the first matching rule wins. Limiting times never reached during the
//! run are defaulted to the full duration before classification, so "both
//! at the full duration" is exactly the no-limit case.

use crate::constants::model::{
    EFFECT_EXTREME_LIMIT_MIN, EFFECT_HIGH_LIMIT_MIN, NEAR_FULL_SHIFT_FRACTION,
};

/// Discrete heat-strain severity, ordered from none to extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeatStrainEffect {
    /// No limit reached within the work sequence
    None,
    /// A limit is reached in the last 1.5% of the sequence
    Slight,
    /// A limit is reached after two hours but before the sequence ends
    Moderate,
    /// A limit is reached between 30 and 120 minutes
    High,
    /// A limit is reached within the first 30 minutes
    Extreme,
}

impl HeatStrainEffect {
    /// Numeric level 0-4, as reported by the reference model.
    pub fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Slight => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::Extreme => 4,
        }
    }
}

/// Non-convergence counters of the two fixed-point solvers.
///
/// The reference model silently continues with the last estimate when a
/// solver exhausts its iteration cap; these counters make that visible
/// without changing the numbers. A zero in both fields means every minute
/// converged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverDiagnostics {
    /// Minutes in which the clothing surface solve hit its cap
    pub clothing_cap_exhausted: u32,
    /// Minutes in which the core temperature solve hit its cap
    pub core_cap_exhausted: u32,
}

impl SolverDiagnostics {
    /// Whether every solve of the run converged within its cap.
    pub fn all_converged(&self) -> bool {
        self.clothing_cap_exhausted == 0 && self.core_cap_exhausted == 0
    }
}

/// Full output of one PHS simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhsResult {
    /// Rectal temperature at the end of the sequence, °C
    pub rectal_temperature: f64,
    /// Cumulative sweat and respiratory water loss, grams
    pub water_loss_g: f64,
    /// First minute the rectal temperature reached 38 °C, or the full
    /// duration if never
    pub d_lim_tre: f64,
    /// First minute of 50th-percentile dehydration, or the full duration
    /// if never; fractional when drinking is disallowed
    pub d_lim_loss_50: f64,
    /// First minute of 95th-percentile dehydration, or the full duration
    /// if never; fractional when drinking is disallowed
    pub d_lim_loss_95: f64,
    /// Discrete severity of the exposure
    pub effect: HeatStrainEffect,
    /// Whether the whole sequence can be worked without reaching a limit
    pub comfortable: bool,
    /// Fixed-point solver non-convergence counters
    pub diagnostics: SolverDiagnostics,
}

impl PhsResult {
    /// The compact `(rectal temperature °C, effect level 0-4,
    /// comfortable)` triple.
    pub fn summary(&self) -> (f64, u8, bool) {
        (self.rectal_temperature, self.effect.level(), self.comfortable)
    }
}

/// Classify a run from its limiting times.
///
/// `d_lim_tre` and `d_lim_loss_95` must already be defaulted to the full
/// duration when never reached. First matching rule wins:
///
/// 1. both limits at or past the duration - no effect, comfortable
/// 2. either limit within 30 minutes - extreme
/// 3. either limit within (30, 120] minutes - high
/// 4. either limit before the last 1.5% of the sequence - moderate
/// 5. either limit inside the last 1.5% - slight
pub fn classify(d_lim_tre: f64, d_lim_loss_95: f64, duration_min: u32) -> (HeatStrainEffect, bool) {
    let duration = f64::from(duration_min);
    let near_full = duration - duration * NEAR_FULL_SHIFT_FRACTION;

    if d_lim_loss_95 >= duration && d_lim_tre >= duration {
        (HeatStrainEffect::None, true)
    } else if d_lim_tre <= EFFECT_EXTREME_LIMIT_MIN || d_lim_loss_95 <= EFFECT_EXTREME_LIMIT_MIN {
        (HeatStrainEffect::Extreme, false)
    } else if (d_lim_tre > EFFECT_EXTREME_LIMIT_MIN && d_lim_tre <= EFFECT_HIGH_LIMIT_MIN)
        || (d_lim_loss_95 > EFFECT_EXTREME_LIMIT_MIN && d_lim_loss_95 <= EFFECT_HIGH_LIMIT_MIN)
    {
        (HeatStrainEffect::High, false)
    } else if (d_lim_tre > EFFECT_HIGH_LIMIT_MIN && d_lim_tre < near_full)
        || (d_lim_loss_95 > EFFECT_HIGH_LIMIT_MIN && d_lim_loss_95 < near_full)
    {
        (HeatStrainEffect::Moderate, false)
    } else if (d_lim_tre >= near_full && d_lim_tre < duration)
        || (d_lim_loss_95 >= near_full && d_lim_loss_95 < duration)
    {
        (HeatStrainEffect::Slight, false)
    } else {
        // Unreachable once limits are defaulted to the duration; level
        // stays at none as in the reference initialisation.
        (HeatStrainEffect::None, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limit_reached_is_comfortable() {
        let (effect, comfortable) = classify(480.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::None);
        assert!(comfortable);
    }

    #[test]
    fn extreme_boundary_at_thirty_minutes() {
        let (effect, comfortable) = classify(30.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::Extreme);
        assert!(!comfortable);

        // Just past the boundary the level drops to high
        let (effect, _) = classify(31.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::High);
    }

    #[test]
    fn high_boundary_at_two_hours() {
        let (effect, _) = classify(120.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::High);

        let (effect, _) = classify(121.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::Moderate);
    }

    #[test]
    fn slight_band_covers_last_fraction_of_shift() {
        // 0.985 · 480 = 472.8
        let (effect, _) = classify(472.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::Moderate);

        let (effect, _) = classify(472.8, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::Slight);

        let (effect, _) = classify(479.0, 480.0, 480);
        assert_eq!(effect, HeatStrainEffect::Slight);
    }

    #[test]
    fn dehydration_limit_drives_classification_alone() {
        let (effect, comfortable) = classify(480.0, 25.0, 480);
        assert_eq!(effect, HeatStrainEffect::Extreme);
        assert!(!comfortable);
    }

    #[test]
    fn severest_matching_rule_wins() {
        // One limit extreme, the other slight: precedence picks extreme
        let (effect, _) = classify(20.0, 475.0, 480);
        assert_eq!(effect, HeatStrainEffect::Extreme);
    }

    #[test]
    fn effect_levels_are_ordered() {
        assert!(HeatStrainEffect::None < HeatStrainEffect::Slight);
        assert!(HeatStrainEffect::High < HeatStrainEffect::Extreme);
        assert_eq!(HeatStrainEffect::Moderate.level(), 2);
        assert_eq!(HeatStrainEffect::Extreme.level(), 4);
    }
}
