//! Fixed-Point Solvers of the Heat-Balance Model
//!
//! Two coupled quantities in the minute step have no closed form and are
//! resolved iteratively:
//!
//! - the **clothing surface temperature**, whose radiative exchange
//!   coefficient depends on the surface temperature itself;
//! - the **core temperature**, whose skin/core mass weighting depends on
//!   the core temperature itself.
//!
//! Both follow the same scheme: recompute the coupled coefficient from the
//! current guess, form a heat-balance estimate, and average the estimate
//! 50/50 with the guess until successive values agree within the
//! tolerance. Iteration caps and tolerances are explicit parameters so the
//! convergence behavior is testable on its own; the production values live
//! in [`crate::constants::model`].
//!
//! On cap exhaustion the solvers return the last estimate rather than
//! erroring, matching the reference model. [`SolverOutcome::converged`]
//! exposes the condition so callers can count it.

use crate::constants::body::{
    CORE_TEMP_BASELINE_C, SKIN_CORE_WEIGHTING_MAX, SKIN_CORE_WEIGHTING_MIN,
    SKIN_CORE_WEIGHTING_SLOPE,
};

/// Result of one fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    /// The accepted estimate
    pub value: f64,
    /// Iterations actually executed
    pub iterations: u32,
    /// Whether successive estimates met the tolerance before the cap
    pub converged: bool,
}

/// Inputs of the clothing surface temperature solve, fixed for one minute.
#[derive(Debug, Clone, Copy)]
pub struct ClothingExchange {
    /// Clothing area factor `fcl`
    pub clothing_area_factor: f64,
    /// Dynamic convective coefficient `Hcdyn`, W/(m²·°C)
    pub convective_coefficient: f64,
    /// Dynamic clothing insulation `Icldyn`, m²·°C/W
    pub dynamic_clothing_insulation: f64,
    /// Air temperature, °C
    pub air_temperature: f64,
    /// Mean radiant temperature, °C
    pub mean_radiant_temperature: f64,
    /// Current mean skin temperature, °C
    pub skin_temperature: f64,
    /// Combined emissivity/area radiative factor `FclR · σ · Ardu`
    pub radiative_factor: f64,
}

/// Radiative exchange coefficient for a surface temperature guess.
///
/// `Hr = factor · ((Tcl+273)⁴ − (Tr+273)⁴) / (Tcl − Tr)`; when the guess
/// lands exactly on the radiant temperature the analytic limit
/// `4 · factor · (Tr+273)³` replaces the indeterminate quotient.
fn radiative_coefficient(surface_temp: f64, radiant_temp: f64, factor: f64) -> f64 {
    let delta = surface_temp - radiant_temp;
    if delta == 0.0 {
        let kelvin = radiant_temp + 273.0;
        return 4.0 * factor * kelvin * kelvin * kelvin;
    }
    factor
        * (libm::pow(surface_temp + 273.0, 4.0) - libm::pow(radiant_temp + 273.0, 4.0))
        / delta
}

/// Solve the clothing surface temperature.
///
/// Starts from `mean radiant temperature + 0.1` and iterates the heat
/// balance between skin, clothing and environment. Returns the accepted
/// surface temperature together with the radiative coefficient of the
/// final iteration, which the caller reuses for the convective/radiative
/// exchange terms.
pub fn solve_clothing_temperature(
    exchange: &ClothingExchange,
    max_iterations: u32,
    tolerance: f64,
) -> (SolverOutcome, f64) {
    let fcl = exchange.clothing_area_factor;
    let hc = exchange.convective_coefficient;
    let ta = exchange.air_temperature;
    let tr = exchange.mean_radiant_temperature;
    let icl_dyn = exchange.dynamic_clothing_insulation;

    // Nude limit: with no clothing layer the surface is the skin itself.
    if icl_dyn <= 0.0 {
        let radiative = radiative_coefficient(exchange.skin_temperature, tr, exchange.radiative_factor);
        return (
            SolverOutcome {
                value: exchange.skin_temperature,
                iterations: 0,
                converged: true,
            },
            radiative,
        );
    }

    let mut surface = tr + 0.1;
    let mut radiative = 0.0;
    let mut iterations = 0;
    let mut converged = false;
    for iteration in 0..max_iterations {
        iterations = iteration + 1;
        radiative = radiative_coefficient(surface, tr, exchange.radiative_factor);
        let estimate = (fcl * (hc * ta + radiative * tr) + exchange.skin_temperature / icl_dyn)
            / (fcl * (hc + radiative) + 1.0 / icl_dyn);
        if libm::fabs(surface - estimate) > tolerance {
            surface = (surface + estimate) / 2.0;
        } else {
            // The pre-average guess is the accepted value, as in the
            // reference model.
            converged = true;
            break;
        }
    }

    (
        SolverOutcome {
            value: surface,
            iterations,
            converged,
        },
        radiative,
    )
}

/// Inputs of the core temperature solve, fixed for one minute.
#[derive(Debug, Clone, Copy)]
pub struct CoreBalance {
    /// Net heat storage of this minute, W/m²
    pub heat_storage: f64,
    /// Body heat capacity per area, W·min/(m²·°C)
    pub specific_heat: f64,
    /// Core temperature at the end of the previous minute, °C
    pub previous_core: f64,
    /// Skin temperature at the end of the previous minute, °C
    pub previous_skin: f64,
    /// Skin temperature of the current minute, °C
    pub skin_temperature: f64,
    /// Skin/core weighting carried from the previous minute
    pub previous_weighting: f64,
}

/// Skin/core mass weighting for a core temperature guess.
///
/// Shrinks linearly as the core heats past baseline, clamped to
/// [0.1, 0.3].
fn skin_core_weighting(core_temp: f64) -> f64 {
    let mut weighting =
        SKIN_CORE_WEIGHTING_MAX - SKIN_CORE_WEIGHTING_SLOPE * (core_temp - CORE_TEMP_BASELINE_C);
    if weighting > SKIN_CORE_WEIGHTING_MAX {
        weighting = SKIN_CORE_WEIGHTING_MAX;
    }
    if weighting < SKIN_CORE_WEIGHTING_MIN {
        weighting = SKIN_CORE_WEIGHTING_MIN;
    }
    weighting
}

/// Solve the core temperature for this minute.
///
/// The skin/core weighting is recomputed from the running guess on every
/// iteration; the weighting of the final iteration is returned alongside
/// the temperature and becomes the carried weighting of the next minute.
pub fn solve_core_temperature(
    balance: &CoreBalance,
    max_iterations: u32,
    tolerance: f64,
) -> (SolverOutcome, f64) {
    let mut guess = balance.previous_core;
    let mut core = guess;
    let mut weighting = balance.previous_weighting;
    let mut iterations = 0;
    let mut converged = false;
    for iteration in 0..max_iterations {
        iterations = iteration + 1;
        weighting = skin_core_weighting(guess);
        core = balance.heat_storage / balance.specific_heat
            + balance.previous_skin * balance.previous_weighting / 2.0
            - balance.skin_temperature * weighting / 2.0;
        core = (core + balance.previous_core * (1.0 - balance.previous_weighting / 2.0))
            / (1.0 - weighting / 2.0);
        if libm::fabs(core - guess) > tolerance {
            guess = (guess + core) / 2.0;
        } else {
            converged = true;
            break;
        }
    }

    (
        SolverOutcome {
            value: core,
            iterations,
            converged,
        },
        weighting,
    )
}
