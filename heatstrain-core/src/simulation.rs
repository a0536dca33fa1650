//! Minute-Stepped Heat Strain Simulation
//!
//! ## Overview
//!
//! [`HeatStrainSimulator`] runs the ISO 7933 Predicted Heat Strain model:
//! a minute-by-minute heat balance of a working subject, tracking skin,
//! core and rectal temperatures and the accumulated water loss, and
//! reporting the limiting times at which the rectal-temperature and
//! dehydration criteria are crossed.
//!
//! ## Structure of a minute
//!
//! Each simulated minute is one pure step from the previous
//! [`BodyState`]:
//!
//! 1. maximum sweat rate from the metabolic rate and acclimatization
//! 2. core equilibrium temperature through a 10-minute exponential filter
//! 3. skin equilibrium from the clothed/nude regressions, 3-minute filter
//! 4. dynamic insulation and evaporative resistance from relative air
//!    velocity and walking corrections
//! 5. respiratory convective and evaporative losses
//! 6. clothing surface temperature (fixed-point solve)
//! 7. heat balance: convection, radiation, maximum and required
//!    evaporation
//! 8. required and predicted sweat rates, predicted evaporation
//! 9. net heat storage and the core temperature (second fixed-point
//!    solve, coupled to the skin/core weighting)
//! 10. rectal temperature recurrence and limit tracking
//!
//! The formulas are an order-sensitive transcription of the reference
//! model; every clamp and branch below matters for matching its limiting
//! times.
//!
//! ## Determinism
//!
//! The run is single-threaded and purely deterministic: identical inputs
//! produce bit-identical results. All state lives in the one `BodyState`
//! local to the call, so independent call sites may run simulations
//! concurrently without synchronization.

use crate::{
    constants::body::{RECTAL_TEMP_LIMIT_C, REFERENCE_BODY_AREA_M2, SKIN_EMISSIVITY},
    constants::model::{
        ACCLIMATIZATION_THRESHOLD, ACCLIMATIZED_SWEAT_BONUS, CLOTHING_AREA_FACTOR_SLOPE,
        CLOTHING_SOLVER_MAX_ITERATIONS, CLO_TO_INSULATION, CORE_SOLVER_MAX_ITERATIONS,
        DYNAMIC_PERMEABILITY_CAP, EVAPORATIVE_RESISTANCE_FACTOR, MAX_WETTEDNESS_ACCLIMATIZED,
        MAX_WETTEDNESS_UNACCLIMATIZED, METABOLIC_WALKING_SPEED_CAP, METABOLIC_WALKING_SPEED_SLOPE,
        NO_DRINKING_LOSS_SCALE, REQUIRED_WETTEDNESS_CAP, SOLVER_TOLERANCE_C,
        STATIC_AIR_LAYER_INSULATION, STEFAN_BOLTZMANN, SWEAT_ENERGY_TO_GRAMS, SWEAT_RATE_CEILING,
        SWEAT_RATE_FLOOR, VELOCITY_CORRECTION_CAP, WALKING_SPEED_CORRECTION_CAP,
    },
    errors::ValidationResult,
    inputs::SimulationInput,
    results::{classify, PhsResult, SolverDiagnostics},
    solver::{
        solve_clothing_temperature, solve_core_temperature, ClothingExchange, CoreBalance,
    },
    state::{BodyState, DerivedConstants},
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

/// Convergence of the two fixed-point solves within one minute.
#[derive(Debug, Clone, Copy)]
struct StepConvergence {
    clothing_converged: bool,
    core_converged: bool,
}

/// The PHS simulation engine for one validated input record.
#[derive(Debug, Clone)]
pub struct HeatStrainSimulator {
    input: SimulationInput,
    derived: DerivedConstants,
}

impl HeatStrainSimulator {
    /// Validate the input and derive the per-run constants.
    ///
    /// Fails fast on any violated precondition; no simulation state exists
    /// until `run` is called.
    pub fn new(input: SimulationInput) -> ValidationResult<Self> {
        input.validate()?;
        let derived = DerivedConstants::new(input.subject.height_m, input.subject.weight_kg);
        Ok(Self { input, derived })
    }

    /// Body surface area of the subject in m² (Du Bois).
    pub fn body_surface_area(&self) -> f64 {
        self.derived.body_surface_area
    }

    /// Run the full work sequence and classify the outcome.
    pub fn run(&self) -> PhsResult {
        let duration = self.input.activity.duration_min;
        let drinking_allowed = self.input.activity.drinking_allowed;

        let mut state = BodyState::baseline();
        let mut diagnostics = SolverDiagnostics::default();
        let mut d_lim_tre = 0.0_f64;
        let mut d_lim_loss_50 = 0.0_f64;
        let mut d_lim_loss_95 = 0.0_f64;
        let mut water_loss_g = 0.0_f64;

        for minute in 1..=duration {
            let (next, convergence) = self.step(&state);
            state = next;

            if !convergence.clothing_converged {
                diagnostics.clothing_cap_exhausted += 1;
                if diagnostics.clothing_cap_exhausted == 1 {
                    log_warn!(
                        "clothing surface solve hit its iteration cap at minute {}",
                        minute
                    );
                }
            }
            if !convergence.core_converged {
                diagnostics.core_cap_exhausted += 1;
                if diagnostics.core_cap_exhausted == 1 {
                    log_warn!(
                        "core temperature solve hit its iteration cap at minute {}",
                        minute
                    );
                }
            }

            if d_lim_tre == 0.0 && state.rectal_temperature >= RECTAL_TEMP_LIMIT_C {
                d_lim_tre = f64::from(minute);
            }
            water_loss_g = state.cumulative_water_loss * SWEAT_ENERGY_TO_GRAMS
                * self.derived.body_surface_area
                / REFERENCE_BODY_AREA_M2
                / 60.0;
            if d_lim_loss_50 == 0.0 && water_loss_g >= self.derived.loss_limit_50_g {
                d_lim_loss_50 = f64::from(minute);
            }
            if d_lim_loss_95 == 0.0 && water_loss_g >= self.derived.loss_limit_95_g {
                d_lim_loss_95 = f64::from(minute);
            }
            // The reference model rescales on every minute, not once, so a
            // recorded crossing keeps shrinking for the rest of the run.
            if !drinking_allowed {
                d_lim_loss_95 *= NO_DRINKING_LOSS_SCALE;
                d_lim_loss_50 = d_lim_loss_95;
            }
        }

        if d_lim_loss_50 == 0.0 {
            d_lim_loss_50 = f64::from(duration);
        }
        if d_lim_loss_95 == 0.0 {
            d_lim_loss_95 = f64::from(duration);
        }
        if d_lim_tre == 0.0 {
            d_lim_tre = f64::from(duration);
        }

        let (effect, comfortable) = classify(d_lim_tre, d_lim_loss_95, duration);

        PhsResult {
            rectal_temperature: state.rectal_temperature,
            water_loss_g,
            d_lim_tre,
            d_lim_loss_50,
            d_lim_loss_95,
            effect,
            comfortable,
            diagnostics,
        }
    }

    /// Advance the physiological state by one minute.
    fn step(&self, previous: &BodyState) -> (BodyState, StepConvergence) {
        let subject = &self.input.subject;
        let environment = &self.input.environment;
        let clothing = &self.input.clothing;
        let activity = &self.input.activity;

        let met = activity.metabolic_rate;
        let air_temp = environment.air_temperature;
        let radiant_temp = environment.mean_radiant_temperature;
        let wind = environment.wind_speed;
        // hPa to the kPa-scaled unit the regressions expect
        let vapour_pressure = environment.vapour_pressure_hpa * 0.1;
        let insulation = clothing.insulation_clo;

        let previous_skin = previous.skin_temperature;
        let previous_rectal = previous.rectal_temperature;
        let previous_core = previous.core_temperature;
        let previous_equilibrium = previous.core_equilibrium_temperature;
        let previous_weighting = previous.skin_core_weighting;

        // Maximum sweat rate for this metabolic rate; clamped before the
        // acclimatization bonus
        let mut max_sweat_rate = (met - 32.0) * self.derived.body_surface_area;
        if max_sweat_rate > SWEAT_RATE_CEILING {
            max_sweat_rate = SWEAT_RATE_CEILING;
        }
        if max_sweat_rate < SWEAT_RATE_FLOOR {
            max_sweat_rate = SWEAT_RATE_FLOOR;
        }
        let acclimatized = subject.acclimatization >= ACCLIMATIZATION_THRESHOLD;
        if acclimatized {
            max_sweat_rate *= ACCLIMATIZED_SWEAT_BONUS;
        }
        let max_wettedness = if acclimatized {
            MAX_WETTEDNESS_ACCLIMATIZED
        } else {
            MAX_WETTEDNESS_UNACCLIMATIZED
        };

        // Core equilibrium temperature for this metabolic rate, blended by
        // the 10-minute filter; the increment feeds the heat balance
        let equilibrium_target = 0.0036 * met + 36.6;
        let core_equilibrium = previous_equilibrium * self.derived.core_equilibrium_decay
            + equilibrium_target * (1.0 - self.derived.core_equilibrium_decay);
        let equilibrium_storage = self.derived.specific_heat
            * (core_equilibrium - previous_equilibrium)
            * (1.0 - previous_weighting);

        // Skin equilibrium: clothed and nude regressions on the ambient
        // conditions and the running rectal temperature
        let skin_eq_clothed = 12.165
            + 0.02017 * air_temp
            + 0.04361 * radiant_temp
            + 0.19354 * vapour_pressure
            - 0.25315 * wind
            + 0.005346 * met
            + 0.51274 * previous_rectal;
        let skin_eq_nude = 7.191
            + 0.064 * air_temp
            + 0.061 * radiant_temp
            + 0.198 * vapour_pressure
            - 0.348 * wind
            + 0.616 * previous_rectal;
        // The reference model evaluates the clothed/nude blend twice with
        // asymmetric thresholds and the second evaluation wins: at or
        // below 0.2 clo the nude value applies, everywhere else the
        // interpolation does, even above 0.6 clo where it extrapolates
        // past the clothed value.
        let skin_equilibrium = if insulation <= 0.2 {
            skin_eq_nude
        } else {
            skin_eq_nude + 2.5 * (skin_eq_clothed - skin_eq_nude) * (insulation - 0.2)
        };
        let skin_temp = previous_skin * self.derived.skin_decay
            + skin_equilibrium * (1.0 - self.derived.skin_decay);
        // Saturated vapour pressure at the skin surface
        let skin_vapour_pressure =
            0.6105 * libm::exp(17.27 * skin_temp / (skin_temp + 237.3));

        // Static clothing insulation and area factor
        let static_clothing_insulation = insulation * CLO_TO_INSULATION;
        let area_factor = 1.0 + CLOTHING_AREA_FACTOR_SLOPE * insulation;
        let static_total_insulation =
            static_clothing_insulation + STATIC_AIR_LAYER_INSULATION / area_factor;

        // Relative air velocity from wind and walking
        let (relative_velocity, walking_speed) =
            match (activity.walking_speed, activity.walking_angle_deg) {
                (Some(speed), Some(angle)) => {
                    // Unidirectional walking: vector difference against the
                    // wind, reference model's value of pi
                    let velocity =
                        libm::fabs(wind - speed * libm::cos(3.14159 * angle / 180.0));
                    (velocity, speed)
                }
                (Some(speed), None) => {
                    // Omni-directional walking
                    let velocity = if wind < speed { speed } else { wind };
                    (velocity, speed)
                }
                (None, _) => {
                    // Stationary or unspecified: walking speed follows the
                    // metabolic rate
                    let mut derived_speed = METABOLIC_WALKING_SPEED_SLOPE * (met - 58.0);
                    if derived_speed > METABOLIC_WALKING_SPEED_CAP {
                        derived_speed = METABOLIC_WALKING_SPEED_CAP;
                    }
                    (wind, derived_speed)
                }
            };

        // Insulation corrections for wind and walking. The clothing
        // correction uses the capped velocity; the air-layer correction
        // uses the uncapped one (reference asymmetry).
        let velocity_aux = if relative_velocity > VELOCITY_CORRECTION_CAP {
            VELOCITY_CORRECTION_CAP
        } else {
            relative_velocity
        };
        let walking_aux = if walking_speed > WALKING_SPEED_CORRECTION_CAP {
            WALKING_SPEED_CORRECTION_CAP
        } else {
            walking_speed
        };
        let mut clothing_correction = 1.044
            * libm::exp(
                (0.066 * velocity_aux - 0.398) * velocity_aux
                    + (0.094 * walking_aux - 0.378) * walking_aux,
            );
        if clothing_correction > 1.0 {
            clothing_correction = 1.0;
        }
        let mut air_layer_correction = libm::exp(
            (0.047 * relative_velocity - 0.472) * relative_velocity
                + (0.117 * walking_aux - 0.342) * walking_aux,
        );
        if air_layer_correction > 1.0 {
            air_layer_correction = 1.0;
        }
        let mut total_correction = clothing_correction;
        if insulation <= 0.6 {
            total_correction = ((0.6 - insulation) * air_layer_correction
                + insulation * clothing_correction)
                / 0.6;
        }

        // Dynamic insulations and evaporative resistance
        let dynamic_total_insulation = static_total_insulation * total_correction;
        let dynamic_air_insulation = air_layer_correction * STATIC_AIR_LAYER_INSULATION;
        let dynamic_clothing_insulation =
            dynamic_total_insulation - dynamic_air_insulation / area_factor;
        let permeability_correction =
            (2.6 * total_correction - 6.5) * total_correction + 4.9;
        let mut dynamic_permeability = clothing.permeability_index * permeability_correction;
        if dynamic_permeability > DYNAMIC_PERMEABILITY_CAP {
            dynamic_permeability = DYNAMIC_PERMEABILITY_CAP;
        }
        let dynamic_evaporative_resistance =
            dynamic_total_insulation / dynamic_permeability / EVAPORATIVE_RESISTANCE_FACTOR;

        // Respiratory convective and evaporative losses
        let expired_air_temp = 28.56 + 0.115 * air_temp + 0.641 * vapour_pressure;
        let respiratory_convection = 0.001516 * met * (expired_air_temp - air_temp);
        let respiratory_evaporation =
            0.00127 * met * (59.34 + 0.53 * air_temp - 11.63 * vapour_pressure);

        // Dynamic convective coefficient: forced branch above 1 m/s, never
        // below the natural-convection value
        let mut forced_convection = 3.5 + 5.2 * relative_velocity;
        if relative_velocity > 1.0 {
            forced_convection = 8.7 * libm::pow(relative_velocity, 0.6);
        }
        let mut convective_coefficient =
            2.38 * libm::pow(libm::fabs(skin_temp - air_temp), 0.25);
        if forced_convection > convective_coefficient {
            convective_coefficient = forced_convection;
        }

        // Combined emissivity of skin and reflective clothing, scaled by
        // the posture's radiating area
        let radiative_factor = ((1.0 - clothing.reflective_fraction) * SKIN_EMISSIVITY
            + clothing.reflective_fraction * clothing.reflective_emissivity)
            * STEFAN_BOLTZMANN
            * subject.body_position.radiating_area();

        let exchange = ClothingExchange {
            clothing_area_factor: area_factor,
            convective_coefficient,
            dynamic_clothing_insulation,
            air_temperature: air_temp,
            mean_radiant_temperature: radiant_temp,
            skin_temperature: skin_temp,
            radiative_factor,
        };
        let (clothing_outcome, radiative_coefficient) = solve_clothing_temperature(
            &exchange,
            CLOTHING_SOLVER_MAX_ITERATIONS,
            SOLVER_TOLERANCE_C,
        );
        let surface_temp = clothing_outcome.value;

        // Heat balance at the converged surface temperature
        let convection = area_factor * convective_coefficient * (surface_temp - air_temp);
        let radiation = area_factor * radiative_coefficient * (surface_temp - radiant_temp);
        let mut max_evaporation =
            (skin_vapour_pressure - vapour_pressure) / dynamic_evaporative_resistance;
        let mut required_evaporation = met
            - equilibrium_storage
            - activity.mechanical_work
            - respiratory_convection
            - respiratory_evaporation
            - convection
            - radiation;

        // Required sweat rate
        let required_sweat_rate;
        if required_evaporation <= 0.0 {
            required_evaporation = 0.0;
            required_sweat_rate = 0.0;
        } else if max_evaporation <= 0.0 {
            max_evaporation = 0.0;
            required_sweat_rate = max_sweat_rate;
        } else {
            let required_wettedness = required_evaporation / max_evaporation;
            if required_wettedness >= REQUIRED_WETTEDNESS_CAP {
                required_sweat_rate = max_sweat_rate;
            } else {
                let mut efficiency = 1.0 - required_wettedness * required_wettedness / 2.0;
                if required_wettedness > 1.0 {
                    efficiency =
                        (2.0 - required_wettedness) * (2.0 - required_wettedness) / 2.0;
                }
                let mut rate = required_evaporation / efficiency;
                if rate > max_sweat_rate {
                    rate = max_sweat_rate;
                }
                required_sweat_rate = rate;
            }
        }

        // Predicted sweat rate through the 10-minute filter, then the
        // predicted evaporation from the wettedness proxy
        let mut predicted_sweat_rate = previous.predicted_sweat_rate * self.derived.sweat_decay
            + required_sweat_rate * (1.0 - self.derived.sweat_decay);
        let predicted_evaporation;
        if predicted_sweat_rate <= 0.0 {
            predicted_sweat_rate = 0.0;
            predicted_evaporation = 0.0;
        } else {
            let ratio = max_evaporation / predicted_sweat_rate;
            let mut wettedness = 1.0;
            if ratio >= 0.5 {
                wettedness = -ratio + libm::sqrt(ratio * ratio + 2.0);
            }
            if wettedness > max_wettedness {
                wettedness = max_wettedness;
            }
            predicted_evaporation = wettedness * max_evaporation;
        }

        // Net heat storage of the minute
        let heat_storage =
            required_evaporation - predicted_evaporation + equilibrium_storage;

        let balance = CoreBalance {
            heat_storage,
            specific_heat: self.derived.specific_heat,
            previous_core,
            previous_skin,
            skin_temperature: skin_temp,
            previous_weighting,
        };
        let (core_outcome, weighting) =
            solve_core_temperature(&balance, CORE_SOLVER_MAX_ITERATIONS, SOLVER_TOLERANCE_C);
        let core_temp = core_outcome.value;

        // Rectal temperature first-order recurrence
        let rectal_temp =
            previous_rectal + (2.0 * core_temp - 1.962 * previous_rectal - 1.31) / 9.0;

        let next = BodyState {
            skin_temperature: skin_temp,
            core_temperature: core_temp,
            core_equilibrium_temperature: core_equilibrium,
            rectal_temperature: rectal_temp,
            skin_core_weighting: weighting,
            predicted_sweat_rate,
            cumulative_water_loss: previous.cumulative_water_loss
                + predicted_sweat_rate
                + respiratory_evaporation,
        };
        (
            next,
            StepConvergence {
                clothing_converged: clothing_outcome.converged,
                core_converged: core_outcome.converged,
            },
        )
    }
}

/// Validate the input, run the simulation, classify the outcome.
///
/// Convenience entry point equivalent to
/// `HeatStrainSimulator::new(input)?.run()`.
pub fn predicted_heat_strain(input: &SimulationInput) -> ValidationResult<PhsResult> {
    Ok(HeatStrainSimulator::new(input.clone())?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{
        ActivityParameters, ClothingParameters, EnvironmentalInputs, SubjectParameters,
    };

    fn input(air_temp: f64, met: f64, duration: u32) -> SimulationInput {
        SimulationInput {
            subject: SubjectParameters::standard(),
            environment: EnvironmentalInputs {
                air_temperature: air_temp,
                mean_radiant_temperature: air_temp,
                dew_point: None,
                wind_speed: 0.3,
                solar_radiation: None,
                vapour_pressure_hpa: 20.0,
            },
            clothing: ClothingParameters::new(0.5),
            activity: ActivityParameters::new(met, duration),
        }
    }

    #[test]
    fn invalid_input_never_reaches_the_loop() {
        let mut bad = input(30.0, 150.0, 60);
        bad.subject.acclimatization = -1.0;
        assert!(HeatStrainSimulator::new(bad).is_err());
    }

    #[test]
    fn single_step_moves_state_off_baseline() {
        let simulator = HeatStrainSimulator::new(input(35.0, 200.0, 60)).unwrap();
        let (state, convergence) = simulator.step(&BodyState::baseline());
        assert!(convergence.clothing_converged);
        assert!(convergence.core_converged);
        assert_ne!(state.skin_temperature, 34.1);
        assert!(state.cumulative_water_loss > 0.0);
        assert!((0.1..=0.3).contains(&state.skin_core_weighting));
    }

    #[test]
    fn acclimatized_run_is_never_worse() {
        let hot = input(42.0, 250.0, 240);
        let mut unacclimatized = hot.clone();
        unacclimatized.subject.acclimatization = 0.0;

        let acclimatized_result = predicted_heat_strain(&hot).unwrap();
        let unacclimatized_result = predicted_heat_strain(&unacclimatized).unwrap();
        assert!(acclimatized_result.effect <= unacclimatized_result.effect);
    }

    #[test]
    fn no_drinking_couples_the_dehydration_limits() {
        let mut thirsty = input(44.0, 300.0, 300);
        thirsty.activity.drinking_allowed = false;
        let result = predicted_heat_strain(&thirsty).unwrap();
        assert_eq!(result.d_lim_loss_50, result.d_lim_loss_95);
        assert!(result.d_lim_loss_95 <= 300.0);
    }

    #[test]
    fn limiting_times_default_to_duration() {
        let result = predicted_heat_strain(&input(18.0, 100.0, 120)).unwrap();
        assert_eq!(result.d_lim_tre, 120.0);
        assert_eq!(result.d_lim_loss_50, 120.0);
        assert_eq!(result.d_lim_loss_95, 120.0);
    }
}
