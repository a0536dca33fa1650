//! Integration tests for the PHS simulation engine
//!
//! Exercises whole work sequences end to end: benign and extreme
//! climates, acclimatization, drinking restrictions, determinism, and the
//! validation surface.

use heatstrain_core::{
    predicted_heat_strain, ActivityParameters, BodyPosition, ClothingParameters,
    EnvironmentalInputs, HeatStrainEffect, HeatStrainSimulator, SimulationInput,
    SubjectParameters, ValidationError,
};

fn scenario(
    air_temp: f64,
    wind: f64,
    vapour_pressure_hpa: f64,
    metabolic_rate: f64,
    insulation_clo: f64,
    duration_min: u32,
) -> SimulationInput {
    SimulationInput {
        subject: SubjectParameters::standard(),
        environment: EnvironmentalInputs {
            air_temperature: air_temp,
            mean_radiant_temperature: air_temp,
            dew_point: None,
            wind_speed: wind,
            solar_radiation: None,
            vapour_pressure_hpa,
        },
        clothing: ClothingParameters::new(insulation_clo),
        activity: ActivityParameters::new(metabolic_rate, duration_min),
    }
}

#[test]
fn mild_shift_is_comfortable() {
    // Office-adjacent conditions: light work, 20 °C, full 8-hour shift
    let input = scenario(20.0, 0.3, 12.0, 100.0, 0.5, 480);
    let result = predicted_heat_strain(&input).unwrap();

    assert_eq!(result.effect, HeatStrainEffect::None);
    assert!(result.comfortable);
    assert_eq!(result.d_lim_tre, 480.0);
    assert_eq!(result.d_lim_loss_95, 480.0);
    assert!(
        result.rectal_temperature > 36.5 && result.rectal_temperature < 37.5,
        "rectal temperature {} outside the benign band",
        result.rectal_temperature
    );
    assert!(result.diagnostics.all_converged());
}

#[test]
fn extreme_heat_is_classified_extreme() {
    // Furnace-adjacent conditions: heavy work at 45 °C in heavy clothing
    let input = scenario(45.0, 0.2, 35.0, 300.0, 1.0, 240);
    let result = predicted_heat_strain(&input).unwrap();

    assert_eq!(result.effect, HeatStrainEffect::Extreme);
    assert!(!result.comfortable);
    assert!(
        result.d_lim_tre <= 30.0,
        "rectal limit {} should fall within the first half hour",
        result.d_lim_tre
    );
    assert!(result.rectal_temperature >= 38.0);
}

#[test]
fn effect_level_is_monotone_in_air_temperature() {
    let mut previous_level = 0;
    for air_temp in [20.0, 26.0, 32.0, 38.0, 44.0, 50.0] {
        let input = scenario(air_temp, 0.3, 20.0, 150.0, 0.5, 480);
        let result = predicted_heat_strain(&input).unwrap();
        let level = result.effect.level();
        assert!(
            level >= previous_level,
            "effect level dropped from {} to {} at {} degrees",
            previous_level,
            level,
            air_temp
        );
        previous_level = level;
    }
}

#[test]
fn acclimatization_never_raises_the_effect_level() {
    let stressful = scenario(42.0, 0.3, 30.0, 250.0, 0.8, 240);
    let mut unacclimatized = stressful.clone();
    unacclimatized.subject.acclimatization = 0.0;

    let acclimatized_result = predicted_heat_strain(&stressful).unwrap();
    let unacclimatized_result = predicted_heat_strain(&unacclimatized).unwrap();

    assert!(acclimatized_result.effect.level() <= unacclimatized_result.effect.level());
    // The acclimatized subject's higher sweat ceiling shows up as more
    // accumulated water loss under the same load
    assert!(acclimatized_result.water_loss_g >= unacclimatized_result.water_loss_g);
}

#[test]
fn identical_inputs_give_bit_identical_results() {
    let input = scenario(38.0, 0.5, 25.0, 200.0, 0.6, 300);
    let first = predicted_heat_strain(&input).unwrap();
    let second = predicted_heat_strain(&input).unwrap();

    assert_eq!(
        first.rectal_temperature.to_bits(),
        second.rectal_temperature.to_bits()
    );
    assert_eq!(first.water_loss_g.to_bits(), second.water_loss_g.to_bits());
    assert_eq!(first, second);
}

#[test]
fn drinking_restriction_tightens_the_dehydration_limits() {
    let base = scenario(44.0, 0.3, 35.0, 300.0, 0.8, 480);
    let mut restricted = base.clone();
    restricted.activity.drinking_allowed = false;

    let free = predicted_heat_strain(&base).unwrap();
    let no_drink = predicted_heat_strain(&restricted).unwrap();

    assert_eq!(no_drink.d_lim_loss_50, no_drink.d_lim_loss_95);
    assert!(no_drink.d_lim_loss_95 <= free.d_lim_loss_95);
    assert!(no_drink.effect >= free.effect);
}

#[test]
fn posture_changes_the_radiative_exchange() {
    let mut sitting = scenario(45.0, 0.2, 35.0, 300.0, 1.0, 240);
    sitting.subject.body_position = BodyPosition::Sitting;
    let mut standing = sitting.clone();
    standing.subject.body_position = BodyPosition::Standing;

    let sitting_result = predicted_heat_strain(&sitting).unwrap();
    let standing_result = predicted_heat_strain(&standing).unwrap();
    // Different radiating areas must produce different trajectories
    assert_ne!(
        sitting_result.rectal_temperature.to_bits(),
        standing_result.rectal_temperature.to_bits()
    );
}

#[test]
fn walking_parameters_feed_the_convective_exchange() {
    let base = scenario(40.0, 1.0, 25.0, 200.0, 0.5, 240);
    let mut walking = base.clone();
    walking.activity.walking_speed = Some(1.2);
    walking.activity.walking_angle_deg = Some(90.0);

    let base_result = predicted_heat_strain(&base).unwrap();
    let walking_result = predicted_heat_strain(&walking).unwrap();
    assert_ne!(
        base_result.rectal_temperature.to_bits(),
        walking_result.rectal_temperature.to_bits()
    );
}

#[test]
fn validation_failures_surface_before_simulation() {
    let mut input = scenario(30.0, 0.3, 20.0, 150.0, 0.5, 240);
    input.subject.acclimatization = 150.0;
    assert!(matches!(
        predicted_heat_strain(&input),
        Err(ValidationError::Acclimatization { .. })
    ));

    let mut input = scenario(30.0, 0.3, 20.0, 150.0, 0.5, 240);
    input.clothing.insulation_clo = -0.1;
    assert!(matches!(
        predicted_heat_strain(&input),
        Err(ValidationError::Insulation { .. })
    ));

    let mut input = scenario(30.0, 0.3, 20.0, 150.0, 0.5, 240);
    input.environment.vapour_pressure_hpa = -5.0;
    assert!(matches!(
        predicted_heat_strain(&input),
        Err(ValidationError::VapourPressure { .. })
    ));
}

#[test]
fn simulator_exposes_the_du_bois_area() {
    let simulator =
        HeatStrainSimulator::new(scenario(30.0, 0.3, 20.0, 150.0, 0.5, 60)).unwrap();
    // 1.8 m / 75 kg standard subject
    assert!((simulator.body_surface_area() - 1.936).abs() < 0.01);
}

#[test]
fn summary_triple_matches_the_full_result() {
    let result = predicted_heat_strain(&scenario(45.0, 0.2, 35.0, 300.0, 1.0, 240)).unwrap();
    let (rectal, level, comfortable) = result.summary();
    assert_eq!(rectal, result.rectal_temperature);
    assert_eq!(level, 4);
    assert!(!comfortable);
}
