//! Property tests for the PHS engine
//!
//! Random but physically plausible inputs must always validate, never
//! panic, and always produce finite, well-bounded outputs.

use heatstrain_core::{
    predicted_heat_strain, ActivityParameters, BodyPosition, ClothingParameters,
    EnvironmentalInputs, SimulationInput, SubjectParameters,
};
use proptest::prelude::*;

fn body_position() -> impl Strategy<Value = BodyPosition> {
    prop_oneof![
        Just(BodyPosition::Sitting),
        Just(BodyPosition::Standing),
        Just(BodyPosition::Crouching),
    ]
}

prop_compose! {
    fn plausible_input()(
        height_m in 1.4_f64..2.1,
        weight_kg in 45.0_f64..120.0,
        position in body_position(),
        acclimatization in 0.0_f64..=100.0,
        air_temperature in -10.0_f64..50.0,
        radiant_offset in -5.0_f64..15.0,
        wind_speed in 0.0_f64..4.0,
        vapour_pressure_hpa in 0.0_f64..45.0,
        insulation_clo in 0.0_f64..=1.0,
        metabolic_rate in 60.0_f64..450.0,
        duration_min in 30_u32..=240,
        walking_speed in prop::option::of(0.1_f64..2.0),
        walking_angle_deg in prop::option::of(0.0_f64..360.0),
        drinking_allowed in any::<bool>(),
    ) -> SimulationInput {
        SimulationInput {
            subject: SubjectParameters {
                height_m,
                weight_kg,
                body_position: position,
                acclimatization,
                sex: None,
                age: None,
            },
            environment: EnvironmentalInputs {
                air_temperature,
                mean_radiant_temperature: air_temperature + radiant_offset,
                dew_point: None,
                wind_speed,
                solar_radiation: None,
                vapour_pressure_hpa,
            },
            clothing: ClothingParameters::new(insulation_clo),
            activity: ActivityParameters {
                metabolic_rate,
                mechanical_work: 0.0,
                duration_min,
                walking_speed,
                walking_angle_deg,
                drinking_allowed,
            },
        }
    }
}

proptest! {
    #[test]
    fn plausible_inputs_always_validate(input in plausible_input()) {
        prop_assert!(input.validate().is_ok());
    }

    #[test]
    fn outputs_are_finite_and_bounded(input in plausible_input()) {
        let duration = f64::from(input.activity.duration_min);
        let result = predicted_heat_strain(&input).unwrap();

        prop_assert!(result.rectal_temperature.is_finite());
        prop_assert!(result.water_loss_g.is_finite());
        prop_assert!(result.water_loss_g >= 0.0);
        prop_assert!(result.effect.level() <= 4);
        prop_assert!(result.d_lim_tre > 0.0 && result.d_lim_tre <= duration);
        prop_assert!(result.d_lim_loss_50 > 0.0 && result.d_lim_loss_50 <= duration);
        prop_assert!(result.d_lim_loss_95 > 0.0 && result.d_lim_loss_95 <= duration);
    }

    #[test]
    fn runs_are_deterministic(input in plausible_input()) {
        let first = predicted_heat_strain(&input).unwrap();
        let second = predicted_heat_strain(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_drinking_couples_the_loss_limits(input in plausible_input()) {
        let mut restricted = input;
        restricted.activity.drinking_allowed = false;
        let result = predicted_heat_strain(&restricted).unwrap();
        prop_assert_eq!(result.d_lim_loss_50, result.d_lim_loss_95);
    }
}
