//! ISO 7933 Calculation Constants
//!
//! Time constants, empirical caps, and solver tuning of the minute-stepped
//! heat-balance model. Values are transcribed from the reference program;
//! changing any of them changes the predicted limiting times.

// ===== EXPONENTIAL SMOOTHING TIME CONSTANTS =====

/// Time constant of the core equilibrium temperature response (minutes).
///
/// The equilibrium core temperature associated with the metabolic rate is
/// approached exponentially with a 10-minute time constant.
pub const CORE_EQUILIBRIUM_TIME_CONSTANT_MIN: f64 = 10.0;

/// Time constant of the skin temperature response (minutes).
pub const SKIN_TIME_CONSTANT_MIN: f64 = 3.0;

/// Time constant of the sweat-rate response (minutes).
pub const SWEAT_TIME_CONSTANT_MIN: f64 = 10.0;

// ===== SWEATING =====

/// Lower clamp of the maximum achievable sweat rate (W/m² equivalent).
///
/// `SWmax = (Met - 32) · Adu`, clamped to `[250, 400]` before the
/// acclimatization bonus applies.
pub const SWEAT_RATE_FLOOR: f64 = 250.0;

/// Upper clamp of the maximum achievable sweat rate (W/m² equivalent).
pub const SWEAT_RATE_CEILING: f64 = 400.0;

/// Sweat-rate multiplier for acclimatized subjects (dimensionless).
///
/// Applied after the `[250, 400]` clamp when at least half the population
/// is acclimatized.
pub const ACCLIMATIZED_SWEAT_BONUS: f64 = 1.25;

/// Acclimatization fraction at and above which a population counts as
/// acclimatized (percent).
pub const ACCLIMATIZATION_THRESHOLD: f64 = 50.0;

/// Maximum skin wettedness of an unacclimatized subject (dimensionless).
pub const MAX_WETTEDNESS_UNACCLIMATIZED: f64 = 0.85;

/// Maximum skin wettedness of an acclimatized subject (dimensionless).
pub const MAX_WETTEDNESS_ACCLIMATIZED: f64 = 1.0;

/// Cap on the required wettedness ratio (dimensionless).
///
/// Beyond this the required sweat rate saturates at its maximum.
pub const REQUIRED_WETTEDNESS_CAP: f64 = 1.7;

/// Conversion from sweat energy to water mass (g·m²/(W·h) scaled).
///
/// `SWtotg = SWtot · 2.67 · Adu / 1.8 / 60` converts the accumulated
/// per-minute evaporative power into grams of water for the subject.
pub const SWEAT_ENERGY_TO_GRAMS: f64 = 2.67;

// ===== CLOTHING AND AIR LAYER =====

/// Thermal resistance of one clo unit (m²·°C/W).
pub const CLO_TO_INSULATION: f64 = 0.155;

/// Static boundary-air-layer insulation in quiet air (m²·°C/W).
pub const STATIC_AIR_LAYER_INSULATION: f64 = 0.111;

/// Slope of the clothing area factor per clo: `fcl = 1 + 0.3 · Icl`.
pub const CLOTHING_AREA_FACTOR_SLOPE: f64 = 0.3;

/// Lewis-relation factor converting dynamic insulation into evaporative
/// resistance: `Rtdyn = Itotdyn / imdyn / 16.7` (°C/kPa).
pub const EVAPORATIVE_RESISTANCE_FACTOR: f64 = 16.7;

/// Cap on the dynamic moisture permeability index (dimensionless).
pub const DYNAMIC_PERMEABILITY_CAP: f64 = 0.9;

/// Air velocity cap for the clothing insulation correction (m/s).
pub const VELOCITY_CORRECTION_CAP: f64 = 3.0;

/// Walking speed cap for the insulation corrections (m/s).
pub const WALKING_SPEED_CORRECTION_CAP: f64 = 1.5;

/// Walking speed derived per W/m² of metabolic rate above resting when no
/// speed is supplied: `Walksp = 0.0052 · (Met - 58)` (m/s per W/m²).
pub const METABOLIC_WALKING_SPEED_SLOPE: f64 = 0.0052;

/// Cap on the metabolically derived walking speed (m/s).
pub const METABOLIC_WALKING_SPEED_CAP: f64 = 0.7;

// ===== RADIATION =====

/// Stefan-Boltzmann constant (W/(m²·K⁴)).
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

// ===== FIXED-POINT SOLVERS =====

/// Iteration cap of the clothing surface temperature solve.
///
/// On exhaustion the last averaged estimate is used; see
/// [`SolverDiagnostics`](crate::results::SolverDiagnostics).
pub const CLOTHING_SOLVER_MAX_ITERATIONS: u32 = 100;

/// Iteration cap of the core temperature solve.
pub const CORE_SOLVER_MAX_ITERATIONS: u32 = 50;

/// Convergence tolerance of both fixed-point solvers (°C).
pub const SOLVER_TOLERANCE_C: f64 = 0.001;

// ===== CLASSIFICATION =====

/// Limiting time at or below which exposure is classified extreme
/// (minutes).
pub const EFFECT_EXTREME_LIMIT_MIN: f64 = 30.0;

/// Limiting time at or below which exposure is classified high (minutes).
pub const EFFECT_HIGH_LIMIT_MIN: f64 = 120.0;

/// Fraction of the work sequence below which a limiting time still counts
/// as a moderate effect rather than a slight one.
///
/// The reference program uses `duration - duration · 0.015`.
pub const NEAR_FULL_SHIFT_FRACTION: f64 = 0.015;

/// Scale applied to the 95th-percentile dehydration limiting time when
/// free drinking is not permitted.
pub const NO_DRINKING_LOSS_SCALE: f64 = 0.6;
