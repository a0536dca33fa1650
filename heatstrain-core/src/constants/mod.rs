//! Physical and Model Constants for the PHS Engine
//!
//! Constants are split by concern:
//!
//! - [`body`] - anthropometric and physiological baselines of the simulated
//!   subject (Du Bois coefficients, initial temperatures, radiating areas)
//! - [`model`] - tuning of the ISO 7933 calculation itself (smoothing time
//!   constants, solver caps, limit thresholds, empirical caps)
//!
//! Every value is a direct transcription from ISO 7933:2004 as implemented
//! in Dr. Jacques Malchaire's reference QuickBasic program. None of these
//! are meant to be tuned at runtime; the tunable quantities (clothing
//! permeability, reflective coverage, walking parameters) live on the input
//! records with these reference values as defaults.

pub mod body;
pub mod model;
