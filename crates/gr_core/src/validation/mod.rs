//! # Validation Module
//!
//! Structural and physical-plausibility checks for raw race data inputs.
//!
//! - `types` - validation result and record-kind types
//! - `validators` - per-kind rule checkers (driver twin, race twin, pit
//!   decision, lap data, weather)
//! - `quality` - confidence scoring over the same inputs
//!
//! All validators are pure functions: each call builds its own accumulator
//! and returns a fresh [`ValidationResult`], so they are safe under
//! concurrent request handling without locking.

pub mod quality;
pub mod types;
pub mod validators;

pub use quality::{score_quality, QualityKind, QualityReport};
pub use types::{RecordKind, ValidationResult, VALID_COMPOUNDS, VALID_CONDITIONS};
pub use validators::{
    validate, validate_driver_twin, validate_lap_data, validate_pit_decision,
    validate_race_twin, validate_weather,
};
