//! # gr_core - Race Telemetry Validation and Replay Engine
//!
//! This library turns raw motorsport timing data into validated records,
//! confidence scores, track positions, and fully assembled race replays,
//! with a JSON API for easy integration with dashboards and visualizers.
//!
//! ## Features
//! - Permissive per-kind record validation with structured error reports
//! - Data-completeness scoring independent of validation
//! - Closed-loop track position interpolation over built-in circuit layouts
//! - Replay assembly with lap classification, overtake detection, and
//!   statistics derived fresh on every call

pub mod api;
pub mod error;
pub mod replay;
pub mod track;
pub mod validation;

// Re-export main API functions
pub use api::{
    build_replay_json, interpolate_position_json, score_quality_json, validate_record_json,
    ReplayResponse,
};
pub use error::{CoreError, Result};

// Re-export validation types
pub use validation::{
    score_quality, validate, QualityKind, QualityReport, RecordKind, ValidationResult,
};

// Re-export track geometry
pub use track::{interpolate_track_position, layout, TrackLayout, TrackMap, TrackPoint};

// Re-export replay system
pub use replay::{
    assemble, derive_statistics, AssembledRace, ClassifiedLap, LapRow, RaceReplay,
    RaceStatistics, ReplayConfig, ReplayPlayer,
};

/// Crate version, for hosts that report it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON schema version accepted by the `api` module.
pub const SCHEMA_VERSION: u8 = 1;
