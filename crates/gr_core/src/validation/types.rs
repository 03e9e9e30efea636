use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Tire compounds accepted on driver and pit-decision records.
pub const VALID_COMPOUNDS: [&str; 5] = ["SOFT", "MEDIUM", "HARD", "INTERMEDIATE", "WET"];

/// Weather conditions accepted on weather records (matched case-insensitively).
pub const VALID_CONDITIONS: [&str; 5] = ["dry", "wet", "damp", "rain", "snow"];

/// Record kinds the validator dispatches on.
///
/// Exhaustive matching on this enum is what guarantees every record kind has a
/// dedicated total validator - adding a variant without wiring a validator is
/// a compile error at the dispatch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    DriverTwin,
    RaceTwin,
    PitDecision,
    LapData,
    Weather,
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver_twin" => Ok(RecordKind::DriverTwin),
            "race_twin" => Ok(RecordKind::RaceTwin),
            "pit_decision" => Ok(RecordKind::PitDecision),
            "lap_data" => Ok(RecordKind::LapData),
            "weather" => Ok(RecordKind::Weather),
            other => Err(CoreError::UnknownRecordKind(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            RecordKind::DriverTwin => "driver_twin",
            RecordKind::RaceTwin => "race_twin",
            RecordKind::PitDecision => "pit_decision",
            RecordKind::LapData => "lap_data",
            RecordKind::Weather => "weather",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of validating one record.
///
/// Errors make the record unusable; warnings only signal reduced downstream
/// confidence. Every call constructs a fresh result, so concurrent
/// validations can never interleave their accumulators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        ValidationResult { is_valid: true, errors: Vec::new(), warnings: Vec::new() }
    }

    pub(crate) fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.is_valid = false;
    }

    pub(crate) fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}
