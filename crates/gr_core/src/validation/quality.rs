//! Confidence scoring for analysis inputs.
//!
//! The scorer is deliberately independent of validation: it accepts any
//! record (validated or not) and only looks for missing signals that reduce
//! analytical confidence. Penalties are fixed constants, purely additive,
//! and the final score is clamped to zero - there are no positive bonuses,
//! so no upper clamp is needed.

use serde_json::Value;

use serde::{Deserialize, Serialize};

/// Record kinds the scorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityKind {
    DriverTwin,
    RaceTwin,
}

/// Per-rule penalties. Each rule also appends exactly one warning and one
/// suggestion string.
const PENALTY_FEW_LAP_TIMES: f64 = 0.2;
const PENALTY_NO_SECTOR_TIMES: f64 = 0.1;
const PENALTY_FEW_DRIVERS: f64 = 0.2;

const MIN_LAP_TIMES_FOR_FULL_SCORE: usize = 5;
const MIN_DRIVERS_FOR_FULL_SCORE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub quality_score: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Score data completeness for the given record kind.
///
/// Stateless and idempotent: two calls with the same input yield bit-identical
/// reports.
pub fn score_quality(kind: QualityKind, record: &Value) -> QualityReport {
    let mut report = QualityReport {
        quality_score: 1.0,
        warnings: Vec::new(),
        suggestions: Vec::new(),
    };

    match kind {
        QualityKind::DriverTwin => {
            let lap_times = record
                .get("lap_times")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            if lap_times < MIN_LAP_TIMES_FOR_FULL_SCORE {
                report.quality_score -= PENALTY_FEW_LAP_TIMES;
                report.warnings.push("Less than 5 lap times - reduced accuracy".to_string());
                report
                    .suggestions
                    .push("Provide more lap times for better analysis".to_string());
            }

            let has_sectors = record
                .get("sector_times")
                .map(|v| !v.is_null())
                .unwrap_or(false);
            if !has_sectors {
                report.quality_score -= PENALTY_NO_SECTOR_TIMES;
                report.warnings.push("No sector times provided".to_string());
                report
                    .suggestions
                    .push("Include sector times for detailed analysis".to_string());
            }
        }
        QualityKind::RaceTwin => {
            let drivers = record
                .get("drivers")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            if drivers < MIN_DRIVERS_FOR_FULL_SCORE {
                report.quality_score -= PENALTY_FEW_DRIVERS;
                report.warnings.push("Less than 3 drivers - limited race simulation".to_string());
                report
                    .suggestions
                    .push("Include more drivers for realistic simulation".to_string());
            }
        }
    }

    report.quality_score = report.quality_score.max(0.0);
    report
}
