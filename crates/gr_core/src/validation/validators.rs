//! Per-kind record validators.
//!
//! Each validator is a total function over an untyped JSON record: it runs
//! every applicable rule (no short-circuit on first failure) and returns a
//! fresh [`ValidationResult`] so a client can display every problem in one
//! pass. The only fatal path is a malformed *call* - a non-object where an
//! object record is unconditionally required - which fails fast through
//! [`CoreError`] instead of degrading silently.

use serde_json::{Map, Value};

use super::types::{RecordKind, ValidationResult, VALID_COMPOUNDS, VALID_CONDITIONS};
use crate::error::{CoreError, Result};

/// Validate a record of the given kind.
///
/// Object-shaped kinds (driver twin, race twin, pit decision, weather) fail
/// fast with [`CoreError::InvalidParameter`] when the record is not a JSON
/// object. Lap data accepts any value and reports a non-array as a structured
/// error, since a raw lap array arrives straight from CSV ingestion and a
/// wrong shape there is a data problem, not a programming error.
pub fn validate(kind: RecordKind, record: &Value) -> Result<ValidationResult> {
    log::debug!("validating {} record", kind);
    match kind {
        RecordKind::DriverTwin => Ok(validate_driver_twin(require_object(record, kind)?)),
        RecordKind::RaceTwin => Ok(validate_race_twin(require_object(record, kind)?)),
        RecordKind::PitDecision => Ok(validate_pit_decision(require_object(record, kind)?)),
        RecordKind::Weather => Ok(validate_weather(require_object(record, kind)?)),
        RecordKind::LapData => Ok(validate_lap_data(record)),
    }
}

fn require_object(record: &Value, kind: RecordKind) -> Result<&Map<String, Value>> {
    record
        .as_object()
        .ok_or_else(|| CoreError::InvalidParameter(format!("{} record must be a JSON object", kind)))
}

/// Permissive numeric parse: accepts JSON numbers and numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Permissive integer parse: accepts JSON integers, floats (truncated), and
/// strings holding an integer. A string holding a fraction ("10.5") fails -
/// that distinction is what separates "must be an integer" from range errors.
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Required-field check matching the permissive ingestion contract:
/// missing, null, and empty string all count as absent.
fn is_absent(record: &Map<String, Value>, field: &str) -> bool {
    match record.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Validate a driver twin request: `driver_id` plus per-lap times, with
/// optional sector times, tire compound, and current lap.
pub fn validate_driver_twin(record: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if is_absent(record, "driver_id") {
        result.error("driver_id is required");
    }

    match record.get("lap_times").and_then(Value::as_array) {
        None => result.error("lap_times must be a non-empty list"),
        Some(laps) if laps.is_empty() => result.error("lap_times cannot be empty"),
        Some(laps) => {
            for (i, lap_time) in laps.iter().enumerate() {
                match coerce_f64(lap_time) {
                    None => result.error(format!("lap_times[{}] must be a number", i)),
                    Some(t) => {
                        if t <= 0.0 {
                            result.error(format!("lap_times[{}] must be positive", i));
                        }
                        // Plausibility ceiling, separate from the sign check.
                        if t > 300.0 {
                            result.error(format!(
                                "lap_times[{}] is unreasonably high: {}s",
                                i, t
                            ));
                        }
                    }
                }
            }
            if laps.len() < 3 {
                result.warning(
                    "Less than 3 lap times provided - analysis may be less accurate",
                );
            }
        }
    }

    if let Some(sectors) = record.get("sector_times").filter(|v| !v.is_null()) {
        match sectors.as_array() {
            None => result.error("sector_times must be a list"),
            Some(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    match row.as_object() {
                        None => result.error(format!("sector_times[{}] must be an object", i)),
                        Some(obj) => {
                            for sector in ["S1", "S2", "S3"] {
                                if let Some(value) = obj.get(sector) {
                                    match coerce_f64(value) {
                                        None => result.error(format!(
                                            "sector_times[{}].{} must be a number",
                                            i, sector
                                        )),
                                        Some(t) if t <= 0.0 => result.error(format!(
                                            "sector_times[{}].{} must be positive",
                                            i, sector
                                        )),
                                        Some(_) => {}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    if let Some(compound) = record.get("tire_compound").filter(|v| !v.is_null()) {
        check_tire_compound(compound, &mut result);
    }

    if let Some(lap) = record.get("current_lap").filter(|v| !v.is_null()) {
        match coerce_i64(lap) {
            None => result.error("current_lap must be an integer"),
            Some(l) if l < 0 => result.error("current_lap must be non-negative"),
            Some(_) => {}
        }
    }

    result
}

/// Validate a race twin request: `race_id`, a driver grid, and lap counts.
pub fn validate_race_twin(record: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if is_absent(record, "race_id") {
        result.error("race_id is required");
    }

    match record.get("drivers").and_then(Value::as_array) {
        None => result.error("drivers must be a non-empty list"),
        Some(drivers) if drivers.is_empty() => result.error("drivers cannot be empty"),
        Some(drivers) => {
            for (i, driver) in drivers.iter().enumerate() {
                match driver.as_object() {
                    None => result.error(format!("drivers[{}] must be an object", i)),
                    Some(obj) => {
                        if is_absent(obj, "id") {
                            result.error(format!("drivers[{}].id is required", i));
                        }
                        if let Some(pos) = obj.get("position").filter(|v| !v.is_null()) {
                            match coerce_i64(pos) {
                                None => result
                                    .error(format!("drivers[{}].position must be an integer", i)),
                                Some(p) if p < 1 => {
                                    result.error(format!("drivers[{}].position must be >= 1", i))
                                }
                                Some(_) => {}
                            }
                        }
                    }
                }
            }
            if drivers.len() < 2 {
                result.warning(
                    "Less than 2 drivers provided - race simulation may be less meaningful",
                );
            }
        }
    }

    let total_laps = match record.get("total_laps").filter(|v| !v.is_null()) {
        None => {
            result.error("total_laps is required");
            None
        }
        Some(value) => match coerce_i64(value) {
            None => {
                result.error("total_laps must be an integer");
                None
            }
            Some(laps) => {
                if laps < 1 {
                    result.error("total_laps must be >= 1");
                }
                if laps > 200 {
                    result.error("total_laps is unreasonably high");
                }
                Some(laps)
            }
        },
    };

    if let Some(lap) = record.get("current_lap").filter(|v| !v.is_null()) {
        match coerce_i64(lap) {
            None => result.error("current_lap must be an integer"),
            Some(l) => {
                if l < 1 {
                    result.error("current_lap must be >= 1");
                }
                if let Some(total) = total_laps {
                    if l > total {
                        result.error("current_lap cannot exceed total_laps");
                    }
                }
            }
        }
    }

    result
}

/// Validate a pit decision request. Every required field produces its own
/// "is required" error, so a near-empty record reports the full shape at once.
pub fn validate_pit_decision(record: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::new();

    const REQUIRED: [&str; 6] =
        ["race_id", "driver_id", "current_lap", "tire_age", "tire_compound", "position"];
    for field in REQUIRED {
        if !record.contains_key(field) {
            result.error(format!("{} is required", field));
        }
    }

    if let Some(age) = record.get("tire_age") {
        match coerce_i64(age) {
            None => result.error("tire_age must be an integer"),
            Some(a) => {
                if a < 0 {
                    result.error("tire_age must be non-negative");
                }
                if a > 100 {
                    result.error("tire_age is unreasonably high");
                }
            }
        }
    }

    if let Some(pos) = record.get("position") {
        match coerce_i64(pos) {
            None => result.error("position must be an integer"),
            Some(p) if p < 1 => result.error("position must be >= 1"),
            Some(_) => {}
        }
    }

    if let Some(compound) = record.get("tire_compound") {
        check_tire_compound(compound, &mut result);
    }

    if let Some(rate) = record.get("degradation_rate") {
        match coerce_f64(rate) {
            None => result.error("degradation_rate must be a number"),
            Some(r) if !(0.0..=0.1).contains(&r) => {
                result.error("degradation_rate must be between 0 and 0.1")
            }
            Some(_) => {}
        }
    }

    if let Some(density) = record.get("traffic_density") {
        match coerce_f64(density) {
            None => result.error("traffic_density must be a number"),
            Some(d) if !(0.0..=1.0).contains(&d) => {
                result.error("traffic_density must be between 0 and 1")
            }
            Some(_) => {}
        }
    }

    result
}

/// Validate a raw lap data array. Each row is validated independently; a
/// non-object row is itself the error and skips further checks for that row.
pub fn validate_lap_data(lap_data: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    let rows = match lap_data.as_array() {
        None => {
            result.error("lap_data must be a non-empty list");
            return result;
        }
        Some(rows) if rows.is_empty() => {
            result.error("lap_data must be a non-empty list");
            return result;
        }
        Some(rows) => rows,
    };

    for (i, row) in rows.iter().enumerate() {
        let obj = match row.as_object() {
            None => {
                result.error(format!("lap_data[{}] must be an object", i));
                continue;
            }
            Some(obj) => obj,
        };

        if let Some(lap_time) = obj.get("lap_time") {
            match coerce_f64(lap_time) {
                None => result.error(format!("lap_data[{}].lap_time must be a number", i)),
                Some(t) if t <= 0.0 => {
                    result.error(format!("lap_data[{}].lap_time must be positive", i))
                }
                Some(_) => {}
            }
        }

        if let Some(lap) = obj.get("lap") {
            match coerce_i64(lap) {
                None => result.error(format!("lap_data[{}].lap must be an integer", i)),
                Some(l) if l < 1 => result.error(format!("lap_data[{}].lap must be >= 1", i)),
                Some(_) => {}
            }
        }
    }

    result
}

/// Validate a weather record: optional track temperature and condition.
pub fn validate_weather(record: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(temp) = record.get("track_temp") {
        match coerce_f64(temp) {
            None => result.error("track_temp must be a number"),
            Some(t) if !(-50.0..=60.0).contains(&t) => {
                result.error("track_temp must be between -50 and 60°C")
            }
            Some(_) => {}
        }
    }

    if let Some(condition) = record.get("condition") {
        let known = condition
            .as_str()
            .map(|c| VALID_CONDITIONS.contains(&c.to_lowercase().as_str()))
            .unwrap_or(false);
        if !known {
            result.error(format!("condition must be one of: {}", VALID_CONDITIONS.join(", ")));
        }
    }

    result
}

fn check_tire_compound(compound: &Value, result: &mut ValidationResult) {
    let known = compound.as_str().map(|c| VALID_COMPOUNDS.contains(&c)).unwrap_or(false);
    if !known {
        result.error(format!("tire_compound must be one of: {}", VALID_COMPOUNDS.join(", ")));
    }
}
