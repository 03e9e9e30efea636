//! JSON entry points over the core.
//!
//! Thin serde-driven wrappers for hosts that speak JSON strings rather than
//! Rust types. These functions are the only fatal error path: a malformed
//! call (unparseable JSON, unknown record kind, unknown track) fails with a
//! [`CoreError`], while data problems inside a well-formed call come back as
//! structured results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::replay::{assemble, derive_statistics, ClassifiedLap, LapRow, RaceReplay, RaceStatistics, ReplayConfig};
use crate::track::{interpolate_track_position, layout, TrackMap};
use crate::validation::{score_quality, validate, QualityKind, RecordKind};

/// Validate one record and return the structured result as JSON.
pub fn validate_record_json(kind: &str, record_json: &str) -> Result<String> {
    let kind: RecordKind = kind.parse()?;
    let record: Value = serde_json::from_str(record_json)?;
    let result = validate(kind, &record)?;
    Ok(serde_json::to_string(&result)?)
}

/// Score data completeness for one record and return the report as JSON.
pub fn score_quality_json(kind: &str, record_json: &str) -> Result<String> {
    let kind = match kind {
        "driver_twin" => QualityKind::DriverTwin,
        "race_twin" => QualityKind::RaceTwin,
        other => return Err(CoreError::UnknownRecordKind(other.to_string())),
    };
    let record: Value = serde_json::from_str(record_json)?;
    let report = score_quality(kind, &record);
    Ok(serde_json::to_string(&report)?)
}

/// Track reference: a built-in circuit id or inline coordinates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TrackRef {
    Id(String),
    Map(TrackMap),
}

impl TrackRef {
    fn resolve(self) -> Result<TrackMap> {
        match self {
            TrackRef::Id(id) => layout(&id)
                .map(|l| l.to_map())
                .ok_or_else(|| CoreError::InvalidParameter(format!("unknown track: {}", id))),
            TrackRef::Map(map) => Ok(map),
        }
    }
}

/// Map lap progress to a track position and return the point as JSON.
///
/// `track_json` is either a quoted built-in track id (`"cota"`) or an inline
/// map object with a `coordinates` array.
pub fn interpolate_position_json(track_json: &str, progress: f64) -> Result<String> {
    let track: TrackRef = serde_json::from_str(track_json)?;
    let map = track.resolve()?;
    let point = interpolate_track_position(&map, progress);
    Ok(serde_json::to_string(&point)?)
}

/// Assembled replay plus everything derived from it, as one response.
#[derive(Debug, Serialize)]
pub struct ReplayResponse {
    pub replay: RaceReplay,
    pub laps: Vec<ClassifiedLap>,
    pub statistics: RaceStatistics,
}

/// Build a replay from raw timing rows and return the full response as JSON.
///
/// `config_json` overrides the default detection policy when present.
pub fn build_replay_json(rows_json: &str, config_json: Option<&str>) -> Result<String> {
    let rows: Vec<LapRow> = serde_json::from_str(rows_json)?;
    let config: ReplayConfig = match config_json {
        Some(raw) => serde_json::from_str(raw)?,
        None => ReplayConfig::default(),
    };

    let race = assemble(&rows, None, &config)?;
    let statistics = derive_statistics(&race.replay, &race.laps);
    Ok(serde_json::to_string(&ReplayResponse {
        replay: race.replay,
        laps: race.laps,
        statistics,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_record_json_roundtrip() {
        let record = json!({ "driver_id": "d1", "lap_times": [95.0, 94.0] }).to_string();
        let out = validate_record_json("driver_twin", &record).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["is_valid"], json!(true));
        assert!(!parsed["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        let err = validate_record_json("pit_wall", "{}").unwrap_err();
        assert!(matches!(err, CoreError::UnknownRecordKind(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(validate_record_json("driver_twin", "{not json").is_err());
    }

    #[test]
    fn test_score_quality_json() {
        let record = json!({ "race_id": "r1", "drivers": [{"id": "d1"}] }).to_string();
        let out = score_quality_json("race_twin", &record).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert!((parsed["quality_score"].as_f64().unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_by_track_id() {
        let out = interpolate_position_json("\"cota\"", 0.0).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert!((parsed["x"].as_f64().unwrap() - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_unknown_track() {
        let err = interpolate_position_json("\"monza\"", 0.5).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)));
    }

    #[test]
    fn test_interpolate_inline_coordinates() {
        let track = json!({
            "coordinates": [
                {"x": 0.0, "y": 0.0},
                {"x": 1.0, "y": 0.0},
                {"x": 1.0, "y": 1.0},
                {"x": 0.0, "y": 1.0},
            ]
        })
        .to_string();
        let out = interpolate_position_json(&track, 0.25).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert!((parsed["x"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert!((parsed["y"].as_f64().unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_replay_json_end_to_end() {
        let rows = json!([
            { "lap": 1, "driver": "d1", "timestamp": "2024-04-14T13:00:00Z" },
            { "lap": 2, "driver": "d1", "timestamp": "2024-04-14T13:01:35Z" },
            { "lap": 1, "driver": "d2", "timestamp": "2024-04-14T13:00:01Z" },
            { "lap": 2, "driver": "d2", "timestamp": "2024-04-14T13:01:40Z" },
        ])
        .to_string();
        let out = build_replay_json(&rows, None).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["replay"]["laps"], json!(2));
        assert_eq!(parsed["statistics"]["winner"], json!("d1"));
        assert_eq!(parsed["laps"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_build_replay_json_empty_rows() {
        let err = build_replay_json("[]", None).unwrap_err();
        assert!(matches!(err, CoreError::EmptyInput(_)));
    }

    #[test]
    fn test_build_replay_json_custom_config() {
        let rows = json!([
            { "lap": 1, "driver": "d1", "timestamp": "2024-04-14T13:00:00Z" },
            { "lap": 2, "driver": "d1", "timestamp": "2024-04-14T13:01:40Z" },
        ])
        .to_string();
        let config = json!({ "fallback_lap_secs": 90.0 }).to_string();
        let out = build_replay_json(&rows, Some(&config)).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        let first_lap = &parsed["laps"][0];
        assert!((first_lap["time_secs"].as_f64().unwrap() - 90.0).abs() < 1e-9);
    }
}
