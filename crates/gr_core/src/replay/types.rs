use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::track::TrackMap;

/// External caution state attached to a raw lap row.
///
/// Caution laps are slow for reasons outside the driver's control, so they
/// are classified separately and excluded from slow-lap anomaly counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CautionFlag {
    SafetyCar,
    VirtualSafetyCar,
    Yellow,
}

/// One raw timing row: a driver crossing the line to complete a lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRow {
    pub lap: u32,
    pub driver: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<CautionFlag>,
}

/// Detection policy for replay assembly.
///
/// Thresholds are configuration rather than constants: different series have
/// very different pit-loss and caution profiles, so callers tune these per
/// championship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// A lap slower than `pit_multiplier x` the driver's median is a pit lap.
    pub pit_multiplier: f64,
    /// A lap slower than `slow_multiplier x` the driver's median is a slow lap.
    pub slow_multiplier: f64,
    /// A lap within `hot_multiplier x` the driver's best is a hot lap.
    pub hot_multiplier: f64,
    /// A lap slower than `cool_multiplier x` the driver's best is a cool lap.
    pub cool_multiplier: f64,
    /// Plausible lap-time window; timestamp deltas outside it are treated as
    /// timing noise and replaced by the fallback.
    pub min_lap_secs: f64,
    pub max_lap_secs: f64,
    /// Stand-in lap time for the opening lap and implausible deltas.
    pub fallback_lap_secs: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            pit_multiplier: 1.5,
            slow_multiplier: 1.2,
            hot_multiplier: 1.02,
            cool_multiplier: 1.10,
            min_lap_secs: 60.0,
            max_lap_secs: 300.0,
            fallback_lap_secs: 100.0,
        }
    }
}

/// One driver's standing within a lap snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverPosition {
    pub driver: String,
    pub position: u32,
    /// Seconds behind the leader's cumulative time; 0 for the leader.
    pub gap_to_leader: f64,
    pub laps_completed: u32,
}

/// The complete race state at the end of one lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapSnapshot {
    pub lap: u32,
    pub positions: Vec<DriverPosition>,
    pub events: Vec<String>,
}

/// An assembled, immutable race replay.
///
/// Built once from archived timing rows and consumed frame-by-frame by a
/// player that owns its own playback state - playback never mutates the
/// replay itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceReplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<TrackMap>,
    pub laps: u32,
    pub drivers: Vec<String>,
    pub replay: Vec<LapSnapshot>,
}

impl RaceReplay {
    /// Snapshot for a given lap number, if the race reached it.
    pub fn snapshot(&self, lap: u32) -> Option<&LapSnapshot> {
        self.replay.iter().find(|s| s.lap == lap)
    }
}
