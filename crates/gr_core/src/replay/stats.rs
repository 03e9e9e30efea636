//! Race statistics.
//!
//! Every statistic is recomputed from the replay snapshots and classified
//! laps on each call. Nothing here is cached on the replay, so statistics can
//! never drift out of sync with the data they summarize.

use serde::{Deserialize, Serialize};

use super::assembler::overtakes_between;
use super::classify::{ClassifiedLap, LapKind};
use super::types::RaceReplay;

/// The single fastest lap of the race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastestLap {
    pub driver: String,
    pub lap: u32,
    pub time_secs: f64,
}

/// Summary statistics for an assembled race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStatistics {
    pub total_overtakes: u32,
    pub total_pit_stops: u32,
    /// Lap numbers run under caution, ascending.
    pub safety_car_laps: Vec<u32>,
    pub fastest_lap: Option<FastestLap>,
    /// Mean of racing laps only; pit and caution laps are excluded.
    pub average_lap_time: Option<f64>,
    pub winner: Option<String>,
    pub podium: Vec<String>,
}

/// Derive statistics from a replay and its classified laps.
pub fn derive_statistics(replay: &RaceReplay, laps: &[ClassifiedLap]) -> RaceStatistics {
    let total_overtakes = replay
        .replay
        .windows(2)
        .map(|w| overtakes_between(&w[0], &w[1]).len() as u32)
        .sum();

    let total_pit_stops = laps.iter().filter(|l| l.kind == LapKind::Pit).count() as u32;

    let mut safety_car_laps: Vec<u32> =
        laps.iter().filter(|l| l.kind == LapKind::Caution).map(|l| l.lap).collect();
    safety_car_laps.sort_unstable();
    safety_car_laps.dedup();

    // Ties break toward the earlier lap, then the lexically smaller driver.
    let fastest_lap = laps
        .iter()
        .filter(|l| l.kind != LapKind::Caution && l.time_secs > 0.0)
        .min_by(|a, b| {
            a.time_secs
                .partial_cmp(&b.time_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.lap.cmp(&b.lap))
                .then_with(|| a.driver.cmp(&b.driver))
        })
        .map(|l| FastestLap { driver: l.driver.clone(), lap: l.lap, time_secs: l.time_secs });

    let racing: Vec<f64> = laps
        .iter()
        .filter(|l| l.kind != LapKind::Pit && l.kind != LapKind::Caution)
        .map(|l| l.time_secs)
        .collect();
    let average_lap_time = if racing.is_empty() {
        None
    } else {
        Some(racing.iter().sum::<f64>() / racing.len() as f64)
    };

    let final_order: Vec<String> = replay
        .replay
        .last()
        .map(|s| s.positions.iter().map(|p| p.driver.clone()).collect())
        .unwrap_or_default();
    let winner = final_order.first().cloned();
    let podium: Vec<String> = final_order.into_iter().take(3).collect();

    RaceStatistics {
        total_overtakes,
        total_pit_stops,
        safety_car_laps,
        fastest_lap,
        average_lap_time,
        winner,
        podium,
    }
}
