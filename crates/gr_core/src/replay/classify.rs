//! Lap classification.
//!
//! Industry-standard lap typing relative to each driver's own pace: pit and
//! slow laps are measured against the driver's median lap, hot and cool laps
//! against the driver's best. Caution laps come from external flags and take
//! precedence over pace heuristics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{CautionFlag, ReplayConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapKind {
    Race,
    Hot,
    Cool,
    Slow,
    Pit,
    Caution,
}

/// One lap time derived from raw timing rows, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTime {
    pub driver: String,
    pub lap: u32,
    pub secs: f64,
    pub flag: Option<CautionFlag>,
}

/// A lap time with its classification attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLap {
    pub driver: String,
    pub lap: u32,
    pub time_secs: f64,
    pub kind: LapKind,
}

/// Classify every lap against its driver's own baselines.
pub fn classify_laps(times: &[LapTime], config: &ReplayConfig) -> Vec<ClassifiedLap> {
    // Per-driver baselines: median for anomaly detection, best for pace.
    let mut by_driver: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for t in times {
        by_driver.entry(t.driver.as_str()).or_default().push(t.secs);
    }

    let mut baselines: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for (driver, mut secs) in by_driver {
        secs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = median_of_sorted(&secs);
        let best = secs[0];
        baselines.insert(driver, (median, best));
    }

    times
        .iter()
        .map(|t| {
            let (median, best) =
                baselines.get(t.driver.as_str()).copied().unwrap_or((t.secs, t.secs));
            ClassifiedLap {
                driver: t.driver.clone(),
                lap: t.lap,
                time_secs: t.secs,
                kind: classify_one(t, median, best, config),
            }
        })
        .collect()
}

fn classify_one(t: &LapTime, median: f64, best: f64, config: &ReplayConfig) -> LapKind {
    if t.flag.is_some() {
        return LapKind::Caution;
    }
    if median > 0.0 && t.secs > median * config.pit_multiplier {
        return LapKind::Pit;
    }
    if median > 0.0 && t.secs > median * config.slow_multiplier {
        return LapKind::Slow;
    }
    if best > 0.0 {
        if t.secs <= best * config.hot_multiplier {
            return LapKind::Hot;
        }
        if t.secs > best * config.cool_multiplier {
            return LapKind::Cool;
        }
    }
    LapKind::Race
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
