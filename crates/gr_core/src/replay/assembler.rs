//! Replay assembly.
//!
//! Turns raw per-driver timing rows into an ordered sequence of lap
//! snapshots: cumulative elapsed time per driver, positions sorted per lap,
//! gaps to the leader, and per-lap event descriptions (overtakes, pit stops,
//! caution periods). Runs in a constant number of linear passes; the only
//! super-linear work is the per-lap position sort.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::classify::{classify_laps, ClassifiedLap, LapKind, LapTime};
use super::types::{DriverPosition, LapRow, LapSnapshot, RaceReplay, ReplayConfig};
use crate::error::{CoreError, Result};
use crate::track::TrackMap;

/// A replay together with the classified lap times it was built from.
///
/// Statistics are derived fresh from these two views; nothing here caches a
/// derived value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRace {
    pub replay: RaceReplay,
    pub laps: Vec<ClassifiedLap>,
}

/// An overtake detected between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Overtake {
    pub attacker: String,
    /// The driver whose position number increased at the attacker's new slot,
    /// when identifiable.
    pub victim: Option<String>,
    pub new_position: u32,
}

/// Assemble a replay from raw timing rows.
///
/// Rows may arrive in any order; drivers may have unequal lap counts (DNFs).
/// Fails only on an empty row set - individual bad rows degrade to fallback
/// lap times rather than aborting the build.
pub fn assemble(
    rows: &[LapRow],
    track: Option<TrackMap>,
    config: &ReplayConfig,
) -> Result<AssembledRace> {
    if rows.is_empty() {
        return Err(CoreError::EmptyInput("no lap rows to assemble".to_string()));
    }

    // Group by driver, ordered for deterministic output.
    let mut by_driver: BTreeMap<&str, Vec<&LapRow>> = BTreeMap::new();
    for row in rows {
        by_driver.entry(row.driver.as_str()).or_default().push(row);
    }
    for laps in by_driver.values_mut() {
        laps.sort_by_key(|r| r.lap);
    }

    log::debug!("assembling replay: {} rows, {} drivers", rows.len(), by_driver.len());

    // Derive lap times and cumulative elapsed time per driver.
    let mut lap_times: Vec<LapTime> = Vec::with_capacity(rows.len());
    // (driver, lap) -> (cumulative secs, laps completed at that point)
    let mut cumulative: BTreeMap<(&str, u32), (f64, u32)> = BTreeMap::new();
    let mut max_lap = 0;

    for (driver, laps) in &by_driver {
        let mut elapsed = 0.0;
        let mut completed = 0;
        let mut prev_timestamp: Option<DateTime<Utc>> = None;

        for row in laps {
            let secs = match prev_timestamp {
                None => config.fallback_lap_secs,
                Some(prev) => {
                    let dt = (row.timestamp - prev).num_milliseconds() as f64 / 1000.0;
                    if dt > config.min_lap_secs && dt < config.max_lap_secs {
                        dt
                    } else {
                        log::warn!(
                            "implausible lap time {:.1}s for {} lap {}, using fallback",
                            dt,
                            driver,
                            row.lap
                        );
                        config.fallback_lap_secs
                    }
                }
            };
            prev_timestamp = Some(row.timestamp);
            elapsed += secs;
            completed += 1;
            max_lap = max_lap.max(row.lap);
            cumulative.insert((driver, row.lap), (elapsed, completed));
            lap_times.push(LapTime {
                driver: (*driver).to_string(),
                lap: row.lap,
                secs,
                flag: row.flag,
            });
        }
    }

    let classified = classify_laps(&lap_times, config);

    // Build one snapshot per lap, ordered ascending.
    let mut snapshots: Vec<LapSnapshot> = Vec::new();
    for lap in 1..=max_lap {
        // Every driver who has started appears in every subsequent snapshot;
        // a retired driver carries their last known state forward and ranks
        // behind via the laps-completed tie-break.
        let mut standings: Vec<(&str, f64, u32)> = by_driver
            .keys()
            .filter_map(|driver| {
                cumulative
                    .range((*driver, 0)..=(*driver, lap))
                    .next_back()
                    .map(|(_, &(time, done))| (*driver, time, done))
            })
            .collect();
        if standings.is_empty() {
            continue;
        }

        // Laps completed descending, then elapsed time, then driver id for a
        // deterministic total order.
        standings.sort_by(|a, b| {
            b.2.cmp(&a.2)
                .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| a.0.cmp(b.0))
        });

        let leader_time = standings[0].1;
        let positions: Vec<DriverPosition> = standings
            .iter()
            .enumerate()
            .map(|(idx, &(driver, time, done))| DriverPosition {
                driver: driver.to_string(),
                position: idx as u32 + 1,
                gap_to_leader: if idx == 0 {
                    0.0
                } else {
                    // Retired drivers carry less elapsed time than the leader.
                    ((time - leader_time).max(0.0) * 1000.0).round() / 1000.0
                },
                laps_completed: done,
            })
            .collect();

        snapshots.push(LapSnapshot { lap, positions, events: Vec::new() });
    }

    attach_events(&mut snapshots, &classified);

    let drivers: Vec<String> = by_driver.keys().map(|d| d.to_string()).collect();
    let replay = RaceReplay { track, laps: snapshots.len() as u32, drivers, replay: snapshots };

    log::info!(
        "assembled replay: {} laps, {} drivers, {} classified lap times",
        replay.laps,
        replay.drivers.len(),
        classified.len()
    );

    Ok(AssembledRace { replay, laps: classified })
}

/// Detect overtakes between two consecutive snapshots.
///
/// A driver whose position improved scores an overtake on the later lap. The
/// overtaken driver is the one who previously held the attacker's new slot
/// and lost ground; drivers first appearing in the later snapshot are not
/// overtakes.
pub fn overtakes_between(prev: &LapSnapshot, curr: &LapSnapshot) -> Vec<Overtake> {
    let prev_pos: BTreeMap<&str, u32> =
        prev.positions.iter().map(|p| (p.driver.as_str(), p.position)).collect();
    let curr_pos: BTreeMap<&str, u32> =
        curr.positions.iter().map(|p| (p.driver.as_str(), p.position)).collect();

    let mut overtakes = Vec::new();
    for entry in &curr.positions {
        let driver = entry.driver.as_str();
        let Some(&was) = prev_pos.get(driver) else { continue };
        if entry.position >= was {
            continue;
        }
        let victim = prev
            .positions
            .iter()
            .find(|p| {
                p.position == entry.position
                    && curr_pos.get(p.driver.as_str()).is_some_and(|&now| now > p.position)
            })
            .map(|p| p.driver.clone());
        overtakes.push(Overtake {
            attacker: entry.driver.clone(),
            victim,
            new_position: entry.position,
        });
    }
    overtakes
}

fn attach_events(snapshots: &mut [LapSnapshot], classified: &[ClassifiedLap]) {
    // Overtake events from consecutive position changes.
    for i in 1..snapshots.len() {
        let (before, after) = snapshots.split_at_mut(i);
        let prev = &before[i - 1];
        let curr = &mut after[0];
        for overtake in overtakes_between(prev, curr) {
            let description = match &overtake.victim {
                Some(victim) => format!(
                    "{} overtook {} for P{}",
                    overtake.attacker, victim, overtake.new_position
                ),
                None => {
                    format!("{} moved up to P{}", overtake.attacker, overtake.new_position)
                }
            };
            curr.events.push(description);
        }
    }

    // Pit and caution events from lap classification.
    for snapshot in snapshots.iter_mut() {
        let mut caution_noted = false;
        for lap in classified.iter().filter(|c| c.lap == snapshot.lap) {
            match lap.kind {
                LapKind::Pit => {
                    snapshot.events.push(format!("{} made a pit stop", lap.driver));
                }
                LapKind::Caution if !caution_noted => {
                    snapshot.events.push("Caution period (safety car)".to_string());
                    caution_noted = true;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    /// Build rows where each driver's lap times are given in seconds; row
    /// timestamps are cumulative from a common start.
    fn rows_from_times(times: &[(&str, &[f64])]) -> Vec<LapRow> {
        let start = Utc.with_ymd_and_hms(2024, 4, 14, 13, 0, 0).unwrap();
        let mut rows = Vec::new();
        for (driver, laps) in times {
            let mut elapsed = 0.0;
            for (i, secs) in laps.iter().enumerate() {
                elapsed += secs;
                rows.push(LapRow {
                    lap: i as u32 + 1,
                    driver: driver.to_string(),
                    timestamp: start + Duration::milliseconds((elapsed * 1000.0) as i64),
                    flag: None,
                });
            }
        }
        rows
    }

    #[test]
    fn test_assemble_rejects_empty_input() {
        assert!(assemble(&[], None, &ReplayConfig::default()).is_err());
    }

    #[test]
    fn test_snapshots_are_ordered_and_positions_sorted() {
        // First lap uses the fallback time for everyone, so standings are
        // decided by laps 2-3.
        let rows = rows_from_times(&[
            ("d1", &[100.0, 95.0, 95.0]),
            ("d2", &[100.0, 97.0, 97.0]),
            ("d3", &[100.0, 99.0, 99.0]),
        ]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let replay = &race.replay;

        assert_eq!(replay.laps, 3);
        assert_eq!(replay.drivers, vec!["d1", "d2", "d3"]);
        let laps: Vec<u32> = replay.replay.iter().map(|s| s.lap).collect();
        assert_eq!(laps, vec![1, 2, 3]);

        let final_snapshot = replay.replay.last().unwrap();
        let order: Vec<&str> =
            final_snapshot.positions.iter().map(|p| p.driver.as_str()).collect();
        assert_eq!(order, vec!["d1", "d2", "d3"]);

        assert_eq!(final_snapshot.positions[0].gap_to_leader, 0.0);
        assert!((final_snapshot.positions[1].gap_to_leader - 4.0).abs() < 1e-9);
        assert!((final_snapshot.positions[2].gap_to_leader - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_times_tie_break_on_driver_id() {
        let rows = rows_from_times(&[("zeta", &[100.0, 100.0]), ("alpha", &[100.0, 100.0])]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let snapshot = race.replay.replay.last().unwrap();
        assert_eq!(snapshot.positions[0].driver, "alpha");
        assert_eq!(snapshot.positions[1].driver, "zeta");
    }

    #[test]
    fn test_single_overtake_attributed_to_correct_pair() {
        // d2 jumps d1 on lap 3; d3 stays behind throughout.
        let rows = rows_from_times(&[
            ("d1", &[100.0, 95.0, 99.0]),
            ("d2", &[100.0, 96.0, 90.0]),
            ("d3", &[100.0, 98.0, 98.0]),
        ]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();

        let overtake_events: Vec<(&u32, Vec<&String>)> = race
            .replay
            .replay
            .iter()
            .map(|s| {
                (&s.lap, s.events.iter().filter(|e| e.contains("overtook")).collect::<Vec<_>>())
            })
            .filter(|(_, events)| !events.is_empty())
            .collect();

        assert_eq!(overtake_events.len(), 1, "exactly one lap has an overtake");
        let (lap, events) = &overtake_events[0];
        assert_eq!(**lap, 3);
        assert_eq!(events.len(), 1);
        assert_eq!(*events[0], "d2 overtook d1 for P1");
    }

    #[test]
    fn test_fewer_laps_ranks_behind() {
        // d2 retires after lap 2 but with less elapsed time than d3's three
        // laps; laps completed dominates the sort.
        let rows = rows_from_times(&[
            ("d1", &[100.0, 95.0, 95.0]),
            ("d2", &[100.0, 94.0]),
            ("d3", &[100.0, 99.0, 99.0]),
        ]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let final_snapshot = race.replay.replay.last().unwrap();
        let order: Vec<&str> =
            final_snapshot.positions.iter().map(|p| p.driver.as_str()).collect();
        assert_eq!(order, vec!["d1", "d3", "d2"]);
        assert_eq!(final_snapshot.positions[2].laps_completed, 2);
        assert!(final_snapshot.positions[2].gap_to_leader >= 0.0);
        // The retiree stays in every snapshot, not just the one they last
        // completed.
        for snapshot in &race.replay.replay {
            assert!(
                snapshot.positions.iter().any(|p| p.driver == "d2"),
                "d2 missing from lap {} snapshot",
                snapshot.lap
            );
        }
    }

    #[test]
    fn test_pit_lap_produces_event() {
        let rows = rows_from_times(&[("d1", &[100.0, 100.0, 100.0, 170.0, 100.0])]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let lap4 = race.replay.snapshot(4).unwrap();
        assert!(lap4.events.iter().any(|e| e == "d1 made a pit stop"));
    }

    #[test]
    fn test_caution_flag_suppresses_pit_event() {
        let start = Utc.with_ymd_and_hms(2024, 4, 14, 13, 0, 0).unwrap();
        let mut rows = rows_from_times(&[("d1", &[100.0, 100.0, 100.0])]);
        // A 170s lap under safety car: caution, not a pit stop.
        rows.push(LapRow {
            lap: 4,
            driver: "d1".to_string(),
            timestamp: start + Duration::seconds(470),
            flag: Some(super::super::types::CautionFlag::SafetyCar),
        });
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let lap4 = race.replay.snapshot(4).unwrap();
        assert!(lap4.events.iter().any(|e| e.contains("Caution")));
        assert!(!lap4.events.iter().any(|e| e.contains("pit")));
    }

    #[test]
    fn test_implausible_delta_uses_fallback() {
        let start = Utc.with_ymd_and_hms(2024, 4, 14, 13, 0, 0).unwrap();
        let rows = vec![
            LapRow { lap: 1, driver: "d1".into(), timestamp: start, flag: None },
            // 20 minutes later: outside the plausible window.
            LapRow {
                lap: 2,
                driver: "d1".into(),
                timestamp: start + Duration::seconds(1200),
                flag: None,
            },
        ];
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let lap2 = race.laps.iter().find(|c| c.lap == 2).unwrap();
        assert_eq!(lap2.time_secs, ReplayConfig::default().fallback_lap_secs);
    }

    #[test]
    fn test_replay_is_not_mutated_by_rederivation() {
        let rows = rows_from_times(&[("d1", &[100.0, 95.0]), ("d2", &[100.0, 96.0])]);
        let race = assemble(&rows, None, &ReplayConfig::default()).unwrap();
        let snapshot_before = race.replay.clone();
        for window in race.replay.replay.windows(2) {
            let _ = overtakes_between(&window[0], &window[1]);
        }
        assert_eq!(race.replay, snapshot_before);
    }
}
