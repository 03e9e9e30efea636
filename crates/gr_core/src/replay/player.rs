//! Replay playback state.
//!
//! The player owns cursor state over an immutable replay. Multiple players
//! can share one replay; advancing or seeking one never affects another.

use serde::{Deserialize, Serialize};

use super::types::{LapSnapshot, RaceReplay};

/// Playback cursor over a [`RaceReplay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayPlayer {
    pub current_lap: u32,
    pub is_playing: bool,
    pub playback_speed: f64,
}

impl Default for ReplayPlayer {
    fn default() -> Self {
        ReplayPlayer { current_lap: 1, is_playing: false, playback_speed: 1.0 }
    }
}

impl ReplayPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Set playback speed. Non-positive or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.playback_speed = speed;
        }
    }

    /// Advance one lap, pausing at the final lap of the replay.
    pub fn step(&mut self, replay: &RaceReplay) {
        if self.current_lap < replay.laps {
            self.current_lap += 1;
        } else {
            self.is_playing = false;
        }
    }

    /// Jump to a lap, clamped to the replay's range.
    pub fn seek(&mut self, replay: &RaceReplay, lap: u32) {
        self.current_lap = lap.clamp(1, replay.laps.max(1));
    }

    /// The snapshot under the cursor, if the replay has any laps.
    pub fn current<'a>(&self, replay: &'a RaceReplay) -> Option<&'a LapSnapshot> {
        replay.snapshot(self.current_lap)
    }
}
