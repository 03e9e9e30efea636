//! # Replay Module
//!
//! Race replay reconstruction from archived timing rows.
//!
//! - `types` - raw rows, snapshots, and the assembly policy
//! - `classify` - per-driver lap typing (hot/cool/slow/pit/caution)
//! - `assembler` - cumulative-time standings, gaps, and event detection
//! - `stats` - summary statistics derived fresh from an assembled race
//! - `player` - playback cursor over an immutable replay

pub mod assembler;
pub mod classify;
pub mod player;
pub mod stats;
pub mod types;

pub use assembler::{assemble, overtakes_between, AssembledRace, Overtake};
pub use classify::{classify_laps, ClassifiedLap, LapKind, LapTime};
pub use player::ReplayPlayer;
pub use stats::{derive_statistics, FastestLap, RaceStatistics};
pub use types::{CautionFlag, DriverPosition, LapRow, LapSnapshot, RaceReplay, ReplayConfig};
