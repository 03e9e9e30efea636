//! # Track Module
//!
//! Circuit geometry for replay visualization.
//!
//! - `types` - track points and maps
//! - `interpolate` - lap-progress to (x, y) position mapping
//! - `svg` - smooth closed-loop SVG path generation
//! - `catalog` - built-in layouts for the supported circuits

pub mod catalog;
pub mod interpolate;
pub mod svg;
pub mod types;

pub use catalog::{all_layouts, layout, TrackLayout, TRACK_IDS};
pub use interpolate::interpolate_track_position;
pub use svg::svg_path;
pub use types::{TrackMap, TrackPoint};
