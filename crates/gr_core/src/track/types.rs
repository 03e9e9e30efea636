use serde::{Deserialize, Serialize};

/// A point on a track polyline, in normalized (0-1) layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
}

impl TrackPoint {
    pub const ORIGIN: TrackPoint = TrackPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        TrackPoint { x, y }
    }
}

/// An ordered polyline describing a circuit.
///
/// The ordering defines the direction of travel and the polyline is treated
/// as a closed loop: the last point wraps back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMap {
    pub coordinates: Vec<TrackPoint>,
    #[serde(default)]
    pub svg_path: String,
}

impl TrackMap {
    /// Build a map from raw coordinates, deriving the SVG path.
    pub fn from_coordinates(coordinates: Vec<TrackPoint>) -> Self {
        let svg_path = super::svg::svg_path(&coordinates);
        TrackMap { coordinates, svg_path }
    }
}
