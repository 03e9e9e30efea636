//! Built-in circuit layouts.
//!
//! Normalized (0-1) polylines for the supported circuits, ordered in the
//! direction of travel starting at the start/finish line. Layouts are
//! hand-placed for visualization; point spacing is only approximately uniform
//! in arc length, which is the accuracy the interpolator is specified for.

use serde::Serialize;

use super::types::{TrackMap, TrackPoint};

/// Static metadata and layout for one circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackLayout {
    pub id: &'static str,
    pub name: &'static str,
    pub length_miles: f64,
    pub turns: u32,
    pub coordinates: Vec<TrackPoint>,
}

impl TrackLayout {
    /// Build a renderable map (coordinates + SVG path) from this layout.
    pub fn to_map(&self) -> TrackMap {
        TrackMap::from_coordinates(self.coordinates.clone())
    }
}

/// Identifiers of every built-in circuit.
pub const TRACK_IDS: [&str; 7] =
    ["barber", "cota", "indianapolis", "road-america", "sebring", "sonoma", "vir"];

/// Look up a built-in circuit layout by id.
pub fn layout(track_id: &str) -> Option<TrackLayout> {
    let (name, length_miles, turns, raw): (&'static str, f64, u32, &[(f64, f64)]) = match track_id
    {
        "barber" => ("Barber Motorsports Park", 2.38, 17, BARBER),
        "cota" => ("Circuit of the Americas", 3.427, 20, COTA),
        "indianapolis" => ("Indianapolis Motor Speedway", 2.439, 14, INDIANAPOLIS),
        "road-america" => ("Road America", 4.048, 14, ROAD_AMERICA),
        "sebring" => ("Sebring International Raceway", 3.74, 17, SEBRING),
        "sonoma" => ("Sonoma Raceway", 2.52, 12, SONOMA),
        "vir" => ("Virginia International Raceway", 3.27, 17, VIR),
        _ => return None,
    };
    Some(TrackLayout {
        id: TRACK_IDS.iter().find(|id| **id == track_id).copied().unwrap_or("unknown"),
        name,
        length_miles,
        turns,
        coordinates: raw.iter().map(|&(x, y)| TrackPoint::new(x, y)).collect(),
    })
}

/// All built-in circuit layouts, in catalog order.
pub fn all_layouts() -> Vec<TrackLayout> {
    TRACK_IDS.iter().filter_map(|id| layout(id)).collect()
}

const BARBER: &[(f64, f64)] = &[
    (0.15, 0.65),
    (0.18, 0.63),
    (0.22, 0.60),
    (0.28, 0.55),
    (0.32, 0.48),
    (0.35, 0.42),
    (0.38, 0.36),
    (0.42, 0.30),
    (0.48, 0.25),
    (0.55, 0.22),
    (0.62, 0.20),
    (0.68, 0.22),
    (0.73, 0.26),
    (0.78, 0.32),
    (0.82, 0.40),
    (0.84, 0.48),
    (0.85, 0.56),
    (0.83, 0.63),
    (0.78, 0.68),
    (0.72, 0.72),
    (0.65, 0.75),
    (0.58, 0.76),
    (0.50, 0.75),
    (0.43, 0.72),
    (0.36, 0.68),
    (0.28, 0.66),
    (0.22, 0.65),
];

const COTA: &[(f64, f64)] = &[
    (0.50, 0.85),
    (0.48, 0.78),
    (0.45, 0.70),
    (0.40, 0.60),
    (0.35, 0.52),
    (0.32, 0.45),
    (0.30, 0.38),
    (0.28, 0.32),
    (0.27, 0.26),
    (0.28, 0.20),
    (0.32, 0.15),
    (0.38, 0.12),
    (0.45, 0.10),
    (0.52, 0.11),
    (0.58, 0.14),
    (0.65, 0.18),
    (0.72, 0.24),
    (0.77, 0.32),
    (0.80, 0.40),
    (0.81, 0.48),
    (0.78, 0.55),
    (0.73, 0.60),
    (0.68, 0.64),
    (0.63, 0.67),
    (0.58, 0.70),
    (0.54, 0.75),
    (0.52, 0.80),
];

const INDIANAPOLIS: &[(f64, f64)] = &[
    (0.20, 0.75),
    (0.25, 0.72),
    (0.32, 0.68),
    (0.40, 0.65),
    (0.48, 0.60),
    (0.55, 0.54),
    (0.60, 0.47),
    (0.63, 0.40),
    (0.65, 0.32),
    (0.65, 0.25),
    (0.62, 0.18),
    (0.56, 0.14),
    (0.48, 0.12),
    (0.40, 0.13),
    (0.32, 0.16),
    (0.25, 0.22),
    (0.20, 0.30),
    (0.16, 0.38),
    (0.14, 0.46),
    (0.13, 0.54),
    (0.14, 0.62),
    (0.16, 0.69),
    (0.18, 0.73),
];

const ROAD_AMERICA: &[(f64, f64)] = &[
    (0.25, 0.80),
    (0.30, 0.75),
    (0.38, 0.68),
    (0.45, 0.60),
    (0.50, 0.52),
    (0.54, 0.44),
    (0.58, 0.36),
    (0.62, 0.28),
    (0.67, 0.22),
    (0.73, 0.18),
    (0.80, 0.16),
    (0.85, 0.20),
    (0.88, 0.28),
    (0.88, 0.36),
    (0.85, 0.44),
    (0.80, 0.50),
    (0.73, 0.55),
    (0.65, 0.60),
    (0.56, 0.65),
    (0.46, 0.70),
    (0.36, 0.74),
    (0.28, 0.78),
];

const SEBRING: &[(f64, f64)] = &[
    (0.10, 0.50),
    (0.20, 0.40),
    (0.35, 0.30),
    (0.50, 0.25),
    (0.65, 0.30),
    (0.80, 0.40),
    (0.85, 0.50),
    (0.80, 0.60),
    (0.65, 0.70),
    (0.50, 0.75),
    (0.35, 0.70),
    (0.20, 0.60),
];

const SONOMA: &[(f64, f64)] = &[
    (0.30, 0.75),
    (0.35, 0.70),
    (0.42, 0.63),
    (0.50, 0.55),
    (0.56, 0.48),
    (0.60, 0.40),
    (0.63, 0.32),
    (0.65, 0.24),
    (0.68, 0.18),
    (0.73, 0.14),
    (0.78, 0.12),
    (0.83, 0.15),
    (0.86, 0.22),
    (0.87, 0.30),
    (0.85, 0.38),
    (0.80, 0.45),
    (0.73, 0.52),
    (0.65, 0.58),
    (0.56, 0.63),
    (0.47, 0.68),
    (0.38, 0.72),
    (0.32, 0.74),
];

const VIR: &[(f64, f64)] = &[
    (0.20, 0.70),
    (0.25, 0.65),
    (0.32, 0.58),
    (0.40, 0.50),
    (0.46, 0.42),
    (0.52, 0.35),
    (0.58, 0.28),
    (0.64, 0.22),
    (0.70, 0.18),
    (0.76, 0.16),
    (0.82, 0.18),
    (0.86, 0.24),
    (0.88, 0.32),
    (0.88, 0.40),
    (0.85, 0.48),
    (0.80, 0.55),
    (0.74, 0.60),
    (0.67, 0.64),
    (0.59, 0.67),
    (0.51, 0.70),
    (0.43, 0.72),
    (0.35, 0.73),
    (0.28, 0.72),
    (0.22, 0.70),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_track_resolves() {
        for id in TRACK_IDS {
            let layout = layout(id).unwrap_or_else(|| panic!("missing layout for {}", id));
            assert!(layout.coordinates.len() >= 3, "{} needs a loop", id);
            assert!(layout.length_miles > 0.0);
            assert!(layout.turns > 0);
        }
        assert_eq!(all_layouts().len(), TRACK_IDS.len());
    }

    #[test]
    fn test_unknown_track_is_none() {
        assert!(layout("monza").is_none());
    }

    #[test]
    fn test_coordinates_stay_normalized() {
        for layout in all_layouts() {
            for p in &layout.coordinates {
                assert!((0.0..=1.0).contains(&p.x), "{} x out of range", layout.id);
                assert!((0.0..=1.0).contains(&p.y), "{} y out of range", layout.id);
            }
        }
    }

    #[test]
    fn test_to_map_derives_svg_path() {
        let map = layout("barber").unwrap().to_map();
        assert!(map.svg_path.starts_with("M "));
        assert_eq!(map.svg_path.matches('Q').count(), map.coordinates.len());
    }
}
