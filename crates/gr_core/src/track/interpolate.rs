//! Lap-progress to track-coordinate interpolation.
//!
//! Maps a normalized lap-progress fraction onto the piecewise-linear closed
//! loop through a track's coordinate polyline. The mapping assumes points are
//! roughly evenly spaced in arc length; it is a deliberate approximation, not
//! a true arc-length parametrization. Callers that need physically accurate
//! car speed must resample the polyline to near-uniform spacing first.

use super::types::{TrackMap, TrackPoint};

/// Interpolate an (x, y) position for a lap-progress fraction.
///
/// The intended domain of `progress` is `[0, 1)`, but any finite float is
/// tolerated by wrapping around the loop - including negative values, which
/// is why the segment index uses a floor-based modulo rather than the `%`
/// remainder (a remainder would go negative and index out of bounds).
///
/// Degenerate maps (no coordinates) return the origin rather than failing.
pub fn interpolate_track_position(map: &TrackMap, progress: f64) -> TrackPoint {
    let points = &map.coordinates;
    let n = points.len();
    if n == 0 {
        return TrackPoint::ORIGIN;
    }
    if n == 1 {
        return points[0];
    }

    let progress = if progress.is_finite() { progress } else { 0.0 };

    let raw = progress * n as f64;
    let segment_fraction = raw - raw.floor();
    let index = (raw.floor() as i64).rem_euclid(n as i64) as usize;
    let next = (index + 1) % n;

    let a = points[index];
    let b = points[next];
    TrackPoint {
        x: a.x + (b.x - a.x) * segment_fraction,
        y: a.y + (b.y - a.y) * segment_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_map() -> TrackMap {
        TrackMap {
            coordinates: vec![
                TrackPoint::new(0.0, 0.0),
                TrackPoint::new(10.0, 0.0),
                TrackPoint::new(10.0, 10.0),
                TrackPoint::new(0.0, 10.0),
            ],
            svg_path: String::new(),
        }
    }

    #[test]
    fn test_progress_zero_is_exactly_first_point() {
        let map = square_map();
        assert_eq!(interpolate_track_position(&map, 0.0), map.coordinates[0]);
    }

    #[test]
    fn test_progress_half_lands_on_vertex() {
        let map = square_map();
        let p = interpolate_track_position(&map, 0.5);
        assert_eq!(p, TrackPoint::new(10.0, 10.0));
    }

    #[test]
    fn test_mid_segment_blend() {
        let map = square_map();
        // 0.125 * 4 = 0.5 -> halfway along the first segment.
        let p = interpolate_track_position(&map, 0.125);
        assert_eq!(p, TrackPoint::new(5.0, 0.0));
    }

    #[test]
    fn test_last_segment_wraps_toward_start() {
        let map = square_map();
        // Just past 0.75: leaving the last point along the closing segment.
        let p = interpolate_track_position(&map, 0.76);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 9.6).abs() < 1e-9);
        // Just under 1.0: almost back at the first point.
        let p = interpolate_track_position(&map, 0.999);
        assert!(p.x.abs() < 1e-9);
        assert!(p.y > 0.0 && p.y < 0.1);
    }

    #[test]
    fn test_wraps_beyond_one_and_below_zero() {
        let map = square_map();
        let base = interpolate_track_position(&map, 0.3);
        // Wrapped progress agrees up to float rounding of `p * n`.
        for p in [1.3, -0.7] {
            let wrapped = interpolate_track_position(&map, p);
            assert!((wrapped.x - base.x).abs() < 1e-9, "x diverged at progress {}", p);
            assert!((wrapped.y - base.y).abs() < 1e-9, "y diverged at progress {}", p);
        }
    }

    #[test]
    fn test_degenerate_maps() {
        let empty = TrackMap { coordinates: vec![], svg_path: String::new() };
        assert_eq!(interpolate_track_position(&empty, 0.4), TrackPoint::ORIGIN);

        let single = TrackMap {
            coordinates: vec![TrackPoint::new(3.0, 4.0)],
            svg_path: String::new(),
        };
        assert_eq!(interpolate_track_position(&single, 0.4), TrackPoint::new(3.0, 4.0));
    }

    #[test]
    fn test_non_finite_progress_falls_back_to_start() {
        let map = square_map();
        assert_eq!(interpolate_track_position(&map, f64::NAN), map.coordinates[0]);
        assert_eq!(interpolate_track_position(&map, f64::INFINITY), map.coordinates[0]);
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: nearby progress values map to nearby points, bounded
            /// by the longest segment of the loop.
            #[test]
            fn prop_interpolation_is_continuous(p in 0.0f64..1.0) {
                let map = square_map();
                let n = map.coordinates.len() as f64;
                let delta = 1e-4;
                let a = interpolate_track_position(&map, p);
                let b = interpolate_track_position(&map, p + delta);
                let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                // Max segment length of the square is 10; moving delta of a
                // lap can cover at most delta * n segments worth of distance.
                prop_assert!(dist <= 10.0 * delta * n + 1e-9);
            }

            /// Property: wrapping never panics and never yields a point off
            /// the polyline's bounding box.
            #[test]
            fn prop_any_progress_stays_in_bounds(p in -100.0f64..100.0) {
                let map = square_map();
                let point = interpolate_track_position(&map, p);
                prop_assert!((0.0..=10.0).contains(&point.x));
                prop_assert!((0.0..=10.0).contains(&point.y));
            }
        }
    }
}
