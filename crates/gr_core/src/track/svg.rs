//! SVG path generation for track outlines.

use super::types::TrackPoint;

/// Generate path data for an SVG `<path>` element drawing the circuit as a
/// smooth closed loop.
///
/// Coordinates are scaled to a 0-1000 viewBox. The curve runs from segment
/// midpoint to segment midpoint using each layout point as the quadratic
/// control point, which keeps the loop smooth without overshooting corners.
/// Fewer than 3 points cannot form a loop and yield an empty string.
pub fn svg_path(points: &[TrackPoint]) -> String {
    if points.len() < 3 {
        return String::new();
    }

    let scaled: Vec<(f64, f64)> = points.iter().map(|p| (p.x * 1000.0, p.y * 1000.0)).collect();

    // Append the first two points so the final curves close the loop.
    let mut looped = scaled.clone();
    looped.push(scaled[0]);
    looped.push(scaled[1]);

    let mut path = Vec::with_capacity(scaled.len() + 1);

    let mx0 = (looped[0].0 + looped[1].0) / 2.0;
    let my0 = (looped[0].1 + looped[1].1) / 2.0;
    path.push(format!("M {} {}", mx0, my0));

    for i in 1..=scaled.len() {
        let control = looped[i];
        let next = looped[i + 1];
        let mx = (control.0 + next.0) / 2.0;
        let my = (control.1 + next.1) / 2.0;
        path.push(format!("Q {} {} {} {}", control.0, control.1, mx, my));
    }

    path.join(" ")
}
