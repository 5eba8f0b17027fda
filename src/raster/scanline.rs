//! Per-row span computation shared by the filled primitives.

use crate::foundation::core::Point;

/// Collect the x-coordinates where the closed polygon crosses scanline `y`, sorted ascending.
///
/// Horizontal edges are skipped. An edge counts when `y` lies in `[min(y1, y2), max(y1, y2))`,
/// so a vertex shared by two edges is only counted once.
pub fn polygon_crossings(points: &[Point], y: f64, out: &mut Vec<f64>) {
    out.clear();
    let n = points.len();
    for i in 0..n {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        if p1.y == p2.y {
            continue;
        }
        if y >= p1.y.min(p2.y) && y < p1.y.max(p2.y) {
            let t = (y - p1.y) / (p2.y - p1.y);
            out.push(p1.x + (p2.x - p1.x) * t);
        }
    }
    out.sort_by(f64::total_cmp);
}

/// Inclusive pixel columns covered between each even-odd pair of crossings.
///
/// A trailing unmatched crossing is ignored.
pub fn crossing_spans(crossings: &[f64]) -> impl Iterator<Item = (i64, i64)> + '_ {
    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0].floor() as i64, pair[1].ceil() as i64))
}

/// Half-open column span `[x0, x1)` of row `y` inside the ellipse centred at `(cx, cy)`.
///
/// Membership is tested at the pixel centre `y + 0.5`. Returns `None` when the row misses the
/// ellipse. Radii must be positive.
pub fn ellipse_span(cx: f64, cy: f64, rx: f64, ry: f64, y: i64) -> Option<(i64, i64)> {
    let dy = (y as f64 + 0.5 - cy) / ry;
    let dy2 = dy * dy;
    if dy2 > 1.0 {
        return None;
    }
    let span = rx * (1.0 - dy2).sqrt();
    Some(((cx - span) as i64, (cx + span + 1.0) as i64))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/scanline.rs"]
mod tests;
