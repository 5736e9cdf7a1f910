use kurbo::{CubicBez, ParamCurve, Vec2};

use crate::foundation::core::{Bounds, Point};
use crate::geometry::scanline::{RowExtents, Scanline, fill_polygon, vertical_extent};

/// Control-polygon length covered by one flattening segment.
const FLATTEN_STEP: f64 = 2.0;
const MIN_SEGMENTS: usize = 4;
const MAX_SEGMENTS: usize = 256;

/// Sample `curve` into a polyline at a resolution proportional to its size.
pub fn flatten_cubic(curve: CubicBez) -> Vec<Point> {
    let hull = (curve.p1 - curve.p0).hypot()
        + (curve.p2 - curve.p1).hypot()
        + (curve.p3 - curve.p2).hypot();
    let segments = ((hull / FLATTEN_STEP).ceil() as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS);
    (0..=segments)
        .map(|i| curve.eval(i as f64 / segments as f64))
        .collect()
}

/// Stroke a polyline with the given width and scan-convert the result.
///
/// Each segment is thickened into a quad and rows take the union of the quads
/// crossing them. Zero-length segments contribute nothing, so a fully collapsed
/// curve rasterizes to an empty sequence.
pub fn stroke_scanlines(polyline: &[Point], width: f64, bounds: Bounds) -> Vec<Scanline> {
    let half = width * 0.5;
    let quads: Vec<[Point; 4]> = polyline
        .windows(2)
        .filter_map(|seg| segment_quad(seg[0], seg[1], half))
        .collect();
    if quads.is_empty() {
        return Vec::new();
    }

    let (min_y, max_y) = quads
        .iter()
        .filter_map(|q| vertical_extent(q))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    let mut extents = RowExtents::spanning(min_y, max_y, bounds);
    for quad in &quads {
        fill_polygon(quad, &mut extents);
    }
    extents.finish()
}

fn segment_quad(a: Point, b: Point, half: f64) -> Option<[Point; 4]> {
    let dir: Vec2 = b - a;
    let len = dir.hypot();
    if len <= f64::EPSILON || half <= 0.0 {
        return None;
    }
    let n = Vec2::new(-dir.y, dir.x) * (half / len);
    Some([a + n, b + n, b - n, a - n])
}

/// Flatten and stroke a cubic in one step.
pub fn cubic_scanlines(curve: CubicBez, width: f64, bounds: Bounds) -> Vec<Scanline> {
    stroke_scanlines(&flatten_cubic(curve), width, bounds)
}
