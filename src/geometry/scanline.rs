//! Scan conversion into horizontal pixel spans.
//!
//! Coordinates follow the pixel-center convention: integer `(x, y)` is the
//! center of pixel `(x, y)`, and a pixel is covered when its center lies inside
//! (or on the boundary of) the shape. Every shape yields at most one span per
//! row, running from the leftmost to the rightmost covered pixel on that row.

use crate::foundation::core::{Bounds, Point};

const EDGE_EPSILON: f64 = 1e-9;

/// Inclusive run of pixels `x1..=x2` on row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Scanline {
    pub y: u32,
    pub x1: u32,
    pub x2: u32,
}

impl Scanline {
    pub fn new(y: u32, x1: u32, x2: u32) -> Self {
        debug_assert!(x1 <= x2, "scanline x1={x1} > x2={x2}");
        Self { y, x1, x2 }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.x2 - self.x1) as usize + 1
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, x: u32, y: u32) -> bool {
        self.y == y && (self.x1..=self.x2).contains(&x)
    }
}

/// Total pixel count covered by `lines`.
pub fn pixel_count(lines: &[Scanline]) -> usize {
    lines.iter().map(Scanline::len).sum()
}

/// Per-row horizontal extents over a vertical window already clipped to the canvas.
///
/// Storage is one slot per row of the window, so cost follows the shape's
/// bounding box rather than the canvas.
#[derive(Debug)]
pub(crate) struct RowExtents {
    bounds: Bounds,
    y_min: i64,
    rows: Vec<Option<(i64, i64)>>,
}

impl RowExtents {
    pub(crate) fn new(y_min: i64, y_max: i64, bounds: Bounds) -> Self {
        let lo = y_min.max(0);
        let hi = y_max.min(i64::from(bounds.y));
        let len = if hi >= lo { (hi - lo + 1) as usize } else { 0 };
        Self {
            bounds,
            y_min: lo,
            rows: vec![None; len],
        }
    }

    /// Window covering the float vertical range `[min_y, max_y]`.
    pub(crate) fn spanning(min_y: f64, max_y: f64, bounds: Bounds) -> Self {
        if !min_y.is_finite() || !max_y.is_finite() || min_y > max_y {
            return Self::new(0, -1, bounds);
        }
        Self::new(
            (min_y - EDGE_EPSILON).ceil() as i64,
            (max_y + EDGE_EPSILON).floor() as i64,
            bounds,
        )
    }

    pub(crate) fn rows(&self) -> std::ops::Range<i64> {
        self.y_min..self.y_min + self.rows.len() as i64
    }

    /// Widen row `y` to include `x1..=x2`. Rows outside the window are ignored.
    pub(crate) fn include(&mut self, y: i64, x1: i64, x2: i64) {
        if x1 > x2 || !self.rows().contains(&y) {
            return;
        }
        let slot = &mut self.rows[(y - self.y_min) as usize];
        *slot = Some(match *slot {
            Some((a, b)) => (a.min(x1), b.max(x2)),
            None => (x1, x2),
        });
    }

    /// Widen row `y` by the pixel centers inside the float interval `[xa, xb]`.
    pub(crate) fn include_interval(&mut self, y: i64, xa: f64, xb: f64) {
        let x1 = (xa - EDGE_EPSILON).ceil() as i64;
        let x2 = (xb + EDGE_EPSILON).floor() as i64;
        self.include(y, x1, x2);
    }

    /// Clip horizontally and emit spans in increasing row order.
    pub(crate) fn finish(self) -> Vec<Scanline> {
        let x_max = i64::from(self.bounds.x);
        let y_min = self.y_min;
        self.rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, extent)| {
                let (x1, x2) = extent?;
                let x1 = x1.max(0);
                let x2 = x2.min(x_max);
                if x1 > x2 {
                    return None;
                }
                Some(Scanline::new((y_min + i as i64) as u32, x1 as u32, x2 as u32))
            })
            .collect()
    }
}

/// Axis-aligned block covering `min..=max` on both axes.
pub fn rect_scanlines(x1: i32, y1: i32, x2: i32, y2: i32, bounds: Bounds) -> Vec<Scanline> {
    let (x_lo, x_hi) = (x1.min(x2), x1.max(x2));
    let (y_lo, y_hi) = (y1.min(y2), y1.max(y2));
    let mut extents = RowExtents::new(i64::from(y_lo), i64::from(y_hi), bounds);
    for y in extents.rows() {
        extents.include(y, i64::from(x_lo), i64::from(x_hi));
    }
    extents.finish()
}

/// Filled polygon with boundary-inclusive coverage.
///
/// Each row takes the horizontal extent of its edge crossings, which is exact
/// for convex polygons and the row hull otherwise.
pub fn polygon_scanlines(points: &[Point], bounds: Bounds) -> Vec<Scanline> {
    let Some((min_y, max_y)) = vertical_extent(points) else {
        return Vec::new();
    };
    let mut extents = RowExtents::spanning(min_y, max_y, bounds);
    fill_polygon(points, &mut extents);
    extents.finish()
}

pub(crate) fn vertical_extent(points: &[Point]) -> Option<(f64, f64)> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))),
    )
}

pub(crate) fn fill_polygon(points: &[Point], extents: &mut RowExtents) {
    if points.is_empty() {
        return;
    }
    let Some((min_y, max_y)) = vertical_extent(points) else {
        return;
    };
    let lo = ((min_y - EDGE_EPSILON).ceil() as i64).max(extents.rows().start);
    let hi = ((max_y + EDGE_EPSILON).floor() as i64).min(extents.rows().end - 1);

    for y in lo..=hi {
        let yc = y as f64;
        let mut xa = f64::INFINITY;
        let mut xb = f64::NEG_INFINITY;
        for i in 0..points.len() {
            let p0 = points[i];
            let p1 = points[(i + 1) % points.len()];
            let (top, bottom) = if p0.y <= p1.y { (p0, p1) } else { (p1, p0) };
            if yc < top.y - EDGE_EPSILON || yc > bottom.y + EDGE_EPSILON {
                continue;
            }
            if (bottom.y - top.y).abs() <= EDGE_EPSILON {
                xa = xa.min(p0.x.min(p1.x));
                xb = xb.max(p0.x.max(p1.x));
                continue;
            }
            let t = ((yc - top.y) / (bottom.y - top.y)).clamp(0.0, 1.0);
            let x = top.x + t * (bottom.x - top.x);
            xa = xa.min(x);
            xb = xb.max(x);
        }
        if xa <= xb {
            extents.include_interval(y, xa, xb);
        }
    }
}

/// Filled axis-aligned ellipse centered on `(cx, cy)`.
pub fn ellipse_scanlines(cx: i32, cy: i32, rx: i32, ry: i32, bounds: Bounds) -> Vec<Scanline> {
    if rx < 0 || ry < 0 {
        return Vec::new();
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let (rx_f, ry_f) = (f64::from(rx), f64::from(ry));
    let mut extents = RowExtents::new(cy - i64::from(ry), cy + i64::from(ry), bounds);
    for y in extents.rows() {
        let half = if ry == 0 {
            rx_f
        } else {
            let dy = (y - cy) as f64 / ry_f;
            rx_f * (1.0 - dy * dy).max(0.0).sqrt()
        };
        let c = cx as f64;
        extents.include_interval(y, c - half, c + half);
    }
    extents.finish()
}
