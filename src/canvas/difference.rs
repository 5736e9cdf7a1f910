//! Normalized root-mean-square difference between RGBA8 buffers.
//!
//! Scores live in `[0, 1]`: the RMS over every sample of all four channels,
//! divided by 255. `difference_partial` rebuilds the full-image score after a
//! localized edit without rescanning untouched pixels.

use crate::{canvas::buffer::Raster, geometry::scanline::Scanline};

#[inline]
fn sample_count(width: u32, height: u32) -> f64 {
    f64::from(width) * f64::from(height) * 4.0
}

#[inline]
fn squared_error(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u64
        })
        .sum()
}

/// Sum of squared sample differences over the pixels of `lines`.
pub fn squared_error_on(a: &Raster, b: &Raster, lines: &[Scanline]) -> u64 {
    lines
        .iter()
        .map(|s| squared_error(a.row_span(s.y, s.x1, s.x2), b.row_span(s.y, s.x1, s.x2)))
        .sum()
}

/// Score of `b` against `a` over the whole image.
pub fn difference_full(a: &Raster, b: &Raster) -> f64 {
    debug_assert!(a.same_size(b), "difference_full expects equally sized rasters");
    let total = squared_error(a.data(), b.data()) as f64;
    (total / sample_count(a.width(), a.height())).sqrt() / 255.0
}

/// Score after replacing `before` by `after` on `lines`, given `before`'s score.
///
/// Recovers the prior squared-error total from `prior_score`, swaps the
/// contribution of the touched pixels, and renormalizes like [`difference_full`].
pub fn difference_partial(
    target: &Raster,
    before: &Raster,
    after: &Raster,
    prior_score: f64,
    lines: &[Scanline],
) -> f64 {
    let samples = sample_count(target.width(), target.height());
    let prior = prior_score * 255.0;
    let mut total = prior * prior * samples;
    total -= squared_error_on(target, before, lines) as f64;
    total += squared_error_on(target, after, lines) as f64;

    // Float drift can leave a tiny negative total when the edit is a perfect match.
    (total.max(0.0) / samples).sqrt() / 255.0
}
