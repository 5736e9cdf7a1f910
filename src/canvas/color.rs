use crate::{
    canvas::{buffer::Raster, composite::blend_channel},
    foundation::{
        core::Rgba8,
        error::{SnapError, SnapResult},
    },
    geometry::scanline::Scanline,
};

/// Mean RGB of the whole image, rounded per channel, fully opaque.
pub fn background_color(image: &Raster) -> Rgba8 {
    let mut sums = [0u64; 3];
    for px in image.data().chunks_exact(4) {
        for (sum, &v) in sums.iter_mut().zip(px) {
            *sum += u64::from(v);
        }
    }
    let n = f64::from(image.width()) * f64::from(image.height());
    let mean = |sum: u64| ((sum as f64) / n).round().clamp(0.0, 255.0) as u8;
    Rgba8::opaque(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}

/// Sum of squared errors on one channel if `c` were blended at `alpha` over `current`.
fn channel_error(
    target: &Raster,
    current: &Raster,
    lines: &[Scanline],
    ch: usize,
    c: u8,
    alpha: u8,
) -> u64 {
    let mut err = 0u64;
    for s in lines {
        let t_row = target.row_span(s.y, s.x1, s.x2);
        let c_row = current.row_span(s.y, s.x1, s.x2);
        for (t, u) in t_row.chunks_exact(4).zip(c_row.chunks_exact(4)) {
            let d = i64::from(t[ch]) - i64::from(blend_channel(c, u[ch], alpha));
            err += (d * d) as u64;
        }
    }
    err
}

/// Half-width of the candidate window: two steps of `c` that move the blended output by one.
fn search_radius(alpha: u8) -> u8 {
    let step = 256u32.div_ceil(u32::from(alpha) + 1);
    (2 * step).clamp(2, 255) as u8
}

/// Walk from `start` to a value no candidate within the window around it beats.
fn refine_channel(
    target: &Raster,
    current: &Raster,
    lines: &[Scanline],
    ch: usize,
    alpha: u8,
    start: u8,
) -> u8 {
    let radius = search_radius(alpha);
    let mut best = start;
    let mut best_err = channel_error(target, current, lines, ch, best, alpha);
    loop {
        let center = best;
        for c in center.saturating_sub(radius)..=center.saturating_add(radius) {
            let err = channel_error(target, current, lines, ch, c, alpha);
            if err < best_err {
                best = c;
                best_err = err;
            }
        }
        if best == center {
            return best;
        }
    }
}

/// Color that, blended at `alpha` over `current`, best matches `target` on `lines`.
///
/// With the blend `(c*(alpha+1) + u*(255-alpha)) / 256`, the continuous
/// least-squares optimum per channel is `mean(u + (t - u) * 256 / (alpha + 1))`.
/// The blend floors its result, so the integer error is jagged in `c`. The
/// rounded optimum is the starting point of a local integer search that stops
/// once no candidate within two output steps improves on it.
pub fn scanline_color(
    target: &Raster,
    current: &Raster,
    lines: &[Scanline],
    alpha: u8,
) -> SnapResult<Rgba8> {
    let weight = i64::from(alpha) + 1;
    let mut totals = [0i64; 3];
    let mut pixels = 0i64;

    for s in lines {
        let t_row = target.row_span(s.y, s.x1, s.x2);
        let c_row = current.row_span(s.y, s.x1, s.x2);
        for (t, c) in t_row.chunks_exact(4).zip(c_row.chunks_exact(4)) {
            for ch in 0..3 {
                let t = i64::from(t[ch]);
                let u = i64::from(c[ch]);
                totals[ch] += (t - u) * 256 + u * weight;
            }
            pixels += 1;
        }
    }

    if pixels == 0 {
        return Err(SnapError::EmptyScanlineSet);
    }

    let denom = (pixels * weight) as f64;
    let channel = |ch: usize| {
        let start = ((totals[ch] as f64) / denom).round().clamp(0.0, 255.0) as u8;
        refine_channel(target, current, lines, ch, alpha, start)
    };
    Ok(Rgba8::new(channel(0), channel(1), channel(2), alpha))
}
