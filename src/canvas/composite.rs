use crate::{
    canvas::buffer::Raster,
    foundation::core::Rgba8,
    geometry::scanline::Scanline,
};

/// Integer blend of channel `c` at opacity `alpha` over existing value `u`.
///
/// Weights sum to 256, so the result always fits in a `u8`.
#[inline]
pub fn blend_channel(c: u8, u: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(c) * (a + 1) + u32::from(u) * (255 - a)) >> 8) as u8
}

/// Blend `color` over one pixel; the canvas carries no transparency so alpha ends opaque.
#[inline]
pub fn over(dst: [u8; 4], color: Rgba8) -> [u8; 4] {
    [
        blend_channel(color.r, dst[0], color.a),
        blend_channel(color.g, dst[1], color.a),
        blend_channel(color.b, dst[2], color.a),
        255,
    ]
}

/// Composite `color` over every pixel covered by `lines`, in place.
pub fn draw(buffer: &mut Raster, color: Rgba8, lines: &[Scanline]) {
    for s in lines {
        for px in buffer.row_span_mut(s.y, s.x1, s.x2).chunks_exact_mut(4) {
            let out = over([px[0], px[1], px[2], px[3]], color);
            px.copy_from_slice(&out);
        }
    }
}

/// Copy the pixels under `lines` from `src` back into `dst`.
///
/// Resets a scratch buffer to the canvas in time proportional to the footprint.
pub fn restore(dst: &mut Raster, src: &Raster, lines: &[Scanline]) {
    debug_assert!(dst.same_size(src), "restore expects equally sized rasters");
    for s in lines {
        dst.row_span_mut(s.y, s.x1, s.x2)
            .copy_from_slice(src.row_span(s.y, s.x1, s.x2));
    }
}
