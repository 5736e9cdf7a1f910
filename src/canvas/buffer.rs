use crate::foundation::{
    core::{Bounds, Rgba8},
    error::{SnapError, SnapResult},
};

/// Straight RGBA8 pixel buffer, row-major, four samples per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> SnapResult<Self> {
        if width == 0 || height == 0 {
            return Err(SnapError::invalid_configuration(
                "raster width/height must be > 0",
            ));
        }
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SnapError::invalid_configuration("raster size overflow"))?;
        if data.len() != expected_len {
            return Err(SnapError::invalid_configuration(format!(
                "raster expects {expected_len} rgba8 bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> SnapResult<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| SnapError::invalid_configuration("raster size overflow"))?;
        let data = color.channels().repeat(pixels);
        Self::from_rgba8(width, height, data)
    }

    pub fn from_image(img: &image::RgbaImage) -> SnapResult<Self> {
        Self::from_rgba8(img.width(), img.height(), img.as_raw().clone())
    }

    pub fn to_image(&self) -> SnapResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| SnapError::Other(anyhow::anyhow!("raster does not fit an RgbaImage")))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::for_canvas(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn same_size(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Sample `channel` (0..4) of pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: usize) -> u8 {
        self.data[self.offset(x, y) + channel]
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Bytes of the inclusive run `x1..=x2` on row `y`.
    #[inline]
    pub(crate) fn row_span(&self, y: u32, x1: u32, x2: u32) -> &[u8] {
        let start = self.offset(x1, y);
        let end = self.offset(x2, y) + 4;
        &self.data[start..end]
    }

    #[inline]
    pub(crate) fn row_span_mut(&mut self, y: u32, x1: u32, x2: u32) -> &mut [u8] {
        let start = self.offset(x1, y);
        let end = self.offset(x2, y) + 4;
        &mut self.data[start..end]
    }
}
