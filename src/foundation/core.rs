pub use kurbo::Point;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb` form, alpha is carried separately by callers.
    pub fn hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Integer control point in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

impl Vertex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn clamped(self, bounds: Bounds) -> Self {
        Self {
            x: self.x.clamp(0, bounds.x),
            y: self.y.clamp(0, bounds.y),
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Largest legal coordinate on each axis (zero-based, inclusive).
///
/// A `width x height` canvas has bounds `(width - 1, height - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn for_canvas(width: u32, height: u32) -> Self {
        let max = |v: u32| i32::try_from(v.saturating_sub(1)).unwrap_or(i32::MAX);
        Self {
            x: max(width),
            y: max(height),
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(self, v: Vertex) -> bool {
        (0..=self.x).contains(&v.x) && (0..=self.y).contains(&v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_for_canvas_are_zero_based() {
        let b = Bounds::for_canvas(10, 4);
        assert_eq!(b, Bounds::new(9, 3));
        assert!(b.contains(Vertex::new(9, 3)));
        assert!(!b.contains(Vertex::new(10, 3)));
        assert!(!b.contains(Vertex::new(0, -1)));
    }

    #[test]
    fn vertex_clamp_stays_in_bounds() {
        let b = Bounds::new(5, 5);
        assert_eq!(Vertex::new(-3, 9).clamped(b), Vertex::new(0, 5));
        assert_eq!(Vertex::new(2, 3).clamped(b), Vertex::new(2, 3));
    }

    #[test]
    fn hex_rgb_ignores_alpha() {
        assert_eq!(Rgba8::new(255, 0, 16, 3).hex_rgb(), "#ff0010");
    }
}
