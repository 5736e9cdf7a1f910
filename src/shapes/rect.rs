use rand::Rng;

use super::{Geometry, ShapeDescription, ShapeKind, random_vertex};
use crate::{
    foundation::core::{Bounds, Vertex},
    geometry::scanline::{Scanline, rect_scanlines},
};

/// Axis-aligned rectangle spanned by two opposite corners, inclusive of both.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    bounds: Bounds,
    corners: [Vertex; 2],
}

impl Rect {
    pub fn new(bounds: Bounds, a: Vertex, b: Vertex) -> Self {
        Self {
            bounds,
            corners: [a.clamped(bounds), b.clamped(bounds)],
        }
    }

    pub fn random<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let a = random_vertex(bounds, rng);
        let b = random_vertex(bounds, rng);
        Self::new(bounds, a, b)
    }

    pub fn corners(&self) -> [Vertex; 2] {
        self.corners
    }

    fn extent(&self) -> (i32, i32, i32, i32) {
        let [a, b] = self.corners;
        (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }
}

impl Geometry for Rect {
    const KIND: ShapeKind = ShapeKind::Rect;

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn vertices(&self) -> &[Vertex] {
        &self.corners
    }

    fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.corners
    }

    fn rasterize(&self) -> Vec<Scanline> {
        let (x1, y1, x2, y2) = self.extent();
        rect_scanlines(x1, y1, x2, y2, self.bounds)
    }

    fn describe(&self) -> ShapeDescription {
        let (x1, y1, x2, y2) = self.extent();
        ShapeDescription::Rect {
            x: x1,
            y: y1,
            width: x2 - x1 + 1,
            height: y2 - y1 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::scanline::pixel_count;

    #[test]
    fn corners_in_any_order_cover_same_pixels() {
        let bounds = Bounds::new(9, 9);
        let a = Rect::new(bounds, Vertex::new(6, 1), Vertex::new(2, 4));
        let b = Rect::new(bounds, Vertex::new(2, 1), Vertex::new(6, 4));
        assert_eq!(a.rasterize(), b.rasterize());
        assert_eq!(pixel_count(&a.rasterize()), 5 * 4);
    }

    #[test]
    fn description_matches_footprint() {
        let r = Rect::new(Bounds::new(9, 9), Vertex::new(7, 8), Vertex::new(3, 2));
        assert_eq!(
            r.describe(),
            ShapeDescription::Rect {
                x: 3,
                y: 2,
                width: 5,
                height: 7
            }
        );
    }

    #[test]
    fn construction_clamps_corners() {
        let r = Rect::new(Bounds::new(4, 4), Vertex::new(-3, 2), Vertex::new(10, 9));
        assert_eq!(r.corners(), [Vertex::new(0, 2), Vertex::new(4, 4)]);
    }
}
