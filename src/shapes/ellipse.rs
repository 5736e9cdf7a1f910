use rand::Rng;

use super::{Geometry, ShapeDescription, ShapeKind, random_vertex};
use crate::{
    foundation::core::{Bounds, Vertex},
    geometry::scanline::{Scanline, ellipse_scanlines},
};

/// Largest radius a freshly created ellipse can have.
const MAX_INITIAL_RADIUS: i32 = 32;

/// Axis-aligned ellipse. Control points are the center and the `(rx, ry)` radii.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ellipse {
    bounds: Bounds,
    // [center, radii]
    points: [Vertex; 2],
}

fn clamp_radii(r: Vertex, bounds: Bounds) -> Vertex {
    Vertex::new(r.x.clamp(1, bounds.x.max(1)), r.y.clamp(1, bounds.y.max(1)))
}

impl Ellipse {
    pub fn new(bounds: Bounds, center: Vertex, rx: i32, ry: i32) -> Self {
        Self {
            bounds,
            points: [center.clamped(bounds), clamp_radii(Vertex::new(rx, ry), bounds)],
        }
    }

    pub fn random<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let center = random_vertex(bounds, rng);
        let rx = rng.random_range(1..=MAX_INITIAL_RADIUS);
        let ry = rng.random_range(1..=MAX_INITIAL_RADIUS);
        Self::new(bounds, center, rx, ry)
    }

    pub fn center(&self) -> Vertex {
        self.points[0]
    }

    pub fn radii(&self) -> (i32, i32) {
        (self.points[1].x, self.points[1].y)
    }
}

impl Geometry for Ellipse {
    const KIND: ShapeKind = ShapeKind::Ellipse;

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn vertices(&self) -> &[Vertex] {
        &self.points
    }

    fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.points
    }

    fn clamp_vertex(&self, index: usize, v: Vertex) -> Vertex {
        if index == 1 {
            clamp_radii(v, self.bounds)
        } else {
            v.clamped(self.bounds)
        }
    }

    fn rasterize(&self) -> Vec<Scanline> {
        let c = self.center();
        let (rx, ry) = self.radii();
        ellipse_scanlines(c.x, c.y, rx, ry, self.bounds)
    }

    fn describe(&self) -> ShapeDescription {
        let c = self.center();
        let (rx, ry) = self.radii();
        ShapeDescription::Ellipse {
            cx: c.x,
            cy: c.y,
            rx,
            ry,
        }
    }
}
