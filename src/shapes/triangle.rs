use rand::Rng;

use super::{Geometry, ShapeDescription, ShapeKind, random_vertex};
use crate::{
    foundation::core::{Bounds, Vertex},
    geometry::scanline::{Scanline, polygon_scanlines},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    bounds: Bounds,
    points: [Vertex; 3],
}

impl Triangle {
    pub fn new(bounds: Bounds, points: [Vertex; 3]) -> Self {
        Self {
            bounds,
            points: points.map(|p| p.clamped(bounds)),
        }
    }

    pub fn random<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let points = [
            random_vertex(bounds, rng),
            random_vertex(bounds, rng),
            random_vertex(bounds, rng),
        ];
        Self { bounds, points }
    }
}

impl Geometry for Triangle {
    const KIND: ShapeKind = ShapeKind::Triangle;

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn vertices(&self) -> &[Vertex] {
        &self.points
    }

    fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.points
    }

    fn rasterize(&self) -> Vec<Scanline> {
        polygon_scanlines(&self.points.map(Vertex::to_point), self.bounds)
    }

    fn describe(&self) -> ShapeDescription {
        ShapeDescription::Polygon {
            points: self.points.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_its_vertices() {
        let t = Triangle::new(
            Bounds::new(20, 20),
            [Vertex::new(2, 3), Vertex::new(17, 6), Vertex::new(8, 15)],
        );
        let lines = t.rasterize();
        for v in t.vertices() {
            assert!(
                lines.iter().any(|s| s.contains(v.x as u32, v.y as u32)),
                "{v:?} not covered"
            );
        }
    }

    #[test]
    fn collinear_points_still_rasterize() {
        let t = Triangle::new(
            Bounds::new(9, 9),
            [Vertex::new(1, 1), Vertex::new(4, 4), Vertex::new(7, 7)],
        );
        assert_eq!(t.rasterize().len(), 7);
    }
}
