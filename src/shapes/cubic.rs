use kurbo::CubicBez;
use rand::Rng;

use super::{Geometry, ShapeDescription, ShapeKind, jittered, random_vertex};
use crate::{
    foundation::core::{Bounds, Vertex},
    geometry::{bezier::cubic_scanlines, scanline::Scanline},
};

/// Stroked cubic Bezier curve. It has no fill: only the stroke is drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cubic {
    bounds: Bounds,
    points: [Vertex; 4],
    stroke_width: f64,
}

impl Cubic {
    pub fn new(bounds: Bounds, points: [Vertex; 4], stroke_width: f64) -> Self {
        Self {
            bounds,
            points: points.map(|p| p.clamped(bounds)),
            stroke_width,
        }
    }

    /// Curve whose control points all lie near one random anchor.
    pub fn random<R: Rng + ?Sized>(bounds: Bounds, stroke_width: f64, rng: &mut R) -> Self {
        let anchor = random_vertex(bounds, rng);
        let points = [
            anchor,
            jittered(anchor, bounds, rng),
            jittered(anchor, bounds, rng),
            jittered(anchor, bounds, rng),
        ];
        Self {
            bounds,
            points,
            stroke_width,
        }
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn curve(&self) -> CubicBez {
        let [p0, p1, p2, p3] = self.points.map(Vertex::to_point);
        CubicBez::new(p0, p1, p2, p3)
    }

    /// SVG path data `M x0,y0 C x1,y1 x2,y2 x3,y3`.
    pub fn path_data(&self) -> String {
        let [p0, p1, p2, p3] = self.points;
        format!(
            "M{},{} C{},{} {},{} {},{}",
            p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        )
    }
}

impl Geometry for Cubic {
    const KIND: ShapeKind = ShapeKind::Cubic;

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
        cubic_scanlines(self.curve(), self.stroke_width, self.bounds)
    }

    fn describe(&self) -> ShapeDescription {
        ShapeDescription::Path {
            d: self.path_data(),
            stroke_width: self.stroke_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn random_points_stay_near_anchor() {
        let mut rng = Pcg32::seed_from_u64(21);
        let bounds = Bounds::new(200, 200);
        for _ in 0..100 {
            let c = Cubic::random(bounds, 1.0, &mut rng);
            let anchor = c.vertices()[0];
            for p in &c.vertices()[1..] {
                assert!((p.x - anchor.x).abs() <= 15 && (p.y - anchor.y).abs() <= 15);
            }
        }
    }

    #[test]
    fn path_data_lists_all_points() {
        let c = Cubic::new(
            Bounds::new(50, 50),
            [Vertex::new(1, 2), Vertex::new(3, 4), Vertex::new(5, 6), Vertex::new(7, 8)],
            2.0,
        );
        assert_eq!(c.path_data(), "M1,2 C3,4 5,6 7,8");
        assert_eq!(
            c.describe(),
            ShapeDescription::Path {
                d: "M1,2 C3,4 5,6 7,8".to_owned(),
                stroke_width: 2.0
            }
        );
    }

    #[test]
    fn straight_curve_covers_its_row() {
        let c = Cubic::new(
            Bounds::new(20, 10),
            [Vertex::new(2, 5), Vertex::new(6, 5), Vertex::new(12, 5), Vertex::new(16, 5)],
            1.0,
        );
        let lines = c.rasterize();
        assert!(lines.iter().any(|s| s.y == 5 && s.x1 <= 2 && s.x2 >= 16));
    }
}
