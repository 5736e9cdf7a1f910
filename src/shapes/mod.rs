//! Shape variants the search can place.
//!
//! The set is closed: [`Shape`] is an enum over every supported geometry.
//! Variants share one crate-internal contract for creation, mutation and
//! rasterization, so callers only ever match on [`Shape`] or use its methods.

mod cubic;
mod ellipse;
mod rect;
mod triangle;

use std::{fmt, str::FromStr};

use rand::Rng;

pub use cubic::Cubic;
pub use ellipse::Ellipse;
pub use rect::Rect;
pub use triangle::Triangle;

use crate::{
    foundation::{
        core::{Bounds, Vertex},
        error::{SnapError, SnapResult},
    },
    geometry::scanline::Scanline,
};

/// Largest per-axis offset applied by a single mutation.
pub const MUTATION_RANGE: i32 = 15;

/// Stroke width used for curves when none is configured.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Rect,
    Triangle,
    Ellipse,
    Cubic,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rect,
        ShapeKind::Triangle,
        ShapeKind::Ellipse,
        ShapeKind::Cubic,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Rect => "Rect",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Cubic => "Cubic",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ShapeKind {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| SnapError::unknown_shape_kind(s))
    }
}

/// Parse a non-empty allow-list of shape tags.
pub fn parse_kinds<S: AsRef<str>>(tags: &[S]) -> SnapResult<Vec<ShapeKind>> {
    if tags.is_empty() {
        return Err(SnapError::invalid_configuration(
            "shape allow-list must not be empty",
        ));
    }
    tags.iter().map(|t| t.as_ref().parse()).collect()
}

/// Variant-tagged geometric description for document emission. Carries no color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Polygon {
        points: Vec<Vertex>,
    },
    Ellipse {
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
    },
    Path {
        d: String,
        stroke_width: f64,
    },
}

/// Contract every shape variant fulfils.
pub(crate) trait Geometry: Clone {
    const KIND: ShapeKind;

    fn bounds(&self) -> Bounds;

    fn vertices(&self) -> &[Vertex];

    fn vertices_mut(&mut self) -> &mut [Vertex];

    fn rasterize(&self) -> Vec<Scanline>;

    fn describe(&self) -> ShapeDescription;

    /// Legal position for control point `index`.
    fn clamp_vertex(&self, _index: usize, v: Vertex) -> Vertex {
        v.clamped(self.bounds())
    }

    /// Move one control point by a bounded random offset.
    ///
    /// The offset is never zero and is retried with the opposite sign when
    /// clamping would cancel it, so the point changes unless the canvas leaves
    /// it no room at all.
    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let index = rng.random_range(0..self.vertices().len());
        let old = self.vertices()[index];
        let (dx, dy) = loop {
            let dx = rng.random_range(-MUTATION_RANGE..=MUTATION_RANGE);
            let dy = rng.random_range(-MUTATION_RANGE..=MUTATION_RANGE);
            if dx != 0 || dy != 0 {
                break (dx, dy);
            }
        };
        let mut next = self.clamp_vertex(index, old.offset(dx, dy));
        if next == old {
            next = self.clamp_vertex(index, old.offset(-dx, -dy));
        }
        self.vertices_mut()[index] = next;
    }
}

pub(crate) fn random_vertex<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Vertex {
    Vertex::new(
        rng.random_range(0..=bounds.x.max(0)),
        rng.random_range(0..=bounds.y.max(0)),
    )
}

pub(crate) fn jittered<R: Rng + ?Sized>(anchor: Vertex, bounds: Bounds, rng: &mut R) -> Vertex {
    anchor
        .offset(
            rng.random_range(-MUTATION_RANGE..=MUTATION_RANGE),
            rng.random_range(-MUTATION_RANGE..=MUTATION_RANGE),
        )
        .clamped(bounds)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    Rect(Rect),
    Triangle(Triangle),
    Ellipse(Ellipse),
    Cubic(Cubic),
}

macro_rules! dispatch {
    ($shape:expr, $g:ident => $body:expr) => {
        match $shape {
            Shape::Rect($g) => $body,
            Shape::Triangle($g) => $body,
            Shape::Ellipse($g) => $body,
            Shape::Cubic($g) => $body,
        }
    };
}

impl Shape {
    /// New shape of `kind` with control points drawn within `bounds`.
    pub fn random<R: Rng + ?Sized>(
        kind: ShapeKind,
        bounds: Bounds,
        stroke_width: f64,
        rng: &mut R,
    ) -> Self {
        match kind {
            ShapeKind::Rect => Shape::Rect(Rect::random(bounds, rng)),
            ShapeKind::Triangle => Shape::Triangle(Triangle::random(bounds, rng)),
            ShapeKind::Ellipse => Shape::Ellipse(Ellipse::random(bounds, rng)),
            ShapeKind::Cubic => Shape::Cubic(Cubic::random(bounds, stroke_width, rng)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        fn kind_of<G: Geometry>(_: &G) -> ShapeKind {
            G::KIND
        }
        dispatch!(self, g => kind_of(g))
    }

    pub fn bounds(&self) -> Bounds {
        dispatch!(self, g => g.bounds())
    }

    pub fn vertices(&self) -> &[Vertex] {
        dispatch!(self, g => g.vertices())
    }

    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        dispatch!(self, g => g.mutate(rng))
    }

    pub fn rasterize(&self) -> Vec<Scanline> {
        dispatch!(self, g => g.rasterize())
    }

    pub fn describe(&self) -> ShapeDescription {
        dispatch!(self, g => g.describe())
    }
}

/// Builds random shapes from a validated allow-list.
#[derive(Clone, Debug)]
pub struct ShapeFactory {
    kinds: Vec<ShapeKind>,
    bounds: Bounds,
    stroke_width: f64,
}

impl ShapeFactory {
    pub fn new<S: AsRef<str>>(tags: &[S], bounds: Bounds, stroke_width: f64) -> SnapResult<Self> {
        let kinds = parse_kinds(tags)?;
        if !stroke_width.is_finite() || stroke_width <= 0.0 {
            return Err(SnapError::invalid_configuration(
                "stroke width must be a positive number",
            ));
        }
        Ok(Self {
            kinds,
            bounds,
            stroke_width,
        })
    }

    pub fn kinds(&self) -> &[ShapeKind] {
        &self.kinds
    }

    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        let kind = self.kinds[rng.random_range(0..self.kinds.len())];
        Shape::random(kind, self.bounds, self.stroke_width, rng)
    }
}

/// One random shape drawn from `tags`, failing on tags this crate does not know.
pub fn random_shape_of<S: AsRef<str>, R: Rng + ?Sized>(
    tags: &[S],
    bounds: Bounds,
    rng: &mut R,
) -> SnapResult<Shape> {
    Ok(ShapeFactory::new(tags, bounds, DEFAULT_STROKE_WIDTH)?.create(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn differing(a: &[Vertex], b: &[Vertex]) -> usize {
        a.iter().zip(b).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn tags_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.tag().parse::<ShapeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_tag_fails() {
        let mut rng = Pcg32::seed_from_u64(1);
        let err = random_shape_of(&["Rhombus"], Bounds::new(9, 9), &mut rng).unwrap_err();
        assert!(matches!(err, SnapError::UnknownShapeKind(ref t) if t == "Rhombus"));
    }

    #[test]
    fn empty_allow_list_is_invalid() {
        let err = parse_kinds::<&str>(&[]).unwrap_err();
        assert!(matches!(err, SnapError::InvalidConfiguration(_)));
    }

    #[test]
    fn factory_picks_from_allow_list() {
        let mut rng = Pcg32::seed_from_u64(2);
        let shape = random_shape_of(&["Rect"], Bounds::new(9, 9), &mut rng).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rect);

        let factory = ShapeFactory::new(&["Triangle", "Cubic"], Bounds::new(50, 50), 2.0).unwrap();
        for _ in 0..50 {
            let kind = factory.create(&mut rng).kind();
            assert!(kind == ShapeKind::Triangle || kind == ShapeKind::Cubic);
        }
    }

    #[test]
    fn factory_rejects_bad_stroke_width() {
        assert!(ShapeFactory::new(&["Cubic"], Bounds::new(5, 5), 0.0).is_err());
        assert!(ShapeFactory::new(&["Cubic"], Bounds::new(5, 5), f64::NAN).is_err());
    }

    #[test]
    fn mutation_changes_exactly_one_point_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Bounds::new(40, 25);
        for kind in ShapeKind::ALL {
            let mut shape = Shape::random(kind, bounds, 1.0, &mut rng);
            for _ in 0..200 {
                let before = shape.vertices().to_vec();
                shape.mutate(&mut rng);
                assert_eq!(differing(&before, shape.vertices()), 1, "{kind}");
                assert!(shape.vertices().iter().all(|v| bounds.contains(*v)), "{kind}");
            }
        }
    }

    #[test]
    fn clone_is_independent() {
        let mut rng = Pcg32::seed_from_u64(4);
        for kind in ShapeKind::ALL {
            let original = Shape::random(kind, Bounds::new(30, 30), 1.0, &mut rng);
            let snapshot = original.vertices().to_vec();
            let mut copy = original.clone();
            for _ in 0..10 {
                copy.mutate(&mut rng);
            }
            assert_eq!(original.vertices(), snapshot.as_slice());
            assert_ne!(copy.vertices(), original.vertices());
        }
    }

    #[test]
    fn rasterized_spans_stay_on_canvas() {
        let mut rng = Pcg32::seed_from_u64(5);
        let bounds = Bounds::new(19, 11);
        for kind in ShapeKind::ALL {
            for _ in 0..100 {
                let mut shape = Shape::random(kind, bounds, 3.0, &mut rng);
                shape.mutate(&mut rng);
                let lines = shape.rasterize();
                for pair in lines.windows(2) {
                    assert!(pair[0].y < pair[1].y);
                }
                for s in &lines {
                    assert!(s.x1 <= s.x2);
                    assert!(s.x2 <= 19 && s.y <= 11);
                }
            }
        }
    }
}
