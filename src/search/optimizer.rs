//! Hill-climbing search that commits one shape per step.
//!
//! Each step runs `amountOfAttempts` independent local searches from the same
//! committed canvas, keeps the lowest-scoring attempt, and draws it onto the
//! canvas. Candidates are scored on a scratch copy of the canvas that is
//! restored span by span after every evaluation, so one evaluation costs time
//! proportional to the candidate's footprint.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::{
    canvas::{
        buffer::Raster,
        color::{background_color, scanline_color},
        composite::{draw, restore},
        difference::{difference_full, difference_partial},
    },
    foundation::{core::Rgba8, error::SnapResult},
    geometry::scanline::pixel_count,
    search::config::SnapConfig,
    shapes::{Shape, ShapeDescription, ShapeFactory},
    svg,
};

/// Result of scoring one candidate shape against the committed canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Energy {
    /// Best fill for the footprint. `None` when the shape covers no pixel.
    pub color: Option<Rgba8>,
    pub score: f64,
}

/// Score `shape` as if it were drawn over `current`.
///
/// `scratch` must equal `current` on entry and is left equal to it on return.
/// A shape with an empty footprint changes nothing and keeps `prior_score`.
pub fn energy(
    target: &Raster,
    current: &Raster,
    scratch: &mut Raster,
    shape: &Shape,
    alpha: u8,
    prior_score: f64,
) -> Energy {
    let lines = shape.rasterize();
    let Ok(color) = scanline_color(target, current, &lines, alpha) else {
        return Energy {
            color: None,
            score: prior_score,
        };
    };

    draw(scratch, color, &lines);
    let score = difference_partial(target, current, scratch, prior_score, &lines);
    restore(scratch, current, &lines);

    Energy {
        color: Some(color),
        score,
    }
}

/// Best candidate found by one local search.
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub shape: Shape,
    pub color: Option<Rgba8>,
    pub score: f64,
    /// Mutation rounds run before the budget or patience ran out.
    pub rounds: u32,
}

/// A shape drawn onto the canvas, with the score right after drawing it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommittedShape {
    pub shape: Shape,
    pub color: Rgba8,
    pub score: f64,
}

impl CommittedShape {
    pub fn description(&self) -> ShapeDescription {
        self.shape.describe()
    }
}

/// Outcome of one commit step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Position of the committed shape in [`Shapesnap::shapes`].
    pub index: usize,
    /// Final score of every attempt, in the order they ran.
    pub attempt_scores: Vec<f64>,
    /// Index into `attempt_scores` of the committed attempt.
    pub selected: usize,
    /// Running difference after the commit.
    pub score: f64,
}

/// Index of the lowest score. Ties go to the earliest attempt.
fn select_best(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score < scores[best] {
            best = i;
        }
    }
    best
}

/// Approximation of one target image.
#[derive(Debug)]
pub struct Shapesnap {
    config: SnapConfig,
    target: Raster,
    current: Raster,
    background: Rgba8,
    difference: f64,
    factory: ShapeFactory,
    rng: Pcg32,
    shapes: Vec<CommittedShape>,
}

impl Shapesnap {
    /// Validate `config` and fill the canvas with the background color.
    #[tracing::instrument(skip(target), fields(width = target.width(), height = target.height()))]
    pub fn new(target: Raster, config: SnapConfig) -> SnapResult<Self> {
        config.validate()?;
        let factory = ShapeFactory::new(&config.shape_types, target.bounds(), config.stroke_width)?;

        let background = config
            .background_color
            .unwrap_or_else(|| background_color(&target));
        let current = Raster::filled(target.width(), target.height(), background)?;
        let difference = difference_full(&target, &current);
        tracing::debug!(?background, difference, "canvas initialized");

        Ok(Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            target,
            current,
            background,
            difference,
            factory,
            shapes: Vec::new(),
        })
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn target(&self) -> &Raster {
        &self.target
    }

    /// The committed canvas.
    pub fn image(&self) -> &Raster {
        &self.current
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Running normalized RMS difference between the canvas and the target.
    pub fn difference(&self) -> f64 {
        self.difference
    }

    pub fn shapes(&self) -> &[CommittedShape] {
        &self.shapes
    }

    pub fn is_finished(&self) -> bool {
        self.shapes.len() >= self.config.amount_of_shapes as usize
    }

    pub fn svg(&self) -> String {
        svg::document(
            self.target.width(),
            self.target.height(),
            self.background,
            &self.shapes,
        )
    }

    /// Run attempts from the current canvas and commit the best one.
    ///
    /// Always commits, even when no attempt improves the score.
    #[tracing::instrument(skip(self), fields(index = self.shapes.len()))]
    pub fn step(&mut self) -> StepReport {
        let mut scratch = self.current.clone();
        let mut attempts = Vec::with_capacity(self.config.amount_of_attempts as usize);
        for i in 0..self.config.amount_of_attempts {
            let attempt = self.search(&mut scratch);
            tracing::debug!(
                attempt = i,
                kind = %attempt.shape.kind(),
                score = attempt.score,
                rounds = attempt.rounds,
                "attempt finished"
            );
            attempts.push(attempt);
        }

        let attempt_scores: Vec<f64> = attempts.iter().map(|a| a.score).collect();
        let selected = select_best(&attempt_scores);
        let index = self.shapes.len();
        let winner = attempts.swap_remove(selected);
        self.commit(winner);

        StepReport {
            index,
            attempt_scores,
            selected,
            score: self.difference,
        }
    }

    /// Step until the shape budget is spent. Returns the final difference.
    pub fn run(&mut self) -> f64 {
        while !self.is_finished() {
            self.step();
        }
        self.difference
    }

    fn search(&mut self, scratch: &mut Raster) -> Attempt {
        let alpha = self.config.alpha;
        let mut shape = self.factory.create(&mut self.rng);
        let mut best = energy(
            &self.target,
            &self.current,
            scratch,
            &shape,
            alpha,
            self.difference,
        );

        let mut rounds = 0;
        let mut stale = 0;
        while rounds < self.config.amount_of_mutations && stale < self.config.patience {
            rounds += 1;
            let mut candidate = shape.clone();
            candidate.mutate(&mut self.rng);
            let e = energy(
                &self.target,
                &self.current,
                scratch,
                &candidate,
                alpha,
                self.difference,
            );
            if e.score < best.score {
                shape = candidate;
                best = e;
                stale = 0;
            } else {
                stale += 1;
            }
        }

        Attempt {
            shape,
            color: best.color,
            score: best.score,
            rounds,
        }
    }

    fn commit(&mut self, attempt: Attempt) {
        let lines = attempt.shape.rasterize();
        let color = attempt.color.unwrap_or_else(|| {
            tracing::debug!("committing a shape with an empty footprint");
            Rgba8::new(0, 0, 0, self.config.alpha)
        });
        draw(&mut self.current, color, &lines);
        self.difference = attempt.score;

        tracing::info!(
            index = self.shapes.len(),
            kind = %attempt.shape.kind(),
            pixels = pixel_count(&lines),
            score = self.difference,
            "shape committed"
        );
        self.shapes.push(CommittedShape {
            shape: attempt.shape,
            color,
            score: self.difference,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::{Bounds, Vertex},
        shapes::Rect,
    };

    #[test]
    fn select_best_prefers_first_on_ties() {
        assert_eq!(select_best(&[0.5, 0.2, 0.2, 0.9]), 1);
        assert_eq!(select_best(&[0.3]), 0);
        assert_eq!(select_best(&[0.3, 0.3]), 0);
    }

    #[test]
    fn energy_leaves_scratch_untouched() {
        let target = Raster::filled(6, 6, Rgba8::opaque(200, 10, 10)).unwrap();
        let current = Raster::filled(6, 6, Rgba8::opaque(0, 0, 0)).unwrap();
        let mut scratch = current.clone();
        let shape = Shape::Rect(Rect::new(Bounds::new(5, 5), Vertex::new(1, 1), Vertex::new(3, 4)));
        let prior = difference_full(&target, &current);

        let e = energy(&target, &current, &mut scratch, &shape, 255, prior);
        assert_eq!(scratch, current);
        assert_eq!(e.color, Some(Rgba8::new(200, 10, 10, 255)));
        assert!(e.score < prior);
    }

    #[test]
    fn energy_matches_full_rescore() {
        let target = Raster::filled(7, 5, Rgba8::opaque(90, 140, 30)).unwrap();
        let current = Raster::filled(7, 5, Rgba8::opaque(10, 20, 250)).unwrap();
        let mut scratch = current.clone();
        let shape = Shape::Rect(Rect::new(Bounds::new(6, 4), Vertex::new(0, 2), Vertex::new(5, 4)));
        let prior = difference_full(&target, &current);

        let e = energy(&target, &current, &mut scratch, &shape, 100, prior);
        let mut drawn = current.clone();
        draw(&mut drawn, e.color.unwrap(), &shape.rasterize());
        assert!((e.score - difference_full(&target, &drawn)).abs() < 1e-9);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let target = Raster::filled(2, 2, Rgba8::opaque(0, 0, 0)).unwrap();
        let cfg = SnapConfig {
            amount_of_attempts: 0,
            ..SnapConfig::default()
        };
        assert!(Shapesnap::new(target, cfg).is_err());
    }

    #[test]
    fn step_commits_even_without_improvement() {
        let target = Raster::filled(3, 3, Rgba8::opaque(40, 40, 40)).unwrap();
        let cfg = SnapConfig {
            amount_of_shapes: 2,
            amount_of_attempts: 2,
            amount_of_mutations: 5,
            patience: 5,
            ..SnapConfig::default()
        };
        let mut snap = Shapesnap::new(target, cfg).unwrap();
        assert_eq!(snap.difference(), 0.0);

        let report = snap.step();
        assert_eq!(report.index, 0);
        assert_eq!(report.attempt_scores.len(), 2);
        assert_eq!(snap.shapes().len(), 1);
        assert!(!snap.is_finished());

        snap.run();
        assert!(snap.is_finished());
        assert_eq!(snap.shapes().len(), 2);
    }
}
