//! Shapesnap approximates a raster image with a sequence of translucent shapes.
//!
//! The public API is step-oriented:
//!
//! - Build a [`SnapConfig`] (or deserialize one from JSON)
//! - Create a [`Shapesnap`] from a target [`Raster`]
//! - Call [`Shapesnap::step`] once per shape, or [`Shapesnap::run`] for the whole budget
//! - Read the committed shapes, the canvas, or an SVG document back out
#![forbid(unsafe_code)]

/// RGBA8 buffers, color selection, compositing and scoring.
pub mod canvas;
pub mod foundation;
/// Scan conversion of shape outlines into pixel spans.
pub mod geometry;
/// Configuration and the hill-climbing optimizer.
pub mod search;
pub mod shapes;
pub mod svg;

pub use crate::canvas::buffer::Raster;
pub use crate::foundation::core::{Bounds, Point, Rgba8, Vertex};
pub use crate::foundation::error::{SnapError, SnapResult};
pub use crate::geometry::scanline::Scanline;
pub use crate::search::config::SnapConfig;
pub use crate::search::optimizer::{Attempt, CommittedShape, Energy, Shapesnap, StepReport, energy};
pub use crate::shapes::{Shape, ShapeDescription, ShapeFactory, ShapeKind, random_shape_of};
