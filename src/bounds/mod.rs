//! # Bounds
//!
//! Measuring a target: the [`GeometrySource`] providers a host injects, the
//! in-memory [`SceneGeometry`] hierarchy (optionally loaded from OBJ), and the
//! prioritized [`BoundsCalculator`].

pub mod calculator;
pub mod obj;
pub mod source;

pub use calculator::{BoundsCalculator, BoundsMethod, ComputedBounds, FlattenMode};
pub use source::{EmptyGeometry, GeometryNode, GeometrySource, SceneGeometry};
