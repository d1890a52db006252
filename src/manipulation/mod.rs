//! # Manipulation
//!
//! Scale limits, the grab session and the solver that converts pointer
//! motion into target rotation or uniform scaling.

pub mod clamp;
pub mod session;
pub mod solver;

pub use clamp::{clamp_scale, ScaleLimits};
pub use session::{ManipulationKind, ManipulationSession};
pub use solver::ManipulationSolver;
