// src/lib.rs
//! Bounds Rig
//!
//! An interactive bounding-box manipulation rig: corner handles scale a
//! target uniformly about the opposite corner, edge handles rotate it about
//! one cardinal axis. The host owns rendering and input; the rig consumes
//! pointer events and a per-frame tick and writes the target's pose.

pub mod bounds;
pub mod bounds_rig;
pub mod error;
pub mod events;
pub mod input;
pub mod manipulation;
pub mod math;
pub mod prelude;
pub mod render;
pub mod rig;
pub mod target;
pub mod visibility;

// Re-export main types for convenience
pub use bounds_rig::{BoundsRig, Tether};
pub use error::{Result, RigError};
