//! # Render Export
//!
//! The crate draws nothing itself. [`RigInstances`] turns the current rig and
//! its display flags into plain-old-data instance arrays that a host renderer
//! can upload directly.

pub mod instances;

pub use instances::{
    HandleInstance, RigInstances, BOX_COLOR, BOX_GRABBED_COLOR, HANDLE_COLOR, HANDLE_GRABBED_COLOR, WIRE_COLOR,
};
