//! # Rig
//!
//! The generated handle set around a target: configuration, handle types,
//! the [`RigBuilder`] that lays handles out, the [`HandleClassifier`] that
//! resolves hit ids and the [`RigPicker`] for ray-based picking.

pub mod builder;
pub mod classifier;
pub mod config;
pub mod handle;
pub mod layout;
pub mod picking;

pub use builder::RigBuilder;
pub use classifier::HandleClassifier;
pub use config::{RigConfig, WireframeShape};
pub use handle::{Handle, HandleKind, HandleRef, HitObjectId, CORNER_COUNT, EDGE_COUNT};
pub use layout::{flattened_edges, Rig, RigFrame, WireLink, EDGE_CORNERS};
pub use picking::{PickResult, RigPicker};
