//! # Bounds Rig Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use bounds_rig::prelude::*;
//! ```

// Re-export the rig and its configuration
pub use crate::bounds_rig::{BoundsRig, Tether};
pub use crate::rig::{HandleRef, HitObjectId, RigConfig, WireframeShape};
pub use crate::visibility::{ActivationPolicy, RigDisplay, VisibilityState};

// Re-export geometry sources
pub use crate::bounds::{EmptyGeometry, FlattenMode, GeometryNode, GeometrySource, SceneGeometry};
pub use crate::math::{Aabb, BoundingVolume, CardinalAxis, Ray};
pub use crate::target::{Target, TargetTransform};

// Re-export input and events
pub use crate::events::RigEvent;
pub use crate::input::{Pointer, PointerEvent, PointerHit, PointerId, PointerKind, PointerPose, PointerQuery, SourceId};

pub use crate::error::{Result, RigError};
pub use crate::render::{HandleInstance, RigInstances};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Quaternion, Vector3, Zero};
