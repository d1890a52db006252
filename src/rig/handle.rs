//! Handle types shared by the builder, classifier, solver and visibility.

use cgmath::{Quaternion, Vector3};

use crate::math::CardinalAxis;

/// Opaque identity of a pickable rig object.
///
/// Ids are unique per rig generation: a rebuild hands out fresh ids, so
/// anything still holding an id from the previous rig no longer classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitObjectId(pub u64);

/// Number of corner (scale) handles
pub const CORNER_COUNT: usize = 8;
/// Number of edge-midpoint (rotation) handles
pub const EDGE_COUNT: usize = 12;

/// What a handle does when grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Corner handle, drives uniform scaling
    Corner,
    /// Edge-midpoint handle, drives rotation about the axis the edge runs along
    Edge(CardinalAxis),
}

/// Semantic reference to one handle of the current rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRef {
    Corner(usize),
    Edge(usize),
}

impl HandleRef {
    pub fn is_corner(&self) -> bool {
        matches!(self, HandleRef::Corner(_))
    }

    pub fn index(&self) -> usize {
        match *self {
            HandleRef::Corner(i) | HandleRef::Edge(i) => i,
        }
    }
}

/// A grabbable point of the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HitObjectId,
    pub kind: HandleKind,
    /// Index within its collection (0..8 for corners, 0..12 for edges)
    pub index: usize,
    /// Position in the rig frame, refreshed with the target's scale
    pub local_position: Vector3<f32>,
    /// Position in world space, refreshed every tick
    pub world_position: Vector3<f32>,
    /// Visual orientation in the rig frame. For edges, local up runs along the
    /// edge axis and local X/Z point away from the box.
    pub orientation: Quaternion<f32>,
    /// Edge handles on the flattened axis are hidden in every state
    pub flattened: bool,
}

impl Handle {
    pub fn axis(&self) -> Option<CardinalAxis> {
        match self.kind {
            HandleKind::Corner => None,
            HandleKind::Edge(axis) => Some(axis),
        }
    }

    pub fn handle_ref(&self) -> HandleRef {
        match self.kind {
            HandleKind::Corner => HandleRef::Corner(self.index),
            HandleKind::Edge(_) => HandleRef::Edge(self.index),
        }
    }
}
