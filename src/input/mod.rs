//! # Pointer Input
//!
//! The rig consumes pointer state from the host: a pose per pointer, what the
//! pointer's ray or near-interaction query currently hits, and discrete
//! press/release/focus/source events. Every pointer carries a stable
//! [`PointerId`] and belongs to an input source identified by [`SourceId`].

use std::collections::HashMap;

use cgmath::{Quaternion, Vector3};

use crate::rig::HitObjectId;

/// Stable identity of a single pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// Identity of the input source (hand, controller) a pointer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

/// Whether a pointer interacts by touch/grab range or by ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Near,
    Far,
}

/// World-space pose of a pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl PointerPose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }
}

/// Result of the pointer's current ray or near-interaction query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Opaque identity of the object that was hit
    pub object: HitObjectId,
    /// World-space hit point
    pub point: Vector3<f32>,
}

/// Full state of a pointer at the moment of an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub source: SourceId,
    pub kind: PointerKind,
    pub pose: PointerPose,
    pub hit: Option<PointerHit>,
}

/// Discrete input events routed to the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A pointer pressed; its current hit decides what was grabbed
    Down(Pointer),
    /// A pointer released
    Up(PointerId),
    /// A pointer's focus moved. `on_rig` is true when the newly focused
    /// object belongs to the rig or its target.
    FocusChanged {
        pointer: PointerId,
        kind: PointerKind,
        on_rig: bool,
    },
    /// A pointer's focus left the rig
    FocusExit(PointerId),
    SourceDetected(SourceId),
    SourceLost(SourceId),
}

/// Per-tick lookup of live pointer poses.
///
/// The solver re-projects the grab point from the session pointer's pose
/// every tick; a pointer that no longer reports a pose leaves the target
/// untouched for that tick.
pub trait PointerQuery {
    fn pointer_pose(&self, id: PointerId) -> Option<PointerPose>;
}

impl PointerQuery for HashMap<PointerId, PointerPose> {
    fn pointer_pose(&self, id: PointerId) -> Option<PointerPose> {
        self.get(&id).copied()
    }
}

impl PointerQuery for Pointer {
    fn pointer_pose(&self, id: PointerId) -> Option<PointerPose> {
        (self.id == id).then_some(self.pose)
    }
}

/// A query that knows no pointers
pub struct NoPointers;

impl PointerQuery for NoPointers {
    fn pointer_pose(&self, _id: PointerId) -> Option<PointerPose> {
        None
    }
}
