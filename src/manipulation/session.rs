use cgmath::{InnerSpace, Rotation, Vector3};

use crate::events::RigEvent;
use crate::input::{PointerId, PointerPose, SourceId};
use crate::math::CardinalAxis;
use crate::rig::HandleRef;

/// Geometry recorded when a session starts, per handle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManipulationKind {
    /// Edge handle: rotate about one cardinal axis of the rig
    Rotate {
        axis: CardinalAxis,
        /// World-space rotation axis, fixed for the session
        world_axis: Vector3<f32>,
    },
    /// Corner handle: uniform scale pivoting about the opposite corner
    Scale {
        opposite_corner: Vector3<f32>,
        /// Unit direction from the opposite corner to the grabbed corner
        diagonal: Vector3<f32>,
        /// Projection of the initial grab point onto the diagonal
        initial_projection: f32,
    },
}

impl ManipulationKind {
    pub fn started_event(&self) -> RigEvent {
        match self {
            ManipulationKind::Rotate { .. } => RigEvent::RotateStarted,
            ManipulationKind::Scale { .. } => RigEvent::ScaleStarted,
        }
    }

    pub fn stopped_event(&self) -> RigEvent {
        match self {
            ManipulationKind::Rotate { .. } => RigEvent::RotateStopped,
            ManipulationKind::Scale { .. } => RigEvent::ScaleStopped,
        }
    }
}

/// The single active grab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulationSession {
    pub pointer: PointerId,
    pub source: SourceId,
    pub handle: HandleRef,
    /// Grab point in the pointer's own frame
    pub grab_point_local: Vector3<f32>,
    pub initial_grab_point: Vector3<f32>,
    /// Grab point as of the previous update, used for incremental rotation
    pub previous_grab_point: Vector3<f32>,
    pub current_grab_point: Vector3<f32>,
    pub initial_scale: Vector3<f32>,
    pub initial_position: Vector3<f32>,
    pub kind: ManipulationKind,
}

impl ManipulationSession {
    /// Grab point re-projected from the pointer's current pose
    pub fn grab_point_for(&self, pose: &PointerPose) -> Vector3<f32> {
        pose.rotation.rotate_vector(self.grab_point_local) + pose.position
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self.kind, ManipulationKind::Rotate { .. })
    }

    pub fn is_scale(&self) -> bool {
        matches!(self.kind, ManipulationKind::Scale { .. })
    }

    /// How far the grab point has travelled along the scale diagonal
    pub(crate) fn projection_on_diagonal(point: Vector3<f32>, opposite: Vector3<f32>, diagonal: Vector3<f32>) -> f32 {
        (point - opposite).dot(diagonal)
    }
}
