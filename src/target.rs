//! # Manipulation Target
//!
//! The rig never owns the object it manipulates. Hosts expose their object
//! through the [`Target`] trait; [`TargetTransform`] is a plain pose that
//! implements it for headless use and tests.

use cgmath::{Matrix4, One, Quaternion, Vector3};

/// An externally owned object whose pose the rig reads and, during a
/// manipulation session, writes.
pub trait Target {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);

    fn rotation(&self) -> Quaternion<f32>;
    fn set_rotation(&mut self, rotation: Quaternion<f32>);

    fn local_scale(&self) -> Vector3<f32>;
    fn set_local_scale(&mut self, scale: Vector3<f32>);

    /// Move the target as part of a manipulation.
    ///
    /// Physics-backed targets override this to route the change through their
    /// rigid body instead of teleporting the transform.
    fn move_position(&mut self, position: Vector3<f32>) {
        self.set_position(position);
    }

    /// Rotate the target as part of a manipulation. See [`Target::move_position`].
    fn move_rotation(&mut self, rotation: Quaternion<f32>) {
        self.set_rotation(rotation);
    }

    /// Snapshot of the current pose
    fn pose(&self) -> TargetTransform {
        TargetTransform {
            position: self.position(),
            rotation: self.rotation(),
            scale: self.local_scale(),
        }
    }
}

/// Position, rotation and local scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl TargetTransform {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Identity rotation and unit scale at `position`
    pub fn at(position: Vector3<f32>) -> Self {
        Self::new(position, Quaternion::one(), Vector3::new(1.0, 1.0, 1.0))
    }

    /// Model matrix, composed as T * R * S
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

impl Default for TargetTransform {
    fn default() -> Self {
        Self::at(Vector3::new(0.0, 0.0, 0.0))
    }
}

impl Target for TargetTransform {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        self.rotation = rotation;
    }

    fn local_scale(&self) -> Vector3<f32> {
        self.scale
    }

    fn set_local_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3, Vector4};

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let pose = TargetTransform::new(
            Vector3::new(10.0, 0.0, 0.0),
            Quaternion::from_angle_z(Deg(90.0)),
            Vector3::new(2.0, 1.0, 1.0),
        );

        let p = pose.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);

        // (1,0,0) -> scaled (2,0,0) -> rotated (0,2,0) -> translated (10,2,0)
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn test_move_defaults_to_set() {
        let mut pose = TargetTransform::default();
        pose.move_position(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.pose(), pose);
    }
}
