//! # Math Utilities
//!
//! Geometric building blocks shared by the rig: bounding volumes, rays and
//! the pivot-relative transform operations used during manipulation.

pub mod aabb;

pub use aabb::{Aabb, BoundingVolume, Ray};

use cgmath::{InnerSpace, Matrix3, Quaternion, Rad, Rotation, Rotation3, Vector3};

/// Squared-length threshold below which a direction is treated as zero
pub const EPSILON: f32 = 1e-8;

/// One of the three cardinal axes of the rig frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalAxis {
    X,
    Y,
    Z,
}

impl CardinalAxis {
    pub const ALL: [CardinalAxis; 3] = [CardinalAxis::X, CardinalAxis::Y, CardinalAxis::Z];

    pub fn index(self) -> usize {
        match self {
            CardinalAxis::X => 0,
            CardinalAxis::Y => 1,
            CardinalAxis::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        match self {
            CardinalAxis::X => Vector3::unit_x(),
            CardinalAxis::Y => Vector3::unit_y(),
            CardinalAxis::Z => Vector3::unit_z(),
        }
    }

    /// This axis expressed in a frame with the given orientation
    pub fn in_frame(self, rotation: Quaternion<f32>) -> Vector3<f32> {
        rotation.rotate_vector(self.unit())
    }
}

/// Rotates a position around a pivot point.
pub fn rotate_position_about_pivot(
    position: Vector3<f32>,
    pivot: Vector3<f32>,
    rotation: Quaternion<f32>,
) -> Vector3<f32> {
    pivot + rotation.rotate_vector(position - pivot)
}

/// Removes the component of `v` along `normal`.
///
/// `normal` does not need to be normalized. A zero normal returns `v` unchanged.
pub fn project_on_plane(v: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    let n2 = normal.magnitude2();
    if n2 < EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / n2)
}

/// Normalizes `v`, returning `None` for near-zero vectors instead of NaNs
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    if v.magnitude2() > EPSILON {
        Some(v.normalize())
    } else {
        None
    }
}

/// Shortest-arc rotation about `axis` that takes direction `from` onto `to`.
///
/// Both directions are projected onto the plane perpendicular to `axis` first,
/// so the result only ever turns about that axis. Returns `None` when either
/// projection vanishes (the point lies on the axis) or the axis is zero.
pub fn rotation_about_axis(
    axis: Vector3<f32>,
    from: Vector3<f32>,
    to: Vector3<f32>,
) -> Option<Quaternion<f32>> {
    let axis = try_normalize(axis)?;
    let from = try_normalize(project_on_plane(from, axis))?;
    let to = try_normalize(project_on_plane(to, axis))?;

    let angle = axis.dot(from.cross(to)).atan2(from.dot(to));
    Some(Quaternion::from_axis_angle(axis, Rad(angle)))
}

/// Rotation whose local X, Y and Z axes map onto the given orthonormal basis
pub fn rotation_from_basis(
    x: Vector3<f32>,
    y: Vector3<f32>,
    z: Vector3<f32>,
) -> Quaternion<f32> {
    Quaternion::from(Matrix3::from_cols(x, y, z)).normalize()
}

/// Divides each component by the matching one in `d`; zero divisors leave the component as is.
pub fn safe_div_element_wise(v: Vector3<f32>, d: Vector3<f32>) -> Vector3<f32> {
    let div = |a: f32, b: f32| if b != 0.0 { a / b } else { a };
    Vector3::new(div(v.x, d.x), div(v.y, d.y), div(v.z, d.z))
}
