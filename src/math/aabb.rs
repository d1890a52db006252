//! # Axis-Aligned Volumes
//!
//! Axis-aligned boxes in min/max form ([`Aabb`]) and in center/extents form
//! ([`BoundingVolume`]), plus the [`Ray`] used for handle picking.

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

use super::safe_div_element_wise;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere
    pub fn intersect_sphere(&self, center: Vector3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.magnitude2() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let t_near = -b - root;
        let t_far = -b + root;
        if t_far < 0.0 {
            None
        } else if t_near >= 0.0 {
            Some(t_near)
        } else {
            Some(t_far)
        }
    }
}

/// Axis-aligned bounding box in min/max form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an AABB from its center and half-size
    pub fn from_center_extents(center: Vector3<f32>, extents: Vector3<f32>) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn extents(&self) -> Vector3<f32> {
        self.size() * 0.5
    }

    /// True when the box has no size on any axis
    pub fn is_degenerate(&self) -> bool {
        self.size() == Vector3::zero()
    }

    /// Grow this box to also contain `other`
    pub fn encapsulate(&mut self, other: &Aabb) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = BoundingVolume::from(*self).corners();

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

/// Axis-aligned bounding volume in center/extents form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub center: Vector3<f32>,
    /// Half-size per axis
    pub extents: Vector3<f32>,
}

impl BoundingVolume {
    pub fn new(center: Vector3<f32>, extents: Vector3<f32>) -> Self {
        Self { center, extents }
    }

    /// Unit cube centered at `center`
    pub fn unit(center: Vector3<f32>) -> Self {
        Self::new(center, Vector3::new(0.5, 0.5, 0.5))
    }

    pub fn size(&self) -> Vector3<f32> {
        self.extents * 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.extents == Vector3::zero()
    }

    /// All 8 corners. Bit 0 of the index selects max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vector3<f32>; 8] {
        let min = self.center - self.extents;
        let max = self.center + self.extents;
        std::array::from_fn(|c| {
            Vector3::new(
                if c & 1 == 0 { min.x } else { max.x },
                if c & 2 == 0 { min.y } else { max.y },
                if c & 4 == 0 { min.z } else { max.z },
            )
        })
    }

    /// Divide center and extents by a per-axis scale, leaving axes with zero scale untouched
    pub fn unscaled(&self, scale: Vector3<f32>) -> Self {
        Self::new(
            safe_div_element_wise(self.center, scale),
            safe_div_element_wise(self.extents, scale),
        )
    }
}

impl From<Aabb> for BoundingVolume {
    fn from(aabb: Aabb) -> Self {
        Self::new(aabb.center(), aabb.extents())
    }
}

impl From<BoundingVolume> for Aabb {
    fn from(volume: BoundingVolume) -> Self {
        Aabb::from_center_extents(volume.center, volume.extents)
    }
}
