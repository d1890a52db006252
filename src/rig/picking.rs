//! # Handle Picking
//!
//! Ray casting against the visible handles of a rig. Hosts without their own
//! physics raycast can use [`RigPicker`] to produce the [`PointerHit`] that a
//! pointer-down event carries.
//!
//! Corners are picked as cubes aligned with the rig frame, edges as spheres.

use cgmath::{Rotation, Vector3};

use super::config::RigConfig;
use super::handle::{Handle, HandleRef};
use super::layout::Rig;
use crate::input::PointerHit;
use crate::math::{Aabb, Ray};
use crate::visibility::RigDisplay;

/// Result of a handle picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub hit: PointerHit,
    pub handle: HandleRef,
    /// Distance along the ray to the intersection point
    pub distance: f32,
}

/// Picker over the handles currently shown by a rig
pub struct RigPicker<'a> {
    rig: &'a Rig,
    display: &'a RigDisplay,
    corner_half_size: f32,
    edge_radius: f32,
}

impl<'a> RigPicker<'a> {
    pub fn new(rig: &'a Rig, display: &'a RigDisplay, config: &RigConfig) -> Self {
        Self {
            rig,
            display,
            corner_half_size: config.corner_pick_size() * 0.5,
            edge_radius: config.edge_pick_radius(),
        }
    }

    /// Closest visible handle hit by `ray`
    pub fn pick(&self, ray: &Ray) -> Option<PickResult> {
        let frame = self.rig.frame();
        let inverse = frame.rotation.invert();
        let local_ray = Ray {
            origin: inverse.rotate_vector(ray.origin - frame.origin),
            direction: inverse.rotate_vector(ray.direction),
        };

        let corners = self
            .rig
            .corners()
            .iter()
            .filter(|h| self.display.corners[h.index].visible)
            .filter_map(|h| self.pick_corner(h, &local_ray).map(|t| (h, t)));

        let edges = self
            .rig
            .edges()
            .iter()
            .filter(|h| self.display.edges[h.index].visible)
            .filter_map(|h| ray.intersect_sphere(h.world_position, self.edge_radius).map(|t| (h, t)));

        let (handle, distance) = corners
            .chain(edges)
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

        Some(PickResult {
            hit: PointerHit {
                object: handle.id,
                point: ray.point_at(distance),
            },
            handle: handle.handle_ref(),
            distance,
        })
    }

    fn pick_corner(&self, handle: &Handle, local_ray: &Ray) -> Option<f32> {
        let half = Vector3::new(self.corner_half_size, self.corner_half_size, self.corner_half_size);
        Aabb::from_center_extents(handle.local_position, half).intersect_ray(local_ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BoundsMethod, ComputedBounds};
    use crate::math::{BoundingVolume, CardinalAxis};
    use crate::rig::RigBuilder;
    use crate::target::TargetTransform;
    use crate::visibility::{ActivationPolicy, VisibilityController};
    use cgmath::{Deg, InnerSpace, Quaternion, Rotation3};

    fn setup(pose: TargetTransform, flattened_axis: Option<CardinalAxis>) -> (RigConfig, Rig, RigDisplay) {
        let config = RigConfig::default();
        let volume = BoundingVolume::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5));
        let bounds = ComputedBounds {
            local: volume,
            world: volume,
            method: BoundsMethod::AttachedPrimitive,
            flattened_axis,
        };
        let rig = RigBuilder::from_config(&config).build(&bounds, &pose, 0);
        let display = VisibilityController::new(ActivationPolicy::OnStart).display(&config, &rig);
        (config, rig, display)
    }

    #[test]
    fn test_pick_corner_straight_on() {
        let (config, rig, display) = setup(TargetTransform::default(), None);
        // Corner 7 sits at (0.5, 0.5, 0.5)
        let ray = Ray::new(Vector3::new(0.5, 0.5, 5.0), -Vector3::unit_z());

        let result = RigPicker::new(&rig, &display, &config).pick(&ray).unwrap();

        assert_eq!(result.handle, HandleRef::Corner(7));
        assert_eq!(result.hit.object, rig.corners()[7].id);
        let expected = 5.0 - 0.5 - config.corner_pick_size() * 0.5;
        assert!((result.distance - expected).abs() < 1e-4);
    }

    #[test]
    fn test_pick_edge_sphere() {
        let (config, rig, display) = setup(TargetTransform::default(), None);
        // Edge 11 runs along Z between corners 3 and 7, midpoint (0.5, 0.5, 0)
        let ray = Ray::new(Vector3::new(5.0, 0.5, 0.0), -Vector3::unit_x());

        let result = RigPicker::new(&rig, &display, &config).pick(&ray).unwrap();

        assert_eq!(result.handle, HandleRef::Edge(11));
        assert!((result.hit.point - Vector3::new(0.5 + config.edge_pick_radius(), 0.5, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_pick_follows_rig_rotation() {
        let pose = TargetTransform::new(
            Vector3::new(0.0, 0.0, 0.0),
            Quaternion::from_angle_y(Deg(45.0)),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let (config, rig, display) = setup(pose, None);
        let corner = rig.corners()[7].world_position;
        let ray = Ray::new(corner + Vector3::new(0.0, 3.0, 0.0), -Vector3::unit_y());

        let result = RigPicker::new(&rig, &display, &config).pick(&ray).unwrap();
        assert_eq!(result.handle, HandleRef::Corner(7));
    }

    #[test]
    fn test_flattened_edges_are_not_pickable() {
        let (config, rig, display) = setup(TargetTransform::default(), Some(CardinalAxis::Z));
        // Edge 11 is hidden when Z is flattened
        let ray = Ray::new(Vector3::new(5.0, 0.5, 0.0), -Vector3::unit_x());

        let result = RigPicker::new(&rig, &display, &config).pick(&ray);
        assert!(result.map_or(true, |r| r.handle != HandleRef::Edge(11)));
    }

    #[test]
    fn test_miss() {
        let (config, rig, display) = setup(TargetTransform::default(), None);
        let ray = Ray::new(Vector3::new(10.0, 10.0, 10.0), Vector3::unit_x());
        assert!(RigPicker::new(&rig, &display, &config).pick(&ray).is_none());
    }
}
