//! # Manipulation Solver
//!
//! Owns the single active [`ManipulationSession`] and turns pointer motion
//! into target transform updates. Rotation is applied incrementally about the
//! rig origin; scaling is computed from the session's initial state each tick
//! so it never accumulates drift.

use cgmath::{InnerSpace, Rotation, Vector3, Zero};

use super::clamp::ScaleLimits;
use super::session::{ManipulationKind, ManipulationSession};
use crate::input::{Pointer, PointerHit, PointerId, PointerPose, SourceId};
use crate::math::{rotate_position_about_pivot, rotation_about_axis, try_normalize, CardinalAxis, EPSILON};
use crate::rig::{HandleRef, Rig};
use crate::target::Target;

/// Single-session manipulation state machine
#[derive(Debug, Default)]
pub struct ManipulationSolver {
    session: Option<ManipulationSession>,
}

impl ManipulationSolver {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn session(&self) -> Option<&ManipulationSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session for `handle`, grabbed by `pointer` at `hit`.
    ///
    /// Returns `None` without touching the open session if one already exists.
    pub fn begin(
        &mut self,
        pointer: &Pointer,
        hit: &PointerHit,
        handle: HandleRef,
        rig: &Rig,
        target: &dyn Target,
    ) -> Option<&ManipulationSession> {
        if let Some(active) = &self.session {
            log::debug!(
                "ignoring grab by {:?}, session already held by {:?}",
                pointer.id,
                active.pointer
            );
            return None;
        }

        let pose = pointer.pose;
        let grab_point_local = pose.rotation.invert().rotate_vector(hit.point - pose.position);

        let kind = match handle {
            HandleRef::Edge(i) => {
                let axis = rig.edges()[i].axis().unwrap_or(CardinalAxis::X);
                ManipulationKind::Rotate {
                    axis,
                    world_axis: rig.frame().axis(axis),
                }
            }
            HandleRef::Corner(i) => {
                let grabbed = &rig.corners()[i];
                let opposite_corner = rig.frame().transform_point(-grabbed.local_position);
                let diagonal = try_normalize(grabbed.world_position - opposite_corner).unwrap_or_else(Vector3::zero);
                ManipulationKind::Scale {
                    opposite_corner,
                    diagonal,
                    initial_projection: ManipulationSession::projection_on_diagonal(hit.point, opposite_corner, diagonal),
                }
            }
        };

        log::debug!("{:?} grabbed {:?} at {:?}", pointer.id, handle, hit.point);

        self.session = Some(ManipulationSession {
            pointer: pointer.id,
            source: pointer.source,
            handle,
            grab_point_local,
            initial_grab_point: hit.point,
            previous_grab_point: hit.point,
            current_grab_point: hit.point,
            initial_scale: target.local_scale(),
            initial_position: target.position(),
            kind,
        });
        self.session.as_ref()
    }

    /// Advance the open session with the session pointer's current pose.
    ///
    /// Returns true if the target was modified.
    pub fn update(&mut self, pose: &PointerPose, rig: &Rig, limits: &ScaleLimits, target: &mut dyn Target) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        session.previous_grab_point = session.current_grab_point;
        session.current_grab_point = session.grab_point_for(pose);

        match session.kind {
            ManipulationKind::Rotate { world_axis, .. } => {
                let origin = rig.frame().origin;
                let Some(delta) = rotation_about_axis(
                    world_axis,
                    session.previous_grab_point - origin,
                    session.current_grab_point - origin,
                ) else {
                    return false;
                };

                target.move_position(rotate_position_about_pivot(target.position(), origin, delta));
                target.move_rotation((delta * target.rotation()).normalize());
                log::trace!("rotated target by {:?}", delta);
                true
            }
            ManipulationKind::Scale {
                opposite_corner,
                diagonal,
                initial_projection,
            } => {
                let current_projection =
                    ManipulationSession::projection_on_diagonal(session.current_grab_point, opposite_corner, diagonal);
                let scale_factor = if initial_projection.abs() > EPSILON {
                    1.0 + (current_projection - initial_projection) / initial_projection
                } else {
                    1.0
                };

                let (scale, scale_factor) = constrain(session.initial_scale, scale_factor, limits);

                target.set_local_scale(scale);
                target.move_position(session.initial_position * scale_factor + opposite_corner * (1.0 - scale_factor));
                log::trace!("scaled target to {:?}", scale);
                true
            }
        }
    }

    /// Close the session. Idempotent: returns `None` when nothing was open.
    pub fn end(&mut self) -> Option<ManipulationSession> {
        let session = self.session.take()?;
        log::debug!("{:?} released {:?}", session.pointer, session.handle);
        Some(session)
    }

    /// Close the session if it is held by `pointer`
    pub fn end_for_pointer(&mut self, pointer: PointerId) -> Option<ManipulationSession> {
        if self.session.as_ref()?.pointer == pointer {
            self.end()
        } else {
            None
        }
    }

    /// Close the session if its pointer belongs to `source`
    pub fn end_for_source(&mut self, source: SourceId) -> Option<ManipulationSession> {
        if self.session.as_ref()?.source == source {
            self.end()
        } else {
            None
        }
    }
}

/// Apply the scale limits to `initial * factor`, returning the final scale
/// and the factor consistent with it.
fn constrain(initial: Vector3<f32>, factor: f32, limits: &ScaleLimits) -> (Vector3<f32>, f32) {
    let candidate = initial * factor;
    let clamped = limits.clamp(candidate);
    if clamped == candidate {
        return (candidate, factor);
    }

    let effective = (0..3)
        .find(|&i| initial[i] != 0.0)
        .map_or(factor, |i| clamped[i] / initial[i]);
    (clamped, effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BoundsMethod, ComputedBounds};
    use crate::input::PointerKind;
    use crate::math::BoundingVolume;
    use crate::rig::{RigBuilder, RigConfig};
    use crate::target::TargetTransform;
    use cgmath::{Deg, One, Quaternion, Rotation3};

    const TEST_EPSILON: f32 = 1e-4;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < TEST_EPSILON, "{:?} != {:?}", a, b);
    }

    fn unit_rig(pose: &TargetTransform) -> Rig {
        let volume = BoundingVolume::new(Vector3::zero(), Vector3::new(0.5, 0.5, 0.5));
        let bounds = ComputedBounds {
            local: volume,
            world: volume,
            method: BoundsMethod::AttachedPrimitive,
            flattened_axis: None,
        };
        RigBuilder::from_config(&RigConfig::default()).build(&bounds, pose, 0)
    }

    fn pointer_at(id: u32, position: Vector3<f32>) -> Pointer {
        Pointer {
            id: PointerId(id),
            source: SourceId(id),
            kind: PointerKind::Far,
            pose: PointerPose::new(position, Quaternion::one()),
            hit: None,
        }
    }

    fn grab(solver: &mut ManipulationSolver, rig: &Rig, target: &TargetTransform, handle: HandleRef, point: Vector3<f32>) {
        let pointer = pointer_at(1, point);
        let hit = PointerHit {
            object: rig.handle(handle).id,
            point,
        };
        assert!(solver.begin(&pointer, &hit, handle, rig, target).is_some());
    }

    fn limits() -> ScaleLimits {
        ScaleLimits::relative(Vector3::new(1.0, 1.0, 1.0), 0.2, 2.0).unwrap()
    }

    #[test]
    fn test_scale_keeps_opposite_corner_fixed() {
        let mut target = TargetTransform::default();
        let mut rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        let corner = rig.corners()[7].world_position;
        grab(&mut solver, &rig, &target, HandleRef::Corner(7), corner);

        // Drag outward along the diagonal so the projection grows by half
        let diagonal = corner.normalize();
        let moved = corner + diagonal * (corner.magnitude() * 2.0 * 0.25);
        assert!(solver.update(&PointerPose::new(moved, Quaternion::one()), &rig, &limits(), &mut target));

        assert_vec_eq(target.scale, Vector3::new(1.25, 1.25, 1.25));
        rig.refresh(&target);
        assert_vec_eq(rig.corners()[0].world_position, Vector3::new(-0.5, -0.5, -0.5));
    }

    #[test]
    fn test_scale_clamped_at_maximum() {
        let mut target = TargetTransform::default();
        let mut rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        let corner = rig.corners()[7].world_position;
        grab(&mut solver, &rig, &target, HandleRef::Corner(7), corner);
        solver.update(&PointerPose::new(corner * 10.0, Quaternion::one()), &rig, &limits(), &mut target);

        assert_vec_eq(target.scale, Vector3::new(2.0, 2.0, 2.0));
        // Position stays consistent with the clamped scale
        rig.refresh(&target);
        assert_vec_eq(rig.corners()[0].world_position, Vector3::new(-0.5, -0.5, -0.5));
    }

    #[test]
    fn test_scale_zero_projection_is_noop() {
        let mut target = TargetTransform::default();
        let rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        // Grab at the opposite corner itself: the initial projection is zero
        let opposite = rig.corners()[0].world_position;
        grab(&mut solver, &rig, &target, HandleRef::Corner(7), opposite);
        solver.update(&PointerPose::new(Vector3::new(3.0, 3.0, 3.0), Quaternion::one()), &rig, &limits(), &mut target);

        assert_eq!(target.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_vec_eq(target.position, Vector3::zero());
    }

    #[test]
    fn test_rotation_about_y_edge() {
        let mut target = TargetTransform::at(Vector3::new(1.0, 0.0, 0.0));
        let rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        // Edge 7 runs along Y at local (0.5, 0, 0.5)
        let edge = rig.edges()[7].world_position;
        grab(&mut solver, &rig, &target, HandleRef::Edge(7), edge);
        assert!(solver.session().unwrap().is_rotation());

        // Swing the grab point a quarter turn about +Y around the rig origin
        let origin = rig.frame().origin;
        let quarter = Quaternion::from_angle_y(Deg(90.0));
        let swung = origin + quarter.rotate_vector(edge - origin) + Vector3::new(0.0, 0.4, 0.0);
        solver.update(&PointerPose::new(swung, Quaternion::one()), &rig, &limits(), &mut target);

        assert_vec_eq(target.position, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(target.rotation.rotate_vector(Vector3::unit_x()), -Vector3::unit_z());
        assert_vec_eq(target.rotation.rotate_vector(Vector3::unit_y()), Vector3::unit_y());
        assert_eq!(target.scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_pivots_about_offset_origin() {
        let mut target = TargetTransform::default();
        let volume = BoundingVolume::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5));
        let bounds = ComputedBounds {
            local: volume,
            world: volume,
            method: BoundsMethod::Visuals,
            flattened_axis: None,
        };
        let rig = RigBuilder::from_config(&RigConfig::default()).build(&bounds, &target, 0);
        let mut solver = ManipulationSolver::new();

        let edge_index = rig
            .edges()
            .iter()
            .position(|e| e.axis() == Some(CardinalAxis::Y))
            .unwrap();
        let edge = rig.edges()[edge_index].world_position;
        grab(&mut solver, &rig, &target, HandleRef::Edge(edge_index), edge);

        let origin = rig.frame().origin;
        let half = Quaternion::from_angle_y(Deg(180.0));
        solver.update(
            &PointerPose::new(origin + half.rotate_vector(edge - origin), Quaternion::one()),
            &rig,
            &limits(),
            &mut target,
        );

        // The target spins about the bounds center at x = 1
        assert_vec_eq(target.position, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_second_begin_is_ignored() {
        let target = TargetTransform::default();
        let rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        grab(&mut solver, &rig, &target, HandleRef::Corner(0), rig.corners()[0].world_position);

        let other = pointer_at(2, Vector3::zero());
        let hit = PointerHit {
            object: rig.edges()[0].id,
            point: rig.edges()[0].world_position,
        };
        assert!(solver.begin(&other, &hit, HandleRef::Edge(0), &rig, &target).is_none());
        assert_eq!(solver.session().unwrap().pointer, PointerId(1));
        assert_eq!(solver.session().unwrap().handle, HandleRef::Corner(0));
    }

    #[test]
    fn test_end_is_idempotent() {
        let target = TargetTransform::default();
        let rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        grab(&mut solver, &rig, &target, HandleRef::Edge(3), rig.edges()[3].world_position);

        assert!(solver.end_for_pointer(PointerId(2)).is_none());
        assert!(solver.end_for_source(SourceId(1)).is_some());
        assert!(solver.end().is_none());
        assert!(solver.end_for_pointer(PointerId(1)).is_none());
    }

    #[test]
    fn test_grab_point_follows_pointer_frame() {
        let target = TargetTransform::default();
        let rig = unit_rig(&target);
        let mut solver = ManipulationSolver::new();

        let mut pointer = pointer_at(1, Vector3::new(0.0, 0.0, 5.0));
        pointer.pose.rotation = Quaternion::from_angle_y(Deg(30.0));
        let hit = PointerHit {
            object: rig.corners()[7].id,
            point: rig.corners()[7].world_position,
        };
        let session = *solver.begin(&pointer, &hit, HandleRef::Corner(7), &rig, &target).unwrap();

        assert_vec_eq(session.grab_point_for(&pointer.pose), hit.point);
    }
}
