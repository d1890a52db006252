//! # Bounds Calculator
//!
//! Derives the rig's axis-aligned volume from whichever geometry source is
//! available. Sources are tried in a fixed order and the first one producing
//! a box with non-zero size wins:
//!
//! 1. the configured override box
//! 2. a single primitive attached to the target
//! 3. the union of descendant primitives
//! 4. the union of descendant visual bounds
//! 5. the union of raw mesh-space bounds, centered on the target position
//! 6. a synthetic unit volume
//!
//! Measurement happens with the target's rotation temporarily reset to
//! identity so every source reports an axis-aligned box.

use cgmath::{One, Vector3, Zero};

use super::source::GeometrySource;
use crate::math::{Aabb, BoundingVolume, CardinalAxis};
use crate::target::{Target, TargetTransform};

/// How the bounding volume is flattened for near-planar targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenMode {
    #[default]
    None,
    FlattenX,
    FlattenY,
    FlattenZ,
    /// Flatten whichever axis is smallest when the rig is built
    FlattenAuto,
}

impl FlattenMode {
    /// Concrete axis to flatten given the measured extents.
    ///
    /// Ties on the smallest extent resolve in X, Y, Z order.
    pub fn resolve(self, extents: Vector3<f32>) -> Option<CardinalAxis> {
        match self {
            FlattenMode::None => None,
            FlattenMode::FlattenX => Some(CardinalAxis::X),
            FlattenMode::FlattenY => Some(CardinalAxis::Y),
            FlattenMode::FlattenZ => Some(CardinalAxis::Z),
            FlattenMode::FlattenAuto => {
                let min = extents.x.min(extents.y.min(extents.z));
                Some(if min == extents.x {
                    CardinalAxis::X
                } else if min == extents.y {
                    CardinalAxis::Y
                } else {
                    CardinalAxis::Z
                })
            }
        }
    }
}

/// Which source produced the measured volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsMethod {
    Override,
    AttachedPrimitive,
    DescendantPrimitives,
    Visuals,
    Meshes,
    /// Nothing measurable; a unit volume stood in for this build only
    Synthetic,
}

/// Result of a bounds computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedBounds {
    /// Volume in the target's local, unscaled frame: the center is an offset
    /// from the target position and extents are divided by the target scale.
    pub local: BoundingVolume,
    /// World-space volume as measured with identity rotation, flattened
    pub world: BoundingVolume,
    pub method: BoundsMethod,
    pub flattened_axis: Option<CardinalAxis>,
}

/// Measures targets through an injected [`GeometrySource`]
pub struct BoundsCalculator {
    source: Box<dyn GeometrySource>,
    /// Target-local override box, checked before any source
    bounds_override: Option<Aabb>,
}

impl BoundsCalculator {
    pub fn new(source: Box<dyn GeometrySource>) -> Self {
        Self {
            source,
            bounds_override: None,
        }
    }

    pub fn set_bounds_override(&mut self, bounds_override: Option<Aabb>) {
        self.bounds_override = bounds_override;
    }

    pub fn bounds_override(&self) -> Option<Aabb> {
        self.bounds_override
    }

    /// Replace the geometry source, e.g. after the target's shape changed
    pub fn set_source(&mut self, source: Box<dyn GeometrySource>) {
        self.source = source;
    }

    /// Measure the target and apply flattening.
    ///
    /// The target's rotation is reset to identity for the duration of the
    /// measurement and restored before returning.
    pub fn compute_bounds(&self, target: &mut dyn Target, flatten: FlattenMode) -> ComputedBounds {
        let rotation = target.rotation();
        target.set_rotation(cgmath::Quaternion::one());
        let pose = target.pose();
        let (world, method) = self.measure(&pose);
        target.set_rotation(rotation);

        let flattened_axis = flatten.resolve(world.extents);
        let mut world = world;
        if let Some(axis) = flattened_axis {
            world.extents[axis.index()] = 0.0;
        }

        let local = BoundingVolume::new(world.center - pose.position, world.extents).unscaled(pose.scale);

        log::debug!(
            "bounds computed via {:?}: center {:?} extents {:?} flattened {:?}",
            method,
            world.center,
            world.extents,
            flattened_axis
        );

        ComputedBounds {
            local,
            world,
            method,
            flattened_axis,
        }
    }

    fn measure(&self, pose: &TargetTransform) -> (BoundingVolume, BoundsMethod) {
        if let Some(local) = self.bounds_override {
            let world = local.transform(&pose.matrix());
            if !world.is_degenerate() {
                return (world.into(), BoundsMethod::Override);
            }
        }

        if let Some(attached) = self.source.attached_bounds(pose) {
            if !attached.is_degenerate() {
                return (attached.into(), BoundsMethod::AttachedPrimitive);
            }
        }

        if let Some(union) = union_of(self.source.descendant_bounds(pose)) {
            return (union.into(), BoundsMethod::DescendantPrimitives);
        }

        if let Some(union) = union_of(self.source.visual_bounds(pose)) {
            return (union.into(), BoundsMethod::Visuals);
        }

        if let Some(union) = union_of(self.source.mesh_bounds()) {
            let volume = BoundingVolume::new(pose.position, union.extents());
            return (volume, BoundsMethod::Meshes);
        }

        log::warn!("no measurable geometry on target, using a unit volume");
        let unit = Aabb::from(BoundingVolume::unit(Vector3::zero())).transform(&pose.matrix());
        (unit.into(), BoundsMethod::Synthetic)
    }
}

/// Union of every non-degenerate box, or None if nothing has size
fn union_of(boxes: Vec<Aabb>) -> Option<Aabb> {
    let mut iter = boxes.into_iter().filter(|b| !b.is_degenerate());
    let mut union = iter.next()?;
    for b in iter {
        union.encapsulate(&b);
    }
    (!union.is_degenerate()).then_some(union)
}
