//! # Rig Builder
//!
//! Produces the fixed handle layout from a computed bounding volume. Every
//! build creates a brand-new [`Rig`] with fresh hit ids; there is no
//! incremental patching of a previous rig.

use cgmath::{One, Quaternion, Vector3, Zero};

use super::config::{RigConfig, WireframeShape};
use super::handle::{Handle, HandleKind, CORNER_COUNT};
use super::layout::{flattened_edges, Rig, RigFrame, WireLink, EDGE_CORNERS};
use crate::bounds::ComputedBounds;
use crate::math::{rotation_from_basis, safe_div_element_wise, CardinalAxis};
use crate::target::TargetTransform;

/// Shape-affecting parameters of a rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigBuilder {
    pub padding: Vector3<f32>,
    pub scale_handle_size: f32,
    pub rotation_handle_diameter: f32,
    pub wireframe_shape: WireframeShape,
    pub wireframe_edge_radius: f32,
}

impl RigBuilder {
    pub fn from_config(config: &RigConfig) -> Self {
        Self {
            padding: config.padding,
            scale_handle_size: config.scale_handle_size,
            rotation_handle_diameter: config.rotation_handle_diameter,
            wireframe_shape: config.wireframe_shape,
            wireframe_edge_radius: config.wireframe_edge_radius,
        }
    }

    /// Lay out corners, edges and links around `bounds` and place them for `pose`
    pub fn build(&self, bounds: &ComputedBounds, pose: &TargetTransform, generation: u64) -> Rig {
        let mut padding = self.padding;
        if let Some(axis) = bounds.flattened_axis {
            padding[axis.index()] = 0.0;
        }
        // Stored unscaled so the padding grows and shrinks with the target
        let scale = pose.scale;
        let padding = safe_div_element_wise(padding, Vector3::new(scale.x.abs(), scale.y.abs(), scale.z.abs()));

        let hidden = bounds.flattened_axis.map(flattened_edges);
        let is_hidden = |i: usize| hidden.is_some_and(|set| set.contains(&i));

        let corners = (0..CORNER_COUNT)
            .map(|i| Handle {
                id: Rig::hit_id(generation, i),
                kind: HandleKind::Corner,
                index: i,
                local_position: Vector3::zero(),
                world_position: Vector3::zero(),
                orientation: Quaternion::one(),
                flattened: false,
            })
            .collect();

        let edges = EDGE_CORNERS
            .iter()
            .enumerate()
            .map(|(i, (a, _, axis))| Handle {
                id: Rig::hit_id(generation, CORNER_COUNT + i),
                kind: HandleKind::Edge(*axis),
                index: i,
                local_position: Vector3::zero(),
                world_position: Vector3::zero(),
                orientation: edge_orientation(*a, *axis),
                flattened: is_hidden(i),
            })
            .collect();

        let links = EDGE_CORNERS
            .iter()
            .enumerate()
            .map(|(i, (_, _, axis))| WireLink {
                edge: i,
                axis: *axis,
                local_center: Vector3::zero(),
                length: 0.0,
                flattened: is_hidden(i),
            })
            .collect();

        let mut rig = Rig {
            generation,
            local_bounds: bounds.local,
            padding,
            flattened_axis: bounds.flattened_axis,
            method: bounds.method,
            scale_handle_size: self.scale_handle_size,
            rotation_handle_diameter: self.rotation_handle_diameter,
            wireframe_shape: self.wireframe_shape,
            wireframe_edge_radius: self.wireframe_edge_radius,
            corners,
            edges,
            links,
            frame: RigFrame {
                origin: pose.position,
                rotation: pose.rotation,
            },
            extents: Vector3::zero(),
        };
        rig.refresh(pose);

        log::debug!(
            "built rig generation {} with extents {:?}, flattened {:?}",
            generation,
            rig.extents,
            rig.flattened_axis
        );
        rig
    }
}

/// Orientation for the edge running along `axis` from corner `corner`.
///
/// Local up follows the edge axis; local X and Z straddle the outward
/// diagonal. Computed from corner sign bits so it does not depend on size,
/// which keeps it valid for flattened boxes.
fn edge_orientation(corner: usize, axis: CardinalAxis) -> Quaternion<f32> {
    let sign = |a: CardinalAxis| if corner & (1 << a.index()) == 0 { -1.0 } else { 1.0 };

    let up = axis.unit();
    let mut outward = Vector3::zero();
    for other in CardinalAxis::ALL.into_iter().filter(|a| *a != axis) {
        outward += other.unit() * sign(other);
    }
    let outward = outward / std::f32::consts::SQRT_2;

    let side = up.cross(outward);
    let x = (outward + side) / std::f32::consts::SQRT_2;
    let z = (outward - side) / std::f32::consts::SQRT_2;
    rotation_from_basis(x, up, z)
}
