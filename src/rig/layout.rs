//! # Rig Layout
//!
//! A built [`Rig`]: 8 corner handles, 12 edge handles and 12 wireframe links
//! laid out around the target's bounding volume. Handle world positions are
//! derived directly from the cached bounds and the live target pose on every
//! refresh; nothing depends on a scene graph.

use cgmath::{Quaternion, Rotation, Vector3};

use super::config::WireframeShape;
use super::handle::{Handle, HandleRef, HitObjectId, CORNER_COUNT, EDGE_COUNT};
use crate::bounds::BoundsMethod;
use crate::math::{BoundingVolume, CardinalAxis};
use crate::target::TargetTransform;

/// Corner pair joined by each edge, with the axis the edge runs along
pub const EDGE_CORNERS: [(usize, usize, CardinalAxis); EDGE_COUNT] = [
    (0, 1, CardinalAxis::X),
    (0, 2, CardinalAxis::Y),
    (3, 2, CardinalAxis::X),
    (3, 1, CardinalAxis::Y),
    (4, 5, CardinalAxis::X),
    (4, 6, CardinalAxis::Y),
    (7, 6, CardinalAxis::X),
    (7, 5, CardinalAxis::Y),
    (0, 4, CardinalAxis::Z),
    (1, 5, CardinalAxis::Z),
    (2, 6, CardinalAxis::Z),
    (3, 7, CardinalAxis::Z),
];

/// Edge handles hidden when the given axis is flattened
pub fn flattened_edges(axis: CardinalAxis) -> [usize; 4] {
    match axis {
        CardinalAxis::X => [0, 4, 2, 6],
        CardinalAxis::Y => [1, 3, 5, 7],
        CardinalAxis::Z => [9, 10, 8, 11],
    }
}

/// World-space placement of the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigFrame {
    pub origin: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl RigFrame {
    pub fn transform_point(&self, local: Vector3<f32>) -> Vector3<f32> {
        self.origin + self.rotation.rotate_vector(local)
    }

    /// World-space direction of one of the rig's cardinal axes
    pub fn axis(&self, axis: CardinalAxis) -> Vector3<f32> {
        axis.in_frame(self.rotation)
    }
}

/// One wireframe link, drawn along an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireLink {
    pub edge: usize,
    pub axis: CardinalAxis,
    /// Center of the link in the rig frame
    pub local_center: Vector3<f32>,
    pub length: f32,
    /// Links along the flattened axis collapse and are never shown
    pub flattened: bool,
}

/// A complete, immutable-shape handle set for one rig generation
#[derive(Debug, Clone)]
pub struct Rig {
    pub(crate) generation: u64,
    pub(crate) local_bounds: BoundingVolume,
    /// Padding in the target's unscaled local frame
    pub(crate) padding: Vector3<f32>,
    pub(crate) flattened_axis: Option<CardinalAxis>,
    pub(crate) method: BoundsMethod,
    pub(crate) scale_handle_size: f32,
    pub(crate) rotation_handle_diameter: f32,
    pub(crate) wireframe_shape: WireframeShape,
    pub(crate) wireframe_edge_radius: f32,
    pub(crate) corners: Vec<Handle>,
    pub(crate) edges: Vec<Handle>,
    pub(crate) links: Vec<WireLink>,
    pub(crate) frame: RigFrame,
    pub(crate) extents: Vector3<f32>,
}

impl Rig {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn corners(&self) -> &[Handle] {
        &self.corners
    }

    pub fn edges(&self) -> &[Handle] {
        &self.edges
    }

    pub fn links(&self) -> &[WireLink] {
        &self.links
    }

    /// Every handle, corners first
    pub fn handles(&self) -> impl Iterator<Item = &Handle> {
        self.corners.iter().chain(self.edges.iter())
    }

    pub fn handle(&self, handle: HandleRef) -> &Handle {
        match handle {
            HandleRef::Corner(i) => &self.corners[i],
            HandleRef::Edge(i) => &self.edges[i],
        }
    }

    pub fn frame(&self) -> RigFrame {
        self.frame
    }

    /// Current world-space half-size of the rig, padding included
    pub fn extents(&self) -> Vector3<f32> {
        self.extents
    }

    /// Bounds in the target's unscaled local frame
    pub fn local_bounds(&self) -> BoundingVolume {
        self.local_bounds
    }

    pub fn flattened_axis(&self) -> Option<CardinalAxis> {
        self.flattened_axis
    }

    pub fn bounds_method(&self) -> BoundsMethod {
        self.method
    }

    pub fn scale_handle_size(&self) -> f32 {
        self.scale_handle_size
    }

    pub fn rotation_handle_diameter(&self) -> f32 {
        self.rotation_handle_diameter
    }

    pub fn wireframe_edge_radius(&self) -> f32 {
        self.wireframe_edge_radius
    }

    pub(crate) fn hit_id(generation: u64, slot: usize) -> HitObjectId {
        HitObjectId(generation * (CORNER_COUNT + EDGE_COUNT) as u64 + slot as u64)
    }

    /// Re-derive the frame, handle positions and link lengths from the target pose
    pub fn refresh(&mut self, pose: &TargetTransform) {
        let scale = pose.scale;
        let local_extents = self.local_bounds.extents + self.padding;
        let scaled_extents = Vector3::new(
            local_extents.x * scale.x.abs(),
            local_extents.y * scale.y.abs(),
            local_extents.z * scale.z.abs(),
        );
        let scaled_center = Vector3::new(
            self.local_bounds.center.x * scale.x,
            self.local_bounds.center.y * scale.y,
            self.local_bounds.center.z * scale.z,
        );

        self.extents = scaled_extents;
        self.frame = RigFrame {
            origin: pose.position + pose.rotation.rotate_vector(scaled_center),
            rotation: pose.rotation,
        };

        let corner_positions = BoundingVolume::new(Vector3::new(0.0, 0.0, 0.0), self.extents).corners();
        for (corner, local) in self.corners.iter_mut().zip(corner_positions) {
            corner.local_position = local;
            corner.world_position = self.frame.transform_point(local);
        }

        let link_dimensions = self.link_dimensions();
        for (i, (a, b, axis)) in EDGE_CORNERS.iter().enumerate() {
            let local = (corner_positions[*a] + corner_positions[*b]) * 0.5;
            let edge = &mut self.edges[i];
            edge.local_position = local;
            edge.world_position = self.frame.transform_point(local);

            let link = &mut self.links[i];
            link.local_center = local;
            link.length = link_dimensions[axis.index()];
        }
    }

    /// Link length per axis for the configured wireframe primitive
    fn link_dimensions(&self) -> Vector3<f32> {
        let radius = self.wireframe_edge_radius;
        let adjust = match self.wireframe_shape {
            WireframeShape::Cubic => 2.0,
            WireframeShape::Cylindrical => 1.0 - 6.0 * radius,
        };
        self.extents * adjust + Vector3::new(radius, radius, radius)
    }

    /// World-space orientation of a handle's visual
    pub fn world_orientation(&self, handle: HandleRef) -> Quaternion<f32> {
        self.frame.rotation * self.handle(handle).orientation
    }
}
