//! Instance data for drawing the rig with an external instanced renderer.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Quaternion, Vector3};

use crate::rig::{HandleRef, Rig};
use crate::visibility::{Appearance, RigDisplay};

pub const HANDLE_COLOR: [f32; 4] = [0.0, 0.63, 1.0, 1.0];
pub const HANDLE_GRABBED_COLOR: [f32; 4] = [1.0, 0.8, 0.2, 1.0];
pub const WIRE_COLOR: [f32; 4] = [0.0, 0.63, 1.0, 1.0];
pub const BOX_COLOR: [f32; 4] = [0.0, 0.63, 1.0, 0.15];
pub const BOX_GRABBED_COLOR: [f32; 4] = [1.0, 0.8, 0.2, 0.25];

/// Instance data for a single rendered rig visual
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct HandleInstance {
    /// Transform matrix (4x4) for the instance
    pub transform: [[f32; 4]; 4],
    /// Color multiplier (RGBA)
    pub color: [f32; 4],
}

impl HandleInstance {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>, scale: Vector3<f32>, color: [f32; 4]) -> Self {
        let transform = Matrix4::from_translation(position)
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        Self {
            transform: transform.into(),
            color,
        }
    }

    /// Translation column of the transform
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.transform[3][0], self.transform[3][1], self.transform[3][2])
    }
}

/// Every visible rig visual, grouped by mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigInstances {
    pub corners: Vec<HandleInstance>,
    pub edges: Vec<HandleInstance>,
    pub links: Vec<HandleInstance>,
    pub boxes: Vec<HandleInstance>,
}

impl RigInstances {
    pub fn build(rig: &Rig, display: &RigDisplay) -> Self {
        let frame = rig.frame();
        let mut instances = Self::default();

        let corner_size = rig.scale_handle_size();
        for corner in rig.corners().iter().filter(|c| display.corners[c.index].visible) {
            instances.corners.push(HandleInstance::new(
                corner.world_position,
                frame.rotation,
                Vector3::new(corner_size, corner_size, corner_size),
                color_for(display.corners[corner.index].appearance),
            ));
        }

        let diameter = rig.rotation_handle_diameter();
        for edge in rig.edges().iter().filter(|e| display.edges[e.index].visible) {
            instances.edges.push(HandleInstance::new(
                edge.world_position,
                rig.world_orientation(HandleRef::Edge(edge.index)),
                Vector3::new(diameter, diameter, diameter),
                color_for(display.edges[edge.index].appearance),
            ));
        }

        let thickness = rig.wireframe_edge_radius() * 2.0;
        for link in rig.links().iter().filter(|l| display.links[l.edge]) {
            // Link meshes run along local Y, like the edge handle they sit on
            instances.links.push(HandleInstance::new(
                frame.transform_point(link.local_center),
                rig.world_orientation(HandleRef::Edge(link.edge)),
                Vector3::new(thickness, link.length, thickness),
                WIRE_COLOR,
            ));
        }

        if display.box_visible {
            let color = match display.box_appearance {
                Appearance::Normal => BOX_COLOR,
                Appearance::Grabbed => BOX_GRABBED_COLOR,
            };
            instances
                .boxes
                .push(HandleInstance::new(frame.origin, frame.rotation, rig.extents() * 2.0, color));
        }

        instances
    }

    pub fn len(&self) -> usize {
        self.corners.len() + self.edges.len() + self.links.len() + self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte view of one instance group, ready for a vertex buffer upload
    pub fn bytes(group: &[HandleInstance]) -> &[u8] {
        bytemuck::cast_slice(group)
    }
}

fn color_for(appearance: Appearance) -> [f32; 4] {
    match appearance {
        Appearance::Normal => HANDLE_COLOR,
        Appearance::Grabbed => HANDLE_GRABBED_COLOR,
    }
}
