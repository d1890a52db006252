//! Rig configuration with the defaults used by [`crate::BoundsRig`].

use cgmath::{Vector3, Zero};

use crate::bounds::FlattenMode;
use crate::math::{Aabb, CardinalAxis};
use crate::visibility::ActivationPolicy;

/// Primitive used for the wireframe links between corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireframeShape {
    #[default]
    Cubic,
    Cylindrical,
}

/// Configuration for a bounding-box rig
#[derive(Debug, Clone, PartialEq)]
pub struct RigConfig {
    /// Extra padding around the measured bounds, in world units at build time.
    /// It scales with the target while the rig is manipulated.
    pub padding: Vector3<f32>,
    pub flatten: FlattenMode,
    pub activation: ActivationPolicy,
    /// Target-local box used instead of measuring the geometry
    pub bounds_override: Option<Aabb>,

    /// Scale limits, relative to the scale at `init` unless `scale_limits_relative` is false
    pub scale_minimum: f32,
    pub scale_maximum: f32,
    pub scale_limits_relative: bool,

    /// Edge length of a corner handle
    pub scale_handle_size: f32,
    /// Diameter of an edge handle
    pub rotation_handle_diameter: f32,

    pub show_wireframe: bool,
    pub wireframe_shape: WireframeShape,
    pub wireframe_edge_radius: f32,
    /// Show a box display filling the bounds
    pub show_box_display: bool,

    pub show_scale_handles: bool,
    pub show_rotation_handle_for_x: bool,
    pub show_rotation_handle_for_y: bool,
    pub show_rotation_handle_for_z: bool,

    /// Draw a line from the grabbed handle to the grab point while manipulating
    pub draw_tether_when_manipulating: bool,
}

impl RigConfig {
    pub fn show_rotation_handle_for(&self, axis: CardinalAxis) -> bool {
        match axis {
            CardinalAxis::X => self.show_rotation_handle_for_x,
            CardinalAxis::Y => self.show_rotation_handle_for_y,
            CardinalAxis::Z => self.show_rotation_handle_for_z,
        }
    }

    pub(crate) fn set_show_rotation_handle_for(&mut self, axis: CardinalAxis, show: bool) {
        match axis {
            CardinalAxis::X => self.show_rotation_handle_for_x = show,
            CardinalAxis::Y => self.show_rotation_handle_for_y = show,
            CardinalAxis::Z => self.show_rotation_handle_for_z = show,
        }
    }

    /// Side length of the cube used to pick a corner handle
    pub fn corner_pick_size(&self) -> f32 {
        self.scale_handle_size * 1.35
    }

    /// Radius of the sphere used to pick an edge handle
    pub fn edge_pick_radius(&self) -> f32 {
        self.rotation_handle_diameter * 0.5 * 1.2
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            padding: Vector3::zero(),
            flatten: FlattenMode::None,
            activation: ActivationPolicy::Manual,
            bounds_override: None,
            scale_minimum: 0.2,
            scale_maximum: 2.0,
            scale_limits_relative: true,
            scale_handle_size: 0.03,
            rotation_handle_diameter: 0.035,
            show_wireframe: true,
            wireframe_shape: WireframeShape::Cubic,
            wireframe_edge_radius: 0.005,
            show_box_display: false,
            show_scale_handles: true,
            show_rotation_handle_for_x: true,
            show_rotation_handle_for_y: true,
            show_rotation_handle_for_z: true,
            draw_tether_when_manipulating: true,
        }
    }
}
