//! Geometry providers queried by the bounds calculator.

use cgmath::Matrix4;

use crate::math::Aabb;
use crate::target::TargetTransform;

/// Read-only view of the geometry attached to a target and its descendants.
///
/// Every method receives the pose the target has at measurement time (the
/// calculator resets the rotation to identity first), and returns world-space
/// boxes for that pose, except [`GeometrySource::mesh_bounds`] which reports
/// raw mesh-space boxes. Boxes of zero size are skipped by the calculator.
pub trait GeometrySource {
    /// A single bounding primitive attached directly to the target
    fn attached_bounds(&self, _pose: &TargetTransform) -> Option<Aabb> {
        None
    }

    /// Bounding primitives on every descendant
    fn descendant_bounds(&self, _pose: &TargetTransform) -> Vec<Aabb> {
        Vec::new()
    }

    /// Visual geometry bounds on every descendant
    fn visual_bounds(&self, _pose: &TargetTransform) -> Vec<Aabb> {
        Vec::new()
    }

    /// Untransformed mesh-space bounds of every descendant mesh
    fn mesh_bounds(&self) -> Vec<Aabb> {
        Vec::new()
    }
}

/// A target with no geometry at all; bounds fall back to the unit volume
pub struct EmptyGeometry;

impl GeometrySource for EmptyGeometry {}

/// One node of a target's descendant hierarchy
#[derive(Debug, Clone, Default)]
pub struct GeometryNode {
    pub name: String,
    /// Placement relative to the target
    pub local: TargetTransform,
    /// Local-space bounding primitive
    pub collider: Option<Aabb>,
    /// Local-space visual bounds
    pub visual: Option<Aabb>,
    /// Raw mesh vertex positions
    pub mesh: Option<Vec<[f32; 3]>>,
}

impl GeometryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_local(mut self, local: TargetTransform) -> Self {
        self.local = local;
        self
    }

    pub fn with_collider(mut self, collider: Aabb) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_visual(mut self, visual: Aabb) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn with_mesh(mut self, vertices: Vec<[f32; 3]>) -> Self {
        self.mesh = Some(vertices);
        self
    }

    fn world_matrix(&self, pose: &TargetTransform) -> Matrix4<f32> {
        pose.matrix() * self.local.matrix()
    }
}

/// Plain in-memory hierarchy implementing [`GeometrySource`]
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    /// Local-space primitive attached to the target itself
    pub root_collider: Option<Aabb>,
    pub nodes: Vec<GeometryNode>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_collider(mut self, collider: Aabb) -> Self {
        self.root_collider = Some(collider);
        self
    }

    pub fn add_node(&mut self, node: GeometryNode) -> &mut Self {
        self.nodes.push(node);
        self
    }
}

impl GeometrySource for SceneGeometry {
    fn attached_bounds(&self, pose: &TargetTransform) -> Option<Aabb> {
        self.root_collider.map(|c| c.transform(&pose.matrix()))
    }

    fn descendant_bounds(&self, pose: &TargetTransform) -> Vec<Aabb> {
        self.nodes
            .iter()
            .filter_map(|node| node.collider.map(|c| c.transform(&node.world_matrix(pose))))
            .collect()
    }

    fn visual_bounds(&self, pose: &TargetTransform) -> Vec<Aabb> {
        self.nodes
            .iter()
            .filter_map(|node| node.visual.map(|v| v.transform(&node.world_matrix(pose))))
            .collect()
    }

    fn mesh_bounds(&self) -> Vec<Aabb> {
        self.nodes
            .iter()
            .filter_map(|node| node.mesh.as_deref())
            .filter(|vertices| !vertices.is_empty())
            .map(Aabb::from_vertices)
            .collect()
    }
}
