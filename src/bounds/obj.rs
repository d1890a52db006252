//! Loading target geometry from Wavefront OBJ files.
//!
//! Each model in the file becomes one [`GeometryNode`] carrying its raw mesh
//! vertices and matching visual bounds, so OBJ-backed targets measure through
//! the visual tier and fall back to raw mesh bounds only if those vanish.

use std::io::BufRead;
use std::path::Path;

use super::source::{GeometryNode, SceneGeometry};
use crate::error::{Result, RigError};
use crate::math::Aabb;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

impl SceneGeometry {
    /// Load every model of an OBJ file as a descendant node
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let scene = Self::from_models(models);
        if scene.nodes.is_empty() {
            return Err(RigError::EmptyGeometry(path.to_path_buf()));
        }
        log::debug!("loaded {} mesh node(s) from {}", scene.nodes.len(), path.display());
        Ok(scene)
    }

    /// Load OBJ source from a reader. Material libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
        let scene = Self::from_models(models);
        if scene.nodes.is_empty() {
            return Err(RigError::EmptyGeometry("<reader>".into()));
        }
        Ok(scene)
    }

    fn from_models(models: Vec<tobj::Model>) -> Self {
        let mut scene = SceneGeometry::new();
        for (i, model) in models.into_iter().enumerate() {
            let vertices: Vec<[f32; 3]> = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            if vertices.is_empty() {
                continue;
            }

            let name = if model.name.is_empty() {
                format!("mesh_{}", i)
            } else {
                model.name
            };

            let visual = Aabb::from_vertices(&vertices);
            scene.add_node(GeometryNode::new(name).with_visual(visual).with_mesh(vertices));
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::source::GeometrySource;
    use crate::target::TargetTransform;
    use cgmath::Vector3;
    use std::io::{BufReader, Cursor};

    const QUAD: &str = "\
o quad
v -1.0 -0.5 0.0
v 1.0 -0.5 0.0
v 1.0 0.5 0.0
v -1.0 0.5 0.0
f 1 2 3 4
";

    #[test]
    fn test_load_quad_from_reader() {
        let mut reader = BufReader::new(Cursor::new(QUAD));
        let scene = SceneGeometry::from_obj_reader(&mut reader).unwrap();

        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.nodes[0].name, "quad");

        let visuals = scene.visual_bounds(&TargetTransform::default());
        assert_eq!(visuals.len(), 1);
        assert_eq!(visuals[0].min, Vector3::new(-1.0, -0.5, 0.0));
        assert_eq!(visuals[0].max, Vector3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_empty_obj_is_an_error() {
        let mut reader = BufReader::new(Cursor::new("# nothing here\n"));
        let result = SceneGeometry::from_obj_reader(&mut reader);
        assert!(matches!(result, Err(RigError::EmptyGeometry(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = SceneGeometry::from_obj("does/not/exist.obj");
        assert!(matches!(result, Err(RigError::ObjLoad(_))));
    }
}
