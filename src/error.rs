//! Error types for rig configuration and geometry loading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RigError {
    #[error("invalid scale limits: minimum {min} / maximum {max} (must be finite, non-negative and min <= max)")]
    InvalidScaleLimits { min: f32, max: f32 },

    #[error("failed to load OBJ geometry: {0}")]
    ObjLoad(#[from] tobj::LoadError),

    #[error("OBJ file {0} contains no vertices")]
    EmptyGeometry(PathBuf),
}

pub type Result<T> = std::result::Result<T, RigError>;
