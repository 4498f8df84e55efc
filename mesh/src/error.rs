use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors returned while building or uploading a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The model source could not be opened, read or parsed.
    #[error("Failed to load model {} ({message})", path.display())]
    Parse { path: PathBuf, message: String },

    /// A texture file exists but could not be decoded.
    #[error("Failed to load texture {} ({message})", path.display())]
    Texture { path: PathBuf, message: String },

    /// The mesh breaks one of its structural invariants.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// The buffer allocator failed to create a GPU buffer.
    #[error("Buffer allocation failed: {0}")]
    Buffer(String),
}

impl MeshError {
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn texture(path: &Path, message: impl Into<String>) -> Self {
        Self::Texture {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MeshError>;
