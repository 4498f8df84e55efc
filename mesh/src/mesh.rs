use std::collections::HashSet;

use glam::Vec3;
use log::{debug, warn};

use crate::{Material, MeshError, Vertex, VertexKey, compute_normals, error::Result};

/// An indexed triangle mesh ready for upload. Holds geometry and material only; GPU resources
/// live in [`crate::MeshBuffers`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Unique vertices in the order they were first seen.
    pub vertices: Vec<Vertex>,

    /// Three indices per triangle into `vertices`.
    pub indices: Vec<u32>,

    /// Whether vertex normals were supplied by the source or synthesized.
    pub has_normals: bool,

    /// Whether texture coordinates were supplied by the source.
    pub has_tex_coords: bool,

    pub material: Material,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Replace every vertex normal with area weighted normals derived from the triangles.
    pub fn compute_normals(&mut self) {
        let normals = compute_normals(&self.vertices, &self.indices);
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal;
        }
        self.has_normals = true;
    }

    /// Returns the axis aligned bounds `(min, max)` of all vertex positions.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }

    /// Recentre the mesh on the origin and scale it so the bounding box diagonal has length 2.
    ///
    /// Returns `false` and leaves the mesh untouched when it has no vertices or when the bounding
    /// box diagonal is zero or not finite.
    pub fn standardize(&mut self) -> bool {
        let Some((min, max)) = self.bounding_box() else {
            debug!("Nothing to standardize in an empty mesh");
            return false;
        };

        let diagonal = (max - min).length();
        if diagonal == 0.0 || !diagonal.is_finite() {
            warn!("Skipping standardization of degenerate mesh (diagonal {diagonal})");
            return false;
        }

        let center = (min + max) / 2.0;
        let scale = 2.0 / diagonal;
        for vertex in self.vertices.iter_mut() {
            vertex.position = (vertex.position - center) * scale;
        }
        true
    }

    /// Checks the index range, vertex uniqueness and whole-triangle invariants.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        let vertex_count = self.vertices.len();
        if let Some(i) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::InvalidMesh(format!(
                "index {i} out of range for {vertex_count} vertices"
            )));
        }

        let mut seen = HashSet::with_capacity(vertex_count);
        for (i, vertex) in self.vertices.iter().enumerate() {
            if !seen.insert(VertexKey::from(vertex)) {
                return Err(MeshError::InvalidMesh(format!("vertex {i} is a duplicate")));
            }
        }

        Ok(())
    }

    /// Number of indices to draw for the first `num_triangles` triangles. `None` draws the whole
    /// mesh and a count larger than the mesh is clamped.
    pub fn draw_index_count(&self, num_triangles: Option<u32>) -> Result<u32> {
        let index_count = to_u32(self.indices.len(), "index")?;
        Ok(draw_index_count(index_count, num_triangles))
    }

    /// Interleaved vertex data as bytes, laid out as [`crate::VertexLayout::INTERLEAVED`].
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Converts an element count to the 32-bit form used for GPU indices and draw ranges.
pub(crate) fn to_u32(count: usize, what: &str) -> Result<u32> {
    u32::try_from(count)
        .map_err(|_| MeshError::InvalidMesh(format!("{what} count {count} exceeds u32::MAX")))
}

pub(crate) fn draw_index_count(index_count: u32, num_triangles: Option<u32>) -> u32 {
    match num_triangles {
        Some(n) => n.saturating_mul(3).min(index_count),
        None => index_count,
    }
}
