use std::collections::{HashMap, hash_map::Entry};

use foldhash::fast::FixedState;
use log::debug;

use crate::{Vertex, VertexKey, error::Result, mesh::to_u32, vertex_hasher};

/// Builds an indexed vertex list from a stream of face corners, storing each distinct vertex
/// once. The lookup table only lives as long as the indexer.
pub struct VertexIndexer {
    /// Maps vertex content to its index in `vertices`. Hashed with [`vertex_hasher`], so the hash
    /// of a key is [`crate::hash_vertex`] of its vertex.
    lookup: HashMap<VertexKey, u32, FixedState>,

    /// Unique vertices in first-seen order.
    vertices: Vec<Vertex>,

    /// One entry per inserted corner.
    indices: Vec<u32>,
}

impl Default for VertexIndexer {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl VertexIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an indexer sized for `corners` face corners.
    pub fn with_capacity(corners: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity_and_hasher(corners, vertex_hasher()),
            vertices: Vec::with_capacity(corners),
            indices: Vec::with_capacity(corners),
        }
    }

    /// Adds one face corner and returns the index it resolved to. Fails once the unique vertices
    /// no longer fit a 32-bit index.
    pub fn insert(&mut self, vertex: Vertex) -> Result<u32> {
        let index = match self.lookup.entry(VertexKey::from(&vertex)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let index = to_u32(self.vertices.len(), "vertex")?;
                self.vertices.push(vertex);
                *e.insert(index)
            }
        };
        self.indices.push(index);
        Ok(index)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns the unique vertices and the index list. The lookup table is dropped.
    pub fn finish(self) -> (Vec<Vertex>, Vec<u32>) {
        debug!(
            "Vertex count: {}, Indices count: {}",
            self.vertices.len(),
            self.indices.len()
        );
        (self.vertices, self.indices)
    }
}
