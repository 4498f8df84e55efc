use std::{ops::Range, sync::Arc};

use log::debug;

use crate::{
    Mesh, VertexLayout,
    error::Result,
    mesh::{draw_index_count, to_u32},
};

/// Creates and releases GPU buffers. Implemented by the rendering backend.
pub trait BufferAllocator {
    type Buffer;

    /// Create a vertex buffer from interleaved vertex data described by `layout`.
    fn create_vertex_buffer(&self, data: &[u8], layout: &VertexLayout) -> Result<Self::Buffer>;

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Self::Buffer>;

    fn destroy_buffer(&self, buffer: Self::Buffer);
}

/// GPU vertex and index buffers for one mesh. Buffers are released when replaced and on drop.
pub struct MeshBuffers<A: BufferAllocator> {
    allocator: Arc<A>,
    vertex_buffer: Option<A::Buffer>,
    index_buffer: Option<A::Buffer>,
    index_count: u32,
}

impl<A: BufferAllocator> MeshBuffers<A> {
    /// Create buffers holding `mesh`.
    pub fn new(allocator: Arc<A>, mesh: &Mesh) -> Result<Self> {
        let mut buffers = Self {
            allocator,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
        };
        buffers.upload(mesh)?;
        Ok(buffers)
    }

    /// Replace the buffer contents with `mesh`. The old buffers are released first.
    pub fn upload(&mut self, mesh: &Mesh) -> Result<()> {
        self.release();
        let index_count = to_u32(mesh.indices.len(), "index")?;

        debug!("Creating vertex buffer");
        let vertex_buffer = self
            .allocator
            .create_vertex_buffer(mesh.vertex_bytes(), &VertexLayout::INTERLEAVED)?;
        self.vertex_buffer = Some(vertex_buffer);

        debug!("Creating index buffer");
        let index_buffer = self.allocator.create_index_buffer(&mesh.indices)?;
        self.index_buffer = Some(index_buffer);

        self.index_count = index_count;
        Ok(())
    }

    pub fn vertex_buffer(&self) -> Option<&A::Buffer> {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> Option<&A::Buffer> {
        self.index_buffer.as_ref()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Index range to draw the first `num_triangles` triangles, or all of them for `None`.
    pub fn draw_range(&self, num_triangles: Option<u32>) -> Range<u32> {
        0..draw_index_count(self.index_count, num_triangles)
    }

    fn release(&mut self) {
        if let Some(buffer) = self.index_buffer.take() {
            self.allocator.destroy_buffer(buffer);
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            self.allocator.destroy_buffer(buffer);
        }
        self.index_count = 0;
    }
}

impl<A: BufferAllocator> Drop for MeshBuffers<A> {
    fn drop(&mut self) {
        self.release();
    }
}
