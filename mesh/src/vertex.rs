use std::hash::BuildHasher;

use bytemuck::{Pod, Zeroable};
use foldhash::fast::FixedState;
use glam::{Vec2, Vec3};
use ordered_float::OrderedFloat;

/// Seed for the vertex hasher. Fixed so hashes are stable between runs.
const VERTEX_HASH_SEED: u64 = 0x5eed_a57e_401d_0b17;

/// A single mesh vertex. The layout matches the interleaved vertex buffer so a slice of vertices
/// can be uploaded as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Hashable identity of a [`Vertex`]. Two vertices share a key iff every position, normal and
/// texture coordinate component compares equal.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct VertexKey([OrderedFloat<f32>; 8]);

impl From<&Vertex> for VertexKey {
    fn from(v: &Vertex) -> Self {
        #[rustfmt::skip]
        let components = [
            v.position.x, v.position.y, v.position.z,
            v.normal.x, v.normal.y, v.normal.z,
            v.tex_coord.x, v.tex_coord.y,
        ];
        Self(components.map(OrderedFloat))
    }
}

/// Returns the hasher used for vertex deduplication by [`crate::VertexIndexer`].
pub fn vertex_hasher() -> FixedState {
    FixedState::with_seed(VERTEX_HASH_SEED)
}

/// Content hash of a vertex. Equal vertices always hash to the same value.
///
/// This is the hash [`crate::VertexIndexer`] buckets vertices by: its table hashes
/// [`VertexKey`] with [`vertex_hasher`].
pub fn hash_vertex(vertex: &Vertex) -> u64 {
    vertex_hasher().hash_one(VertexKey::from(vertex))
}

/// Describes where each attribute lives inside one interleaved vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub position_offset: usize,
    pub normal_offset: usize,
    pub tex_coord_offset: usize,
}

impl VertexLayout {
    pub const INTERLEAVED: Self = Self {
        stride: size_of::<Vertex>(),
        position_offset: std::mem::offset_of!(Vertex, position),
        normal_offset: std::mem::offset_of!(Vertex, normal),
        tex_coord_offset: std::mem::offset_of!(Vertex, tex_coord),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_layout() {
        let layout = VertexLayout::INTERLEAVED;
        assert_eq!(layout.stride, 32);
        assert_eq!(layout.position_offset, 0);
        assert_eq!(layout.normal_offset, 12);
        assert_eq!(layout.tex_coord_offset, 24);
    }

    #[test]
    fn equal_vertices_hash_equal() {
        let a = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec2::new(0.5, 0.25));
        let b = a;
        assert_eq!(VertexKey::from(&a), VertexKey::from(&b));
        assert_eq!(hash_vertex(&a), hash_vertex(&b));
    }

    #[test]
    fn signed_zero_is_same_key() {
        let a = Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, Vec2::ZERO);
        let b = Vertex::new(Vec3::new(-0.0, 1.0, 0.0), Vec3::ZERO, Vec2::ZERO);
        assert_eq!(VertexKey::from(&a), VertexKey::from(&b));
        assert_eq!(hash_vertex(&a), hash_vertex(&b));
    }

    #[test]
    fn repeated_components_do_not_cancel() {
        // An XOR of per-attribute hashes maps both of these to the same value.
        let p = Vec3::new(1.0, 2.0, 3.0);
        let a = Vertex::new(p, p, Vec2::ZERO);
        let b = Vertex::new(Vec3::ZERO, Vec3::ZERO, Vec2::ZERO);
        assert_ne!(VertexKey::from(&a), VertexKey::from(&b));
        assert_ne!(hash_vertex(&a), hash_vertex(&b));
    }

    #[test]
    fn any_component_changes_key() {
        let base = Vertex::new(Vec3::ONE, Vec3::Z, Vec2::new(0.1, 0.2));
        let moved = Vertex::new(Vec3::new(1.0, 1.0, 1.5), Vec3::Z, Vec2::new(0.1, 0.2));
        let turned = Vertex::new(Vec3::ONE, Vec3::X, Vec2::new(0.1, 0.2));
        let shifted = Vertex::new(Vec3::ONE, Vec3::Z, Vec2::new(0.1, 0.3));
        for other in [moved, turned, shifted] {
            assert_ne!(VertexKey::from(&base), VertexKey::from(&other));
        }
    }
}
