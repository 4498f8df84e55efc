use glam::Vec3;

use crate::Vertex;

/// Computes area weighted vertex normals from triangle geometry.
///
/// Each triangle `(a, b, c)` contributes `cross(b - a, c - b)` to its three vertices. The
/// contribution is not normalized so larger triangles have more influence. The accumulated sums
/// are normalized at the end; a vertex whose sum is zero gets a zero normal.
///
/// Triangles with an index outside `vertices` are skipped, as are trailing indices that don't
/// form a whole triangle.
pub fn compute_normals(vertices: &[Vertex], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let (Some(va), Some(vb), Some(vc)) = (vertices.get(a), vertices.get(b), vertices.get(c))
        else {
            continue;
        };

        let edge1 = vb.position - va.position;
        let edge2 = vc.position - vb.position;
        let face_normal = edge1.cross(edge2);

        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }

    normals.iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    use super::*;

    fn at(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), Vec3::ZERO, Vec2::ZERO)
    }

    #[test]
    fn single_triangle_counter_clockwise() {
        let vertices = [at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(0.0, 1.0, 0.0)];
        let normals = compute_normals(&vertices, &[0, 1, 2]);
        for n in normals {
            assert_eq!(n, Vec3::Z);
        }
    }

    #[test]
    fn ignores_existing_normals() {
        let mut vertices = [at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(0.0, 1.0, 0.0)];
        for v in vertices.iter_mut() {
            v.normal = Vec3::new(5.0, -3.0, 2.0);
        }
        let normals = compute_normals(&vertices, &[0, 1, 2]);
        assert_eq!(normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn repeated_runs_agree() {
        let mut vertices = vec![
            at(0.0, 0.0, 0.0),
            at(2.0, 0.0, 0.0),
            at(0.0, 3.0, 0.0),
            at(0.0, 0.0, 4.0),
        ];
        let indices = [0, 1, 2, 0, 3, 1];

        let first = compute_normals(&vertices, &indices);
        for (v, n) in vertices.iter_mut().zip(first.iter()) {
            v.normal = *n;
        }
        let second = compute_normals(&vertices, &indices);
        assert_eq!(first, second);
    }

    #[test]
    fn larger_triangle_dominates_shared_vertex() {
        // Vertex 0 is shared by a small triangle in the XY plane (normal +Z) and a triangle with
        // 10x the edge lengths in the XZ plane (normal -Y).
        let vertices = [
            at(0.0, 0.0, 0.0),
            at(1.0, 0.0, 0.0),
            at(0.0, 1.0, 0.0),
            at(10.0, 0.0, 0.0),
            at(0.0, 0.0, 10.0),
        ];
        let indices = [0, 1, 2, 0, 3, 4];
        let normals = compute_normals(&vertices, &indices);

        let small = Vec3::Z;
        let large = Vec3::NEG_Y;
        let shared = normals[0];
        let unweighted = (small + large).normalize();

        assert!(shared.dot(large) > unweighted.dot(large));

        let expected = (Vec3::new(0.0, 0.0, 1.0) + Vec3::new(0.0, -100.0, 0.0)).normalize();
        assert_abs_diff_eq!(shared.x, expected.x, epsilon = 1e-6);
        assert_abs_diff_eq!(shared.y, expected.y, epsilon = 1e-6);
        assert_abs_diff_eq!(shared.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn unreferenced_vertex_gets_zero_normal() {
        let vertices = [
            at(0.0, 0.0, 0.0),
            at(1.0, 0.0, 0.0),
            at(0.0, 1.0, 0.0),
            at(9.0, 9.0, 9.0),
        ];
        let normals = compute_normals(&vertices, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::ZERO);
    }

    #[test]
    fn partial_triangle_is_ignored() {
        let vertices = [at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(0.0, 1.0, 0.0)];
        let normals = compute_normals(&vertices, &[0, 1, 2, 0, 1]);
        assert_eq!(normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn out_of_range_triangle_is_skipped() {
        let vertices = [at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(0.0, 1.0, 0.0)];
        let normals = compute_normals(&vertices, &[0, 1, 2, 0, 2, 7]);
        assert_eq!(normals, vec![Vec3::Z; 3]);
    }
}
