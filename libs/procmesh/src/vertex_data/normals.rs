//! Smooth normal computation.

use glam::Vec3;

/// Computes per-vertex normals from positions and triangle indices.
///
/// Each vertex accumulates the unnormalized face normals of the triangles
/// touching it, so larger faces weigh more; the sums are then normalized.
/// Vertices referenced by no triangle keep a zero normal. Triangles with an
/// out-of-range index are ignored.
///
/// # Arguments
///
/// * `positions` - Flat `x, y, z` positions
/// * `indices` - Triangle indices, 3 per triangle
///
/// # Returns
///
/// Flat `x, y, z` normals, one per vertex.
pub fn compute_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut accumulated = vec![Vec3::ZERO; vertex_count];
    let point = |i: usize| Vec3::from_slice(&positions[i * 3..i * 3 + 3]);

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= vertex_count || b >= vertex_count || c >= vertex_count {
            continue;
        }
        let (pa, pb, pc) = (point(a), point(b), point(c));
        let face = (pb - pa).cross(pc - pa);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    let mut normals = Vec::with_capacity(vertex_count * 3);
    for n in accumulated {
        normals.extend_from_slice(&n.normalize_or_zero().to_array());
    }
    normals
}
