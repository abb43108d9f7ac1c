//! Shared helpers for the integration tests.

#![allow(dead_code)]

use glam::Vec3;
use procmesh::VertexData;
use std::collections::HashMap;

/// Positions closer than this are treated as one point.
pub const WELD_TOLERANCE: f32 = 1e-4;

/// Checks index range, triangle grouping and attribute lengths.
pub fn assert_well_formed(data: &VertexData) {
    assert_eq!(data.indices.len() % 3, 0, "index count not a multiple of 3");
    let count = data.vertex_count() as u32;
    assert!(
        data.indices.iter().all(|&i| i < count),
        "index out of range for {} vertices",
        count
    );
    assert!(data.validate().is_ok());
}

/// Maps every vertex to the first earlier vertex at the same position.
pub fn weld(data: &VertexData) -> Vec<usize> {
    let mut representatives: Vec<(Vec3, usize)> = Vec::new();
    (0..data.vertex_count())
        .map(|i| {
            let p = data.position(i);
            match representatives
                .iter()
                .find(|(q, _)| q.distance(p) < WELD_TOLERANCE)
            {
                Some(&(_, id)) => id,
                None => {
                    let id = representatives.len();
                    representatives.push((p, id));
                    id
                }
            }
        })
        .collect()
}

/// Undirected welded edges not shared by exactly two triangles.
///
/// Triangles that collapse under welding (pole fans) are ignored.
pub fn unpaired_edges(data: &VertexData) -> usize {
    let ids = weld(data);
    let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
    for [a, b, c] in data.triangles() {
        let t = [ids[a as usize], ids[b as usize], ids[c as usize]];
        if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
            continue;
        }
        for k in 0..3 {
            let (u, v) = (t[k], t[(k + 1) % 3]);
            *edges.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }
    edges.values().filter(|&&n| n != 2).count()
}

/// True if every welded edge is shared by exactly two triangles.
pub fn is_closed(data: &VertexData) -> bool {
    unpaired_edges(data) == 0
}

/// True if every vertex touched by a triangle has a unit normal.
pub fn has_unit_normals(data: &VertexData) -> bool {
    let mut used = vec![false; data.vertex_count()];
    for &i in &data.indices {
        used[i as usize] = true;
    }
    (0..data.vertex_count())
        .filter(|&i| used[i])
        .all(|i| (data.normal(i).length() - 1.0).abs() < 1e-4)
}

/// Signed volume enclosed by the triangles; positive when they face outward.
pub fn signed_volume(data: &VertexData) -> f32 {
    data.triangles()
        .map(|[a, b, c]| {
            let (pa, pb, pc) = (
                data.position(a as usize),
                data.position(b as usize),
                data.position(c as usize),
            );
            pa.dot(pb.cross(pc)) / 6.0
        })
        .sum()
}
