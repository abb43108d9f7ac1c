//! # Icosphere Primitive
//!
//! Sphere built by subdividing each icosahedron face into `subdivisions²`
//! triangles and projecting the new points onto the unit sphere.

use super::polyhedron::{solids, spherical_uv, PolyhedronKind};
use super::subdivision_option;
use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Options for [`create_icosphere`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcoSphereOptions {
    /// Radius used for any axis not given (default 1)
    pub radius: f32,
    /// Radius along X
    pub radius_x: Option<f32>,
    /// Radius along Y
    pub radius_y: Option<f32>,
    /// Radius along Z
    pub radius_z: Option<f32>,
    /// One normal per sub-triangle instead of per vertex (default true)
    pub flat: bool,
    /// Splits per icosahedron edge (default 4, minimum 1)
    pub subdivisions: u32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for IcoSphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            radius_x: None,
            radius_y: None,
            radius_z: None,
            flat: true,
            subdivisions: 4,
            sides: SideOptions::default(),
        }
    }
}

impl IcoSphereOptions {
    fn radii(&self) -> Vec3 {
        Vec3::new(
            self.radius_x.unwrap_or(self.radius),
            self.radius_y.unwrap_or(self.radius),
            self.radius_z.unwrap_or(self.radius),
        )
    }
}

/// Creates an icosphere.
///
/// In smooth mode each icosahedron face owns a shared grid of
/// `(s + 1)(s + 2) / 2` vertices with radial normals. In flat mode every
/// sub-triangle owns its three vertices and takes its normal from the
/// direction of its own centroid.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_icosphere, IcoSphereOptions};
///
/// let ico = create_icosphere(&IcoSphereOptions {
///     subdivisions: 1,
///     flat: false,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(ico.indices.len(), 60);
/// ```
pub fn create_icosphere(options: &IcoSphereOptions) -> GeometryResult<VertexData> {
    let subdivisions = subdivision_option("icosphere.subdivisions", options.subdivisions);
    let radii = options.radii();
    let table = solids::table(PolyhedronKind::Icosahedron);

    let mut data = VertexData::new();
    for face in table.faces {
        let [a, b, c] = [table.vertices[face[0]], table.vertices[face[1]], table.vertices[face[2]]];
        let grid = FaceGrid::new(a, b, c, subdivisions);
        if options.flat {
            flat_face(&mut data, &grid, radii);
        } else {
            smooth_face(&mut data, &grid, radii);
        }
    }

    Ok(data.finish(&options.sides))
}

/// Barycentric grid on one face: `P(i, j) = a + (b - a)·i/s + (c - a)·j/s`
/// for `i + j <= s`, projected onto the unit sphere.
struct FaceGrid {
    points: Vec<Vec3>,
    subdivisions: u32,
}

impl FaceGrid {
    fn new(a: Vec3, b: Vec3, c: Vec3, subdivisions: u32) -> Self {
        let s = subdivisions as f32;
        let mut points = Vec::new();
        for i in 0..=subdivisions {
            for j in 0..=subdivisions - i {
                let p = a + (b - a) * (i as f32 / s) + (c - a) * (j as f32 / s);
                points.push(p.normalize());
            }
        }
        Self { points, subdivisions }
    }

    fn index(&self, i: u32, j: u32) -> u32 {
        // Row i holds s + 1 - i points.
        i * (self.subdivisions + 1) - i * i.saturating_sub(1) / 2 + j
    }

    /// Sub-triangles as grid index triples, wound like the parent face.
    fn triangles(&self) -> Vec<[u32; 3]> {
        let s = self.subdivisions;
        let mut triangles = Vec::with_capacity((s * s) as usize);
        for i in 0..s {
            for j in 0..s - i {
                triangles.push([self.index(i, j), self.index(i + 1, j), self.index(i, j + 1)]);
                if i + j + 2 <= s {
                    triangles.push([self.index(i + 1, j), self.index(i + 1, j + 1), self.index(i, j + 1)]);
                }
            }
        }
        triangles
    }
}

fn flat_face(data: &mut VertexData, grid: &FaceGrid, radii: Vec3) {
    for [i0, i1, i2] in grid.triangles() {
        let corners = [
            grid.points[i0 as usize],
            grid.points[i1 as usize],
            grid.points[i2 as usize],
        ];
        let centroid = (corners[0] + corners[1] + corners[2]).normalize_or_zero();
        let normal = (centroid / radii).normalize_or_zero();
        let mut uvs = corners.map(spherical_uv);
        fix_seam(&mut uvs, &corners);

        let base = data.vertex_count() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            data.add_vertex(*corner * radii, normal, uv);
        }
        data.add_triangle(base, base + 1, base + 2);
    }
}

fn smooth_face(data: &mut VertexData, grid: &FaceGrid, radii: Vec3) {
    let mut uvs: Vec<Vec2> = grid.points.iter().copied().map(spherical_uv).collect();
    fix_seam(&mut uvs, &grid.points);

    let base = data.vertex_count() as u32;
    for (point, uv) in grid.points.iter().zip(uvs) {
        data.add_vertex(*point * radii, (*point / radii).normalize_or_zero(), uv);
    }
    for [i0, i1, i2] in grid.triangles() {
        data.add_triangle(base + i0, base + i1, base + i2);
    }
}

/// Keeps one patch of texture coordinates on one side of the `u` seam and
/// gives pole points the mean `u` of the rest.
fn fix_seam(uvs: &mut [Vec2], directions: &[Vec3]) {
    let (min, max) = uvs
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), uv| (lo.min(uv.x), hi.max(uv.x)));
    if max - min > 0.5 {
        for uv in uvs.iter_mut() {
            if uv.x < 0.5 {
                uv.x += 1.0;
            }
        }
    }

    let is_pole = |d: &Vec3| d.y.abs() > 1.0 - 1e-5;
    let regular: Vec<f32> = uvs
        .iter()
        .zip(directions)
        .filter(|(_, d)| !is_pole(d))
        .map(|(uv, _)| uv.x)
        .collect();
    if regular.is_empty() {
        return;
    }
    let mean = regular.iter().sum::<f32>() / regular.len() as f32;
    for (uv, d) in uvs.iter_mut().zip(directions) {
        if is_pole(d) {
            uv.x = mean;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_indexing() {
        let grid = FaceGrid::new(Vec3::X, Vec3::Y, Vec3::Z, 3);
        assert_eq!(grid.points.len(), 10);
        assert_eq!(grid.index(0, 3), 3);
        assert_eq!(grid.index(1, 0), 4);
        assert_eq!(grid.index(2, 0), 7);
        assert_eq!(grid.index(3, 0), 9);
        assert_eq!(grid.triangles().len(), 9);
    }

    #[test]
    fn test_smooth_subdivision_one_is_icosahedron() {
        let ico = create_icosphere(&IcoSphereOptions {
            subdivisions: 1,
            flat: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ico.indices.len(), 60);

        let mut directions: Vec<Vec3> = Vec::new();
        for i in 0..ico.vertex_count() {
            let d = ico.position(i).normalize();
            if !directions.iter().any(|e| e.distance(d) < 1e-4) {
                directions.push(d);
            }
        }
        assert_eq!(directions.len(), 12);
    }

    #[test]
    fn test_flat_counts_and_normals() {
        let ico = create_icosphere(&IcoSphereOptions {
            subdivisions: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ico.triangle_count(), 20 * 4);
        assert_eq!(ico.vertex_count(), 20 * 4 * 3);
        for t in ico.indices.chunks_exact(3) {
            let a = ico.position(t[0] as usize);
            let b = ico.position(t[1] as usize);
            let c = ico.position(t[2] as usize);
            let face = (b - a).cross(c - a).normalize();
            assert!(face.dot(ico.normal(t[0] as usize)) > 0.95);
        }
    }

    #[test]
    fn test_points_lie_on_radius() {
        let ico = create_icosphere(&IcoSphereOptions {
            radius: 2.5,
            subdivisions: 3,
            flat: false,
            ..Default::default()
        })
        .unwrap();
        for i in 0..ico.vertex_count() {
            assert_relative_eq!(ico.position(i).length(), 2.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_uv_patches_do_not_straddle_seam() {
        let ico = create_icosphere(&IcoSphereOptions {
            subdivisions: 3,
            ..Default::default()
        })
        .unwrap();
        for t in ico.indices.chunks_exact(3) {
            let us = [ico.uv(t[0] as usize).x, ico.uv(t[1] as usize).x, ico.uv(t[2] as usize).x];
            let spread = us.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
                - us.iter().cloned().fold(f32::INFINITY, f32::min);
            assert!(spread < 0.9);
        }
    }
}
