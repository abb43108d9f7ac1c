//! # Ribbon Primitive
//!
//! The sweep every path-based shape is built on: a surface stitched
//! between consecutive paths of a path array. Vertex `(p, i)` is point `i`
//! of path `p`; the face normal follows `along path × across paths`.

use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Options for [`create_ribbon`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonOptions {
    /// At least two paths; longer paths are truncated to the shortest
    pub path_array: Vec<Vec<Vec3>>,
    /// Join the last path back to the first
    pub close_array: bool,
    /// Join the last point of every path back to its first
    pub close_path: bool,
    /// Swap the `u` and `v` texture axes
    pub invert_uv: bool,
    /// Explicit texture coordinates, one per generated vertex
    pub uvs: Option<Vec<Vec2>>,
    /// Explicit colors, one per generated vertex
    pub colors: Option<Vec<Vec4>>,
    /// Side orientation
    pub sides: SideOptions,
}

/// Creates a ribbon.
///
/// Closing a path or the array duplicates the seam points so they get
/// their own texture coordinates; the normals on both sides of a seam are
/// averaged so the surface shades smoothly across it.
///
/// Without explicit uvs, `u` is the distance along each path divided by
/// that path's length and `v` the distance across the paths at each point
/// index divided by the total.
///
/// # Errors
///
/// `InvalidParameter` if there are fewer than two paths, a path is empty,
/// or explicit uvs/colors do not match the vertex count.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_ribbon, RibbonOptions};
/// use glam::Vec3;
///
/// let ribbon = create_ribbon(&RibbonOptions {
///     path_array: vec![
///         vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0],
///         vec![Vec3::Y, Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0)],
///     ],
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(ribbon.vertex_count(), 6);
/// assert_eq!(ribbon.triangle_count(), 4);
/// ```
pub fn create_ribbon(options: &RibbonOptions) -> GeometryResult<VertexData> {
    let grid = RibbonGrid::new(options)?;
    let mut data = grid.vertex_data();

    if let Some(uvs) = &options.uvs {
        if uvs.len() != data.vertex_count() {
            return Err(GeometryError::invalid_parameter(format!(
                "ribbon has {} vertices but {} uvs were given",
                data.vertex_count(),
                uvs.len()
            )));
        }
        data.uvs = uvs.iter().flat_map(|uv| uv.to_array()).collect();
    }
    if let Some(colors) = &options.colors {
        if colors.len() != data.vertex_count() {
            return Err(GeometryError::invalid_parameter(format!(
                "ribbon has {} vertices but {} colors were given",
                data.vertex_count(),
                colors.len()
            )));
        }
        data.colors = Some(colors.iter().flat_map(|c| c.to_array()).collect());
    }

    Ok(data.finish(&options.sides))
}

/// Recomputes a ribbon's positions and normals in place of `existing`.
///
/// # Errors
///
/// `PreconditionViolation` if the new paths change the vertex or index
/// count.
pub fn rebuild_ribbon(existing: &VertexData, options: &RibbonOptions) -> GeometryResult<VertexData> {
    existing.replace_geometry(create_ribbon(options)?)
}

/// The path array after truncation and seam duplication.
struct RibbonGrid {
    /// Row-major points: one row per path
    rows: Vec<Vec<Vec3>>,
    close_path: bool,
    close_array: bool,
    invert_uv: bool,
}

impl RibbonGrid {
    fn new(options: &RibbonOptions) -> GeometryResult<Self> {
        if options.path_array.len() < 2 {
            return Err(GeometryError::invalid_parameter(format!(
                "ribbon needs at least two paths, got {}",
                options.path_array.len()
            )));
        }
        let shortest = options.path_array.iter().map(Vec::len).min().unwrap_or(0);
        if shortest == 0 {
            return Err(GeometryError::invalid_parameter("ribbon path has no points"));
        }
        if options.path_array.iter().any(|p| p.len() != shortest) {
            warn!(shortest, "ribbon paths differ in length; truncating to the shortest");
        }

        let mut rows: Vec<Vec<Vec3>> = options
            .path_array
            .iter()
            .map(|path| {
                let mut row = path[..shortest].to_vec();
                if options.close_path {
                    row.push(path[0]);
                }
                row
            })
            .collect();
        if options.close_array {
            rows.push(rows[0].clone());
        }

        Ok(Self {
            rows,
            close_path: options.close_path,
            close_array: options.close_array,
            invert_uv: options.invert_uv,
        })
    }

    fn columns(&self) -> usize {
        self.rows[0].len()
    }

    fn vertex_data(&self) -> VertexData {
        let row_count = self.rows.len();
        let columns = self.columns();
        let mut data = VertexData::with_capacity(row_count * columns, (row_count - 1) * (columns - 1).max(1) * 2);

        let along = self.along_distances();
        let across = self.across_distances();
        for (p, row) in self.rows.iter().enumerate() {
            let row_length = along[p].last().copied().unwrap_or(0.0);
            for (i, point) in row.iter().enumerate() {
                let column_length = across[i].last().copied().unwrap_or(0.0);
                let u = if row_length > 0.0 { along[p][i] / row_length } else { 0.0 };
                let v = if column_length > 0.0 { across[i][p] / column_length } else { 0.0 };
                let uv = if self.invert_uv { Vec2::new(v, u) } else { Vec2::new(u, v) };
                data.add_vertex(*point, Vec3::ZERO, uv);
            }
        }

        let stride = columns as u32;
        for p in 0..row_count as u32 - 1 {
            for i in 0..stride.saturating_sub(1) {
                let a = p * stride + i;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                data.add_triangle(a, b, c);
                data.add_triangle(b, d, c);
            }
        }

        data.compute_normals();
        self.average_seams(&mut data);
        data
    }

    /// Cumulative distance along each path.
    fn along_distances(&self) -> Vec<Vec<f32>> {
        self.rows.iter().map(|row| cumulative(row.iter().copied())).collect()
    }

    /// Cumulative distance across paths at each point index.
    fn across_distances(&self) -> Vec<Vec<f32>> {
        (0..self.columns())
            .map(|i| cumulative(self.rows.iter().map(|row| row[i])))
            .collect()
    }

    fn average_seams(&self, data: &mut VertexData) {
        let columns = self.columns();
        let rows = self.rows.len();
        let mut pairs = Vec::new();
        if self.close_path {
            pairs.extend((0..rows).map(|p| (p * columns, p * columns + columns - 1)));
        }
        if self.close_array {
            pairs.extend((0..columns).map(|i| (i, (rows - 1) * columns + i)));
        }
        for (first, second) in pairs {
            let shared = (data.normal(first) + data.normal(second)).normalize_or_zero();
            data.normals[first * 3..first * 3 + 3].copy_from_slice(&shared.to_array());
            data.normals[second * 3..second * 3 + 3].copy_from_slice(&shared.to_array());
        }
    }
}

fn cumulative(points: impl Iterator<Item = Vec3>) -> Vec<f32> {
    let mut distances = Vec::new();
    let mut previous: Option<Vec3> = None;
    let mut total = 0.0;
    for point in points {
        if let Some(prev) = previous {
            total += point.distance(prev);
        }
        distances.push(total);
        previous = Some(point);
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_ring(y: f32) -> Vec<Vec3> {
        // Counter-clockwise seen from above.
        vec![
            Vec3::new(1.0, y, 1.0),
            Vec3::new(1.0, y, -1.0),
            Vec3::new(-1.0, y, -1.0),
            Vec3::new(-1.0, y, 1.0),
        ]
    }

    #[test]
    fn test_ribbon_flat_strip() {
        let ribbon = create_ribbon(&RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X], vec![Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]],
            ..Default::default()
        })
        .unwrap();
        // along X, across Y: normal +Z
        for i in 0..4 {
            assert_relative_eq!(ribbon.normal(i).z, 1.0, epsilon = 1e-6);
        }
        assert_eq!(ribbon.uv(3), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_ribbon_truncates_to_shortest() {
        let ribbon = create_ribbon(&RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0], vec![Vec3::Y, Vec3::ONE]],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ribbon.vertex_count(), 4);
    }

    #[test]
    fn test_ribbon_close_path_seam() {
        let ribbon = create_ribbon(&RibbonOptions {
            path_array: vec![square_ring(0.0), square_ring(1.0)],
            close_path: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ribbon.vertex_count(), 10);
        assert_eq!(ribbon.triangle_count(), 8);
        assert_eq!(ribbon.position(0), ribbon.position(4));
        assert_eq!(ribbon.normal(0), ribbon.normal(4));
        assert_relative_eq!(ribbon.uv(4).x, 1.0);
    }

    #[test]
    fn test_ribbon_close_array() {
        let rows = vec![
            vec![Vec3::ZERO, Vec3::Y],
            vec![Vec3::X, Vec3::new(1.0, 1.0, 0.0)],
            vec![Vec3::new(1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, -1.0)],
        ];
        let ribbon = create_ribbon(&RibbonOptions {
            path_array: rows,
            close_array: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ribbon.vertex_count(), 8);
        assert_eq!(ribbon.triangle_count(), 6);
        assert_eq!(ribbon.normal(0), ribbon.normal(6));
    }

    #[test]
    fn test_ribbon_invert_uv() {
        let ribbon = create_ribbon(&RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X], vec![Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]],
            invert_uv: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ribbon.uv(1), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_ribbon_explicit_colors_must_match() {
        let result = create_ribbon(&RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X], vec![Vec3::Y, Vec3::ONE]],
            colors: Some(vec![Vec4::ONE; 3]),
            ..Default::default()
        });
        assert!(matches!(result, Err(GeometryError::InvalidParameter { .. })));
    }

    #[test]
    fn test_ribbon_needs_two_paths() {
        let result = create_ribbon(&RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X]],
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_rebuild_ribbon_keeps_topology() {
        let mut options = RibbonOptions {
            path_array: vec![vec![Vec3::ZERO, Vec3::X], vec![Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]],
            ..Default::default()
        };
        let original = create_ribbon(&options).unwrap();
        options.path_array[1][1] = Vec3::new(1.0, 2.0, 0.0);
        let rebuilt = rebuild_ribbon(&original, &options).unwrap();
        assert_eq!(rebuilt.position(3), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(rebuilt.uvs, original.uvs);

        options.path_array[1].push(Vec3::ONE);
        options.path_array[0].push(Vec3::ONE);
        assert!(matches!(
            rebuild_ribbon(&original, &options),
            Err(GeometryError::PreconditionViolation { .. })
        ));
    }
}
