//! # Sphere Primitive
//!
//! Latitude/longitude sphere or ellipsoid. Rows run from the north pole
//! (`+Y`) down to the south pole; columns run counter-clockwise seen from
//! above. Pole rows keep a full ring of coincident vertices so every column
//! gets its own texture coordinate.

use super::subdivision_option;
use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::{clamp_arc, DEFAULT_TESSELLATION};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Options for [`create_sphere`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereOptions {
    /// Number of horizontal segments (default 32, minimum 1)
    pub segments: u32,
    /// Diameter used for any axis not given (default 1)
    pub diameter: f32,
    /// Diameter along X
    pub diameter_x: Option<f32>,
    /// Diameter along Y
    pub diameter_y: Option<f32>,
    /// Diameter along Z
    pub diameter_z: Option<f32>,
    /// Fraction of the full turn around Y, in (0, 1]
    pub arc: f32,
    /// Fraction of the pole-to-pole sweep, in (0, 1]
    pub slice: f32,
    /// Skip the zero-area triangles touching the poles
    pub dedup_top_bottom_indices: bool,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            segments: DEFAULT_TESSELLATION,
            diameter: 1.0,
            diameter_x: None,
            diameter_y: None,
            diameter_z: None,
            arc: 1.0,
            slice: 1.0,
            dedup_top_bottom_indices: false,
            sides: SideOptions::default(),
        }
    }
}

impl SphereOptions {
    /// Clamps segments, arc and slice to their documented ranges.
    pub fn normalized(&self) -> Self {
        Self {
            segments: subdivision_option("sphere.segments", self.segments),
            arc: clamp_arc(self.arc),
            slice: clamp_arc(self.slice),
            ..self.clone()
        }
    }

    /// Radii along X, Y and Z.
    pub fn radii(&self) -> Vec3 {
        Vec3::new(
            self.diameter_x.unwrap_or(self.diameter),
            self.diameter_y.unwrap_or(self.diameter),
            self.diameter_z.unwrap_or(self.diameter),
        ) * 0.5
    }
}

/// Creates a sphere.
///
/// There are `segments + 2` rows of quads and twice as many columns, so the
/// buffer holds `(rows + 1) * (columns + 1)` vertices.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_sphere, SphereOptions};
///
/// let sphere = create_sphere(&SphereOptions { segments: 2, ..Default::default() }).unwrap();
/// assert_eq!(sphere.vertex_count(), 5 * 9);
/// ```
pub fn create_sphere(options: &SphereOptions) -> GeometryResult<VertexData> {
    let options = options.normalized();
    let radii = options.radii();
    let rows = options.segments + 2;
    let columns = rows * 2;
    let stride = columns + 1;

    let mut data = VertexData::with_capacity(
        ((rows + 1) * stride) as usize,
        (rows * columns * 2) as usize,
    );

    for row in 0..=rows {
        let v = row as f32 / rows as f32;
        let theta = v * PI * options.slice;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for column in 0..=columns {
            let u = column as f32 / columns as f32;
            let phi = u * TAU * options.arc;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let direction = Vec3::new(sin_theta * cos_phi, cos_theta, -sin_theta * sin_phi);
            let normal = (direction / radii).normalize_or_zero();
            data.add_vertex(direction * radii, normal, Vec2::new(u, 1.0 - v));
        }
    }

    let full_slice = options.slice >= 1.0;
    for row in 0..rows {
        for column in 0..columns {
            let a = row * stride + column;
            let next_column = a + 1;
            let next_row = a + stride;
            let diagonal = next_row + 1;

            let skip_top = options.dedup_top_bottom_indices && row == 0;
            let skip_bottom = options.dedup_top_bottom_indices && row + 1 == rows && full_slice;
            if !skip_top {
                data.add_triangle(a, next_row, next_column);
            }
            if !skip_bottom {
                data.add_triangle(next_column, next_row, diagonal);
            }
        }
    }

    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_counts() {
        let sphere = create_sphere(&SphereOptions {
            segments: 4,
            ..Default::default()
        })
        .unwrap();
        // 6 rows, 12 columns
        assert_eq!(sphere.vertex_count(), 7 * 13);
        assert_eq!(sphere.triangle_count(), 6 * 12 * 2);
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn test_sphere_radius_and_normals() {
        let sphere = create_sphere(&SphereOptions {
            diameter: 4.0,
            segments: 6,
            ..Default::default()
        })
        .unwrap();
        for i in 0..sphere.vertex_count() {
            let p = sphere.position(i);
            assert_relative_eq!(p.length(), 2.0, epsilon = 1e-4);
            assert_relative_eq!(sphere.normal(i).dot(p / 2.0), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = create_sphere(&SphereOptions {
            segments: 3,
            dedup_top_bottom_indices: true,
            ..Default::default()
        })
        .unwrap();
        for t in sphere.indices.chunks_exact(3) {
            let a = sphere.position(t[0] as usize);
            let b = sphere.position(t[1] as usize);
            let c = sphere.position(t[2] as usize);
            let centroid = (a + b + c) / 3.0;
            assert!((b - a).cross(c - a).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_sphere_dedup_skips_pole_triangles() {
        let plain = create_sphere(&SphereOptions {
            segments: 2,
            ..Default::default()
        })
        .unwrap();
        let dedup = create_sphere(&SphereOptions {
            segments: 2,
            dedup_top_bottom_indices: true,
            ..Default::default()
        })
        .unwrap();
        // One triangle per column is dropped at each pole.
        assert_eq!(plain.triangle_count() - dedup.triangle_count(), 2 * 8);
    }

    #[test]
    fn test_sphere_ellipsoid_normals() {
        let sphere = create_sphere(&SphereOptions {
            diameter_y: Some(4.0),
            segments: 2,
            ..Default::default()
        })
        .unwrap();
        let (min, max) = sphere.bounding_box();
        assert_relative_eq!(max.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(min.x, -0.5, epsilon = 1e-5);
        // North pole normal still points up.
        assert_relative_eq!(sphere.normal(0).y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_uvs() {
        let sphere = create_sphere(&SphereOptions {
            segments: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(sphere.uv(0), Vec2::new(0.0, 1.0));
        let last = sphere.vertex_count() - 1;
        assert_eq!(sphere.uv(last), Vec2::new(1.0, 0.0));
    }
}
