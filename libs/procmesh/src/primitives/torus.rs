//! # Torus Primitive
//!
//! Ring torus lying in the XZ plane around the Y axis.

use super::tessellation_option;
use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Options for [`create_torus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusOptions {
    /// Diameter of the ring through the tube centers (default 1)
    pub diameter: f32,
    /// Tube diameter (default 0.5)
    pub thickness: f32,
    /// Samples around both the ring and the tube (default 16, minimum 3)
    pub tessellation: u32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TorusOptions {
    fn default() -> Self {
        Self {
            diameter: 1.0,
            thickness: 0.5,
            tessellation: 16,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a torus.
///
/// Vertex `(i, j)` sits at ring angle `i` and tube angle `j`; both loops
/// repeat their first sample so the texture seams have their own vertices.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_torus, TorusOptions};
///
/// let torus = create_torus(&TorusOptions { tessellation: 8, ..Default::default() }).unwrap();
/// assert_eq!(torus.vertex_count(), 81);
/// assert_eq!(torus.triangle_count(), 128);
/// ```
pub fn create_torus(options: &TorusOptions) -> GeometryResult<VertexData> {
    let tessellation = tessellation_option("torus.tessellation", options.tessellation);
    let ring_radius = options.diameter * 0.5;
    let tube_radius = options.thickness * 0.5;
    let stride = tessellation + 1;

    let mut data = VertexData::with_capacity(
        (stride * stride) as usize,
        (tessellation * tessellation * 2) as usize,
    );

    for i in 0..=tessellation {
        let u = i as f32 / tessellation as f32;
        let (sin_theta, cos_theta) = (u * TAU).sin_cos();
        let radial = Vec3::new(cos_theta, 0.0, -sin_theta);
        let center = radial * ring_radius;
        for j in 0..=tessellation {
            let v = j as f32 / tessellation as f32;
            let (sin_phi, cos_phi) = (v * TAU).sin_cos();
            let normal = radial * cos_phi + Vec3::Y * sin_phi;
            data.add_vertex(center + normal * tube_radius, normal, Vec2::new(u, v));
        }
    }

    for i in 0..tessellation {
        for j in 0..tessellation {
            let a = i * stride + j;
            let b = a + stride;
            let c = a + 1;
            let d = b + 1;
            data.add_triangle(a, b, c);
            data.add_triangle(b, d, c);
        }
    }

    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_torus_normals_point_away_from_tube_center() {
        let torus = create_torus(&TorusOptions {
            diameter: 2.0,
            thickness: 0.5,
            tessellation: 12,
            ..Default::default()
        })
        .unwrap();
        for i in 0..torus.vertex_count() {
            let p = torus.position(i);
            let center = Vec3::new(p.x, 0.0, p.z).normalize() * 1.0;
            let expected = (p - center).normalize();
            assert_relative_eq!(torus.normal(i).dot(expected), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_torus_winding_matches_normals() {
        let torus = create_torus(&TorusOptions::default()).unwrap();
        for t in torus.indices.chunks_exact(3) {
            let a = torus.position(t[0] as usize);
            let b = torus.position(t[1] as usize);
            let c = torus.position(t[2] as usize);
            let face = (b - a).cross(c - a);
            assert!(face.dot(torus.normal(t[0] as usize)) > 0.0);
        }
    }

    #[test]
    fn test_torus_extent() {
        let torus = create_torus(&TorusOptions::default()).unwrap();
        let (min, max) = torus.bounding_box();
        assert_relative_eq!(max.x, 0.75, epsilon = 1e-5);
        assert_relative_eq!(max.y, 0.25, epsilon = 1e-3);
        assert_relative_eq!(min.z, -0.75, epsilon = 1e-3);
    }
}
