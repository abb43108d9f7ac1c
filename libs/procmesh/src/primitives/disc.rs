//! # Disc Primitive
//!
//! Flat regular polygon or circular sector in the XY plane, facing +Z.

use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use super::tessellation_option;
use config::constants::clamp_arc;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Options for [`create_disc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscOptions {
    /// Radius (default 0.5)
    pub radius: f32,
    /// Number of rim samples (default 64, minimum 3)
    pub tessellation: u32,
    /// Fraction of the full turn to cover, in (0, 1] (default 1)
    pub arc: f32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for DiscOptions {
    fn default() -> Self {
        Self {
            radius: 0.5,
            tessellation: 64,
            arc: 1.0,
            sides: SideOptions::default(),
        }
    }
}

impl DiscOptions {
    /// Clamps tessellation and arc to their documented ranges.
    pub fn normalized(&self) -> Self {
        Self {
            tessellation: tessellation_option("disc.tessellation", self.tessellation),
            arc: clamp_arc(self.arc),
            ..self.clone()
        }
    }
}

/// Creates a disc fanned from its center.
///
/// A full disc has `tessellation + 1` vertices and closes its fan by
/// wrapping the last rim index back to the first. A partial disc
/// (`arc < 1`) places `tessellation` rim samples on the arc including both
/// end points and has no closing triangle.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_disc, DiscOptions};
///
/// let disc = create_disc(&DiscOptions { tessellation: 4, ..Default::default() }).unwrap();
/// assert_eq!(disc.vertex_count(), 5);
/// assert_eq!(disc.triangle_count(), 4);
/// ```
pub fn create_disc(options: &DiscOptions) -> GeometryResult<VertexData> {
    let options = options.normalized();
    let tessellation = options.tessellation;
    let full_circle = options.arc >= 1.0;

    let mut data = VertexData::with_capacity(tessellation as usize + 1, tessellation as usize);
    data.add_vertex(Vec3::ZERO, Vec3::Z, Vec2::splat(0.5));

    let step = if full_circle {
        TAU / tessellation as f32
    } else {
        TAU * options.arc / (tessellation - 1) as f32
    };

    for i in 0..tessellation {
        let angle = step * i as f32;
        let (sin, cos) = angle.sin_cos();
        data.add_vertex(
            Vec3::new(cos, sin, 0.0) * options.radius,
            Vec3::Z,
            Vec2::new((cos + 1.0) * 0.5, (sin + 1.0) * 0.5),
        );
    }

    let triangles = if full_circle { tessellation } else { tessellation - 1 };
    for i in 0..triangles {
        let next = (i + 1) % tessellation;
        data.add_triangle(0, i + 1, next + 1);
    }

    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_disc_full_circle_counts() {
        let disc = create_disc(&DiscOptions {
            tessellation: 4,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(disc.vertex_count(), 5);
        assert_eq!(disc.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1]);
        assert!(disc.validate().is_ok());
    }

    #[test]
    fn test_disc_faces_positive_z() {
        let disc = create_disc(&DiscOptions::default()).unwrap();
        let a = disc.position(0);
        let b = disc.position(1);
        let c = disc.position(2);
        assert!((b - a).cross(c - a).z > 0.0);
    }

    #[test]
    fn test_disc_half_arc() {
        let disc = create_disc(&DiscOptions {
            tessellation: 5,
            arc: 0.5,
            radius: 1.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(disc.vertex_count(), 6);
        assert_eq!(disc.triangle_count(), 4);
        let last = disc.position(5);
        assert_relative_eq!(last.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_disc_tessellation_is_clamped() {
        let disc = create_disc(&DiscOptions {
            tessellation: 0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(disc.vertex_count(), 4);
    }

    #[test]
    fn test_disc_rim_uvs() {
        let disc = create_disc(&DiscOptions {
            tessellation: 4,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(disc.uv(0), Vec2::splat(0.5));
        assert_relative_eq!(disc.uv(1).x, 1.0);
        assert_relative_eq!(disc.uv(1).y, 0.5);
    }
}
