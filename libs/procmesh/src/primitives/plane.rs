//! # Plane Primitive
//!
//! A single quad in the XY plane facing +Z, optionally re-oriented onto a
//! source plane.

use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A plane equation `normal · p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourcePlane {
    /// Plane normal (need not be unit length)
    pub normal: Vec3,
    /// Plane offset
    pub d: f32,
}

/// Options for [`create_plane`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneOptions {
    /// Extent along X (default 1)
    pub width: f32,
    /// Extent along Y (default 1)
    pub height: f32,
    /// Plane the quad should lie in, facing along its normal
    pub source_plane: Option<SourcePlane>,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            source_plane: None,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a 4-vertex, 2-triangle quad centered on the origin.
///
/// With a source plane the quad is rotated so +Z maps onto the plane
/// normal and moved to the point of the plane closest to the origin.
///
/// # Errors
///
/// `InvalidParameter` if the source plane normal is zero.
pub fn create_plane(options: &PlaneOptions) -> GeometryResult<VertexData> {
    let half_width = options.width * 0.5;
    let half_height = options.height * 0.5;

    let mut data = VertexData::with_capacity(4, 2);
    let corners = [
        (Vec2::new(-half_width, -half_height), Vec2::new(0.0, 0.0)),
        (Vec2::new(half_width, -half_height), Vec2::new(1.0, 0.0)),
        (Vec2::new(half_width, half_height), Vec2::new(1.0, 1.0)),
        (Vec2::new(-half_width, half_height), Vec2::new(0.0, 1.0)),
    ];
    for (xy, uv) in corners {
        data.add_vertex(xy.extend(0.0), Vec3::Z, uv);
    }
    data.add_triangle(0, 1, 2);
    data.add_triangle(0, 2, 3);

    if let Some(plane) = options.source_plane {
        let length = plane.normal.length();
        let normal = plane.normal.try_normalize().ok_or_else(|| {
            GeometryError::invalid_parameter("source plane normal must not be zero")
        })?;
        let rotation = Quat::from_rotation_arc(Vec3::Z, normal);
        let origin = -normal * (plane.d / length);
        data.transform(&Mat4::from_rotation_translation(rotation, origin));
    }

    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_counts() {
        let plane = create_plane(&PlaneOptions::default()).unwrap();
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_plane_size() {
        let plane = create_plane(&PlaneOptions {
            width: 4.0,
            height: 2.0,
            ..Default::default()
        })
        .unwrap();
        let (min, max) = plane.bounding_box();
        assert_eq!(min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(max, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_plane_source_plane() {
        let plane = create_plane(&PlaneOptions {
            source_plane: Some(SourcePlane {
                normal: Vec3::new(0.0, 2.0, 0.0),
                d: -3.0,
            }),
            ..Default::default()
        })
        .unwrap();
        for i in 0..4 {
            assert_relative_eq!(plane.normal(i).y, 1.0, epsilon = 1e-5);
            assert_relative_eq!(plane.position(i).y, 1.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_plane_zero_source_normal() {
        let result = create_plane(&PlaneOptions {
            source_plane: Some(SourcePlane {
                normal: Vec3::ZERO,
                d: 1.0,
            }),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
