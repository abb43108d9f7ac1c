//! # Tube Primitive
//!
//! Sweeps a circle along a 3D path. Each path sample gets one ring built
//! in the plane of the sample's normal and binormal; the rings are stitched
//! by [`create_ribbon`](super::create_ribbon).

use super::ribbon::{create_ribbon, RibbonOptions};
use super::{tessellation_option, Cap, PathFunction};
use crate::error::{GeometryError, GeometryResult};
use crate::path3d::Path3D;
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::clamp_arc;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::TAU;
use std::fmt;

/// Options for [`create_tube`].
#[derive(Clone)]
pub struct TubeOptions {
    /// Path followed by the tube axis (at least two distinct points)
    pub path: Vec<Vec3>,
    /// Constant radius (default 1)
    pub radius: f32,
    /// Samples around each ring (default 64, minimum 3)
    pub tessellation: u32,
    /// Per-sample radius; overrides `radius` when set
    pub radius_function: Option<PathFunction>,
    /// Which ends are closed (default none)
    pub cap: Cap,
    /// Fraction of each ring to build, in (0, 1] (default 1)
    pub arc: f32,
    /// Swap the `u` and `v` texture axes of the wall
    pub invert_uv: bool,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            radius: 1.0,
            tessellation: 64,
            radius_function: None,
            cap: Cap::NoCap,
            arc: 1.0,
            invert_uv: false,
            sides: SideOptions::default(),
        }
    }
}

impl fmt::Debug for TubeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TubeOptions")
            .field("path", &self.path)
            .field("radius", &self.radius)
            .field("tessellation", &self.tessellation)
            .field("radius_function", &self.radius_function.is_some())
            .field("cap", &self.cap)
            .field("arc", &self.arc)
            .field("invert_uv", &self.invert_uv)
            .field("sides", &self.sides)
            .finish()
    }
}

/// Creates a tube.
///
/// A full ring (`arc == 1`) has `tessellation` samples closed by a seam
/// column; a partial ring has `tessellation + 1` samples and stays open.
/// Caps are separate fans so their normals point along the path.
///
/// # Errors
///
/// `InvalidParameter` for an empty path, `DegenerateGeometry` if every path
/// point coincides.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_tube, TubeOptions};
/// use glam::Vec3;
///
/// let tube = create_tube(&TubeOptions {
///     path: vec![Vec3::ZERO, Vec3::Y, Vec3::Y * 2.0],
///     tessellation: 8,
///     ..Default::default()
/// })
/// .unwrap();
/// // three rings of 8 samples plus the seam column
/// assert_eq!(tube.vertex_count(), 27);
/// ```
pub fn create_tube(options: &TubeOptions) -> GeometryResult<VertexData> {
    if options.path.is_empty() {
        return Err(GeometryError::invalid_parameter("tube path has no points"));
    }
    let path = Path3D::new(&options.path)?;
    let tessellation = tessellation_option("tube.tessellation", options.tessellation);
    let arc = clamp_arc(options.arc);
    let full = arc >= 1.0;
    let step = TAU * arc / tessellation as f32;
    let samples = if full { tessellation } else { tessellation + 1 };

    let rings: Vec<Vec<Vec3>> = (0..path.len())
        .map(|i| {
            let radius = match &options.radius_function {
                Some(f) => f(i, path.distances()[i]),
                None => options.radius,
            };
            let tangent = path.tangents()[i];
            let normal = path.normals()[i] * radius;
            (0..samples)
                .map(|t| path.points()[i] + Quat::from_axis_angle(tangent, step * t as f32) * normal)
                .collect()
        })
        .collect();

    let mut data = create_ribbon(&RibbonOptions {
        path_array: rings.clone(),
        close_path: full,
        invert_uv: options.invert_uv,
        ..Default::default()
    })?;

    let last = path.len() - 1;
    if options.cap.has_start() {
        let cap = ring_cap(path.points()[0], &rings[0], -path.tangents()[0], step, full, true);
        data.merge_with(&cap)?;
    }
    if options.cap.has_end() {
        let cap = ring_cap(path.points()[last], &rings[last], path.tangents()[last], step, full, false);
        data.merge_with(&cap)?;
    }

    Ok(data.finish(&options.sides))
}

/// Recomputes a tube's positions and normals in place of `existing`.
///
/// # Errors
///
/// `PreconditionViolation` if the path length, tessellation, arc or caps
/// changed the vertex or index count.
pub fn rebuild_tube(existing: &VertexData, options: &TubeOptions) -> GeometryResult<VertexData> {
    existing.replace_geometry(create_tube(options)?)
}

/// Fan from the ring's center, facing `normal`.
fn ring_cap(center: Vec3, ring: &[Vec3], normal: Vec3, step: f32, full: bool, start: bool) -> VertexData {
    let mut data = VertexData::with_capacity(ring.len() + 1, ring.len());
    let hub = data.add_vertex(center, normal, Vec2::splat(0.5));
    for (k, point) in ring.iter().enumerate() {
        let (sin, cos) = (step * k as f32).sin_cos();
        data.add_vertex(*point, normal, Vec2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin));
    }

    let count = ring.len() as u32;
    let spokes = if full { count } else { count - 1 };
    for k in 0..spokes {
        let current = hub + 1 + k;
        let next = hub + 1 + (k + 1) % count;
        if start {
            data.add_triangle(hub, next, current);
        } else {
            data.add_triangle(hub, current, next);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn straight() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::Y, Vec3::Y * 2.0]
    }

    #[test]
    fn test_tube_rings_lie_on_radius() {
        let tube = create_tube(&TubeOptions {
            path: straight(),
            radius: 0.5,
            tessellation: 12,
            ..Default::default()
        })
        .unwrap();
        for i in 0..tube.vertex_count() {
            let p = tube.position(i);
            assert_relative_eq!(Vec2::new(p.x, p.z).length(), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_tube_normals_point_outward() {
        let tube = create_tube(&TubeOptions {
            path: straight(),
            tessellation: 16,
            ..Default::default()
        })
        .unwrap();
        for i in 0..tube.vertex_count() {
            let p = tube.position(i);
            let radial = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(tube.normal(i).dot(radial) > 0.9);
        }
    }

    #[test]
    fn test_tube_radius_function() {
        let tube = create_tube(&TubeOptions {
            path: straight(),
            tessellation: 8,
            radius_function: Some(Arc::new(|i, _| 1.0 + i as f32)),
            ..Default::default()
        })
        .unwrap();
        // ring 2 starts at vertex 2 * (8 + 1)
        let p = tube.position(18);
        assert_relative_eq!(Vec2::new(p.x, p.z).length(), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_tube_caps_face_along_path() {
        let tube = create_tube(&TubeOptions {
            path: straight(),
            tessellation: 8,
            cap: Cap::CapAll,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tube.vertex_count(), 27 + 2 * 9);
        assert_eq!(tube.triangle_count(), 32 + 2 * 8);

        for [a, b, c] in tube.triangles().skip(32) {
            let pa = tube.position(a as usize);
            let face = (tube.position(b as usize) - pa).cross(tube.position(c as usize) - pa);
            if pa.y < 1.0 {
                assert!(face.y < 0.0);
            } else {
                assert!(face.y > 0.0);
            }
        }
    }

    #[test]
    fn test_tube_partial_arc() {
        let tube = create_tube(&TubeOptions {
            path: straight(),
            tessellation: 8,
            arc: 0.5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tube.vertex_count(), 27);
        assert_eq!(tube.triangle_count(), 2 * 8 * 2);
    }

    #[test]
    fn test_tube_empty_path() {
        assert!(matches!(
            create_tube(&TubeOptions::default()),
            Err(GeometryError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rebuild_tube_moves_rings() {
        let mut options = TubeOptions {
            path: straight(),
            tessellation: 8,
            ..Default::default()
        };
        let original = create_tube(&options).unwrap();
        options.path = vec![Vec3::ZERO, Vec3::Y * 2.0, Vec3::Y * 4.0];
        let rebuilt = rebuild_tube(&original, &options).unwrap();
        assert_relative_eq!(rebuilt.bounding_box().1.y, 4.0, epsilon = 1e-5);
        assert_eq!(rebuilt.indices, original.indices);
    }
}
