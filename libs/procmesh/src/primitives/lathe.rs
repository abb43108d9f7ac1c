//! # Lathe Primitive
//!
//! Revolves a profile curve about the Y axis. The profile lives in the XY
//! plane: `x` is the distance from the axis and `y` the height. A profile
//! listed bottom to top yields outward-facing walls.

use super::ribbon::{create_ribbon, RibbonOptions};
use super::{tessellation_option, Cap};
use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::clamp_arc;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Options for [`create_lathe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatheOptions {
    /// Profile points in the XY plane
    pub shape: Vec<Vec3>,
    /// Scale applied to the profile's distance from the axis (default 1)
    pub radius: f32,
    /// Angular steps of a full turn (default 64, minimum 3)
    pub tessellation: u32,
    /// Number of steps removed from the end of the revolution (default 0)
    pub clip: u32,
    /// Fraction of the full turn, in (0, 1] (default 1)
    pub arc: f32,
    /// Join the last profile point back to the first
    pub close_path: bool,
    /// Close the bottom and/or top of the profile on the axis
    pub cap: Cap,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for LatheOptions {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            radius: 1.0,
            tessellation: 64,
            clip: 0,
            arc: 1.0,
            close_path: false,
            cap: Cap::NoCap,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a lathe.
///
/// Profile copies are placed at `TAU * arc / tessellation` intervals. A
/// full unclipped turn uses `tessellation` copies joined back to the
/// first; otherwise `tessellation - clip + 1` copies leave the surface
/// open. Capping prepends or appends a point on the axis at the height of
/// the first or last profile point.
///
/// # Errors
///
/// `InvalidParameter` for an empty profile or a clip that leaves fewer
/// than two profile copies.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_lathe, LatheOptions};
/// use glam::Vec3;
///
/// let vase = create_lathe(&LatheOptions {
///     shape: vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, 1.0, 0.0), Vec3::new(0.8, 2.0, 0.0)],
///     tessellation: 16,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(vase.vertex_count(), 17 * 3);
/// ```
pub fn create_lathe(options: &LatheOptions) -> GeometryResult<VertexData> {
    let (first, last) = match (options.shape.first(), options.shape.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(GeometryError::invalid_parameter("lathe shape has no points")),
    };

    let tessellation = tessellation_option("lathe.tessellation", options.tessellation);
    let arc = clamp_arc(options.arc);
    if options.clip >= tessellation {
        return Err(GeometryError::invalid_parameter(format!(
            "lathe clip {} removes all {} steps",
            options.clip, tessellation
        )));
    }

    let mut profile = Vec::with_capacity(options.shape.len() + 2);
    if options.cap.has_start() {
        profile.push(Vec3::new(0.0, first.y, 0.0));
    }
    profile.extend_from_slice(&options.shape);
    if options.cap.has_end() {
        profile.push(Vec3::new(0.0, last.y, 0.0));
    }

    let full = arc >= 1.0 && options.clip == 0;
    let step = TAU * arc / tessellation as f32;
    let copies = if full {
        tessellation
    } else {
        tessellation - options.clip + 1
    };

    let path_array: Vec<Vec<Vec3>> = (0..copies)
        .map(|i| {
            let (sin, cos) = (step * i as f32).sin_cos();
            profile
                .iter()
                .map(|p| Vec3::new(p.x * cos * options.radius, p.y, p.x * sin * options.radius))
                .collect()
        })
        .collect();

    let data = create_ribbon(&RibbonOptions {
        path_array,
        close_array: full,
        close_path: options.close_path,
        ..Default::default()
    })?;
    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn column() -> Vec<Vec3> {
        vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]
    }

    #[test]
    fn test_lathe_cylinder_wall() {
        let lathe = create_lathe(&LatheOptions {
            shape: column(),
            tessellation: 8,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(lathe.vertex_count(), 9 * 2);
        assert_eq!(lathe.triangle_count(), 16);
        for i in 0..lathe.vertex_count() {
            let p = lathe.position(i);
            let radial = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(lathe.normal(i).dot(radial) > 0.95);
        }
    }

    #[test]
    fn test_lathe_radius_scales_profile() {
        let lathe = create_lathe(&LatheOptions {
            shape: column(),
            radius: 2.0,
            tessellation: 6,
            ..Default::default()
        })
        .unwrap();
        assert_relative_eq!(lathe.position(0).x, 2.0);
    }

    #[test]
    fn test_lathe_caps_close_the_ends() {
        let lathe = create_lathe(&LatheOptions {
            shape: column(),
            tessellation: 8,
            cap: Cap::CapAll,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(lathe.vertex_count(), 9 * 4);
        assert_eq!(lathe.position(0), Vec3::ZERO);
        assert_eq!(lathe.position(3), Vec3::Y);
    }

    #[test]
    fn test_lathe_clip_opens_the_surface() {
        let lathe = create_lathe(&LatheOptions {
            shape: column(),
            tessellation: 8,
            clip: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(lathe.vertex_count(), 7 * 2);
        assert_eq!(lathe.triangle_count(), 12);
    }

    #[test]
    fn test_lathe_rejects_bad_input() {
        assert!(create_lathe(&LatheOptions::default()).is_err());
        assert!(create_lathe(&LatheOptions {
            shape: column(),
            tessellation: 4,
            clip: 4,
            ..Default::default()
        })
        .is_err());
    }
}
