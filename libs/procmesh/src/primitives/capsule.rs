//! # Capsule Primitive
//!
//! Two spherical caps joined by a cylinder, or by a cone tangent to both
//! caps when the radii differ. Texture `v` follows true arc length from the
//! bottom pole (0) to the top pole (1), so the texture never stretches at
//! the cap boundaries whatever the row counts are.

use super::{subdivision_option, tessellation_option};
use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::{approx_zero, EPSILON};
use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Options for [`create_capsule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsuleOptions {
    /// Direction of the capsule axis (default +Y)
    pub orientation: Vec3,
    /// Rows along the middle band (default 2, minimum 1)
    pub subdivisions: u32,
    /// Samples around the axis (default 16, minimum 3)
    pub tessellation: u32,
    /// Total height including both caps (default 1)
    pub height: f32,
    /// Radius used for any cap not given (default 0.25)
    pub radius: f32,
    /// Radius of the top cap
    pub radius_top: Option<f32>,
    /// Radius of the bottom cap
    pub radius_bottom: Option<f32>,
    /// Rows per cap when no per-cap count is given (default 6, minimum 1)
    pub cap_subdivisions: u32,
    /// Rows in the top cap
    pub top_cap_subdivisions: Option<u32>,
    /// Rows in the bottom cap
    pub bottom_cap_subdivisions: Option<u32>,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for CapsuleOptions {
    fn default() -> Self {
        Self {
            orientation: Vec3::Y,
            subdivisions: 2,
            tessellation: 16,
            height: 1.0,
            radius: 0.25,
            radius_top: None,
            radius_bottom: None,
            cap_subdivisions: 6,
            top_cap_subdivisions: None,
            bottom_cap_subdivisions: None,
            sides: SideOptions::default(),
        }
    }
}

/// Profile geometry shared by every row.
struct Profile {
    radius_top: f32,
    radius_bottom: f32,
    /// Distance between the two cap centers
    length: f32,
    /// Polar angle of the tangent circle, measured from +Y
    alpha: f32,
}

impl Profile {
    fn new(height: f32, radius_top: f32, radius_bottom: f32) -> Self {
        let length = (height - radius_top - radius_bottom).max(0.0);
        let difference = radius_bottom - radius_top;
        let cos_alpha = if length > EPSILON {
            (difference / length).clamp(-1.0, 1.0)
        } else if !approx_zero(difference) {
            difference.signum()
        } else {
            0.0
        };
        Self {
            radius_top,
            radius_bottom,
            length,
            alpha: cos_alpha.acos(),
        }
    }

    fn top_arc(&self) -> f32 {
        self.radius_top * self.alpha
    }

    fn band_length(&self) -> f32 {
        self.length * self.alpha.sin()
    }

    fn bottom_arc(&self) -> f32 {
        self.radius_bottom * (PI - self.alpha)
    }

    fn total(&self) -> f32 {
        (self.top_arc() + self.band_length() + self.bottom_arc()).max(EPSILON)
    }
}

/// One ring of vertices: radius, height, polar normal angle and arc distance
/// from the top pole.
struct Row {
    radius: f32,
    y: f32,
    theta: f32,
    distance: f32,
}

/// Creates a capsule.
///
/// Rows run from the top pole down to the bottom pole; pole rows keep a
/// full ring of coincident vertices.
pub fn create_capsule(options: &CapsuleOptions) -> GeometryResult<VertexData> {
    let tessellation = tessellation_option("capsule.tessellation", options.tessellation);
    let band_rows = subdivision_option("capsule.subdivisions", options.subdivisions);
    let top_rows = subdivision_option(
        "capsule.top_cap_subdivisions",
        options.top_cap_subdivisions.unwrap_or(options.cap_subdivisions),
    );
    let bottom_rows = subdivision_option(
        "capsule.bottom_cap_subdivisions",
        options.bottom_cap_subdivisions.unwrap_or(options.cap_subdivisions),
    );

    let profile = Profile::new(
        options.height,
        options.radius_top.unwrap_or(options.radius),
        options.radius_bottom.unwrap_or(options.radius),
    );
    let top_center = profile.length * 0.5;
    let bottom_center = -profile.length * 0.5;
    let alpha = profile.alpha;

    let mut rows = Vec::with_capacity((top_rows + band_rows + bottom_rows + 1) as usize);
    for k in 0..=top_rows {
        let theta = alpha * k as f32 / top_rows as f32;
        rows.push(Row {
            radius: profile.radius_top * theta.sin(),
            y: top_center + profile.radius_top * theta.cos(),
            theta,
            distance: profile.radius_top * theta,
        });
    }
    let band_start = Vec2::new(profile.radius_top * alpha.sin(), top_center + profile.radius_top * alpha.cos());
    let band_end = Vec2::new(
        profile.radius_bottom * alpha.sin(),
        bottom_center + profile.radius_bottom * alpha.cos(),
    );
    for k in 1..=band_rows {
        let t = k as f32 / band_rows as f32;
        let point = band_start.lerp(band_end, t);
        rows.push(Row {
            radius: point.x,
            y: point.y,
            theta: alpha,
            distance: profile.top_arc() + profile.band_length() * t,
        });
    }
    for k in 1..=bottom_rows {
        let theta = alpha + (PI - alpha) * k as f32 / bottom_rows as f32;
        rows.push(Row {
            radius: profile.radius_bottom * theta.sin(),
            y: bottom_center + profile.radius_bottom * theta.cos(),
            theta,
            distance: profile.top_arc() + profile.band_length() + profile.radius_bottom * (theta - alpha),
        });
    }

    let total = profile.total();
    let stride = tessellation + 1;
    let mut data = VertexData::with_capacity(rows.len() * stride as usize, rows.len() * tessellation as usize * 2);
    for row in &rows {
        let v = (1.0 - row.distance / total).clamp(0.0, 1.0);
        let (sin_theta, cos_theta) = row.theta.sin_cos();
        for j in 0..=tessellation {
            let u = j as f32 / tessellation as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let position = Vec3::new(row.radius.max(0.0) * cos_phi, row.y, -row.radius.max(0.0) * sin_phi);
            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, -sin_theta * sin_phi);
            data.add_vertex(position, normal, Vec2::new(u, v));
        }
    }

    for r in 0..rows.len() as u32 - 1 {
        for j in 0..tessellation {
            let a = r * stride + j;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            data.add_triangle(a, c, b);
            data.add_triangle(b, c, d);
        }
    }

    if let Some(axis) = options.orientation.try_normalize() {
        if axis.distance(Vec3::Y) > EPSILON {
            data.transform(&Mat4::from_quat(Quat::from_rotation_arc(Vec3::Y, axis)));
        }
    }

    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn column_v(data: &VertexData, tessellation: u32) -> Vec<f32> {
        (0..data.vertex_count())
            .step_by(tessellation as usize + 1)
            .map(|i| data.uv(i).y)
            .collect()
    }

    #[test]
    fn test_capsule_extent() {
        let capsule = create_capsule(&CapsuleOptions {
            height: 2.0,
            radius: 0.5,
            ..Default::default()
        })
        .unwrap();
        let (min, max) = capsule.bounding_box();
        assert_relative_eq!(max.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(min.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(max.x, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_capsule_v_is_monotonic() {
        for (band, caps) in [(1, 12), (8, 1), (3, 3)] {
            let capsule = create_capsule(&CapsuleOptions {
                subdivisions: band,
                cap_subdivisions: caps,
                radius_top: Some(0.1),
                ..Default::default()
            })
            .unwrap();
            let vs = column_v(&capsule, 16);
            assert_relative_eq!(vs[0], 1.0);
            assert_relative_eq!(*vs.last().unwrap(), 0.0, epsilon = 1e-6);
            assert!(vs.windows(2).all(|w| w[1] <= w[0]));
        }
    }

    #[test]
    fn test_capsule_v_follows_arc_length() {
        let capsule = create_capsule(&CapsuleOptions {
            height: 2.0,
            radius: 0.5,
            subdivisions: 1,
            cap_subdivisions: 1,
            ..Default::default()
        })
        .unwrap();
        // Caps are quarter circles of length π/4 each, band length 1.
        let total = std::f32::consts::FRAC_PI_2 + 1.0;
        let vs = column_v(&capsule, 16);
        assert_relative_eq!(vs[1], 1.0 - std::f32::consts::FRAC_PI_4 / total, epsilon = 1e-5);
    }

    #[test]
    fn test_capsule_normals_are_outward() {
        let capsule = create_capsule(&CapsuleOptions {
            radius_top: Some(0.1),
            radius_bottom: Some(0.3),
            ..Default::default()
        })
        .unwrap();
        for t in capsule.indices.chunks_exact(3) {
            let a = capsule.position(t[0] as usize);
            let b = capsule.position(t[1] as usize);
            let c = capsule.position(t[2] as usize);
            let face = (b - a).cross(c - a);
            if face.length() > 1e-8 {
                let vertex_normal = capsule.normal(t[2] as usize);
                assert!(face.normalize().dot(vertex_normal) > 0.0);
            }
        }
    }

    #[test]
    fn test_capsule_orientation() {
        let capsule = create_capsule(&CapsuleOptions {
            orientation: Vec3::X,
            height: 2.0,
            ..Default::default()
        })
        .unwrap();
        let (min, max) = capsule.bounding_box();
        assert_relative_eq!(max.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(min.x, -1.0, epsilon = 1e-5);
    }
}
