//! # Torus Knot Primitive
//!
//! A tube swept along the `(p, q)` torus knot curve
//!
//! ```text
//! P(t) = r/2 · ((2 + cos(q/p·t)) cos t, (2 + cos(q/p·t)) sin t, sin(q/p·t))
//! ```
//!
//! for `t` in `[0, 2πp]`. The frame at each sample uses the analytic
//! derivative as tangent, `B = T × P` and `N = B × T`.

use super::tessellation_option;
use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{compute_normals, SideOptions, VertexData};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Options for [`create_torus_knot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusKnotOptions {
    /// Knot radius (default 2)
    pub radius: f32,
    /// Tube radius (default 0.5)
    pub tube: f32,
    /// Samples along the curve (default 32, minimum 3)
    pub radial_segments: u32,
    /// Samples around the tube (default 32, minimum 3)
    pub tubular_segments: u32,
    /// Windings around the axis of rotational symmetry (default 2)
    pub p: u32,
    /// Windings around the torus interior (default 3)
    pub q: u32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TorusKnotOptions {
    fn default() -> Self {
        Self {
            radius: 2.0,
            tube: 0.5,
            radial_segments: 32,
            tubular_segments: 32,
            p: 2,
            q: 3,
            sides: SideOptions::default(),
        }
    }
}

impl TorusKnotOptions {
    /// Clamps segment counts; `p` and `q` are clamped to at least 1.
    pub fn normalized(&self) -> Self {
        Self {
            radial_segments: tessellation_option("torus_knot.radial_segments", self.radial_segments),
            tubular_segments: tessellation_option("torus_knot.tubular_segments", self.tubular_segments),
            p: self.p.max(1),
            q: self.q.max(1),
            ..self.clone()
        }
    }
}

/// Point and analytic derivative of the knot curve at `t`.
fn knot_sample(t: f32, radius: f32, ratio: f32) -> (Vec3, Vec3) {
    let (sin_t, cos_t) = t.sin_cos();
    let (sin_k, cos_k) = (ratio * t).sin_cos();
    let half = radius * 0.5;
    let reach = 2.0 + cos_k;

    let point = Vec3::new(reach * cos_t, reach * sin_t, sin_k) * half;
    let derivative = Vec3::new(
        -ratio * sin_k * cos_t - reach * sin_t,
        -ratio * sin_k * sin_t + reach * cos_t,
        ratio * cos_k,
    ) * half;
    (point, derivative)
}

/// Creates a torus knot.
///
/// Normals are computed from the triangles.
///
/// # Errors
///
/// `DegenerateGeometry` if the knot radius is zero (the curve has no frame).
pub fn create_torus_knot(options: &TorusKnotOptions) -> GeometryResult<VertexData> {
    let options = options.normalized();
    let radial = options.radial_segments;
    let tubular = options.tubular_segments;
    let ratio = options.q as f32 / options.p as f32;
    let stride = tubular + 1;

    let mut data = VertexData::with_capacity(
        ((radial + 1) * stride) as usize,
        (radial * tubular * 2) as usize,
    );

    for i in 0..=radial {
        let t = (i % radial) as f32 / radial as f32 * options.p as f32 * TAU;
        let (point, derivative) = knot_sample(t, options.radius, ratio);
        let tangent = derivative
            .try_normalize()
            .ok_or_else(|| GeometryError::degenerate("torus knot curve has zero length"))?;
        let binormal = tangent
            .cross(point)
            .try_normalize()
            .ok_or_else(|| GeometryError::degenerate("torus knot frame is undefined"))?;
        let normal = binormal.cross(tangent);

        for j in 0..=tubular {
            let angle = (j % tubular) as f32 / tubular as f32 * 2.0 * PI;
            let (sin, cos) = angle.sin_cos();
            let offset = (normal * -cos + binormal * sin) * options.tube;
            data.add_vertex(
                point + offset,
                Vec3::ZERO,
                Vec2::new(i as f32 / radial as f32, j as f32 / tubular as f32),
            );
        }
    }

    for i in 0..radial {
        for j in 0..tubular {
            let a = i * stride + j;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            data.add_triangle(a, b, d);
            data.add_triangle(b, c, d);
        }
    }

    data.compute_normals();
    Ok(data.finish(&options.sides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_analytic_tangent_matches_finite_difference() {
        let ratio = 1.5;
        for k in 0..10 {
            let t = k as f32 * 0.7;
            let (p0, derivative) = knot_sample(t, 2.0, ratio);
            let (p1, _) = knot_sample(t + 1e-3, 2.0, ratio);
            let approx = ((p1 - p0) / 1e-3).normalize();
            assert_relative_eq!(derivative.normalize().dot(approx), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_knot_counts() {
        let knot = create_torus_knot(&TorusKnotOptions {
            radial_segments: 16,
            tubular_segments: 8,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(knot.vertex_count(), 17 * 9);
        assert_eq!(knot.triangle_count(), 16 * 8 * 2);
        assert!(knot.validate().is_ok());
    }

    #[test]
    fn test_knot_seams_coincide() {
        let knot = create_torus_knot(&TorusKnotOptions {
            radial_segments: 12,
            tubular_segments: 6,
            ..Default::default()
        })
        .unwrap();
        let stride = 7;
        assert_eq!(knot.position(0), knot.position(12 * stride));
        assert_eq!(knot.position(0), knot.position(6));
    }

    #[test]
    fn test_knot_faces_point_away_from_curve() {
        let options = TorusKnotOptions {
            radial_segments: 64,
            tubular_segments: 8,
            ..Default::default()
        };
        let knot = create_torus_knot(&options).unwrap();
        let ratio = 1.5;
        // Ring i = 0 is centered on the curve point at t = 0.
        let (center, _) = knot_sample(0.0, options.radius, ratio);
        for j in 0..8 {
            let outward = (knot.position(j) - center).normalize();
            assert!(knot.normal(j).dot(outward) > 0.5);
        }
    }
}
