//! # Path3D
//!
//! Samples an ordered 3D point list into a moving frame: per-point tangent,
//! normal, binormal and cumulative arc length. Tubes, extruded shapes and
//! other sweeps orient their cross-sections with it.
//!
//! Frames are propagated rather than taken from curvature, so they never
//! flip on straight segments: each normal is the previous binormal crossed
//! with the current tangent.

use crate::error::{GeometryError, GeometryResult};
use config::constants::{approx_equal, EPSILON};
use glam::Vec3;

/// A sampled 3D curve with a propagated frame at every point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path3D {
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
    normals: Vec<Vec3>,
    binormals: Vec<Vec3>,
    distances: Vec<f32>,
}

impl Path3D {
    /// Builds the frames of a curve with an automatically chosen first normal.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `points` is empty
    /// - `DegenerateGeometry` if every point coincides (no direction exists)
    pub fn new(points: &[Vec3]) -> GeometryResult<Self> {
        Self::with_first_normal(points, None)
    }

    /// Builds the frames of a curve, seeding the first normal when given.
    ///
    /// A seed normal that is parallel to the first tangent is ignored.
    pub fn with_first_normal(points: &[Vec3], first_normal: Option<Vec3>) -> GeometryResult<Self> {
        if points.is_empty() {
            return Err(GeometryError::invalid_parameter("path has no points"));
        }

        let count = points.len();
        let first_tangent = first_non_null(points, 0).ok_or_else(|| {
            GeometryError::degenerate(format!("all {} path points coincide", count))
        })?;

        let mut tangents = vec![Vec3::ZERO; count];
        let mut normals = vec![Vec3::ZERO; count];
        let mut binormals = vec![Vec3::ZERO; count];
        let mut distances = vec![0.0; count];

        tangents[0] = first_tangent.normalize();
        normals[0] = seed_normal(tangents[0], first_normal);
        binormals[0] = tangents[0].cross(normals[0]).normalize();

        for i in 1..count {
            let previous = last_non_null(points, i);
            let tangent = if i + 1 < count {
                previous + first_non_null(points, i).unwrap_or(Vec3::ZERO)
            } else {
                previous
            };
            tangents[i] = match tangent.try_normalize() {
                Some(t) => t,
                None => tangents[i - 1],
            };

            distances[i] = distances[i - 1] + points[i].distance(points[i - 1]);

            normals[i] = match binormals[i - 1].cross(tangents[i]).try_normalize() {
                Some(n) => n,
                None => normals[i - 1],
            };
            binormals[i] = match tangents[i].cross(normals[i]).try_normalize() {
                Some(b) => b,
                None => binormals[i - 1],
            };
        }

        Ok(Self {
            points: points.to_vec(),
            tangents,
            normals,
            binormals,
            distances,
        })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sampled points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Unit tangents, one per point.
    pub fn tangents(&self) -> &[Vec3] {
        &self.tangents
    }

    /// Unit normals, one per point.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Unit binormals, one per point.
    pub fn binormals(&self) -> &[Vec3] {
        &self.binormals
    }

    /// Cumulative distance from the first point, one per point.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Total arc length.
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }
}

/// First non-zero vector from `points[index]` to a later point.
fn first_non_null(points: &[Vec3], index: usize) -> Option<Vec3> {
    points[index + 1..]
        .iter()
        .map(|p| *p - points[index])
        .find(|v| v.length_squared() > EPSILON * EPSILON)
}

/// First non-zero vector to `points[index]` from an earlier point.
fn last_non_null(points: &[Vec3], index: usize) -> Vec3 {
    points[..index]
        .iter()
        .rev()
        .map(|p| points[index] - *p)
        .find(|v| v.length_squared() > EPSILON * EPSILON)
        .unwrap_or(Vec3::ZERO)
}

/// A unit vector perpendicular to `tangent`.
fn seed_normal(tangent: Vec3, requested: Option<Vec3>) -> Vec3 {
    if let Some(n) = requested.and_then(|n| n.try_normalize()) {
        if let Some(projected) = (n - tangent * n.dot(tangent)).try_normalize() {
            return projected;
        }
    }

    // Cross with the axis the tangent leans on least.
    let reference = if !approx_equal(tangent.y.abs(), 1.0) {
        Vec3::NEG_Y
    } else if !approx_equal(tangent.x.abs(), 1.0) {
        Vec3::X
    } else {
        Vec3::Z
    };
    tangent.cross(reference).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_path_frame() {
        let path = Path3D::new(&[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]).unwrap();
        for i in 0..3 {
            assert_relative_eq!(path.tangents()[i].x, 1.0, epsilon = 1e-6);
            assert_relative_eq!(path.normals()[i].dot(path.tangents()[i]), 0.0, epsilon = 1e-6);
            assert_relative_eq!(path.binormals()[i].length(), 1.0, epsilon = 1e-6);
        }
        assert_eq!(path.normals()[0], path.normals()[2]);
        assert_relative_eq!(path.total_length(), 2.0);
    }

    #[test]
    fn test_frame_is_right_handed() {
        let points: Vec<Vec3> = (0..8)
            .map(|i| {
                let a = i as f32 * 0.4;
                Vec3::new(a.cos(), i as f32 * 0.1, a.sin())
            })
            .collect();
        let path = Path3D::new(&points).unwrap();
        for i in 0..points.len() {
            let t = path.tangents()[i];
            let n = path.normals()[i];
            let b = path.binormals()[i];
            assert_relative_eq!(t.cross(n).dot(b), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_skips_duplicate_leading_points() {
        let path = Path3D::new(&[Vec3::ZERO, Vec3::ZERO, Vec3::Z]).unwrap();
        assert_relative_eq!(path.tangents()[0].z, 1.0, epsilon = 1e-6);
        assert_eq!(path.distances(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_first_normal_is_honored() {
        let path = Path3D::with_first_normal(&[Vec3::ZERO, Vec3::Y], Some(Vec3::X)).unwrap();
        assert_relative_eq!(path.normals()[0].x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(matches!(
            Path3D::new(&[]),
            Err(GeometryError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        assert!(matches!(
            Path3D::new(&[Vec3::ONE, Vec3::ONE]),
            Err(GeometryError::DegenerateGeometry { .. })
        ));
    }
}
