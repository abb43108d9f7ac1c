//! # Triangle Clipping
//!
//! Clips single triangles against the six faces of an origin-centered box.
//! Each plane pass turns a triangle into zero, one or two triangles; the
//! winding of the input is preserved.

use glam::Vec3;

/// A vertex carried through clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    /// Position in box space
    pub position: Vec3,
    /// Normal in box space; interpolated, not renormalized
    pub normal: Vec3,
}

impl ClipVertex {
    /// Creates a clip vertex.
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }
}

/// One face of the clip box: keeps points with `sign * p[axis] <= extent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// 0, 1 or 2 for X, Y or Z
    pub axis: usize,
    /// `1.0` for the positive face, `-1.0` for the negative one
    pub sign: f32,
    /// Distance of the face from the origin
    pub extent: f32,
}

impl ClipPlane {
    /// The six faces of a box with the given half extents.
    pub fn box_faces(half_size: Vec3) -> [ClipPlane; 6] {
        let face = |axis: usize, sign: f32| ClipPlane {
            axis,
            sign,
            extent: half_size[axis],
        };
        [
            face(0, 1.0),
            face(0, -1.0),
            face(1, 1.0),
            face(1, -1.0),
            face(2, 1.0),
            face(2, -1.0),
        ]
    }

    /// Signed distance to the face; negative outside.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.extent - self.sign * point[self.axis]
    }
}

/// Clips one triangle against one plane.
///
/// | vertices outside | result |
/// |------------------|--------|
/// | 0 | the triangle, unchanged |
/// | 1 | two triangles through the two edge crossings |
/// | 2 | one triangle through the two edge crossings |
/// | 3 | nothing |
pub fn clip_against_plane(triangle: [ClipVertex; 3], plane: &ClipPlane) -> Vec<[ClipVertex; 3]> {
    let distances = triangle.map(|v| plane.distance(v.position));
    let outside = distances.iter().filter(|&&d| d < 0.0).count();
    match outside {
        0 => return vec![triangle],
        3 => return Vec::new(),
        _ => {}
    }

    // Walk the edges in order so the kept polygon keeps the input winding.
    let mut polygon: Vec<ClipVertex> = Vec::with_capacity(4);
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (current, next) = (triangle[i], triangle[j]);
        let (d_current, d_next) = (distances[i], distances[j]);
        if d_current >= 0.0 {
            polygon.push(current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            polygon.push(current.lerp(next, t));
        }
    }

    (1..polygon.len() - 1)
        .map(|k| [polygon[0], polygon[k], polygon[k + 1]])
        .collect()
}

/// Clips one triangle against all six faces of the box `|p| <= half_size`.
pub fn clip_triangle(triangle: [ClipVertex; 3], half_size: Vec3) -> Vec<[ClipVertex; 3]> {
    let mut triangles = vec![triangle];
    for plane in ClipPlane::box_faces(half_size) {
        triangles = triangles
            .into_iter()
            .flat_map(|t| clip_against_plane(t, &plane))
            .collect();
        if triangles.is_empty() {
            break;
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(a: Vec3, b: Vec3, c: Vec3) -> [ClipVertex; 3] {
        [a, b, c].map(|p| ClipVertex::new(p, Vec3::Z))
    }

    fn winding(t: &[ClipVertex; 3]) -> f32 {
        (t[1].position - t[0].position)
            .cross(t[2].position - t[0].position)
            .z
    }

    const X_FACE: ClipPlane = ClipPlane {
        axis: 0,
        sign: 1.0,
        extent: 0.5,
    };

    #[test]
    fn test_inside_triangle_passes_through() {
        let t = triangle(Vec3::ZERO, Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 0.3, 0.0));
        assert_eq!(clip_triangle(t, Vec3::ONE), vec![t]);
    }

    #[test]
    fn test_outside_triangle_is_discarded() {
        let t = triangle(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.0));
        assert!(clip_triangle(t, Vec3::ONE).is_empty());
    }

    #[test]
    fn test_one_vertex_outside_gives_two_triangles() {
        let t = triangle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.4, 0.0));
        let clipped = clip_against_plane(t, &X_FACE);
        assert_eq!(clipped.len(), 2);
        for c in &clipped {
            assert!(winding(c) > 0.0);
            assert!(c.iter().all(|v| v.position.x <= 0.5 + 1e-6));
        }
    }

    #[test]
    fn test_two_vertices_outside_gives_one_triangle() {
        let t = triangle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let clipped = clip_against_plane(t, &X_FACE);
        assert_eq!(clipped.len(), 1);
        assert!(winding(&clipped[0]) > 0.0);
        assert_relative_eq!(clipped[0][1].position.x, 0.5);
        assert_relative_eq!(clipped[0][2].position.y, 0.5);
    }

    #[test]
    fn test_normals_are_interpolated() {
        let mut t = triangle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        t[1].normal = Vec3::X;
        let clipped = clip_against_plane(t, &X_FACE);
        let crossing = clipped[0][1];
        assert_relative_eq!(crossing.position.x, 0.5);
        assert_relative_eq!(crossing.normal.x, 0.5);
        assert_relative_eq!(crossing.normal.z, 0.5);
    }
}
