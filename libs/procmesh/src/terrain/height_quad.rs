//! # Height Quads
//!
//! One analytic surface per ground cell: the two triangle planes either
//! side of the cell diagonal. Planes are stored as `(normal, d)` with
//! `normal · p + d = 0` and a unit normal pointing up.

use glam::{Vec2, Vec3, Vec4};

/// Precomputed surface of one ground cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightQuad {
    /// Cell corner with the smallest `x` and `z`
    pub min: Vec2,
    /// Cell extent along `x` and `z`
    pub size: Vec2,
    /// Plane of the triangle containing the `min` corner
    pub facet1: Vec4,
    /// Plane of the triangle containing the opposite corner
    pub facet2: Vec4,
}

impl HeightQuad {
    /// Builds the quad of a cell from its corners.
    ///
    /// `a` is the minimum corner, `b` the next one along `x`, `c` the next
    /// one along `z` and `d` the opposite corner. The cell is split along
    /// the `b`–`c` diagonal.
    pub fn from_corners(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self {
            min: Vec2::new(a.x, a.z),
            size: Vec2::new(b.x - a.x, c.z - a.z),
            facet1: plane(a, c, b),
            facet2: plane(b, c, d),
        }
    }

    /// The facet plane covering `(x, z)`.
    ///
    /// Points on the diagonal belong to the second facet; both planes agree
    /// there.
    #[inline]
    pub fn facet(&self, x: f32, z: f32) -> Vec4 {
        let u = (x - self.min.x) / self.size.x;
        let v = (z - self.min.y) / self.size.y;
        if u + v < 1.0 {
            self.facet1
        } else {
            self.facet2
        }
    }

    /// Surface height at `(x, z)`.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let facet = self.facet(x, z);
        if facet.y.abs() <= f32::EPSILON {
            return 0.0;
        }
        -(facet.x * x + facet.z * z + facet.w) / facet.y
    }

    /// Unit surface normal at `(x, z)`.
    pub fn normal(&self, x: f32, z: f32) -> Vec3 {
        self.facet(x, z).truncate()
    }
}

/// Plane through a counter-clockwise (seen from above) triangle.
fn plane(a: Vec3, b: Vec3, c: Vec3) -> Vec4 {
    let normal = (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y);
    normal.extend(-normal.dot(a))
}

/// Quads for every cell of a `cells_x × cells_y` grid laid out row-major
/// with rows along `+Z`.
pub(crate) fn compute_quads(positions: &[f32], cells_x: u32, cells_y: u32) -> Vec<HeightQuad> {
    let stride = (cells_x + 1) as usize;
    let vertex = |i: usize| Vec3::from_slice(&positions[i * 3..i * 3 + 3]);

    let mut quads = Vec::with_capacity((cells_x * cells_y) as usize);
    for row in 0..cells_y as usize {
        for column in 0..cells_x as usize {
            let a = row * stride + column;
            let c = a + stride;
            quads.push(HeightQuad::from_corners(
                vertex(a),
                vertex(a + 1),
                vertex(c),
                vertex(c + 1),
            ));
        }
    }
    quads
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_quad() {
        let quad = HeightQuad::from_corners(Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(quad.height(0.25, 0.25), 0.0);
        assert_relative_eq!(quad.height(0.75, 0.75), 0.0);
        assert_eq!(quad.normal(0.5, 0.1), Vec3::Y);
    }

    #[test]
    fn test_facets_split_on_the_diagonal() {
        // only the corner opposite the minimum is raised
        let quad = HeightQuad::from_corners(Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(quad.height(0.2, 0.2), 0.0, epsilon = 1e-6);
        assert_relative_eq!(quad.height(1.0, 1.0), 1.0, epsilon = 1e-6);
        assert_relative_eq!(quad.height(0.75, 0.75), 0.5, epsilon = 1e-6);
        assert!(quad.normal(0.75, 0.75).y > 0.0);
        assert!(quad.normal(0.75, 0.75).x < 0.0);
    }
}
