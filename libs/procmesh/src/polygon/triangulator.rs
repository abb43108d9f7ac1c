//! # Triangulator Seam
//!
//! Polygon triangulation is delegated to a collaborator behind the
//! [`Triangulator`] trait. The default implementation wraps `earcutr`.

use crate::error::{GeometryError, GeometryResult};

/// Triangulates a flat 2D polygon with holes.
///
/// `coordinates` holds interleaved `x, y` pairs: the outer contour first,
/// then every hole. `hole_indices` are the ascending vertex offsets (not
/// coordinate offsets) where each hole starts. The result is a list of
/// vertex indices, three per triangle.
///
/// Implementations must report failure instead of panicking on
/// self-touching or degenerate input.
pub trait Triangulator {
    /// Triangulates the polygon.
    fn triangulate(&self, coordinates: &[f64], hole_indices: &[usize]) -> GeometryResult<Vec<usize>>;
}

/// Ear-clipping triangulator backed by `earcutr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, coordinates: &[f64], hole_indices: &[usize]) -> GeometryResult<Vec<usize>> {
        earcutr::earcut(coordinates, hole_indices, 2)
            .map_err(|e| GeometryError::triangulation(format!("{:?}", e)))
    }
}
