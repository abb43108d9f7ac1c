//! # Polygon / Extrusion Engine
//!
//! Flat and extruded polygons with holes, built in the XZ plane.
//!
//! A 2D point `(x, y)` lands at `(x, 0, -y)`, so a contour that is
//! counter-clockwise in 2D is counter-clockwise seen from `+Y` and the top
//! face points up. Contours are normalized before triangulation: the outer
//! contour is made counter-clockwise and every hole clockwise, whatever
//! order the caller used.
//!
//! ## Layout of an extruded buffer
//!
//! ```text
//! top (y = 0) | bottom (y = -depth) | walls (4 vertices per edge)
//! ```

mod triangulator;

#[cfg(test)]
mod tests;

pub use triangulator::{EarcutTriangulator, Triangulator};

use crate::error::{GeometryError, GeometryResult};
use crate::primitives::map_to_rect;
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::{DEFAULT_UV_RECT, EPSILON};
use glam::{Vec2, Vec3, Vec4};
use robust::{orient2d, Coord};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::{debug, warn};

/// A 2D polygon with optional holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon2D {
    /// Outer boundary
    pub outer: Vec<Vec2>,
    /// Holes inside the outer boundary
    pub holes: Vec<Vec<Vec2>>,
}

impl Polygon2D {
    /// Creates a polygon without holes.
    pub fn new(outer: Vec<Vec2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    pub fn with_holes(outer: Vec<Vec2>, holes: Vec<Vec<Vec2>>) -> Self {
        Self { outer, holes }
    }

    /// Axis-aligned rectangle, counter-clockwise from its minimum corner.
    ///
    /// With `center` the rectangle is centered on the origin; otherwise its
    /// minimum corner sits there.
    pub fn square(size: Vec2, center: bool) -> Self {
        let min = if center { -size * 0.5 } else { Vec2::ZERO };
        Self::new(vec![
            min,
            min + Vec2::new(size.x, 0.0),
            min + size,
            min + Vec2::new(0.0, size.y),
        ])
    }

    /// Regular polygon approximating a circle, counter-clockwise from `+X`.
    pub fn circle(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        Self::new(
            (0..segments)
                .map(|i| {
                    let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
                    Vec2::new(cos, sin) * radius
                })
                .collect(),
        )
    }

    /// Number of outer boundary vertices.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// True if the polygon has holes.
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }
}

/// Options for [`create_polygon`] and [`extrude_polygon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonOptions {
    /// Contours to build
    pub shape: Polygon2D,
    /// Extrusion depth below the top face (default 0, extrusion only)
    pub depth: f32,
    /// UV rectangles for the top, the walls and the bottom
    pub face_uv: [Vec4; 3],
    /// Colors for the top, the walls and the bottom
    pub face_colors: Option<[Vec4; 3]>,
    /// Map wall `u` over each contour's perimeter instead of the bounding
    /// box width
    pub wrap: bool,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            shape: Polygon2D::default(),
            depth: 0.0,
            face_uv: [Vec4::from_array(DEFAULT_UV_RECT); 3],
            face_colors: None,
            wrap: false,
            sides: SideOptions::default(),
        }
    }
}

/// Face groups of a polygon buffer, indexing `face_uv` and `face_colors`.
#[derive(Debug, Clone, Copy)]
enum FaceGroup {
    Top = 0,
    Wall = 1,
    Bottom = 2,
}

/// Creates a flat polygon facing `+Y`; `depth` is ignored.
///
/// # Errors
///
/// `InvalidParameter` if the outer contour has fewer than three distinct
/// points; `ExternalCollaborator` if triangulation fails.
///
/// # Example
///
/// ```rust
/// use procmesh::polygon::{create_polygon, Polygon2D, PolygonOptions};
/// use glam::Vec2;
///
/// let square = create_polygon(&PolygonOptions {
///     shape: Polygon2D::square(Vec2::splat(2.0), true),
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square.triangle_count(), 2);
/// ```
pub fn create_polygon(options: &PolygonOptions) -> GeometryResult<VertexData> {
    build(options, 0.0, &EarcutTriangulator)
}

/// Creates a polygon extruded `depth` units downward.
///
/// Walls get their own vertices per edge so each quad is flat-shaded;
/// outer walls face away from the polygon and hole walls face into the
/// hole. A non-positive depth yields the flat polygon.
///
/// # Errors
///
/// Same as [`create_polygon`].
pub fn extrude_polygon(options: &PolygonOptions) -> GeometryResult<VertexData> {
    extrude_polygon_with(options, &EarcutTriangulator)
}

/// [`extrude_polygon`] with a caller-supplied triangulator.
pub fn extrude_polygon_with(
    options: &PolygonOptions,
    triangulator: &dyn Triangulator,
) -> GeometryResult<VertexData> {
    build(options, options.depth, triangulator)
}

fn build(options: &PolygonOptions, depth: f32, triangulator: &dyn Triangulator) -> GeometryResult<VertexData> {
    let contours = normalized_contours(&options.shape)?;

    let mut coordinates = Vec::new();
    let mut hole_indices = Vec::new();
    let mut points = Vec::new();
    for (c, contour) in contours.iter().enumerate() {
        if c > 0 {
            hole_indices.push(points.len());
        }
        for p in contour {
            coordinates.push(p.x as f64);
            coordinates.push(p.y as f64);
            points.push(*p);
        }
    }

    let triangles = triangulator.triangulate(&coordinates, &hole_indices)?;
    if triangles.len() % 3 != 0 || triangles.iter().any(|&i| i >= points.len()) {
        return Err(GeometryError::triangulation(format!(
            "triangulator returned {} indices for {} points",
            triangles.len(),
            points.len()
        )));
    }
    let triangles = counter_clockwise(&points, &triangles);
    debug!(
        points = points.len(),
        holes = hole_indices.len(),
        triangles = triangles.len(),
        "polygon triangulated"
    );

    let (min, max) = bounds(&contours[0]);
    let extent = (max - min).max(Vec2::splat(EPSILON));
    let planar = |p: Vec2| (p - min) / extent;

    let mut builder = PolygonBuilder::new(options);
    let top = builder.data.vertex_count() as u32;
    for p in &points {
        builder.vertex(FaceGroup::Top, to_3d(*p, 0.0), Vec3::Y, planar(*p));
    }
    for t in &triangles {
        builder
            .data
            .add_triangle(top + t[0] as u32, top + t[1] as u32, top + t[2] as u32);
    }

    if depth > 0.0 {
        let bottom = builder.data.vertex_count() as u32;
        for p in &points {
            let uv = planar(*p);
            builder.vertex(
                FaceGroup::Bottom,
                to_3d(*p, -depth),
                Vec3::NEG_Y,
                Vec2::new(1.0 - uv.x, uv.y),
            );
        }
        for t in &triangles {
            builder
                .data
                .add_triangle(bottom + t[0] as u32, bottom + t[2] as u32, bottom + t[1] as u32);
        }

        for contour in &contours {
            builder.walls(contour, depth, extent.x);
        }
    }

    Ok(builder.data.finish(&options.sides))
}

/// Accumulates vertices with their face-group uv rect and color.
struct PolygonBuilder<'a> {
    options: &'a PolygonOptions,
    data: VertexData,
}

impl<'a> PolygonBuilder<'a> {
    fn new(options: &'a PolygonOptions) -> Self {
        let mut data = VertexData::new();
        if options.face_colors.is_some() {
            data.colors = Some(Vec::new());
        }
        Self { options, data }
    }

    fn vertex(&mut self, group: FaceGroup, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let group = group as usize;
        let index = self
            .data
            .add_vertex(position, normal, map_to_rect(uv, self.options.face_uv[group]));
        if let Some(colors) = &self.options.face_colors {
            self.data.add_color(colors[group]);
        }
        index
    }

    /// One flat quad per contour edge, `u` running along the perimeter.
    fn walls(&mut self, contour: &[Vec2], depth: f32, width: f32) {
        let perimeter: f32 = edges(contour).map(|(a, b)| a.distance(b)).sum();
        let span = if self.options.wrap { perimeter } else { width };
        let span = span.max(EPSILON);

        let mut travelled = 0.0;
        for (a, b) in edges(contour) {
            let length = a.distance(b);
            let (u0, u1) = (travelled / span, (travelled + length) / span);
            travelled += length;

            let top_a = to_3d(a, 0.0);
            let top_b = to_3d(b, 0.0);
            let normal = (top_b - top_a).cross(Vec3::Y).normalize_or_zero();

            let t0 = self.vertex(FaceGroup::Wall, top_a, normal, Vec2::new(u0, 1.0));
            let t1 = self.vertex(FaceGroup::Wall, top_b, normal, Vec2::new(u1, 1.0));
            let b0 = self.vertex(FaceGroup::Wall, to_3d(a, -depth), normal, Vec2::new(u0, 0.0));
            let b1 = self.vertex(FaceGroup::Wall, to_3d(b, -depth), normal, Vec2::new(u1, 0.0));
            self.data.add_triangle(t0, b0, t1);
            self.data.add_triangle(t1, b0, b1);
        }
    }
}

#[inline]
fn to_3d(p: Vec2, y: f32) -> Vec3 {
    Vec3::new(p.x, y, -p.y)
}

fn edges(contour: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    contour
        .iter()
        .zip(contour.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

fn bounds(contour: &[Vec2]) -> (Vec2, Vec2) {
    contour.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    )
}

/// Twice the signed area; positive for counter-clockwise contours.
fn signed_area(contour: &[Vec2]) -> f64 {
    edges(contour)
        .map(|(a, b)| a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64)
        .sum()
}

/// Drops a repeated closing point and enforces winding: outer
/// counter-clockwise, holes clockwise.
fn normalized_contours(polygon: &Polygon2D) -> GeometryResult<Vec<Vec<Vec2>>> {
    let mut outer = open_contour(&polygon.outer);
    if outer.len() < 3 {
        return Err(GeometryError::invalid_parameter(format!(
            "polygon outer contour needs at least 3 points, got {}",
            outer.len()
        )));
    }
    if signed_area(&outer) < 0.0 {
        outer.reverse();
    }

    let mut contours = vec![outer];
    for (i, hole) in polygon.holes.iter().enumerate() {
        let mut hole = open_contour(hole);
        if hole.len() < 3 {
            warn!(hole = i, points = hole.len(), "skipping polygon hole with fewer than 3 points");
            continue;
        }
        if signed_area(&hole) > 0.0 {
            hole.reverse();
        }
        contours.push(hole);
    }
    Ok(contours)
}

fn open_contour(contour: &[Vec2]) -> Vec<Vec2> {
    let mut open = contour.to_vec();
    if open.len() > 1 && open.first() == open.last() {
        open.pop();
    }
    open
}

/// Groups triangle indices and makes each triangle counter-clockwise.
fn counter_clockwise(points: &[Vec2], indices: &[usize]) -> Vec<[usize; 3]> {
    let coord = |i: usize| Coord {
        x: points[i].x as f64,
        y: points[i].y as f64,
    };
    indices
        .chunks_exact(3)
        .map(|t| {
            if orient2d(coord(t[0]), coord(t[1]), coord(t[2])) < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                [t[0], t[1], t[2]]
            }
        })
        .collect()
}
