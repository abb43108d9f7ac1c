//! # Polyhedron Primitive
//!
//! Fifteen named convex solids (platonic solids, prisms and Johnson
//! solids) or caller-supplied vertex/face data.
//!
//! Flat mode gives every face its own vertices, normal, texture rectangle
//! and color. Smooth mode shares vertices between faces with normals
//! pointing away from the center.

pub(crate) mod solids;

use super::{face_entry, map_to_rect};
use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{default_color, SideOptions, VertexData};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// The named solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolyhedronKind {
    /// 4 triangles
    #[default]
    Tetrahedron = 0,
    /// 8 triangles
    Octahedron = 1,
    /// 12 pentagons
    Dodecahedron = 2,
    /// 20 triangles
    Icosahedron = 3,
    /// 8 triangles and 18 squares
    Rhombicuboctahedron = 4,
    /// Prism over a triangle
    TriangularPrism = 5,
    /// Prism over a pentagon
    PentagonalPrism = 6,
    /// Prism over a hexagon
    HexagonalPrism = 7,
    /// Johnson solid J1
    SquarePyramid = 8,
    /// Johnson solid J2
    PentagonalPyramid = 9,
    /// Johnson solid J12
    TriangularDipyramid = 10,
    /// Johnson solid J13
    PentagonalDipyramid = 11,
    /// Johnson solid J15
    ElongatedSquareDipyramid = 12,
    /// Johnson solid J16
    ElongatedPentagonalDipyramid = 13,
    /// Johnson solid J20
    ElongatedPentagonalCupola = 14,
}

impl PolyhedronKind {
    /// Every kind, in discriminant order.
    pub const ALL: [PolyhedronKind; 15] = [
        PolyhedronKind::Tetrahedron,
        PolyhedronKind::Octahedron,
        PolyhedronKind::Dodecahedron,
        PolyhedronKind::Icosahedron,
        PolyhedronKind::Rhombicuboctahedron,
        PolyhedronKind::TriangularPrism,
        PolyhedronKind::PentagonalPrism,
        PolyhedronKind::HexagonalPrism,
        PolyhedronKind::SquarePyramid,
        PolyhedronKind::PentagonalPyramid,
        PolyhedronKind::TriangularDipyramid,
        PolyhedronKind::PentagonalDipyramid,
        PolyhedronKind::ElongatedSquareDipyramid,
        PolyhedronKind::ElongatedPentagonalDipyramid,
        PolyhedronKind::ElongatedPentagonalCupola,
    ];
}

/// Caller-supplied polyhedron.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyhedronData {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Faces as vertex loops, counter-clockwise seen from outside
    pub faces: Vec<Vec<usize>>,
}

impl PolyhedronData {
    fn validate(&self) -> GeometryResult<()> {
        if self.vertices.is_empty() {
            return Err(GeometryError::invalid_parameter("polyhedron data has no vertices"));
        }
        if self.faces.is_empty() {
            return Err(GeometryError::invalid_parameter("polyhedron data has no faces"));
        }
        for (f, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeometryError::invalid_parameter(format!(
                    "polyhedron face {} has {} vertices",
                    f,
                    face.len()
                )));
            }
            if let Some(bad) = face.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(GeometryError::invalid_parameter(format!(
                    "polyhedron face {} references vertex {} of {}",
                    f,
                    bad,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }
}

/// Options for [`create_polyhedron`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyhedronOptions {
    /// Named solid, ignored when `custom` is set
    pub kind: PolyhedronKind,
    /// Scale used for any axis not given (default 1)
    pub size: f32,
    /// Scale along X
    pub size_x: Option<f32>,
    /// Scale along Y
    pub size_y: Option<f32>,
    /// Scale along Z
    pub size_z: Option<f32>,
    /// Caller-supplied vertices and faces
    pub custom: Option<PolyhedronData>,
    /// Texture rectangle per face (flat mode); missing entries use the unit square.
    ///
    /// Named solids list their faces from the top down by outward normal,
    /// then counter-clockwise around `+Y` starting at `+X`.
    pub face_uv: Vec<Vec4>,
    /// Color per face (flat mode) in the same order as `face_uv`; colors are
    /// emitted only when non-empty
    pub face_colors: Vec<Vec4>,
    /// Per-face vertices and normals (default true)
    pub flat: bool,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for PolyhedronOptions {
    fn default() -> Self {
        Self {
            kind: PolyhedronKind::Tetrahedron,
            size: 1.0,
            size_x: None,
            size_y: None,
            size_z: None,
            custom: None,
            face_uv: Vec::new(),
            face_colors: Vec::new(),
            flat: true,
            sides: SideOptions::default(),
        }
    }
}

impl PolyhedronOptions {
    fn scale(&self) -> Vec3 {
        Vec3::new(
            self.size_x.unwrap_or(self.size),
            self.size_y.unwrap_or(self.size),
            self.size_z.unwrap_or(self.size),
        )
    }
}

/// Spherical texture coordinate of a direction from the center.
///
/// `u` follows the counter-clockwise angle around +Y, `v` the latitude.
pub(crate) fn spherical_uv(direction: Vec3) -> Vec2 {
    let d = direction.normalize_or_zero();
    let mut u = (-d.z).atan2(d.x) / TAU;
    if u < 0.0 {
        u += 1.0;
    }
    Vec2::new(u, 0.5 + d.y.clamp(-1.0, 1.0).asin() / PI)
}

/// Creates a polyhedron.
///
/// # Errors
///
/// `InvalidParameter` if custom data has no vertices, no faces, a face
/// with fewer than 3 vertices or an out-of-range index.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_polyhedron, PolyhedronKind, PolyhedronOptions};
///
/// let cube_ish = create_polyhedron(&PolyhedronOptions {
///     kind: PolyhedronKind::Octahedron,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(cube_ish.triangle_count(), 8);
/// ```
pub fn create_polyhedron(options: &PolyhedronOptions) -> GeometryResult<VertexData> {
    let scale = options.scale();
    let data = match &options.custom {
        Some(custom) => {
            custom.validate()?;
            build_solid(&custom.vertices, &custom.faces, scale, options)
        }
        None => {
            let table = solids::table(options.kind);
            build_solid(table.vertices, table.faces, scale, options)
        }
    };
    Ok(data.finish(&options.sides))
}

fn build_solid<F: AsRef<[usize]>>(
    vertices: &[Vec3],
    faces: &[F],
    scale: Vec3,
    options: &PolyhedronOptions,
) -> VertexData {
    if options.flat {
        flat_polyhedron(vertices, faces, scale, options)
    } else {
        smooth_polyhedron(vertices, faces, scale)
    }
}

fn flat_polyhedron<F: AsRef<[usize]>>(
    vertices: &[Vec3],
    faces: &[F],
    scale: Vec3,
    options: &PolyhedronOptions,
) -> VertexData {
    let colored = !options.face_colors.is_empty();
    let mut data = VertexData::new();

    for (f, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        let points: Vec<Vec3> = face.iter().map(|&i| vertices[i] * scale).collect();
        let normal = newell_normal(&points);
        let axis_u = (points[1] - points[0]).normalize_or_zero();
        let axis_v = normal.cross(axis_u);

        let planar: Vec<Vec2> = points
            .iter()
            .map(|p| Vec2::new(p.dot(axis_u), p.dot(axis_v)))
            .collect();
        let min = planar.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = planar.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));

        let rect = face_entry(&options.face_uv, f, Vec4::new(0.0, 0.0, 1.0, 1.0));
        let base = data.vertex_count() as u32;
        for (point, flat) in points.iter().zip(&planar) {
            data.add_vertex(*point, normal, map_to_rect((*flat - min) / extent, rect));
            if colored {
                data.add_color(face_entry(&options.face_colors, f, default_color()));
            }
        }
        for k in 1..face.len() as u32 - 1 {
            data.add_triangle(base, base + k, base + k + 1);
        }
    }
    data
}

fn smooth_polyhedron<F: AsRef<[usize]>>(vertices: &[Vec3], faces: &[F], scale: Vec3) -> VertexData {
    let center = vertices.iter().copied().sum::<Vec3>() / vertices.len() as f32;
    let mut data = VertexData::with_capacity(vertices.len(), faces.len() * 2);
    for vertex in vertices {
        let direction = *vertex - center;
        let normal = (direction / scale).normalize_or_zero();
        data.add_vertex(*vertex * scale, normal, spherical_uv(direction));
    }
    for face in faces {
        let face = face.as_ref();
        for k in 1..face.len() - 1 {
            data.add_triangle(face[0] as u32, face[k] as u32, face[k + 1] as u32);
        }
    }
    data
}

/// Unit normal of a planar polygon by Newell's method.
fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.normalize_or_zero()
}
