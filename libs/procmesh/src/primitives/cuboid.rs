//! # Box Primitive
//!
//! Axis-aligned box centered on the origin. By default every face owns its
//! four vertices so faces get independent normals, uvs and colors. In wrap
//! mode the four side faces share 8 vertices and the caps add 8 more.

use super::map_to_rect;
use crate::error::GeometryResult;
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Face order shared by [`BoxOptions::face_uv`] and [`BoxOptions::face_colors`]:
/// `+Z, -Z, +X, -X, +Y, -Y`.
///
/// Each entry is the outward normal followed by the face's `u` and `v` axes.
pub(crate) const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

const TOP_FACE: usize = 4;
const BOTTOM_FACE: usize = 5;

/// Options for [`create_box`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    /// Edge length used for any dimension not given explicitly (default 1)
    pub size: f32,
    /// Extent along X
    pub width: Option<f32>,
    /// Extent along Y
    pub height: Option<f32>,
    /// Extent along Z
    pub depth: Option<f32>,
    /// Texture rectangle `(u0, v0, u1, v1)` per face
    pub face_uv: [Vec4; 6],
    /// Color per face; colors are emitted only when set
    pub face_colors: Option<[Vec4; 6]>,
    /// Share side vertices for seamless texture wrapping
    pub wrap: bool,
    /// Quarter turns applied to the top face texture (0..=3)
    pub top_base_at: u8,
    /// Quarter turns applied to the bottom face texture (0..=3)
    pub bottom_base_at: u8,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            size: 1.0,
            width: None,
            height: None,
            depth: None,
            face_uv: [Vec4::new(0.0, 0.0, 1.0, 1.0); 6],
            face_colors: None,
            wrap: false,
            top_base_at: 0,
            bottom_base_at: 0,
            sides: SideOptions::default(),
        }
    }
}

impl BoxOptions {
    /// Full extents along X, Y and Z.
    pub fn dimensions(&self) -> Vec3 {
        Vec3::new(
            self.width.unwrap_or(self.size),
            self.height.unwrap_or(self.size),
            self.depth.unwrap_or(self.size),
        )
    }
}

/// Creates a box.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_box, BoxOptions};
///
/// let cube = create_box(&BoxOptions::default()).unwrap();
/// assert_eq!(cube.vertex_count(), 24);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
pub fn create_box(options: &BoxOptions) -> GeometryResult<VertexData> {
    let data = if options.wrap {
        wrapped_box(options)
    } else {
        faceted_box(options)
    };
    Ok(data.finish(&options.sides))
}

/// Rotates a unit-square coordinate by quarter turns about its center.
fn quarter_turns(uv: Vec2, turns: u8) -> Vec2 {
    match turns % 4 {
        1 => Vec2::new(1.0 - uv.y, uv.x),
        2 => Vec2::new(1.0 - uv.x, 1.0 - uv.y),
        3 => Vec2::new(uv.y, 1.0 - uv.x),
        _ => uv,
    }
}

fn face_turns(options: &BoxOptions, face: usize) -> u8 {
    match face {
        TOP_FACE => options.top_base_at,
        BOTTOM_FACE => options.bottom_base_at,
        _ => 0,
    }
}

fn faceted_box(options: &BoxOptions) -> VertexData {
    let half = options.dimensions() * 0.5;
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    let mut data = VertexData::with_capacity(24, 12);
    for (face, &(normal, u_axis, v_axis)) in BOX_FACES.iter().enumerate() {
        let base = data.vertex_count() as u32;
        let turns = face_turns(options, face);
        for corner in corners {
            let offset = normal + u_axis * (2.0 * corner.x - 1.0) + v_axis * (2.0 * corner.y - 1.0);
            let uv = map_to_rect(quarter_turns(corner, turns), options.face_uv[face]);
            data.add_vertex(half * offset, normal, uv);
            if let Some(colors) = &options.face_colors {
                data.add_color(colors[face]);
            }
        }
        data.add_triangle(base, base + 1, base + 2);
        data.add_triangle(base, base + 2, base + 3);
    }
    data
}

fn wrapped_box(options: &BoxOptions) -> VertexData {
    let half = options.dimensions() * 0.5;
    // Counter-clockwise seen from +Y, starting at the -X/+Z corner.
    let ring = [
        Vec2::new(-1.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(-1.0, -1.0),
    ];
    let side_color = options.face_colors.map(|c| c[0]);
    let side_rect = options.face_uv[0];

    let mut data = VertexData::with_capacity(16, 12);

    // Side vertices: bottom ring then top ring. Alternating u mirrors the
    // texture on neighbouring faces so every shared corner is seam-free.
    for (level, y) in [(0.0, -1.0), (1.0, 1.0)] {
        for (k, corner) in ring.iter().enumerate() {
            let position = Vec3::new(corner.x * half.x, y * half.y, corner.y * half.z);
            let normal = Vec3::new(corner.x, 0.0, corner.y).normalize();
            let u = (k % 2) as f32;
            data.add_vertex(position, normal, map_to_rect(Vec2::new(u, level), side_rect));
            if let Some(color) = side_color {
                data.add_color(color);
            }
        }
    }
    for k in 0..4u32 {
        let next = (k + 1) % 4;
        let (b0, b1, t0, t1) = (k, next, k + 4, next + 4);
        data.add_triangle(b0, b1, t1);
        data.add_triangle(b0, t1, t0);
    }

    for face in [TOP_FACE, BOTTOM_FACE] {
        let (normal, y) = if face == TOP_FACE { (Vec3::Y, 1.0) } else { (Vec3::NEG_Y, -1.0) };
        let base = data.vertex_count() as u32;
        for corner in ring {
            let position = Vec3::new(corner.x * half.x, y * half.y, corner.y * half.z);
            let planar = if face == TOP_FACE {
                Vec2::new((corner.x + 1.0) * 0.5, (1.0 - corner.y) * 0.5)
            } else {
                Vec2::new((corner.x + 1.0) * 0.5, (1.0 + corner.y) * 0.5)
            };
            let uv = map_to_rect(quarter_turns(planar, face_turns(options, face)), options.face_uv[face]);
            data.add_vertex(position, normal, uv);
            if let Some(colors) = &options.face_colors {
                data.add_color(colors[face]);
            }
        }
        if face == TOP_FACE {
            data.add_triangle(base, base + 1, base + 2);
            data.add_triangle(base, base + 2, base + 3);
        } else {
            data.add_triangle(base, base + 2, base + 1);
            data.add_triangle(base, base + 3, base + 2);
        }
    }

    data
}
