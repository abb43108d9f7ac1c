//! # Cylinder Primitive
//!
//! Cylinders, truncated cones and cones along the Y axis, with optional
//! independent rings, an open arc and quad end faces ("enclose") closing
//! a sliced cylinder.
//!
//! ## Face Layout
//!
//! `face_uv` and `face_colors` are indexed by logical face:
//!
//! ```text
//! 0                      bottom cap
//! 1 + b * stride         side band b    (stride = 3 with enclose, else 1)
//! 2 + b * stride         band b start face  (enclose only)
//! 3 + b * stride         band b end face    (enclose only)
//! last                   top cap
//! ```
//!
//! There is one band per subdivision with `has_rings`, otherwise one band.
//! A cap whose radius is below `ZERO_RADIUS_EPSILON` is not built, but it
//! keeps its slot: a cone pointing up still reads its side from entry 1 and
//! never uses the last entry.

use super::{face_entry, map_to_rect, subdivision_option, tessellation_option, Cap};
use crate::error::GeometryResult;
use crate::vertex_data::{default_color, SideOptions, VertexData};
use config::constants::{clamp_arc, ZERO_RADIUS_EPSILON};
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Options for [`create_cylinder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderOptions {
    /// Height along Y (default 2)
    pub height: f32,
    /// Diameter used for any end not given (default 1)
    pub diameter: f32,
    /// Top diameter; 0 makes a cone
    pub diameter_top: Option<f32>,
    /// Bottom diameter
    pub diameter_bottom: Option<f32>,
    /// Samples around the axis (default 24, minimum 3)
    pub tessellation: u32,
    /// Rows along the height (default 1, minimum 1)
    pub subdivisions: u32,
    /// Fraction of the full turn, in (0, 1]
    pub arc: f32,
    /// Give each subdivision its own face (own uvs/colors)
    pub has_rings: bool,
    /// Close an open arc with quad faces
    pub enclose: bool,
    /// Which caps to build
    pub cap: Cap,
    /// Texture rectangle per logical face; missing entries use the unit square
    pub face_uv: Vec<Vec4>,
    /// Color per logical face; colors are emitted only when non-empty
    pub face_colors: Vec<Vec4>,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            height: 2.0,
            diameter: 1.0,
            diameter_top: None,
            diameter_bottom: None,
            tessellation: 24,
            subdivisions: 1,
            arc: 1.0,
            has_rings: false,
            enclose: false,
            cap: Cap::CapAll,
            face_uv: Vec::new(),
            face_colors: Vec::new(),
            sides: SideOptions::default(),
        }
    }
}

impl CylinderOptions {
    /// Clamps counts and arc to their documented ranges.
    pub fn normalized(&self) -> Self {
        Self {
            tessellation: tessellation_option("cylinder.tessellation", self.tessellation),
            subdivisions: subdivision_option("cylinder.subdivisions", self.subdivisions),
            arc: clamp_arc(self.arc),
            ..self.clone()
        }
    }
}

/// Face bookkeeping, computed once before any vertex is emitted.
#[derive(Debug, Clone, Copy)]
struct FaceLayout {
    bands: u32,
    stride: u32,
    enclose: bool,
}

impl FaceLayout {
    fn new(options: &CylinderOptions) -> Self {
        let enclose = options.enclose && options.arc < 1.0;
        Self {
            bands: if options.has_rings { options.subdivisions } else { 1 },
            stride: if enclose { 3 } else { 1 },
            enclose,
        }
    }

    fn bottom_cap(&self) -> usize {
        0
    }

    fn side(&self, band: u32) -> usize {
        (1 + band * self.stride) as usize
    }

    fn enclose_start(&self, band: u32) -> usize {
        self.side(band) + 1
    }

    fn enclose_end(&self, band: u32) -> usize {
        self.side(band) + 2
    }

    fn top_cap(&self) -> usize {
        (1 + self.bands * self.stride) as usize
    }
}

struct Builder<'a> {
    data: VertexData,
    options: &'a CylinderOptions,
    colored: bool,
}

impl Builder<'_> {
    fn vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2, face: usize) -> u32 {
        let rect = face_entry(&self.options.face_uv, face, Vec4::new(0.0, 0.0, 1.0, 1.0));
        let index = self.data.add_vertex(position, normal, map_to_rect(uv, rect));
        if self.colored {
            self.data
                .add_color(face_entry(&self.options.face_colors, face, default_color()));
        }
        index
    }
}

/// Creates a cylinder or cone centered on the origin.
///
/// A radius smaller than the zero-radius epsilon at either end is treated as
/// an apex: its cap is skipped and side normals come from the slope alone.
/// The skipped cap's `face_uv` and `face_colors` entries are left unused;
/// later faces do not shift down to fill them.
pub fn create_cylinder(options: &CylinderOptions) -> GeometryResult<VertexData> {
    let options = options.normalized();
    let layout = FaceLayout::new(&options);

    let height = options.height;
    let radius_top = options.diameter_top.unwrap_or(options.diameter) * 0.5;
    let radius_bottom = options.diameter_bottom.unwrap_or(options.diameter) * 0.5;
    let tessellation = options.tessellation;
    let subdivisions = options.subdivisions;
    let sweep = TAU * options.arc;
    let step = sweep / tessellation as f32;

    let slope = if height.abs() > ZERO_RADIUS_EPSILON {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let ring = |i: u32| {
        let h = i as f32 / subdivisions as f32;
        (
            radius_bottom + h * (radius_top - radius_bottom),
            -height * 0.5 + h * height,
        )
    };

    let mut builder = Builder {
        data: VertexData::new(),
        options: &options,
        colored: !options.face_colors.is_empty(),
    };

    if options.cap.has_start() && radius_bottom.abs() >= ZERO_RADIUS_EPSILON {
        build_cap(&mut builder, layout.bottom_cap(), radius_bottom, -height * 0.5, false, tessellation, step);
    }

    for band in 0..layout.bands {
        let (first, last) = if options.has_rings {
            (band, band + 1)
        } else {
            (0, subdivisions)
        };

        // Side band
        let face = layout.side(band);
        let stride = tessellation + 1;
        let base = builder.data.vertex_count() as u32;
        for i in first..=last {
            let (radius, y) = ring(i);
            let v = (i - first) as f32 / (last - first) as f32;
            for j in 0..=tessellation {
                let angle = j as f32 * step;
                let (sin, cos) = angle.sin_cos();
                let position = Vec3::new(cos * radius, y, -sin * radius);
                let normal = Vec3::new(cos, slope, -sin).normalize();
                builder.vertex(position, normal, Vec2::new(j as f32 / tessellation as f32, v), face);
            }
        }
        for row in 0..(last - first) {
            for j in 0..tessellation {
                let a = base + row * stride + j;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                builder.data.add_triangle(a, b, c);
                builder.data.add_triangle(b, d, c);
            }
        }

        if layout.enclose {
            build_enclose(&mut builder, layout.enclose_start(band), 0.0, false, first, last, &ring);
            build_enclose(&mut builder, layout.enclose_end(band), sweep, true, first, last, &ring);
        }
    }

    if options.cap.has_end() && radius_top.abs() >= ZERO_RADIUS_EPSILON {
        build_cap(&mut builder, layout.top_cap(), radius_top, height * 0.5, true, tessellation, step);
    }

    Ok(builder.data.finish(&options.sides))
}

fn build_cap(
    builder: &mut Builder<'_>,
    face: usize,
    radius: f32,
    y: f32,
    top: bool,
    tessellation: u32,
    step: f32,
) {
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
    let center = builder.vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5), face);
    for j in 0..=tessellation {
        let (sin, cos) = (j as f32 * step).sin_cos();
        let uv = Vec2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin);
        builder.vertex(Vec3::new(cos * radius, y, -sin * radius), normal, uv, face);
    }
    for j in 0..tessellation {
        let a = center + 1 + j;
        if top {
            builder.data.add_triangle(center, a, a + 1);
        } else {
            builder.data.add_triangle(center, a + 1, a);
        }
    }
}

/// One quad per subdivision row between the axis and the rim at `angle`.
fn build_enclose(
    builder: &mut Builder<'_>,
    face: usize,
    angle: f32,
    end: bool,
    first: u32,
    last: u32,
    ring: &impl Fn(u32) -> (f32, f32),
) {
    let (sin, cos) = angle.sin_cos();
    let radial = Vec3::new(cos, 0.0, -sin);
    // Outward: against the sweep at the start face, along it at the end face.
    let tangent = Vec3::new(-sin, 0.0, -cos);
    let normal = if end { tangent } else { -tangent };
    let rows = (last - first) as f32;

    for i in first..last {
        let (r0, y0) = ring(i);
        let (r1, y1) = ring(i + 1);
        let v0 = (i - first) as f32 / rows;
        let v1 = (i + 1 - first) as f32 / rows;
        let corners = [
            (radial * r0 + Vec3::Y * y0, Vec2::new(1.0, v0)),
            (radial * r1 + Vec3::Y * y1, Vec2::new(1.0, v1)),
            (Vec3::Y * y1, Vec2::new(0.0, v1)),
            (Vec3::Y * y0, Vec2::new(0.0, v0)),
        ];
        let base = builder.data.vertex_count() as u32;
        for (position, uv) in corners {
            builder.vertex(position, normal, uv, face);
        }
        if end {
            builder.data.add_triangle(base, base + 2, base + 1);
            builder.data.add_triangle(base, base + 3, base + 2);
        } else {
            builder.data.add_triangle(base, base + 1, base + 2);
            builder.data.add_triangle(base, base + 2, base + 3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn outward(data: &VertexData) -> bool {
        data.indices.chunks_exact(3).all(|t| {
            let a = data.position(t[0] as usize);
            let b = data.position(t[1] as usize);
            let c = data.position(t[2] as usize);
            let n = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            n.length() < 1e-9 || n.dot(centroid) > -1e-6
        })
    }

    #[test]
    fn test_cylinder_counts() {
        let cylinder = create_cylinder(&CylinderOptions {
            tessellation: 8,
            ..Default::default()
        })
        .unwrap();
        // side 2 rows of 9, two caps of center + 9
        assert_eq!(cylinder.vertex_count(), 18 + 20);
        assert_eq!(cylinder.triangle_count(), 16 + 16);
        assert!(cylinder.validate().is_ok());
    }

    #[test]
    fn test_cylinder_winding_is_outward() {
        let cylinder = create_cylinder(&CylinderOptions {
            tessellation: 12,
            subdivisions: 3,
            ..Default::default()
        })
        .unwrap();
        assert!(outward(&cylinder));
    }

    #[test]
    fn test_cone_skips_top_cap() {
        let cone = create_cylinder(&CylinderOptions {
            tessellation: 6,
            diameter_top: Some(0.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cone.vertex_count(), 14 + 8);
        for i in 0..cone.vertex_count() {
            assert_relative_eq!(cone.normal(i).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_cone_side_normal_slope() {
        let cone = create_cylinder(&CylinderOptions {
            tessellation: 4,
            height: 1.0,
            diameter_top: Some(0.0),
            diameter_bottom: Some(2.0),
            cap: Cap::NoCap,
            ..Default::default()
        })
        .unwrap();
        // Slope 1: the side normal leans 45 degrees up.
        let n = cone.normal(0);
        assert_relative_eq!(n.x, n.y, epsilon = 1e-5);
    }

    #[test]
    fn test_cylinder_has_rings_duplicates_rows() {
        let cylinder = create_cylinder(&CylinderOptions {
            tessellation: 4,
            subdivisions: 3,
            has_rings: true,
            cap: Cap::NoCap,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cylinder.vertex_count(), 3 * 2 * 5);
    }

    #[test]
    fn test_cylinder_face_colors_follow_layout() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
        let cylinder = create_cylinder(&CylinderOptions {
            tessellation: 4,
            face_colors: vec![red, green, blue],
            ..Default::default()
        })
        .unwrap();
        let colors = cylinder.colors.as_ref().unwrap();
        assert_eq!(colors.len(), cylinder.vertex_count() * 4);
        assert_eq!(&colors[0..4], &red.to_array());
        // Bottom cap has 6 vertices, then the side band.
        assert_eq!(&colors[24..28], &green.to_array());
        let last = colors.len() - 4;
        assert_eq!(&colors[last..], &blue.to_array());
    }

    #[test]
    fn test_skipped_cap_keeps_its_face_slot() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
        let cone = create_cylinder(&CylinderOptions {
            tessellation: 4,
            diameter_bottom: Some(0.0),
            face_colors: vec![red, green, blue],
            ..Default::default()
        })
        .unwrap();
        let colors = cone.colors.as_ref().unwrap();
        // No bottom cap: the side band comes first, the top cap last.
        assert_eq!(cone.vertex_count(), 10 + 6);
        assert_eq!(&colors[0..4], &green.to_array());
        let last = colors.len() - 4;
        assert_eq!(&colors[last..], &blue.to_array());
        assert!(colors.chunks_exact(4).all(|c| c != red.to_array()));
    }

    #[test]
    fn test_cylinder_enclose_half() {
        let cylinder = create_cylinder(&CylinderOptions {
            tessellation: 6,
            arc: 0.5,
            enclose: true,
            ..Default::default()
        })
        .unwrap();
        // caps 2 * 8, side 2 * 7, enclose 2 * 4
        assert_eq!(cylinder.vertex_count(), 16 + 14 + 8);
        assert!(outward(&cylinder));
        assert!(cylinder.validate().is_ok());
    }

    #[test]
    fn test_face_layout_indices() {
        let options = CylinderOptions {
            subdivisions: 2,
            has_rings: true,
            enclose: true,
            arc: 0.5,
            ..Default::default()
        };
        let layout = FaceLayout::new(&options);
        assert_eq!(layout.side(0), 1);
        assert_eq!(layout.enclose_end(0), 3);
        assert_eq!(layout.side(1), 4);
        assert_eq!(layout.top_cap(), 7);
    }
}
