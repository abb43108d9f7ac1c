//! # Extruded Shape Primitive
//!
//! Sweeps a 2D cross-section along a 3D path. At every path sample the
//! shape's `x` follows the frame normal and its `y` the binormal, so a
//! counter-clockwise shape yields outward-facing walls.

use super::ribbon::{create_ribbon, RibbonOptions};
use super::{Cap, PathFunction};
use crate::error::{GeometryError, GeometryResult};
use crate::path3d::Path3D;
use crate::vertex_data::{SideOptions, VertexData};
use glam::{Quat, Vec2, Vec3};
use std::fmt;

/// Options for [`create_extruded_shape`].
#[derive(Clone)]
pub struct ExtrudeShapeOptions {
    /// Cross-section; `x` and `y` are used, `z` offsets along the tangent
    pub shape: Vec<Vec3>,
    /// Path followed by the cross-section
    pub path: Vec<Vec3>,
    /// Constant scale of the cross-section (default 1)
    pub scale: f32,
    /// Constant twist per path step, in radians (default 0)
    pub rotation: f32,
    /// Per-sample scale; overrides `scale` when set
    pub scale_function: Option<PathFunction>,
    /// Per-sample twist step; overrides `rotation` when set
    pub rotation_function: Option<PathFunction>,
    /// Join the last shape point back to the first
    pub close_shape: bool,
    /// Join the last path sample back to the first
    pub close_path: bool,
    /// Which ends are closed (default none)
    pub cap: Cap,
    /// Orientation of the first frame normal
    pub first_normal: Option<Vec3>,
    /// Swap the `u` and `v` texture axes of the wall
    pub invert_uv: bool,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for ExtrudeShapeOptions {
    fn default() -> Self {
        Self {
            shape: Vec::new(),
            path: Vec::new(),
            scale: 1.0,
            rotation: 0.0,
            scale_function: None,
            rotation_function: None,
            close_shape: false,
            close_path: false,
            cap: Cap::NoCap,
            first_normal: None,
            invert_uv: false,
            sides: SideOptions::default(),
        }
    }
}

impl fmt::Debug for ExtrudeShapeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtrudeShapeOptions")
            .field("shape", &self.shape)
            .field("path", &self.path)
            .field("scale", &self.scale)
            .field("rotation", &self.rotation)
            .field("scale_function", &self.scale_function.is_some())
            .field("rotation_function", &self.rotation_function.is_some())
            .field("close_shape", &self.close_shape)
            .field("close_path", &self.close_path)
            .field("cap", &self.cap)
            .field("first_normal", &self.first_normal)
            .field("invert_uv", &self.invert_uv)
            .field("sides", &self.sides)
            .finish()
    }
}

/// Creates an extruded shape.
///
/// The twist accumulates: sample `i` is rotated about its tangent by the
/// sum of the rotation steps of samples `0..i`. Caps are fans from the
/// barycenter of the first or last cross-section.
///
/// # Errors
///
/// `InvalidParameter` for an empty shape or path, `DegenerateGeometry` if
/// every path point coincides.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_extruded_shape, ExtrudeShapeOptions};
/// use glam::Vec3;
///
/// let square = vec![
///     Vec3::new(-0.5, -0.5, 0.0),
///     Vec3::new(0.5, -0.5, 0.0),
///     Vec3::new(0.5, 0.5, 0.0),
///     Vec3::new(-0.5, 0.5, 0.0),
/// ];
/// let beam = create_extruded_shape(&ExtrudeShapeOptions {
///     shape: square,
///     path: vec![Vec3::ZERO, Vec3::Z * 3.0],
///     close_shape: true,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(beam.vertex_count(), 10);
/// assert_eq!(beam.triangle_count(), 8);
/// ```
pub fn create_extruded_shape(options: &ExtrudeShapeOptions) -> GeometryResult<VertexData> {
    if options.shape.is_empty() {
        return Err(GeometryError::invalid_parameter("extruded shape has no points"));
    }
    if options.path.is_empty() {
        return Err(GeometryError::invalid_parameter("extrusion path has no points"));
    }
    let path = Path3D::with_first_normal(&options.path, options.first_normal)?;

    let mut angle = 0.0;
    let mut sections = Vec::with_capacity(path.len());
    for i in 0..path.len() {
        let distance = path.distances()[i];
        let scale = match &options.scale_function {
            Some(f) => f(i, distance),
            None => options.scale,
        };
        let step = match &options.rotation_function {
            Some(f) => f(i, distance),
            None => options.rotation,
        };

        let tangent = path.tangents()[i];
        let normal = path.normals()[i];
        let binormal = path.binormals()[i];
        let twist = Quat::from_axis_angle(tangent, angle);
        let section: Vec<Vec3> = options
            .shape
            .iter()
            .map(|p| {
                let planed = tangent * p.z + normal * p.x + binormal * p.y;
                path.points()[i] + twist * planed * scale
            })
            .collect();
        sections.push(section);
        angle += step;
    }

    let mut data = create_ribbon(&RibbonOptions {
        path_array: sections.clone(),
        close_array: options.close_path,
        close_path: options.close_shape,
        invert_uv: options.invert_uv,
        ..Default::default()
    })?;

    let last = path.len() - 1;
    if options.cap.has_start() {
        data.merge_with(&section_cap(&sections[0], -path.tangents()[0], true))?;
    }
    if options.cap.has_end() {
        data.merge_with(&section_cap(&sections[last], path.tangents()[last], false))?;
    }

    Ok(data.finish(&options.sides))
}

/// Recomputes an extruded shape's positions and normals in place of
/// `existing`.
///
/// # Errors
///
/// `PreconditionViolation` if the new shape or path changed the vertex or
/// index count.
pub fn rebuild_extruded_shape(
    existing: &VertexData,
    options: &ExtrudeShapeOptions,
) -> GeometryResult<VertexData> {
    existing.replace_geometry(create_extruded_shape(options)?)
}

/// Fan from the section's barycenter, facing `normal`.
///
/// Texture coordinates are the section's planar projection onto the two
/// axes perpendicular to `normal`, fitted to its bounding square.
fn section_cap(section: &[Vec3], normal: Vec3, start: bool) -> VertexData {
    let center = section.iter().copied().sum::<Vec3>() / section.len() as f32;
    let u_axis = normal.any_orthonormal_vector();
    let v_axis = normal.cross(u_axis);
    let extent = section
        .iter()
        .map(|p| {
            let d = *p - center;
            d.dot(u_axis).abs().max(d.dot(v_axis).abs())
        })
        .fold(0.0f32, f32::max);
    let project = |p: Vec3| {
        if extent > 0.0 {
            let d = p - center;
            Vec2::new(d.dot(u_axis), d.dot(v_axis)) / (2.0 * extent) + Vec2::splat(0.5)
        } else {
            Vec2::splat(0.5)
        }
    };

    let mut data = VertexData::with_capacity(section.len() + 1, section.len());
    let hub = data.add_vertex(center, normal, Vec2::splat(0.5));
    for point in section {
        data.add_vertex(*point, normal, project(*point));
    }

    let count = section.len() as u32;
    for k in 0..count {
        let current = hub + 1 + k;
        let next = hub + 1 + (k + 1) % count;
        if start {
            data.add_triangle(hub, next, current);
        } else {
            data.add_triangle(hub, current, next);
        }
    }
    data
}
