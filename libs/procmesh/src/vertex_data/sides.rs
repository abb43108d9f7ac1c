//! Side orientation: front, back or double-sided output.

use super::VertexData;
use config::constants::DEFAULT_UV_RECT;
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Which side of the generated surface is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SideOrientation {
    /// Keep the generator's winding.
    #[default]
    Front,
    /// Reverse every triangle and negate every normal.
    Back,
    /// Append a mirrored copy so both sides render.
    Double,
}

/// Side options shared by every generator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideOptions {
    /// Visible side(s)
    pub orientation: SideOrientation,
    /// Texture rectangle `(u0, v0, u1, v1)` for the front copy in double mode
    pub front_uvs: Option<Vec4>,
    /// Texture rectangle `(u0, v0, u1, v1)` for the back copy in double mode
    pub back_uvs: Option<Vec4>,
}

impl SideOptions {
    /// Side options with only an orientation.
    pub fn new(orientation: SideOrientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }
}

/// Rewrites a buffer in place for the requested orientation.
///
/// - `Front` leaves the buffer untouched.
/// - `Back` swaps the first and last index of every triangle and negates normals.
/// - `Double` appends a copy of every vertex with negated normal and a
///   reversed copy of every triangle, so vertex and index counts double. The
///   original uvs are remapped into `front_uvs` and the copies into
///   `back_uvs`; both default to the unit rectangle.
pub fn apply_side_orientation(
    data: &mut VertexData,
    orientation: SideOrientation,
    front_uvs: Option<Vec4>,
    back_uvs: Option<Vec4>,
) {
    match orientation {
        SideOrientation::Front => {}
        SideOrientation::Back => data.flip_faces(),
        SideOrientation::Double => make_double_sided(data, front_uvs, back_uvs),
    }
}

fn make_double_sided(data: &mut VertexData, front_uvs: Option<Vec4>, back_uvs: Option<Vec4>) {
    let vertex_count = data.vertex_count() as u32;

    data.positions.extend_from_within(..);
    let back_normals: Vec<f32> = data.normals.iter().map(|n| -n).collect();
    data.normals.extend(back_normals);
    if let Some(colors) = &mut data.colors {
        colors.extend_from_within(..);
    }

    let full = Vec4::from_array(DEFAULT_UV_RECT);
    let front = front_uvs.unwrap_or(full);
    let back = back_uvs.unwrap_or(full);
    let original: Vec<f32> = data.uvs.clone();
    data.uvs.clear();
    for rect in [front, back] {
        for uv in original.chunks_exact(2) {
            data.uvs.extend_from_slice(&remap_uv(Vec2::new(uv[0], uv[1]), rect).to_array());
        }
    }

    let reversed: Vec<u32> = data
        .indices
        .chunks_exact(3)
        .flat_map(|t| [t[2] + vertex_count, t[1] + vertex_count, t[0] + vertex_count])
        .collect();
    data.indices.extend(reversed);
}

#[inline]
fn remap_uv(uv: Vec2, rect: Vec4) -> Vec2 {
    Vec2::new(
        rect.x + (rect.z - rect.x) * uv.x,
        rect.y + (rect.w - rect.y) * uv.y,
    )
}
