//! # Tiled Plane and Tiled Box
//!
//! Planes covered by a grid of texture tiles. Every tile owns its four
//! vertices so its texture can be flipped or rotated independently. Tiles
//! that do not fit completely are cropped, and the alignment decides on
//! which side(s) the cropped tiles go.

use super::cuboid::BOX_FACES;
use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{merge, SideOptions, VertexData};
use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// How alternate tiles are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TilePattern {
    /// Every tile identical
    #[default]
    NoFlip,
    /// Alternate tiles mirrored horizontally
    FlipTile,
    /// Alternate tiles rotated half a turn
    RotateTile,
    /// Alternate rows mirrored horizontally
    FlipRow,
    /// Alternate rows rotated half a turn
    RotateRow,
    /// Alternate tiles mirrored and rotated (vertical mirror)
    FlipNRotateTile,
    /// Alternate rows mirrored and rotated (vertical mirror)
    FlipNRotateRow,
}

impl TilePattern {
    fn apply(self, uv: Vec2, column: usize, row: usize) -> Vec2 {
        let alternate_tile = (column + row) % 2 == 1;
        let alternate_row = row % 2 == 1;
        let flip = Vec2::new(1.0 - uv.x, uv.y);
        let rotate = Vec2::new(1.0 - uv.x, 1.0 - uv.y);
        let flip_rotate = Vec2::new(uv.x, 1.0 - uv.y);
        match self {
            TilePattern::FlipTile if alternate_tile => flip,
            TilePattern::RotateTile if alternate_tile => rotate,
            TilePattern::FlipRow if alternate_row => flip,
            TilePattern::RotateRow if alternate_row => rotate,
            TilePattern::FlipNRotateTile if alternate_tile => flip_rotate,
            TilePattern::FlipNRotateRow if alternate_row => flip_rotate,
            _ => uv,
        }
    }
}

/// Where whole tiles start horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlign {
    /// Cropped tiles split evenly between both edges
    #[default]
    Center,
    /// Whole tiles start at the left edge
    Left,
    /// Whole tiles start at the right edge
    Right,
}

/// Where whole tiles start vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    /// Cropped tiles split evenly between both edges
    #[default]
    Center,
    /// Whole tiles start at the bottom edge
    Bottom,
    /// Whole tiles start at the top edge
    Top,
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Center,
    End,
}

impl From<HorizontalAlign> for Anchor {
    fn from(align: HorizontalAlign) -> Self {
        match align {
            HorizontalAlign::Center => Anchor::Center,
            HorizontalAlign::Left => Anchor::Start,
            HorizontalAlign::Right => Anchor::End,
        }
    }
}

impl From<VerticalAlign> for Anchor {
    fn from(align: VerticalAlign) -> Self {
        match align {
            VerticalAlign::Center => Anchor::Center,
            VerticalAlign::Bottom => Anchor::Start,
            VerticalAlign::Top => Anchor::End,
        }
    }
}

/// One column or row of tiles: its extent and the texture range it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f32,
    end: f32,
    tex_start: f32,
    tex_end: f32,
}

fn tile_spans(extent: f32, tile: f32, anchor: Anchor) -> Vec<Span> {
    let whole = (extent / tile + 1e-4).floor().max(0.0) as usize;
    let rest = (extent - whole as f32 * tile).max(0.0);
    let has_rest = rest > tile * 1e-4;

    let (leading, trailing) = match anchor {
        _ if !has_rest => (0.0, 0.0),
        Anchor::Start => (0.0, rest),
        Anchor::Center => (rest * 0.5, rest * 0.5),
        Anchor::End => (rest, 0.0),
    };

    let mut spans = Vec::with_capacity(whole + 2);
    let mut cursor = -extent * 0.5;
    if leading > 0.0 {
        spans.push(Span {
            start: cursor,
            end: cursor + leading,
            tex_start: 1.0 - leading / tile,
            tex_end: 1.0,
        });
        cursor += leading;
    }
    for _ in 0..whole {
        spans.push(Span {
            start: cursor,
            end: cursor + tile,
            tex_start: 0.0,
            tex_end: 1.0,
        });
        cursor += tile;
    }
    if trailing > 0.0 {
        spans.push(Span {
            start: cursor,
            end: cursor + trailing,
            tex_start: 0.0,
            tex_end: trailing / tile,
        });
    }
    spans
}

/// Options for [`create_tiled_plane`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiledPlaneOptions {
    /// Tile mirroring pattern
    pub pattern: TilePattern,
    /// Tile edge used for any tile dimension not given (default 1)
    pub tile_size: f32,
    /// Tile extent along X
    pub tile_width: Option<f32>,
    /// Tile extent along Y
    pub tile_height: Option<f32>,
    /// Plane edge used for any dimension not given (default 1)
    pub size: f32,
    /// Plane extent along X
    pub width: Option<f32>,
    /// Plane extent along Y
    pub height: Option<f32>,
    /// Horizontal placement of cropped tiles
    pub align_horizontal: HorizontalAlign,
    /// Vertical placement of cropped tiles
    pub align_vertical: VerticalAlign,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TiledPlaneOptions {
    fn default() -> Self {
        Self {
            pattern: TilePattern::NoFlip,
            tile_size: 1.0,
            tile_width: None,
            tile_height: None,
            size: 1.0,
            width: None,
            height: None,
            align_horizontal: HorizontalAlign::Center,
            align_vertical: VerticalAlign::Center,
            sides: SideOptions::default(),
        }
    }
}

impl TiledPlaneOptions {
    fn tile(&self) -> Vec2 {
        Vec2::new(
            self.tile_width.unwrap_or(self.tile_size),
            self.tile_height.unwrap_or(self.tile_size),
        )
    }

    fn extent(&self) -> Vec2 {
        Vec2::new(
            self.width.unwrap_or(self.size),
            self.height.unwrap_or(self.size),
        )
    }
}

/// Rejects tile grids that cannot be built: non-positive or non-finite
/// tiles, negative or non-finite extents, and grids whose vertices do not
/// fit `u32` indices.
fn check_grid(extent: Vec2, tile: Vec2) -> GeometryResult<()> {
    if !tile.is_finite() || tile.cmple(Vec2::ZERO).any() {
        return Err(GeometryError::invalid_parameter(format!(
            "tile size must be positive and finite, got {}",
            tile
        )));
    }
    if !extent.is_finite() || extent.cmplt(Vec2::ZERO).any() {
        return Err(GeometryError::invalid_parameter(format!(
            "tiled extent must be non-negative and finite, got {}",
            extent
        )));
    }
    let per_axis = (extent.as_dvec2() / tile.as_dvec2()).ceil() + 2.0;
    let vertices = per_axis.x * per_axis.y * 4.0;
    if vertices > u32::MAX as f64 {
        return Err(GeometryError::invalid_parameter(format!(
            "{} tiles over {} need more vertices than u32 indices address",
            tile, extent
        )));
    }
    Ok(())
}

/// Creates a tiled plane in the XY plane facing +Z.
///
/// # Errors
///
/// `InvalidParameter` if a tile dimension is not positive and finite, or
/// the grid would exceed the `u32` index range.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_tiled_plane, TiledPlaneOptions};
///
/// let plane = create_tiled_plane(&TiledPlaneOptions {
///     size: 3.0,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(plane.vertex_count(), 9 * 4);
/// ```
pub fn create_tiled_plane(options: &TiledPlaneOptions) -> GeometryResult<VertexData> {
    check_grid(options.extent(), options.tile())?;
    let data = tiled_quads(
        options.extent(),
        options.tile(),
        options.pattern,
        options.align_horizontal.into(),
        options.align_vertical.into(),
    );
    Ok(data.finish(&options.sides))
}

fn tiled_quads(
    extent: Vec2,
    tile: Vec2,
    pattern: TilePattern,
    horizontal: Anchor,
    vertical: Anchor,
) -> VertexData {
    let columns = tile_spans(extent.x, tile.x, horizontal);
    let rows = tile_spans(extent.y, tile.y, vertical);

    let mut data = VertexData::with_capacity(columns.len() * rows.len() * 4, columns.len() * rows.len() * 2);
    for (row, y) in rows.iter().enumerate() {
        for (column, x) in columns.iter().enumerate() {
            let base = data.vertex_count() as u32;
            let corners = [
                (Vec2::new(x.start, y.start), Vec2::new(x.tex_start, y.tex_start)),
                (Vec2::new(x.end, y.start), Vec2::new(x.tex_end, y.tex_start)),
                (Vec2::new(x.end, y.end), Vec2::new(x.tex_end, y.tex_end)),
                (Vec2::new(x.start, y.end), Vec2::new(x.tex_start, y.tex_end)),
            ];
            for (position, uv) in corners {
                data.add_vertex(position.extend(0.0), Vec3::Z, pattern.apply(uv, column, row));
            }
            data.add_triangle(base, base + 1, base + 2);
            data.add_triangle(base, base + 2, base + 3);
        }
    }
    data
}

/// Options for [`create_tiled_box`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiledBoxOptions {
    /// Tile mirroring pattern
    pub pattern: TilePattern,
    /// Tile edge used for any tile dimension not given (default 1)
    pub tile_size: f32,
    /// Tile extent along each face's horizontal axis
    pub tile_width: Option<f32>,
    /// Tile extent along each face's vertical axis
    pub tile_height: Option<f32>,
    /// Box edge used for any dimension not given (default 1)
    pub size: f32,
    /// Extent along X
    pub width: Option<f32>,
    /// Extent along Y
    pub height: Option<f32>,
    /// Extent along Z
    pub depth: Option<f32>,
    /// Color per face (`+Z, -Z, +X, -X, +Y, -Y`); emitted only when set
    pub face_colors: Option<[Vec4; 6]>,
    /// Horizontal placement of cropped tiles
    pub align_horizontal: HorizontalAlign,
    /// Vertical placement of cropped tiles
    pub align_vertical: VerticalAlign,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TiledBoxOptions {
    fn default() -> Self {
        Self {
            pattern: TilePattern::NoFlip,
            tile_size: 1.0,
            tile_width: None,
            tile_height: None,
            size: 1.0,
            width: None,
            height: None,
            depth: None,
            face_colors: None,
            align_horizontal: HorizontalAlign::Center,
            align_vertical: VerticalAlign::Center,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a box whose six faces are independently tiled planes.
///
/// Each face is built as a tiled plane facing +Z, then rotated and pushed
/// out to its face of the box.
///
/// # Errors
///
/// Same as [`create_tiled_plane`], checked against every face.
pub fn create_tiled_box(options: &TiledBoxOptions) -> GeometryResult<VertexData> {
    let dimensions = Vec3::new(
        options.width.unwrap_or(options.size),
        options.height.unwrap_or(options.size),
        options.depth.unwrap_or(options.size),
    );
    let tile = Vec2::new(
        options.tile_width.unwrap_or(options.tile_size),
        options.tile_height.unwrap_or(options.tile_size),
    );

    let mut faces = Vec::with_capacity(6);
    for (face, &(normal, u_axis, v_axis)) in BOX_FACES.iter().enumerate() {
        let extent = Vec2::new(
            dimensions.dot(u_axis.abs()),
            dimensions.dot(v_axis.abs()),
        );
        let offset = normal * dimensions.dot(normal.abs()) * 0.5;
        check_grid(extent, tile)?;

        let mut quads = tiled_quads(
            extent,
            tile,
            options.pattern,
            options.align_horizontal.into(),
            options.align_vertical.into(),
        );
        quads.transform(&Mat4::from_cols(
            u_axis.extend(0.0),
            v_axis.extend(0.0),
            normal.extend(0.0),
            offset.extend(1.0),
        ));
        if let Some(colors) = &options.face_colors {
            quads = quads.with_uniform_color(colors[face]);
        }
        faces.push(quads);
    }

    Ok(merge(&faces)?.finish(&options.sides))
}
