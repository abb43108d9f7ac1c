//! # Ground Primitives
//!
//! Regular grids in the XZ plane facing +Y: the flat ground, the tiled
//! ground and the ground displaced by a height-map image.
//!
//! Vertex `(column, row)` has index `row * (subdivisions_x + 1) + column`;
//! columns run along +X and rows along +Z. Each cell is split along the
//! diagonal from `(column + 1, row)` to `(column, row + 1)`.

use super::subdivision_option;
use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{SideOptions, VertexData};
use config::constants::{DEFAULT_LUMINANCE_FILTER, HEIGHT_MAP_HOLE_OFFSET};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Options for [`create_ground`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundOptions {
    /// Extent along X (default 1)
    pub width: f32,
    /// Extent along Z (default 1)
    pub height: f32,
    /// Cells per side when no per-axis count is given (default 1)
    pub subdivisions: u32,
    /// Cells along X
    pub subdivisions_x: Option<u32>,
    /// Cells along Z
    pub subdivisions_y: Option<u32>,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for GroundOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            subdivisions: 1,
            subdivisions_x: None,
            subdivisions_y: None,
            sides: SideOptions::default(),
        }
    }
}

impl GroundOptions {
    /// Cell counts along X and Z after clamping.
    pub fn cells(&self) -> (u32, u32) {
        (
            subdivision_option("ground.subdivisions_x", self.subdivisions_x.unwrap_or(self.subdivisions)),
            subdivision_option("ground.subdivisions_y", self.subdivisions_y.unwrap_or(self.subdivisions)),
        )
    }
}

/// Creates a flat ground.
///
/// # Example
///
/// ```rust
/// use procmesh::primitives::{create_ground, GroundOptions};
///
/// let ground = create_ground(&GroundOptions {
///     width: 4.0,
///     height: 4.0,
///     subdivisions: 2,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(ground.vertex_count(), 9);
/// assert_eq!(ground.indices.len(), 24);
/// ```
pub fn create_ground(options: &GroundOptions) -> GeometryResult<VertexData> {
    let (cells_x, cells_y) = options.cells();
    let mut data = VertexData::with_capacity(
        ((cells_x + 1) * (cells_y + 1)) as usize,
        (cells_x * cells_y * 2) as usize,
    );
    grid_vertices(&mut data, Vec2::new(options.width, options.height), Vec2::ZERO, cells_x, cells_y, |_, _| 0.0);
    grid_indices(&mut data, 0, cells_x, cells_y, |_| true);
    Ok(data.finish(&options.sides))
}

/// Emits a `(cells_x + 1) × (cells_y + 1)` grid centered on `center`.
fn grid_vertices(
    data: &mut VertexData,
    size: Vec2,
    center: Vec2,
    cells_x: u32,
    cells_y: u32,
    elevation: impl Fn(u32, u32) -> f32,
) {
    for row in 0..=cells_y {
        let fy = row as f32 / cells_y as f32;
        for column in 0..=cells_x {
            let fx = column as f32 / cells_x as f32;
            let position = Vec3::new(
                center.x - size.x * 0.5 + fx * size.x,
                elevation(column, row),
                center.y - size.y * 0.5 + fy * size.y,
            );
            data.add_vertex(position, Vec3::Y, Vec2::new(fx, 1.0 - fy));
        }
    }
}

/// Emits two triangles per cell, skipping any triangle with a vertex for
/// which `keep` (given the grid-local index) is false.
fn grid_indices(data: &mut VertexData, base: u32, cells_x: u32, cells_y: u32, keep: impl Fn(u32) -> bool) {
    let stride = cells_x + 1;
    for row in 0..cells_y {
        for column in 0..cells_x {
            let a = row * stride + column;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            for [i0, i1, i2] in [[a, c, b], [b, c, d]] {
                if keep(i0) && keep(i1) && keep(i2) {
                    data.add_triangle(base + i0, base + i1, base + i2);
                }
            }
        }
    }
}

// =============================================================================
// TILED GROUND
// =============================================================================

/// Options for [`create_tiled_ground`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiledGroundOptions {
    /// Minimum X (default -1)
    pub xmin: f32,
    /// Minimum Z (default -1)
    pub zmin: f32,
    /// Maximum X (default 1)
    pub xmax: f32,
    /// Maximum Z (default 1)
    pub zmax: f32,
    /// Tiles along X (default 1)
    pub subdivisions_x: u32,
    /// Tiles along Z (default 1)
    pub subdivisions_z: u32,
    /// Cells per tile along X (default 1)
    pub precision_x: u32,
    /// Cells per tile along Z (default 1)
    pub precision_z: u32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for TiledGroundOptions {
    fn default() -> Self {
        Self {
            xmin: -1.0,
            zmin: -1.0,
            xmax: 1.0,
            zmax: 1.0,
            subdivisions_x: 1,
            subdivisions_z: 1,
            precision_x: 1,
            precision_z: 1,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a ground made of separate tiles, each with the full texture.
pub fn create_tiled_ground(options: &TiledGroundOptions) -> GeometryResult<VertexData> {
    let tiles_x = subdivision_option("tiled_ground.subdivisions_x", options.subdivisions_x);
    let tiles_z = subdivision_option("tiled_ground.subdivisions_z", options.subdivisions_z);
    let cells_x = subdivision_option("tiled_ground.precision_x", options.precision_x);
    let cells_z = subdivision_option("tiled_ground.precision_z", options.precision_z);

    let tile_size = Vec2::new(
        (options.xmax - options.xmin) / tiles_x as f32,
        (options.zmax - options.zmin) / tiles_z as f32,
    );

    let mut data = VertexData::new();
    for tile_row in 0..tiles_z {
        for tile_column in 0..tiles_x {
            let center = Vec2::new(
                options.xmin + (tile_column as f32 + 0.5) * tile_size.x,
                options.zmin + (tile_row as f32 + 0.5) * tile_size.y,
            );
            let base = data.vertex_count() as u32;
            grid_vertices(&mut data, tile_size, center, cells_x, cells_z, |_, _| 0.0);
            grid_indices(&mut data, base, cells_x, cells_z, |_| true);
        }
    }

    Ok(data.finish(&options.sides))
}

// =============================================================================
// HEIGHT MAP
// =============================================================================

/// Decoded RGBA pixels supplied by an image loader.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMapImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl HeightMapImage {
    /// Wraps a decoded RGBA buffer, row-major from the top-left pixel.
    ///
    /// # Errors
    ///
    /// `ExternalCollaborator` if the image is empty or the buffer length is
    /// not `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> GeometryResult<Self> {
        if width == 0 || height == 0 {
            return Err(GeometryError::image(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GeometryError::image(format!(
                "expected {} bytes for a {}x{} RGBA image, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA of pixel `(x, y)`, both clamped into the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let offset = (y * self.width as usize + x) * 4;
        [
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ]
    }
}

/// Options for [`create_ground_from_height_map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightMapOptions {
    /// Extent along X (default 10)
    pub width: f32,
    /// Extent along Z (default 10)
    pub height: f32,
    /// Cells per side (default 1)
    pub subdivisions: u32,
    /// Elevation of a black pixel (default 0)
    pub min_height: f32,
    /// Elevation of a white pixel (default 1)
    pub max_height: f32,
    /// Weights applied to red, green and blue (default luminance)
    pub color_filter: Vec3,
    /// Pixels with alpha below this (in [0, 1]) become holes (default 0)
    pub alpha_filter: f32,
    /// Side orientation
    pub sides: SideOptions,
}

impl Default for HeightMapOptions {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            subdivisions: 1,
            min_height: 0.0,
            max_height: 1.0,
            color_filter: Vec3::from_array(DEFAULT_LUMINANCE_FILTER),
            alpha_filter: 0.0,
            sides: SideOptions::default(),
        }
    }
}

/// Creates a ground displaced by a height-map image.
///
/// Grid vertex `(column, row)` samples pixel
/// `(column / cells · (W − 1), row / cells · (H − 1))`, so the top image row
/// lies along −Z. Its elevation is `min + (max − min) · (filter · rgb)`.
/// Pixels whose alpha is below `alpha_filter` get a sentinel elevation just
/// under `min_height`, and every triangle touching one is dropped, leaving
/// a hole. Normals are computed from the displaced triangles.
pub fn create_ground_from_height_map(
    image: &HeightMapImage,
    options: &HeightMapOptions,
) -> GeometryResult<VertexData> {
    let cells = subdivision_option("height_map.subdivisions", options.subdivisions);
    let stride = cells + 1;
    let span = options.max_height - options.min_height;
    let sentinel = options.min_height - HEIGHT_MAP_HOLE_OFFSET;

    let sample = |column: u32, row: u32| {
        let to_pixel = |cell: u32, pixels: u32| {
            (cell as f32 / cells as f32 * (pixels - 1) as f32 + 1e-4) as u32
        };
        let [r, g, b, a] = image.pixel(to_pixel(column, image.width()), to_pixel(row, image.height()));
        let rgb = Vec3::new(r as f32, g as f32, b as f32) / 255.0;
        if (a as f32 / 255.0) < options.alpha_filter {
            None
        } else {
            Some(options.min_height + span * rgb.dot(options.color_filter))
        }
    };

    let mut solid = Vec::with_capacity((stride * stride) as usize);
    for row in 0..=cells {
        for column in 0..=cells {
            solid.push(sample(column, row).is_some());
        }
    }

    let mut data = VertexData::with_capacity((stride * stride) as usize, (cells * cells * 2) as usize);
    grid_vertices(
        &mut data,
        Vec2::new(options.width, options.height),
        Vec2::ZERO,
        cells,
        cells,
        |column, row| sample(column, row).unwrap_or(sentinel),
    );
    grid_indices(&mut data, 0, cells, cells, |i| solid[i as usize]);
    data.compute_normals();

    Ok(data.finish(&options.sides))
}
