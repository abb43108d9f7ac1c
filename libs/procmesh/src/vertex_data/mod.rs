//! # Vertex Data
//!
//! The geometry buffer every generator populates: flat positions, normals,
//! texture coordinates, optional colors and triangle indices.
//!
//! ## Invariants
//!
//! - `positions.len() == normals.len() == 3 * vertex_count`
//! - `uvs.len() == 2 * vertex_count`
//! - `colors`, when present, holds `4 * vertex_count` values
//! - every index is `< vertex_count`, and `indices.len() % 3 == 0`
//!
//! Front faces wind counter-clockwise in a right-handed frame; the face
//! normal of `(a, b, c)` is `(b - a) × (c - a)`.

mod normals;
mod sides;
mod store;


pub use normals::compute_normals;
pub use sides::{apply_side_orientation, SideOptions, SideOrientation};
pub use store::{MeshBuffers, VertexBufferStore, VertexKind};

use crate::error::{GeometryError, GeometryResult};
use config::constants::DEFAULT_COLOR;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A triangle-mesh buffer with flat per-vertex attribute arrays.
///
/// # Example
///
/// ```rust
/// use procmesh::VertexData;
/// use glam::{Vec2, Vec3};
///
/// let mut data = VertexData::new();
/// let a = data.add_vertex(Vec3::ZERO, Vec3::Z, Vec2::ZERO);
/// let b = data.add_vertex(Vec3::X, Vec3::Z, Vec2::X);
/// let c = data.add_vertex(Vec3::Y, Vec3::Z, Vec2::Y);
/// data.add_triangle(a, b, c);
/// assert_eq!(data.vertex_count(), 3);
/// assert!(data.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexData {
    /// Vertex positions, `x, y, z` per vertex
    pub positions: Vec<f32>,
    /// Unit vertex normals, `x, y, z` per vertex
    pub normals: Vec<f32>,
    /// Texture coordinates, `u, v` per vertex
    pub uvs: Vec<f32>,
    /// Optional RGBA colors, 4 values per vertex
    pub colors: Option<Vec<f32>>,
    /// Triangle indices, 3 per triangle
    pub indices: Vec<u32>,
}

impl VertexData {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            colors: None,
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if the buffer carries per-vertex colors.
    #[inline]
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.uvs.extend_from_slice(&uv.to_array());
        index
    }

    /// Appends one RGBA color, creating the color buffer on first use.
    ///
    /// Callers add exactly one color per vertex they add.
    pub fn add_color(&mut self, color: Vec4) {
        self.colors
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&color.to_array());
    }

    /// Adds a triangle by vertex indices.
    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Returns the position of a vertex.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Returns the normal of a vertex.
    #[inline]
    pub fn normal(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[index * 3..index * 3 + 3])
    }

    /// Returns the texture coordinate of a vertex.
    #[inline]
    pub fn uv(&self, index: usize) -> Vec2 {
        Vec2::from_slice(&self.uvs[index * 2..index * 2 + 2])
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Gives every vertex the same color unless colors are already present.
    ///
    /// Use this to pad a colorless buffer before merging it with a colored one.
    pub fn with_uniform_color(mut self, color: Vec4) -> Self {
        if self.colors.is_none() {
            let rgba = color.to_array();
            let mut colors = Vec::with_capacity(self.vertex_count() * 4);
            for _ in 0..self.vertex_count() {
                colors.extend_from_slice(&rgba);
            }
            self.colors = Some(colors);
        }
        self
    }

    /// Recomputes all normals from the current positions and indices.
    pub fn compute_normals(&mut self) {
        self.normals = compute_normals(&self.positions, &self.indices);
    }

    /// Reverses the winding of every triangle and negates every normal.
    pub fn flip_faces(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(0, 2);
        }
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Transforms positions by a 4x4 matrix and normals by its inverse transpose.
    ///
    /// A mirroring matrix (negative determinant) also reverses the winding so
    /// front faces stay front faces.
    pub fn transform(&mut self, matrix: &Mat4) {
        for p in self.positions.chunks_exact_mut(3) {
            let transformed = matrix.transform_point3(Vec3::from_slice(p));
            p.copy_from_slice(&transformed.to_array());
        }

        let normal_matrix = Mat3::from_mat4(*matrix).inverse().transpose();
        for n in self.normals.chunks_exact_mut(3) {
            let transformed = (normal_matrix * Vec3::from_slice(n)).normalize_or_zero();
            n.copy_from_slice(&transformed.to_array());
        }

        if matrix.determinant() < 0.0 {
            for tri in self.indices.chunks_exact_mut(3) {
                tri.swap(0, 2);
            }
        }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        if self.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in self.positions.chunks_exact(3) {
            let v = Vec3::from_slice(p);
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Validates the buffer invariants.
    ///
    /// Checks:
    /// - attribute array lengths agree with the vertex count
    /// - index count is a multiple of 3
    /// - all indices reference existing vertices
    pub fn validate(&self) -> GeometryResult<()> {
        if self.positions.len() % 3 != 0 {
            return Err(GeometryError::invalid_topology(format!(
                "positions length {} is not a multiple of 3",
                self.positions.len()
            )));
        }

        let count = self.vertex_count();
        if self.normals.len() != count * 3 {
            return Err(GeometryError::invalid_topology(format!(
                "expected {} normal values, found {}",
                count * 3,
                self.normals.len()
            )));
        }
        if self.uvs.len() != count * 2 {
            return Err(GeometryError::invalid_topology(format!(
                "expected {} uv values, found {}",
                count * 2,
                self.uvs.len()
            )));
        }
        if let Some(colors) = &self.colors {
            if colors.len() != count * 4 {
                return Err(GeometryError::invalid_topology(format!(
                    "expected {} color values, found {}",
                    count * 4,
                    colors.len()
                )));
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::invalid_topology(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(GeometryError::invalid_topology(format!(
                "index {} out of range for {} vertices",
                bad, count
            )));
        }

        Ok(())
    }

    /// Merges another buffer into this one.
    ///
    /// Indices of `other` are offset by this buffer's vertex count. Merging a
    /// colored buffer with a colorless one is refused; pad first with
    /// [`VertexData::with_uniform_color`]. An empty buffer adopts the color
    /// layout of whatever is merged into it.
    pub fn merge_with(&mut self, other: &VertexData) -> GeometryResult<()> {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() && self.indices.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        if self.has_colors() != other.has_colors() {
            return Err(GeometryError::precondition(
                "cannot merge a colored buffer with a colorless one; pad colors first",
            ));
        }

        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        if let (Some(colors), Some(other_colors)) = (&mut self.colors, &other.colors) {
            colors.extend_from_slice(other_colors);
        }
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));

        Ok(())
    }

    /// Replaces positions and normals with those of a freshly generated
    /// buffer, keeping this buffer's indices, uvs and colors.
    ///
    /// This is the instance-update path for swept shapes: the fresh buffer
    /// must have exactly the same vertex and index counts.
    pub fn replace_geometry(&self, fresh: VertexData) -> GeometryResult<VertexData> {
        if fresh.vertex_count() != self.vertex_count() {
            return Err(GeometryError::precondition(format!(
                "rebuild changed vertex count from {} to {}",
                self.vertex_count(),
                fresh.vertex_count()
            )));
        }
        if fresh.indices.len() != self.indices.len() {
            return Err(GeometryError::precondition(format!(
                "rebuild changed index count from {} to {}",
                self.indices.len(),
                fresh.indices.len()
            )));
        }

        Ok(VertexData {
            positions: fresh.positions,
            normals: fresh.normals,
            uvs: self.uvs.clone(),
            colors: self.colors.clone(),
            indices: self.indices.clone(),
        })
    }

    /// Writes every buffer into a mesh-instance store.
    ///
    /// Without colors, any color buffer already in the store is removed.
    pub fn apply_to<S: VertexBufferStore + ?Sized>(&self, store: &mut S) {
        store.set_vertex_data(VertexKind::Position, self.positions.clone());
        store.set_vertex_data(VertexKind::Normal, self.normals.clone());
        store.set_vertex_data(VertexKind::Uv, self.uvs.clone());
        match &self.colors {
            Some(colors) => store.set_vertex_data(VertexKind::Color, colors.clone()),
            None => store.remove_vertex_data(VertexKind::Color),
        }
        store.set_indices(self.indices.clone());
    }

    /// Reads a buffer back from a mesh-instance store.
    ///
    /// Positions are required. Missing normals are recomputed and missing
    /// uvs are zero-filled.
    pub fn from_store<S: VertexBufferStore + ?Sized>(store: &S) -> GeometryResult<VertexData> {
        let positions = store
            .vertex_data(VertexKind::Position)
            .ok_or_else(|| GeometryError::invalid_parameter("mesh has no position data"))?
            .to_vec();
        let indices = store.indices().to_vec();
        let vertex_count = positions.len() / 3;

        let normals = match store.vertex_data(VertexKind::Normal) {
            Some(normals) => normals.to_vec(),
            None => compute_normals(&positions, &indices),
        };
        let uvs = store
            .vertex_data(VertexKind::Uv)
            .map(<[f32]>::to_vec)
            .unwrap_or_else(|| vec![0.0; vertex_count * 2]);
        let colors = store.vertex_data(VertexKind::Color).map(<[f32]>::to_vec);

        let data = VertexData {
            positions,
            normals,
            uvs,
            colors,
            indices,
        };
        data.validate()?;
        Ok(data)
    }

    /// Applies the side orientation requested by a generator's options.
    pub(crate) fn finish(mut self, sides: &SideOptions) -> Self {
        apply_side_orientation(
            &mut self,
            sides.orientation,
            sides.front_uvs,
            sides.back_uvs,
        );
        self
    }
}

/// Merges several buffers into one.
///
/// # Example
///
/// ```rust
/// use procmesh::vertex_data::merge;
/// use procmesh::primitives::{create_plane, PlaneOptions};
///
/// let a = create_plane(&PlaneOptions::default()).unwrap();
/// let b = create_plane(&PlaneOptions::default()).unwrap();
/// let merged = merge(&[a, b]).unwrap();
/// assert_eq!(merged.vertex_count(), 8);
/// assert_eq!(merged.indices[6..9], [4, 5, 6]);
/// ```
pub fn merge(buffers: &[VertexData]) -> GeometryResult<VertexData> {
    let mut result = VertexData::new();
    for buffer in buffers {
        result.merge_with(buffer)?;
    }
    Ok(result)
}

/// The default RGBA color as a vector.
#[inline]
pub(crate) fn default_color() -> Vec4 {
    Vec4::from_array(DEFAULT_COLOR)
}
