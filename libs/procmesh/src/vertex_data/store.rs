//! The mesh-instance seam: a store that owns vertex buffers by kind.

use glam::Mat4;
use std::collections::HashMap;

/// The kinds of per-vertex attribute a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// `x, y, z` positions
    Position,
    /// `x, y, z` normals
    Normal,
    /// `u, v` texture coordinates
    Uv,
    /// RGBA colors
    Color,
}

impl VertexKind {
    /// Number of floats per vertex for this kind.
    pub fn stride(self) -> usize {
        match self {
            VertexKind::Position | VertexKind::Normal => 3,
            VertexKind::Uv => 2,
            VertexKind::Color => 4,
        }
    }
}

/// A mesh instance that can receive and expose vertex buffers.
///
/// Scene-graph integrations implement this; the crate only needs buffer
/// access and the instance's world matrix.
pub trait VertexBufferStore {
    /// Replaces the buffer for one attribute kind.
    fn set_vertex_data(&mut self, kind: VertexKind, data: Vec<f32>);

    /// Returns the buffer for one attribute kind, if present.
    fn vertex_data(&self, kind: VertexKind) -> Option<&[f32]>;

    /// Drops the buffer for one attribute kind, if present.
    fn remove_vertex_data(&mut self, kind: VertexKind);

    /// Replaces the index buffer.
    fn set_indices(&mut self, indices: Vec<u32>);

    /// Returns the index buffer.
    fn indices(&self) -> &[u32];

    /// The instance's local-to-world transform.
    fn world_matrix(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// An in-memory [`VertexBufferStore`].
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    buffers: HashMap<VertexKind, Vec<f32>>,
    indices: Vec<u32>,
    world: Mat4,
}

impl MeshBuffers {
    /// Creates an empty store with an identity world matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store placed in the world by `world`.
    pub fn with_world_matrix(world: Mat4) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Moves the instance.
    pub fn set_world_matrix(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Returns true if the store holds a buffer of the given kind.
    pub fn has(&self, kind: VertexKind) -> bool {
        self.buffers.contains_key(&kind)
    }
}

impl VertexBufferStore for MeshBuffers {
    fn set_vertex_data(&mut self, kind: VertexKind, data: Vec<f32>) {
        self.buffers.insert(kind, data);
    }

    fn vertex_data(&self, kind: VertexKind) -> Option<&[f32]> {
        self.buffers.get(&kind).map(Vec::as_slice)
    }

    fn remove_vertex_data(&mut self, kind: VertexKind) {
        self.buffers.remove(&kind);
    }

    fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn world_matrix(&self) -> Mat4 {
        self.world
    }
}
