//! # Terrain Height-Field Queries
//!
//! A [`GroundMesh`] pairs a ground grid buffer with its grid resolution and
//! world transform, and answers height and normal queries in constant time
//! per call. The per-cell [`HeightQuad`]s are computed lazily on the first
//! query after construction or after [`GroundMesh::mark_updated`].
//!
//! ## Concurrency
//!
//! Queries take `&self` and may run from several threads; the quad cache
//! sits behind an `RwLock`. Updates to the buffer need `&mut self`, so they
//! can never overlap a query.

mod height_quad;


pub use height_quad::HeightQuad;

use crate::error::{GeometryError, GeometryResult};
use crate::primitives::{
    create_ground, create_ground_from_height_map, GroundOptions, HeightMapImage, HeightMapOptions,
};
use crate::vertex_data::{VertexBufferStore, VertexData};
use glam::{Mat3, Mat4, Vec3};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// Dimensions of a ground grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundGrid {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub height: f32,
    /// Cells along X
    pub subdivisions_x: u32,
    /// Cells along Z
    pub subdivisions_y: u32,
}

impl GroundGrid {
    fn vertex_count(&self) -> usize {
        (self.subdivisions_x as usize + 1) * (self.subdivisions_y as usize + 1)
    }

    /// Cell containing local `(x, z)`, or `None` outside the grid.
    fn cell(&self, x: f32, z: f32) -> Option<usize> {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        if !(-half_w..=half_w).contains(&x) || !(-half_h..=half_h).contains(&z) {
            return None;
        }
        let column = ((x + half_w) / self.width * self.subdivisions_x as f32) as u32;
        let row = ((z + half_h) / self.height * self.subdivisions_y as f32) as u32;
        let column = column.min(self.subdivisions_x - 1);
        let row = row.min(self.subdivisions_y - 1);
        Some((row * self.subdivisions_x + column) as usize)
    }
}

/// A ground buffer with O(1) height and normal queries.
#[derive(Debug)]
pub struct GroundMesh {
    grid: GroundGrid,
    data: VertexData,
    world: Mat4,
    world_inverse: Mat4,
    quads: RwLock<Option<Arc<[HeightQuad]>>>,
}

impl GroundMesh {
    /// Wraps an existing ground buffer.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a grid without cells or without area
    /// - `PreconditionViolation` if the buffer has fewer vertices than the
    ///   grid needs
    pub fn new(data: VertexData, grid: GroundGrid) -> GeometryResult<Self> {
        if grid.subdivisions_x == 0 || grid.subdivisions_y == 0 {
            return Err(GeometryError::invalid_parameter("ground grid has no cells"));
        }
        if grid.width <= 0.0 || grid.height <= 0.0 {
            return Err(GeometryError::invalid_parameter(format!(
                "ground grid size must be positive, got {}x{}",
                grid.width, grid.height
            )));
        }
        if data.vertex_count() < grid.vertex_count() {
            return Err(GeometryError::precondition(format!(
                "ground grid needs {} vertices, buffer has {}",
                grid.vertex_count(),
                data.vertex_count()
            )));
        }

        Ok(Self {
            grid,
            data,
            world: Mat4::IDENTITY,
            world_inverse: Mat4::IDENTITY,
            quads: RwLock::new(None),
        })
    }

    /// Generates a flat ground and wraps it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use procmesh::primitives::GroundOptions;
    /// use procmesh::terrain::GroundMesh;
    ///
    /// let ground = GroundMesh::from_ground(&GroundOptions {
    ///     width: 4.0,
    ///     height: 4.0,
    ///     subdivisions: 2,
    ///     ..Default::default()
    /// })
    /// .unwrap();
    /// assert_eq!(ground.height_at(0.3, -1.2), 0.0);
    /// assert_eq!(ground.height_at(10.0, 0.0), 0.0);
    /// ```
    pub fn from_ground(options: &GroundOptions) -> GeometryResult<Self> {
        let (subdivisions_x, subdivisions_y) = options.cells();
        Self::new(
            create_ground(options)?,
            GroundGrid {
                width: options.width,
                height: options.height,
                subdivisions_x,
                subdivisions_y,
            },
        )
    }

    /// Generates a height-map ground and wraps it.
    pub fn from_height_map(image: &HeightMapImage, options: &HeightMapOptions) -> GeometryResult<Self> {
        let cells = options.subdivisions.max(1);
        Self::new(
            create_ground_from_height_map(image, options)?,
            GroundGrid {
                width: options.width,
                height: options.height,
                subdivisions_x: cells,
                subdivisions_y: cells,
            },
        )
    }

    /// Reads a ground buffer and world matrix from a mesh-instance store.
    pub fn from_store<S: VertexBufferStore + ?Sized>(store: &S, grid: GroundGrid) -> GeometryResult<Self> {
        let mut mesh = Self::new(VertexData::from_store(store)?, grid)?;
        mesh.set_world_matrix(store.world_matrix());
        Ok(mesh)
    }

    /// Grid dimensions.
    pub fn grid(&self) -> GroundGrid {
        self.grid
    }

    /// The ground buffer.
    pub fn vertex_data(&self) -> &VertexData {
        &self.data
    }

    /// Local-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Places the ground in the world.
    ///
    /// The quads live in local space, so moving the mesh keeps the cache.
    pub fn set_world_matrix(&mut self, world: Mat4) {
        self.world = world;
        self.world_inverse = world.inverse();
    }

    /// Replaces the vertex positions and invalidates the quad cache.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` if the position count changes.
    pub fn update_positions(&mut self, positions: Vec<f32>) -> GeometryResult<()> {
        if positions.len() != self.data.positions.len() {
            return Err(GeometryError::precondition(format!(
                "ground update has {} position values, expected {}",
                positions.len(),
                self.data.positions.len()
            )));
        }
        self.data.positions = positions;
        self.data.compute_normals();
        self.mark_updated();
        Ok(())
    }

    /// Drops the quad cache; the next query recomputes it.
    pub fn mark_updated(&self) {
        *self.quads.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// World-space height of the ground below world `(x, z)`.
    ///
    /// Outside the grid this returns the mesh origin's world height.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let local = self.world_inverse.transform_point3(Vec3::new(x, 0.0, z));
        match self.quad_at(local.x, local.z) {
            Some(quad) => {
                let y = quad.height(local.x, local.z);
                self.world.transform_point3(Vec3::new(local.x, y, local.z)).y
            }
            None => self.world.w_axis.y,
        }
    }

    /// World-space unit normal of the ground below world `(x, z)`.
    ///
    /// Outside the grid this returns `+Y`.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let local = self.world_inverse.transform_point3(Vec3::new(x, 0.0, z));
        match self.quad_at(local.x, local.z) {
            Some(quad) => {
                let normal_matrix = Mat3::from_mat4(self.world_inverse).transpose();
                (normal_matrix * quad.normal(local.x, local.z))
                    .try_normalize()
                    .unwrap_or(Vec3::Y)
            }
            None => Vec3::Y,
        }
    }

    fn quad_at(&self, x: f32, z: f32) -> Option<HeightQuad> {
        let cell = self.grid.cell(x, z)?;
        self.quads().get(cell).copied()
    }

    fn quads(&self) -> Arc<[HeightQuad]> {
        if let Some(quads) = self.quads.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Arc::clone(quads);
        }

        let mut cache = self.quads.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(quads) = cache.as_ref() {
            return Arc::clone(quads);
        }
        let quads: Arc<[HeightQuad]> = height_quad::compute_quads(
            &self.data.positions,
            self.grid.subdivisions_x,
            self.grid.subdivisions_y,
        )
        .into();
        trace!(cells = quads.len(), "height quads computed");
        *cache = Some(Arc::clone(&quads));
        quads
    }
}
