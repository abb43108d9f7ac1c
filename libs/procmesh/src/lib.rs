//! # Procmesh
//!
//! Procedural triangle-mesh generation and mesh query engines.
//! Turns compact parametric shape descriptions into GPU-ready buffers.
//!
//! ## Architecture
//!
//! ```text
//! Options (normalized) → generator → VertexData
//!                                      ↓
//!                      GroundMesh (height queries) / decal::create_decal
//! ```
//!
//! ## Conventions
//!
//! - Right-handed frame, `+Y` up
//! - Front faces wind counter-clockwise; face normal is `(b - a) × (c - a)`
//! - Texture `v` grows upward
//!
//! ## Usage
//!
//! ```rust
//! use procmesh::primitives::{create_box, BoxOptions};
//!
//! let cube = create_box(&BoxOptions { size: 2.0, ..Default::default() }).unwrap();
//! assert_eq!(cube.vertex_count(), 24);
//! assert_eq!(cube.indices.len(), 36);
//! ```

pub mod decal;
pub mod error;
pub mod path3d;
pub mod polygon;
pub mod primitives;
pub mod terrain;
pub mod vertex_data;

pub use decal::{create_decal, create_decal_from_data, DecalOptions};
pub use error::{GeometryError, GeometryResult};
pub use path3d::Path3D;
pub use polygon::{
    create_polygon, extrude_polygon, extrude_polygon_with, EarcutTriangulator, Polygon2D,
    PolygonOptions, Triangulator,
};
pub use terrain::{GroundGrid, GroundMesh, HeightQuad};
pub use vertex_data::{
    compute_normals, merge, MeshBuffers, SideOptions, SideOrientation, VertexBufferStore,
    VertexData, VertexKind,
};
