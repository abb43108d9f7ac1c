//! # Decal Clipping Engine
//!
//! Builds a thin mesh that hugs the surface of an existing mesh inside an
//! oriented box. The box's local `+Z` is the surface normal of the
//! placement; its local XY plane carries the texture projection.
//!
//! Every source triangle is moved into box space by one combined matrix,
//! clipped against the six box faces, and the surviving pieces are emitted
//! as fresh, unshared vertices. Triangles are clipped in parallel; the
//! output order follows the source index order.

mod clip;


pub use clip::{clip_against_plane, clip_triangle, ClipPlane, ClipVertex};

use crate::error::{GeometryError, GeometryResult};
use crate::vertex_data::{compute_normals, VertexBufferStore, VertexData, VertexKind};
use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placement and behavior of a decal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecalOptions {
    /// World-space center of the decal box
    pub position: Vec3,
    /// World-space surface normal the decal faces along (default +Y)
    pub normal: Vec3,
    /// Full box size; `x` and `y` span the texture, `z` is the depth
    pub size: Vec3,
    /// Roll about the normal, in radians (default 0)
    pub angle: f32,
    /// Drop triangles facing away from the decal normal
    pub cull_back_faces: bool,
    /// Emit positions and normals in the source mesh's local frame instead
    /// of world space
    pub local_mode: bool,
}

impl Default for DecalOptions {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            size: Vec3::ONE,
            angle: 0.0,
            cull_back_faces: false,
            local_mode: false,
        }
    }
}

impl DecalOptions {
    /// Box rotation: local `+Z` onto the normal, then the roll about it.
    fn rotation(&self, normal: Vec3) -> Quat {
        let yaw = normal.x.atan2(normal.z);
        let pitch = (-normal.y).atan2(Vec2::new(normal.x, normal.z).length());
        Quat::from_euler(EulerRot::YXZ, yaw, pitch, self.angle)
    }
}

/// Creates a decal on a mesh instance.
///
/// Reads positions, normals, indices and the world matrix through the
/// store. Missing normals are recomputed.
///
/// # Errors
///
/// `InvalidParameter` if the store has no positions, the size is not
/// positive on every axis, or the normal is zero.
pub fn create_decal<S: VertexBufferStore + ?Sized>(
    source: &S,
    options: &DecalOptions,
) -> GeometryResult<VertexData> {
    let positions = source
        .vertex_data(VertexKind::Position)
        .ok_or_else(|| GeometryError::invalid_parameter("decal source has no position data"))?;
    let indices = source.indices();
    let computed;
    let normals: &[f32] = match source.vertex_data(VertexKind::Normal) {
        Some(normals) => normals,
        None => {
            computed = compute_normals(positions, indices);
            &computed
        }
    };
    clip_mesh(positions, normals, indices, source.world_matrix(), options)
}

/// Creates a decal on a buffer placed in the world by `world`.
///
/// # Example
///
/// ```rust
/// use procmesh::decal::{create_decal_from_data, DecalOptions};
/// use procmesh::primitives::{create_ground, GroundOptions};
/// use glam::{Mat4, Vec3};
///
/// let ground = create_ground(&GroundOptions { width: 10.0, height: 10.0, ..Default::default() }).unwrap();
/// let decal = create_decal_from_data(&ground, Mat4::IDENTITY, &DecalOptions {
///     size: Vec3::new(2.0, 2.0, 1.0),
///     ..Default::default()
/// })
/// .unwrap();
/// assert!(!decal.is_empty());
/// let (min, max) = decal.bounding_box();
/// assert!(min.x >= -1.0 - 1e-5 && max.x <= 1.0 + 1e-5);
/// ```
pub fn create_decal_from_data(
    source: &VertexData,
    world: Mat4,
    options: &DecalOptions,
) -> GeometryResult<VertexData> {
    clip_mesh(&source.positions, &source.normals, &source.indices, world, options)
}

fn clip_mesh(
    positions: &[f32],
    normals: &[f32],
    indices: &[u32],
    mesh_world: Mat4,
    options: &DecalOptions,
) -> GeometryResult<VertexData> {
    if options.size.cmple(Vec3::ZERO).any() {
        return Err(GeometryError::invalid_parameter(format!(
            "decal size must be positive, got {}",
            options.size
        )));
    }
    let normal = options
        .normal
        .try_normalize()
        .ok_or_else(|| GeometryError::invalid_parameter("decal normal is zero"))?;

    let decal_world = Mat4::from_rotation_translation(options.rotation(normal), options.position);
    let to_decal = decal_world.inverse() * mesh_world;
    let to_decal_normals = normal_matrix(to_decal);
    let from_decal = if options.local_mode {
        to_decal.inverse()
    } else {
        decal_world
    };
    let from_decal_normals = normal_matrix(from_decal);
    let half_size = options.size * 0.5;

    let vertex_count = positions.len() / 3;
    let vertex = |index: u32| -> Option<ClipVertex> {
        let i = index as usize;
        if i >= vertex_count {
            return None;
        }
        let position = Vec3::from_slice(&positions[i * 3..i * 3 + 3]);
        let normal = normals
            .get(i * 3..i * 3 + 3)
            .map(Vec3::from_slice)
            .unwrap_or(Vec3::ZERO);
        Some(ClipVertex::new(
            to_decal.transform_point3(position),
            to_decal_normals * normal,
        ))
    };

    let pieces: Vec<Vec<[ClipVertex; 3]>> = indices
        .par_chunks_exact(3)
        .map(|t| {
            let triangle = match (vertex(t[0]), vertex(t[1]), vertex(t[2])) {
                (Some(a), Some(b), Some(c)) => [a, b, c],
                _ => return Vec::new(),
            };
            if options.cull_back_faces {
                let facing = triangle[0].normal + triangle[1].normal + triangle[2].normal;
                if facing.z < 0.0 {
                    return Vec::new();
                }
            }
            clip_triangle(triangle, half_size)
        })
        .collect();

    let kept: usize = pieces.iter().map(Vec::len).sum();
    let mut data = VertexData::with_capacity(kept * 3, kept);
    for triangle in pieces.iter().flatten() {
        let base = data.vertex_count() as u32;
        for v in triangle {
            let uv = Vec2::new(
                0.5 + v.position.x / options.size.x,
                0.5 + v.position.y / options.size.y,
            );
            data.add_vertex(
                from_decal.transform_point3(v.position),
                (from_decal_normals * v.normal).normalize_or_zero(),
                uv,
            );
        }
        data.add_triangle(base, base + 1, base + 2);
    }

    debug!(
        source_triangles = indices.len() / 3,
        decal_triangles = kept,
        "decal clipped"
    );
    Ok(data)
}

fn normal_matrix(matrix: Mat4) -> Mat3 {
    Mat3::from_mat4(matrix.inverse()).transpose()
}
