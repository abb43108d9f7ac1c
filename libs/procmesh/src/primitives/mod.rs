//! # Primitives
//!
//! One generator per shape family. Every generator takes an options struct
//! whose `Default` carries the documented defaults, normalizes it once and
//! returns a fresh [`VertexData`](crate::VertexData).
//!
//! | Family | Technique |
//! |--------|-----------|
//! | disc, cylinder, torus, lathe | revolution |
//! | sphere, capsule | latitude/longitude rows |
//! | plane, ground, tiled | regular grid |
//! | ribbon, tube, extruded shape | sweep along a [`Path3D`](crate::Path3D) |
//! | polyhedron, icosphere | fixed tables, barycentric subdivision |

pub mod capsule;
pub mod cuboid;
pub mod cylinder;
pub mod disc;
pub mod extrude_shape;
pub mod ground;
pub mod icosphere;
pub mod lathe;
pub mod plane;
pub mod polyhedron;
pub mod ribbon;
pub mod sphere;
pub mod tiled;
pub mod torus;
pub mod torus_knot;
pub mod tube;

pub use capsule::{create_capsule, CapsuleOptions};
pub use cuboid::{create_box, BoxOptions};
pub use cylinder::{create_cylinder, CylinderOptions};
pub use disc::{create_disc, DiscOptions};
pub use extrude_shape::{create_extruded_shape, rebuild_extruded_shape, ExtrudeShapeOptions};
pub use ground::{
    create_ground, create_ground_from_height_map, create_tiled_ground, GroundOptions,
    HeightMapImage, HeightMapOptions, TiledGroundOptions,
};
pub use icosphere::{create_icosphere, IcoSphereOptions};
pub use lathe::{create_lathe, LatheOptions};
pub use plane::{create_plane, PlaneOptions, SourcePlane};
pub use polyhedron::{create_polyhedron, PolyhedronData, PolyhedronKind, PolyhedronOptions};
pub use ribbon::{create_ribbon, rebuild_ribbon, RibbonOptions};
pub use sphere::{create_sphere, SphereOptions};
pub use tiled::{
    create_tiled_box, create_tiled_plane, HorizontalAlign, TilePattern, TiledBoxOptions,
    TiledPlaneOptions, VerticalAlign,
};
pub use torus::{create_torus, TorusOptions};
pub use torus_knot::{create_torus_knot, TorusKnotOptions};
pub use tube::{create_tube, rebuild_tube, TubeOptions};

use config::constants::{clamp_tessellation, MIN_SUBDIVISIONS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Which ends of a swept or revolved shape are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cap {
    /// Both ends open
    #[default]
    NoCap,
    /// Close the start (or bottom)
    CapStart,
    /// Close the end (or top)
    CapEnd,
    /// Close both ends
    CapAll,
}

impl Cap {
    /// True if the start is closed.
    pub fn has_start(self) -> bool {
        matches!(self, Cap::CapStart | Cap::CapAll)
    }

    /// True if the end is closed.
    pub fn has_end(self) -> bool {
        matches!(self, Cap::CapEnd | Cap::CapAll)
    }
}

/// Per-sample function of `(index, distance along the path)`.
///
/// Used for tube radii and for extrusion scale and rotation.
pub type PathFunction = Arc<dyn Fn(usize, f32) -> f32 + Send + Sync>;

/// Maps a unit-square coordinate into a `(u0, v0, u1, v1)` rectangle.
#[inline]
pub(crate) fn map_to_rect(uv: glam::Vec2, rect: glam::Vec4) -> glam::Vec2 {
    glam::Vec2::new(
        rect.x + (rect.z - rect.x) * uv.x,
        rect.y + (rect.w - rect.y) * uv.y,
    )
}

/// Looks up an optional per-face entry, falling back to `default`.
#[inline]
pub(crate) fn face_entry<T: Copy>(entries: &[T], face: usize, default: T) -> T {
    entries.get(face).copied().unwrap_or(default)
}

/// Clamps a tessellation option, logging when the request was too small.
pub(crate) fn tessellation_option(option: &'static str, requested: u32) -> u32 {
    let clamped = clamp_tessellation(requested);
    if clamped != requested {
        debug!(option, requested, clamped, "tessellation below minimum");
    }
    clamped
}

/// Clamps a subdivision option, logging when the request was too small.
pub(crate) fn subdivision_option(option: &'static str, requested: u32) -> u32 {
    let clamped = requested.max(MIN_SUBDIVISIONS);
    if clamped != requested {
        debug!(option, requested, clamped, "subdivisions below minimum");
    }
    clamped
}
