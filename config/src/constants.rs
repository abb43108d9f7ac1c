//! # Configuration Constants
//!
//! Centralized constants for the geometry kernel. Tolerances, tessellation
//! limits, sentinel values and default colors are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Minimum and default angular/grid resolution
//! - **Terrain**: Height-map sampling constants
//! - **Color**: Default vertex colors and UV rectangles

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Vertex buffers are `f32`, so this tolerance is sized for single precision
/// rather than the tighter values a double-precision kernel would use.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f32, b: f32) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-7));
/// ```
pub const EPSILON: f32 = 1e-6;

/// Radius substituted for an exactly-zero cylinder radius when computing the
/// radial direction of a ring.
///
/// A cone apex collapses its ring to a single point, which leaves the radial
/// direction undefined. Substituting this tiny radius keeps normals finite.
///
/// # Example
///
/// ```rust
/// use config::constants::ZERO_RADIUS_EPSILON;
///
/// let radius: f32 = 0.0;
/// let effective = if radius == 0.0 { ZERO_RADIUS_EPSILON } else { radius };
/// assert!(effective > 0.0);
/// ```
pub const ZERO_RADIUS_EPSILON: f32 = 1e-4;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Minimum number of angular segments for any revolved or swept shape.
///
/// Fewer than 3 segments cannot enclose an area.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_TESSELLATION;
///
/// let requested = 1u32;
/// assert_eq!(requested.max(MIN_TESSELLATION), 3);
/// ```
pub const MIN_TESSELLATION: u32 = 3;

/// Minimum number of grid or ring subdivisions.
pub const MIN_SUBDIVISIONS: u32 = 1;

/// Default angular segment count used when a generator has no better value.
pub const DEFAULT_TESSELLATION: u32 = 32;

/// Smallest accepted arc fraction.
///
/// An arc of exactly zero would produce a shape without area; requests below
/// this value are clamped up to it.
pub const MIN_ARC: f32 = 1e-4;

// =============================================================================
// TERRAIN CONSTANTS
// =============================================================================

/// Offset below `min_height` used to mark height-map vertices whose pixel
/// failed the alpha threshold.
///
/// Triangles touching such a vertex are skipped, punching a hole in the
/// ground where the image was transparent.
///
/// # Example
///
/// ```rust
/// use config::constants::HEIGHT_MAP_HOLE_OFFSET;
///
/// let min_height = 0.0f32;
/// let sentinel = min_height - HEIGHT_MAP_HOLE_OFFSET;
/// assert!(sentinel < min_height);
/// ```
pub const HEIGHT_MAP_HOLE_OFFSET: f32 = 1e-3;

/// Default RGB weights turning a height-map pixel into a gradient in `[0, 1]`.
///
/// The weights sum to one so a white pixel maps to `max_height`.
pub const DEFAULT_LUMINANCE_FILTER: [f32; 3] = [0.3, 0.59, 0.11];

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default vertex color (opaque white) used when padding color buffers.
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default UV crop rectangle `(u0, v0, u1, v1)` covering the whole texture.
pub const DEFAULT_UV_RECT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested tessellation to [`MIN_TESSELLATION`].
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_tessellation;
///
/// assert_eq!(clamp_tessellation(0), 3);
/// assert_eq!(clamp_tessellation(48), 48);
/// ```
#[inline]
pub fn clamp_tessellation(requested: u32) -> u32 {
    requested.max(MIN_TESSELLATION)
}

/// Clamps an arc fraction into `[MIN_ARC, 1.0]`.
///
/// Non-finite input falls back to a full revolution.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_arc, MIN_ARC};
///
/// assert_eq!(clamp_arc(2.0), 1.0);
/// assert_eq!(clamp_arc(-1.0), MIN_ARC);
/// assert_eq!(clamp_arc(f32::NAN), 1.0);
/// ```
#[inline]
pub fn clamp_arc(arc: f32) -> f32 {
    if arc.is_finite() {
        arc.clamp(MIN_ARC, 1.0)
    } else {
        1.0
    }
}

/// Checks if two f32 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-7));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f32 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-7));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f32) -> bool {
    value.abs() < EPSILON
}
