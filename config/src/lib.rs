//! # Config Crate
//!
//! Centralized configuration constants for the procedural geometry kernel.
//! Every tolerance, default tessellation count and sentinel value used by the
//! generators is defined here so that the kernel never scatters literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_TESSELLATION, MIN_TESSELLATION};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f32 = 1e-7;
//! assert!(value.abs() < EPSILON);
//!
//! // Tessellation defaults and minimums
//! assert!(DEFAULT_TESSELLATION >= MIN_TESSELLATION);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **GPU-Friendly**: Values are `f32`, matching the vertex buffers
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
