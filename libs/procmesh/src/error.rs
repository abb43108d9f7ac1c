//! # Geometry Errors
//!
//! Error types for mesh generation and mesh query operations.
//!
//! ## Error Policy
//!
//! - Structurally missing input fails fast, no partial buffer is returned
//! - Recoverable numeric degeneracy is handled inside the generators
//! - Collaborator failures (triangulator, image source) surface explicitly
//! - Out-of-range terrain queries are not errors; they return fallbacks

use thiserror::Error;

/// Errors that can occur while generating or querying geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Structurally required input is missing or empty
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong with the input
        message: String,
    },

    /// Geometry too degenerate to recover from
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the degeneracy
        message: String,
    },

    /// A caller-side precondition does not hold
    #[error("Precondition violated: {message}")]
    PreconditionViolation {
        /// The precondition that failed
        message: String,
    },

    /// Buffer failed validation
    #[error("Invalid topology: {message}")]
    InvalidTopology {
        /// The first inconsistency found
        message: String,
    },

    /// An external collaborator reported failure
    #[error("{collaborator} failed: {message}")]
    ExternalCollaborator {
        /// Name of the collaborator (e.g. "triangulator")
        collaborator: &'static str,
        /// Failure detail reported by the collaborator
        message: String,
    },
}

impl GeometryError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a precondition violation error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a triangulator failure error.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::ExternalCollaborator {
            collaborator: "triangulator",
            message: message.into(),
        }
    }

    /// Creates a height-map image failure error.
    pub fn image(message: impl Into<String>) -> Self {
        Self::ExternalCollaborator {
            collaborator: "height-map image",
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type GeometryResult<T> = Result<T, GeometryError>;
