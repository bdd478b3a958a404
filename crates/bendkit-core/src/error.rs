//! Error handling for BendKit
//!
//! Provides the error types shared by every layer:
//! - Bend errors (path parsing, geometry, editing)
//! - I/O errors surfaced by the binary and settings layers
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Bend error type
///
/// Represents failures while compiling, rendering or editing a bend path.
/// Every variant is reported synchronously at the point of computation and
/// none of them are recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BendError {
    /// Unknown token, or an operator without enough operands on the stack
    #[error("Malformed path at token {position} ('{token}'): {reason}")]
    MalformedPath {
        /// Zero-based token position in the path string.
        position: usize,
        /// The offending token.
        token: String,
        /// Why the token could not be applied.
        reason: String,
    },

    /// Arc construction that no real circle can satisfy
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Description of the inconsistency.
        reason: String,
    },

    /// Structural edit referencing a bend or segment that does not exist
    #[error("{kind} index {index} out of range ({count} available)")]
    IndexOutOfRange {
        /// What was being indexed ("bend" or "segment").
        kind: &'static str,
        /// The requested index.
        index: usize,
        /// How many entries of that kind exist.
        count: usize,
    },

    /// Edit argument outside its domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: &'static str,
        /// The reason the value was rejected.
        reason: String,
    },
}

impl BendError {
    /// Create a malformed path error
    pub fn malformed(position: usize, token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            position,
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid geometry error
    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Main error type for BendKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Bend error
    #[error(transparent)]
    Bend(#[from] BendError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a malformed path error
    pub fn is_malformed_path(&self) -> bool {
        matches!(self, Error::Bend(BendError::MalformedPath { .. }))
    }

    /// Check if this is an invalid geometry error
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Error::Bend(BendError::InvalidGeometry { .. }))
    }

    /// Check if this is an index error
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Error::Bend(BendError::IndexOutOfRange { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for bend operations
pub type BendResult<T> = std::result::Result<T, BendError>;
