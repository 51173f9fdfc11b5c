//! Error types for generation and editing operations
//!
//! Solver failures are plain values: the solver consumes them to drive its
//! recovering/failed states rather than unwinding. The crate-level error
//! wraps them for callers that surface failures at the API boundary.

use std::fmt;
use std::path::PathBuf;

use crate::catalog::tile::TileId;
use crate::spatial::cell::Cell;

/// A failure observed while processing solver steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverFailure {
    /// Propagation emptied a cell's superposition
    NoSuperpositionOptions,

    /// A multi-cell placement left the map or hit incompatible sockets
    InvalidLargeTilePlacement {
        /// Cell where the placement failed
        cell: Cell,
        /// Id of the multi-cell tile being placed
        id: TileId,
        /// What went wrong
        reason: &'static str,
    },

    /// Two cells handed to propagation are not collinear
    InvalidDirection,

    /// A lookup for an expected cell returned nothing
    TileNotFound,

    /// The inventory has no instances of a tile left
    TileUnavailable(TileId),

    /// The step history ran out or the backtrack budget was exceeded
    BacktrackFailed,
}

impl SolverFailure {
    /// Whether backtracking can recover from this failure
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::InvalidDirection | Self::TileNotFound | Self::BacktrackFailed)
    }
}

impl fmt::Display for SolverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuperpositionOptions => {
                write!(f, "propagation emptied a cell's superposition")
            }
            Self::InvalidLargeTilePlacement { cell, id, reason } => {
                write!(f, "cannot place multi-cell tile {id} at {cell}: {reason}")
            }
            Self::InvalidDirection => {
                write!(f, "cells handed to propagation are not collinear")
            }
            Self::TileNotFound => write!(f, "expected cell lookup returned nothing"),
            Self::TileUnavailable(id) => {
                write!(f, "inventory has no instances of tile {id} left")
            }
            Self::BacktrackFailed => write!(f, "step history exhausted or budget exceeded"),
        }
    }
}

/// Main error type for all generator operations
#[derive(Debug)]
pub enum GeneratorError {
    /// A solve ended in the failed state
    Solve {
        /// The failure the solver got stuck on
        failure: SolverFailure,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered map to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solve { failure } => write!(f, "solve failed: {failure}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Failed to export image to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SolverFailure> for GeneratorError {
    fn from(failure: SolverFailure) -> Self {
        Self::Solve { failure }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GeneratorError {
    GeneratorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, GeneratorError>;
