//! Cell coordinate arithmetic
//!
//! This module contains the spatial vocabulary of the tilemap:
//! - 1-indexed cell coordinates with a dense linear index
//! - Orthogonal, diagonal, and quadrant neighbourhood walks
//! - Map-boundary detection for socket matching at the edges

/// Cell coordinates, directions, and grid bounds
pub mod cell;

pub use cell::{Cell, GridSize, OrthogonalDirection};
