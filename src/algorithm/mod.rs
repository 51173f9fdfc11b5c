//! Wave function collapse solver
//!
//! The solver runs as a queue of step values over a working tilemap copy:
//! collapses commit cells, subtile placements lay down multi-cell tiles,
//! and propagations narrow neighbouring superpositions. Failures are values
//! the backtracker recovers from by rewinding the step history.

/// Chronological backtracking over the step history
pub mod backtrack;
/// Superposition option sets
pub mod bitset;
/// Multi-cell tile planning and validation
pub mod large;
/// The solver model and step loop
pub mod model;
/// Step processing and constraint propagation
pub mod propagation;
/// Candidate selection and seeded random draws
pub mod selection;

pub use bitset::TileSet;
pub use large::check_large_tile_fit;
pub use model::{Step, StepEndCondition, Wfc, WfcState};
