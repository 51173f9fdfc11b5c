//! Edit-driven orchestration of the tilemap and solver
//!
//! User gestures arrive here. Placement checks the clump rule and the road
//! bitmask, removal tears down whole lot instances, and both reconcile the
//! surroundings with a bounded solver pass.

/// User actions, placement rules, and the reconciliation pass
pub mod orchestrator;
/// Re-opening fixed roads for lot attachment
pub mod reopen;

pub use orchestrator::{EditOutcome, UserAction, apply, cell_supports_road_placement};
pub use reopen::reopen_roads;
