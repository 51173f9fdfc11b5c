//! Tile data model and the tilemap container
//!
//! This module contains the map-side state of the system:
//! - The per-tile lifecycle machine and the actions it emits
//! - Tile values: kind, parent linkage, animation attribute
//! - The dense tilemap with its edit operations and tick update

/// Per-tile lifecycle state machine and emitted actions
pub mod lifecycle;
/// The tilemap container
pub mod map;
/// Tile values stored in the map
pub mod tile;

pub use lifecycle::{Action, Sound, TileState};
pub use map::{Tilemap, TilemapUpdateResult};
pub use tile::{Tile, TileKind};
