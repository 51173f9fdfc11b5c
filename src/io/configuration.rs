//! Generator constants and runtime configuration defaults

use std::time::Duration;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default map width in cells
pub const DEFAULT_MAP_WIDTH: usize = 16;
/// Default map height in cells
pub const DEFAULT_MAP_HEIGHT: usize = 16;

/// Physical side length of one cell in world units
pub const CELL_SIZE_UNITS: f32 = 16.0;

// Solver limits
/// Maximum chronological backtracks before a solve is abandoned
pub const MAX_BACKTRACKS: usize = 100;
/// Solver steps driven per update cycle
pub const WFC_STEPS_PER_CYCLE: usize = 1000;

// Tile lifecycle timers
/// Time a user-placed tile spends under construction
pub const CONSTRUCTION_DURATION: Duration = Duration::from_millis(250);
/// Time a solver-placed tile takes to settle
pub const GENERATED_DURATION: Duration = Duration::from_millis(120);
/// Time an id swap spends in the changing state
pub const CHANGING_DURATION: Duration = Duration::from_millis(150);
/// Time a removed tile takes to disappear
pub const REMOVAL_DURATION: Duration = Duration::from_millis(250);

/// How long the build/remove animation attribute stays on a cell
pub const ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// Adjacency-chained placement history depth
pub const RECENT_PLACEMENT_LIMIT: usize = 3;

// Output settings
/// Square pixel size of one cell in exported images
pub const CELL_PIXEL_SIZE: u32 = 8;
