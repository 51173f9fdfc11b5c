//! Input/output operations and error handling
//!
//! This module contains everything that faces the outside world:
//! - The failure taxonomy and crate result alias
//! - Configuration constants and defaults
//! - The demo CLI, its progress display, and PNG export

/// Command-line interface
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and the crate result alias
pub mod error;
/// Solve progress display
pub mod progress;
/// PNG rendering of tilemaps
pub mod render;
