//! Tile values stored in the map
//!
//! A tile is its kind plus a lifecycle machine. The kind is a closed sum:
//! an uninitialised cell, a superposition of still-possible catalogue ids,
//! or a fixed tile optionally linked to the multi-cell parent it belongs to.

use crate::algorithm::bitset::TileSet;
use crate::catalog::tile::TileId;
use crate::tilemap::lifecycle::{Action, Machine, TileState};
use std::time::Duration;

/// Link from a subcell to the multi-cell tile instance covering it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentTile {
    /// Catalogue id of the multi-cell tile
    pub large_id: TileId,
    /// Row-major position of this subcell within the parent's subgrid
    pub sub_index: usize,
}

/// What a cell currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum TileKind {
    /// Nothing decided, nothing possible yet
    Uninitialized,
    /// Set of catalogue ids still possible here
    Superposition(TileSet),
    /// Committed tile
    Fixed {
        /// Catalogue id of the committed tile
        id: TileId,
        /// Parent linkage when this cell belongs to a multi-cell tile
        parent: Option<ParentTile>,
    },
}

/// Renderer hint for a cell in motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAnimation {
    /// Tile is fading in
    Appearing,
    /// Tile is fading out
    Disappearing,
}

/// One cell's tile: kind, lifecycle, and animation attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    kind: TileKind,
    fsm: Machine<TileState>,
    animation: Option<TileAnimation>,
}

impl Tile {
    /// A fresh uninitialised tile
    pub const fn uninitialized() -> Self {
        Self {
            kind: TileKind::Uninitialized,
            fsm: Machine::new(TileState::Initialized),
            animation: None,
        }
    }

    /// A tile in superposition over the given options
    pub const fn superposition(options: TileSet) -> Self {
        Self {
            kind: TileKind::Superposition(options),
            fsm: Machine::new(TileState::Initialized),
            animation: None,
        }
    }

    /// A user-placed fixed tile entering construction
    ///
    /// Returns the tile together with the actions its lifecycle emitted.
    pub fn constructed(id: TileId) -> (Self, Vec<Action>) {
        let mut fsm = Machine::new(TileState::Initialized);
        let actions = fsm.transition_to(TileState::Constructing).unwrap_or_default();
        (
            Self {
                kind: TileKind::Fixed { id, parent: None },
                fsm,
                animation: Some(TileAnimation::Appearing),
            },
            actions,
        )
    }

    /// A solver-placed fixed tile settling in
    pub fn generated(id: TileId, parent: Option<ParentTile>) -> (Self, Vec<Action>) {
        let mut fsm = Machine::new(TileState::Initialized);
        let actions = fsm.transition_to(TileState::Generated).unwrap_or_default();
        (
            Self {
                kind: TileKind::Fixed { id, parent },
                fsm,
                animation: Some(TileAnimation::Appearing),
            },
            actions,
        )
    }

    /// The tile's kind
    pub const fn kind(&self) -> &TileKind {
        &self.kind
    }

    /// Committed id when the tile is fixed
    pub const fn fixed_id(&self) -> Option<TileId> {
        match self.kind {
            TileKind::Fixed { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Parent linkage when the tile is a subcell of a multi-cell tile
    pub const fn parent(&self) -> Option<ParentTile> {
        match self.kind {
            TileKind::Fixed { parent, .. } => parent,
            _ => None,
        }
    }

    /// Superposition options, when the tile is in superposition
    pub const fn superposition_options(&self) -> Option<&TileSet> {
        match &self.kind {
            TileKind::Superposition(options) => Some(options),
            _ => None,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> TileState {
        self.fsm.state()
    }

    /// Whether the tile is currently animated by the renderer
    pub const fn is_dynamic(&self) -> bool {
        matches!(
            self.fsm.state(),
            TileState::Constructing | TileState::Removing
        )
    }

    /// Animation attribute, if one is active
    pub const fn animation(&self) -> Option<TileAnimation> {
        self.animation
    }

    /// Clear the animation attribute
    pub const fn clear_animation(&mut self) {
        self.animation = None;
    }

    /// Request tear-down of this tile
    ///
    /// A no-op returning empty actions when the current lifecycle state
    /// forbids removal.
    pub fn attempt_remove(&mut self) -> Vec<Action> {
        match self.fsm.transition_to(TileState::Removing) {
            Some(actions) => {
                self.animation = Some(TileAnimation::Disappearing);
                actions
            }
            None => Vec::new(),
        }
    }

    /// Swap the committed id in place, passing through the changing state
    ///
    /// The id mutation is atomic from the caller's viewpoint; the lifecycle
    /// detour only happens when the current state allows it.
    pub fn change_id(&mut self, id: TileId) -> Vec<Action> {
        if let TileKind::Fixed {
            id: current,
            parent,
        } = self.kind
        {
            if current != id {
                self.kind = TileKind::Fixed { id, parent };
                return self
                    .fsm
                    .transition_to(TileState::Changing)
                    .unwrap_or_default();
            }
        }
        Vec::new()
    }

    /// Advance the lifecycle by a time delta
    pub fn tick(&mut self, delta: Duration) -> (bool, Vec<Action>) {
        self.fsm.tick(delta)
    }
}
