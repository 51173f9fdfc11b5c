//! Edit-driven orchestration
//!
//! Translates user actions into tilemap operations plus a bounded
//! reconciliation pass of the solver. The pass runs to queue emptiness, not
//! to a full solution: neighbouring superpositions are narrowed and fixed
//! road neighbours are re-drawn so their variants track the edit.

use crate::algorithm::model::{StepEndCondition, Wfc, WfcState};
use crate::catalog::bitmask::{base_tile_by_bitmask, cell_bitmask};
use crate::catalog::tileset::catalog;
use crate::editor::reopen::reopen_roads;
use crate::io::configuration::WFC_STEPS_PER_CYCLE;
use crate::spatial::cell::{Cell, DiagonalDirection, OrthogonalDirection};
use crate::tilemap::lifecycle::{Action, TileState};
use crate::tilemap::map::Tilemap;
use crate::tilemap::tile::Tile;

/// A user gesture on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Place a road
    Primary(Cell),
    /// Remove the tile
    Secondary(Cell),
}

/// What an edit did
#[derive(Debug, Default)]
pub struct EditOutcome {
    /// Whether the map changed at all
    pub changed: bool,
    /// Lifecycle actions emitted along the way
    pub actions: Vec<Action>,
}

/// Apply a user action to the map
pub fn apply(action: UserAction, tilemap: &mut Tilemap, seed: u64) -> EditOutcome {
    match action {
        UserAction::Primary(cell) => add_road(cell, tilemap, seed),
        UserAction::Secondary(cell) => remove_road(cell, tilemap, seed),
    }
}

/// Whether placing a road here keeps every quadrant clump-free
///
/// Counts road tiles among the three neighbours of each diagonal quadrant
/// corner; three roads in any quadrant would close a 2x2 road block.
pub fn cell_supports_road_placement(tilemap: &Tilemap, cell: Cell) -> bool {
    let size = tilemap.grid_size();
    DiagonalDirection::ALL.into_iter().all(|diag| {
        let roads = cell
            .quadrant_neighbors(size, diag)
            .into_iter()
            .filter(|&neighbour| is_fixed_road(tilemap, neighbour))
            .count();
        roads < 3
    })
}

fn is_fixed_road(tilemap: &Tilemap, cell: Cell) -> bool {
    tilemap
        .fixed_tile_by_cell(cell)
        .and_then(Tile::fixed_id)
        .is_some_and(|id| catalog().is_road(id))
}

fn add_road(cell: Cell, tilemap: &mut Tilemap, seed: u64) -> EditOutcome {
    if tilemap.fixed_tile_by_cell(cell).is_some() {
        return EditOutcome::default();
    }
    if !cell_supports_road_placement(tilemap, cell) {
        return EditOutcome::default();
    }
    let mask = cell_bitmask(tilemap, cell);
    let Some(id) = base_tile_by_bitmask(mask) else {
        return EditOutcome::default();
    };

    let mut actions = tilemap.add_tile(id, cell);
    actions.extend(reconcile(tilemap, cell, seed));
    EditOutcome {
        changed: true,
        actions,
    }
}

fn remove_road(cell: Cell, tilemap: &mut Tilemap, seed: u64) -> EditOutcome {
    let built = tilemap
        .fixed_tile_by_cell(cell)
        .is_some_and(|tile| tile.state() == TileState::Built);
    if !built {
        return EditOutcome::default();
    }

    let mut actions = tilemap.remove_tile(cell);
    actions.extend(reconcile(tilemap, cell, seed));
    EditOutcome {
        changed: true,
        actions,
    }
}

// One edit-driven solver pass around the edited cell.
fn reconcile(tilemap: &mut Tilemap, cell: Cell, seed: u64) -> Vec<Action> {
    let mut wfc = Wfc::from_tilemap(tilemap.clone(), seed);
    wfc.propagate_constraints(cell);
    collapse_tile_neighbors(&mut wfc, cell);
    wfc.step_n(StepEndCondition::StopAtEmptySteps, WFC_STEPS_PER_CYCLE);
    let actions = wfc.flush_pending_actions();
    *tilemap = wfc.into_tilemap();
    actions
}

// Re-draw fixed road neighbours so lot-entry variants stay reachable.
fn collapse_tile_neighbors(wfc: &mut Wfc, cell: Cell) {
    let size = wfc.tilemap().grid_size();
    for dir in OrthogonalDirection::ALL {
        let Some(neighbour) = cell.next_orthogonal(size, dir) else {
            continue;
        };
        if !is_fixed_road(wfc.tilemap(), neighbour) {
            continue;
        }
        wfc.tilemap_mut().reset_fixed_tile_by_surroundings(neighbour);
        let reopened = wfc
            .tilemap()
            .tile_by_cell(neighbour)
            .is_some_and(|tile| tile.superposition_options().is_some());
        if reopened {
            wfc.collapse(neighbour);
        }
    }
}

/// Fill the remaining superpositions, re-opening roads between attempts
///
/// Runs full solves from the current snapshot; a failed attempt re-opens
/// fixed roads to their lot-entry variants and tries again with a stepped
/// seed, up to the attempt bound.
pub fn run_auto_fill(tilemap: &mut Tilemap, seed: u64, attempts: usize) -> (bool, Vec<Action>) {
    for attempt in 0..attempts {
        let mut wfc = Wfc::from_tilemap(tilemap.clone(), seed.wrapping_add(attempt as u64));
        wfc.solve();
        if matches!(wfc.current_state(), WfcState::Done) {
            let actions = wfc.flush_pending_actions();
            *tilemap = wfc.into_tilemap();
            return (true, actions);
        }
        reopen_roads(tilemap);
    }
    (false, Vec::new())
}
