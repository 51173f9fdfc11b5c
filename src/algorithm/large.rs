//! Multi-cell tile planning and validation
//!
//! A multi-cell tile docks to the grid through its anchor subcell. Planning
//! derives the global subgrid from the anchor cell, requires every covered
//! cell to still be open, and emits one placement step per subcell.
//! Validation walks the same constraints without touching the map.

use crate::algorithm::model::{Step, SubTilePlacement};
use crate::catalog::socket::{Socket, sockets_dock};
use crate::catalog::tile::{LargeTile, TileId};
use crate::catalog::tileset::catalog;
use crate::io::error::SolverFailure;
use crate::spatial::cell::{Cell, GridSize, OrthogonalDirection};
use crate::tilemap::map::Tilemap;
use crate::tilemap::tile::{Tile, TileKind};

/// Global cells covered by a multi-cell tile anchored at `anchor`
///
/// Returns the cells in row-major subtile order, or `None` when any of them
/// would leave the map.
pub fn subgrid_cells(size: GridSize, anchor: Cell, large: &LargeTile) -> Option<Vec<Cell>> {
    let (ax, ay) = large.local_coordinates(large.anchor_index);
    let top_left = anchor.translate_by(size, 1 - ax as i32, 1 - ay as i32)?;

    let sub_size = GridSize {
        horizontal_cells: large.width,
        vertical_cells: large.height,
    };
    let mut cells = Vec::with_capacity(large.cell_count());
    for index in 0..large.cell_count() {
        let (sx, sy) = large.local_coordinates(index);
        let local = Cell::new(sub_size, sx, sy)?;
        cells.push(Cell::place_in(size, top_left, local)?);
    }
    Some(cells)
}

/// Plan the placement steps for a multi-cell tile
///
/// Every covered cell must currently be in superposition; fixed or
/// uninitialised cells reject the whole plan. Nothing is written here.
pub(crate) fn plan_subgrid(
    tilemap: &Tilemap,
    anchor: Cell,
    large: &LargeTile,
) -> Result<Vec<Step>, SolverFailure> {
    let cells = subgrid_cells(tilemap.grid_size(), anchor, large).ok_or(
        SolverFailure::InvalidLargeTilePlacement {
            cell: anchor,
            id: large.id,
            reason: "subgrid leaves the map",
        },
    )?;

    let mut steps = Vec::with_capacity(cells.len());
    for (index, &cell) in cells.iter().enumerate() {
        let tile = tilemap
            .tile_by_cell(cell)
            .ok_or(SolverFailure::TileNotFound)?;
        match tile.kind() {
            TileKind::Superposition(_) => {}
            TileKind::Fixed { .. } => {
                return Err(SolverFailure::InvalidLargeTilePlacement {
                    cell,
                    id: large.id,
                    reason: "cell is fixed",
                });
            }
            TileKind::Uninitialized => {
                return Err(SolverFailure::InvalidLargeTilePlacement {
                    cell,
                    id: large.id,
                    reason: "cell is uninitialised",
                });
            }
        }
        let subtile = large.subtile(index).ok_or(SolverFailure::TileNotFound)?;
        steps.push(Step::PlaceSubTile(
            cell,
            SubTilePlacement {
                parent_id: large.id,
                subtile_id: subtile.id,
                sub_index: index,
            },
        ));
    }
    Ok(steps)
}

/// Validate a multi-cell placement without mutating the map
///
/// Folds over the subcells simulating the placement: sibling subcells count
/// as already fixed, fixed neighbours must dock, open neighbours must keep
/// at least one docking option, and empty or off-map neighbours only accept
/// the default socket. Returns the tile when everything fits.
pub fn check_large_tile_fit<'a>(
    tilemap: &Tilemap,
    anchor: Cell,
    large: &'a LargeTile,
) -> Option<&'a LargeTile> {
    let size = tilemap.grid_size();
    let cells = subgrid_cells(size, anchor, large)?;

    for &cell in &cells {
        let open = tilemap
            .tile_by_cell(cell)
            .is_some_and(|tile| tile.superposition_options().is_some());
        if !open {
            return None;
        }
    }

    for (index, &cell) in cells.iter().enumerate() {
        let subtile = large.subtile(index)?;
        for dir in OrthogonalDirection::ALL {
            let socket = subtile.sockets.toward(dir);
            let Some(neighbour) = cell.next_orthogonal(size, dir) else {
                if socket != Socket::Default {
                    return None;
                }
                continue;
            };

            if let Some(sibling_index) = cells.iter().position(|&other| other == neighbour) {
                let sibling = large.subtile(sibling_index)?;
                if !sockets_dock(socket, sibling.sockets.toward(dir.opposite())) {
                    return None;
                }
                continue;
            }

            match tilemap.tile_by_cell(neighbour).map(Tile::kind) {
                Some(TileKind::Fixed { id, .. }) => {
                    let facing = catalog().socket_toward(*id, dir.opposite())?;
                    if !sockets_dock(socket, facing) {
                        return None;
                    }
                }
                Some(TileKind::Superposition(options)) => {
                    if socket != Socket::Default && !any_option_docks(&options.ids(), socket, dir) {
                        return None;
                    }
                }
                Some(TileKind::Uninitialized) | None => {
                    if socket != Socket::Default {
                        return None;
                    }
                }
            }
        }
    }

    Some(large)
}

fn any_option_docks(options: &[TileId], socket: Socket, dir: OrthogonalDirection) -> bool {
    options.iter().any(|&id| {
        catalog()
            .socket_toward(id, dir.opposite())
            .is_some_and(|facing| sockets_dock(socket, facing))
    })
}
