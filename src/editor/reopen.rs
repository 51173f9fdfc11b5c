//! Re-opening fixed roads for lot attachment
//!
//! A fixed road blocks lot placement: its sockets are already committed, so
//! a lot's driveway can never dock against it. Re-opening swaps eligible
//! roads back into a superposition of their base variant plus the lot-entry
//! siblings, and widens the open neighbours they face, priming the solver
//! to let lots grow along existing streets.

use crate::algorithm::bitset::TileSet;
use crate::catalog::bitmask::{base_tile_by_bitmask, cell_bitmask};
use crate::catalog::socket::Socket;
use crate::catalog::tile::TileId;
use crate::catalog::tileset::catalog;
use crate::spatial::cell::{Cell, OrthogonalDirection};
use crate::tilemap::map::Tilemap;

struct Reopening {
    cell: Cell,
    current: TileId,
    base: TileId,
    variants: Vec<TileId>,
}

/// Re-open every eligible fixed road to its lot-entry variants
///
/// The whole pass is planned against the un-reopened map first: a road that
/// is about to re-open still counts as a connection in its neighbours'
/// masks, so a street does not fall apart when several of its segments
/// re-open in one sweep.
pub fn reopen_roads(tilemap: &mut Tilemap) {
    let size = tilemap.grid_size();

    let road_cells: Vec<(Cell, TileId)> =
        tilemap.fold_tiles(Vec::new(), |mut cells, cell, tile| {
            if let Some(id) = tile.fixed_id() {
                if catalog().is_road(id) {
                    cells.push((cell, id));
                }
            }
            cells
        });

    let mut plans = Vec::new();
    for (cell, current) in road_cells {
        let mask = cell_bitmask(tilemap, cell);
        let Some(base) = base_tile_by_bitmask(mask) else {
            continue;
        };
        let variants: Vec<TileId> = catalog()
            .variants_of(base)
            .into_iter()
            .filter(|variant| {
                OrthogonalDirection::ALL.into_iter().any(|dir| {
                    variant.sockets.toward(dir) == Socket::LotEntry
                        && cell
                            .next_orthogonal(size, dir)
                            .and_then(|neighbour| tilemap.tile_by_cell(neighbour))
                            .is_some_and(|tile| tile.superposition_options().is_some())
                })
            })
            .map(|variant| variant.id)
            .collect();
        plans.push(Reopening {
            cell,
            current,
            base,
            variants,
        });
    }

    let capacity = catalog().capacity();
    for plan in plans {
        if plan.variants.is_empty() {
            if plan.base != plan.current {
                tilemap.update_tile_id(plan.cell, plan.base);
            }
            continue;
        }

        let mut options = TileSet::from_ids(capacity, plan.variants);
        options.insert(plan.base);
        tilemap.set_superposition_options(plan.cell, options);

        for dir in OrthogonalDirection::ALL {
            let Some(neighbour) = plan.cell.next_orthogonal(size, dir) else {
                continue;
            };
            let open = tilemap
                .tile_by_cell(neighbour)
                .is_some_and(|tile| tile.superposition_options().is_some());
            if open {
                tilemap.reset_tile_by_surroundings(neighbour);
            }
        }
    }
}
