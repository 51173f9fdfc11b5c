//! Step processing: collapses, subtile placements, constraint propagation
//!
//! Every mutation a step makes is preceded by a history push when its target
//! cell is in superposition, so the backtracker can rewind it. Propagation
//! either preserves or strictly shrinks a superposition; it never grows one.

use crate::algorithm::bitset::TileSet;
use crate::algorithm::large::plan_subgrid;
use crate::algorithm::model::{HistoryEntry, Step, SubTilePlacement, Wfc};
use crate::catalog::socket::{Socket, sockets_dock};
use crate::catalog::tile::{TileConfig, TileId};
use crate::catalog::tileset::catalog;
use crate::io::error::SolverFailure;
use crate::spatial::cell::{Cell, OrthogonalDirection};
use crate::tilemap::lifecycle::TileState;
use crate::tilemap::tile::{ParentTile, Tile, TileKind};

/// What a subtile placement sees in one neighbouring direction
enum NeighbourSight {
    OffMap,
    Fixed(TileId),
    Open,
    Empty,
}

impl Wfc {
    /// Process one popped step
    pub(crate) fn process_step(&mut self, step: Step) -> Result<(), SolverFailure> {
        match step {
            Step::Collapse(cell, id) => self.process_collapse(cell, id),
            Step::PlaceSubTile(cell, placement) => self.process_place_subtile(cell, placement),
            Step::Propagate(from, to) => self.process_propagate(from, to),
        }
    }

    fn process_collapse(&mut self, cell: Cell, id: TileId) -> Result<(), SolverFailure> {
        let Some(options) = self
            .tilemap
            .tile_by_cell(cell)
            .and_then(Tile::superposition_options)
            .map(TileSet::ids)
        else {
            // The cell was fixed by an earlier step; the draw is stale.
            return Ok(());
        };
        if !options.contains(&id) {
            // Propagation excluded the draw after it was enqueued.
            return Ok(());
        }
        self.history.push(HistoryEntry {
            step: Step::Collapse(cell, id),
            previous_options: options,
            charged: None,
        });

        if !self.inventory_available(id) {
            return Err(SolverFailure::TileUnavailable(id));
        }

        match catalog().get(id).ok_or(SolverFailure::TileNotFound)? {
            TileConfig::Single(_) => {
                let actions = self.tilemap.add_tile_from_wfc(None, id, cell);
                self.pending_actions.extend(actions);
                self.inventory_take(id);
                if let Some(entry) = self.history.last_mut() {
                    entry.charged = Some(id);
                }
                self.propagate_constraints(cell);
                Ok(())
            }
            TileConfig::Large(large) => {
                // Plan first, place nothing: the subtile steps land at the
                // front of the queue so the instance goes down contiguously.
                let steps = plan_subgrid(&self.tilemap, cell, large)?;
                for step in steps.into_iter().rev() {
                    self.open_steps.push_front(step);
                }
                Ok(())
            }
        }
    }

    fn process_place_subtile(
        &mut self,
        cell: Cell,
        placement: SubTilePlacement,
    ) -> Result<(), SolverFailure> {
        let Some(options) = self
            .tilemap
            .tile_by_cell(cell)
            .and_then(Tile::superposition_options)
            .map(TileSet::ids)
        else {
            return Err(SolverFailure::InvalidLargeTilePlacement {
                cell,
                id: placement.parent_id,
                reason: "target cell is no longer open",
            });
        };
        self.history.push(HistoryEntry {
            step: Step::PlaceSubTile(cell, placement),
            previous_options: options,
            charged: None,
        });

        let sockets = match catalog().get(placement.subtile_id) {
            Some(TileConfig::Single(single)) => single.sockets,
            _ => return Err(SolverFailure::TileNotFound),
        };

        let actions = self.tilemap.add_tile_from_wfc(
            Some(ParentTile {
                large_id: placement.parent_id,
                sub_index: placement.sub_index,
            }),
            placement.subtile_id,
            cell,
        );
        self.pending_actions.extend(actions);

        let size = self.tilemap.grid_size();
        for dir in OrthogonalDirection::ALL {
            let socket = sockets.toward(dir);
            let sight = match cell.next_orthogonal(size, dir) {
                None => NeighbourSight::OffMap,
                Some(neighbour) => match self.tilemap.tile_by_cell(neighbour).map(Tile::kind) {
                    Some(TileKind::Fixed { id, .. }) => NeighbourSight::Fixed(*id),
                    Some(TileKind::Superposition(_)) => NeighbourSight::Open,
                    Some(TileKind::Uninitialized) | None => NeighbourSight::Empty,
                },
            };
            match sight {
                NeighbourSight::OffMap | NeighbourSight::Empty => {
                    if socket != Socket::Default {
                        return Err(SolverFailure::InvalidLargeTilePlacement {
                            cell,
                            id: placement.parent_id,
                            reason: "socket faces an empty or off-map cell",
                        });
                    }
                }
                NeighbourSight::Fixed(neighbour_id) => {
                    let facing = catalog()
                        .socket_toward(neighbour_id, dir.opposite())
                        .ok_or(SolverFailure::TileNotFound)?;
                    if !sockets_dock(socket, facing) {
                        return Err(SolverFailure::InvalidLargeTilePlacement {
                            cell,
                            id: placement.parent_id,
                            reason: "fixed neighbour does not dock",
                        });
                    }
                }
                NeighbourSight::Open => {
                    // Even a default edge prunes the neighbour: road-facing
                    // options over there can never dock against it.
                    if let Some(neighbour) = cell.next_orthogonal(size, dir) {
                        self.open_steps.push_back(Step::Propagate(cell, neighbour));
                    }
                }
            }
        }

        // The instance is fully down once the queue front stops being a
        // subtile of the same parent; charge the inventory exactly then.
        let more_of_same = matches!(
            self.open_steps.front(),
            Some(Step::PlaceSubTile(_, next)) if next.parent_id == placement.parent_id
        );
        if !more_of_same {
            self.inventory_take(placement.parent_id);
            if let Some(entry) = self.history.last_mut() {
                entry.charged = Some(placement.parent_id);
            }
        }

        Ok(())
    }

    fn process_propagate(&mut self, from: Cell, to: Cell) -> Result<(), SolverFailure> {
        let dir = Cell::orthogonal_direction(from, to).ok_or(SolverFailure::InvalidDirection)?;

        let from_tile = self
            .tilemap
            .tile_by_cell(from)
            .ok_or(SolverFailure::TileNotFound)?;
        // A tile being torn down exerts no constraints any more.
        let from_id = if matches!(from_tile.state(), TileState::Removing | TileState::Removed) {
            None
        } else {
            from_tile.fixed_id()
        };
        let to_options = self
            .tilemap
            .tile_by_cell(to)
            .ok_or(SolverFailure::TileNotFound)?
            .superposition_options()
            .cloned();

        let (Some(from_id), Some(options)) = (from_id, to_options) else {
            // Only fixed-into-superposition shrinks anything.
            return Ok(());
        };

        self.history.push(HistoryEntry {
            step: Step::Propagate(from, to),
            previous_options: options.ids(),
            charged: None,
        });

        let from_socket = catalog()
            .socket_toward(from_id, dir)
            .ok_or(SolverFailure::TileNotFound)?;
        let mut reduced = options;
        reduced.retain(|id| {
            catalog()
                .socket_toward(id, dir.opposite())
                .is_some_and(|socket| sockets_dock(socket, from_socket))
        });

        if reduced.is_empty() {
            return Err(SolverFailure::NoSuperpositionOptions);
        }
        self.tilemap.set_superposition_options(to, reduced);
        Ok(())
    }
}
