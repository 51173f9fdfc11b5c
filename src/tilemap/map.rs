//! The tilemap: a dense grid of tiles with edit and query operations
//!
//! Cells live in a row-major `Array2`, so the flat iteration order equals
//! the linear cell index `(x-1) + (y-1)*W`. Every mutation funnels through
//! one private write path, which keeps updates atomic with respect to
//! observers and makes the container cheap to reason about.

use ndarray::Array2;
use std::time::Duration;

use crate::algorithm::bitset::TileSet;
use crate::catalog::bitmask::{base_tile_by_bitmask, cell_bitmask, tile_ids_by_orthogonal_match};
use crate::catalog::socket::{Socket, sockets_dock};
use crate::catalog::tile::{TileConfig, TileId};
use crate::catalog::tileset::catalog;
use crate::io::configuration::{ANIMATION_DURATION, CELL_SIZE_UNITS, RECENT_PLACEMENT_LIMIT};
use crate::spatial::cell::{Cell, GridSize, OrthogonalDirection};
use crate::tilemap::lifecycle::{Action, TileState};
use crate::tilemap::tile::{ParentTile, Tile, TileKind};

/// Physical extent of the map in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner `(x, y)`
    pub min: [f32; 2],
    /// Maximum corner `(x, y)`
    pub max: [f32; 2],
}

/// Filter applied when flattening the map to a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileListFilter {
    /// Only tiles that are not currently animating
    StaticTiles,
    /// Every tile
    NoFilter,
}

/// Outcome of one tilemap tick
#[derive(Debug)]
pub struct TilemapUpdateResult {
    /// Lifecycle actions, in linear cell order then per-tile emission order
    pub actions: Vec<Action>,
    /// Cells whose lifecycle state changed this tick
    pub transitioned_cells: Vec<Cell>,
    /// Cells whose tear-down finished and were reset to uninitialised
    pub emptied_cells: Vec<Cell>,
    /// Cells currently animating (constructing or removing)
    pub dynamic_cells: Vec<Cell>,
}

/// Dense grid of tiles plus edit bookkeeping
#[derive(Debug, Clone)]
pub struct Tilemap {
    cells: Array2<Tile>,
    size: GridSize,
    width: f32,
    height: f32,
    bounding_box: BoundingBox,
    recent_placements: Vec<Cell>,
    animation_timers: Vec<(Cell, Duration)>,
}

impl Tilemap {
    /// Create a map, initialising each cell from its linear index
    pub fn new(size: GridSize, init: impl Fn(usize) -> Tile) -> Self {
        let cells = Array2::from_shape_fn((size.vertical_cells, size.horizontal_cells), |(r, c)| {
            init(r * size.horizontal_cells + c)
        });
        let width = size.horizontal_cells as f32 * CELL_SIZE_UNITS;
        let height = size.vertical_cells as f32 * CELL_SIZE_UNITS;
        Self {
            cells,
            size,
            width,
            height,
            bounding_box: BoundingBox {
                min: [0.0, 0.0],
                max: [width, height],
            },
            recent_placements: Vec::new(),
            animation_timers: Vec::new(),
        }
    }

    /// Create a map with every cell in superposition over the seedable
    /// catalogue, filtered by map-edge bounds
    pub fn seeded(size: GridSize) -> Self {
        let capacity = catalog().capacity();
        Self::new(size, |index| {
            Cell::from_index(size, index).map_or_else(Tile::uninitialized, |cell| {
                let ids = tile_ids_by_orthogonal_match(cell.connected_bounds(size));
                Tile::superposition(TileSet::from_ids(capacity, ids))
            })
        })
    }

    /// Grid dimensions in cells
    pub const fn grid_size(&self) -> GridSize {
        self.size
    }

    /// Physical width in world units
    pub const fn physical_width(&self) -> f32 {
        self.width
    }

    /// Physical height in world units
    pub const fn physical_height(&self) -> f32 {
        self.height
    }

    /// Physical extent of the map
    pub const fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Adjacency-chained history of recent user placements
    pub fn recent_placements(&self) -> &[Cell] {
        &self.recent_placements
    }

    /// Pending animation timers
    pub fn animation_timers(&self) -> &[(Cell, Duration)] {
        &self.animation_timers
    }

    fn tile_ref(&self, cell: Cell) -> Option<&Tile> {
        self.cells.get([cell.y() - 1, cell.x() - 1])
    }

    fn tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.cells.get_mut([cell.y() - 1, cell.x() - 1])
    }

    // Single write path for all cell mutations.
    fn write_cell(&mut self, cell: Cell, tile: Tile) {
        if let Some(slot) = self.cells.get_mut([cell.y() - 1, cell.x() - 1]) {
            *slot = tile;
        }
    }

    /// Tile at a cell
    pub fn tile_by_cell(&self, cell: Cell) -> Option<&Tile> {
        self.tile_ref(cell)
    }

    /// Tile at a cell, only when it is fixed
    pub fn fixed_tile_by_cell(&self, cell: Cell) -> Option<&Tile> {
        self.tile_ref(cell)
            .filter(|tile| matches!(tile.kind(), TileKind::Fixed { .. }))
    }

    /// Fold over every tile in linear cell order
    pub fn fold_tiles<B>(&self, init: B, mut f: impl FnMut(B, Cell, &Tile) -> B) -> B {
        let mut acc = init;
        for index in 0..self.size.cell_count() {
            if let Some(cell) = Cell::from_index(self.size, index) {
                if let Some(tile) = self.tile_ref(cell) {
                    acc = f(acc, cell, tile);
                }
            }
        }
        acc
    }

    /// Flatten the map to a list in linear cell order
    pub fn to_list<T>(
        &self,
        mut mapper: impl FnMut(Cell, &Tile) -> T,
        filter: TileListFilter,
    ) -> Vec<T> {
        self.fold_tiles(Vec::new(), |mut list, cell, tile| {
            let keep = match filter {
                TileListFilter::StaticTiles => !tile.is_dynamic(),
                TileListFilter::NoFilter => true,
            };
            if keep {
                list.push(mapper(cell, tile));
            }
            list
        })
    }

    /// Cells currently in superposition, in linear order
    pub fn superposition_cells(&self) -> Vec<Cell> {
        self.fold_tiles(Vec::new(), |mut cells, cell, tile| {
            if tile.superposition_options().is_some() {
                cells.push(cell);
            }
            cells
        })
    }

    /// Place a user-built tile, starting its construction lifecycle
    pub fn add_tile(&mut self, id: TileId, cell: Cell) -> Vec<Action> {
        let (tile, actions) = Tile::constructed(id);
        self.write_cell(cell, tile);
        self.record_placement(cell);
        self.start_animation_timer(cell);
        actions
    }

    /// Place a solver-built tile, optionally linked to a multi-cell parent
    pub fn add_tile_from_wfc(
        &mut self,
        parent: Option<ParentTile>,
        id: TileId,
        cell: Cell,
    ) -> Vec<Action> {
        let (tile, actions) = Tile::generated(id, parent);
        self.write_cell(cell, tile);
        self.start_animation_timer(cell);
        actions
    }

    /// Request removal of the tile at a cell
    ///
    /// Subcells of a multi-cell tile take the whole instance with them.
    /// Anything other than a fixed tile is left untouched.
    pub fn remove_tile(&mut self, cell: Cell) -> Vec<Action> {
        let Some(tile) = self.tile_ref(cell) else {
            return Vec::new();
        };
        if tile.parent().is_some() {
            return self.remove_large_tile_if_exists(cell);
        }
        if tile.fixed_id().is_none() {
            return Vec::new();
        }
        let actions = self
            .tile_mut(cell)
            .map(Tile::attempt_remove)
            .unwrap_or_default();
        if !actions.is_empty() {
            self.start_animation_timer(cell);
        }
        actions
    }

    /// Reset a cell to uninitialised immediately
    pub fn clear_tile(&mut self, cell: Cell) {
        self.write_cell(cell, Tile::uninitialized());
    }

    /// Replace a cell's superposition options
    pub fn set_superposition_options(&mut self, cell: Cell, options: TileSet) {
        self.write_cell(cell, Tile::superposition(options));
    }

    /// Swap a fixed tile's id in place through the changing state
    pub fn update_tile_id(&mut self, cell: Cell, id: TileId) -> Vec<Action> {
        self.tile_mut(cell)
            .map(|tile| tile.change_id(id))
            .unwrap_or_default()
    }

    /// Re-open a cell to everything its surroundings currently allow
    ///
    /// The new superposition holds the seedable tiles matching the map-edge
    /// bounds, narrowed against each fixed orthogonal neighbour's facing
    /// socket.
    pub fn reset_tile_by_surroundings(&mut self, cell: Cell) {
        let capacity = catalog().capacity();
        let mut options = TileSet::from_ids(
            capacity,
            tile_ids_by_orthogonal_match(cell.connected_bounds(self.size)),
        );
        for dir in OrthogonalDirection::ALL {
            let Some(neighbour) = cell.next_orthogonal(self.size, dir) else {
                continue;
            };
            let Some(neighbour_id) = self
                .fixed_tile_by_cell(neighbour)
                .and_then(Tile::fixed_id)
            else {
                continue;
            };
            let Some(facing) = catalog().socket_toward(neighbour_id, dir.opposite()) else {
                continue;
            };
            options.retain(|id| {
                catalog()
                    .socket_toward(id, dir)
                    .is_some_and(|socket| sockets_dock(socket, facing))
            });
        }
        self.set_superposition_options(cell, options);
    }

    /// Recompute a fixed road's base variant from its surroundings
    ///
    /// When lot-entry siblings of the recomputed base face an open
    /// neighbour, the cell re-opens to the base plus those variants so a
    /// later collapse can pick a driveway. Otherwise the id is swapped in
    /// place through the changing state.
    pub fn reset_fixed_tile_by_surroundings(&mut self, cell: Cell) {
        let Some(current) = self.fixed_tile_by_cell(cell).and_then(Tile::fixed_id) else {
            return;
        };
        if !catalog().is_road(current) {
            return;
        }
        let mask = cell_bitmask(self, cell);
        let Some(base) = base_tile_by_bitmask(mask) else {
            return;
        };

        let open_variants: Vec<TileId> = catalog()
            .variants_of(base)
            .into_iter()
            .filter(|variant| {
                OrthogonalDirection::ALL.into_iter().any(|dir| {
                    variant.sockets.toward(dir) == Socket::LotEntry
                        && cell
                            .next_orthogonal(self.size, dir)
                            .and_then(|neighbour| self.tile_by_cell(neighbour))
                            .is_some_and(|tile| tile.superposition_options().is_some())
                })
            })
            .map(|variant| variant.id)
            .collect();

        if open_variants.is_empty() {
            if base != current {
                self.update_tile_id(cell, base);
            }
        } else {
            let capacity = catalog().capacity();
            let mut options = TileSet::from_ids(capacity, open_variants);
            options.insert(base);
            self.set_superposition_options(cell, options);
        }
    }

    /// Remove the whole multi-cell instance covering a cell, if any
    ///
    /// Every subcell re-opens to the decorative tiles matching its bounds,
    /// and the road cell the instance's driveway docked against re-opens to
    /// its base variant plus the still-applicable lot-entry siblings.
    pub fn remove_large_tile_if_exists(&mut self, cell: Cell) -> Vec<Action> {
        let Some(parent) = self.tile_ref(cell).and_then(Tile::parent) else {
            return Vec::new();
        };
        let Some(TileConfig::Large(large)) = catalog().get(parent.large_id) else {
            return Vec::new();
        };

        let (lx, ly) = large.local_coordinates(parent.sub_index);
        let Some(top_left) = cell.translate_by(self.size, 1 - lx as i32, 1 - ly as i32) else {
            return Vec::new();
        };

        let actions = self
            .tile_mut(cell)
            .map(Tile::attempt_remove)
            .unwrap_or_default();

        let capacity = catalog().capacity();
        let decorative = catalog().decorative_ids();
        for index in 0..large.cell_count() {
            let (sx, sy) = large.local_coordinates(index);
            let Some(sub_cell) = top_left.translate_by(self.size, sx as i32 - 1, sy as i32 - 1)
            else {
                continue;
            };
            let mut options = TileSet::from_ids(
                capacity,
                tile_ids_by_orthogonal_match(sub_cell.connected_bounds(self.size)),
            );
            options.intersect_with(&TileSet::from_ids(capacity, decorative.clone()));
            self.set_superposition_options(sub_cell, options);
        }

        // The driveway side points at the road that served this lot.
        let (ax, ay) = large.local_coordinates(large.anchor_index);
        if let Some(anchor_cell) = top_left.translate_by(self.size, ax as i32 - 1, ay as i32 - 1) {
            if let Some(anchor) = large.anchor() {
                for dir in OrthogonalDirection::ALL {
                    if anchor.sockets.toward(dir) != Socket::LotEntry {
                        continue;
                    }
                    if let Some(road_cell) = anchor_cell.next_orthogonal(self.size, dir) {
                        self.reset_fixed_tile_by_surroundings(road_cell);
                    }
                }
            }
        }

        actions
    }

    /// Advance every tile's lifecycle and drain animation timers
    ///
    /// Tiles are visited in linear cell order and the returned action list
    /// preserves per-tile emission order. Tiles whose tear-down finished are
    /// replaced with fresh uninitialised tiles. Timer draining is two-pass:
    /// the tick decrements, then drained entries clear their cell's
    /// animation attribute.
    pub fn update(&mut self, delta: Duration) -> TilemapUpdateResult {
        let mut actions = Vec::new();
        let mut transitioned_cells = Vec::new();
        let mut emptied_cells = Vec::new();
        let mut dynamic_cells = Vec::new();

        for index in 0..self.size.cell_count() {
            let Some(cell) = Cell::from_index(self.size, index) else {
                continue;
            };
            let (changed, tile_actions, state, dynamic) = {
                let Some(tile) = self.tile_mut(cell) else {
                    continue;
                };
                let (changed, tile_actions) = tile.tick(delta);
                (changed, tile_actions, tile.state(), tile.is_dynamic())
            };
            actions.extend(tile_actions);
            if changed {
                transitioned_cells.push(cell);
            }
            if state == TileState::Removed {
                self.write_cell(cell, Tile::uninitialized());
                emptied_cells.push(cell);
            } else if dynamic {
                dynamic_cells.push(cell);
            }
        }

        let mut drained = Vec::new();
        for (cell, remaining) in &mut self.animation_timers {
            *remaining = remaining.saturating_sub(delta);
            if remaining.is_zero() {
                drained.push(*cell);
            }
        }
        self.animation_timers.retain(|(_, left)| !left.is_zero());
        for cell in drained {
            if let Some(tile) = self.tile_mut(cell) {
                tile.clear_animation();
            }
        }

        TilemapUpdateResult {
            actions,
            transitioned_cells,
            emptied_cells,
            dynamic_cells,
        }
    }

    fn start_animation_timer(&mut self, cell: Cell) {
        self.animation_timers.push((cell, ANIMATION_DURATION));
    }

    fn record_placement(&mut self, cell: Cell) {
        let chained = self.recent_placements.last().is_some_and(|&last| {
            last.x().abs_diff(cell.x()) + last.y().abs_diff(cell.y()) == 1
        });
        if !chained {
            self.recent_placements.clear();
        }
        self.recent_placements.push(cell);
        if self.recent_placements.len() > RECENT_PLACEMENT_LIMIT {
            self.recent_placements.remove(0);
        }
    }
}
