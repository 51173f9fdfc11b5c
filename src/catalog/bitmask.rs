//! Road-neighbour bitmasks and boundary socket matching
//!
//! A cell's bitmask has one bit per orthogonal neighbour that currently
//! holds a road tile, weighted up=1, left=2, right=4, down=8. The static
//! lookup table maps each mask to the base road variant whose connections
//! point exactly at those neighbours; mask 0 maps to the lone cross.

use crate::catalog::socket::Socket;
use crate::catalog::tile::TileId;
use crate::catalog::tileset::catalog;
use crate::spatial::cell::{BoundaryEdges, Cell, OrthogonalDirection};
use crate::tilemap::lifecycle::TileState;
use crate::tilemap::map::Tilemap;
use crate::tilemap::tile::Tile;

/// Bitmask weight of a direction
pub const fn direction_bit(dir: OrthogonalDirection) -> u8 {
    match dir {
        OrthogonalDirection::Up => 1,
        OrthogonalDirection::Left => 2,
        OrthogonalDirection::Right => 4,
        OrthogonalDirection::Down => 8,
    }
}

// Mask n names the road variant with exactly those connections; the lone
// cross stands in for the empty mask.
const BASE_ID_BY_BITMASK: [u16; 16] = [16, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Road-neighbour bitmask of a cell
pub fn cell_bitmask(tilemap: &Tilemap, cell: Cell) -> u8 {
    OrthogonalDirection::ALL.into_iter().fold(0, |mask, dir| {
        let has_road = cell
            .next_orthogonal(tilemap.grid_size(), dir)
            .and_then(|neighbour| tilemap.fixed_tile_by_cell(neighbour))
            // Tiles on their way out no longer count as connections.
            .filter(|tile| !matches!(tile.state(), TileState::Removing | TileState::Removed))
            .and_then(Tile::fixed_id)
            .is_some_and(|id| catalog().is_road(id));
        if has_road { mask | direction_bit(dir) } else { mask }
    })
}

/// Base road tile for a neighbour bitmask
pub fn base_tile_by_bitmask(mask: u8) -> Option<TileId> {
    BASE_ID_BY_BITMASK
        .get(mask as usize)
        .copied()
        .map(TileId::new)
}

/// Seedable tiles whose sockets on the constrained edges are all default
///
/// Used to seed superpositions near the map bounds: an edge neighbour is
/// off-map and only the default socket matches it.
pub fn tile_ids_by_orthogonal_match(edges: BoundaryEdges) -> Vec<TileId> {
    let constrained: Vec<OrthogonalDirection> = OrthogonalDirection::ALL
        .into_iter()
        .filter(|&dir| match dir {
            OrthogonalDirection::Up => edges.up,
            OrthogonalDirection::Left => edges.left,
            OrthogonalDirection::Right => edges.right,
            OrthogonalDirection::Down => edges.down,
        })
        .collect();

    catalog()
        .seedable_ids()
        .into_iter()
        .filter(|&id| {
            constrained
                .iter()
                .all(|&dir| catalog().socket_toward(id, dir) == Some(Socket::Default))
        })
        .collect()
}
