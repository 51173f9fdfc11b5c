//! The shipped tile set
//!
//! Road variants are generated from their connection bitmask: the edge
//! socket is `Road` where the mask bit is set and `Default` elsewhere, so
//! mask `n` and id `n` coincide for `1..=15`. Id 16 is the lone cross placed
//! when a road has no road neighbours yet; like every mask-derived road its
//! unconnected edges carry the default socket, so open neighbours are never
//! narrowed against a connection that does not exist. The remaining entries
//! are lot-entry road variants, decorative nature tiles, and the two
//! multi-cell lots with their subtiles.

use std::sync::LazyLock;

use crate::catalog::socket::Socket;
use crate::catalog::tile::{Biome, EdgeSockets, LargeTile, SingleTile, TileConfig, TileId};
use crate::spatial::cell::OrthogonalDirection;

/// Id of the lone cross road placed for bitmask 0
pub const LONE_ROAD_ID: TileId = TileId::new(16);
/// Id of the plain grass tile
pub const GRASS_ID: TileId = TileId::new(21);
/// Id of the 2x2 residential lot
pub const RESIDENTIAL_LOT_ID: TileId = TileId::new(25);
/// Id of the 2x1 corner shop lot
pub const CORNER_SHOP_ID: TileId = TileId::new(26);

/// Ordered collection of every tile descriptor
#[derive(Debug)]
pub struct TileCatalog {
    tiles: Vec<TileConfig>,
}

impl TileCatalog {
    /// Look up a descriptor by id
    pub fn get(&self, id: TileId) -> Option<&TileConfig> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    /// Every descriptor in ascending id order
    pub fn tiles(&self) -> &[TileConfig] {
        &self.tiles
    }

    /// Highest id value in the catalogue, sizing superposition sets
    pub fn capacity(&self) -> usize {
        self.tiles
            .iter()
            .map(|tile| tile.id().get() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Ids eligible for initial superpositions (positive pick weight)
    pub fn seedable_ids(&self) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|tile| tile.weight() > 0.0)
            .map(TileConfig::id)
            .collect()
    }

    /// Ids used to re-seed cells freed by a lot removal
    pub fn decorative_ids(&self) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|tile| tile.weight() > 0.0)
            .filter(|tile| match tile {
                TileConfig::Single(single) => single.biome == Biome::Nature,
                TileConfig::Large(large) => large.biome == Biome::Lot,
            })
            .map(TileConfig::id)
            .collect()
    }

    /// Ids of drivable road singles with positive weight
    pub fn road_ids(&self) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|tile| tile.biome() == Biome::Road && tile.weight() > 0.0)
            .map(TileConfig::id)
            .collect()
    }

    /// Single-tile variants sharing the given base tile
    pub fn variants_of(&self, base: TileId) -> Vec<&SingleTile> {
        self.tiles
            .iter()
            .filter_map(|tile| match tile {
                TileConfig::Single(single) if single.base_tile_id == Some(base) => Some(single),
                _ => None,
            })
            .collect()
    }

    /// External socket of a tile facing the given direction
    pub fn socket_toward(&self, id: TileId, dir: OrthogonalDirection) -> Option<Socket> {
        self.get(id).and_then(|tile| tile.socket_toward(dir))
    }

    /// Whether the id names a road tile
    pub fn is_road(&self, id: TileId) -> bool {
        self.get(id).is_some_and(|tile| tile.biome() == Biome::Road)
    }

    /// Pick weight of a tile, zero when unknown
    pub fn weight_of(&self, id: TileId) -> f64 {
        self.get(id).map_or(0.0, TileConfig::weight)
    }
}

/// Access the shipped catalogue
pub fn catalog() -> &'static TileCatalog {
    &SHIPPED
}

static SHIPPED: LazyLock<TileCatalog> = LazyLock::new(build_catalog);

const fn road_socket(mask: u8, bit: u8) -> Socket {
    if mask & bit != 0 {
        Socket::Road
    } else {
        Socket::Default
    }
}

fn road_by_mask(mask: u8) -> TileConfig {
    TileConfig::Single(SingleTile {
        id: TileId::new(u16::from(mask)),
        sockets: EdgeSockets {
            top: road_socket(mask, 1),
            left: road_socket(mask, 2),
            right: road_socket(mask, 4),
            bottom: road_socket(mask, 8),
        },
        weight: 0.5,
        biome: Biome::Road,
        base_tile_id: None,
    })
}

fn entry_variant(id: u16, base: u16, sockets: EdgeSockets) -> TileConfig {
    TileConfig::Single(SingleTile {
        id: TileId::new(id),
        sockets,
        weight: 0.0,
        biome: Biome::Road,
        base_tile_id: Some(TileId::new(base)),
    })
}

fn nature(id: u16, weight: f64) -> TileConfig {
    TileConfig::Single(SingleTile {
        id: TileId::new(id),
        sockets: EdgeSockets::uniform(Socket::Default),
        weight,
        biome: Biome::Nature,
        base_tile_id: None,
    })
}

fn lot_subtile(id: u16, parent: u16, sockets: EdgeSockets) -> SingleTile {
    SingleTile {
        id: TileId::new(id),
        sockets,
        weight: 0.0,
        biome: Biome::Lot,
        base_tile_id: Some(TileId::new(parent)),
    }
}

fn build_catalog() -> TileCatalog {
    let mut tiles: Vec<TileConfig> = (1..=15).map(road_by_mask).collect();

    // Lone cross: no road neighbours yet, so every edge still reads as
    // grass until a join recomputes the mask.
    tiles.push(TileConfig::Single(SingleTile {
        id: LONE_ROAD_ID,
        sockets: EdgeSockets::uniform(Socket::Default),
        weight: 0.35,
        biome: Biome::Road,
        base_tile_id: None,
    }));

    // Lot-entry variants of the two straights. Zero weight keeps them out of
    // random draws; propagation places them when a lot docks.
    tiles.push(entry_variant(
        17,
        6,
        EdgeSockets {
            top: Socket::LotEntry,
            right: Socket::Road,
            bottom: Socket::Default,
            left: Socket::Road,
        },
    ));
    tiles.push(entry_variant(
        18,
        6,
        EdgeSockets {
            top: Socket::Default,
            right: Socket::Road,
            bottom: Socket::LotEntry,
            left: Socket::Road,
        },
    ));
    tiles.push(entry_variant(
        19,
        9,
        EdgeSockets {
            top: Socket::Road,
            right: Socket::Default,
            bottom: Socket::Road,
            left: Socket::LotEntry,
        },
    ));
    tiles.push(entry_variant(
        20,
        9,
        EdgeSockets {
            top: Socket::Road,
            right: Socket::LotEntry,
            bottom: Socket::Road,
            left: Socket::Default,
        },
    ));

    tiles.push(nature(21, 0.9));
    tiles.push(nature(22, 0.5));
    tiles.push(nature(23, 0.6));
    tiles.push(nature(24, 0.3));

    let residential_subtiles = vec![
        lot_subtile(
            27,
            25,
            EdgeSockets {
                top: Socket::Default,
                right: Socket::LotEdge,
                bottom: Socket::LotEdge,
                left: Socket::Default,
            },
        ),
        lot_subtile(
            28,
            25,
            EdgeSockets {
                top: Socket::Default,
                right: Socket::Default,
                bottom: Socket::LotEdge,
                left: Socket::LotEdge,
            },
        ),
        lot_subtile(
            29,
            25,
            EdgeSockets {
                top: Socket::LotEdge,
                right: Socket::LotEdge,
                bottom: Socket::Default,
                left: Socket::Default,
            },
        ),
        // Anchor: driveway on the bottom edge docks against a road below.
        lot_subtile(
            30,
            25,
            EdgeSockets {
                top: Socket::LotEdge,
                right: Socket::Default,
                bottom: Socket::LotEntry,
                left: Socket::LotEdge,
            },
        ),
    ];

    let shop_subtiles = vec![
        lot_subtile(
            31,
            26,
            EdgeSockets {
                top: Socket::Default,
                right: Socket::LotEdge,
                bottom: Socket::Default,
                left: Socket::Default,
            },
        ),
        lot_subtile(
            32,
            26,
            EdgeSockets {
                top: Socket::Default,
                right: Socket::Default,
                bottom: Socket::LotEntry,
                left: Socket::LotEdge,
            },
        ),
    ];

    tiles.push(TileConfig::Large(LargeTile {
        id: RESIDENTIAL_LOT_ID,
        biome: Biome::Lot,
        weight: 0.3,
        width: 2,
        height: 2,
        anchor_index: 3,
        subtiles: residential_subtiles.clone(),
    }));
    tiles.push(TileConfig::Large(LargeTile {
        id: CORNER_SHOP_ID,
        biome: Biome::Lot,
        weight: 0.2,
        width: 2,
        height: 1,
        anchor_index: 1,
        subtiles: shop_subtiles.clone(),
    }));

    for subtile in residential_subtiles.into_iter().chain(shop_subtiles) {
        tiles.push(TileConfig::Single(subtile));
    }

    tiles.sort_by_key(TileConfig::id);
    TileCatalog { tiles }
}
