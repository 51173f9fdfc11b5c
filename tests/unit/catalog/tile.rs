//! Tests for tile descriptors and the anchor docking surface

#[cfg(test)]
mod tests {
    use roadweave::catalog::socket::Socket;
    use roadweave::catalog::tile::{EdgeSockets, TileConfig};
    use roadweave::catalog::tileset::{RESIDENTIAL_LOT_ID, catalog};
    use roadweave::spatial::cell::OrthogonalDirection;

    #[test]
    fn test_edge_sockets_toward_each_direction() {
        let sockets = EdgeSockets {
            top: Socket::Road,
            right: Socket::Green,
            bottom: Socket::LotEntry,
            left: Socket::Default,
        };
        assert_eq!(sockets.toward(OrthogonalDirection::Up), Socket::Road);
        assert_eq!(sockets.toward(OrthogonalDirection::Right), Socket::Green);
        assert_eq!(sockets.toward(OrthogonalDirection::Down), Socket::LotEntry);
        assert_eq!(sockets.toward(OrthogonalDirection::Left), Socket::Default);

        let uniform = EdgeSockets::uniform(Socket::Water);
        for dir in OrthogonalDirection::ALL {
            assert_eq!(uniform.toward(dir), Socket::Water);
        }
    }

    #[test]
    fn test_large_tile_local_coordinates_are_row_major() {
        let Some(TileConfig::Large(lot)) = catalog().get(RESIDENTIAL_LOT_ID) else {
            unreachable!("residential lot is a large tile");
        };
        assert_eq!(lot.cell_count(), 4);
        assert_eq!(lot.local_coordinates(0), (1, 1));
        assert_eq!(lot.local_coordinates(1), (2, 1));
        assert_eq!(lot.local_coordinates(2), (1, 2));
        assert_eq!(lot.local_coordinates(3), (2, 2));
    }

    // Tests the external sockets of a large tile are the anchor's sockets
    #[test]
    fn test_large_tile_docks_through_its_anchor() {
        let config = catalog()
            .get(RESIDENTIAL_LOT_ID)
            .expect("residential lot in catalogue");
        let TileConfig::Large(lot) = config else {
            unreachable!("residential lot is a large tile");
        };
        let anchor = lot.anchor().expect("anchor index in range");
        assert_eq!(lot.anchor_index, 3);
        for dir in OrthogonalDirection::ALL {
            assert_eq!(config.socket_toward(dir), Some(anchor.sockets.toward(dir)));
        }
        assert_eq!(config.socket_toward(OrthogonalDirection::Down), Some(Socket::LotEntry));
    }
}
