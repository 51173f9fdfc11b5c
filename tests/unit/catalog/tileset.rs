//! Tests pinning the shipped catalogue against the bitmask table
//!
//! The road variants and the bitmask lookup are independent data; any drift
//! between them would silently misfire, so both directions are pinned here.

#[cfg(test)]
mod tests {
    use roadweave::catalog::bitmask::direction_bit;
    use roadweave::catalog::socket::{Socket, sockets_dock};
    use roadweave::catalog::tile::{Biome, TileConfig, TileId};
    use roadweave::catalog::tileset::{
        CORNER_SHOP_ID, GRASS_ID, LONE_ROAD_ID, RESIDENTIAL_LOT_ID, catalog,
    };
    use roadweave::spatial::cell::OrthogonalDirection;

    // Tests every road variant's sockets agree with its mask id
    // Verified by flipping one socket in the generated road variants
    #[test]
    fn test_road_sockets_match_their_mask() {
        for mask in 1..=15_u8 {
            let id = TileId::new(u16::from(mask));
            for dir in OrthogonalDirection::ALL {
                let expected = if mask & direction_bit(dir) != 0 {
                    Socket::Road
                } else {
                    Socket::Default
                };
                assert_eq!(
                    catalog().socket_toward(id, dir),
                    Some(expected),
                    "socket mismatch on road {id} toward {dir:?}"
                );
            }
        }
        // The lone cross has no connections yet, so every edge reads grass.
        for dir in OrthogonalDirection::ALL {
            assert_eq!(
                catalog().socket_toward(LONE_ROAD_ID, dir),
                Some(Socket::Default)
            );
        }
    }

    #[test]
    fn test_road_ids_cover_all_sixteen_variants() {
        let roads = catalog().road_ids();
        assert_eq!(roads.len(), 16);
        for raw in 1..=16 {
            assert!(roads.contains(&TileId::new(raw)));
        }
        for id in roads {
            assert!(catalog().is_road(id));
        }
    }

    #[test]
    fn test_entry_variants_link_to_their_bases() {
        let horizontal: Vec<u16> = catalog()
            .variants_of(TileId::new(6))
            .iter()
            .map(|variant| variant.id.get())
            .collect();
        assert_eq!(horizontal, vec![17, 18]);

        let vertical: Vec<u16> = catalog()
            .variants_of(TileId::new(9))
            .iter()
            .map(|variant| variant.id.get())
            .collect();
        assert_eq!(vertical, vec![19, 20]);

        for raw in 17..=20 {
            let id = TileId::new(raw);
            assert!(catalog().is_road(id));
            assert!((catalog().weight_of(id)).abs() < f64::EPSILON);
        }
    }

    // Tests every subtile referenced by a large tile resolves in the catalogue
    #[test]
    fn test_subtiles_exist_as_singles() {
        for config in catalog().tiles() {
            let TileConfig::Large(large) = config else {
                continue;
            };
            for subtile in &large.subtiles {
                match catalog().get(subtile.id) {
                    Some(TileConfig::Single(single)) => {
                        assert_eq!(single.sockets, subtile.sockets);
                        assert_eq!(single.base_tile_id, Some(large.id));
                    }
                    other => unreachable!("subtile {} resolves to {other:?}", subtile.id),
                }
            }
        }
    }

    // Tests internal seams of every large tile dock against each other
    #[test]
    fn test_large_tile_seams_dock() {
        for config in catalog().tiles() {
            let TileConfig::Large(large) = config else {
                continue;
            };
            for index in 0..large.cell_count() {
                let subtile = large.subtile(index).expect("index in range");
                let (x, y) = large.local_coordinates(index);
                if x < large.width {
                    let right = large.subtile(index + 1).expect("right sibling in range");
                    assert!(
                        sockets_dock(subtile.sockets.right, right.sockets.left),
                        "seam mismatch in {} at index {index}",
                        large.id
                    );
                }
                if y < large.height {
                    let below = large
                        .subtile(index + large.width)
                        .expect("lower sibling in range");
                    assert!(
                        sockets_dock(subtile.sockets.bottom, below.sockets.top),
                        "seam mismatch in {} at index {index}",
                        large.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_decorative_ids_cover_nature_and_lots() {
        let decorative = catalog().decorative_ids();
        assert!(decorative.contains(&GRASS_ID));
        assert!(decorative.contains(&RESIDENTIAL_LOT_ID));
        assert!(decorative.contains(&CORNER_SHOP_ID));
        for id in decorative {
            assert!(!catalog().is_road(id));
        }
    }

    #[test]
    fn test_seedable_ids_exclude_zero_weight_entries() {
        let seedable = catalog().seedable_ids();
        assert!(seedable.contains(&GRASS_ID));
        assert!(seedable.contains(&LONE_ROAD_ID));
        assert!(!seedable.contains(&TileId::new(17)));
        assert!(!seedable.contains(&TileId::new(27)));
    }

    #[test]
    fn test_capacity_spans_every_id() {
        let capacity = catalog().capacity();
        assert_eq!(capacity, 32);
        for config in catalog().tiles() {
            assert!(config.id().get() as usize <= capacity);
        }
    }

    #[test]
    fn test_biomes_partition_the_catalogue() {
        for config in catalog().tiles() {
            match config.id().get() {
                1..=20 => assert_eq!(config.biome(), Biome::Road),
                21..=24 => assert_eq!(config.biome(), Biome::Nature),
                _ => assert_eq!(config.biome(), Biome::Lot),
            }
        }
    }
}
