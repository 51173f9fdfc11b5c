//! Tests for user edits: placement rules, removal gating, reconciliation

#[cfg(test)]
mod tests {
    use roadweave::algorithm::bitset::TileSet;
    use roadweave::catalog::tile::TileId;
    use roadweave::catalog::tileset::{LONE_ROAD_ID, catalog};
    use roadweave::editor::orchestrator::{UserAction, apply, cell_supports_road_placement};
    use roadweave::spatial::cell::{Cell, GridSize};
    use roadweave::tilemap::map::Tilemap;
    use roadweave::tilemap::tile::{Tile, TileKind};
    use std::time::Duration;

    const SIZE: GridSize = GridSize {
        horizontal_cells: 5,
        vertical_cells: 5,
    };
    const SEED: u64 = 42;

    fn cell(x: usize, y: usize) -> Cell {
        Cell::new(SIZE, x, y).expect("cell lies inside the grid")
    }

    fn road_seeded() -> Tilemap {
        Tilemap::new(SIZE, |_| {
            Tile::superposition(TileSet::from_ids(
                catalog().capacity(),
                catalog().road_ids(),
            ))
        })
    }

    fn place(tilemap: &mut Tilemap, x: usize, y: usize) {
        let outcome = apply(UserAction::Primary(cell(x, y)), tilemap, SEED);
        assert!(outcome.changed, "placement at ({x}, {y}) was refused");
        tilemap.update(Duration::from_millis(300));
    }

    // Tests a lone placement takes the cross and narrows its neighbours
    #[test]
    fn test_lone_add_places_the_cross() {
        let mut tilemap = road_seeded();
        let outcome = apply(UserAction::Primary(cell(3, 3)), &mut tilemap, SEED);
        assert!(outcome.changed);
        assert!(!outcome.actions.is_empty());

        assert_eq!(
            tilemap.fixed_tile_by_cell(cell(3, 3)).and_then(Tile::fixed_id),
            Some(LONE_ROAD_ID)
        );
        for neighbour in [cell(3, 2), cell(2, 3), cell(4, 3), cell(3, 4)] {
            let options = tilemap
                .tile_by_cell(neighbour)
                .and_then(Tile::superposition_options)
                .map_or(0, TileSet::len);
            assert!(options > 0 && options < 16, "neighbour kept {options} options");
        }
    }

    #[test]
    fn test_add_on_a_fixed_cell_is_refused() {
        let mut tilemap = road_seeded();
        place(&mut tilemap, 3, 3);
        let outcome = apply(UserAction::Primary(cell(3, 3)), &mut tilemap, SEED);
        assert!(!outcome.changed);
        assert!(outcome.actions.is_empty());
    }

    // Tests three roads around a quadrant corner block the fourth
    // Verified by relaxing the quadrant count to <= 3
    #[test]
    fn test_clump_rule_rejects_the_closing_corner() {
        let mut tilemap = road_seeded();
        place(&mut tilemap, 2, 2);
        place(&mut tilemap, 3, 2);
        place(&mut tilemap, 2, 3);

        assert!(!cell_supports_road_placement(&tilemap, cell(3, 3)));
        let outcome = apply(UserAction::Primary(cell(3, 3)), &mut tilemap, SEED);
        assert!(!outcome.changed);
        assert!(
            tilemap
                .tile_by_cell(cell(3, 3))
                .is_some_and(|tile| tile.superposition_options().is_some())
        );
    }

    #[test]
    fn test_open_map_supports_placement_everywhere() {
        let tilemap = road_seeded();
        assert!(cell_supports_road_placement(&tilemap, cell(1, 1)));
        assert!(cell_supports_road_placement(&tilemap, cell(3, 3)));
    }

    // Tests removal is gated on the built lifecycle state
    #[test]
    fn test_remove_waits_for_built() {
        let mut tilemap = road_seeded();
        apply(UserAction::Primary(cell(3, 3)), &mut tilemap, SEED);

        // Still constructing: the gesture is refused.
        let outcome = apply(UserAction::Secondary(cell(3, 3)), &mut tilemap, SEED);
        assert!(!outcome.changed);

        tilemap.update(Duration::from_millis(300));
        let outcome = apply(UserAction::Secondary(cell(3, 3)), &mut tilemap, SEED);
        assert!(outcome.changed);

        tilemap.update(Duration::from_millis(300));
        assert!(matches!(
            tilemap.tile_by_cell(cell(3, 3)).map(Tile::kind),
            Some(TileKind::Uninitialized)
        ));

        // Removing an emptied cell is a no-op.
        let outcome = apply(UserAction::Secondary(cell(3, 3)), &mut tilemap, SEED);
        assert!(!outcome.changed);
    }

    // Tests a grown street keeps every facing socket pair compatible
    #[test]
    fn test_street_stays_socket_consistent() {
        let mut tilemap = road_seeded();
        place(&mut tilemap, 2, 3);
        place(&mut tilemap, 3, 3);
        place(&mut tilemap, 4, 3);

        for (left, right) in [(cell(2, 3), cell(3, 3)), (cell(3, 3), cell(4, 3))] {
            let left_id = tilemap
                .fixed_tile_by_cell(left)
                .and_then(Tile::fixed_id)
                .expect("street cell is fixed");
            let right_id = tilemap
                .fixed_tile_by_cell(right)
                .and_then(Tile::fixed_id)
                .expect("street cell is fixed");
            assert!(catalog().is_road(left_id));
            assert!(catalog().is_road(right_id));

            let toward = catalog()
                .socket_toward(left_id, roadweave::spatial::cell::OrthogonalDirection::Right)
                .expect("road has sockets");
            let facing = catalog()
                .socket_toward(right_id, roadweave::spatial::cell::OrthogonalDirection::Left)
                .expect("road has sockets");
            assert!(
                roadweave::catalog::socket::sockets_dock(toward, facing),
                "{left_id} and {right_id} do not dock"
            );
        }
        // The middle of a straight street settles on the horizontal base.
        assert_eq!(
            tilemap.fixed_tile_by_cell(cell(3, 3)).and_then(Tile::fixed_id),
            Some(TileId::new(6))
        );
    }
}
