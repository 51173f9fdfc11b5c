//! Tests for chronological rewinds after solver failures

#[cfg(test)]
mod tests {
    use roadweave::algorithm::bitset::TileSet;
    use roadweave::algorithm::model::{StepEndCondition, Wfc, WfcState};
    use roadweave::catalog::tile::TileId;
    use roadweave::catalog::tileset::{GRASS_ID, RESIDENTIAL_LOT_ID, catalog};
    use roadweave::io::error::SolverFailure;
    use roadweave::spatial::cell::{Cell, GridSize};
    use roadweave::tilemap::map::Tilemap;
    use roadweave::tilemap::tile::Tile;
    use std::collections::HashMap;

    const SIZE: GridSize = GridSize {
        horizontal_cells: 2,
        vertical_cells: 1,
    };

    fn pond() -> TileId {
        TileId::new(24)
    }

    fn straight() -> TileId {
        // The horizontal straight insists on a road to its right.
        TileId::new(6)
    }

    // A forced straight next to nature-only options cannot be satisfied:
    // its road socket never docks the nature edges. The single-option left
    // cell is always drawn first.
    fn doomed_map() -> Tilemap {
        let mut tilemap = Tilemap::new(SIZE, |_| Tile::uninitialized());
        let left = Cell::new(SIZE, 1, 1).expect("left exists");
        let right = Cell::new(SIZE, 2, 1).expect("right exists");
        tilemap
            .set_superposition_options(left, TileSet::from_ids(catalog().capacity(), [straight()]));
        tilemap.set_superposition_options(
            right,
            TileSet::from_ids(catalog().capacity(), [pond(), TileId::new(22)]),
        );
        tilemap
    }

    // Tests an unsatisfiable map ends in the failed state, not a hang
    #[test]
    fn test_unsatisfiable_map_fails_terminally() {
        let mut wfc = Wfc::from_tilemap(doomed_map(), 17);
        wfc.solve();
        assert_eq!(
            wfc.current_state(),
            WfcState::Failed(SolverFailure::BacktrackFailed)
        );
        assert!(wfc.backtrack_count() >= 1);
    }

    // Tests the rewind restores the options a failed propagation consumed
    // Verified by skipping the restore on propagation entries
    #[test]
    fn test_rewind_restores_consumed_options() {
        let mut wfc = Wfc::from_tilemap(doomed_map(), 17);
        wfc.solve();

        let right = Cell::new(SIZE, 2, 1).expect("right exists");
        let restored = wfc
            .tilemap()
            .tile_by_cell(right)
            .and_then(Tile::superposition_options)
            .map(TileSet::ids);
        assert_eq!(restored, Some(vec![TileId::new(22), pond()]));
    }

    // Tests inventory charged by a rewound placement is credited back
    #[test]
    fn test_rewind_credits_inventory() {
        let mut inventory = HashMap::new();
        inventory.insert(straight(), 5);
        let mut wfc = Wfc::from_tilemap(doomed_map(), 17).with_tile_inventory(inventory);
        wfc.solve();
        assert_eq!(
            wfc.current_state(),
            WfcState::Failed(SolverFailure::BacktrackFailed)
        );
        assert_eq!(wfc.tile_inventory().get(&straight()), Some(&5));
    }

    // Tests a failed subgrid placement leaves the other subcells eligible
    // for the same lot on later draws
    // Verified by stripping the parent id on subtile rewind
    #[test]
    fn test_mid_subgrid_failure_keeps_lots_available() {
        let size = GridSize {
            horizontal_cells: 5,
            vertical_cells: 5,
        };
        let mut tilemap = Tilemap::seeded(size);
        let anchor = Cell::new(size, 4, 4).expect("anchor exists");
        let blocked = Cell::new(size, 4, 5).expect("driveway cell exists");

        // A fixed grass tile under the anchor rejects the driveway after
        // the first three subcells have already been written.
        tilemap.add_tile(GRASS_ID, blocked);
        tilemap.set_superposition_options(
            anchor,
            TileSet::from_ids(catalog().capacity(), [RESIDENTIAL_LOT_ID]),
        );

        let mut wfc = Wfc::from_tilemap(tilemap, 29);
        wfc.collapse(anchor);
        wfc.step_n(StepEndCondition::StopAtEmptySteps, 50);
        assert_eq!(
            wfc.current_state(),
            WfcState::Failed(SolverFailure::BacktrackFailed)
        );

        for (x, y) in [(3, 3), (4, 3), (3, 4)] {
            let sub_cell = Cell::new(size, x, y).expect("subcell exists");
            let options = wfc
                .tilemap()
                .tile_by_cell(sub_cell)
                .and_then(Tile::superposition_options)
                .expect("subcell re-opened");
            assert!(
                options.contains(RESIDENTIAL_LOT_ID),
                "lot stripped from subcell ({x}, {y})"
            );
            assert!(options.contains(GRASS_ID));
        }
    }

    // Tests a failure with residual options returns to solving and finishes
    #[test]
    fn test_recovery_with_alternatives_converges() {
        let mut tilemap = Tilemap::new(SIZE, |_| Tile::uninitialized());
        let left = Cell::new(SIZE, 1, 1).expect("left exists");
        let right = Cell::new(SIZE, 2, 1).expect("right exists");
        tilemap.set_superposition_options(
            left,
            TileSet::from_ids(catalog().capacity(), [straight(), GRASS_ID]),
        );
        tilemap.set_superposition_options(
            right,
            TileSet::from_ids(catalog().capacity(), [pond(), GRASS_ID, TileId::new(22)]),
        );

        let mut wfc = Wfc::from_tilemap(tilemap, 21);
        wfc.solve();
        // Whether or not the cross was drawn first, the grass alternative
        // lets the solve finish.
        assert_eq!(wfc.current_state(), WfcState::Done);
        assert!(wfc.tilemap().superposition_cells().is_empty());
        assert!(wfc.backtrack_count() <= 1);
    }
}
