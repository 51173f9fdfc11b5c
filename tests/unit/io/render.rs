//! Tests for PNG rendering and export

#[cfg(test)]
mod tests {
    use roadweave::catalog::tileset::LONE_ROAD_ID;
    use roadweave::io::configuration::CELL_PIXEL_SIZE;
    use roadweave::io::render::{export_tilemap_as_png, render_tilemap};
    use roadweave::spatial::cell::{Cell, GridSize};
    use roadweave::tilemap::map::Tilemap;

    const SIZE: GridSize = GridSize {
        horizontal_cells: 3,
        vertical_cells: 2,
    };

    #[test]
    fn test_image_dimensions_follow_the_grid() {
        let img = render_tilemap(&Tilemap::seeded(SIZE));
        assert_eq!(img.width(), 3 * CELL_PIXEL_SIZE);
        assert_eq!(img.height(), 2 * CELL_PIXEL_SIZE);
    }

    // Tests fixed roads render darker than open superpositions
    #[test]
    fn test_roads_stand_out_from_open_cells() {
        let mut tilemap = Tilemap::seeded(SIZE);
        let road_cell = Cell::new(SIZE, 1, 1).expect("cell exists");
        tilemap.add_tile(LONE_ROAD_ID, road_cell);

        let img = render_tilemap(&tilemap);
        let road_pixel = img.get_pixel(0, 0);
        let open_pixel = img.get_pixel(CELL_PIXEL_SIZE, 0);
        assert!(road_pixel.0[0] < open_pixel.0[0]);
        assert_eq!(road_pixel.0[3], 255);
        assert_eq!(open_pixel.0[3], 255);
    }

    #[test]
    fn test_export_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir is available");
        let path = dir.path().join("nested/map.png");
        let path_arg = path.to_string_lossy().to_string();

        export_tilemap_as_png(&Tilemap::seeded(SIZE), &path_arg).expect("export succeeds");
        assert!(path.exists());
    }
}
