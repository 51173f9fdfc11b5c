//! PNG rendering of tilemaps
//!
//! Each cell becomes one coloured square block. Roads render dark, lots as
//! brick, nature tiles in greens, open superpositions in light grey, and
//! uninitialised cells stay transparent.

use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::catalog::tile::{Biome, TileConfig};
use crate::catalog::tileset::catalog;
use crate::io::configuration::CELL_PIXEL_SIZE;
use crate::io::error::GeneratorError;
use crate::spatial::cell::Cell;
use crate::tilemap::map::Tilemap;
use crate::tilemap::tile::{Tile, TileKind};

fn color_for(tile: &Tile) -> Rgba<u8> {
    match tile.kind() {
        TileKind::Uninitialized => Rgba([0, 0, 0, 0]),
        TileKind::Superposition(_) => Rgba([214, 214, 208, 255]),
        TileKind::Fixed { id, .. } => match catalog().get(*id).map(TileConfig::biome) {
            Some(Biome::Road) => Rgba([72, 74, 82, 255]),
            Some(Biome::Lot) => Rgba([176, 108, 88, 255]),
            Some(Biome::Nature) => match id.get() {
                22 => Rgba([158, 186, 96, 255]),
                23 => Rgba([88, 142, 82, 255]),
                24 => Rgba([96, 148, 186, 255]),
                _ => Rgba([122, 172, 102, 255]),
            },
            None => Rgba([0, 0, 0, 255]),
        },
    }
}

/// Render the tilemap into an RGBA image buffer
pub fn render_tilemap(tilemap: &Tilemap) -> RgbaImage {
    let size = tilemap.grid_size();
    let width = size.horizontal_cells as u32 * CELL_PIXEL_SIZE;
    let height = size.vertical_cells as u32 * CELL_PIXEL_SIZE;
    let mut img = RgbaImage::new(width, height);

    for index in 0..size.cell_count() {
        let Some(cell) = Cell::from_index(size, index) else {
            continue;
        };
        let Some(tile) = tilemap.tile_by_cell(cell) else {
            continue;
        };
        let color = color_for(tile);
        let base_x = (cell.x() as u32 - 1) * CELL_PIXEL_SIZE;
        let base_y = (cell.y() as u32 - 1) * CELL_PIXEL_SIZE;
        for dy in 0..CELL_PIXEL_SIZE {
            for dx in 0..CELL_PIXEL_SIZE {
                img.put_pixel(base_x + dx, base_y + dy, color);
            }
        }
    }

    img
}

/// Export the tilemap as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tilemap_as_png(tilemap: &Tilemap, output_path: &str) -> crate::io::error::Result<()> {
    let img = render_tilemap(tilemap);

    if let Some(parent) = Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| GeneratorError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path).map_err(|e| GeneratorError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}
