use std::collections::HashSet;

use tracing::debug;

use crate::error::RomError;
use crate::grid::{WalkabilityGrid, walkable_special_quadrants};
use crate::rom::{
    Block, MapData, RomImage, TileBitmap, TilesetHeader, load_blocks, load_collision_set,
    load_map, load_tile_graphics, load_tileset_header,
};

/// Everything derived from one map ID in a single call: header, tileset,
/// collision set, blocks, walkability grid and special quadrants.
///
/// Tile graphics are not part of the bundle; only the visual render path
/// needs them, so they load on demand via [`MapBundle::load_tiles`].
#[derive(Debug, Clone)]
pub struct MapBundle {
    pub map: MapData,
    pub tileset: TilesetHeader,
    pub walkable: HashSet<u8>,
    pub blocks: Vec<Block>,
    pub grid: WalkabilityGrid,
    pub special: HashSet<(i32, i32)>,
}

impl MapBundle {
    /// Resolve `map_id` down to its walkability grid and special-quadrant
    /// set. Structural ROM errors abort this map; short data is padded or
    /// clamped by the loaders and only logged.
    pub fn load(rom: &RomImage, map_id: u8) -> Result<Self, RomError> {
        let map = load_map(rom, map_id)?;
        debug!(
            map_id,
            tileset = map.tileset_id,
            width = map.width,
            height = map.height,
            "loaded map"
        );
        let tileset = load_tileset_header(rom, map.tileset_id)?;
        let walkable = load_collision_set(rom, &tileset)?;
        let blocks = load_blocks(rom, &tileset, &map.tile_map)?;
        let grid = WalkabilityGrid::build(&map, &blocks, &walkable);
        let special = walkable_special_quadrants(&map, &blocks, &grid);
        Ok(Self {
            map,
            tileset,
            walkable,
            blocks,
            grid,
            special,
        })
    }

    /// Load the tile bitmaps this map's blocks reference (render path only).
    pub fn load_tiles(&self, rom: &RomImage) -> Result<Vec<TileBitmap>, RomError> {
        load_tile_graphics(rom, &self.tileset, &self.blocks, &self.walkable)
    }
}
