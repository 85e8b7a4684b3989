//! Synthetic ROM fixtures: a zeroed 4-bank image with the fixed tables
//! populated at their real offsets, built up per test.

// Not every test binary uses every fixture helper.
#![allow(dead_code)]

use rommap::RomImage;
use rommap::rom::{MAP_BANK_TABLE, MAP_POINTER_TABLE, TILESET_HEADER_TABLE};

/// Four banks; large enough that both fixed tables fit.
pub const ROM_LEN: usize = 0x10000;

// Home-bank offsets the fixture places map resources at.
pub const HEADER_OFF: usize = 0x1000;
pub const TILE_MAP_OFF: usize = 0x1100;
pub const BLOCKS_OFF: usize = 0x2000;
pub const COLLISION_OFF: usize = 0x2800;
pub const TILES_OFF: usize = 0x3000;

pub struct RomFixture {
    pub bytes: Vec<u8>,
}

impl RomFixture {
    /// Zeroed image with tileset 0 pointing at the standard offsets and an
    /// empty (sentinel-only) collision list.
    pub fn base() -> Self {
        let mut fixture = Self {
            bytes: vec![0u8; ROM_LEN],
        };
        fixture = fixture.with_tileset_ptrs(
            0,
            BLOCKS_OFF as u16,
            TILES_OFF as u16,
            COLLISION_OFF as u16,
            0,
        );
        fixture.bytes[COLLISION_OFF] = 0xFF;
        fixture
    }

    /// Register `map_id` in the pointer/bank tables and write its 5-byte
    /// header (tileset 0) plus tile map at the standard offsets.
    pub fn with_map(mut self, map_id: u8, width: u8, height: u8, tile_map: &[u8]) -> Self {
        let ptr_off = MAP_POINTER_TABLE + map_id as usize * 2;
        self.bytes[ptr_off..ptr_off + 2].copy_from_slice(&(HEADER_OFF as u16).to_le_bytes());
        self.bytes[MAP_BANK_TABLE + map_id as usize] = 0;
        self.bytes[HEADER_OFF] = 0; // tileset 0
        self.bytes[HEADER_OFF + 1] = height;
        self.bytes[HEADER_OFF + 2] = width;
        self.bytes[HEADER_OFF + 3..HEADER_OFF + 5]
            .copy_from_slice(&(TILE_MAP_OFF as u16).to_le_bytes());
        self.bytes[TILE_MAP_OFF..TILE_MAP_OFF + tile_map.len()].copy_from_slice(tile_map);
        self
    }

    /// Overwrite tileset 0's header record.
    pub fn with_tileset_ptrs(
        mut self,
        bank: u8,
        blocks: u16,
        tiles: u16,
        collision: u16,
        interaction: u16,
    ) -> Self {
        let base = TILESET_HEADER_TABLE;
        self.bytes[base] = bank;
        self.bytes[base + 1..base + 3].copy_from_slice(&blocks.to_le_bytes());
        self.bytes[base + 3..base + 5].copy_from_slice(&tiles.to_le_bytes());
        self.bytes[base + 5..base + 7].copy_from_slice(&collision.to_le_bytes());
        self.bytes[base + 7..base + 9].copy_from_slice(&interaction.to_le_bytes());
        self
    }

    /// Walkable subtile IDs, sentinel-terminated.
    pub fn with_collision(mut self, walkable: &[u8]) -> Self {
        self.bytes[COLLISION_OFF..COLLISION_OFF + walkable.len()].copy_from_slice(walkable);
        self.bytes[COLLISION_OFF + walkable.len()] = 0xFF;
        self
    }

    /// Block definitions, written contiguously from the blocks offset.
    pub fn with_blocks(mut self, blocks: &[[u8; 16]]) -> Self {
        for (i, block) in blocks.iter().enumerate() {
            let start = BLOCKS_OFF + i * 16;
            self.bytes[start..start + 16].copy_from_slice(block);
        }
        self
    }

    /// One 16-byte tile bitmap at `index` in the tile table.
    pub fn with_tile(mut self, index: usize, bitmap: [u8; 16]) -> Self {
        let start = TILES_OFF + index * 16;
        self.bytes[start..start + 16].copy_from_slice(&bitmap);
        self
    }

    /// Raw byte escape hatch for layout edge cases.
    pub fn set(mut self, offset: usize, data: &[u8]) -> Self {
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        self
    }

    pub fn build(self) -> RomImage {
        RomImage::new(self.bytes)
    }
}

/// A block whose four quadrant representative subtiles (indices 4, 6, 12,
/// 14 — the bottom-left of each 2×2 quadrant region) are set explicitly;
/// every other subtile is a filler ID that is neither walkable nor special
/// in any fixture.
pub fn block_with_reps(tl: u8, tr: u8, bl: u8, br: u8) -> [u8; 16] {
    let mut block = [0xEE; 16];
    block[4] = tl;
    block[6] = tr;
    block[12] = bl;
    block[14] = br;
    block
}
