use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::RomError;
use crate::rom::{RomImage, gb_to_file_offset};

/// Tileset header table base offset.
pub const TILESET_HEADER_TABLE: usize = 0xC7BE;

/// Stride of one tileset header record.
pub const TILESET_HEADER_SIZE: usize = 12;

/// One block definition: 16 subtile IDs in 4×4 row-major order.
pub const BLOCK_RECORD_SIZE: usize = 16;

/// One 2bpp planar tile bitmap: two 8-byte bitplanes.
pub const TILE_RECORD_SIZE: usize = 16;

/// Collision lists end at this sentinel byte.
const COLLISION_SENTINEL: u8 = 0xFF;

/// Tile graphics always cover at least the base character set.
const BASE_TILE_COUNT: usize = 128;

pub type Block = [u8; BLOCK_RECORD_SIZE];
pub type TileBitmap = [u8; TILE_RECORD_SIZE];

// ── Tileset header ───────────────────────────────────────────────────────────

/// A tileset's bank and its four resource pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesetHeader {
    pub bank: u8,
    pub blocks_ptr: u16,
    pub tiles_ptr: u16,
    pub collision_ptr: u16,
    /// Parsed for layout compatibility; nothing downstream consumes it.
    pub interaction_ptr: u16,
}

/// Load the 12-byte header record for `tileset_id`.
pub fn load_tileset_header(rom: &RomImage, tileset_id: u8) -> Result<TilesetHeader, RomError> {
    let base = TILESET_HEADER_TABLE + tileset_id as usize * TILESET_HEADER_SIZE;
    if base + TILESET_HEADER_SIZE > rom.len() {
        return Err(RomError::OutOfBounds {
            offset: base,
            len: TILESET_HEADER_SIZE,
            rom_len: rom.len(),
        });
    }

    let header = TilesetHeader {
        bank: rom.read_u8(base)?,
        blocks_ptr: rom.read_u16(base + 1)?,
        tiles_ptr: rom.read_u16(base + 3)?,
        collision_ptr: rom.read_u16(base + 5)?,
        interaction_ptr: rom.read_u16(base + 7)?,
    };
    rom.check_bank(header.bank)?;
    Ok(header)
}

// ── Collision set ────────────────────────────────────────────────────────────

/// Read the walkable-subtile-ID list: sequential bytes up to a `0xFF`
/// sentinel or the end of the ROM. An empty set is valid (nothing walkable).
pub fn load_collision_set(rom: &RomImage, tileset: &TilesetHeader) -> Result<HashSet<u8>, RomError> {
    let offset = gb_to_file_offset(tileset.collision_ptr, tileset.bank);
    if offset >= rom.len() {
        return Err(RomError::OutOfBounds {
            offset,
            len: 1,
            rom_len: rom.len(),
        });
    }

    let walkable = rom
        .tail(offset)
        .iter()
        .copied()
        .take_while(|&b| b != COLLISION_SENTINEL)
        .collect();
    Ok(walkable)
}

// ── Block table ──────────────────────────────────────────────────────────────

/// Load block definitions up to the highest index the tile map references.
///
/// The count is clamped to the blocks the ROM can actually supply; a
/// referenced-but-missing block is the grid builder's problem (it treats
/// the block as fully non-walkable), never a crash here.
pub fn load_blocks(
    rom: &RomImage,
    tileset: &TilesetHeader,
    tile_map: &[u8],
) -> Result<Vec<Block>, RomError> {
    let offset = gb_to_file_offset(tileset.blocks_ptr, tileset.bank);
    if offset >= rom.len() {
        return Err(RomError::OutOfBounds {
            offset,
            len: 1,
            rom_len: rom.len(),
        });
    }

    let required = tile_map.iter().copied().max().unwrap_or(0) as usize + 1;
    let available = (rom.len() - offset) / BLOCK_RECORD_SIZE;
    let count = required.min(available);
    if count < required {
        warn!(count, required, "block table truncated");
    }

    let mut blocks = Vec::with_capacity(count);
    for i in 0..count {
        let start = offset + i * BLOCK_RECORD_SIZE;
        let end = rom.len().min(start + BLOCK_RECORD_SIZE);
        let mut block: Block = [0x00; BLOCK_RECORD_SIZE];
        block[..end - start].copy_from_slice(&rom.bytes()[start..end]);
        blocks.push(block);
    }
    Ok(blocks)
}

// ── Tile graphics ────────────────────────────────────────────────────────────

/// Load 2bpp tile bitmaps for the render path.
///
/// Covers every tile ID referenced by the blocks or the collision set, and
/// always at least the base 128 records. Stops early if the ROM runs out;
/// unavailable tile IDs render blank downstream.
pub fn load_tile_graphics(
    rom: &RomImage,
    tileset: &TilesetHeader,
    blocks: &[Block],
    walkable: &HashSet<u8>,
) -> Result<Vec<TileBitmap>, RomError> {
    let offset = gb_to_file_offset(tileset.tiles_ptr, tileset.bank);
    if offset >= rom.len() {
        return Err(RomError::OutOfBounds {
            offset,
            len: 1,
            rom_len: rom.len(),
        });
    }

    let mut max_id = walkable.iter().copied().max().unwrap_or(0) as usize;
    for block in blocks {
        for &id in block {
            max_id = max_id.max(id as usize);
        }
    }

    let available = (rom.len() - offset) / TILE_RECORD_SIZE;
    let count = available.min((max_id + 1).max(BASE_TILE_COUNT));
    debug!(max_id, count, "loading tile graphics");
    if count < (max_id + 1).max(BASE_TILE_COUNT) {
        warn!(
            count,
            max_id, "ROM ended before all referenced tiles were loaded"
        );
    }

    let mut tiles = Vec::with_capacity(count);
    for i in 0..count {
        let start = offset + i * TILE_RECORD_SIZE;
        let mut tile: TileBitmap = [0x00; TILE_RECORD_SIZE];
        tile.copy_from_slice(&rom.bytes()[start..start + TILE_RECORD_SIZE]);
        tiles.push(tile);
    }
    Ok(tiles)
}
