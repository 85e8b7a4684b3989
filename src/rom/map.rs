use tracing::warn;

use crate::error::RomError;
use crate::rom::{RomImage, gb_to_file_offset};

/// Per-map 16-bit header pointers, indexed by map ID.
pub const MAP_POINTER_TABLE: usize = 0x01AE;

/// Per-map bank bytes, indexed by map ID.
pub const MAP_BANK_TABLE: usize = 0xC23D;

// ── MapData ──────────────────────────────────────────────────────────────────

/// A resolved map header plus its tile map.
///
/// The tile map is row-major block indices, always exactly
/// `width * height` long: a short read is zero-padded rather than failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapData {
    pub tileset_id: u8,
    /// Width in blocks.
    pub width: u32,
    /// Height in blocks.
    pub height: u32,
    pub tile_map: Vec<u8>,
}

impl MapData {
    /// Block index at block cell `(bx, by)`. Callers keep coordinates in
    /// range; the tile map length invariant makes the indexing safe.
    #[inline]
    pub fn block_index(&self, bx: u32, by: u32) -> u8 {
        self.tile_map[(by * self.width + bx) as usize]
    }

    /// Highest block index the tile map references.
    pub fn max_block_index(&self) -> u8 {
        self.tile_map.iter().copied().max().unwrap_or(0)
    }
}

// ── load_map ─────────────────────────────────────────────────────────────────

/// Resolve `map_id` through the fixed pointer/bank tables and load its
/// header and tile map.
///
/// Hard failures: map ID past either table, bank out of range, header out
/// of bounds, zero width or height. A tile map cut short by the end of the
/// ROM is soft: the available bytes are kept and the rest zero-padded.
pub fn load_map(rom: &RomImage, map_id: u8) -> Result<MapData, RomError> {
    let ptr_offset = MAP_POINTER_TABLE + map_id as usize * 2;
    let bank_offset = MAP_BANK_TABLE + map_id as usize;
    if ptr_offset + 1 >= rom.len() || bank_offset >= rom.len() {
        return Err(RomError::MapIdOutOfRange { map_id });
    }

    let ptr = rom.read_u16(ptr_offset)?;
    let bank = rom.read_u8(bank_offset)?;
    rom.check_bank(bank)?;

    // 5-byte header: tileset, height, width, tile-map pointer (u16).
    let header = gb_to_file_offset(ptr, bank);
    let tileset_id = rom.read_u8(header)?;
    let height = rom.read_u8(header + 1)?;
    let width = rom.read_u8(header + 2)?;
    let tile_map_ptr = rom.read_u16(header + 3)?;

    if width == 0 || height == 0 {
        return Err(RomError::InvalidMapDimensions {
            map_id,
            width,
            height,
        });
    }

    let data_offset = gb_to_file_offset(tile_map_ptr, bank);
    let expected = width as usize * height as usize;
    let available = rom.tail(data_offset);
    let take = expected.min(available.len());
    if take < expected {
        warn!(
            map_id,
            got = take,
            expected,
            "tile map truncated, zero-padding"
        );
    }

    let mut tile_map = available[..take].to_vec();
    tile_map.resize(expected, 0x00);

    Ok(MapData {
        tileset_id,
        width: width as u32,
        height: height as u32,
        tile_map,
    })
}
