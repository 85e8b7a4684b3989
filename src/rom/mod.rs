// =============================================================================
// ROM.RS — Bank-switched ROM image access
//
// A Gen-I cartridge is a sequence of 0x4000-byte banks. Pointers below
// 0x4000 address the fixed home bank; everything else is (pointer, bank)
// addressed and must be translated to a flat file offset before reading.
// =============================================================================

mod map;
mod tileset;

pub use map::{MAP_BANK_TABLE, MAP_POINTER_TABLE, MapData, load_map};
pub use tileset::{
    BLOCK_RECORD_SIZE, Block, TILESET_HEADER_SIZE, TILESET_HEADER_TABLE, TILE_RECORD_SIZE,
    TileBitmap, TilesetHeader, load_blocks, load_collision_set, load_tile_graphics,
    load_tileset_header,
};

use std::io;
use std::path::Path;

use crate::error::RomError;

/// Size of one switchable ROM bank in bytes.
pub const BANK_SIZE: usize = 0x4000;

/// Translate a (16-bit pointer, bank) pair into a flat file offset.
///
/// Pointers below `0x4000` address the home bank and pass through
/// unchanged. The bank itself is NOT validated here; callers go through
/// [`RomImage::check_bank`] first.
#[inline]
pub fn gb_to_file_offset(ptr: u16, bank: u8) -> usize {
    let ptr = ptr as usize;
    if ptr < BANK_SIZE {
        ptr
    } else {
        bank as usize * BANK_SIZE + (ptr - BANK_SIZE)
    }
}

// ── RomImage ─────────────────────────────────────────────────────────────────

/// An immutable ROM byte image.
///
/// Never mutated after construction, so sharing one image across threads
/// needs no locking; every decode is a pure function of `(RomImage, params)`.
#[derive(Debug, Clone)]
pub struct RomImage {
    data: Vec<u8>,
}

impl RomImage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(std::fs::read(path)?))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of whole 0x4000-byte banks the image holds.
    #[inline]
    pub fn num_banks(&self) -> usize {
        self.data.len() / BANK_SIZE
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read one byte, failing if `offset` is past the end of the image.
    pub fn read_u8(&self, offset: usize) -> Result<u8, RomError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(RomError::OutOfBounds {
                offset,
                len: 1,
                rom_len: self.data.len(),
            })
    }

    /// Read a little-endian u16, failing if either byte is out of bounds.
    pub fn read_u16(&self, offset: usize) -> Result<u16, RomError> {
        match (self.data.get(offset), self.data.get(offset + 1)) {
            (Some(&lo), Some(&hi)) => Ok(u16::from(lo) | (u16::from(hi) << 8)),
            _ => Err(RomError::OutOfBounds {
                offset,
                len: 2,
                rom_len: self.data.len(),
            }),
        }
    }

    /// Validate that `bank` addresses memory this image actually has.
    pub fn check_bank(&self, bank: u8) -> Result<(), RomError> {
        let num_banks = self.num_banks();
        if (bank as usize) < num_banks {
            Ok(())
        } else {
            Err(RomError::InvalidBank { bank, num_banks })
        }
    }

    /// The tail of the image starting at `offset`; empty when `offset` is
    /// past the end.
    pub fn tail(&self, offset: usize) -> &[u8] {
        self.data.get(offset..).unwrap_or(&[])
    }
}
