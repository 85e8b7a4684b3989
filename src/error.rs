use thiserror::Error;

/// Hard failures while decoding ROM structures.
///
/// Only structurally broken data (bad table offsets, out-of-range banks,
/// zero map dimensions) surfaces as an error. Short reads are soft: the
/// loaders pad or clamp, emit a `tracing::warn!`, and carry on so rendering
/// degrades instead of aborting. An unreachable pathfinding target is an
/// ordinary `None`, not an error either.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RomError {
    /// A read would run past the end of the ROM buffer.
    #[error("read of {len} byte(s) at offset {offset:#06X} exceeds ROM size {rom_len:#06X}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        rom_len: usize,
    },

    /// A bank number addresses memory the ROM image doesn't have.
    #[error("bank {bank:#04X} out of range (ROM has {num_banks} banks)")]
    InvalidBank { bank: u8, num_banks: usize },

    /// A map header declares a zero width or height.
    #[error("map {map_id} has invalid dimensions {width}x{height}")]
    InvalidMapDimensions { map_id: u8, width: u8, height: u8 },

    /// The map ID indexes past the end of the pointer or bank table.
    #[error("map ID {map_id} outside the pointer/bank tables")]
    MapIdOutOfRange { map_id: u8 },

    /// A serializer was handed a grid with no cells.
    #[error("walkability grid is empty")]
    EmptyGrid,

    /// Malformed request parameters (bad coordinate or crop syntax).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
