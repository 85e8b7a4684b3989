// =============================================================================
// GRID.RS — Quadrant walkability and special-feature classification
//
// A block is 4×4 subtiles; the movement grid works at half-block
// resolution, one cell per 2×2-subtile "quadrant". The collision rule is
// the game engine's own: each quadrant is judged by a single fixed
// representative subtile, the bottom-left of its 2×2 region.
// =============================================================================

use std::collections::HashSet;

use crate::rom::{Block, MapData};

/// Subtile IDs the game uses for doors, mats, stairs and ladders. Fixed
/// game data; a quadrant counts as a special feature only when all four of
/// its subtiles come from this set.
pub const SPECIAL_FEATURE_TILE_IDS: [u8; 39] = [
    0x04, 0x05, 0x0C, 0x0D, 0x14, 0x15, 0x1C, 0x1D, 0x64, 0x65, 0x6C, 0x6D, 0x66, 0x67, 0x6E,
    0x6F, 0x7B, 0x5A, 0x5B, 0x5C, 0x5D, 0x30, 0x31, 0x32, 0x33, 0x3A, 0x3B, 0x70, 0x71, 0x78,
    0x79, 0x0E, 0x0F, 0x82, 0x83, 0x0A, 0x0B, 0x1A, 0x1B,
];

#[inline]
fn is_special_tile(id: u8) -> bool {
    SPECIAL_FEATURE_TILE_IDS.contains(&id)
}

// ── WalkabilityGrid ──────────────────────────────────────────────────────────

/// Boolean walkability at quadrant resolution: `height * 2` rows by
/// `width * 2` columns, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkabilityGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl WalkabilityGrid {
    /// Combine tile map, block table and collision set into the quadrant
    /// grid.
    ///
    /// A block index past the loaded block table leaves its four quadrants
    /// non-walkable; otherwise each quadrant samples its representative
    /// subtile `(qr*2+1)*4 + qc*2` against the collision set. The
    /// single-sample rule mirrors the original engine exactly.
    pub fn build(map: &MapData, blocks: &[Block], walkable: &HashSet<u8>) -> Self {
        let width = (map.width * 2) as i32;
        let height = (map.height * 2) as i32;
        let mut cells = vec![false; (width * height) as usize];

        for by in 0..map.height {
            for bx in 0..map.width {
                let bidx = map.block_index(bx, by) as usize;
                let Some(block) = blocks.get(bidx) else {
                    continue; // missing block: all four quadrants stay blocked
                };
                for qr in 0..2u32 {
                    for qc in 0..2u32 {
                        let representative = block[((qr * 2 + 1) * 4 + qc * 2) as usize];
                        let gx = (bx * 2 + qc) as i32;
                        let gy = (by * 2 + qr) as i32;
                        cells[(gy * width + gx) as usize] = walkable.contains(&representative);
                    }
                }
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid directly from a predicate. Useful for synthetic grids
    /// in tools and tests; `width` and `height` below zero clamp to zero.
    pub fn from_fn(width: i32, height: i32, mut walkable: impl FnMut(i32, i32) -> bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(walkable(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid width in quadrants.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in quadrants.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Walkability at `(x, y)`; out-of-bounds cells are non-walkable.
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[(y * self.width + x) as usize]
    }
}

// ── Special quadrant classification ──────────────────────────────────────────

/// Collect the walkable quadrants whose four subtile IDs are all special
/// feature tiles (doors, stairs, ladders).
///
/// Partial matches are excluded, not relaxed, and a special-but-blocked
/// quadrant never enters the set: the result is always a subset of the
/// grid's walkable cells.
pub fn walkable_special_quadrants(
    map: &MapData,
    blocks: &[Block],
    grid: &WalkabilityGrid,
) -> HashSet<(i32, i32)> {
    let mut special = HashSet::new();

    for by in 0..map.height {
        for bx in 0..map.width {
            let bidx = map.block_index(bx, by) as usize;
            let Some(block) = blocks.get(bidx) else {
                continue;
            };
            for qr in 0..2u32 {
                for qc in 0..2u32 {
                    let gx = (bx * 2 + qc) as i32;
                    let gy = (by * 2 + qr) as i32;
                    if !grid.is_walkable(gx, gy) {
                        continue;
                    }
                    let all_special = (0..2).all(|r| {
                        (0..2).all(|c| {
                            is_special_tile(block[((qr * 2 + r) * 4 + (qc * 2 + c)) as usize])
                        })
                    });
                    if all_special {
                        special.insert((gx, gy));
                    }
                }
            }
        }
    }

    special
}
