use std::collections::HashSet;

use image::{Rgb, RgbImage};
use tracing::warn;

use crate::error::RomError;
use crate::grid::WalkabilityGrid;
use crate::pathfinding::PathResult;
use crate::render::{CELL_SIZE, CropWindow, blend_pixel, crop_to_viewport, draw_grid_lines,
    draw_label, resolve_viewport};
use crate::rom::{Block, MapData, TileBitmap};
use crate::tile::decode_tile;

/// Grayscale shade per 2bpp color index, lightest to darkest.
const SHADES: [u8; 4] = [255, 192, 96, 0];

const OVERLAY_SPECIAL: ([u8; 3], u8) = ([255, 165, 0], 150);
const OVERLAY_BLOCKED: ([u8; 3], u8) = ([255, 0, 0], 100);
const OVERLAY_PATH: ([u8; 3], u8) = ([0, 255, 0], 200);
const MARKER_FILL: ([u8; 3], u8) = ([0, 0, 255], 180);
const MARKER_RING: ([u8; 3], u8) = ([255, 255, 255], 220);
const DEBUG_GRID: ([u8; 3], u8) = ([50, 50, 50], 100);
const DEBUG_LABEL: [u8; 3] = [200, 200, 255];

const PATH_HALF_WIDTH: i32 = 2;

/// Overlay selection for [`render_full_map`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FullRenderOptions<'a> {
    /// Route to draw as a thick line between quadrant centers.
    pub path: Option<&'a PathResult>,
    /// Quadrant to mark with the position circle; also the crop anchor.
    pub pos: Option<(i32, i32)>,
    /// Draw grid lines, coordinate labels and the blocked-quadrant tint.
    pub debug: bool,
    pub crop: Option<CropWindow>,
}

/// Render the map's actual tile graphics: every referenced 2bpp bitmap
/// decoded to a 4-shade grayscale base (8×8 px per subtile, 32×32 px per
/// block), then translucent overlays for special quadrants, the path, the
/// position marker and optional debug annotations.
///
/// Tile IDs past the loaded tile table render blank (white).
pub fn render_full_map(
    map: &MapData,
    blocks: &[Block],
    tiles: &[TileBitmap],
    grid: &WalkabilityGrid,
    special: &HashSet<(i32, i32)>,
    options: FullRenderOptions<'_>,
) -> Result<RgbImage, RomError> {
    let (grid_w, grid_h) = (grid.width(), grid.height());
    if grid_w == 0 || grid_h == 0 {
        return Err(RomError::EmptyGrid);
    }

    let img_w = map.width * 2 * CELL_SIZE;
    let img_h = map.height * 2 * CELL_SIZE;
    let mut img = RgbImage::from_pixel(img_w, img_h, Rgb([255, 255, 255]));

    // Base layer: decoded tile bitmaps, one 8×8 subtile at a time.
    for by in 0..map.height {
        for bx in 0..map.width {
            let bidx = map.block_index(bx, by) as usize;
            let Some(block) = blocks.get(bidx) else {
                continue;
            };
            for (i, &tid) in block.iter().enumerate() {
                let Some(bitmap) = tiles.get(tid as usize) else {
                    continue; // unavailable tile stays blank
                };
                let pixels = decode_tile(bitmap);
                let tx = bx * 32 + (i as u32 % 4) * 8;
                let ty = by * 32 + (i as u32 / 4) * 8;
                for (r, row) in pixels.iter().enumerate() {
                    for (c, &idx) in row.iter().enumerate() {
                        let shade = SHADES[idx as usize];
                        img.put_pixel(tx + c as u32, ty + r as u32, Rgb([shade; 3]));
                    }
                }
            }
        }
    }

    // Quadrant tints: special features always, blocked cells in debug mode.
    for gy in 0..grid_h {
        for gx in 0..grid_w {
            if special.contains(&(gx, gy)) {
                tint_cell(&mut img, gx, gy, OVERLAY_SPECIAL);
            }
            if options.debug && !grid.is_walkable(gx, gy) {
                tint_cell(&mut img, gx, gy, OVERLAY_BLOCKED);
            }
        }
    }

    if let Some(path) = options.path {
        draw_path(&mut img, &path.coords);
    }

    if let Some((px, py)) = options.pos {
        if grid.in_bounds(px, py) {
            draw_marker(&mut img, px, py);
        } else {
            warn!(pos = ?(px, py), grid_w, grid_h, "marker position out of bounds");
        }
    }

    if options.debug {
        draw_grid_lines(&mut img, DEBUG_GRID.0, DEBUG_GRID.1);
        for gy in 0..grid_h {
            for gx in 0..grid_w {
                let label = format!("{gx},{gy}");
                draw_label(
                    &mut img,
                    gx * CELL_SIZE as i32 + 1,
                    gy * CELL_SIZE as i32 + 1,
                    &label,
                    DEBUG_LABEL,
                );
            }
        }
    }

    let view = resolve_viewport(grid_w, grid_h, options.crop, options.pos)?;
    Ok(crop_to_viewport(&img, view))
}

fn tint_cell(img: &mut RgbImage, gx: i32, gy: i32, (color, alpha): ([u8; 3], u8)) {
    let cell = CELL_SIZE as i32;
    for dy in 0..cell {
        for dx in 0..cell {
            blend_pixel(img, gx * cell + dx, gy * cell + dy, color, alpha);
        }
    }
}

/// Thick line through the quadrant centers of the route. Segments are
/// always axis-aligned (4-connected path); pixels shared by consecutive
/// segments blend once, not twice.
fn draw_path(img: &mut RgbImage, coords: &[(i32, i32)]) {
    if coords.len() < 2 {
        return;
    }
    let cell = CELL_SIZE as i32;
    let center = |(x, y): (i32, i32)| (x * cell + cell / 2, y * cell + cell / 2);

    let mut covered: HashSet<(i32, i32)> = HashSet::new();
    for pair in coords.windows(2) {
        let (x0, y0) = center(pair[0]);
        let (x1, y1) = center(pair[1]);
        let (lx, hx) = (x0.min(x1), x0.max(x1));
        let (ly, hy) = (y0.min(y1), y0.max(y1));
        for y in ly - PATH_HALF_WIDTH..=hy + PATH_HALF_WIDTH {
            for x in lx - PATH_HALF_WIDTH..=hx + PATH_HALF_WIDTH {
                covered.insert((x, y));
            }
        }
    }
    for (x, y) in covered {
        blend_pixel(img, x, y, OVERLAY_PATH.0, OVERLAY_PATH.1);
    }
}

/// Blue position circle with a white outline.
fn draw_marker(img: &mut RgbImage, gx: i32, gy: i32) {
    let cell = CELL_SIZE as i32;
    let cx = gx * cell + cell / 2;
    let cy = gy * cell + cell / 2;
    let radius = 7;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 > radius * radius {
                continue;
            }
            if d2 >= (radius - 1) * (radius - 1) {
                blend_pixel(img, cx + dx, cy + dy, MARKER_RING.0, MARKER_RING.1);
            } else {
                blend_pixel(img, cx + dx, cy + dy, MARKER_FILL.0, MARKER_FILL.1);
            }
        }
    }
}
