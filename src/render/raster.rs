use std::collections::HashSet;

use image::{Rgb, RgbImage};
use tracing::warn;

use crate::error::RomError;
use crate::grid::WalkabilityGrid;
use crate::render::{CELL_SIZE, CropWindow, blend_pixel, crop_to_viewport, draw_label,
    draw_grid_lines, resolve_viewport};

const COLOR_WALKABLE: [u8; 3] = [255, 255, 255];
const COLOR_BLOCKED: [u8; 3] = [0, 0, 0];
const COLOR_SPECIAL: [u8; 3] = [255, 165, 0];
const COLOR_MARKER: [u8; 3] = [0, 0, 255];
const COLOR_GRID: [u8; 3] = [100, 100, 100];
const COLOR_LABEL: [u8; 3] = [0, 0, 255];

/// Render the minimal walkability raster: one filled 16×16 cell per
/// quadrant — orange for special, white for walkable, black for blocked —
/// with an optional blue position marker, grid lines and coordinate labels.
///
/// `crop` needs `pos` as its anchor; without one the full map is emitted
/// and a diagnostic logged.
pub fn render_walkability_map(
    grid: &WalkabilityGrid,
    special: &HashSet<(i32, i32)>,
    pos: Option<(i32, i32)>,
    grid_lines: bool,
    coord_labels: bool,
    crop: Option<CropWindow>,
) -> Result<RgbImage, RomError> {
    let (grid_w, grid_h) = (grid.width(), grid.height());
    if grid_w == 0 || grid_h == 0 {
        return Err(RomError::EmptyGrid);
    }

    let mut img = RgbImage::new(grid_w as u32 * CELL_SIZE, grid_h as u32 * CELL_SIZE);

    for gy in 0..grid_h {
        for gx in 0..grid_w {
            let color = if special.contains(&(gx, gy)) {
                COLOR_SPECIAL
            } else if grid.is_walkable(gx, gy) {
                COLOR_WALKABLE
            } else {
                COLOR_BLOCKED
            };
            let (x0, y0) = (gx as u32 * CELL_SIZE, gy as u32 * CELL_SIZE);
            for y in y0..y0 + CELL_SIZE {
                for x in x0..x0 + CELL_SIZE {
                    img.put_pixel(x, y, Rgb(color));
                }
            }
        }
    }

    if grid_lines || coord_labels {
        draw_grid_lines(&mut img, COLOR_GRID, 255);
    }

    if coord_labels {
        for gy in 0..grid_h {
            for gx in 0..grid_w {
                let label = format!("{gx},{gy}");
                draw_label(
                    &mut img,
                    gx * CELL_SIZE as i32 + 2,
                    gy * CELL_SIZE as i32 + 2,
                    &label,
                    COLOR_LABEL,
                );
            }
        }
    }

    if let Some((px, py)) = pos {
        if grid.in_bounds(px, py) {
            draw_marker(&mut img, px, py);
        } else {
            warn!(pos = ?(px, py), grid_w, grid_h, "marker position out of bounds");
        }
    }

    let view = resolve_viewport(grid_w, grid_h, crop, pos)?;
    Ok(crop_to_viewport(&img, view))
}

/// Filled circle centered in the marked cell.
fn draw_marker(img: &mut RgbImage, gx: i32, gy: i32) {
    let cell = CELL_SIZE as i32;
    let cx = gx * cell + cell / 2;
    let cy = gy * cell + cell / 2;
    let radius = cell / 2 - 3;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                blend_pixel(img, cx + dx, cy + dy, COLOR_MARKER, 255);
            }
        }
    }
}
