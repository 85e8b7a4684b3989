use std::collections::HashSet;

use crate::error::RomError;
use crate::grid::WalkabilityGrid;
use crate::render::{CropWindow, resolve_viewport};

/// Serialize the grid as a compact text map: `W` walkable, `B` blocked,
/// `O` special, with `P` overriding at the marker position. Rows are
/// joined by `;`, e.g. `"BBWWO;WWPWB"`.
///
/// Cropping behaves exactly like the raster serializer: anchored at `pos`,
/// clamped per axis, degrading to the full grid when no anchor is given.
pub fn render_text_grid(
    grid: &WalkabilityGrid,
    special: &HashSet<(i32, i32)>,
    pos: Option<(i32, i32)>,
    crop: Option<CropWindow>,
) -> Result<String, RomError> {
    let (grid_w, grid_h) = (grid.width(), grid.height());
    if grid_w == 0 || grid_h == 0 {
        return Err(RomError::EmptyGrid);
    }

    let view = resolve_viewport(grid_w, grid_h, crop, pos)?;
    let mut rows = Vec::with_capacity((view.bottom - view.top + 1) as usize);
    for y in view.top..=view.bottom {
        let mut row = String::with_capacity((view.right - view.left + 1) as usize);
        for x in view.left..=view.right {
            let symbol = if pos == Some((x, y)) {
                'P'
            } else if special.contains(&(x, y)) {
                'O'
            } else if grid.is_walkable(x, y) {
                'W'
            } else {
                'B'
            };
            row.push(symbol);
        }
        rows.push(row);
    }
    Ok(rows.join(";"))
}
