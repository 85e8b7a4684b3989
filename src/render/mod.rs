// =============================================================================
// RENDER.RS — Map serializers
//
// Three sibling outputs over the same grid data: a minimal walkability
// raster, a full tile-graphics render, and a compact text grid. All three
// share the crop-window logic and the quadrant cell size.
// =============================================================================

mod full;
mod raster;
mod text;

pub use full::{FullRenderOptions, render_full_map};
pub use raster::render_walkability_map;
pub use text::render_text_grid;

use image::RgbImage;
use tracing::warn;

use crate::error::RomError;

/// Edge length of one quadrant cell in output pixels.
pub const CELL_SIZE: u32 = 16;

// ── Crop window ──────────────────────────────────────────────────────────────

/// A crop window in quadrant units, centered on an anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub width: i32,
    pub height: i32,
}

/// Inclusive quadrant bounds of the region a serializer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Viewport {
    fn full(grid_w: i32, grid_h: i32) -> Self {
        Self {
            left: 0,
            right: grid_w - 1,
            top: 0,
            bottom: grid_h - 1,
        }
    }
}

/// Resolve the visible region: `[x - w/2, x + w/2] × [y - h/2, y + h/2]`
/// around the anchor, clamped per axis to the grid. A crop without an
/// anchor position degrades to the full grid with a warning; negative
/// crop dimensions are a request error.
pub(crate) fn resolve_viewport(
    grid_w: i32,
    grid_h: i32,
    crop: Option<CropWindow>,
    pos: Option<(i32, i32)>,
) -> Result<Viewport, RomError> {
    if let Some(crop) = crop
        && (crop.width < 0 || crop.height < 0)
    {
        return Err(RomError::InvalidRequest(format!(
            "crop window {}x{} has negative dimensions",
            crop.width, crop.height
        )));
    }
    Ok(match (crop, pos) {
        (Some(crop), Some((px, py))) => {
            // An anchor outside the grid would invert the clamped window.
            let px = px.clamp(0, grid_w - 1);
            let py = py.clamp(0, grid_h - 1);
            let half_w = crop.width / 2;
            let half_h = crop.height / 2;
            Viewport {
                left: (px - half_w).max(0),
                right: (px + half_w).min(grid_w - 1),
                top: (py - half_h).max(0),
                bottom: (py + half_h).min(grid_h - 1),
            }
        }
        (Some(_), None) => {
            warn!("crop requested without an anchor position, emitting the full grid");
            Viewport::full(grid_w, grid_h)
        }
        _ => Viewport::full(grid_w, grid_h),
    })
}

/// Crop a rendered image down to a viewport of quadrant cells.
pub(crate) fn crop_to_viewport(img: &RgbImage, view: Viewport) -> RgbImage {
    let x = view.left as u32 * CELL_SIZE;
    let y = view.top as u32 * CELL_SIZE;
    let w = (view.right - view.left + 1) as u32 * CELL_SIZE;
    let h = (view.bottom - view.top + 1) as u32 * CELL_SIZE;
    image::imageops::crop_imm(img, x, y, w, h).to_image()
}

// ── Pixel helpers ────────────────────────────────────────────────────────────

/// Alpha-blend `color` onto the image at `(x, y)`; off-image pixels are
/// silently clipped.
pub(crate) fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3], alpha: u8) {
    if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let a = alpha as u16;
    for i in 0..3 {
        let c = color[i] as u16;
        let d = dst.0[i] as u16;
        dst.0[i] = ((c * a + d * (255 - a)) / 255) as u8;
    }
}

/// Opaque pixel write with the same clipping behavior.
pub(crate) fn put_pixel(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, image::Rgb(color));
    }
}

// ── Embedded 3×5 digit face ──────────────────────────────────────────────────

// Coordinate labels only ever need "x,y"; a 3×5 pixel face for the digits
// and the comma keeps the render path free of font-file I/O.
const GLYPH_W: i32 = 3;
const GLYPHS_3X5: [[u8; 5]; 11] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
    [0b000, 0b000, 0b000, 0b010, 0b100], // ,
];

/// Draw a coordinate label like `"12,3"` with the embedded digit face.
/// Characters outside `0-9,` are skipped.
pub(crate) fn draw_label(img: &mut RgbImage, x: i32, y: i32, text: &str, color: [u8; 3]) {
    let mut cursor = x;
    for ch in text.chars() {
        let glyph = match ch {
            '0'..='9' => &GLYPHS_3X5[ch as usize - '0' as usize],
            ',' => &GLYPHS_3X5[10],
            _ => continue,
        };
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 1 {
                    put_pixel(img, cursor + col, y + row as i32, color);
                }
            }
        }
        cursor += GLYPH_W + 1;
    }
}

/// Draw 1-pixel grid lines at every cell boundary.
pub(crate) fn draw_grid_lines(img: &mut RgbImage, color: [u8; 3], alpha: u8) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    for x in (0..w).step_by(CELL_SIZE as usize) {
        for y in 0..h {
            blend_pixel(img, x, y, color, alpha);
        }
    }
    for y in (0..h).step_by(CELL_SIZE as usize) {
        for x in 0..w {
            blend_pixel(img, x, y, color, alpha);
        }
    }
}
