// =============================================================================
// TILE.RS — 2bpp planar tile decoding
//
// Game Boy tiles are 8×8 pixels at 2 bits per pixel, stored as two 8-byte
// bitplanes: byte r is plane 0 of pixel row r, byte r+8 is plane 1. The
// color index of pixel (r, c) combines the two bits at position 7-c.
// =============================================================================

/// Decode one 16-byte planar tile into an 8×8 matrix of 2-bit color indices.
///
/// Pure and deterministic. Input shorter than 16 bytes is zero-padded;
/// anything past 16 bytes is ignored.
pub fn decode_tile(bytes: &[u8]) -> [[u8; 8]; 8] {
    let mut planes = [0u8; 16];
    let n = bytes.len().min(16);
    planes[..n].copy_from_slice(&bytes[..n]);

    let mut pixels = [[0u8; 8]; 8];
    for r in 0..8 {
        let (p0, p1) = (planes[r], planes[r + 8]);
        for (c, px) in pixels[r].iter_mut().enumerate() {
            let bit = 7 - c;
            *px = (((p1 >> bit) & 1) << 1) | ((p0 >> bit) & 1);
        }
    }
    pixels
}
