//! Bitmap text rendering on RGBA canvases
//!
//! Uses the 8x8 monospace bitmap font with integer scaling. Glyphs are
//! alpha-blended and clipped at the canvas edges, so callers never need
//! to pre-measure against the canvas bounds.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// Edge length of one unscaled glyph cell, in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Pixel width of `text` at the given integer scale.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Draw `text` with its top-left corner at (x, y).
///
/// Characters outside the basic ASCII range render as blank cells.
/// Pixels that fall outside the canvas are skipped.
pub fn draw_text(canvas: &mut RgbaImage, text: &str, x: i32, y: i32, scale: u32, color: Rgba<u8>) {
    let scale = scale.max(1) as i32;
    for (char_index, ch) in text.chars().enumerate() {
        let glyph = match BASIC_FONTS.get(ch) {
            Some(glyph) => glyph,
            None => continue,
        };
        let glyph_x = x + char_index as i32 * GLYPH_SIZE as i32 * scale;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE as i32 {
                if bits >> col & 1 == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = glyph_x + col * scale + dx;
                        let py = y + row as i32 * scale + dy;
                        blend_pixel(canvas, px, py, color);
                    }
                }
            }
        }
    }
}

/// Draw `text` horizontally centered on `center_x`.
pub fn draw_text_centered(
    canvas: &mut RgbaImage,
    text: &str,
    center_x: i32,
    y: i32,
    scale: u32,
    color: Rgba<u8>,
) {
    let x = center_x - text_width(text, scale) as i32 / 2;
    draw_text(canvas, text, x, y, scale, color);
}

fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let alpha = color.0[3] as u32;
    if alpha == 255 {
        *dst = color;
        return;
    }
    for channel in 0..3 {
        let src = color.0[channel] as u32;
        let bg = dst.0[channel] as u32;
        dst.0[channel] = ((src * alpha + bg * (255 - alpha)) / 255) as u8;
    }
    dst.0[3] = dst.0[3].max(color.0[3]);
}
