//! Bitmap text for labels
//!
//! Glyphs come from the 8x8 `font8x8` set and are scaled so one glyph cell
//! is `font_size` pixels square.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

/// Pixels per glyph side in the source font
const GLYPH_CELLS: u8 = 8;

/// Rendered width of `text` at `font_size`
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Characters missing from the font are drawn as `?`.
pub fn draw_text(pixmap: &mut Pixmap, text: &str, x: f32, y: f32, font_size: f32, paint: &Paint<'_>) {
    let cell = font_size / f32::from(GLYPH_CELLS);
    let mut pb = PathBuilder::new();
    let mut cursor_x = x;

    for ch in text.chars() {
        let glyph = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?'));
        if let Some(glyph) = glyph {
            for (row_idx, row_bits) in glyph.iter().enumerate() {
                for col_idx in 0..GLYPH_CELLS {
                    // Bit 0 is the leftmost pixel
                    if (row_bits >> col_idx) & 1 == 0 {
                        continue;
                    }
                    let px = cursor_x + f32::from(col_idx) * cell;
                    let py = y + row_idx as f32 * cell;
                    if let Some(rect) = Rect::from_xywh(px, py, cell, cell) {
                        pb.push_rect(rect);
                    }
                }
            }
        }
        cursor_x += font_size;
    }

    // One fill for the whole string so adjacent cells do not leave seams
    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}
