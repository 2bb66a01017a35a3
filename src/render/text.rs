//! Text measurement for the built-in 8x8 monospace font.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use log::trace;

/// Native glyph cell size in pixels.
pub(crate) const GLYPH_SIZE: f32 = 8.0;

const MISSING_GLYPH: [u8; 8] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

/// Measures rendered text.
pub trait TextMeasurer {
    /// Return `(width, height)` of `text` at `size` pixels.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Measurer for the bitmap font used by the raster backend.
///
/// Every character occupies the same square cell, scaled by an integer factor
/// so that glyphs stay crisp.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let cell = GLYPH_SIZE * glyph_scale(size) as f32;
        let mut columns = 0usize;
        let mut rows = 0usize;
        for line in text.lines() {
            columns = columns.max(line.chars().count());
            rows += 1;
        }
        (columns as f32 * cell, rows as f32 * cell)
    }
}

/// Integer scale applied to the 8px glyphs for a font size.
pub(crate) fn glyph_scale(size: f32) -> u32 {
    if !size.is_finite() {
        trace!("font size {size} is not finite, using {GLYPH_SIZE}px");
        return 1;
    }
    let scale = (size / GLYPH_SIZE).round().max(1.0) as u32;
    let snapped = GLYPH_SIZE * scale as f32;
    if snapped != size {
        trace!("font size {size}px snapped to {snapped}px");
    }
    scale
}

/// Bitmap rows for a character; bit 0 is the leftmost pixel.
pub(crate) fn glyph(ch: char) -> [u8; 8] {
    if ch == ' ' {
        return [0; 8];
    }
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .unwrap_or(MISSING_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_counts_characters() {
        let measurer = MonospaceMeasurer;
        assert_eq!(measurer.measure("Utrecht", 8.0), (56.0, 8.0));
        assert_eq!(measurer.measure("", 8.0), (0.0, 0.0));
        assert_eq!(measurer.measure("ab\nlonger", 8.0), (48.0, 16.0));
    }

    #[test]
    fn size_snaps_to_integer_scale() {
        assert_eq!(glyph_scale(8.0), 1);
        assert_eq!(glyph_scale(3.0), 1);
        assert_eq!(glyph_scale(16.0), 2);
        assert_eq!(glyph_scale(f32::NAN), 1);
        assert_eq!(MonospaceMeasurer.measure("x", 16.0), (16.0, 16.0));
        assert_eq!(MonospaceMeasurer.measure("x", 12.0), (16.0, 16.0));
        assert_eq!(MonospaceMeasurer.measure("x", 11.0), (8.0, 8.0));
    }

    #[test]
    fn glyph_lookup_falls_back() {
        assert_ne!(glyph('A'), [0; 8]);
        assert_eq!(glyph(' '), [0; 8]);
        assert_eq!(glyph('\u{4E2D}'), MISSING_GLYPH);
    }
}
