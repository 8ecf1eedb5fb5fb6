//! Label font loading with a built-in fallback.
//!
//! Labels and titles prefer a real outline font from the host system, tried
//! from a short candidate list (DejaVu first). When none is available the
//! renderer falls back to a built-in 5×7 bitmap face scaled to the requested
//! pixel size, so a missing font degrades glyph quality but never fails a
//! render.

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

use super::blend_pixel;

/// System font files probed in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
];

/// Bitmap glyph cell geometry: 5×7 pixels plus one column of spacing.
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = 6;

/// Text rendering resource for labels and titles.
pub enum LabelFont {
    /// An outline font loaded from the host system.
    Outline(FontVec),
    /// Built-in bitmap face used when no system font could be loaded.
    Bitmap,
}

impl LabelFont {
    /// Load the first usable system font, falling back to the built-in
    /// bitmap face.
    pub fn load() -> Self {
        for path in FONT_CANDIDATES {
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    debug!(path, "loaded label font");
                    return LabelFont::Outline(font);
                }
                Err(e) => warn!(path, error = %e, "ignoring unreadable font file"),
            }
        }
        warn!("no system font found, falling back to built-in bitmap font");
        LabelFont::Bitmap
    }

    /// Measure rendered text at the given pixel size.
    pub fn text_size(&self, px: f32, text: &str) -> (u32, u32) {
        match self {
            LabelFont::Outline(font) => text_size(PxScale::from(px), font, text),
            LabelFont::Bitmap => {
                let s = bitmap_scale(px);
                let chars = text.chars().filter(|c| bitmap_glyph(*c).is_some()).count() as u32;
                if chars == 0 {
                    return (0, GLYPH_HEIGHT * s);
                }
                (chars * GLYPH_ADVANCE * s - s, GLYPH_HEIGHT * s)
            }
        }
    }

    /// Draw text with its top-left corner at `(x, y)`.
    ///
    /// Out-of-canvas portions are clipped. The bitmap face skips characters
    /// outside printable ASCII.
    pub fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        color: Rgba<u8>,
        x: i32,
        y: i32,
        px: f32,
        text: &str,
    ) {
        match self {
            LabelFont::Outline(font) => {
                draw_text_mut(canvas, color, x, y, PxScale::from(px), font, text);
            }
            LabelFont::Bitmap => {
                let s = bitmap_scale(px);
                let mut pen_x = x as i64;
                for ch in text.chars() {
                    let Some(glyph) = bitmap_glyph(ch) else {
                        continue;
                    };
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..GLYPH_WIDTH {
                            if bits & (0x10 >> col) == 0 {
                                continue;
                            }
                            // Scale each font pixel to an s×s block.
                            for dy in 0..s as i64 {
                                for dx in 0..s as i64 {
                                    blend_pixel(
                                        canvas,
                                        pen_x + col as i64 * s as i64 + dx,
                                        y as i64 + row as i64 * s as i64 + dy,
                                        color,
                                    );
                                }
                            }
                        }
                    }
                    pen_x += (GLYPH_ADVANCE * s) as i64;
                }
            }
        }
    }
}

/// Integer scale factor approximating the requested pixel size with 7 px
/// tall glyphs.
fn bitmap_scale(px: f32) -> u32 {
    (px / GLYPH_HEIGHT as f32).round().max(1.0) as u32
}

fn bitmap_glyph(ch: char) -> Option<&'static [u8; 7]> {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        return None;
    }
    Some(&BITMAP_GLYPHS[(code - 32) as usize])
}

/// 5×7 glyphs for printable ASCII. Each row's lower 5 bits are pixels,
/// MSB on the left.
#[rustfmt::skip]
const BITMAP_GLYPHS: [[u8; 7]; 95] = [
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00], // 32 ' '
    [0x04,0x04,0x04,0x04,0x04,0x00,0x04], // 33 '!'
    [0x0A,0x0A,0x0A,0x00,0x00,0x00,0x00], // 34 '"'
    [0x0A,0x0A,0x1F,0x0A,0x1F,0x0A,0x0A], // 35 '#'
    [0x04,0x0F,0x14,0x0E,0x05,0x1E,0x04], // 36 '$'
    [0x18,0x19,0x02,0x04,0x08,0x13,0x03], // 37 '%'
    [0x0C,0x12,0x14,0x08,0x15,0x12,0x0D], // 38 '&'
    [0x04,0x04,0x08,0x00,0x00,0x00,0x00], // 39 '''
    [0x02,0x04,0x08,0x08,0x08,0x04,0x02], // 40 '('
    [0x08,0x04,0x02,0x02,0x02,0x04,0x08], // 41 ')'
    [0x00,0x04,0x15,0x0E,0x15,0x04,0x00], // 42 '*'
    [0x00,0x04,0x04,0x1F,0x04,0x04,0x00], // 43 '+'
    [0x00,0x00,0x00,0x00,0x00,0x04,0x08], // 44 ','
    [0x00,0x00,0x00,0x1F,0x00,0x00,0x00], // 45 '-'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x04], // 46 '.'
    [0x00,0x01,0x02,0x04,0x08,0x10,0x00], // 47 '/'
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 48 '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 49 '1'
    [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F], // 50 '2'
    [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E], // 51 '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 52 '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 53 '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 54 '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 55 '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 56 '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 57 '9'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x00], // 58 ':'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x08], // 59 ';'
    [0x02,0x04,0x08,0x10,0x08,0x04,0x02], // 60 '<'
    [0x00,0x00,0x1F,0x00,0x1F,0x00,0x00], // 61 '='
    [0x08,0x04,0x02,0x01,0x02,0x04,0x08], // 62 '>'
    [0x0E,0x11,0x01,0x02,0x04,0x00,0x04], // 63 '?'
    [0x0E,0x11,0x17,0x15,0x17,0x10,0x0E], // 64 '@'
    [0x0E,0x11,0x11,0x1F,0x11,0x11,0x11], // 65 'A'
    [0x1E,0x11,0x11,0x1E,0x11,0x11,0x1E], // 66 'B'
    [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E], // 67 'C'
    [0x1C,0x12,0x11,0x11,0x11,0x12,0x1C], // 68 'D'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x1F], // 69 'E'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x10], // 70 'F'
    [0x0E,0x11,0x10,0x17,0x11,0x11,0x0F], // 71 'G'
    [0x11,0x11,0x11,0x1F,0x11,0x11,0x11], // 72 'H'
    [0x0E,0x04,0x04,0x04,0x04,0x04,0x0E], // 73 'I'
    [0x07,0x02,0x02,0x02,0x02,0x12,0x0C], // 74 'J'
    [0x11,0x12,0x14,0x18,0x14,0x12,0x11], // 75 'K'
    [0x10,0x10,0x10,0x10,0x10,0x10,0x1F], // 76 'L'
    [0x11,0x1B,0x15,0x15,0x11,0x11,0x11], // 77 'M'
    [0x11,0x11,0x19,0x15,0x13,0x11,0x11], // 78 'N'
    [0x0E,0x11,0x11,0x11,0x11,0x11,0x0E], // 79 'O'
    [0x1E,0x11,0x11,0x1E,0x10,0x10,0x10], // 80 'P'
    [0x0E,0x11,0x11,0x11,0x15,0x12,0x0D], // 81 'Q'
    [0x1E,0x11,0x11,0x1E,0x14,0x12,0x11], // 82 'R'
    [0x0F,0x10,0x10,0x0E,0x01,0x01,0x1E], // 83 'S'
    [0x1F,0x04,0x04,0x04,0x04,0x04,0x04], // 84 'T'
    [0x11,0x11,0x11,0x11,0x11,0x11,0x0E], // 85 'U'
    [0x11,0x11,0x11,0x11,0x11,0x0A,0x04], // 86 'V'
    [0x11,0x11,0x11,0x15,0x15,0x1B,0x11], // 87 'W'
    [0x11,0x11,0x0A,0x04,0x0A,0x11,0x11], // 88 'X'
    [0x11,0x11,0x0A,0x04,0x04,0x04,0x04], // 89 'Y'
    [0x1F,0x01,0x02,0x04,0x08,0x10,0x1F], // 90 'Z'
    [0x0E,0x08,0x08,0x08,0x08,0x08,0x0E], // 91 '['
    [0x00,0x10,0x08,0x04,0x02,0x01,0x00], // 92 '\'
    [0x0E,0x02,0x02,0x02,0x02,0x02,0x0E], // 93 ']'
    [0x04,0x0A,0x11,0x00,0x00,0x00,0x00], // 94 '^'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x1F], // 95 '_'
    [0x08,0x04,0x02,0x00,0x00,0x00,0x00], // 96 '`'
    [0x00,0x00,0x0E,0x01,0x0F,0x11,0x0F], // 97 'a'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x1E], // 98 'b'
    [0x00,0x00,0x0E,0x10,0x10,0x11,0x0E], // 99 'c'
    [0x01,0x01,0x0D,0x13,0x11,0x11,0x0F], // 100 'd'
    [0x00,0x00,0x0E,0x11,0x1F,0x10,0x0E], // 101 'e'
    [0x06,0x09,0x08,0x1C,0x08,0x08,0x08], // 102 'f'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x0E], // 103 'g'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x11], // 104 'h'
    [0x04,0x00,0x0C,0x04,0x04,0x04,0x0E], // 105 'i'
    [0x02,0x00,0x06,0x02,0x02,0x12,0x0C], // 106 'j'
    [0x10,0x10,0x12,0x14,0x18,0x14,0x12], // 107 'k'
    [0x0C,0x04,0x04,0x04,0x04,0x04,0x0E], // 108 'l'
    [0x00,0x00,0x1A,0x15,0x15,0x11,0x11], // 109 'm'
    [0x00,0x00,0x16,0x19,0x11,0x11,0x11], // 110 'n'
    [0x00,0x00,0x0E,0x11,0x11,0x11,0x0E], // 111 'o'
    [0x00,0x00,0x1E,0x11,0x1E,0x10,0x10], // 112 'p'
    [0x00,0x00,0x0D,0x13,0x0F,0x01,0x01], // 113 'q'
    [0x00,0x00,0x16,0x19,0x10,0x10,0x10], // 114 'r'
    [0x00,0x00,0x0E,0x10,0x0E,0x01,0x1E], // 115 's'
    [0x08,0x08,0x1C,0x08,0x08,0x09,0x06], // 116 't'
    [0x00,0x00,0x11,0x11,0x11,0x13,0x0D], // 117 'u'
    [0x00,0x00,0x11,0x11,0x11,0x0A,0x04], // 118 'v'
    [0x00,0x00,0x11,0x11,0x15,0x15,0x0A], // 119 'w'
    [0x00,0x00,0x11,0x0A,0x04,0x0A,0x11], // 120 'x'
    [0x00,0x00,0x11,0x11,0x0F,0x01,0x0E], // 121 'y'
    [0x00,0x00,0x1F,0x02,0x04,0x08,0x1F], // 122 'z'
    [0x02,0x04,0x04,0x08,0x04,0x04,0x02], // 123 '{'
    [0x04,0x04,0x04,0x04,0x04,0x04,0x04], // 124 '|'
    [0x08,0x04,0x04,0x02,0x04,0x04,0x08], // 125 '}'
    [0x00,0x00,0x08,0x15,0x02,0x00,0x00], // 126 '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_scale_tracks_pixel_size() {
        assert_eq!(bitmap_scale(7.0), 1);
        assert_eq!(bitmap_scale(14.0), 2);
        assert_eq!(bitmap_scale(48.0), 7);
        // Tiny sizes never collapse to zero.
        assert_eq!(bitmap_scale(1.0), 1);
    }

    #[test]
    fn test_bitmap_text_size() {
        let font = LabelFont::Bitmap;
        // Two glyphs at scale 1: 2 * 6 - 1 = 11 px wide, 7 px tall.
        assert_eq!(font.text_size(7.0, "#6"), (11, 7));
        assert_eq!(font.text_size(14.0, "#6"), (22, 14));
    }

    #[test]
    fn test_bitmap_skips_non_ascii() {
        let font = LabelFont::Bitmap;
        let (w, _) = font.text_size(7.0, "日本#6");
        assert_eq!(w, 11);
    }

    #[test]
    fn test_bitmap_draw_marks_pixels() {
        let font = LabelFont::Bitmap;
        let mut canvas = RgbaImage::from_pixel(32, 16, Rgba([0, 0, 0, 255]));
        font.draw_text(&mut canvas, Rgba([255, 255, 255, 255]), 0, 0, 7.0, "#");
        assert!(canvas.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_bitmap_draw_clips_at_edges() {
        let font = LabelFont::Bitmap;
        let mut canvas = RgbaImage::new(4, 4);
        // Partially and fully off-canvas draws must not panic.
        font.draw_text(&mut canvas, Rgba([255, 0, 0, 255]), -3, -3, 7.0, "#8");
        font.draw_text(&mut canvas, Rgba([255, 0, 0, 255]), 100, 100, 7.0, "#8");
    }

    #[test]
    fn test_empty_text_measures_zero_width() {
        let font = LabelFont::Bitmap;
        let (w, h) = font.text_size(7.0, "");
        assert_eq!(w, 0);
        assert_eq!(h, 7);
    }

    #[test]
    fn test_load_always_yields_a_usable_font() {
        // Whatever the host has installed, load() must hand back something
        // that can measure and draw.
        let font = LabelFont::load();
        let mut canvas = RgbaImage::new(64, 32);
        let (w, h) = font.text_size(14.0, "#12");
        assert!(w > 0);
        assert!(h > 0);
        font.draw_text(&mut canvas, Rgba([0, 0, 139, 255]), 2, 2, 14.0, "#12");
    }
}
