//! Text rendering for label images.
//!
//! Text is drawn with a TTF/OTF font when one could be loaded, otherwise
//! with the built-in 8x8 bitmap font scaled up to the requested size.
//! Callers position text identically in both cases; long lines are clipped
//! at the canvas edge rather than re-flowed.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::UnicodeFonts;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, warn};

/// Cell size of the built-in bitmap font in pixels.
const BUILTIN_CELL: u32 = 8;

/// A font usable for label text.
pub enum LabelFont {
    Vector(FontVec),
    Builtin,
}

impl LabelFont {
    /// Parse TTF/OTF bytes, falling back to the built-in font when no data
    /// is given or the data cannot be parsed.
    pub fn load(data: Option<Vec<u8>>) -> Self {
        let Some(bytes) = data else {
            debug!("No font data available, using built-in font");
            return Self::Builtin;
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => Self::Vector(font),
            Err(e) => {
                warn!("Failed to parse font data ({e}), using built-in font");
                Self::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

/// Regular and bold faces used on a label.
pub struct LabelFonts {
    pub regular: LabelFont,
    pub bold: LabelFont,
}

impl LabelFonts {
    /// Load both faces. A missing bold face reuses the regular font data.
    pub fn load(regular: Option<Vec<u8>>, bold: Option<Vec<u8>>) -> Self {
        let bold = bold.or_else(|| regular.clone());
        Self {
            regular: LabelFont::load(regular),
            bold: LabelFont::load(bold),
        }
    }

    /// Both faces set to the built-in bitmap font.
    pub fn builtin() -> Self {
        Self {
            regular: LabelFont::Builtin,
            bold: LabelFont::Builtin,
        }
    }
}

/// Measure the pixel width of a string at the given font and pixel size.
pub fn measure_text_width(font: &LabelFont, size: f32, text: &str) -> u32 {
    match font {
        LabelFont::Vector(f) => vector_text_width(f, PxScale::from(size), text),
        LabelFont::Builtin => text.chars().count() as u32 * BUILTIN_CELL * builtin_factor(size),
    }
}

fn vector_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Draw `text` with its top-left corner at (`x`, `y`).
pub fn draw_text(
    img: &mut RgbImage,
    font: &LabelFont,
    size: f32,
    x: i32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    match font {
        LabelFont::Vector(f) => draw_text_mut(img, color, x, y, PxScale::from(size), f, text),
        LabelFont::Builtin => draw_builtin_text(img, builtin_factor(size), x, y, text, color),
    }
}

/// Draw text horizontally centred on the canvas.
pub fn draw_centered_text(
    img: &mut RgbImage,
    font: &LabelFont,
    size: f32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    let text_width = measure_text_width(font, size, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text(img, font, size, x, y, text, color);
}

/// Integer magnification applied to the 8x8 cell for a requested size.
fn builtin_factor(size: f32) -> u32 {
    ((size / BUILTIN_CELL as f32).round() as u32).max(1)
}

fn draw_builtin_text(img: &mut RgbImage, factor: u32, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let advance = (BUILTIN_CELL * factor) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        if ch == '\n' {
            continue;
        }
        let glyph = font8x8::BASIC_FONTS
            .get(ch)
            .or_else(|| font8x8::LATIN_FONTS.get(ch))
            .unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BUILTIN_CELL {
                if (bits >> col) & 1 == 1 {
                    let px = cursor_x + (col * factor) as i32;
                    let py = y + (row as u32 * factor) as i32;
                    fill_block(img, px, py, factor, color);
                }
            }
        }
        cursor_x = cursor_x.saturating_add(advance);
    }
}

fn fill_block(img: &mut RgbImage, x: i32, y: i32, size: u32, color: Rgb<u8>) {
    for dy in 0..size as i32 {
        for dx in 0..size as i32 {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
