use ab_glyph::{Font as _, ScaleFont as _};
use font8x8::UnicodeFonts as _;

use crate::foundation::core::{ColorRgba, Point};
use crate::render::sprite::Sprite;

/// Cell size of the built-in bitmap font, in font units.
const BUILTIN_CELL: u32 = 8;

/// Font used for labels, headlines and buttons.
///
/// [`LabelFont::Builtin`] is an 8x8 bitmap font compiled into the crate; it is the
/// fallback when no outline font is configured or the configured one fails to load.
#[derive(Clone, Default)]
pub enum LabelFont {
    /// TrueType/OpenType outline font.
    Outline(ab_glyph::FontArc),
    /// Built-in bitmap font, upscaled by whole pixels.
    #[default]
    Builtin,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("LabelFont::Outline(..)"),
            Self::Builtin => f.write_str("LabelFont::Builtin"),
        }
    }
}

/// Measured size of a line of text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Advance width of the line.
    pub width: f64,
    /// Line height (ascent + descent).
    pub height: f64,
}

impl LabelFont {
    /// Measure `text` as a single line at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> TextExtent {
        match self {
            Self::Outline(font) => {
                let scaled = font.as_scaled(ab_glyph::PxScale::from(size));
                let mut width = 0.0f32;
                let mut prev: Option<ab_glyph::GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                TextExtent {
                    width: f64::from(width.max(0.0)),
                    height: f64::from(scaled.ascent() - scaled.descent()),
                }
            }
            Self::Builtin => {
                let px = f64::from(builtin_scale(size)) * f64::from(BUILTIN_CELL);
                TextExtent {
                    width: px * text.chars().count() as f64,
                    height: px,
                }
            }
        }
    }

    /// Draw `text` with its line box's top-left corner at `origin`.
    pub(crate) fn draw(
        &self,
        sprite: &mut Sprite,
        text: &str,
        size: f32,
        origin: Point,
        color: ColorRgba,
    ) {
        match self {
            Self::Outline(font) => draw_outline(font, sprite, text, size, origin, color),
            Self::Builtin => draw_builtin(sprite, text, size, origin, color),
        }
    }
}

fn draw_outline(
    font: &ab_glyph::FontArc,
    sprite: &mut Sprite,
    text: &str,
    size: f32,
    origin: Point,
    color: ColorRgba,
) {
    let scale = ab_glyph::PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let baseline_y = origin.y as f32 + scaled.ascent();
    let mut cursor_x = origin.x as f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            cursor_x += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + i64::from(gx);
                let y = bounds.min.y as i64 + i64::from(gy);
                sprite.blend_pixel(x, y, color, f64::from(coverage));
            });
        }
        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
}

fn draw_builtin(sprite: &mut Sprite, text: &str, size: f32, origin: Point, color: ColorRgba) {
    let scale = i64::from(builtin_scale(size));
    let cell = scale * i64::from(BUILTIN_CELL);
    let ox = origin.x.round() as i64;
    let oy = origin.y.round() as i64;

    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = builtin_glyph(ch) else {
            continue;
        };
        let gx = ox + i as i64 * cell;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BUILTIN_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = gx + i64::from(col) * scale;
                let py = oy + row as i64 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        sprite.blend_pixel(px + dx, py + dy, color, 1.0);
                    }
                }
            }
        }
    }
}

fn builtin_scale(size: f32) -> u32 {
    if !size.is_finite() {
        return 1;
    }
    ((size / BUILTIN_CELL as f32).round() as u32).max(1)
}

fn builtin_glyph(ch: char) -> Option<[u8; 8]> {
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::LATIN_FONTS.get(ch))
        .or_else(|| font8x8::BASIC_FONTS.get('?'))
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
