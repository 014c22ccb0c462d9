//! Decorative sprites: soft orbs, headline text and call-to-action buttons.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{ColorRgba, Point};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::fill_coverage;
use crate::geometry::outline::{circle_distance, rounded_rect_distance};
use crate::render::frame::TEAL;
use crate::render::sprite::{Sprite, padded_extent};
use crate::text::font::LabelFont;

/// Default headline color.
pub const DARK_GRAY: ColorRgba = ColorRgba::rgb(45, 55, 72);

/// Render a soft orb: concentric discs every two pixels, blended over each other from
/// the rim inward.
///
/// Disc `r` has alpha `peak_alpha * (radius - r) / radius`; inner pixels accumulate every
/// disc that covers them, so coverage builds up toward the center.
pub fn render_orb(radius: u32, color: ColorRgba, peak_alpha: u8) -> CompositorResult<Sprite> {
    if radius == 0 {
        return Err(CompositorError::invalid_dimension("orb radius must be > 0"));
    }
    let side = radius
        .checked_mul(2)
        .ok_or_else(|| CompositorError::invalid_dimension("orb radius is too large"))?;
    let mut sprite = Sprite::new(side, side)?;
    let center = Point::new(f64::from(radius), f64::from(radius));
    let bounds = sprite.bounds();

    for r in (1..=radius).rev().step_by(2) {
        let alpha = u32::from(peak_alpha) * (radius - r) / radius;
        if alpha == 0 {
            continue;
        }
        let disc = color.with_alpha(alpha as u8);
        let rf = f64::from(r);
        sprite.paint(bounds, disc, |p| fill_coverage(circle_distance(p, center, rf)));
    }
    Ok(sprite)
}

/// Drop shadow behind headline text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    /// Horizontal offset in pixels.
    pub offset_x: i32,
    /// Vertical offset in pixels.
    pub offset_y: i32,
    /// Shadow color.
    pub color: ColorRgba,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 2,
            offset_y: 2,
            color: ColorRgba::BLACK.with_alpha(50),
        }
    }
}

/// Headline text parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlineStyle {
    /// Text color.
    pub color: ColorRgba,
    /// Font size in pixels.
    pub font_size: f32,
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
}

impl Default for HeadlineStyle {
    fn default() -> Self {
        Self {
            color: DARK_GRAY,
            font_size: 56.0,
            shadow: Some(Shadow::default()),
        }
    }
}

/// Render a single line of text with an optional drop shadow.
pub fn render_headline(
    text: &str,
    font: &LabelFont,
    style: &HeadlineStyle,
) -> CompositorResult<Sprite> {
    validate_font_size(style.font_size)?;

    let extent = font.measure(text, style.font_size);
    let (sx, sy) = style
        .shadow
        .map(|s| (s.offset_x, s.offset_y))
        .unwrap_or((0, 0));
    let w = padded_extent(extent.width, 0, sx.unsigned_abs())?.max(1);
    let h = padded_extent(extent.height, 0, sy.unsigned_abs())?.max(1);
    let mut sprite = Sprite::new(w, h)?;

    let origin = Point::new(f64::from((-sx).max(0)), f64::from((-sy).max(0)));
    if let Some(shadow) = style.shadow {
        let at = Point::new(
            origin.x + f64::from(shadow.offset_x),
            origin.y + f64::from(shadow.offset_y),
        );
        font.draw(&mut sprite, text, style.font_size, at, shadow.color);
    }
    font.draw(&mut sprite, text, style.font_size, origin, style.color);
    Ok(sprite)
}

/// Call-to-action button parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Button fill.
    pub background: ColorRgba,
    /// Text color.
    pub text_color: ColorRgba,
    /// Font size in pixels.
    pub font_size: f32,
    /// Horizontal padding around the text.
    pub padding_x: u32,
    /// Vertical padding around the text.
    pub padding_y: u32,
    /// Corner radius; clamped to a pill shape.
    pub corner_radius: f64,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: TEAL,
            text_color: ColorRgba::WHITE,
            font_size: 28.0,
            padding_x: 40,
            padding_y: 15,
            corner_radius: 25.0,
        }
    }
}

/// Render a rounded button with centered text.
pub fn render_button(
    text: &str,
    font: &LabelFont,
    style: &ButtonStyle,
) -> CompositorResult<Sprite> {
    validate_font_size(style.font_size)?;
    if !style.corner_radius.is_finite() {
        return Err(CompositorError::validation(
            "button corner_radius must be finite",
        ));
    }

    let extent = font.measure(text, style.font_size);
    let w = padded_extent(extent.width, style.padding_x, 0)?;
    let h = padded_extent(extent.height, style.padding_y, 0)?;
    let mut sprite = Sprite::new(w, h)?;

    let body = sprite.bounds();
    let radius = style.corner_radius;
    sprite.paint(body, style.background, |p| {
        fill_coverage(rounded_rect_distance(p, body, radius))
    });

    let origin = Point::new(
        (f64::from(w) - extent.width) / 2.0,
        (f64::from(h) - extent.height) / 2.0,
    );
    font.draw(&mut sprite, text, style.font_size, origin, style.text_color);
    Ok(sprite)
}

fn validate_font_size(size: f32) -> CompositorResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(CompositorError::validation("font_size must be > 0"));
    }
    Ok(())
}
