use serde::{Deserialize, Serialize};

use crate::foundation::core::{ColorRgba, Point, Rect};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::{band_coverage, fill_coverage, mul_div255_u8};
use crate::geometry::outline::rounded_rect_distance;
use crate::render::frame::TEAL;
use crate::render::sprite::{SpeechBubbleSprite, Sprite, padded_extent};
use crate::text::font::LabelFont;

/// Speech-bubble label parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Body and tail fill.
    pub background: ColorRgba,
    /// Text color.
    pub text_color: ColorRgba,
    /// Font size in pixels.
    pub font_size: f32,
    /// Horizontal space between text and body edge.
    pub padding_x: u32,
    /// Vertical space between text and body edge.
    pub padding_y: u32,
    /// Corner radius of the body.
    pub corner_radius: f64,
    /// Height of the pointer tail below the body.
    pub tail_height: u32,
    /// Half of the tail's base width.
    pub tail_half_width: u32,
    /// Opacity applied on top of `background`'s own alpha.
    pub body_alpha: u8,
    /// Canvas tone; a body of this color gets an `accent` stroke so it stays visible.
    pub neutral: ColorRgba,
    /// Stroke color for neutral bodies.
    pub accent: ColorRgba,
    /// Stroke thickness for neutral bodies.
    pub stroke_width: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            background: TEAL,
            text_color: ColorRgba::WHITE,
            font_size: 24.0,
            padding_x: 20,
            padding_y: 12,
            corner_radius: 15.0,
            tail_height: 15,
            tail_half_width: 10,
            body_alpha: 230,
            neutral: ColorRgba::WHITE,
            accent: TEAL,
            stroke_width: 2.0,
        }
    }
}

impl LabelStyle {
    /// Default geometry with the given colors and size.
    pub fn new(background: ColorRgba, text_color: ColorRgba, font_size: f32) -> Self {
        Self {
            background,
            text_color,
            font_size,
            ..Self::default()
        }
    }

    /// Reject unusable sizes.
    pub fn validate(&self) -> CompositorResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CompositorError::validation("label font_size must be > 0"));
        }
        if !self.corner_radius.is_finite() || !self.stroke_width.is_finite() {
            return Err(CompositorError::validation(
                "label corner_radius and stroke_width must be finite",
            ));
        }
        Ok(())
    }

    fn needs_stroke(&self) -> bool {
        self.background.same_rgb(self.neutral) && self.stroke_width > 0.0
    }
}

/// Render a rounded-rectangle speech bubble with a downward tail and centered text.
///
/// The sprite is `body + tail_height` tall; the body wraps the measured text plus padding.
pub fn render_label(
    text: &str,
    font: &LabelFont,
    style: &LabelStyle,
) -> CompositorResult<SpeechBubbleSprite> {
    style.validate()?;

    let extent = font.measure(text, style.font_size);
    let body_w = padded_extent(extent.width, style.padding_x, 0)?;
    let body_h = padded_extent(extent.height, style.padding_y, 0)?;
    let total_h = padded_extent(f64::from(body_h), 0, style.tail_height)?;
    let mut sprite = Sprite::new(body_w, total_h)?;

    let body = Rect::new(0.0, 0.0, f64::from(body_w), f64::from(body_h));
    let tail = Tail {
        center_x: f64::from(body_w) / 2.0,
        base_y: f64::from(body_h) - 2.0,
        tip_y: f64::from(total_h),
        half_width: f64::from(style.tail_half_width),
    };

    let fill = style
        .background
        .with_alpha(mul_div255_u8(u16::from(style.background.a), u16::from(style.body_alpha)));
    let radius = style.corner_radius;
    sprite.paint(sprite.bounds(), fill, |p| {
        let body_cov = fill_coverage(rounded_rect_distance(p, body, radius));
        if style.tail_height == 0 {
            return body_cov;
        }
        body_cov.max(tail.coverage(p))
    });

    if style.needs_stroke() {
        let width = style.stroke_width;
        sprite.paint(body, style.accent, |p| {
            band_coverage(rounded_rect_distance(p, body, radius), -width, 0.0)
        });
    }

    let origin = Point::new(
        (f64::from(body_w) - extent.width) / 2.0,
        (f64::from(body_h) - extent.height) / 2.0,
    );
    font.draw(&mut sprite, text, style.font_size, origin, style.text_color);

    Ok(sprite)
}

/// Isosceles triangle pointing down.
#[derive(Clone, Copy, Debug)]
struct Tail {
    center_x: f64,
    base_y: f64,
    tip_y: f64,
    half_width: f64,
}

impl Tail {
    fn coverage(&self, p: Point) -> f64 {
        let height = self.tip_y - self.base_y;
        if height <= 0.0 || p.y < self.base_y || p.y > self.tip_y {
            return 0.0;
        }
        let half = self.half_width * (self.tip_y - p.y) / height;
        fill_coverage((p.x - self.center_x).abs() - half)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
