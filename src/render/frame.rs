use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{ColorRgba, Point, Rect};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::band_coverage;
use crate::geometry::mask::Mask;
use crate::geometry::outline::{ShapeOutline, pixel_center};
use crate::render::sprite::{BubbleSprite, Sprite, padded_extent};

/// Brand teal used by the default frame and label palette.
pub const TEAL: ColorRgba = ColorRgba::rgb(0, 150, 136);
/// Lighter teal, outer edge of the default border gradient.
pub const TEAL_LIGHT: ColorRgba = ColorRgba::rgb(77, 182, 172);
/// Darker teal.
pub const TEAL_DARK: ColorRgba = ColorRgba::rgb(0, 121, 107);

/// Largest accepted `border_width`.
pub const MAX_BORDER_WIDTH: u32 = 1024;
/// Largest accepted `ring_count`.
pub const MAX_RING_COUNT: u32 = 4096;

/// Glass-bubble frame parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    /// Color of the glow rings; its alpha is ignored in favor of `glow_peak_alpha`.
    pub glow_color: ColorRgba,
    /// Alpha of the innermost glow ring. Outer rings fade linearly toward zero.
    pub glow_peak_alpha: u8,
    /// Number of glow rings.
    pub ring_count: u32,
    /// Radial thickness of each glow ring, in pixels.
    pub ring_step: f64,
    /// Border color at its outer edge.
    pub border_color: ColorRgba,
    /// Border color at its inner edge; `None` draws a solid border.
    pub border_inner_color: Option<ColorRgba>,
    /// Border thickness in pixels.
    pub border_width: u32,
    /// Alpha of the specular highlight arc; `0` disables it.
    pub highlight_alpha: u8,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            glow_color: TEAL,
            glow_peak_alpha: 48,
            ring_count: 10,
            ring_step: 1.0,
            border_color: TEAL_LIGHT,
            border_inner_color: Some(TEAL),
            border_width: 4,
            highlight_alpha: 100,
        }
    }
}

impl FrameStyle {
    /// Margin added on every side of the photo to hold the border and glow.
    pub fn glow_padding(&self) -> u32 {
        let glow = (f64::from(self.ring_count) * self.ring_step).ceil();
        self.border_width.saturating_add(glow.max(0.0) as u32)
    }

    /// Alpha of glow ring `index`, `0` being the ring closest to the photo.
    pub fn ring_alpha(&self, index: u32) -> u8 {
        if index >= self.ring_count {
            return 0;
        }
        let remaining = u64::from(self.glow_peak_alpha) * u64::from(self.ring_count - index);
        (remaining / u64::from(self.ring_count)) as u8
    }

    /// Reject non-finite or non-positive ring steps and oversized borders or glows.
    pub fn validate(&self) -> CompositorResult<()> {
        if self.border_width > MAX_BORDER_WIDTH {
            return Err(CompositorError::validation(format!(
                "frame border_width must be <= {MAX_BORDER_WIDTH}, got {}",
                self.border_width
            )));
        }
        if self.ring_count > MAX_RING_COUNT {
            return Err(CompositorError::validation(format!(
                "frame ring_count must be <= {MAX_RING_COUNT}, got {}",
                self.ring_count
            )));
        }
        if !self.ring_step.is_finite() || self.ring_step <= 0.0 {
            return Err(CompositorError::validation(
                "frame ring_step must be finite and > 0",
            ));
        }
        if f64::from(self.ring_count) * self.ring_step > 4096.0 {
            return Err(CompositorError::validation("frame glow is unreasonably wide"));
        }
        Ok(())
    }

    fn border_color_at(&self, depth: u32) -> ColorRgba {
        // depth 0 is the outermost border stroke.
        match self.border_inner_color {
            Some(inner) if self.border_width > 1 => {
                let t = f64::from(depth) / f64::from(self.border_width);
                self.border_color.lerp(inner, t)
            }
            _ => self.border_color,
        }
    }
}

/// Render `photo`, clipped by `mask`, inside a glass bubble.
///
/// The sprite is `photo + 2 * glow_padding` on each axis. Paint order is photo, glow
/// rings, border, highlight.
pub fn render_bubble(
    photo: &RgbaImage,
    mask: &Mask,
    style: &FrameStyle,
) -> CompositorResult<BubbleSprite> {
    let (w, h) = photo.dimensions();
    if w == 0 || h == 0 {
        return Err(CompositorError::invalid_dimension("bubble photo has no pixels"));
    }
    if (mask.width(), mask.height()) != (w, h) {
        return Err(CompositorError::invalid_dimension(format!(
            "bubble mask is {}x{} but photo is {w}x{h}",
            mask.width(),
            mask.height()
        )));
    }
    style.validate()?;

    let pad = style.glow_padding();
    let mut sprite = Sprite::new(
        padded_extent(f64::from(w), pad, 0)?,
        padded_extent(f64::from(h), pad, 0)?,
    )?;

    let clipped = mask.apply(photo)?;
    sprite.put_image(&clipped, pad, pad);

    let pad_f = f64::from(pad);
    let outline = ShapeOutline::new(
        mask.shape(),
        Rect::new(pad_f, pad_f, pad_f + f64::from(w), pad_f + f64::from(h)),
    );

    paint_glow_and_border(&mut sprite, &outline, style);

    if style.highlight_alpha > 0 {
        paint_highlight(&mut sprite, &outline, style.highlight_alpha);
    }

    Ok(sprite)
}

fn paint_glow_and_border(sprite: &mut Sprite, outline: &ShapeOutline, style: &FrameStyle) {
    let border = f64::from(style.border_width);
    let glow_end = border + f64::from(style.ring_count) * style.ring_step;

    for y in 0..i64::from(sprite.height()) {
        for x in 0..i64::from(sprite.width()) {
            let d = outline.signed_distance(pixel_center(x, y));
            if d < 0.0 || d >= glow_end {
                continue;
            }
            if d < border {
                let depth = style.border_width - 1 - (d.floor() as u32).min(style.border_width - 1);
                sprite.blend_pixel(x, y, style.border_color_at(depth), 1.0);
            } else {
                let ring = ((d - border) / style.ring_step).floor() as u32;
                let alpha = style.ring_alpha(ring);
                sprite.blend_pixel(x, y, style.glow_color.with_alpha(alpha), 1.0);
            }
        }
    }
}

fn paint_highlight(sprite: &mut Sprite, outline: &ShapeOutline, alpha: u8) {
    let rect = outline.rect;
    let short = rect.width().min(rect.height());
    let center = Point::new(
        rect.center().x - 0.1 * rect.width(),
        rect.center().y - 0.1 * rect.height(),
    );
    let radius = 0.325 * short;
    let half_width = (short / 80.0).max(1.0);
    let color = ColorRgba::WHITE.with_alpha(alpha);

    sprite.paint(rect, color, |p| {
        if outline.signed_distance(p) > -half_width {
            return 0.0;
        }
        let v = p - center;
        let angle = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
        if !(200.0..=280.0).contains(&angle) {
            return 0.0;
        }
        band_coverage(v.hypot() - radius, -half_width, half_width)
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
