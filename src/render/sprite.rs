use image::RgbaImage;

use crate::foundation::core::{ColorRgba, Point, PremulRgba8, Rect};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::{over, premultiply_rgba8_in_place};
use crate::geometry::outline::pixel_center;

/// Largest width or height a sprite may have.
pub const MAX_SPRITE_DIMENSION: u32 = 32_768;

/// Premultiplied RGBA8 image with transparent background, ready to be composited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

/// Sprite produced by the frame renderer.
pub type BubbleSprite = Sprite;
/// Sprite produced by the speech-bubble renderer.
pub type SpeechBubbleSprite = Sprite;

impl Sprite {
    /// Fully transparent sprite.
    pub fn new(width: u32, height: u32) -> CompositorResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            rgba8_premul: vec![0; len],
        })
    }

    /// Sprite from a straight-alpha image.
    pub fn from_rgba_image(image: &RgbaImage) -> CompositorResult<Self> {
        buffer_len(image.width(), image.height())?;
        let mut rgba8_premul = image.as_raw().clone();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba8_premul,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8, row-major, tightly packed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`; `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.rgba8_premul[i],
            self.rgba8_premul[i + 1],
            self.rgba8_premul[i + 2],
            self.rgba8_premul[i + 3],
        ])
    }

    /// Whether every pixel has zero alpha.
    pub fn is_fully_transparent(&self) -> bool {
        self.rgba8_premul.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Bounds as a rectangle in sprite space.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Blend `color` over the pixel at `(x, y)` with alpha scaled by `coverage`.
    /// Out-of-bounds pixels are ignored.
    pub(crate) fn blend_pixel(&mut self, x: i64, y: i64, color: ColorRgba, coverage: f64) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        let src = color.to_premul_scaled(coverage);
        if src[3] == 0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let dst = [
            self.rgba8_premul[i],
            self.rgba8_premul[i + 1],
            self.rgba8_premul[i + 2],
            self.rgba8_premul[i + 3],
        ];
        self.rgba8_premul[i..i + 4].copy_from_slice(&over(dst, src));
    }

    /// Paint `color` over every pixel in `area` using the coverage returned by
    /// `coverage_at` for the pixel center.
    pub(crate) fn paint(
        &mut self,
        area: Rect,
        color: ColorRgba,
        coverage_at: impl Fn(Point) -> f64,
    ) {
        let clipped = area.intersect(self.bounds());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return;
        }
        let x0 = clipped.x0.floor() as i64;
        let y0 = clipped.y0.floor() as i64;
        let x1 = clipped.x1.ceil() as i64;
        let y1 = clipped.y1.ceil() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage_at(pixel_center(x, y));
                self.blend_pixel(x, y, color, c);
            }
        }
    }

    /// Copy straight-alpha `image` into the sprite at `(x, y)`, replacing what is there.
    pub(crate) fn put_image(&mut self, image: &RgbaImage, x: u32, y: u32) {
        for (ix, iy, px) in image.enumerate_pixels() {
            let (dx, dy) = (x + ix, y + iy);
            if dx >= self.width || dy >= self.height {
                continue;
            }
            let i = (dy as usize * self.width as usize + dx as usize) * 4;
            let [r, g, b, a] = px.0;
            self.rgba8_premul[i..i + 4].copy_from_slice(&ColorRgba::rgba(r, g, b, a).to_premul());
        }
    }
}

/// Pixel size holding `content` plus `pad` on both sides and `extra` once.
pub(crate) fn padded_extent(content: f64, pad: u32, extra: u32) -> CompositorResult<u32> {
    let total = content.max(0.0).ceil() + 2.0 * f64::from(pad) + f64::from(extra);
    if !total.is_finite() || total > f64::from(MAX_SPRITE_DIMENSION) {
        return Err(CompositorError::invalid_dimension(format!(
            "sprite extent {total} exceeds {MAX_SPRITE_DIMENSION}"
        )));
    }
    Ok(total as u32)
}

fn buffer_len(width: u32, height: u32) -> CompositorResult<usize> {
    if width == 0 || height == 0 {
        return Err(CompositorError::invalid_dimension(format!(
            "sprite size must be > 0, got {width}x{height}"
        )));
    }
    if width > MAX_SPRITE_DIMENSION || height > MAX_SPRITE_DIMENSION {
        return Err(CompositorError::invalid_dimension(format!(
            "sprite size {width}x{height} exceeds {MAX_SPRITE_DIMENSION}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CompositorError::invalid_dimension("sprite buffer size overflow"))
}
