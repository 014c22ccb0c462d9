use image::RgbaImage;

use crate::foundation::core::Rect;
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::mul_div255_u8;
use crate::geometry::outline::{ShapeOutline, pixel_center};

/// Clip shape of a framed photo.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Circle inscribed in the target rectangle (radius = half the shorter side).
    #[default]
    Circle,
    /// Rectangle with quarter-circle corners.
    RoundedRect {
        /// Corner radius in pixels, clamped to half the shorter side.
        corner_radius: f64,
    },
}

/// Single-channel coverage buffer, `0` = clipped, `255` = kept.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    shape: Shape,
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl Mask {
    /// Shape the mask was generated from.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major coverage values.
    pub fn as_slice(&self) -> &[u8] {
        &self.coverage
    }

    /// Coverage at `(x, y)`; `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.coverage
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Number of pixels with nonzero coverage.
    pub fn covered_pixels(&self) -> usize {
        self.coverage.iter().filter(|&&c| c != 0).count()
    }

    /// Multiply the alpha channel of `image` by this mask, producing a new image.
    pub fn apply(&self, image: &RgbaImage) -> CompositorResult<RgbaImage> {
        if image.dimensions() != (self.width, self.height) {
            return Err(CompositorError::invalid_dimension(format!(
                "mask is {}x{} but image is {}x{}",
                self.width,
                self.height,
                image.width(),
                image.height()
            )));
        }

        let mut out = image.clone();
        for (px, &c) in out.pixels_mut().zip(self.coverage.iter()) {
            px.0[3] = mul_div255_u8(u16::from(px.0[3]), u16::from(c));
        }
        Ok(out)
    }
}

/// Generate a hard-edged coverage mask for `shape` filling a `width` x `height` box.
///
/// A pixel is covered when its center lies inside the shape.
pub fn generate_mask(shape: Shape, width: u32, height: u32) -> CompositorResult<Mask> {
    if width == 0 || height == 0 {
        return Err(CompositorError::invalid_dimension(format!(
            "mask size must be > 0, got {width}x{height}"
        )));
    }
    if let Shape::RoundedRect { corner_radius } = shape
        && !corner_radius.is_finite()
    {
        return Err(CompositorError::validation(
            "rounded rect corner radius must be finite",
        ));
    }

    let outline = ShapeOutline::new(
        shape,
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
    );

    let mut coverage = vec![0u8; width as usize * height as usize];
    for (y, row) in coverage.chunks_exact_mut(width as usize).enumerate() {
        for (x, c) in row.iter_mut().enumerate() {
            if outline.signed_distance(pixel_center(x as i64, y as i64)) <= 0.0 {
                *c = 255;
            }
        }
    }

    Ok(Mask {
        shape,
        width,
        height,
        coverage,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mask.rs"]
mod tests;
