use std::{io::Cursor, path::Path};

use anyhow::Context as _;
use image::{RgbImage, RgbaImage};

use crate::foundation::core::{ColorRgba, PremulRgba8};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::foundation::math::{mul_div255_u8, premultiply_rgba8_in_place};

/// Mutable premultiplied RGBA8 drawing surface for one layout run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl Canvas {
    /// Canvas filled with `color`.
    pub fn new(width: u32, height: u32, color: ColorRgba) -> CompositorResult<Self> {
        let len = canvas_len(width, height)?;
        let px = color.to_premul();
        let mut rgba8_premul = Vec::with_capacity(len);
        for _ in 0..(len / 4) {
            rgba8_premul.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// Canvas with a top-to-bottom linear gradient. Row `y` uses `t = y / height`.
    pub fn vertical_gradient(
        width: u32,
        height: u32,
        top: ColorRgba,
        bottom: ColorRgba,
    ) -> CompositorResult<Self> {
        let len = canvas_len(width, height)?;
        let mut rgba8_premul = Vec::with_capacity(len);
        for y in 0..height {
            let t = f64::from(y) / f64::from(height);
            let px = top.lerp(bottom, t).to_premul();
            for _ in 0..width {
                rgba8_premul.extend_from_slice(&px);
            }
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// Canvas initialized from a straight-alpha image of any size.
    pub fn from_image(image: &RgbaImage) -> CompositorResult<Self> {
        canvas_len(image.width(), image.height())?;
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

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.rgba8_premul
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

    /// Composite the canvas over an opaque `matte` and return the opaque result.
    ///
    /// Consumes the canvas: a run is finalized exactly once.
    pub fn flatten(self, matte: ColorRgba) -> RgbImage {
        let matte = [matte.r, matte.g, matte.b];
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.rgba8_premul.chunks_exact(4) {
            let inv = 255u16 - u16::from(px[3]);
            for c in 0..3 {
                out.push(px[c].saturating_add(mul_div255_u8(u16::from(matte[c]), inv)));
            }
        }
        // Length is width * height * 3 by construction.
        RgbImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}

/// Encode an opaque image as PNG.
pub fn encode_png(image: &RgbImage) -> CompositorResult<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode `image` as PNG and write it to `path`, creating parent directories.
pub fn write_png(image: &RgbImage, path: &Path) -> CompositorResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

fn canvas_len(width: u32, height: u32) -> CompositorResult<usize> {
    if width == 0 || height == 0 {
        return Err(CompositorError::invalid_dimension(format!(
            "canvas size must be > 0, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CompositorError::invalid_dimension("canvas buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
