use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::{CompositorError, CompositorResult};

/// Default upward bias: the crop window's top sits a quarter of the vertical slack
/// below the source's top edge. Portrait faces tend to sit in the upper part of
/// the frame.
pub const DEFAULT_VERTICAL_BIAS: f64 = 0.25;

/// Source-space rectangle selected by [`crop_window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Window width in source pixels.
    pub width: u32,
    /// Window height in source pixels.
    pub height: u32,
}

/// Largest window with the target aspect ratio inside the source, centered
/// horizontally and shifted up from the vertical center by
/// `vertical_bias * (source_height - window_height)`.
pub fn crop_window(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
    vertical_bias: f64,
) -> CompositorResult<CropWindow> {
    if target_width == 0 || target_height == 0 {
        return Err(CompositorError::invalid_dimension(format!(
            "normalize target must be > 0, got {target_width}x{target_height}"
        )));
    }
    if source_width == 0 || source_height == 0 {
        return Err(CompositorError::invalid_dimension(format!(
            "source image has no pixels ({source_width}x{source_height})"
        )));
    }
    if !vertical_bias.is_finite() {
        return Err(CompositorError::validation("vertical bias must be finite"));
    }

    let (sw, sh) = (u64::from(source_width), u64::from(source_height));
    let (tw, th) = (u64::from(target_width), u64::from(target_height));

    // Compare aspect ratios without floating point: sw/sh >= tw/th.
    let (width, height) = if sw * th >= sh * tw {
        ((sh * tw / th).clamp(1, sw), sh)
    } else {
        (sw, (sw * th / tw).clamp(1, sh))
    };

    let x = (sw - width) / 2;
    let slack = (sh - height) as f64;
    let centered = slack / 2.0;
    let y = (centered - vertical_bias * slack).round().clamp(0.0, slack) as u64;

    Ok(CropWindow {
        x: x as u32,
        y: y as u32,
        width: width as u32,
        height: height as u32,
    })
}

/// Crop `image` to the target aspect ratio (see [`crop_window`]) and resize it to exactly
/// `target_width` x `target_height` with a Lanczos3 filter.
///
/// A zero-sized source is reported as [`CompositorError::ImageLoad`]; the layout engine
/// treats that like any unreadable asset.
pub fn normalize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    vertical_bias: f64,
) -> CompositorResult<RgbaImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CompositorError::image_load(
            "<in-memory>",
            "source image has no pixels",
        ));
    }

    let window = crop_window(
        image.width(),
        image.height(),
        target_width,
        target_height,
        vertical_bias,
    )?;

    let cropped =
        image::imageops::crop_imm(image, window.x, window.y, window.width, window.height)
            .to_image();
    if cropped.dimensions() == (target_width, target_height) {
        return Ok(cropped);
    }
    Ok(image::imageops::resize(
        &cropped,
        target_width,
        target_height,
        FilterType::Lanczos3,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/normalize.rs"]
mod tests;
