use image::RgbaImage;

use crate::foundation::error::{CompositorError, CompositorResult};

/// Decode an encoded image (PNG, JPEG, ...) into straight-alpha RGBA8.
///
/// `source_ref` only labels the error. Empty or zero-sized images are rejected as
/// [`CompositorError::ImageLoad`].
pub fn decode_image(bytes: &[u8], source_ref: &str) -> CompositorResult<RgbaImage> {
    if bytes.is_empty() {
        return Err(CompositorError::image_load(source_ref, "empty input"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CompositorError::image_load(source_ref, format!("decode failed: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(CompositorError::image_load(source_ref, "image has no pixels"));
    }
    Ok(rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
