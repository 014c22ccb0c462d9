//! Bubbleframe composes marketing hero images from photos, speech bubbles and decor.
//!
//! A run takes a background and an ordered list of [`PlacementDescriptor`]s and produces a
//! finished canvas. Photos are cropped to size, clipped by a circle or rounded rectangle
//! and framed as "glass bubbles" with a soft glow, a gradient border and a highlight arc.
//! Labels are speech bubbles with a downward tail.
//!
//! # Pipeline overview
//!
//! 1. **Load**: an [`AssetLoader`] resolves photo and font references.
//! 2. **Normalize**: [`normalize`] crops to the target aspect ratio and resizes.
//! 3. **Mask**: [`generate_mask`] produces the clip shape.
//! 4. **Frame**: [`render_bubble`] turns the masked photo into a [`BubbleSprite`].
//! 5. **Composite**: [`composite`] blends sprites onto the [`Canvas`] in paint order.
//! 6. **Flatten**: [`Canvas::flatten`] produces an opaque image, [`encode_png`] writes it.
//!
//! [`LayoutEngine`] drives the whole pipeline; [`Layout`] is its JSON form.
//!
//! Pixels are premultiplied RGBA8 throughout; renderers never touch the canvas directly.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod geometry;
mod layout;
mod render;
mod text;

pub use assets::decode::decode_image;
pub use assets::loader::{AssetLoader, FsAssetLoader, MemoryAssetLoader};
pub use assets::normalize::{CropWindow, DEFAULT_VERTICAL_BIAS, crop_window, normalize};
pub use compose::canvas::{Canvas, encode_png, write_png};
pub use compose::composite::composite;
pub use foundation::core::{CanvasSize, ColorRgba, Point, PremulRgba8, Rect, Vec2};
pub use foundation::error::{CompositorError, CompositorResult};
pub use geometry::mask::{Mask, Shape, generate_mask};
pub use layout::engine::{LayoutEngine, RenderStats, SkippedPlacement};
pub use layout::model::{
    Anchor, Background, EngineConfig, FailurePolicy, GradientPreset, Layout,
    PlacementDescriptor, PlacementKind, PlacementSize, Threading,
};
pub use render::decor::{
    ButtonStyle, DARK_GRAY, HeadlineStyle, Shadow, render_button, render_headline, render_orb,
};
pub use render::frame::{FrameStyle, TEAL, TEAL_DARK, TEAL_LIGHT, render_bubble};
pub use render::label::{LabelStyle, render_label};
pub use render::sprite::{BubbleSprite, SpeechBubbleSprite, Sprite};
pub use text::font::{LabelFont, TextExtent};
