use std::time::{Duration, Instant};

use image::RgbImage;
use rayon::prelude::*;

use crate::assets::loader::AssetLoader;
use crate::assets::normalize::normalize;
use crate::compose::canvas::Canvas;
use crate::compose::composite::composite;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::geometry::mask::generate_mask;
use crate::layout::model::{
    Background, EngineConfig, FailurePolicy, Layout, PlacementDescriptor, PlacementKind,
    Threading,
};
use crate::render::decor::{render_button, render_headline, render_orb};
use crate::render::frame::{TEAL_LIGHT, render_bubble};
use crate::render::label::{LabelStyle, render_label};
use crate::render::sprite::Sprite;
use crate::text::font::LabelFont;

/// A placement left out of the canvas under [`FailurePolicy::SkipAndContinue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedPlacement {
    /// Position in the descriptor slice.
    pub index: usize,
    /// Asset reference, for photo placements.
    pub source_ref: Option<String>,
    /// Error message.
    pub reason: String,
}

/// Summary of one layout run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Placements composited onto the canvas.
    pub placed: usize,
    /// Placements left out, in paint order.
    pub skipped: Vec<SkippedPlacement>,
    /// Wall time of the run, background included.
    pub elapsed: Duration,
}

/// Turns placement descriptors into a finished canvas.
///
/// Each run creates its own canvas; the engine holds only configuration, the asset
/// loader and the resolved font, so one engine can serve many runs.
pub struct LayoutEngine<'a> {
    config: EngineConfig,
    loader: &'a dyn AssetLoader,
    font: LabelFont,
}

impl std::fmt::Debug for LayoutEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}

impl<'a> LayoutEngine<'a> {
    /// Validate `config` and resolve its font.
    ///
    /// A font that cannot be loaded is logged and replaced by [`LabelFont::Builtin`].
    pub fn new(config: EngineConfig, loader: &'a dyn AssetLoader) -> CompositorResult<Self> {
        config.validate()?;
        let font = resolve_font(config.font.as_deref(), loader);
        Ok(Self {
            config,
            loader,
            font,
        })
    }

    /// Engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Font used for text placements.
    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Render `descriptors` over `background`.
    pub fn render(
        &self,
        background: &Background,
        descriptors: &[PlacementDescriptor],
    ) -> CompositorResult<Canvas> {
        self.render_with_stats(background, descriptors)
            .map(|(canvas, _)| canvas)
    }

    /// Render and flatten against the configured matte.
    pub fn render_flattened(
        &self,
        background: &Background,
        descriptors: &[PlacementDescriptor],
    ) -> CompositorResult<RgbImage> {
        let canvas = self.render(background, descriptors)?;
        Ok(canvas.flatten(self.config.matte))
    }

    /// Render `descriptors` over `background` and report what was placed and skipped.
    ///
    /// Descriptors paint in ascending `z_order`; equal values keep declaration order.
    /// A background that cannot be produced fails the run.
    #[tracing::instrument(
        skip_all,
        fields(placements = descriptors.len(), threading = ?self.config.threading)
    )]
    pub fn render_with_stats(
        &self,
        background: &Background,
        descriptors: &[PlacementDescriptor],
    ) -> CompositorResult<(Canvas, RenderStats)> {
        let started = Instant::now();
        let mut canvas = self.background_canvas(background)?;
        let order = paint_order(descriptors);
        let mut stats = RenderStats::default();

        match self.config.threading {
            Threading::Serial => {
                for &index in &order {
                    let prepared = self.prepare(&descriptors[index]);
                    self.place(&mut canvas, &mut stats, index, &descriptors[index], prepared)?;
                }
            }
            Threading::Parallel => {
                let prepared: Vec<CompositorResult<Sprite>> = order
                    .par_iter()
                    .map(|&index| self.prepare(&descriptors[index]))
                    .collect();
                for (&index, prepared) in order.iter().zip(prepared) {
                    self.place(&mut canvas, &mut stats, index, &descriptors[index], prepared)?;
                }
            }
        }

        stats.elapsed = started.elapsed();
        tracing::debug!(
            placed = stats.placed,
            skipped = stats.skipped.len(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "layout rendered"
        );
        Ok((canvas, stats))
    }

    fn place(
        &self,
        canvas: &mut Canvas,
        stats: &mut RenderStats,
        index: usize,
        descriptor: &PlacementDescriptor,
        prepared: CompositorResult<Sprite>,
    ) -> CompositorResult<()> {
        match prepared {
            Ok(sprite) => {
                composite(canvas, &sprite, descriptor.anchor.x, descriptor.anchor.y);
                stats.placed += 1;
                tracing::debug!(
                    index,
                    z_order = descriptor.z_order,
                    width = sprite.width(),
                    height = sprite.height(),
                    "placed"
                );
                Ok(())
            }
            Err(err)
                if err.is_recoverable()
                    && self.config.failure_policy == FailurePolicy::SkipAndContinue =>
            {
                tracing::warn!(
                    index,
                    source = descriptor.source_ref().unwrap_or("-"),
                    error = %err,
                    "skipping placement"
                );
                stats.skipped.push(SkippedPlacement {
                    index,
                    source_ref: descriptor.source_ref().map(str::to_owned),
                    reason: err.to_string(),
                });
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn prepare(&self, descriptor: &PlacementDescriptor) -> CompositorResult<Sprite> {
        descriptor.validate()?;
        match &descriptor.kind {
            PlacementKind::Photo {
                source,
                size,
                shape,
                glow_color,
            } => {
                let (width, height) = size.dimensions();
                let photo = self.loader.load_photo(source)?;
                let photo = normalize(&photo, width, height, self.config.vertical_bias)
                    .map_err(|e| attribute_to(source, e))?;
                let mask = generate_mask(*shape, width, height)?;
                let mut style = self.config.frame;
                if let Some(color) = glow_color {
                    style.glow_color = *color;
                }
                render_bubble(&photo, &mask, &style)
            }
            PlacementKind::Label {
                text,
                background,
                text_color,
                font_size,
            } => {
                let base = self.config.label;
                let background = background.unwrap_or(base.background);
                // Default text on a neutral body takes the accent so it stays legible.
                let default_text = if background.same_rgb(base.neutral) {
                    base.accent
                } else {
                    base.text_color
                };
                let style = LabelStyle {
                    background,
                    text_color: text_color.unwrap_or(default_text),
                    font_size: font_size.unwrap_or(base.font_size),
                    ..base
                };
                render_label(text, &self.font, &style)
            }
            PlacementKind::Orb {
                radius,
                color,
                peak_alpha,
            } => render_orb(*radius, color.unwrap_or(TEAL_LIGHT), *peak_alpha),
            PlacementKind::Headline { text, style } => render_headline(text, &self.font, style),
            PlacementKind::Button { text, style } => render_button(text, &self.font, style),
        }
    }

    fn background_canvas(&self, background: &Background) -> CompositorResult<Canvas> {
        let CanvasSize { width, height } = self.config.canvas;
        match background {
            Background::Solid { color } => Canvas::new(width, height, *color),
            Background::VerticalGradient { top, bottom } => {
                Canvas::vertical_gradient(width, height, *top, *bottom)
            }
            Background::Preset { preset } => {
                let (top, bottom) = preset.colors();
                Canvas::vertical_gradient(width, height, top, bottom)
            }
            Background::Image { source } => {
                let image = self.loader.load_photo(source)?;
                let image =
                    normalize(&image, width, height, 0.0).map_err(|e| attribute_to(source, e))?;
                Canvas::from_image(&image)
            }
        }
    }
}

impl Layout {
    /// Validate, render and flatten this layout.
    pub fn render(&self, loader: &dyn AssetLoader) -> CompositorResult<RgbImage> {
        self.validate()?;
        LayoutEngine::new(self.config.clone(), loader)?
            .render_flattened(&self.background, &self.descriptors)
    }
}

/// Descriptor indices sorted stably by `z_order`.
pub(crate) fn paint_order(descriptors: &[PlacementDescriptor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..descriptors.len()).collect();
    order.sort_by_key(|&i| descriptors[i].z_order);
    order
}

fn attribute_to(source: &str, err: CompositorError) -> CompositorError {
    match err {
        CompositorError::ImageLoad { reason, .. } => CompositorError::image_load(source, reason),
        other => other,
    }
}

fn resolve_font(source: Option<&str>, loader: &dyn AssetLoader) -> LabelFont {
    let Some(source) = source else {
        return LabelFont::Builtin;
    };
    match loader.load_font(source) {
        Ok(font) => LabelFont::Outline(font),
        Err(err) => {
            tracing::warn!(font = source, error = %err, "font unavailable, using built-in font");
            LabelFont::Builtin
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
