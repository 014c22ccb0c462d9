use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::normalize::DEFAULT_VERTICAL_BIAS;
use crate::foundation::core::{CanvasSize, ColorRgba};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::geometry::mask::Shape;
use crate::render::decor::{ButtonStyle, HeadlineStyle};
use crate::render::frame::FrameStyle;
use crate::render::label::LabelStyle;

/// Sprite center on the canvas, in pixels. May lie outside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

/// Requested photo size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlacementSize {
    /// Square photo of `diameter` pixels.
    Diameter {
        /// Edge length in pixels.
        diameter: u32,
    },
    /// Rectangular photo.
    Rect {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl PlacementSize {
    /// Width and height in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Diameter { diameter } => (diameter, diameter),
            Self::Rect { width, height } => (width, height),
        }
    }
}

/// What a placement draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementKind {
    /// A photo cropped, masked and framed as a glass bubble.
    Photo {
        /// Asset reference resolved by the [`AssetLoader`](crate::AssetLoader).
        source: String,
        /// Size of the framed photo, excluding the glow margin.
        size: PlacementSize,
        /// Clip shape.
        #[serde(default)]
        shape: Shape,
        /// Glow color override; defaults to the engine's frame style.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        glow_color: Option<ColorRgba>,
    },
    /// A speech-bubble label.
    Label {
        /// Label text.
        text: String,
        /// Fill override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<ColorRgba>,
        /// Text color override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_color: Option<ColorRgba>,
        /// Font size override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
    },
    /// A soft decorative orb.
    Orb {
        /// Outer radius in pixels.
        radius: u32,
        /// Orb color override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<ColorRgba>,
        /// Alpha reached at the center.
        #[serde(default = "default_orb_peak_alpha")]
        peak_alpha: u8,
    },
    /// A line of headline text.
    Headline {
        /// Headline text.
        text: String,
        /// Color, size and shadow.
        #[serde(default)]
        style: HeadlineStyle,
    },
    /// A call-to-action button.
    Button {
        /// Button caption.
        text: String,
        /// Colors, size and padding.
        #[serde(default)]
        style: ButtonStyle,
    },
}

fn default_orb_peak_alpha() -> u8 {
    30
}

/// One entry of a layout: what to draw, where, and in which paint layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementDescriptor {
    /// Sprite center on the canvas.
    pub anchor: Anchor,
    /// Paint layer; lower values paint first. Ties keep declaration order.
    #[serde(default)]
    pub z_order: i32,
    /// Drawable.
    #[serde(flatten)]
    pub kind: PlacementKind,
}

impl PlacementDescriptor {
    /// Framed photo centered at `(x, y)`.
    pub fn photo(source: impl Into<String>, x: i64, y: i64, size: PlacementSize) -> Self {
        Self::new(
            x,
            y,
            PlacementKind::Photo {
                source: source.into(),
                size,
                shape: Shape::Circle,
                glow_color: None,
            },
        )
    }

    /// Speech-bubble label centered at `(x, y)` using the engine's label defaults.
    pub fn label(text: impl Into<String>, x: i64, y: i64) -> Self {
        Self::new(
            x,
            y,
            PlacementKind::Label {
                text: text.into(),
                background: None,
                text_color: None,
                font_size: None,
            },
        )
    }

    /// Placement of any kind centered at `(x, y)` with z-order 0.
    pub fn new(x: i64, y: i64, kind: PlacementKind) -> Self {
        Self {
            anchor: Anchor { x, y },
            z_order: 0,
            kind,
        }
    }

    /// Same placement on another paint layer.
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Same placement with another clip shape. No effect on non-photo kinds.
    pub fn with_shape(mut self, new_shape: Shape) -> Self {
        if let PlacementKind::Photo { shape, .. } = &mut self.kind {
            *shape = new_shape;
        }
        self
    }

    /// Asset reference of photo placements.
    pub fn source_ref(&self) -> Option<&str> {
        match &self.kind {
            PlacementKind::Photo { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Reject placements that can never render.
    pub fn validate(&self) -> CompositorResult<()> {
        match &self.kind {
            PlacementKind::Photo {
                source,
                size,
                shape,
                ..
            } => {
                if source.trim().is_empty() {
                    return Err(CompositorError::validation("photo source must be non-empty"));
                }
                let (w, h) = size.dimensions();
                if w == 0 || h == 0 {
                    return Err(CompositorError::invalid_dimension(format!(
                        "photo '{source}' size must be > 0, got {w}x{h}"
                    )));
                }
                if let Shape::RoundedRect { corner_radius } = shape
                    && !corner_radius.is_finite()
                {
                    return Err(CompositorError::validation(format!(
                        "photo '{source}' corner_radius must be finite"
                    )));
                }
            }
            PlacementKind::Label { font_size, .. } => {
                if let Some(size) = font_size
                    && (!size.is_finite() || *size <= 0.0)
                {
                    return Err(CompositorError::validation("label font_size must be > 0"));
                }
            }
            PlacementKind::Orb { radius, .. } => {
                if *radius == 0 {
                    return Err(CompositorError::invalid_dimension("orb radius must be > 0"));
                }
            }
            PlacementKind::Headline { style, .. } => {
                if !style.font_size.is_finite() || style.font_size <= 0.0 {
                    return Err(CompositorError::validation(
                        "headline font_size must be > 0",
                    ));
                }
            }
            PlacementKind::Button { style, .. } => {
                if !style.font_size.is_finite() || style.font_size <= 0.0 {
                    return Err(CompositorError::validation("button font_size must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// Named top-to-bottom gradients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientPreset {
    /// Soft blue to white.
    #[default]
    Light,
    /// Deep teal to near-white.
    Teal,
    /// Warm cream to white.
    Warm,
    /// Gray-blue to white.
    Modern,
}

impl GradientPreset {
    /// Top and bottom colors.
    pub fn colors(self) -> (ColorRgba, ColorRgba) {
        match self {
            Self::Light => (ColorRgba::rgb(235, 245, 250), ColorRgba::WHITE),
            Self::Teal => (ColorRgba::rgb(0, 120, 110), ColorRgba::rgb(240, 250, 245)),
            Self::Warm => (ColorRgba::rgb(255, 248, 240), ColorRgba::WHITE),
            Self::Modern => (ColorRgba::rgb(248, 250, 252), ColorRgba::WHITE),
        }
    }
}

/// Initial canvas content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// Uniform color.
    Solid {
        /// Fill color.
        color: ColorRgba,
    },
    /// Linear gradient from the top row to the bottom row.
    VerticalGradient {
        /// Color of the first row.
        top: ColorRgba,
        /// Color approached by the last row.
        bottom: ColorRgba,
    },
    /// One of the named gradients.
    Preset {
        /// Gradient name.
        preset: GradientPreset,
    },
    /// Image cropped and resized to cover the canvas.
    Image {
        /// Asset reference resolved by the [`AssetLoader`](crate::AssetLoader).
        source: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: ColorRgba::WHITE,
        }
    }
}

/// What the engine does when a placement cannot be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log, record the skip and continue with the next placement.
    #[default]
    SkipAndContinue,
    /// Return the first placement error.
    FailFast,
}

/// How placements are prepared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threading {
    /// One placement at a time.
    #[default]
    Serial,
    /// Sprites are prepared on the rayon pool, then composited in paint order.
    Parallel,
}

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output size.
    pub canvas: CanvasSize,
    /// Frame style used for photo placements.
    pub frame: FrameStyle,
    /// Label style used for label placements, before per-label overrides.
    pub label: LabelStyle,
    /// Vertical crop bias passed to the normalizer.
    pub vertical_bias: f64,
    /// Color the canvas is flattened against.
    pub matte: ColorRgba,
    /// Placement failure handling.
    pub failure_policy: FailurePolicy,
    /// Serial or parallel sprite preparation.
    pub threading: Threading,
    /// Font asset reference; the built-in bitmap font is used when absent or unloadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            frame: FrameStyle::default(),
            label: LabelStyle::default(),
            vertical_bias: DEFAULT_VERTICAL_BIAS,
            matte: ColorRgba::WHITE,
            failure_policy: FailurePolicy::default(),
            threading: Threading::default(),
            font: None,
        }
    }
}

impl EngineConfig {
    /// Reject configurations no run can succeed with.
    pub fn validate(&self) -> CompositorResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CompositorError::invalid_dimension(format!(
                "canvas size must be > 0, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !self.vertical_bias.is_finite() {
            return Err(CompositorError::validation("vertical_bias must be finite"));
        }
        self.frame.validate()?;
        self.label.validate()?;
        Ok(())
    }
}

/// Serializable description of a whole composite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Engine settings.
    pub config: EngineConfig,
    /// Initial canvas content.
    pub background: Background,
    /// Placements, in declaration order.
    pub descriptors: Vec<PlacementDescriptor>,
}

impl Layout {
    /// Parse a layout from JSON.
    pub fn from_json_str(json: &str) -> CompositorResult<Self> {
        serde_json::from_str(json).map_err(|e| CompositorError::serde(e.to_string()))
    }

    /// Read and parse a JSON layout file.
    pub fn from_path(path: &Path) -> CompositorResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read layout '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> CompositorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CompositorError::serde(e.to_string()))
    }

    /// Validate the configuration and every placement.
    pub fn validate(&self) -> CompositorResult<()> {
        self.config.validate()?;
        if let Background::Image { source } = &self.background
            && source.trim().is_empty()
        {
            return Err(CompositorError::validation(
                "background image source must be non-empty",
            ));
        }
        for (index, d) in self.descriptors.iter().enumerate() {
            d.validate().map_err(|e| match e {
                CompositorError::Validation(msg) => {
                    CompositorError::validation(format!("descriptor {index}: {msg}"))
                }
                CompositorError::InvalidDimension(msg) => {
                    CompositorError::invalid_dimension(format!("descriptor {index}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
