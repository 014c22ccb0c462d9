/// Convenience result type used throughout bubbleframe.
pub type CompositorResult<T> = Result<T, CompositorError>;

/// Top-level error type for bubbleframe.
///
/// The variants fall into two groups:
///
/// - programmer errors ([`CompositorError::InvalidDimension`], [`CompositorError::Validation`])
///   which always abort a run,
/// - per-asset errors ([`CompositorError::ImageLoad`], [`CompositorError::FontUnavailable`])
///   which the layout engine may recover from at placement granularity.
#[derive(thiserror::Error, Debug)]
pub enum CompositorError {
    /// A width, height or size that must be positive was zero, or two buffers that must
    /// match in size did not.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A source image could not be read or decoded.
    #[error("image load error for '{source_ref}': {reason}")]
    ImageLoad {
        /// The reference the caller asked for (path or key).
        source_ref: String,
        /// Human-readable decoder or IO failure.
        reason: String,
    },

    /// A font could not be read or parsed.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Configuration or descriptor content is invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// Layout JSON failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error (IO, encoding), with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompositorError {
    /// Build a [`CompositorError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`CompositorError::ImageLoad`] value.
    pub fn image_load(source_ref: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ImageLoad {
            source_ref: source_ref.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`CompositorError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`CompositorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CompositorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether a layout run may skip the failing placement and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ImageLoad { .. } | Self::FontUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
