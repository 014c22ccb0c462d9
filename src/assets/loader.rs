use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use image::RgbaImage;

use crate::assets::decode::decode_image;
use crate::foundation::error::{CompositorError, CompositorResult};

/// Resolves photo and font references used by layout descriptors.
///
/// Implementations must be `Sync`: the parallel layout mode prepares placements from
/// several threads.
pub trait AssetLoader: Sync {
    /// Load and decode a photo. Failures must be [`CompositorError::ImageLoad`].
    fn load_photo(&self, source: &str) -> CompositorResult<RgbaImage>;

    /// Load and parse a font. Failures must be [`CompositorError::FontUnavailable`].
    fn load_font(&self, source: &str) -> CompositorResult<ab_glyph::FontArc>;
}

/// Loads assets from the filesystem, resolving relative references against `root`.
#[derive(Clone, Debug)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used for relative references.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let p = Path::new(source);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_photo(&self, source: &str) -> CompositorResult<RgbaImage> {
        let path = self.resolve(source);
        let bytes = std::fs::read(&path).map_err(|e| {
            CompositorError::image_load(source, format!("read '{}': {e}", path.display()))
        })?;
        decode_image(&bytes, source)
    }

    fn load_font(&self, source: &str) -> CompositorResult<ab_glyph::FontArc> {
        let path = self.resolve(source);
        let bytes = std::fs::read(&path).map_err(|e| {
            CompositorError::font_unavailable(format!("read '{}': {e}", path.display()))
        })?;
        parse_font(bytes, source)
    }
}

/// Serves encoded assets from memory, keyed by reference.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssetLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes under `source`, replacing any previous entry.
    pub fn insert(&mut self, source: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.entries.insert(source.into(), bytes);
        self
    }

    /// Whether `source` is registered.
    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load_photo(&self, source: &str) -> CompositorResult<RgbaImage> {
        let bytes = self
            .entries
            .get(source)
            .ok_or_else(|| CompositorError::image_load(source, "no such asset"))?;
        decode_image(bytes, source)
    }

    fn load_font(&self, source: &str) -> CompositorResult<ab_glyph::FontArc> {
        let bytes = self
            .entries
            .get(source)
            .ok_or_else(|| CompositorError::font_unavailable(format!("'{source}': no such asset")))?;
        parse_font(bytes.clone(), source)
    }
}

fn parse_font(bytes: Vec<u8>, source: &str) -> CompositorResult<ab_glyph::FontArc> {
    ab_glyph::FontArc::try_from_vec(bytes)
        .map_err(|e| CompositorError::font_unavailable(format!("'{source}': {e}")))
}
