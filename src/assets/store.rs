use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::decode::{decode_image, parse_svg};
use crate::assets::svg_raster::rasterize_svg_image;
use crate::foundation::error::{SlideError, SlideResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Single-color image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(premul.repeat(n)),
        }
    }
}

/// Read-only access to the files a render needs.
///
/// The session only talks to assets through this trait so layout and compositing can be
/// exercised without touching the file system.
pub trait AssetSource {
    /// Raw bytes at `path`.
    fn read_bytes(&self, path: &Path) -> SlideResult<Vec<u8>>;

    /// Decode the image at `path`. SVG files are rasterized.
    fn load_image(&self, path: &Path) -> SlideResult<PreparedImage> {
        let bytes = self.read_bytes(path)?;
        if is_svg(path) {
            let svg = parse_svg(&bytes)?;
            rasterize_svg_image(&svg.tree)
        } else {
            decode_image(&bytes)
        }
    }
}

/// Load an image the render cannot do without. Any failure is a [`SlideError::Asset`].
pub fn load_required_image(
    source: &dyn AssetSource,
    path: &Path,
    what: &str,
) -> SlideResult<Arc<PreparedImage>> {
    source.load_image(path).map(Arc::new).map_err(|e| {
        SlideError::asset(format!("failed to load {what} '{}': {e}", path.display()))
    })
}

/// Load a decorative image; absence or failure falls back to `None`.
pub fn load_optional_image(
    source: &dyn AssetSource,
    path: Option<&Path>,
    what: &str,
) -> Option<Arc<PreparedImage>> {
    let path = path?;
    match source.load_image(path) {
        Ok(img) => Some(Arc::new(img)),
        Err(e) => {
            tracing::warn!(asset = what, path = %path.display(), error = %e, "optional asset unavailable, using fallback");
            None
        }
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// [`AssetSource`] backed by the local file system.
///
/// Relative paths resolve against `root` when one is set, otherwise against the working
/// directory.
#[derive(Clone, Debug, Default)]
pub struct FsAssetSource {
    root: Option<PathBuf>,
}

impl FsAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl AssetSource for FsAssetSource {
    fn read_bytes(&self, path: &Path) -> SlideResult<Vec<u8>> {
        let p = self.resolve(path);
        let bytes =
            std::fs::read(&p).with_context(|| format!("failed to read asset '{}'", p.display()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
