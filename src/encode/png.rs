use std::borrow::Cow;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::error::{SlideError, SlideResult};
use crate::render::backend::FrameRGBA;

/// zlib effort used for slide PNGs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl PngCompression {
    /// Parse `fast`, `default` or `best` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Some(Self::Fast),
            "default" => Some(Self::Default),
            "best" => Some(Self::Best),
            _ => None,
        }
    }

    fn to_image(self) -> image::codecs::png::CompressionType {
        use image::codecs::png::CompressionType;
        match self {
            Self::Fast => CompressionType::Fast,
            Self::Default => CompressionType::Default,
            Self::Best => CompressionType::Best,
        }
    }
}

/// Encode a rendered frame as an 8-bit RGBA PNG.
pub fn encode_png(frame: &FrameRGBA, compression: PngCompression) -> SlideResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(SlideError::render(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let pixels: Cow<'_, [u8]> = if frame.premultiplied {
        let mut straight = frame.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        Cow::Owned(straight)
    } else {
        Cow::Borrowed(&frame.data)
    };

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new_with_quality(
        &mut out,
        compression.to_image(),
        image::codecs::png::FilterType::Adaptive,
    )
    .write_image(
        &pixels,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
    )
    .context("encode png")?;
    Ok(out)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> SlideResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `bytes` to `path`, creating parent directories.
///
/// With `atomic` set the bytes go to a sibling temp file first and are renamed over `path`,
/// so readers never observe a half-written PNG.
pub fn write_output(path: &Path, bytes: &[u8], atomic: bool) -> SlideResult<()> {
    ensure_parent_dir(path)?;
    if !atomic {
        std::fs::write(path, bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        return Ok(());
    }
    write_atomic(path, bytes)
}

pub fn write_atomic(path: &Path, bytes: &[u8]) -> SlideResult<()> {
    let tmp = temp_sibling(path)?;
    let res = (|| -> anyhow::Result<()> {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("failed to create '{}'", tmp.display()))?;
        f.write_all(bytes)
            .with_context(|| format!("failed to write '{}'", tmp.display()))?;
        f.sync_all()
            .with_context(|| format!("failed to sync '{}'", tmp.display()))?;
        drop(f);
        std::fs::rename(&tmp, path).with_context(|| {
            format!("failed to move '{}' to '{}'", tmp.display(), path.display())
        })?;
        Ok(())
    })();
    if res.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    res.map_err(SlideError::from)
}

fn temp_sibling(path: &Path) -> SlideResult<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| {
            SlideError::validation(format!("output path '{}' has no file name", path.display()))
        })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
