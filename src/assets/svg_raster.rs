use std::sync::Arc;

use crate::assets::store::PreparedImage;
use crate::foundation::error::{SlideError, SlideResult};

/// Longest edge SVG icons are rasterized at before being scaled down onto the slide.
pub const SVG_RASTER_EDGE: u32 = 256;

/// Pixel size to rasterize `tree` at: aspect preserved, longest edge [`SVG_RASTER_EDGE`].
pub fn svg_raster_size(tree: &usvg::Tree) -> SlideResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(SlideError::asset("svg has invalid width/height"));
    }
    let scale = (SVG_RASTER_EDGE as f32) / w.max(h);
    let px = |v: f32| ((v * scale).round() as u32).max(1);
    Ok((px(w), px(h)))
}

pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> SlideResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SlideError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Rasterize an SVG tree into a [`PreparedImage`] at [`svg_raster_size`].
pub fn rasterize_svg_image(tree: &usvg::Tree) -> SlideResult<PreparedImage> {
    let (width, height) = svg_raster_size(tree)?;
    let rgba8_premul = rasterize_svg_to_premul_rgba8(tree, width, height)?;
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}
