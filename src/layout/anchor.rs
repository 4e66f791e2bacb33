use crate::foundation::core::Canvas;
use crate::layout::consts::{
    BODY_LINE_HEIGHT, BOTTOM_BAR_HEIGHT, CONTENT_ANCHOR_MAX, CONTENT_ANCHOR_MIN, HEADER_GAP,
    HEADER_HEIGHT,
};
use crate::layout::metrics::wrap_body;

/// Vertical offset of the brand header on every text slide of one batch.
///
/// Always within `[60, 280]` and a whole number of pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContentAnchor(f64);

impl ContentAnchor {
    pub fn y(self) -> f64 {
        self.0
    }

    /// Top of the first body line for a slide using this anchor.
    pub fn body_top(self) -> f64 {
        self.0 + HEADER_HEIGHT + HEADER_GAP
    }
}

/// Estimated height of a text slide's content block: header, gap and wrapped body.
pub fn estimate_content_height(body: &str) -> f64 {
    let lines = wrap_body(body).len();
    HEADER_HEIGHT + HEADER_GAP + (lines as f64) * BODY_LINE_HEIGHT
}

/// Compute the anchor shared by all text slides from the tallest body in the batch.
///
/// `bodies` must already have handle placeholders substituted, since the substituted text is
/// what gets wrapped. The tallest block is centered in the band above the bottom bar.
pub fn compute_content_anchor<S: AsRef<str>>(bodies: &[S]) -> ContentAnchor {
    let tallest = bodies
        .iter()
        .map(|b| estimate_content_height(b.as_ref()))
        .fold(0.0f64, f64::max);
    let band = Canvas::CAROUSEL.height_f64() - BOTTOM_BAR_HEIGHT;
    let centered = ((band - tallest) / 2.0).round();
    let y = centered.clamp(CONTENT_ANCHOR_MIN, CONTENT_ANCHOR_MAX);
    tracing::debug!(tallest, y, slides = bodies.len(), "content anchor");
    ContentAnchor(y)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
