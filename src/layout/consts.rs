//! Layout constants shared with the live-preview renderer.
//!
//! Every value here participates in line breaking or anchoring, so changing one breaks
//! preview parity. None of them is configurable.

/// Horizontal padding on each side of the cover title box.
pub const COVER_PADDING: f64 = 45.0;
/// Width available to each cover title line (`1080 - 2 * 45`).
pub const COVER_TITLE_MAX_WIDTH: f64 = 1080.0 - 2.0 * COVER_PADDING;
/// Title line height as a multiple of the chosen font size.
pub const TITLE_LINE_HEIGHT_RATIO: f64 = 1.1;

/// Fraction of the canvas (from the bottom) covered by the legibility gradient.
pub const COVER_GRADIENT_FRACTION: f64 = 0.6;
/// Caption font size and its distance from the bottom edge.
pub const CAPTION_FONT_SIZE: f64 = 28.0;
pub const CAPTION_BOTTOM_MARGIN: f64 = 60.0;
/// Gap between the bottom of the last title line and the caption top.
pub const TITLE_CAPTION_GAP: f64 = 50.0;
/// Gap between the logo row and the first title line.
pub const LOGO_ROW_GAP: f64 = 40.0;
/// Diameter of the cover abbreviation badge.
pub const COVER_BADGE_DIAMETER: f64 = 72.0;
pub const COVER_BADGE_FONT_SIZE: f64 = 28.0;
/// Horizontal gap between the badge edge and each rule line.
pub const RULE_GAP: f64 = 24.0;
pub const RULE_THICKNESS: f64 = 2.0;

/// Horizontal padding of text slides.
pub const TEXT_PADDING_X: f64 = 80.0;
/// Width available to body text (`1080 - 2 * 80`).
pub const BODY_TEXT_WIDTH: f64 = 1080.0 - 2.0 * TEXT_PADDING_X;
pub const BODY_FONT_SIZE: f64 = 44.0;
pub const BODY_LINE_HEIGHT: f64 = 62.0;

/// Brand header block: badge/logo diameter, and the gap before the body starts.
pub const HEADER_HEIGHT: f64 = 96.0;
pub const HEADER_GAP: f64 = 48.0;
pub const HEADER_TEXT_OFFSET_X: f64 = HEADER_HEIGHT + 24.0;
pub const HEADER_NAME_FONT_SIZE: f64 = 34.0;
pub const HEADER_NAME_OFFSET_Y: f64 = 10.0;
pub const HEADER_HANDLE_FONT_SIZE: f64 = 28.0;
pub const HEADER_HANDLE_OFFSET_Y: f64 = 52.0;
pub const HEADER_INITIAL_FONT_SIZE: f64 = 48.0;

/// Height reserved at the bottom of text slides for the share/swipe/save bar.
pub const BOTTOM_BAR_HEIGHT: f64 = 150.0;
/// Distance from the canvas bottom to the bar's label center line.
pub const BOTTOM_BAR_CENTER_FROM_BOTTOM: f64 = 80.0;
pub const BOTTOM_BAR_FONT_SIZE: f64 = 24.0;
pub const BOTTOM_BAR_ICON_SIZE: f64 = 36.0;
pub const BOTTOM_BAR_ICON_GAP: f64 = 12.0;

/// Bounds on the shared content anchor of text slides.
pub const CONTENT_ANCHOR_MIN: f64 = 60.0;
pub const CONTENT_ANCHOR_MAX: f64 = 280.0;
