use std::sync::Arc;

use crate::assets::fonts::FontFamily;
use crate::assets::store::PreparedImage;
use crate::brand::theme::BrandTheme;
use crate::compose::frame::{Frame, FrameBuilder, GradientStop, ImageClip, TextAlign, TextLayer};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::layout::balance::TitleLayout;
use crate::layout::consts::{
    CAPTION_BOTTOM_MARGIN, CAPTION_FONT_SIZE, COVER_BADGE_DIAMETER, COVER_BADGE_FONT_SIZE,
    COVER_GRADIENT_FRACTION, COVER_PADDING, COVER_TITLE_MAX_WIDTH, LOGO_ROW_GAP, RULE_GAP,
    RULE_THICKNESS, TITLE_CAPTION_GAP,
};

/// Caption drawn under the cover title.
pub const COVER_CAPTION: &str = "Swipe";

/// Everything the cover slide is a function of.
#[derive(Clone, Debug)]
pub struct CoverInputs<'a> {
    pub theme: &'a BrandTheme,
    pub title: &'a TitleLayout,
    pub background: Arc<PreparedImage>,
}

/// Vertical positions of the cover, computed from the bottom edge upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverGeometry {
    pub caption_top: f64,
    pub caption_center_y: f64,
    pub title_top: f64,
    pub title_bottom: f64,
    pub line_height: f64,
    pub logo_center_y: f64,
}

impl CoverGeometry {
    pub fn for_title(title: &TitleLayout) -> Self {
        let canvas_h = Canvas::CAROUSEL.height_f64();
        let caption_bottom = canvas_h - CAPTION_BOTTOM_MARGIN;
        let caption_top = caption_bottom - CAPTION_FONT_SIZE;
        let line_height = title.line_height();
        let title_bottom = caption_top - TITLE_CAPTION_GAP;
        let title_top = title_bottom - (title.line_count() as f64) * line_height;
        Self {
            caption_top,
            caption_center_y: caption_top + CAPTION_FONT_SIZE / 2.0,
            title_top,
            title_bottom,
            line_height,
            logo_center_y: title_top - LOGO_ROW_GAP - COVER_BADGE_DIAMETER / 2.0,
        }
    }

    /// Vertical center of title line `index`.
    pub fn line_center_y(&self, index: usize) -> f64 {
        self.title_top + (index as f64 + 0.5) * self.line_height
    }
}

/// Build the cover frame: background, legibility gradient, logo row, title and caption.
pub fn compose_cover(inputs: &CoverInputs<'_>) -> Frame {
    let canvas = Canvas::CAROUSEL;
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let geo = CoverGeometry::for_title(inputs.title);
    let mut b = FrameBuilder::new(canvas);

    b.image(inputs.background.clone(), canvas.rect(), ImageClip::None);

    let gradient_top = h * (1.0 - COVER_GRADIENT_FRACTION);
    b.gradient(
        Rect::new(0.0, gradient_top, w, h),
        vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::BLACK.with_opacity(0.0),
            },
            GradientStop {
                offset: 0.5,
                color: Rgba8::BLACK.with_opacity(0.5),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::BLACK.with_opacity(0.95),
            },
        ],
    );

    // Logo row: rule, badge, rule.
    let cx = w / 2.0;
    let r = COVER_BADGE_DIAMETER / 2.0;
    let y = geo.logo_center_y;
    let rule_color = Rgba8::WHITE.with_opacity(0.7);
    b.line(
        Point::new(COVER_PADDING, y),
        Point::new(cx - r - RULE_GAP, y),
        RULE_THICKNESS,
        rule_color,
    );
    b.line(
        Point::new(cx + r + RULE_GAP, y),
        Point::new(w - COVER_PADDING, y),
        RULE_THICKNESS,
        rule_color,
    );
    b.ellipse(
        Rect::new(cx - r, y - r, cx + r, y + r),
        inputs.theme.primary_color,
    );
    b.text(TextLayer {
        text: inputs.theme.abbreviation.clone(),
        family: FontFamily::Anton,
        size: COVER_BADGE_FONT_SIZE,
        color: Rgba8::WHITE,
        x: cx - r,
        box_width: COVER_BADGE_DIAMETER,
        align: TextAlign::Center,
        center_y: y,
    });

    for (i, line) in inputs.title.lines.iter().enumerate() {
        b.text(TextLayer {
            text: line.clone(),
            family: FontFamily::Anton,
            size: f64::from(inputs.title.font_size),
            color: Rgba8::WHITE,
            x: COVER_PADDING,
            box_width: COVER_TITLE_MAX_WIDTH,
            align: TextAlign::Center,
            center_y: geo.line_center_y(i),
        });
    }

    b.text(TextLayer {
        text: COVER_CAPTION.to_string(),
        family: FontFamily::Inter,
        size: CAPTION_FONT_SIZE,
        color: Rgba8::WHITE.with_opacity(0.85),
        x: 0.0,
        box_width: w,
        align: TextAlign::Center,
        center_y: geo.caption_center_y,
    });

    b.build()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cover.rs"]
mod tests;
