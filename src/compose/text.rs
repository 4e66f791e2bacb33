use std::sync::Arc;

use crate::assets::fonts::FontFamily;
use crate::assets::store::PreparedImage;
use crate::brand::theme::BrandTheme;
use crate::compose::frame::{Frame, FrameBuilder, ImageClip, TextAlign, TextLayer};
use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::layout::anchor::ContentAnchor;
use crate::layout::consts::{
    BODY_FONT_SIZE, BODY_LINE_HEIGHT, BODY_TEXT_WIDTH, BOTTOM_BAR_CENTER_FROM_BOTTOM,
    BOTTOM_BAR_FONT_SIZE, BOTTOM_BAR_ICON_GAP, BOTTOM_BAR_ICON_SIZE, HEADER_HANDLE_FONT_SIZE,
    HEADER_HANDLE_OFFSET_Y, HEADER_HEIGHT, HEADER_INITIAL_FONT_SIZE, HEADER_NAME_FONT_SIZE,
    HEADER_NAME_OFFSET_Y, HEADER_TEXT_OFFSET_X, TEXT_PADDING_X,
};
use crate::layout::metrics::wrap_body;

pub const SHARE_LABEL: &str = "SHARE";
pub const SWIPE_LABEL: &str = "SWIPE";
pub const SAVE_LABEL: &str = "SAVE";

const BACKGROUND: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);
const NAME_COLOR: Rgba8 = Rgba8::rgb(0x11, 0x11, 0x11);
const HANDLE_COLOR: Rgba8 = Rgba8::rgb(0x6b, 0x6b, 0x6b);
const BODY_COLOR: Rgba8 = Rgba8::rgb(0x1a, 0x1a, 0x1a);
const BAR_COLOR: Rgba8 = Rgba8::rgb(0x8a, 0x8a, 0x8a);
const BAR_LABEL_BOX: f64 = 300.0;

/// Everything one text slide is a function of.
///
/// `body` must already have handle placeholders substituted.
#[derive(Clone, Debug)]
pub struct TextSlideInputs<'a> {
    pub theme: &'a BrandTheme,
    pub body: &'a str,
    pub anchor: ContentAnchor,
    pub logo: Option<Arc<PreparedImage>>,
    pub share_icon: Option<Arc<PreparedImage>>,
    pub save_icon: Option<Arc<PreparedImage>>,
    /// Last slide of the batch: the "SWIPE" hint is dropped.
    pub is_last: bool,
}

/// Build a text slide: background, brand header, body and bottom bar.
pub fn compose_text_slide(inputs: &TextSlideInputs<'_>) -> Frame {
    let canvas = Canvas::CAROUSEL;
    let mut b = FrameBuilder::new(canvas);
    b.solid_rect(canvas.rect(), BACKGROUND);

    header(&mut b, inputs);

    let top = inputs.anchor.body_top();
    for (i, line) in wrap_body(inputs.body).into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        b.text(TextLayer {
            text: line,
            family: FontFamily::Inter,
            size: BODY_FONT_SIZE,
            color: BODY_COLOR,
            x: TEXT_PADDING_X,
            box_width: BODY_TEXT_WIDTH,
            align: TextAlign::Left,
            center_y: top + (i as f64 + 0.5) * BODY_LINE_HEIGHT,
        });
    }

    bottom_bar(&mut b, inputs);
    b.build()
}

fn header(b: &mut FrameBuilder, inputs: &TextSlideInputs<'_>) {
    let y = inputs.anchor.y();
    let badge = Rect::new(
        TEXT_PADDING_X,
        y,
        TEXT_PADDING_X + HEADER_HEIGHT,
        y + HEADER_HEIGHT,
    );

    match &inputs.logo {
        Some(logo) => {
            b.image(logo.clone(), badge, ImageClip::Circle);
        }
        None => {
            b.ellipse(badge, inputs.theme.primary_color);
            b.text(TextLayer {
                text: inputs.theme.initial(),
                family: FontFamily::Anton,
                size: HEADER_INITIAL_FONT_SIZE,
                color: Rgba8::WHITE,
                x: badge.x0,
                box_width: HEADER_HEIGHT,
                align: TextAlign::Center,
                center_y: badge.center().y,
            });
        }
    }

    let text_x = TEXT_PADDING_X + HEADER_TEXT_OFFSET_X;
    let text_w = Canvas::CAROUSEL.width_f64() - TEXT_PADDING_X - text_x;
    b.text(TextLayer {
        text: inputs.theme.display_name.clone(),
        family: FontFamily::Inter,
        size: HEADER_NAME_FONT_SIZE,
        color: NAME_COLOR,
        x: text_x,
        box_width: text_w,
        align: TextAlign::Left,
        center_y: y + HEADER_NAME_OFFSET_Y + HEADER_NAME_FONT_SIZE / 2.0,
    });
    b.text(TextLayer {
        text: inputs.theme.handle.clone(),
        family: FontFamily::Inter,
        size: HEADER_HANDLE_FONT_SIZE,
        color: HANDLE_COLOR,
        x: text_x,
        box_width: text_w,
        align: TextAlign::Left,
        center_y: y + HEADER_HANDLE_OFFSET_Y + HEADER_HANDLE_FONT_SIZE / 2.0,
    });
}

fn bottom_bar(b: &mut FrameBuilder, inputs: &TextSlideInputs<'_>) {
    let canvas = Canvas::CAROUSEL;
    let w = canvas.width_f64();
    let cy = canvas.height_f64() - BOTTOM_BAR_CENTER_FROM_BOTTOM;
    let half_icon = BOTTOM_BAR_ICON_SIZE / 2.0;
    let label = |text: &str, x: f64, align: TextAlign| TextLayer {
        text: text.to_string(),
        family: FontFamily::Inter,
        size: BOTTOM_BAR_FONT_SIZE,
        color: BAR_COLOR,
        x,
        box_width: BAR_LABEL_BOX,
        align,
        center_y: cy,
    };

    let left = TEXT_PADDING_X;
    let share_x = match &inputs.share_icon {
        Some(icon) => {
            b.image(
                icon.clone(),
                Rect::new(left, cy - half_icon, left + BOTTOM_BAR_ICON_SIZE, cy + half_icon),
                ImageClip::None,
            );
            left + BOTTOM_BAR_ICON_SIZE + BOTTOM_BAR_ICON_GAP
        }
        None => left,
    };
    b.text(label(SHARE_LABEL, share_x, TextAlign::Left));

    if !inputs.is_last {
        b.text(TextLayer {
            box_width: w,
            ..label(SWIPE_LABEL, 0.0, TextAlign::Center)
        });
    }

    let right = w - TEXT_PADDING_X;
    let save_right = match &inputs.save_icon {
        Some(icon) => {
            b.image(
                icon.clone(),
                Rect::new(right - BOTTOM_BAR_ICON_SIZE, cy - half_icon, right, cy + half_icon),
                ImageClip::None,
            );
            right - BOTTOM_BAR_ICON_SIZE - BOTTOM_BAR_ICON_GAP
        }
        None => right,
    };
    b.text(label(SAVE_LABEL, save_right - BAR_LABEL_BOX, TextAlign::Right));
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
