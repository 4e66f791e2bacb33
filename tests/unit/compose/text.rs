use super::*;
use crate::brand::registry::{BrandRegistry, StaticBrandRegistry};
use crate::compose::frame::Layer;
use crate::layout::anchor::compute_content_anchor;

fn theme() -> BrandTheme {
    StaticBrandRegistry::builtin()
        .resolve("healthy-college")
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn inputs<'a>(theme: &'a BrandTheme, body: &'a str, is_last: bool) -> TextSlideInputs<'a> {
    TextSlideInputs {
        theme,
        body,
        anchor: compute_content_anchor(&[body]),
        logo: None,
        share_icon: None,
        save_icon: None,
        is_last,
    }
}

#[test]
fn swipe_hint_depends_only_on_is_last() {
    let theme = theme();
    let middle = compose_text_slide(&inputs(&theme, "Drink water first thing.", false));
    let last = compose_text_slide(&inputs(&theme, "Drink water first thing.", true));

    assert!(middle.find_text(SWIPE_LABEL).is_some());
    assert!(last.find_text(SWIPE_LABEL).is_none());
    for frame in [&middle, &last] {
        assert!(frame.find_text(SHARE_LABEL).is_some());
        assert!(frame.find_text(SAVE_LABEL).is_some());
    }
}

#[test]
fn missing_logo_draws_initial_badge() {
    let theme = theme();
    let frame = compose_text_slide(&inputs(&theme, "Body", false));
    assert!(matches!(
        frame.layers()[1],
        Layer::Ellipse { color, .. } if color == theme.primary_color
    ));
    let initial = frame.find_text("T").unwrap();
    assert_eq!(initial.family, FontFamily::Anton);
    assert_eq!(initial.color, Rgba8::WHITE);
    assert!(
        !frame
            .layers()
            .iter()
            .any(|l| matches!(l, Layer::Image { .. }))
    );
}

#[test]
fn logo_is_clipped_to_a_circle() {
    let theme = theme();
    let mut i = inputs(&theme, "Body", false);
    i.logo = Some(Arc::new(PreparedImage::solid(10, 10, [255, 0, 0, 255])));
    let frame = compose_text_slide(&i);

    let Layer::Image { rect, clip, .. } = &frame.layers()[1] else {
        panic!("expected logo image, got {:?}", frame.layers()[1]);
    };
    assert_eq!(*clip, ImageClip::Circle);
    assert!(approx(rect.x0, 80.0));
    assert!(approx(rect.y0, i.anchor.y()));
    assert!(approx(rect.width(), 96.0));
    assert!(frame.find_text("T").is_none());
}

#[test]
fn header_and_body_hang_from_the_anchor() {
    let theme = theme();
    let i = inputs(&theme, "First line of advice", false);
    let frame = compose_text_slide(&i);
    let y = i.anchor.y();

    let name = frame.find_text("The Healthy College").unwrap();
    assert!(approx(name.x, 200.0));
    assert!(approx(name.center_y, y + 10.0 + 17.0));
    let handle = frame.find_text("@thehealthycollege").unwrap();
    assert!(approx(handle.center_y, y + 52.0 + 14.0));

    let body = frame.find_text("First line of advice").unwrap();
    assert_eq!(body.family, FontFamily::Inter);
    assert!(approx(body.size, 44.0));
    assert!(approx(body.x, 80.0));
    assert!(approx(body.center_y, y + 96.0 + 48.0 + 31.0));
}

#[test]
fn blank_paragraphs_keep_their_line_slot() {
    let theme = theme();
    let i = inputs(&theme, "Alpha\n\nBeta", false);
    let frame = compose_text_slide(&i);
    let top = i.anchor.body_top();
    assert!(approx(frame.find_text("Alpha").unwrap().center_y, top + 31.0));
    assert!(approx(
        frame.find_text("Beta").unwrap().center_y,
        top + 2.0 * 62.0 + 31.0
    ));
    assert!(frame.texts().all(|t| !t.text.is_empty()));
}

#[test]
fn icons_sit_beside_their_labels() {
    let theme = theme();
    let icon = Arc::new(PreparedImage::solid(2, 2, [0, 0, 0, 255]));
    let mut i = inputs(&theme, "Body", true);
    i.share_icon = Some(icon.clone());
    i.save_icon = Some(icon);
    let frame = compose_text_slide(&i);

    let icons: Vec<Rect> = frame
        .layers()
        .iter()
        .filter_map(|l| match l {
            Layer::Image { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(icons.len(), 2);
    assert!(approx(icons[0].x0, 80.0));
    assert!(approx(icons[1].x1, 1000.0));
    assert!(approx(icons[0].center().y, 1270.0));

    let share = frame.find_text(SHARE_LABEL).unwrap();
    assert!(approx(share.x, 80.0 + 36.0 + 12.0));
    let save = frame.find_text(SAVE_LABEL).unwrap();
    assert_eq!(save.align, TextAlign::Right);
    assert!(approx(save.x + save.box_width, 1000.0 - 36.0 - 12.0));
}

#[test]
fn same_anchor_gives_same_header_position() {
    let theme = theme();
    let long = "word ".repeat(90);
    let anchor = compute_content_anchor(&["short", long.as_str()]);
    let mut a = inputs(&theme, "short", false);
    let mut b = inputs(&theme, long.as_str(), true);
    a.anchor = anchor;
    b.anchor = anchor;
    let fa = compose_text_slide(&a);
    let fb = compose_text_slide(&b);
    assert_eq!(
        fa.find_text("The Healthy College").unwrap().center_y,
        fb.find_text("The Healthy College").unwrap().center_y
    );
}
