use super::*;
use crate::brand::registry::{BrandRegistry, StaticBrandRegistry};
use crate::compose::frame::Layer;
use crate::layout::balance::layout_title;

fn theme() -> BrandTheme {
    StaticBrandRegistry::builtin()
        .resolve("healthy-college")
        .unwrap()
}

fn background() -> Arc<PreparedImage> {
    Arc::new(PreparedImage::solid(4, 5, [20, 40, 60, 255]))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn geometry_is_built_bottom_up() {
    let title = layout_title("The secret to better sleep every night", COVER_TITLE_MAX_WIDTH);
    let geo = CoverGeometry::for_title(&title);
    assert!(approx(geo.caption_top, 1350.0 - 60.0 - 28.0));
    assert!(approx(geo.title_bottom, geo.caption_top - 50.0));
    let last = title.line_count() - 1;
    assert!(approx(
        geo.line_center_y(last) + geo.line_height / 2.0,
        geo.title_bottom
    ));
    assert!(approx(geo.logo_center_y, geo.title_top - 40.0 - 36.0));
}

#[test]
fn more_lines_push_the_logo_row_up() {
    let short = layout_title("Sleep", COVER_TITLE_MAX_WIDTH);
    let long = layout_title(
        "Why you should stop counting calories and start counting plants on your plate",
        COVER_TITLE_MAX_WIDTH,
    );
    assert!(long.line_count() > short.line_count());
    assert!(
        CoverGeometry::for_title(&long).logo_center_y
            < CoverGeometry::for_title(&short).logo_center_y
    );
}

#[test]
fn layers_follow_paint_order() {
    let theme = theme();
    let title = layout_title("Five habits of people who never get sick", COVER_TITLE_MAX_WIDTH);
    let frame = compose_cover(&CoverInputs {
        theme: &theme,
        title: &title,
        background: background(),
    });
    let layers = frame.layers();

    assert!(matches!(
        &layers[0],
        Layer::Image { rect, clip: ImageClip::None, .. } if *rect == Canvas::CAROUSEL.rect()
    ));
    let Layer::GradientRect { rect, stops } = &layers[1] else {
        panic!("expected gradient, got {:?}", layers[1]);
    };
    assert!(approx(rect.y0, 540.0));
    assert!(approx(rect.y1, 1350.0));
    let alphas: Vec<u8> = stops.iter().map(|s| s.color.a).collect();
    assert_eq!(alphas, vec![0, 128, 242]);

    assert!(matches!(layers[2], Layer::Line { .. }));
    assert!(matches!(layers[3], Layer::Line { .. }));
    assert!(matches!(
        layers[4],
        Layer::Ellipse { color, .. } if color == theme.primary_color
    ));

    let texts: Vec<&str> = frame.texts().map(|t| t.text.as_str()).collect();
    let mut expected = vec!["THC"];
    expected.extend(title.lines.iter().map(String::as_str));
    expected.push(COVER_CAPTION);
    assert_eq!(texts, expected);
}

#[test]
fn title_lines_are_centered_display_text() {
    let theme = theme();
    let title = layout_title("How to build strong bones after thirty", COVER_TITLE_MAX_WIDTH);
    let frame = compose_cover(&CoverInputs {
        theme: &theme,
        title: &title,
        background: background(),
    });
    let geo = CoverGeometry::for_title(&title);
    for (i, line) in title.lines.iter().enumerate() {
        let t = frame.find_text(line).unwrap();
        assert_eq!(t.family, FontFamily::Anton);
        assert_eq!(t.align, TextAlign::Center);
        assert!(approx(t.size, f64::from(title.font_size)));
        assert!(approx(t.x, 45.0));
        assert!(approx(t.box_width, 990.0));
        assert!(approx(t.center_y, geo.line_center_y(i)));
    }
    let caption = frame.find_text(COVER_CAPTION).unwrap();
    assert_eq!(caption.family, FontFamily::Inter);
    assert!(approx(caption.center_y, geo.caption_center_y));
}

#[test]
fn rules_stop_short_of_the_badge() {
    let theme = theme();
    let title = layout_title("Sleep", COVER_TITLE_MAX_WIDTH);
    let frame = compose_cover(&CoverInputs {
        theme: &theme,
        title: &title,
        background: background(),
    });
    let Layer::Line { from, to, width, .. } = &frame.layers()[2] else {
        panic!("expected rule");
    };
    assert!(approx(from.x, 45.0));
    assert!(approx(to.x, 540.0 - 36.0 - 24.0));
    assert!(approx(*width, 2.0));
    let Layer::Line { from, to, .. } = &frame.layers()[3] else {
        panic!("expected rule");
    };
    assert!(approx(from.x, 540.0 + 36.0 + 24.0));
    assert!(approx(to.x, 1080.0 - 45.0));
}
