use super::*;
use crate::brand::registry::StaticBrandRegistry;

const FULL: &str = r#"{
  "brand": "healthy-college",
  "title": "The secret to better sleep every night",
  "backgroundImage": "/tmp/bg.jpg",
  "slideTexts": ["First", "Follow @{brandhandle}"],
  "coverOutput": "/tmp/out/cover.png",
  "slideOutputs": ["/tmp/out/slide_1.png", "/tmp/out/slide_2.png"],
  "logoPath": "/tmp/logo.png",
  "shareIconPath": "/tmp/share.svg",
  "saveIconPath": "/tmp/save.svg",
  "fontPaths": { "anton": "/fonts/Anton-Regular.ttf", "inter": "/fonts/Inter.ttf" }
}"#;

#[test]
fn parses_camel_case_fields() {
    let input = RenderInput::from_reader(FULL.as_bytes()).unwrap();
    assert_eq!(input.brand, "healthy-college");
    assert_eq!(input.slide_texts.len(), 2);
    assert_eq!(input.slide_outputs[1], PathBuf::from("/tmp/out/slide_2.png"));
    assert_eq!(input.share_icon_path, Some(PathBuf::from("/tmp/share.svg")));
    assert_eq!(
        input.font_paths.anton,
        Some(PathBuf::from("/fonts/Anton-Regular.ttf"))
    );
}

#[test]
fn optional_fields_default_to_empty() {
    let input = RenderInput::from_reader(
        r#"{"brand":"x","title":"t","backgroundImage":"bg.png","coverOutput":"c.png"}"#.as_bytes(),
    )
    .unwrap();
    assert!(input.slide_texts.is_empty());
    assert!(input.slide_outputs.is_empty());
    assert!(input.logo_path.is_none());
    assert_eq!(input.font_paths, FontPathsInput::default());
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = RenderInput::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
    let err = RenderInput::from_reader(r#"{"brand":"x"}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("title"));
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = RenderInput::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
}

#[test]
fn request_uses_registry_theme() {
    let req = RenderInput::from_reader(FULL.as_bytes())
        .unwrap()
        .into_request(&StaticBrandRegistry::builtin())
        .unwrap();
    assert_eq!(req.theme.display_name, "The Healthy College");
    assert_eq!(req.theme.handle, "@thehealthycollege");
    assert_eq!(req.body_texts, vec!["First", "Follow @{brandhandle}"]);
    assert_eq!(
        req.font_paths.inter,
        Some(PathBuf::from("/fonts/Inter.ttf"))
    );
}

#[test]
fn theme_overrides_apply_on_top_of_registry() {
    let json = r##"{
      "brand": "healthy-college",
      "brandTheme": { "handle": "campus_eats", "primaryColor": "#ff0000" },
      "title": "t", "backgroundImage": "bg.png", "coverOutput": "c.png"
    }"##;
    let req = RenderInput::from_reader(json.as_bytes())
        .unwrap()
        .into_request(&StaticBrandRegistry::builtin())
        .unwrap();
    assert_eq!(req.theme.handle, "@campus_eats");
    assert_eq!(req.theme.primary_color, Rgba8::rgb(255, 0, 0));
    assert_eq!(req.theme.display_name, "The Healthy College");
}

#[test]
fn unknown_brand_respects_registry_policy() {
    let input = || {
        RenderInput::from_reader(
            r#"{"brand":"sunday-reset","title":"t","backgroundImage":"bg.png","coverOutput":"c.png"}"#
                .as_bytes(),
        )
        .unwrap()
    };
    assert!(input().into_request(&StaticBrandRegistry::new()).is_err());
    let req = input().into_request(&StaticBrandRegistry::builtin()).unwrap();
    assert_eq!(req.theme.display_name, "Sunday Reset");
}

#[test]
fn empty_background_path_is_rejected() {
    let err = RenderInput::from_reader(
        r#"{"brand":"x","title":"t","backgroundImage":"","coverOutput":"c.png"}"#.as_bytes(),
    )
    .unwrap()
    .into_request(&StaticBrandRegistry::builtin())
    .unwrap_err();
    assert!(matches!(err, SlideError::Validation(_)));
}
