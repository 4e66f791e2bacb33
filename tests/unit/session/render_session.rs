use std::collections::HashMap;
use std::io::Cursor;

use super::*;
use crate::brand::registry::{BrandRegistry, StaticBrandRegistry};
use crate::foundation::error::SlideError;

#[derive(Default)]
struct MemSource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl AssetSource for MemSource {
    fn read_bytes(&self, path: &Path) -> SlideResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SlideError::asset(format!("no such file '{}'", path.display())))
    }
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "slidewright_{}_{}_{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([40, 90, 140, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn request(out: &Path, bodies: &[&str], outputs: usize) -> RenderRequest {
    let theme = StaticBrandRegistry::builtin()
        .resolve("healthy-college")
        .unwrap();
    RenderRequest {
        theme,
        title: "The secret to better sleep every night".to_string(),
        background_image: PathBuf::from("bg.png"),
        body_texts: bodies.iter().map(|s| s.to_string()).collect(),
        cover_output: out.join("cover.png"),
        slide_outputs: (1..=outputs)
            .map(|i| out.join(format!("slide_{i}.png")))
            .collect(),
        logo_path: None,
        share_icon_path: None,
        save_icon_path: None,
        font_paths: FontPaths::default(),
    }
}

fn session(files: MemSource) -> RenderSession {
    RenderSession::new(RenderSessionOpts {
        png_compression: PngCompression::Fast,
        system_font_fallback: false,
        ..RenderSessionOpts::default()
    })
    .with_assets(files)
}

fn with_background() -> MemSource {
    let mut src = MemSource::default();
    src.files.insert(PathBuf::from("bg.png"), png_bytes(8, 10));
    src
}

#[test]
fn default_opts_write_atomically() {
    let opts = RenderSessionOpts::default();
    assert_eq!(opts.png_compression, PngCompression::Default);
    assert!(opts.atomic_writes);
    assert!(opts.system_font_fallback);
}

#[test]
fn plan_substitutes_handles_before_wrapping() {
    let req = request(Path::new("out"), &["Follow @{brandhandle} today"], 1);
    let plan = plan_request(&req);
    assert_eq!(plan.bodies[0].text, "Follow @thehealthycollege today");
    assert_eq!(plan.bodies[0].lines, vec!["Follow @thehealthycollege today"]);
}

#[test]
fn only_the_final_body_is_last() {
    let req = request(Path::new("out"), &["one", "two", "three"], 3);
    let plan = plan_request(&req);
    let flags: Vec<bool> = plan.bodies.iter().map(|b| b.is_last).collect();
    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn anchor_is_computed_over_the_whole_batch() {
    let long = "word ".repeat(120);
    let req = request(Path::new("out"), &["short", long.as_str()], 2);
    let plan = plan_request(&req);
    assert_eq!(plan.anchor, compute_content_anchor(&["short", long.as_str()]));
    assert_eq!(plan.cover, layout_title(&req.title, COVER_TITLE_MAX_WIDTH));
}

#[test]
fn planning_is_deterministic() {
    let req = request(Path::new("out"), &["a b c", "Save this for later @[brandhandle]"], 2);
    assert_eq!(plan_request(&req), plan_request(&req));
}

#[test]
fn render_writes_cover_and_slides() {
    let out = temp_dir("session_render");
    let req = request(&out, &["First tip", "Second tip\nwith a break"], 2);
    let manifest = session(with_background()).render(&req).unwrap();

    assert!(manifest.success);
    assert_eq!(manifest.cover_path, out.join("cover.png"));
    assert_eq!(
        manifest.slide_paths,
        vec![out.join("slide_1.png"), out.join("slide_2.png")]
    );
    for p in std::iter::once(&manifest.cover_path).chain(&manifest.slide_paths) {
        let img = image::open(p).unwrap();
        assert_eq!((img.width(), img.height()), (1080, 1350));
    }
    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn bodies_without_outputs_are_skipped() {
    let out = temp_dir("session_short_outputs");
    let req = request(&out, &["one", "two", "three"], 1);
    let manifest = session(with_background()).render(&req).unwrap();
    assert_eq!(manifest.slide_paths, vec![out.join("slide_1.png")]);
    assert!(!out.join("slide_2.png").exists());
    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn missing_background_aborts_before_writing() {
    let out = temp_dir("session_no_background");
    let req = request(&out, &["one"], 1);
    let err = session(MemSource::default()).render(&req).unwrap_err();
    assert!(matches!(err, SlideError::Asset(_)));
    assert!(!req.cover_output.exists());
}

#[test]
fn broken_decorations_and_fonts_fall_back() {
    let out = temp_dir("session_fallbacks");
    let mut src = with_background();
    src.files.insert(PathBuf::from("logo.png"), b"not a png".to_vec());
    src.files.insert(PathBuf::from("anton.ttf"), b"not a font".to_vec());

    let mut req = request(&out, &["one"], 1);
    req.logo_path = Some(PathBuf::from("logo.png"));
    req.share_icon_path = Some(PathBuf::from("missing.svg"));
    req.font_paths.anton = Some(PathBuf::from("anton.ttf"));

    let manifest = session(src).render(&req).unwrap();
    assert_eq!(manifest.slide_paths.len(), 1);
    let _ = std::fs::remove_dir_all(&out);
}
