use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::fonts::{FontBook, FontFamily};
use crate::assets::store::{
    AssetSource, FsAssetSource, PreparedImage, load_optional_image, load_required_image,
};
use crate::brand::theme::BrandTheme;
use crate::compose::cover::{CoverInputs, compose_cover};
use crate::compose::frame::Frame;
use crate::compose::text::{TextSlideInputs, compose_text_slide};
use crate::encode::png::{PngCompression, encode_png, write_output};
use crate::foundation::error::SlideResult;
use crate::layout::anchor::{ContentAnchor, compute_content_anchor};
use crate::layout::balance::{TitleLayout, layout_title};
use crate::layout::consts::COVER_TITLE_MAX_WIDTH;
use crate::layout::metrics::wrap_body;
use crate::layout::placeholder::substitute_handle;
use crate::render::backend::Rasterizer;
use crate::render::cpu::CpuRasterizer;
use crate::session::manifest::Manifest;

/// Font files to register before drawing. Missing entries fall back to system fonts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontPaths {
    pub anton: Option<PathBuf>,
    pub inter: Option<PathBuf>,
}

impl FontPaths {
    fn get(&self, family: FontFamily) -> Option<&Path> {
        match family {
            FontFamily::Anton => self.anton.as_deref(),
            FontFamily::Inter => self.inter.as_deref(),
        }
    }
}

/// One carousel to render: a cover plus one text slide per body.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub theme: BrandTheme,
    pub title: String,
    pub background_image: PathBuf,
    pub body_texts: Vec<String>,
    pub cover_output: PathBuf,
    /// Output per body text. Bodies past the end of this list are not rendered.
    pub slide_outputs: Vec<PathBuf>,
    pub logo_path: Option<PathBuf>,
    pub share_icon_path: Option<PathBuf>,
    pub save_icon_path: Option<PathBuf>,
    pub font_paths: FontPaths,
}

/// Options for [`RenderSession`].
#[derive(Clone, Copy, Debug)]
pub struct RenderSessionOpts {
    pub png_compression: PngCompression,
    /// Write each PNG to a temp sibling and rename it into place.
    pub atomic_writes: bool,
    /// Use installed fonts for roles without a registered font file.
    pub system_font_fallback: bool,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            png_compression: PngCompression::Default,
            atomic_writes: true,
            system_font_fallback: true,
        }
    }
}

impl RenderSessionOpts {
    /// Defaults overridden by `SLIDEWRIGHT_PNG_COMPRESSION` (`fast|default|best`).
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(v) = std::env::var("SLIDEWRIGHT_PNG_COMPRESSION") {
            match PngCompression::parse(&v) {
                Some(c) => opts.png_compression = c,
                None => tracing::warn!(value = %v, "ignoring invalid SLIDEWRIGHT_PNG_COMPRESSION"),
            }
        }
        opts
    }
}

/// Layout decisions for one text slide.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyPlan {
    /// Body with handle placeholders substituted.
    pub text: String,
    pub lines: Vec<String>,
    pub is_last: bool,
}

/// Every layout decision of a request, computed before any pixel is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidePlan {
    pub cover: TitleLayout,
    pub anchor: ContentAnchor,
    pub bodies: Vec<BodyPlan>,
}

/// Lay out a request without touching assets or fonts.
pub fn plan_request(req: &RenderRequest) -> SlidePlan {
    let cover = layout_title(&req.title, COVER_TITLE_MAX_WIDTH);

    let texts: Vec<String> = req
        .body_texts
        .iter()
        .map(|t| substitute_handle(t, &req.theme.handle))
        .collect();
    let anchor = compute_content_anchor(&texts);

    let n = texts.len();
    let bodies = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| BodyPlan {
            lines: wrap_body(&text),
            text,
            is_last: i + 1 == n,
        })
        .collect();

    tracing::debug!(
        title_lines = cover.line_count(),
        font_size = cover.font_size,
        anchor = anchor.y(),
        "planned request"
    );
    SlidePlan {
        cover,
        anchor,
        bodies,
    }
}

struct Decorations {
    logo: Option<Arc<PreparedImage>>,
    share_icon: Option<Arc<PreparedImage>>,
    save_icon: Option<Arc<PreparedImage>>,
}

/// Renders requests to PNG files.
///
/// A session keeps the rasterizer and registered fonts alive between requests, so repeated
/// renders reuse the render context and image paints.
pub struct RenderSession {
    opts: RenderSessionOpts,
    assets: Box<dyn AssetSource>,
    rasterizer: Box<dyn Rasterizer>,
    fonts: FontBook,
}

impl RenderSession {
    /// File-system backed session with the CPU rasterizer.
    pub fn new(opts: RenderSessionOpts) -> Self {
        let fonts = if opts.system_font_fallback {
            FontBook::new()
        } else {
            FontBook::without_system_fallback()
        };
        Self {
            opts,
            assets: Box::new(FsAssetSource::new()),
            rasterizer: Box::new(CpuRasterizer::new()),
            fonts,
        }
    }

    /// Replace the asset source (e.g. an in-memory one in tests).
    pub fn with_assets(mut self, assets: impl AssetSource + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    pub fn opts(&self) -> RenderSessionOpts {
        self.opts
    }

    /// Render the cover and every text slide that has an output path.
    ///
    /// A background that cannot be loaded aborts the render before anything is written.
    /// Later failures abort the remaining slides; files already written stay on disk.
    #[tracing::instrument(level = "info", skip_all, fields(brand = %req.theme.id, slides = req.body_texts.len()))]
    pub fn render(&mut self, req: &RenderRequest) -> SlideResult<Manifest> {
        self.register_fonts(&req.font_paths);

        let background =
            load_required_image(&*self.assets, &req.background_image, "background image")?;
        let deco = Decorations {
            logo: load_optional_image(&*self.assets, req.logo_path.as_deref(), "logo"),
            share_icon: load_optional_image(
                &*self.assets,
                req.share_icon_path.as_deref(),
                "share icon",
            ),
            save_icon: load_optional_image(
                &*self.assets,
                req.save_icon_path.as_deref(),
                "save icon",
            ),
        };

        let plan = plan_request(req);

        let cover = compose_cover(&CoverInputs {
            theme: &req.theme,
            title: &plan.cover,
            background,
        });
        self.write_frame(&cover, &req.cover_output)?;

        let mut slide_paths = Vec::with_capacity(plan.bodies.len());
        for (i, body) in plan.bodies.iter().enumerate() {
            let Some(out) = req.slide_outputs.get(i) else {
                tracing::warn!(slide = i + 1, "no output path for slide, skipping");
                continue;
            };
            let frame = compose_text_slide(&TextSlideInputs {
                theme: &req.theme,
                body: &body.text,
                anchor: plan.anchor,
                logo: deco.logo.clone(),
                share_icon: deco.share_icon.clone(),
                save_icon: deco.save_icon.clone(),
                is_last: body.is_last,
            });
            self.write_frame(&frame, out)?;
            slide_paths.push(out.clone());
        }

        Ok(Manifest::new(req.cover_output.clone(), slide_paths))
    }

    fn register_fonts(&mut self, paths: &FontPaths) {
        for family in FontFamily::ALL {
            let Some(path) = paths.get(family) else {
                continue;
            };
            let res = self
                .assets
                .read_bytes(path)
                .and_then(|bytes| self.fonts.register(family, bytes));
            if let Err(e) = res {
                tracing::warn!(role = family.name(), path = %path.display(), error = %e, "font unavailable, using fallback");
            }
        }
    }

    fn write_frame(&mut self, frame: &Frame, path: &Path) -> SlideResult<()> {
        let rgba = self.rasterizer.rasterize(frame, &mut self.fonts)?;
        let png = encode_png(&rgba, self.opts.png_compression)?;
        write_output(path, &png, self.opts.atomic_writes)?;
        tracing::debug!(path = %path.display(), bytes = png.len(), "wrote slide");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
