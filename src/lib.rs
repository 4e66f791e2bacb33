//! Slidewright lays out and rasterizes branded carousel slides.
//!
//! A request carries a title, a background image and a list of body texts. Slidewright renders
//! one cover slide and one text slide per body as 1080x1350 PNGs:
//!
//! - Layout is decided up front from a fixed character-width estimate ([`plan_request`])
//! - Each slide is composed into an ordered list of draw layers ([`Frame`])
//! - A [`RenderSession`] rasterizes the frames on the CPU and writes the PNGs
#![forbid(unsafe_code)]

mod assets;
mod brand;
mod compose;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;
mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{SlideError, SlideResult};

pub use crate::assets::fonts::{FontBook, FontFamily};
pub use crate::assets::store::{AssetSource, FsAssetSource, PreparedImage};
pub use crate::brand::registry::{BrandRegistry, StaticBrandRegistry};
pub use crate::brand::theme::BrandTheme;
pub use crate::compose::cover::{CoverInputs, compose_cover};
pub use crate::compose::frame::{
    Frame, FrameBuilder, GradientStop, ImageClip, Layer, TextAlign, TextLayer,
};
pub use crate::compose::text::{TextSlideInputs, compose_text_slide};
pub use crate::encode::png::{PngCompression, encode_png, write_output};
pub use crate::layout::anchor::{ContentAnchor, compute_content_anchor};
pub use crate::layout::balance::{TitleLayout, balance_title_text, layout_title};
pub use crate::layout::fit::{FitDecision, auto_fit_font_size, fit_title_font_size};
pub use crate::layout::metrics::{count_lines, estimate_char_width, max_chars_per_line};
pub use crate::layout::placeholder::substitute_handle;
pub use crate::render::backend::{FrameRGBA, Rasterizer};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::scene::input::RenderInput;
pub use crate::session::manifest::{Envelope, Failure, Manifest};
pub use crate::session::render_session::{
    BodyPlan, FontPaths, RenderRequest, RenderSession, RenderSessionOpts, SlidePlan, plan_request,
};

/// Layout constants shared with the preview renderer.
pub mod consts {
    pub use crate::layout::consts::*;
}
