use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::fonts::FontBook;
use crate::assets::store::PreparedImage;
use crate::compose::frame::{Frame, GradientStop, ImageClip, Layer, TextAlign, TextLayer};
use crate::foundation::core::{Affine, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{SlideError, SlideResult};
use crate::render::backend::{FrameRGBA, Rasterizer};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    stops: Vec<(u64, [u8; 4])>,
    w: u32,
    h: u32,
}

impl GradientKey {
    fn new(stops: &[GradientStop], w: u32, h: u32) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|s| {
                    let c = s.color;
                    (s.offset.to_bits(), [c.r, c.g, c.b, c.a])
                })
                .collect(),
            w,
            h,
        }
    }
}

/// Image paints kept alive between frames. One request uses at most a background and three
/// decorations.
const IMAGE_CACHE_CAPACITY: usize = 8;

/// Rasterizer powered by `vello_cpu`.
///
/// The render context is reused across frames of the same size. Image paints are cached by
/// the identity of their shared pixel buffer, so a logo drawn on every slide is converted
/// once per request. The cache evicts least recently used paints past
/// `IMAGE_CACHE_CAPACITY`.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    image_cache: HashMap<usize, (Arc<PreparedImage>, vello_cpu::Image)>,
    image_lru: VecDeque<usize>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> SlideResult<R>,
    ) -> SlideResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn image_paint_for(&mut self, image: &Arc<PreparedImage>) -> SlideResult<vello_cpu::Image> {
        let key = Arc::as_ptr(image) as usize;
        if let Some((held, paint)) = self.image_cache.get(&key)
            && Arc::ptr_eq(held, image)
        {
            let paint = paint.clone();
            self.touch_image(key);
            return Ok(paint);
        }
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        self.image_cache
            .insert(key, (Arc::clone(image), paint.clone()));
        self.touch_image(key);
        while self.image_lru.len() > IMAGE_CACHE_CAPACITY {
            if let Some(old) = self.image_lru.pop_front() {
                self.image_cache.remove(&old);
            }
        }
        Ok(paint)
    }

    fn touch_image(&mut self, key: usize) {
        if let Some(pos) = self.image_lru.iter().position(|k| *k == key) {
            self.image_lru.remove(pos);
        }
        self.image_lru.push_back(key);
    }

    fn gradient_paint(
        &mut self,
        stops: &[GradientStop],
        w: u32,
        h: u32,
    ) -> SlideResult<vello_cpu::Image> {
        let key = GradientKey::new(stops, w, h);
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        let h1 = f64::from(h.max(1) - 1);
        for y in 0..h {
            let t = if h1 <= 0.0 { 0.0 } else { f64::from(y) / h1 };
            let c = sample_gradient(stops, t).to_premul().to_array();
            for x in 0..w {
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    fn draw_layer(
        &mut self,
        layer: &Layer,
        fonts: &mut FontBook,
        ctx: &mut vello_cpu::RenderContext,
    ) -> SlideResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match layer {
            Layer::SolidRect { rect, color } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
                Ok(())
            }
            Layer::Ellipse { rect, color } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&ellipse_path(*rect));
                Ok(())
            }
            Layer::GradientRect { rect, stops } => {
                if stops.is_empty() || rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return Ok(());
                }
                let w = rect.width().ceil().max(1.0) as u32;
                let h = rect.height().ceil().max(1.0) as u32;
                let img = self.gradient_paint(stops, w, h)?;
                ctx.set_transform(affine_to_cpu(Affine::translate((rect.x0, rect.y0))));
                ctx.set_paint(img);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    rect.width(),
                    rect.height(),
                ));
                Ok(())
            }
            Layer::Line {
                from,
                to,
                width,
                color,
            } => {
                let Some(path) = line_path(*from, *to, *width) else {
                    return Ok(());
                };
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&path);
                Ok(())
            }
            Layer::Image { image, rect, clip } => {
                if image.width == 0 || image.height == 0 {
                    return Ok(());
                }
                let paint = self.image_paint_for(image)?;
                let iw = f64::from(image.width);
                let ih = f64::from(image.height);
                let tr = Affine::translate((rect.x0, rect.y0))
                    * Affine::scale_non_uniform(rect.width() / iw, rect.height() / ih);
                ctx.set_transform(affine_to_cpu(tr));
                ctx.set_paint(paint);
                let local = Rect::new(0.0, 0.0, iw, ih);
                match clip {
                    ImageClip::None => ctx.fill_rect(&rect_to_cpu(local)),
                    ImageClip::Circle => ctx.fill_path(&ellipse_path(local)),
                }
                Ok(())
            }
            Layer::Text(text) => draw_text(text, fonts, ctx),
        }
    }
}

impl Rasterizer for CpuRasterizer {
    #[tracing::instrument(level = "debug", skip_all, fields(layers = frame.layers().len()))]
    fn rasterize(&mut self, frame: &Frame, fonts: &mut FontBook) -> SlideResult<FrameRGBA> {
        let canvas = frame.canvas();
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SlideError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SlideError::render("canvas height exceeds u16"))?;

        self.with_ctx_mut(w, h, |this, ctx| {
            for layer in frame.layers() {
                this.draw_layer(layer, fonts, ctx)?;
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }
}

fn draw_text(
    text: &TextLayer,
    fonts: &mut FontBook,
    ctx: &mut vello_cpu::RenderContext,
) -> SlideResult<()> {
    if text.text.trim().is_empty() {
        return Ok(());
    }
    let Some(shaped) = fonts.shape_line(text.family, &text.text, text.size)? else {
        return Ok(());
    };

    let x = match text.align {
        TextAlign::Left => text.x,
        TextAlign::Center => text.x + (text.box_width - shaped.width()) / 2.0,
        TextAlign::Right => text.x + text.box_width - shaped.width(),
    };
    let y = text.center_y - shaped.height() / 2.0;

    ctx.set_transform(affine_to_cpu(Affine::translate((x, y))));
    ctx.set_paint(color_to_cpu(text.color));
    for line in shaped.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&shaped.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

/// Interpolate straight colors between the stops bracketing `t`.
fn sample_gradient(stops: &[GradientStop], t: f64) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8::rgba(0, 0, 0, 0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            let lerp = |x: u8, y: u8| -> u8 {
                let xf = f64::from(x);
                let yf = f64::from(y);
                (xf + (yf - xf) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8::rgba(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            );
        }
    }
    stops[stops.len() - 1].color
}

/// Filled quad covering a stroke of `width` from `from` to `to`.
fn line_path(from: Point, to: Point, width: f64) -> Option<vello_cpu::kurbo::BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len <= 0.0 || width <= 0.0 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (width / 2.0 / len);
    let mut path = kurbo::BezPath::new();
    path.move_to(from + n);
    path.line_to(to + n);
    path.line_to(to - n);
    path.line_to(from - n);
    path.close_path();
    Some(bezpath_to_cpu(&path))
}

fn ellipse_path(rect: Rect) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&kurbo::Ellipse::from_rect(rect).to_path(0.1))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SlideResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlideError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlideError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SlideError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> SlideResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
