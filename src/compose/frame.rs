//! Backend-agnostic description of one slide.
//!
//! A [`Frame`] is an ordered list of draw layers with absolute geometry, painted bottom to top
//! by a single rasterization pass. Composers only build frames; they never touch pixels.

use std::sync::Arc;

use crate::assets::fonts::FontFamily;
use crate::assets::store::PreparedImage;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};

/// Horizontal placement of a text line inside its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// How an image layer is masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageClip {
    None,
    /// Ellipse inscribed in the destination rect (a circle for square rects).
    Circle,
}

/// A color stop of a vertical gradient; `offset` is 0 at the top edge and 1 at the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
}

/// A single line of text.
///
/// The line is placed inside the box `[x, x + box_width]` according to `align`, and its line
/// box is vertically centered on `center_y`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub family: FontFamily,
    pub size: f64,
    pub color: Rgba8,
    pub x: f64,
    pub box_width: f64,
    pub align: TextAlign,
    pub center_y: f64,
}

#[derive(Clone, Debug)]
pub enum Layer {
    /// Raster image stretched to `rect`.
    Image {
        image: Arc<PreparedImage>,
        rect: Rect,
        clip: ImageClip,
    },
    SolidRect {
        rect: Rect,
        color: Rgba8,
    },
    /// Filled ellipse inscribed in `rect`.
    Ellipse {
        rect: Rect,
        color: Rgba8,
    },
    /// Top-to-bottom gradient filling `rect`.
    GradientRect {
        rect: Rect,
        stops: Vec<GradientStop>,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
    Text(TextLayer),
}

/// Composed slide, opaque until rasterized.
#[derive(Clone, Debug)]
pub struct Frame {
    canvas: Canvas,
    layers: Vec<Layer>,
}

impl Frame {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Text layers in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Find the first text layer whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&TextLayer> {
        self.texts().find(|t| t.text == text)
    }
}

/// Accumulates layers in paint order.
#[derive(Debug)]
pub struct FrameBuilder {
    canvas: Canvas,
    layers: Vec<Layer>,
}

impl FrameBuilder {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            layers: Vec::new(),
        }
    }

    pub fn image(&mut self, image: Arc<PreparedImage>, rect: Rect, clip: ImageClip) -> &mut Self {
        self.layers.push(Layer::Image { image, rect, clip });
        self
    }

    pub fn solid_rect(&mut self, rect: Rect, color: Rgba8) -> &mut Self {
        self.layers.push(Layer::SolidRect { rect, color });
        self
    }

    pub fn ellipse(&mut self, rect: Rect, color: Rgba8) -> &mut Self {
        self.layers.push(Layer::Ellipse { rect, color });
        self
    }

    pub fn gradient(&mut self, rect: Rect, stops: Vec<GradientStop>) -> &mut Self {
        self.layers.push(Layer::GradientRect { rect, stops });
        self
    }

    pub fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) -> &mut Self {
        self.layers.push(Layer::Line {
            from,
            to,
            width,
            color,
        });
        self
    }

    pub fn text(&mut self, text: TextLayer) -> &mut Self {
        self.layers.push(Layer::Text(text));
        self
    }

    pub fn build(self) -> Frame {
        Frame {
            canvas: self.canvas,
            layers: self.layers,
        }
    }
}
