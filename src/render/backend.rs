use crate::assets::fonts::FontBook;
use crate::compose::frame::Frame;
use crate::foundation::error::SlideResult;

/// A rendered slide as RGBA8 pixels.
///
/// Rasterizer output is **premultiplied alpha**; the `premultiplied` flag makes this explicit
/// at API boundaries so encoders know whether to unpremultiply.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 value of the pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Turns composed frames into pixels.
pub trait Rasterizer {
    fn rasterize(&mut self, frame: &Frame, fonts: &mut FontBook) -> SlideResult<FrameRGBA>;
}
