//! Font registration and line shaping.
//!
//! Fonts are registered under two fixed roles before anything is drawn: a condensed display
//! face for titles and badges, and a text face for everything else. Layout never consults
//! these fonts (it uses the width estimate in `layout::metrics`); they only shape the glyphs
//! that end up in the pixels.

use std::borrow::Cow;

use crate::foundation::error::{SlideError, SlideResult};

/// Font role used by text layers, named after the faces the templates are designed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Display face for titles and badges.
    Anton,
    /// Text face for body copy, header and labels.
    Inter,
}

impl FontFamily {
    pub const ALL: [FontFamily; 2] = [FontFamily::Anton, FontFamily::Inter];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Anton => "Anton",
            FontFamily::Inter => "Inter",
        }
    }

    fn slot(self) -> usize {
        match self {
            FontFamily::Anton => 0,
            FontFamily::Inter => 1,
        }
    }

    /// Installed families tried, in order, when no font file was registered.
    fn system_candidates(self) -> &'static [&'static str] {
        match self {
            FontFamily::Anton => &["Anton", "Oswald", "Bebas Neue", "Impact", "DejaVu Sans"],
            FontFamily::Inter => &[
                "Inter",
                "Helvetica Neue",
                "Arial",
                "Liberation Sans",
                "Noto Sans",
                "DejaVu Sans",
            ],
        }
    }

    fn system_weight(self) -> usvg::fontdb::Weight {
        match self {
            FontFamily::Anton => usvg::fontdb::Weight::BOLD,
            FontFamily::Inter => usvg::fontdb::Weight::NORMAL,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone)]
struct RegisteredFace {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// One shaped line of text plus the font its glyph ids refer to.
pub struct ShapedLine {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub font: vello_cpu::peniko::FontData,
}

impl ShapedLine {
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }
}

/// Registered fonts and the Parley contexts used to shape with them.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: [Option<RegisteredFace>; 2],
    fallback_done: [bool; 2],
    system_fallback: bool,
    system_db: Option<usvg::fontdb::Database>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Empty book that falls back to installed system fonts for unregistered roles.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: [None, None],
            fallback_done: [false, false],
            system_fallback: true,
            system_db: None,
        }
    }

    /// Empty book that never looks at system fonts; unregistered roles draw nothing.
    pub fn without_system_fallback() -> Self {
        Self {
            system_fallback: false,
            ..Self::new()
        }
    }

    /// Register font file bytes for `family`, replacing any earlier registration.
    pub fn register(&mut self, family: FontFamily, bytes: Vec<u8>) -> SlideResult<()> {
        let face = self.register_face(bytes, 0)?;
        tracing::debug!(role = family.name(), family = %face.family_name, "registered font");
        self.faces[family.slot()] = Some(face);
        Ok(())
    }

    pub fn is_registered(&self, family: FontFamily) -> bool {
        self.faces[family.slot()].is_some()
    }

    /// Shape `text` on a single line at `size_px`.
    ///
    /// Returns `Ok(None)` when no font is available for `family` at all.
    pub fn shape_line(
        &mut self,
        family: FontFamily,
        text: &str,
        size_px: f64,
    ) -> SlideResult<Option<ShapedLine>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SlideError::layout("text size must be finite and > 0"));
        }
        let Some(face) = self.face_for(family) else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(
            TextBrushRgba8::default(),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(Some(ShapedLine {
            layout,
            font: face.font,
        }))
    }

    fn face_for(&mut self, family: FontFamily) -> Option<RegisteredFace> {
        let slot = family.slot();
        if self.faces[slot].is_none() && self.system_fallback && !self.fallback_done[slot] {
            self.fallback_done[slot] = true;
            match self.load_system_face(family) {
                Some(face) => {
                    tracing::warn!(
                        role = family.name(),
                        family = %face.family_name,
                        "no font registered, using system font"
                    );
                    self.faces[slot] = Some(face);
                }
                None => {
                    tracing::warn!(role = family.name(), "no font available, text will be skipped");
                }
            }
        }
        self.faces[slot].clone()
    }

    fn load_system_face(&mut self, family: FontFamily) -> Option<RegisteredFace> {
        use usvg::fontdb::{Database, Family, Query, Stretch, Style};

        let db = self.system_db.get_or_insert_with(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            db
        });
        let mut families: Vec<Family<'_>> = family
            .system_candidates()
            .iter()
            .map(|&name| Family::Name(name))
            .collect();
        families.push(Family::SansSerif);

        let query = Query {
            families: &families,
            weight: family.system_weight(),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))?;
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        self.register_face(bytes, index).ok()
    }

    fn register_face(&mut self, bytes: Vec<u8>, index: u32) -> SlideResult<RegisteredFace> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SlideError::validation("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideError::validation("registered font family has no name"))?
            .to_string();

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index);
        Ok(RegisteredFace { family_name, font })
    }
}
