//! JSON request accepted by the `slidewright` binary.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::brand::registry::BrandRegistry;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideError, SlideResult};
use crate::layout::placeholder::normalize_handle;
use crate::session::render_session::{FontPaths, RenderRequest};

/// Render request as written by callers, field names in camelCase.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    /// Brand id resolved through a [`BrandRegistry`].
    pub brand: String,
    /// Per-request overrides applied on top of the resolved theme.
    #[serde(default)]
    pub brand_theme: Option<BrandThemeInput>,
    pub title: String,
    pub background_image: PathBuf,
    #[serde(default)]
    pub slide_texts: Vec<String>,
    pub cover_output: PathBuf,
    #[serde(default)]
    pub slide_outputs: Vec<PathBuf>,
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    #[serde(default)]
    pub share_icon_path: Option<PathBuf>,
    #[serde(default)]
    pub save_icon_path: Option<PathBuf>,
    #[serde(default)]
    pub font_paths: FontPathsInput,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandThemeInput {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub primary_color: Option<Rgba8>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct FontPathsInput {
    #[serde(default)]
    pub anton: Option<PathBuf>,
    #[serde(default)]
    pub inter: Option<PathBuf>,
}

impl RenderInput {
    /// Parse a request from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> SlideResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SlideError::validation(format!("parse render input JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlideError::validation(format!("open render input JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Resolve the brand and check required fields.
    pub fn into_request(self, registry: &dyn BrandRegistry) -> SlideResult<RenderRequest> {
        if self.background_image.as_os_str().is_empty() {
            return Err(SlideError::validation("backgroundImage must be non-empty"));
        }
        if self.cover_output.as_os_str().is_empty() {
            return Err(SlideError::validation("coverOutput must be non-empty"));
        }

        let mut theme = registry.resolve(&self.brand)?;
        if let Some(o) = self.brand_theme {
            if let Some(name) = o.display_name {
                theme.display_name = name;
            }
            if let Some(handle) = o.handle {
                theme.handle = normalize_handle(&handle);
            }
            if let Some(color) = o.primary_color {
                theme.primary_color = color;
            }
            if let Some(abbreviation) = o.abbreviation {
                theme.abbreviation = abbreviation;
            }
        }

        Ok(RenderRequest {
            theme,
            title: self.title,
            background_image: self.background_image,
            body_texts: self.slide_texts,
            cover_output: self.cover_output,
            slide_outputs: self.slide_outputs,
            logo_path: self.logo_path,
            share_icon_path: self.share_icon_path,
            save_icon_path: self.save_icon_path,
            font_paths: FontPaths {
                anton: self.font_paths.anton,
                inter: self.font_paths.inter,
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/input.rs"]
mod tests;
