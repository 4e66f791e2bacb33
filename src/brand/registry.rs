use std::collections::BTreeMap;

use crate::brand::theme::BrandTheme;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideError, SlideResult};

/// Read-only brand lookup. Implementations are injected into the render session.
pub trait BrandRegistry {
    /// Resolve a brand id to its theme.
    fn resolve(&self, id: &str) -> SlideResult<BrandTheme>;
}

/// In-memory registry with an optional derived-theme fallback for unknown ids.
#[derive(Clone, Debug, Default)]
pub struct StaticBrandRegistry {
    themes: BTreeMap<String, BrandTheme>,
    derive_unknown: bool,
}

impl StaticBrandRegistry {
    /// Empty registry that rejects unknown ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the bundled brands, deriving themes for unknown ids.
    pub fn builtin() -> Self {
        Self::new()
            .with_theme(BrandTheme::new(
                "healthy-college",
                "The Healthy College",
                "@thehealthycollege",
                Rgba8::rgb(0x2e, 0x7d, 0x32),
                "THC",
            ))
            .with_theme(BrandTheme::new(
                "mindful-mornings",
                "Mindful Mornings",
                "@mindfulmornings",
                Rgba8::rgb(0xe0, 0x7a, 0x1f),
                "MM",
            ))
            .derive_unknown(true)
    }

    pub fn with_theme(mut self, theme: BrandTheme) -> Self {
        self.themes.insert(theme.id.clone(), theme);
        self
    }

    pub fn derive_unknown(mut self, on: bool) -> Self {
        self.derive_unknown = on;
        self
    }
}

impl BrandRegistry for StaticBrandRegistry {
    fn resolve(&self, id: &str) -> SlideResult<BrandTheme> {
        if let Some(theme) = self.themes.get(id) {
            return Ok(theme.clone());
        }
        if id.trim().is_empty() {
            return Err(SlideError::validation("brand id must be non-empty"));
        }
        if self.derive_unknown {
            tracing::warn!(brand = id, "unknown brand, deriving theme from id");
            return Ok(BrandTheme::derived_from_id(id));
        }
        Err(SlideError::validation(format!("unknown brand '{id}'")))
    }
}
