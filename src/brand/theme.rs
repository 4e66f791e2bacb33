use crate::foundation::core::Rgba8;
use crate::layout::placeholder::normalize_handle;

/// Resolved presentation data for one content brand. Immutable for the length of a render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandTheme {
    pub id: String,
    pub display_name: String,
    /// Always starts with a single `@` (or is empty).
    pub handle: String,
    pub primary_color: Rgba8,
    /// Short label for the cover badge, e.g. `THC`.
    pub abbreviation: String,
}

impl BrandTheme {
    pub const DEFAULT_COLOR: Rgba8 = Rgba8::rgb(0x1f, 0x6f, 0x5c);

    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        handle: &str,
        primary_color: Rgba8,
        abbreviation: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            handle: normalize_handle(handle),
            primary_color,
            abbreviation: abbreviation.into(),
        }
    }

    /// Build a theme from a bare brand id when no registry entry exists.
    ///
    /// `"healthy-college"` becomes "Healthy College", `@healthycollege`, `HC`.
    pub fn derived_from_id(id: &str) -> Self {
        let words: Vec<&str> = id
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .collect();
        let display_name = words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join(" ");
        let handle: String = words.concat().to_lowercase();
        let abbreviation: String = words
            .iter()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .take(3)
            .collect();
        Self::new(id, display_name, &handle, Self::DEFAULT_COLOR, abbreviation)
    }

    /// First letter of the display name, upper-cased, for the fallback header badge.
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
