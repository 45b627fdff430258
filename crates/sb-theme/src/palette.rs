//! Color palettes: ordered semantic names mapped to CSS color strings.
//!
//! Display order is the order the theme wrote its keys in, so the palette is
//! backed by an [`IndexMap`]. The theme-ui `modes` object nested inside
//! `colors` is lifted out into named overlays and never enumerated as a
//! swatch:
//!
//! ```text
//! colors = { text, background, primary, modes = { dark = { text, background } } }
//!            └──────── entries ───────┘          └──────── modes["dark"] ───────┘
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use sb_term::color::Color;

use crate::error::ThemeError;

/// Ordered mapping from semantic color name to color value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPalette", into = "RawPalette")]
pub struct ColorPalette {
    entries: IndexMap<String, String>,
    modes: IndexMap<String, IndexMap<String, String>>,
}

/// Wire shape: the entries and the optional `modes` table share one object.
#[derive(Serialize, Deserialize)]
struct RawPalette {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    modes: IndexMap<String, IndexMap<String, String>>,
    #[serde(flatten)]
    entries: IndexMap<String, String>,
}

impl From<RawPalette> for ColorPalette {
    fn from(raw: RawPalette) -> Self {
        Self {
            entries: raw.entries,
            modes: raw.modes,
        }
    }
}

impl From<ColorPalette> for RawPalette {
    fn from(palette: ColorPalette) -> Self {
        Self {
            modes: palette.modes,
            entries: palette.entries,
        }
    }
}

impl ColorPalette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. A new name goes to the end; a replaced one
    /// keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Register a mode overlay.
    pub fn insert_mode(&mut self, mode: impl Into<String>, overlay: Self) {
        self.modes.insert(mode.into(), overlay.entries);
    }

    /// Every `(name, value)` in display order. No dedup, sort or filter.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entry names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the named entry.
    ///
    /// `Ok(None)` when the name is absent; an error when it is present but
    /// not a valid color.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidColor`] naming the entry.
    pub fn resolve(&self, name: &str) -> Result<Option<Color>, ThemeError> {
        self.get(name)
            .map(|value| {
                Color::parse(value).map_err(|source| ThemeError::InvalidColor {
                    name: name.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Names of the mode overlays, in declaration order.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// The palette with the named overlay applied: overridden keys keep
    /// their base position, new keys are appended. The result carries no
    /// modes of its own.
    ///
    /// Returns `None` for an unknown mode.
    #[must_use]
    pub fn with_mode(&self, mode: &str) -> Option<Self> {
        let overlay = self.modes.get(mode)?;
        let mut entries = self.entries.clone();
        for (name, value) in overlay {
            entries.insert(name.clone(), value.clone());
        }
        Some(Self {
            entries,
            modes: IndexMap::new(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorPalette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            modes: IndexMap::new(),
        }
    }
}
