//! The theme object: named categories of design tokens.
//!
//! Field names follow theme-ui naming (`fontSizes`,
//! `lineHeights`, ...). Categories the documentation does not render are
//! kept verbatim in [`Theme::extra`] so that a theme survives a round trip.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, list_names};
use crate::palette::ColorPalette;
use crate::scale::{Scale, ScaleValue};

/// A design-system theme. Immutable for the duration of a render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Scale>,

    /// Font family stacks keyed by role (`body`, `heading`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<IndexMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_sizes: Option<Scale>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weights: Option<IndexMap<String, ScaleValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_heights: Option<IndexMap<String, ScaleValue>>,

    /// Every other category, untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Theme {
    /// The color palette.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingColors`] when the theme has none.
    pub fn palette(&self) -> Result<&ColorPalette, ThemeError> {
        self.colors.as_ref().ok_or(ThemeError::MissingColors)
    }

    /// Reject themes that cannot be documented at all.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingColors`] when the theme has no palette.
    pub fn validate(&self) -> Result<(), ThemeError> {
        self.palette().map(|_| ())
    }

    /// Whether any typography category is present.
    #[must_use]
    pub const fn has_typography(&self) -> bool {
        self.fonts.is_some()
            || self.font_sizes.is_some()
            || self.font_weights.is_some()
            || self.line_heights.is_some()
    }

    /// This theme with the named color mode applied to its palette.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingColors`] without a palette,
    /// [`ThemeError::UnknownMode`] when the palette defines no such mode.
    pub fn with_mode(&self, mode: &str) -> Result<Self, ThemeError> {
        let palette = self.palette()?;
        let colors = palette.with_mode(mode).ok_or_else(|| ThemeError::UnknownMode {
            name: mode.to_string(),
            available: list_names(palette.mode_names()),
        })?;
        tracing::debug!(mode, "applied color mode");
        Ok(Self {
            colors: Some(colors),
            ..self.clone()
        })
    }
}
