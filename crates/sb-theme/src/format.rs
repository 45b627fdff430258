//! Color format derivation.
//!
//! A swatch shows one color three ways. All three strings come from a
//! single parsed [`Color`], so they can never disagree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sb_term::color::{Color, ParseColorError};

/// One of the textual color representations a swatch offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Hex,
    Rgb,
    Hsl,
}

impl FormatKind {
    /// Display order on a swatch.
    pub const ALL: [Self; 3] = [Self::Hex, Self::Rgb, Self::Hsl];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" | "rgba" => Ok(Self::Rgb),
            "hsl" | "hsla" => Ok(Self::Hsl),
            other => Err(format!("unknown color format `{other}`")),
        }
    }
}

/// Hex, `rgb()` and `hsl()` strings for one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

impl ColorFormats {
    /// Derive all three strings from an already parsed color.
    #[must_use]
    pub fn of(color: Color) -> Self {
        Self {
            hex: color.to_hex(),
            rgb: color.to_css_rgb(),
            hsl: color.to_css_hsl(),
        }
    }

    /// Parse `value` once and derive the three strings from it.
    ///
    /// ```
    /// use sb_theme::format::ColorFormats;
    ///
    /// let (_, formats) = ColorFormats::derive("#07c").unwrap();
    /// assert_eq!(formats.hex, "#0077cc");
    /// assert_eq!(formats.rgb, "rgb(0, 119, 204)");
    /// assert_eq!(formats.hsl, "hsl(205, 100%, 40%)");
    /// ```
    ///
    /// # Errors
    ///
    /// The parser's error for malformed input, unchanged.
    pub fn derive(value: &str) -> Result<(Color, Self), ParseColorError> {
        let color = Color::parse(value)?;
        Ok((color, Self::of(color)))
    }

    #[must_use]
    pub fn get(&self, kind: FormatKind) -> &str {
        match kind {
            FormatKind::Hex => &self.hex,
            FormatKind::Rgb => &self.rgb,
            FormatKind::Hsl => &self.hsl,
        }
    }

    /// `(kind, string)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormatKind, &str)> {
        FormatKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}
