//! Named preset themes, ready to document without a theme file.
//!
//! `base` is the default every lookup falls back to. The others share its
//! scales and differ in palette and typography.

use indexmap::IndexMap;

use crate::palette::ColorPalette;
use crate::scale::{Scale, ScaleValue};
use crate::theme::Theme;

const SYSTEM_FONT: &str =
    "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", sans-serif";

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    Some(match name {
        "base" | "default" => base(),
        "dark" => dark(),
        "deep" => deep(),
        "swiss" => swiss(),
        _ => return None,
    })
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["base", "dark", "deep", "swiss"]
}

/// The default theme: black on white with a blue primary.
#[must_use]
pub fn base() -> Theme {
    Theme {
        colors: Some(palette(&[
            ("text", "#000"),
            ("background", "#fff"),
            ("primary", "#07c"),
            ("secondary", "#30c"),
            ("muted", "#f6f6f6"),
        ])),
        space: Some(space()),
        fonts: Some(fonts(SYSTEM_FONT, "inherit", "Menlo, monospace")),
        font_sizes: Some(font_sizes()),
        font_weights: Some(tokens(&[("body", 400), ("heading", 700), ("bold", 700)])),
        line_heights: Some(line_heights(1.5, 1.125)),
        extra: IndexMap::new(),
    }
}

/// Light text on near-black with neon accents.
#[must_use]
pub fn dark() -> Theme {
    Theme {
        colors: Some(palette(&[
            ("text", "#fff"),
            ("background", "#060606"),
            ("primary", "#3cf"),
            ("secondary", "#e0f"),
            ("muted", "#191919"),
            ("highlight", "#29112c"),
            ("gray", "#999"),
            ("purple", "#c0f"),
        ])),
        fonts: Some(fonts(SYSTEM_FONT, "inherit", "Menlo, monospace")),
        font_weights: Some(tokens(&[("body", 400), ("heading", 700), ("display", 900)])),
        line_heights: Some(line_heights(1.5, 1.25)),
        ..base()
    }
}

/// Pastel accents on deep blue, written in `hsl()` with a translucent muted.
#[must_use]
pub fn deep() -> Theme {
    Theme {
        colors: Some(palette(&[
            ("text", "hsl(210, 50%, 96%)"),
            ("background", "hsl(230, 25%, 18%)"),
            ("primary", "hsl(260, 100%, 80%)"),
            ("secondary", "hsl(290, 100%, 80%)"),
            ("highlight", "hsl(260, 20%, 40%)"),
            ("purple", "hsl(290, 100%, 80%)"),
            ("muted", "hsla(230, 20%, 0%, 20%)"),
            ("gray", "hsl(210, 50%, 60%)"),
        ])),
        fonts: Some(fonts(SYSTEM_FONT, "inherit", "Menlo, monospace")),
        font_weights: Some(tokens(&[("body", 400), ("heading", 700), ("display", 900)])),
        line_heights: Some(line_heights(1.5, 1.25)),
        ..base()
    }
}

/// Near-black text, Google-style blue and purple.
#[must_use]
pub fn swiss() -> Theme {
    Theme {
        colors: Some(palette(&[
            ("text", "#202124"),
            ("background", "#fff"),
            ("primary", "#1a73e8"),
            ("secondary", "#9c27b0"),
            ("muted", "#f1f3f4"),
        ])),
        fonts: Some(fonts(
            "Roboto, system-ui, sans-serif",
            "\"Roboto Condensed\", system-ui, sans-serif",
            "\"Roboto Mono\", monospace",
        )),
        font_weights: Some(tokens(&[("body", 400), ("heading", 700), ("bold", 700)])),
        line_heights: Some(line_heights(1.5, 1.125)),
        ..base()
    }
}

// -----------------------------------------------------------------------------
// Shared scales
// -----------------------------------------------------------------------------

fn palette(entries: &[(&str, &str)]) -> ColorPalette {
    entries.iter().copied().collect()
}

fn space() -> Scale {
    [0u32, 4, 8, 16, 32, 64, 128, 256, 512].into_iter().collect()
}

fn font_sizes() -> Scale {
    [12u32, 14, 16, 20, 24, 32, 48, 64, 96].into_iter().collect()
}

fn fonts(body: &str, heading: &str, monospace: &str) -> IndexMap<String, String> {
    [("body", body), ("heading", heading), ("monospace", monospace)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn tokens(entries: &[(&str, u32)]) -> IndexMap<String, ScaleValue> {
    entries
        .iter()
        .map(|&(k, v)| (k.to_string(), ScaleValue::from(v)))
        .collect()
}

fn line_heights(body: f64, heading: f64) -> IndexMap<String, ScaleValue> {
    [("body", body), ("heading", heading)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), ScaleValue::from(v)))
        .collect()
}
