//! Copy targets: a swatch's name or one of its formats.
//!
//! Targets are written `swatch.field`, where field is `name`, `hex`,
//! `rgb` or `hsl`. A bare swatch name means its name.
//!
//! ```text
//! "primary.hex"  ─▶ CopyTarget { swatch: "primary", field: Hex }  ─▶ "#0077cc"
//! "primary"      ─▶ CopyTarget { swatch: "primary", field: Name } ─▶ "primary"
//! ```
//!
//! Only the full variant has copy targets.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use sb_term::clipboard::Clipboard;
use sb_theme::FormatKind;

use crate::RenderError;
use crate::document::{Document, Swatch};

/// What part of a swatch to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyField {
    Name,
    Format(FormatKind),
}

impl CopyField {
    /// Fields in the order a swatch shows them.
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::Format(FormatKind::Hex),
        Self::Format(FormatKind::Rgb),
        Self::Format(FormatKind::Hsl),
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Format(kind) => kind.as_str(),
        }
    }
}

impl FromStr for CopyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("name") {
            return Ok(Self::Name);
        }
        s.parse().map(Self::Format)
    }
}

/// A copyable piece of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CopyTarget {
    pub swatch: String,
    pub field: CopyField,
}

impl CopyTarget {
    #[must_use]
    pub fn new(swatch: impl Into<String>, field: CopyField) -> Self {
        Self {
            swatch: swatch.into(),
            field,
        }
    }
}

impl FromStr for CopyTarget {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RenderError::UnknownCopyTarget(String::new()));
        }
        // Palette names may contain dots; only a known suffix is a field.
        let split = s
            .rsplit_once('.')
            .filter(|(name, _)| !name.is_empty())
            .and_then(|(name, field)| field.parse().ok().map(|field| Self::new(name, field)));
        Ok(split.unwrap_or_else(|| Self::new(s, CopyField::Name)))
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.swatch, self.field.as_str())
    }
}

impl Swatch {
    /// The text a field copies.
    #[must_use]
    pub fn field_text(&self, field: CopyField) -> &str {
        match field {
            CopyField::Name => &self.name,
            CopyField::Format(kind) => self.formats.get(kind),
        }
    }
}

impl Document {
    /// The text behind a copy target.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownCopyTarget`] if no copyable swatch has that name.
    pub fn copy_text(&self, target: &CopyTarget) -> Result<&str, RenderError> {
        self.colors()
            .and_then(|c| c.swatches.iter().find(|s| s.copyable && s.name == target.swatch))
            .map(|s| s.field_text(target.field))
            .ok_or_else(|| RenderError::UnknownCopyTarget(target.to_string()))
    }

    /// Every copy target in display order, with its text.
    pub fn copy_targets(&self) -> impl Iterator<Item = (CopyTarget, &str)> {
        self.colors()
            .into_iter()
            .flat_map(|c| c.swatches.iter())
            .filter(|s| s.copyable)
            .flat_map(|s| {
                CopyField::ALL
                    .into_iter()
                    .map(move |field| (CopyTarget::new(s.name.clone(), field), s.field_text(field)))
            })
    }
}

/// Place a target's text on the clipboard and return it.
///
/// # Errors
///
/// As [`Document::copy_text`].
pub fn copy(document: &Document, target: &CopyTarget, clipboard: &mut dyn Clipboard) -> Result<String, RenderError> {
    let text = document.copy_text(target)?;
    clipboard.copy(text);
    info!(%target, text, "copied to clipboard");
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_term::clipboard::MemoryClipboard;
    use sb_theme::Theme;

    use crate::options::{DocVariant, RenderOptions};
    use crate::render::render_theme;

    fn doc(variant: DocVariant) -> Document {
        let theme = Theme {
            colors: Some([("text", "#000"), ("primary", "#07c"), ("brand.dark", "navy")].into_iter().collect()),
            ..Theme::default()
        };
        render_theme(&theme, &RenderOptions::new().with_variant(variant)).unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn parse_field_suffix() {
        let t: CopyTarget = "primary.hex".parse().unwrap();
        assert_eq!(t, CopyTarget::new("primary", CopyField::Format(FormatKind::Hex)));
        let t: CopyTarget = "primary.name".parse().unwrap();
        assert_eq!(t.field, CopyField::Name);
    }

    #[test]
    fn bare_name_copies_the_name() {
        let t: CopyTarget = "primary".parse().unwrap();
        assert_eq!(t, CopyTarget::new("primary", CopyField::Name));
    }

    #[test]
    fn dotted_name_without_field() {
        let t: CopyTarget = "brand.dark".parse().unwrap();
        assert_eq!(t.swatch, "brand.dark");
        let t: CopyTarget = "brand.dark.rgb".parse().unwrap();
        assert_eq!(t, CopyTarget::new("brand.dark", CopyField::Format(FormatKind::Rgb)));
    }

    #[test]
    fn empty_target_is_rejected() {
        assert!(matches!("  ".parse::<CopyTarget>(), Err(RenderError::UnknownCopyTarget(_))));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(CopyTarget::new("primary", CopyField::Name).to_string(), "primary.name");
    }

    // ── resolving ───────────────────────────────────────────────────────

    #[test]
    fn copy_text_per_field() {
        let doc = doc(DocVariant::Full);
        let text = |s: &str| doc.copy_text(&s.parse().unwrap()).unwrap().to_string();
        assert_eq!(text("primary"), "primary");
        assert_eq!(text("primary.hex"), "#0077cc");
        assert_eq!(text("primary.rgb"), "rgb(0, 119, 204)");
        assert_eq!(text("brand.dark.hex"), "#000080");
    }

    #[test]
    fn unknown_swatch() {
        let err = doc(DocVariant::Full).copy_text(&"accent.hex".parse().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "no copy target `accent.hex` in this document");
    }

    #[test]
    fn minimal_has_no_targets() {
        let doc = doc(DocVariant::Minimal);
        assert_eq!(doc.copy_targets().count(), 0);
        assert!(doc.copy_text(&"primary.hex".parse().unwrap()).is_err());
    }

    #[test]
    fn four_targets_per_swatch() {
        let doc = doc(DocVariant::Full);
        assert_eq!(doc.copy_targets().count(), 12);
        let first: Vec<_> = doc.copy_targets().take(4).map(|(t, _)| t.to_string()).collect();
        assert_eq!(first, ["text.name", "text.hex", "text.rgb", "text.hsl"]);
    }

    // ── clipboard ───────────────────────────────────────────────────────

    #[test]
    fn copy_writes_to_clipboard() {
        let doc = doc(DocVariant::Full);
        let mut clip = MemoryClipboard::new();
        let text = copy(&doc, &"primary.hex".parse().unwrap(), &mut clip).unwrap();
        assert_eq!(text, "#0077cc");
        assert_eq!(clip.contents(), Some("#0077cc"));
    }

    #[test]
    fn failed_copy_leaves_clipboard_alone() {
        let doc = doc(DocVariant::Full);
        let mut clip = MemoryClipboard::new();
        assert!(copy(&doc, &"nope.hex".parse().unwrap(), &mut clip).is_err());
        assert!(clip.history().is_empty());
    }
}
