//! Building a [`Document`] from a theme.
//!
//! The renderer owns the [`ThemeContext`] and the [`RenderOptions`]; the
//! theme itself is borrowed for the duration of one call. Rendering is
//! pure: the same inputs always give the same document.

use indexmap::IndexMap;
use tracing::debug;

use sb_theme::{ColorFormats, ColorPalette, Scale, ScaleValue, Theme, ThemeContext, ThemeError, contrast};

use crate::RenderError;
use crate::document::{
    Block, ColorBlock, Document, ExampleCard, Roles, SpaceBlock, Swatch, Token, TypographyBlock,
};
use crate::options::{DocVariant, RenderOptions};

/// Renders themes into documents.
#[derive(Debug, Clone, Default)]
pub struct ThemeDocRenderer {
    context: ThemeContext,
    options: RenderOptions,
}

impl ThemeDocRenderer {
    #[must_use]
    pub const fn new(context: ThemeContext, options: RenderOptions) -> Self {
        Self { context, options }
    }

    #[must_use]
    pub const fn context(&self) -> &ThemeContext {
        &self.context
    }

    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `explicit`, or the context's theme when `None`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::MissingColors`] if the chosen theme has no palette,
    /// [`ThemeError::InvalidColor`] if a palette entry does not parse.
    pub fn render(&self, explicit: Option<&Theme>) -> Result<Document, RenderError> {
        let theme = self.context.resolve(explicit);
        render_theme(theme, &self.options)
    }
}

/// Render one theme with the given options.
///
/// # Errors
///
/// As [`ThemeDocRenderer::render`].
pub fn render_theme(theme: &Theme, options: &RenderOptions) -> Result<Document, RenderError> {
    let palette = theme.palette()?;
    let variant = options.variant;

    let mut blocks = vec![Block::Colors(color_block(palette, options)?)];
    if variant == DocVariant::Full {
        if let Some(space) = theme.space.as_ref() {
            blocks.push(Block::Space(space_block(space)));
        }
        if theme.has_typography() {
            blocks.push(Block::Typography(typography_block(theme)));
        }
    }

    debug!(
        %variant,
        colors = palette.len(),
        blocks = blocks.len(),
        "rendered theme document"
    );

    Ok(Document {
        variant,
        roles: roles(palette)?,
        blocks,
    })
}

// -----------------------------------------------------------------------------
// Blocks
// -----------------------------------------------------------------------------

fn color_block(palette: &ColorPalette, options: &RenderOptions) -> Result<ColorBlock, ThemeError> {
    let copyable = options.variant.copyable();
    let swatches = palette
        .iter()
        .map(|(name, value)| {
            let (color, formats) =
                ColorFormats::derive(value).map_err(|source| ThemeError::InvalidColor {
                    name: name.to_string(),
                    source,
                })?;
            Ok(Swatch {
                name: name.to_string(),
                value: value.to_string(),
                formats,
                copyable,
                color,
            })
        })
        .collect::<Result<Vec<_>, ThemeError>>()?;

    let contrast = contrast::evaluate(palette, &options.contrast_pairs)?;

    Ok(ColorBlock {
        example: (options.variant == DocVariant::Full).then(ExampleCard::default),
        swatches,
        contrast,
    })
}

fn space_block(space: &Scale) -> SpaceBlock {
    SpaceBlock {
        steps: space.labeled(),
        nested: space.nested(),
        container: space.container().cloned(),
    }
}

fn typography_block(theme: &Theme) -> TypographyBlock {
    TypographyBlock {
        families: theme.fonts.as_ref().map(|fonts| tokens(fonts.iter())),
        sizes: theme.font_sizes.as_ref().map(Scale::labeled),
        weights: theme.font_weights.as_ref().map(scale_tokens),
        line_heights: theme.line_heights.as_ref().map(scale_tokens),
    }
}

fn tokens<'a, V: ToString + 'a>(iter: impl Iterator<Item = (&'a String, &'a V)>) -> Vec<Token> {
    iter.map(|(label, value)| Token {
        label: label.clone(),
        value: value.to_string(),
    })
    .collect()
}

fn scale_tokens(map: &IndexMap<String, ScaleValue>) -> Vec<Token> {
    tokens(map.iter())
}

fn roles(palette: &ColorPalette) -> Result<Roles, ThemeError> {
    let hex = |name: &str| -> Result<Option<String>, ThemeError> {
        Ok(palette.resolve(name)?.map(|c| c.to_hex()))
    };
    Ok(Roles {
        text: hex("text")?,
        background: hex("background")?,
        primary: hex("primary")?,
        secondary: hex("secondary")?,
        highlight: hex("highlight")?,
        muted: hex("muted")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_theme::builtin;

    fn palette_theme(entries: &[(&str, &str)]) -> Theme {
        Theme {
            colors: Some(entries.iter().copied().collect()),
            ..Theme::default()
        }
    }

    // ── blocks ──────────────────────────────────────────────────────────

    #[test]
    fn colors_only_theme_has_one_block() {
        let doc = render_theme(&palette_theme(&[("text", "#000")]), &RenderOptions::default()).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc.space().is_none());
        assert!(doc.typography().is_none());
    }

    #[test]
    fn full_preset_has_every_block_in_order() {
        let doc = render_theme(&builtin::base(), &RenderOptions::default()).unwrap();
        let titles: Vec<_> = doc.blocks.iter().map(Block::title).collect();
        assert_eq!(titles, ["Colors", "Space", "Typography"]);
    }

    #[test]
    fn minimal_drops_everything_but_colors() {
        let opts = RenderOptions::new().with_variant(DocVariant::Minimal);
        let doc = render_theme(&builtin::base(), &opts).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        let colors = doc.colors().unwrap();
        assert!(colors.example.is_none());
        assert!(colors.swatches.iter().all(|s| !s.copyable));
    }

    #[test]
    fn missing_colors_fails() {
        let err = render_theme(&Theme::default(), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::Theme(ThemeError::MissingColors)));
    }

    #[test]
    fn invalid_entry_names_the_color() {
        let err = render_theme(&palette_theme(&[("accent", "notacolor")]), &RenderOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "color `accent` has an invalid value");
    }

    // ── swatches ────────────────────────────────────────────────────────

    #[test]
    fn swatches_follow_palette_order() {
        let theme = palette_theme(&[("zeta", "red"), ("alpha", "blue"), ("mid", "#0f0")]);
        let doc = render_theme(&theme, &RenderOptions::default()).unwrap();
        let names: Vec<_> = doc.colors().unwrap().swatches.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn swatch_keeps_the_written_value() {
        let doc = render_theme(&palette_theme(&[("accent", "tomato")]), &RenderOptions::default()).unwrap();
        let swatch = &doc.colors().unwrap().swatches[0];
        assert_eq!(swatch.value, "tomato");
        assert_eq!(swatch.formats.hex, "#ff6347");
        assert!(swatch.copyable);
    }

    // ── context ─────────────────────────────────────────────────────────

    #[test]
    fn renderer_falls_back_to_context() {
        let ctx = ThemeContext::new().with_ambient(builtin::dark());
        let renderer = ThemeDocRenderer::new(ctx, RenderOptions::default());
        let doc = renderer.render(None).unwrap();
        let dark = builtin::dark();
        let expected = dark.palette().unwrap().resolve("background").unwrap().map(|c| c.to_hex());
        assert_eq!(doc.roles.background, expected);
    }

    #[test]
    fn explicit_theme_beats_context() {
        let ctx = ThemeContext::new().with_ambient(builtin::dark());
        let renderer = ThemeDocRenderer::new(ctx, RenderOptions::default());
        let doc = renderer.render(Some(&palette_theme(&[("text", "#123456")]))).unwrap();
        assert_eq!(doc.roles.text.as_deref(), Some("#123456"));
        assert_eq!(doc.roles.background, None);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = ThemeDocRenderer::default();
        assert_eq!(renderer.render(None).unwrap(), renderer.render(None).unwrap());
    }

    // ── typography ──────────────────────────────────────────────────────

    #[test]
    fn typography_sections_follow_presence() {
        let mut theme = palette_theme(&[("text", "#000")]);
        theme.font_sizes = Some(Scale::from_iter([12u32, 16]));
        let doc = render_theme(&theme, &RenderOptions::default()).unwrap();
        let typo = doc.typography().unwrap();
        assert!(typo.families.is_none());
        assert!(typo.weights.is_none());
        assert_eq!(typo.sizes.as_ref().map(Vec::len), Some(2));
    }
}
