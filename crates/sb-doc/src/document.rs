//! The render tree.
//!
//! A [`Document`] is what a theme turns into: an ordered list of blocks,
//! fully computed, with no reference back to the theme. Hosts paint it
//! ([`view`](crate::view)), serialize it (JSON) or query it for copy
//! targets ([`copy`](crate::copy)).
//!
//! ```text
//! Document
//! ├── Colors       example card?, swatches, contrast lines
//! ├── Space?       labeled steps, nested boxes
//! └── Typography?  families?, sizes?, weights?, line heights?
//! ```

use serde::Serialize;

use sb_term::color::Color;
use sb_theme::{ColorFormats, ContrastLine, ScaleStep, ScaleValue};

use crate::options::DocVariant;

/// Title of the example card.
pub const EXAMPLE_TITLE: &str = "Welcome to Clown Town";
/// Body of the example card.
pub const EXAMPLE_BODY: [(&str, Mark); 4] = [
    ("A ", Mark::Plain),
    ("nice place", Mark::Highlight),
    (" where no scary things happen. We even have ", Mark::Plain),
    ("a town dog.", Mark::Link),
];
/// Footer of the example card.
pub const EXAMPLE_FOOTER: &str = "Clown Town Industries, 2001";

/// A rendered theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub variant: DocVariant,
    /// Palette roles the page itself is painted with.
    pub roles: Roles,
    pub blocks: Vec<Block>,
}

impl Document {
    /// The color block. Every document has exactly one.
    #[must_use]
    pub fn colors(&self) -> Option<&ColorBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Colors(c) => Some(c),
            _ => None,
        })
    }

    #[must_use]
    pub fn space(&self) -> Option<&SpaceBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Space(s) => Some(s),
            _ => None,
        })
    }

    #[must_use]
    pub fn typography(&self) -> Option<&TypographyBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Typography(t) => Some(t),
            _ => None,
        })
    }
}

/// Hex values of the semantic roles the page and example card use.
/// A role the palette lacks is `None` and paints with the terminal default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roles {
    pub text: Option<String>,
    pub background: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub highlight: Option<String>,
    pub muted: Option<String>,
}

impl Roles {
    /// Parse a role back into a color for painting.
    #[must_use]
    pub fn color(role: Option<&String>) -> Option<Color> {
        role.and_then(|hex| Color::parse(hex).ok())
    }
}

/// One top-level section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Colors(ColorBlock),
    Space(SpaceBlock),
    Typography(TypographyBlock),
}

impl Block {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Colors(_) => "Colors",
            Self::Space(_) => "Space",
            Self::Typography(_) => "Typography",
        }
    }
}

// -----------------------------------------------------------------------------
// Colors
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBlock {
    /// Present in the full variant only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExampleCard>,
    pub swatches: Vec<Swatch>,
    pub contrast: Vec<ContrastLine>,
}

/// The sample card painted with the palette: a `primary` header bar, a
/// title in `text`, a body with a `highlight` span and a `secondary` link,
/// and a footer on `muted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleCard {
    pub title: String,
    pub body: Vec<Span>,
    pub footer: String,
}

impl ExampleCard {
    /// The body as plain text.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.body.iter().map(|s| s.text.as_str()).collect()
    }
}

impl Default for ExampleCard {
    fn default() -> Self {
        Self {
            title: EXAMPLE_TITLE.to_string(),
            body: EXAMPLE_BODY
                .iter()
                .map(|&(text, mark)| Span {
                    text: text.to_string(),
                    mark,
                })
                .collect(),
            footer: EXAMPLE_FOOTER.to_string(),
        }
    }
}

/// A run of body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub mark: Mark,
}

/// How a span stands out from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Plain,
    /// On the `highlight` color.
    Highlight,
    /// In the `secondary` color, underlined.
    Link,
}

/// One palette entry with its derived formats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub name: String,
    /// The value as written in the theme.
    pub value: String,
    pub formats: ColorFormats,
    /// Whether the name and formats are copy targets.
    pub copyable: bool,
    #[serde(skip)]
    pub color: Color,
}

// -----------------------------------------------------------------------------
// Space
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceBlock {
    /// Forward order, `[i]: value`.
    pub steps: Vec<ScaleStep>,
    /// Reverse order, outermost box first.
    pub nested: Vec<ScaleValue>,
    /// Size of the frame around the boxes: the last step.
    pub container: Option<ScaleValue>,
}

// -----------------------------------------------------------------------------
// Typography
// -----------------------------------------------------------------------------

/// A labeled token (`body: 400`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub label: String,
    pub value: String,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Each section is `None` when the theme lacks that category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypographyBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<ScaleStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Token>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_heights: Option<Vec<Token>>,
}

/// `[i] size`, the font-size label form (no colon).
#[must_use]
pub fn size_label(step: &ScaleStep) -> String {
    format!("[{}] {}", step.index, step.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_card_reads_as_one_sentence() {
        let card = ExampleCard::default();
        assert_eq!(card.title, "Welcome to Clown Town");
        assert_eq!(
            card.body_text(),
            "A nice place where no scary things happen. We even have a town dog."
        );
        let marks: Vec<_> = card.body.iter().map(|s| s.mark).collect();
        assert_eq!(marks, [Mark::Plain, Mark::Highlight, Mark::Plain, Mark::Link]);
    }

    #[test]
    fn token_displays_as_label_and_value() {
        let token = Token {
            label: "body".into(),
            value: "system-ui".into(),
        };
        assert_eq!(token.to_string(), "body: system-ui");
    }
}
