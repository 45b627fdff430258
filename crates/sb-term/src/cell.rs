// SPDX-License-Identifier: MIT
//
// Cell: one character position of a rendered document.
//
// A cell holds a character, resolved foreground/background colors and text
// attributes. Colors with alpha never reach a cell: they are composited via
// `Color::resolve_over()` when painting, so the cell keeps only opaque
// `CellColor`s and output is a straight translation to SGR sequences.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell holds
// the character; the second is a continuation cell (ch = '\0') that output
// skips but whose background still fills.

use crate::color::{CellColor, Color};

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR parameters:
    ///
    /// ```
    /// use sb_term::cell::Attr;
    ///
    /// let heading = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(heading.contains(Attr::BOLD));
    /// assert!(!heading.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1
        const BOLD      = 1 << 0;
        /// SGR 2
        const DIM       = 1 << 1;
        /// SGR 3
        const ITALIC    = 1 << 2;
        /// SGR 4
        const UNDERLINE = 1 << 3;
        /// SGR 7: swap foreground and background.
        const INVERSE   = 1 << 4;
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// How a run of text is painted: colors (possibly translucent) plus attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Style {
    /// Plain text: terminal default colors are kept by painting with a
    /// transparent background and letting the foreground fall through.
    pub const PLAIN: Self = Self {
        fg: Color::TRANSPARENT,
        bg: Color::TRANSPARENT,
        attrs: Attr::empty(),
    };

    #[inline]
    #[must_use]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::TRANSPARENT,
            attrs: Attr::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character to display. `'\0'` marks a continuation cell.
    pub ch: char,
    /// Foreground (text) color.
    pub fg: CellColor,
    /// Background color.
    pub bg: CellColor,
    /// Text attributes.
    pub attrs: Attr,
}

const CONTINUATION: char = '\0';

impl Cell {
    /// An empty cell: space character, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// Create a cell with a character and default styling.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    /// Create a continuation cell for the second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
            attrs,
        }
    }

    /// Whether this is a continuation cell.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The character, or `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.is_continuation() { None } else { Some(self.ch) }
    }

    /// Return a copy with a different background.
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }

    /// Return a copy with a different foreground.
    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: CellColor) -> Self {
        Self { fg, ..self }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
