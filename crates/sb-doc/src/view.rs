//! View: painting a [`Document`] into a framebuffer.
//!
//! The view lays blocks out top to bottom at a fixed width, growing the
//! framebuffer as it goes, and records where each copy target landed so
//! a host can map a click back to a [`CopyTarget`].
//!
//! ```text
//! Document           DocView              FrameBuffer (sb-term)
//! ┌───────────┐   ┌────────────┐    ┌─────────────────────────────┐
//! │ Colors    │   │ headings   │    │ Colors                      │
//! │ Space     │──▶│ swatches   │──▶ │ ██████ primary   ██████ ... │
//! │ Typography│   │ bars/boxes │    │ ██████ #0077cc              │
//! └───────────┘   └────────────┘    └─────────────────────────────┘
//!                       │
//!                       └──▶ Vec<CopyRegion>
//! ```
//!
//! Space values become columns at a shared pixels-per-column ratio so the
//! largest step fits the width. Rows are half as tall as columns are wide
//! to keep boxes roughly square in a terminal cell grid.

use sb_term::buffer::{FrameBuffer, Rect, string_width, width_u16};
use sb_term::cell::{Attr, Style};
use sb_term::color::{CellColor, Color};
use sb_theme::{ContrastLine, ContrastOutcome, ScaleValue};

use crate::copy::{CopyField, CopyTarget};
use crate::document::{
    Block, ColorBlock, Document, ExampleCard, Mark, Roles, SpaceBlock, Swatch, TypographyBlock,
    size_label,
};

/// Left and right page margin.
const MARGIN: u16 = 1;
/// Widest the example card gets.
const CARD_WIDTH: u16 = 56;
/// Color chip of a swatch.
const CHIP_WIDTH: u16 = 6;
const CHIP_HEIGHT: u16 = 4;
/// Columns between swatches on a row.
const SWATCH_GAP: u16 = 2;
/// Space bars and boxes never get finer than this.
const MIN_PX_PER_COL: f64 = 4.0;
/// Weights at or above this paint bold.
const BOLD_WEIGHT: f64 = 600.0;

/// Used for space bars when the palette has no `primary`.
const FALLBACK_PRIMARY: Color = Color::srgb(0.2, 0.2, 0.2);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Where a copy target was painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRegion {
    pub rect: Rect,
    pub target: CopyTarget,
}

/// A painted document.
#[derive(Debug, Clone)]
pub struct Painted {
    pub frame: FrameBuffer,
    pub regions: Vec<CopyRegion>,
}

impl Painted {
    /// The copy target under a cell, if any.
    #[must_use]
    pub fn target_at(&self, x: u16, y: u16) -> Option<&CopyTarget> {
        self.regions.iter().find(|r| r.rect.contains(x, y)).map(|r| &r.target)
    }

    /// Row text without styling, trailing spaces trimmed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.frame.height()).map(|y| self.frame.row_text(y)).collect()
    }
}

// ---------------------------------------------------------------------------
// DocView
// ---------------------------------------------------------------------------

/// Lays out documents at a given terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocView {
    width: u16,
}

impl DocView {
    /// Narrower widths are widened to this.
    pub const MIN_WIDTH: u16 = 24;

    #[must_use]
    pub fn new(width: u16) -> Self {
        Self {
            width: width.max(Self::MIN_WIDTH),
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Paint every block of `doc`, top to bottom.
    #[must_use]
    pub fn paint(&self, doc: &Document) -> Painted {
        let page_bg = Roles::color(doc.roles.background.as_ref())
            .map_or(CellColor::Default, Color::to_cell_color);
        let mut painter = Painter {
            frame: FrameBuffer::with_bg(self.width, 0, page_bg),
            regions: Vec::new(),
            y: 0,
            roles: &doc.roles,
            text: Roles::color(doc.roles.text.as_ref()).unwrap_or(Color::TRANSPARENT),
        };

        for block in &doc.blocks {
            painter.heading(block.title());
            match block {
                Block::Colors(colors) => painter.colors(colors),
                Block::Space(space) => painter.space(space),
                Block::Typography(typo) => painter.typography(typo),
            }
        }

        let Painter { frame, regions, .. } = painter;
        Painted { frame, regions }
    }
}

// ---------------------------------------------------------------------------
// Painter
// ---------------------------------------------------------------------------

struct Painter<'a> {
    frame: FrameBuffer,
    regions: Vec<CopyRegion>,
    /// Next free row.
    y: u16,
    roles: &'a Roles,
    /// Page text color; transparent means the terminal default.
    text: Color,
}

impl Painter<'_> {
    fn inner_width(&self) -> u16 {
        self.frame.width().saturating_sub(2 * MARGIN)
    }

    fn reserve(&mut self, rows: u16) {
        self.frame.ensure_height(self.y.saturating_add(rows));
    }

    fn advance(&mut self, rows: u16) {
        self.y = self.y.saturating_add(rows);
        self.frame.ensure_height(self.y);
    }

    fn text_style(&self) -> Style {
        Style::fg(self.text)
    }

    fn line(&mut self, text: &str, style: Style) {
        self.reserve(1);
        self.frame.paint_text(MARGIN, self.y, text, &style, None);
        self.advance(1);
    }

    fn heading(&mut self, title: &str) {
        self.line(title, self.text_style().with_attrs(Attr::BOLD | Attr::UNDERLINE));
        self.advance(1);
    }

    fn subheading(&mut self, title: &str) {
        self.line(title, self.text_style().with_attrs(Attr::BOLD));
    }

    /// Word-wrap styled runs into `width` columns starting at `x`.
    /// Returns the rows used.
    fn wrapped(&mut self, x: u16, width: u16, spans: &[(&str, Style)]) -> u16 {
        let width = width.max(1);
        let clip = Rect::new(x, 0, width, u16::MAX);
        let (mut col, mut row) = (0u16, 0u16);
        self.reserve(1);

        for (text, style) in spans {
            for word in text.split_inclusive(' ') {
                if col > 0 && col.saturating_add(width_u16(word.trim_end())) > width {
                    row += 1;
                    col = 0;
                    self.reserve(row + 1);
                }
                let word = if col == 0 { word.trim_start() } else { word };
                col += self.frame.paint_text(x + col, self.y + row, word, style, Some(&clip));
            }
        }
        row + 1
    }

    // ─── Colors ──────────────────────────────────────────────────────────

    fn colors(&mut self, block: &ColorBlock) {
        if let Some(card) = &block.example {
            self.example(card);
            self.advance(1);
        }
        self.swatches(&block.swatches);
        if !block.contrast.is_empty() {
            self.subheading("Contrast");
            for line in &block.contrast {
                self.contrast_line(line);
            }
            self.advance(1);
        }
    }

    fn example(&mut self, card: &ExampleCard) {
        let width = self.inner_width().min(CARD_WIDTH);
        let x = MARGIN;
        let text = self.text_style();

        // header bar
        self.reserve(1);
        if let Some(primary) = Roles::color(self.roles.primary.as_ref()) {
            self.frame.fill_rect(Rect::new(x, self.y, width, 1), primary, None);
        }
        self.advance(2);

        self.reserve(1);
        let clip = Rect::new(x, self.y, width, 1);
        self.frame
            .paint_text(x + 1, self.y, &card.title, &text.with_attrs(Attr::BOLD), Some(&clip));
        self.advance(2);

        let highlight = Roles::color(self.roles.highlight.as_ref()).unwrap_or(Color::TRANSPARENT);
        let secondary = Roles::color(self.roles.secondary.as_ref()).unwrap_or(self.text);
        let spans: Vec<(&str, Style)> = card
            .body
            .iter()
            .map(|span| {
                let style = match span.mark {
                    Mark::Plain => text,
                    Mark::Highlight => Style::new(self.text, highlight),
                    Mark::Link => Style::fg(secondary).with_attrs(Attr::UNDERLINE),
                };
                (span.text.as_str(), style)
            })
            .collect();
        let rows = self.wrapped(x + 1, width.saturating_sub(2), &spans);
        self.advance(rows + 1);

        // footer, right-aligned on muted
        self.reserve(1);
        let row = Rect::new(x, self.y, width, 1);
        if let Some(muted) = Roles::color(self.roles.muted.as_ref()) {
            self.frame.fill_rect(row, muted, None);
        }
        let fx = (x + width).saturating_sub(width_u16(&card.footer) + 1).max(x + 1);
        self.frame.paint_text(fx, self.y, &card.footer, &text, Some(&row));
        self.advance(1);
    }

    fn swatches(&mut self, swatches: &[Swatch]) {
        let label_width = swatches
            .iter()
            .flat_map(|s| CopyField::ALL.map(|f| string_width(s.field_text(f))))
            .max()
            .unwrap_or(0);
        let label_width = u16::try_from(label_width).unwrap_or(u16::MAX);
        let card_width = (CHIP_WIDTH + 1).saturating_add(label_width);
        let per_row = (self.inner_width().saturating_add(SWATCH_GAP)
            / card_width.saturating_add(SWATCH_GAP))
        .max(1);

        for row in swatches.chunks(usize::from(per_row)) {
            self.reserve(CHIP_HEIGHT);
            let mut x = MARGIN;
            for swatch in row {
                self.swatch(x, swatch);
                x = x.saturating_add(card_width.saturating_add(SWATCH_GAP));
            }
            self.advance(CHIP_HEIGHT + 1);
        }
    }

    fn swatch(&mut self, x: u16, swatch: &Swatch) {
        self.frame
            .fill_rect(Rect::new(x, self.y, CHIP_WIDTH, CHIP_HEIGHT), swatch.color, None);

        let tx = x + CHIP_WIDTH + 1;
        for (ty, field) in (self.y..).zip(CopyField::ALL) {
            let style = match field {
                CopyField::Name if swatch.copyable => self.text_style().with_attrs(Attr::BOLD),
                _ => self.text_style(),
            };
            let width = self.frame.paint_text(tx, ty, swatch.field_text(field), &style, None);
            if swatch.copyable && width > 0 {
                self.regions.push(CopyRegion {
                    rect: Rect::new(tx, ty, width, 1),
                    target: CopyTarget::new(swatch.name.clone(), field),
                });
            }
        }
    }

    /// One line per pair, painted in the pair's own colors.
    fn contrast_line(&mut self, line: &ContrastLine) {
        self.reserve(1);
        let style = match &line.outcome {
            ContrastOutcome::Measured { fg_color, bg_color, .. } => {
                let fg = Color::parse(fg_color).unwrap_or(self.text);
                if let Ok(bg) = Color::parse(bg_color) {
                    let row = Rect::new(MARGIN, self.y, self.inner_width(), 1);
                    self.frame.fill_rect(row, bg, None);
                }
                Style::fg(fg)
            }
            ContrastOutcome::Missing { .. } => self.text_style().with_attrs(Attr::DIM),
        };
        self.frame.paint_text(MARGIN + 1, self.y, &line.to_string(), &style, None);
        self.advance(1);
    }

    // ─── Space ───────────────────────────────────────────────────────────

    fn space(&mut self, block: &SpaceBlock) {
        let primary = Roles::color(self.roles.primary.as_ref()).unwrap_or(FALLBACK_PRIMARY);
        let avail = self.inner_width();
        let largest = block
            .steps
            .iter()
            .filter_map(|s| s.value.px())
            .fold(0.0, f64::max);
        let ratio = px_per_col(largest, avail);
        let label_style = Style::fg(Color::WHITE);

        for step in &block.steps {
            let label = step.to_string();
            let bar = step.value.px().map_or(0, |px| cells(px, ratio));
            let width = bar.max(width_u16(&label) + 2).min(avail);
            self.reserve(1);
            self.frame.fill_rect(Rect::new(MARGIN, self.y, width, 1), primary, None);
            self.frame.paint_text(MARGIN + 1, self.y, &label, &label_style, None);
            self.advance(1);
        }
        self.advance(1);

        self.nested_boxes(block, primary);
    }

    /// Boxes for every step, largest first, all anchored at the same corner
    /// inside a container the size of the last step.
    fn nested_boxes(&mut self, block: &SpaceBlock, primary: Color) {
        let Some(outer) = block.container.as_ref().and_then(ScaleValue::px) else {
            return;
        };
        if outer <= 0.0 {
            return;
        }
        let ratio = px_per_col(outer, self.inner_width().saturating_sub(2));
        let size = |px: f64| {
            let cols = cells(px, ratio);
            (cols.saturating_add(2), cols / 2 + 2)
        };
        let overlay = Color::rgba8(0xff, 0xff, 0xff, 0x44);

        let (width, height) = size(outer);
        self.reserve(height);
        self.frame
            .fill_rect(Rect::new(MARGIN, self.y, width, height), primary, None);
        for px in block.nested.iter().filter_map(ScaleValue::px) {
            let (w, h) = size(px);
            let rect = Rect::new(MARGIN, self.y, w, h);
            self.frame.fill_rect(rect, overlay, None);
            self.frame.stroke_rect(rect, Color::BLACK, None);
        }
        self.advance(height + 1);
    }

    // ─── Typography ──────────────────────────────────────────────────────

    fn typography(&mut self, block: &TypographyBlock) {
        let text = self.text_style();

        if let Some(families) = &block.families {
            self.subheading("Font Families");
            for token in families {
                self.line(&token.to_string(), text);
            }
            self.advance(1);
        }
        if let Some(sizes) = &block.sizes {
            self.subheading("Font Sizes");
            for step in sizes {
                self.line(&size_label(step), text);
            }
            self.advance(1);
        }
        if let Some(weights) = &block.weights {
            self.subheading("Font Weights");
            for token in weights {
                let heavy = token.value.parse::<f64>().is_ok_and(|w| w >= BOLD_WEIGHT);
                let style = if heavy { text.with_attrs(Attr::BOLD) } else { text };
                self.line(&token.to_string(), style);
            }
            self.advance(1);
        }
        if let Some(line_heights) = &block.line_heights {
            self.subheading("Line Heights");
            for token in line_heights {
                self.line(&token.to_string(), text);
            }
            self.advance(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Scale helpers
// ---------------------------------------------------------------------------

/// Pixels per column so that `largest` fits in `avail` columns.
fn px_per_col(largest: f64, avail: u16) -> f64 {
    if avail == 0 {
        return MIN_PX_PER_COL;
    }
    (largest / f64::from(avail)).ceil().max(MIN_PX_PER_COL)
}

/// Columns covered by `px`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(px: f64, px_per_col: f64) -> u16 {
    let n = (px / px_per_col).round();
    if n <= 0.0 {
        0
    } else {
        n.min(f64::from(u16::MAX)) as u16
    }
}
