// SPDX-License-Identifier: MIT
//
// FrameBuffer: the 2D cell grid a document paints to.
//
// Documents are laid out top to bottom and their final height is only known
// once every block has been painted, so the buffer has a fixed width and
// grows downward on demand (`ensure_height`). Output then streams the rows
// in order.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are contiguous,
//     so left-to-right output is a linear scan.
//
//   - Paint operations take an optional `Rect` clip. Blocks paint freely and
//     clipping keeps them inside their region (a swatch card, a space box).
//
//   - Translucent backgrounds composite via `Color::resolve_over()` in
//     linear sRGB.
//
//   - Wide characters occupy two columns; the second is a continuation cell.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cell::{Attr, Cell, Style};
use crate::color::{CellColor, Color};

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in buffer coordinates.
///
/// ```
/// use sb_term::buffer::Rect;
///
/// let r = Rect::new(10, 5, 20, 4);
/// assert!(r.contains(10, 5));
/// assert!(r.contains(29, 8));
/// assert!(!r.contains(30, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, px: u16, py: u16) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// The overlapping region of two rectangles, or `None` if disjoint.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        (x2 > x1 && y2 > y1).then(|| Self::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// Shrink by `n` cells on every side.
    #[must_use]
    pub const fn inset(self, n: u16) -> Self {
        let w = self.width.saturating_sub(n.saturating_mul(2));
        let h = self.height.saturating_sub(n.saturating_mul(2));
        Self::new(self.x.saturating_add(n), self.y.saturating_add(n), w, h)
    }
}

// ─── FrameBuffer ─────────────────────────────────────────────────────────────

/// A width-fixed, downward-growing grid of [`Cell`]s.
///
/// ```
/// use sb_term::buffer::FrameBuffer;
/// use sb_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(40, 2);
/// buf.set(5, 1, Cell::new('X'));
/// assert_eq!(buf.get(5, 1).unwrap().character(), Some('X'));
///
/// buf.ensure_height(10);
/// assert_eq!(buf.height(), 10);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    fill: Cell,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a buffer filled with empty cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_bg(width, height, CellColor::Default)
    }

    /// Create a buffer whose cells (including rows added later) start with
    /// the given background.
    #[must_use]
    pub fn with_bg(width: u16, height: u16, bg: CellColor) -> Self {
        let fill = Cell::EMPTY.with_bg(bg);
        Self {
            width,
            height,
            fill,
            cells: vec![fill; usize::from(width) * usize::from(height)],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// A single row as a slice.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        (y < self.height).then(|| {
            let start = self.index(0, y);
            &self.cells[start..start + usize::from(self.width)]
        })
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }

    /// The visible text of one row with trailing spaces removed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|row| {
                row.iter()
                    .filter_map(|c| c.character())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    // ─── Growth ──────────────────────────────────────────────────────────

    /// Grow the buffer to at least `height` rows. Never shrinks.
    pub fn ensure_height(&mut self, height: u16) {
        if height <= self.height {
            return;
        }
        self.height = height;
        self.cells
            .resize(usize::from(self.width) * usize::from(height), self.fill);
    }

    // ─── Direct Cell Access ──────────────────────────────────────────────

    /// Bounds-checked raw write. Returns `true` if in bounds.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Break any wide character that touches `(x, y)`.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);
        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = ' ';
        }
        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = self.fill;
            }
        }
    }

    // ─── Paint ───────────────────────────────────────────────────────────

    /// Paint one cell with compositing and clipping.
    ///
    /// The background composites over the existing cell background. A
    /// transparent foreground maps to the terminal default; a translucent
    /// one composites over the resulting background.
    ///
    /// Returns `true` if the cell was painted.
    pub fn paint_cell(&mut self, x: u16, y: u16, ch: char, style: &Style, clip: Option<&Rect>) -> bool {
        if !self.in_bounds(x, y) || clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }

        self.break_wide_char_at(x, y);

        let idx = self.index(x, y);
        let bg = style.bg.resolve_over(&self.cells[idx].bg);
        self.cells[idx] = Cell {
            ch,
            fg: resolve_fg(style.fg, bg),
            bg,
            attrs: style.attrs,
        };
        true
    }

    /// Fill a rectangle with a background color, clearing its characters.
    pub fn fill_rect(&mut self, rect: Rect, bg: Color, clip: Option<&Rect>) {
        let Some(mut area) = rect.intersect(self.bounds()) else {
            return;
        };
        if let Some(clip) = clip {
            let Some(clipped) = area.intersect(*clip) else {
                return;
            };
            area = clipped;
        }

        for y in area.y..area.bottom() {
            let start = self.index(area.x, y);
            let end = self.index(area.right(), y);
            for cell in &mut self.cells[start..end] {
                *cell = Cell {
                    ch: ' ',
                    fg: CellColor::Default,
                    bg: bg.resolve_over(&cell.bg),
                    attrs: Attr::empty(),
                };
            }
        }
    }

    /// Draw a single-line box border around `rect` in the given color,
    /// keeping the backgrounds already underneath.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, clip: Option<&Rect>) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let style = Style::fg(color);
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);

        for x in x0 + 1..x1 {
            self.paint_cell(x, y0, '─', &style, clip);
            self.paint_cell(x, y1, '─', &style, clip);
        }
        for y in y0 + 1..y1 {
            self.paint_cell(x0, y, '│', &style, clip);
            self.paint_cell(x1, y, '│', &style, clip);
        }
        self.paint_cell(x0, y0, '┌', &style, clip);
        self.paint_cell(x1, y0, '┐', &style, clip);
        self.paint_cell(x0, y1, '└', &style, clip);
        self.paint_cell(x1, y1, '┘', &style, clip);
    }

    /// Paint text left to right from `(x, y)`.
    ///
    /// Wide characters take two columns; one that would straddle the right
    /// edge is replaced by a space. Zero-width characters are skipped.
    ///
    /// Returns the number of columns consumed.
    pub fn paint_text(&mut self, x: u16, y: u16, text: &str, style: &Style, clip: Option<&Rect>) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = clip.map_or(self.width, |c| c.right().min(self.width));
        let mut col = x;

        for ch in text.chars() {
            if col >= limit {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            if w == 2 && col + 1 >= limit {
                self.paint_cell(col, y, ' ', style, clip);
                col += 1;
                break;
            }
            if self.paint_cell(col, y, ch, style, clip) && w == 2 {
                let cont_x = col + 1;
                // A wide char that started at cont_x loses its continuation.
                if cont_x + 1 < self.width && self.cells[self.index(cont_x + 1, y)].is_continuation() {
                    let orphan = self.index(cont_x + 1, y);
                    self.cells[orphan] = self.fill;
                }
                let idx = self.index(cont_x, y);
                let painted = self.cells[idx - 1];
                self.cells[idx] = Cell::continuation(painted.fg, painted.bg, painted.attrs);
            }
            // w is 1 or 2
            #[allow(clippy::cast_possible_truncation)]
            let step = w as u16;
            col = col.saturating_add(step);
        }

        col.saturating_sub(x)
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

fn resolve_fg(fg: Color, bg: CellColor) -> CellColor {
    if fg.is_transparent() {
        CellColor::Default
    } else {
        fg.resolve_over(&bg)
    }
}

// ─── Text Width Utilities ────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// ```
/// use sb_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
#[inline]
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.width()
}

/// Clamp a display width to the `u16` coordinate space.
#[inline]
#[must_use]
pub fn width_u16(s: &str) -> u16 {
    u16::try_from(string_width(s)).unwrap_or(u16::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
