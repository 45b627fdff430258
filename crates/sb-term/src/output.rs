// SPDX-License-Identifier: MIT
//
// Output buffering and stateful row rendering.
//
// A rendered document is written once, top to bottom, into the normal
// scrollback (no alternate screen, no cursor addressing).
//
//   OutputBuffer: accumulates the whole document in memory and reaches
//   the terminal in a single write.
//
//   RowWriter: remembers the SGR state it last emitted and skips redundant
//   escapes. Every row that changed style ends with a reset.
//
// `ColorDepth` decides how much color reaches the wire: 24-bit, downgraded to
// the 256-color palette, or none at all (plain text).

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── ColorDepth ──────────────────────────────────────────────────────────────

/// How many colors the output stream can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    /// 24-bit `TrueColor` escapes.
    #[default]
    TrueColor,
    /// Colors mapped to the nearest ANSI-256 palette entry.
    Ansi256,
    /// Text only, no escapes.
    None,
}

impl ColorDepth {
    /// Pick a depth from the environment the way most terminal tools do:
    /// `NO_COLOR` disables color, `COLORTERM=truecolor|24bit` enables 24-bit,
    /// and any other color-capable `TERM` gets the 256-color palette.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Environment-free core of [`detect`](Self::detect).
    #[must_use]
    pub fn from_env(no_color: bool, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color {
            return Self::None;
        }
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        match term {
            Some("dumb") | None => Self::None,
            Some(_) => Self::Ansi256,
        }
    }

    /// Map a cell color into this depth.
    #[must_use]
    pub fn map(self, color: CellColor) -> CellColor {
        match self {
            Self::TrueColor => color,
            Self::Ansi256 => color.to_ansi256(),
            Self::None => CellColor::Default,
        }
    }
}

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates a rendered document for a single write.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the buffer as a string. Everything written here is UTF-8.
    #[must_use]
    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// Write a character as UTF-8.
    pub fn write_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }

    /// Write everything to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Propagates write or flush failures from `w`.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── RowWriter ───────────────────────────────────────────────────────────────

/// Stateful row renderer that skips redundant SGR sequences.
///
/// - **Attributes**: on change, reset (SGR 0) then re-emit, which also
///   invalidates tracked colors. Going from no attributes to some skips
///   the reset.
/// - **Colors**: skipped if unchanged since the last emit.
/// - **Wide chars**: continuation cells produce no output.
#[allow(clippy::struct_field_names)]
pub struct RowWriter {
    depth: ColorDepth,
    last_fg: CellColor,
    last_bg: CellColor,
    last_attrs: Attr,
    dirty: bool,
}

impl RowWriter {
    /// Create a writer positioned at the start of a row, with the terminal
    /// in its default state.
    #[must_use]
    pub const fn new(depth: ColorDepth) -> Self {
        Self {
            depth,
            last_fg: CellColor::Default,
            last_bg: CellColor::Default,
            last_attrs: Attr::empty(),
            dirty: false,
        }
    }

    /// Render one row followed by a newline.
    ///
    /// Trailing plain spaces whose background maps to the default at this
    /// depth are dropped, so plain output has no trailing whitespace.
    pub fn render_row(&mut self, out: &mut OutputBuffer, row: &[Cell]) {
        let depth = self.depth;
        let end = row
            .iter()
            .rposition(|c| !(c.ch == ' ' && depth.map(c.bg).is_default() && c.attrs.is_empty()))
            .map_or(0, |i| i + 1);

        for cell in &row[..end] {
            if cell.is_continuation() {
                continue;
            }
            if self.depth != ColorDepth::None {
                self.apply_style(out, cell);
            }
            out.write_char(cell.ch);
        }

        if self.dirty {
            ansi::reset(out).ok();
        }
        *self = Self::new(self.depth);
        out.write_char('\n');
    }

    fn apply_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                // SGR 0 also restores default colors.
                ansi::reset(out).ok();
                self.last_fg = CellColor::Default;
                self.last_bg = CellColor::Default;
            }
            self.last_attrs = cell.attrs;
            if !cell.attrs.is_empty() {
                ansi::attrs(out, cell.attrs).ok();
                self.dirty = true;
            }
        }

        let fg = self.depth.map(cell.fg);
        if fg != self.last_fg {
            ansi::fg(out, fg).ok();
            self.last_fg = fg;
            self.dirty = true;
        }

        let bg = self.depth.map(cell.bg);
        if bg != self.last_bg {
            ansi::bg(out, bg).ok();
            self.last_bg = bg;
            self.dirty = true;
        }
    }
}

/// Render a whole frame into `out`, one line per row.
pub fn render_frame(out: &mut OutputBuffer, frame: &FrameBuffer, depth: ColorDepth) {
    let mut writer = RowWriter::new(depth);
    for row in frame.rows() {
        writer.render_row(out, row);
    }
}

/// Render a frame and write it to `w` in one go.
///
/// # Errors
///
/// Propagates write failures from `w`.
pub fn write_frame(w: &mut impl Write, frame: &FrameBuffer, depth: ColorDepth) -> io::Result<()> {
    let mut out = OutputBuffer::new();
    render_frame(&mut out, frame, depth);
    out.flush_to(w)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Style;
    use crate::color::Color;
    use pretty_assertions::assert_eq;

    fn render(frame: &FrameBuffer, depth: ColorDepth) -> String {
        let mut out = OutputBuffer::new();
        render_frame(&mut out, frame, depth);
        out.into_string()
    }

    // ── ColorDepth ──────────────────────────────────────────────────────

    #[test]
    fn no_color_wins() {
        assert_eq!(
            ColorDepth::from_env(true, Some("truecolor"), Some("xterm")),
            ColorDepth::None
        );
    }

    #[test]
    fn colorterm_truecolor() {
        assert_eq!(
            ColorDepth::from_env(false, Some("24bit"), Some("xterm")),
            ColorDepth::TrueColor
        );
    }

    #[test]
    fn plain_term_gets_256() {
        assert_eq!(
            ColorDepth::from_env(false, None, Some("xterm-256color")),
            ColorDepth::Ansi256
        );
        assert_eq!(ColorDepth::from_env(false, None, Some("dumb")), ColorDepth::None);
    }

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn output_buffer_flush_to() {
        let mut buf = OutputBuffer::new();
        buf.write_char('é');
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, "é".as_bytes());
        assert!(buf.is_empty());
    }

    // ── Rows ────────────────────────────────────────────────────────────

    #[test]
    fn plain_rows_have_no_escapes_or_trailing_space() {
        let mut frame = FrameBuffer::new(10, 2);
        frame.paint_text(0, 0, "ab", &Style::fg(Color::rgb8(255, 0, 0)), None);
        frame.paint_text(1, 1, "c", &Style::PLAIN, None);
        assert_eq!(render(&frame, ColorDepth::None), "ab\n c\n");
    }

    #[test]
    fn default_cells_emit_no_sgr() {
        let mut frame = FrameBuffer::new(4, 1);
        frame.paint_text(0, 0, "hi", &Style::PLAIN, None);
        assert_eq!(render(&frame, ColorDepth::TrueColor), "hi\n");
    }

    #[test]
    fn same_color_emitted_once_and_reset_at_eol() {
        let mut frame = FrameBuffer::new(4, 1);
        frame.paint_text(0, 0, "ab", &Style::fg(Color::rgb8(1, 2, 3)), None);
        assert_eq!(
            render(&frame, ColorDepth::TrueColor),
            "\x1b[38;2;1;2;3mab\x1b[0m\n"
        );
    }

    #[test]
    fn colored_background_keeps_trailing_spaces() {
        let frame = FrameBuffer::with_bg(2, 1, CellColor::Rgb(0, 0, 0));
        assert_eq!(
            render(&frame, ColorDepth::TrueColor),
            "\x1b[48;2;0;0;0m  \x1b[0m\n"
        );
    }

    #[test]
    fn plain_drops_colored_trailing_spaces() {
        let mut frame = FrameBuffer::with_bg(6, 1, CellColor::Rgb(0, 0, 0));
        frame.paint_text(0, 0, "ok", &Style::PLAIN, None);
        assert_eq!(render(&frame, ColorDepth::None), "ok\n");
    }

    #[test]
    fn ansi256_downgrades() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.paint_text(0, 0, "x", &Style::fg(Color::rgb8(255, 0, 0)), None);
        assert_eq!(render(&frame, ColorDepth::Ansi256), "\x1b[91mx\x1b[0m\n");
    }

    #[test]
    fn attrs_emitted() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.paint_text(0, 0, "B", &Style::PLAIN.with_attrs(Attr::BOLD), None);
        assert_eq!(render(&frame, ColorDepth::TrueColor), "\x1b[1mB\x1b[0m\n");
    }

    #[test]
    fn wide_char_written_once() {
        let mut frame = FrameBuffer::new(4, 1);
        frame.paint_text(0, 0, "中", &Style::PLAIN, None);
        assert_eq!(render(&frame, ColorDepth::None), "中\n");
    }
}
