// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state
// and no decisions about when to emit; `RowWriter` in `output` owns that.
// This module only knows the byte-level encoding of each sequence.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::cell::Attr;
use crate::color::CellColor;

// ─── Reset ───────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Compact SGR codes for the 16 standard colors (30–37, 90–97), `38;5;N`
/// for the rest of the palette and `38;2;R;G;B` for `TrueColor`.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx @ 0..=7) => write!(w, "\x1b[{}m", 30 + u16::from(idx)),
        CellColor::Ansi256(idx @ 8..=15) => write!(w, "\x1b[{}m", 82 + u16::from(idx)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[38;5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

// ─── Background Color ────────────────────────────────────────────────────────

/// Set the background color (40–47, 100–107, `48;5;N`, `48;2;R;G;B`).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx @ 0..=7) => write!(w, "\x1b[{}m", 40 + u16::from(idx)),
        CellColor::Ansi256(idx @ 8..=15) => write!(w, "\x1b[{}m", 92 + u16::from(idx)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[48;5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as a single CSI sequence
/// (`\x1b[1;4m` for bold + underline). Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = [
        (Attr::BOLD, "1"),
        (Attr::DIM, "2"),
        (Attr::ITALIC, "3"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ]
    .into_iter()
    .filter_map(|(flag, code)| attr.contains(flag).then_some(code))
    .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

// ─── Clipboard ───────────────────────────────────────────────────────────────

/// Set the system clipboard through OSC 52 (`ESC ] 52 ; c ; <base64> BEL`).
///
/// Supported by most modern terminals and forwarded by tmux when
/// `set-clipboard` is on. The terminal never answers, so there is no way to
/// learn whether the write was honored.
pub fn osc52_copy(w: &mut impl Write, text: &str) -> io::Result<()> {
    write!(w, "\x1b]52;c;{}\x07", STANDARD.encode(text))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
