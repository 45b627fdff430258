// SPDX-License-Identifier: MIT
//
// sb-term: terminal painting for swatchbook.
//
// Parses CSS color values and derives their hex, rgb() and hsl() strings from
// a single parsed value. Paints documents into a growable cell grid with
// linear-light alpha compositing, then streams the grid as ANSI text at the
// color depth the output can carry. Clipboard copies go out as OSC 52.
//
// No TUI framework: every escape sequence is written by `ansi`.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod clipboard;
pub mod color;
pub mod named;
pub mod output;
pub mod terminal;
