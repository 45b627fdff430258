// SPDX-License-Identifier: MIT
//
// Terminal queries: size and TTY detection.
//
// Safety: `ioctl(TIOCGWINSZ)` and `isatty` are the standard POSIX interfaces
// for these questions; there is no safe alternative in std. Each unsafe block
// is a single call on a zeroed, stack-owned struct.
#![allow(unsafe_code)]

// ─── Size ────────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns.
    pub cols: u16,
    /// Number of rows.
    pub rows: u16,
}

/// Width used when stdout is not a terminal and nothing else was asked for.
pub const FALLBACK_COLS: u16 = 80;

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    // SAFETY: winsize is plain old data; zeroed is a valid value.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    // SAFETY: TIOCGWINSZ writes into the winsize we own.
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Width to lay a document out at: the terminal's columns, or
/// [`FALLBACK_COLS`] when stdout is redirected.
#[must_use]
pub fn columns() -> u16 {
    get_size().map_or(FALLBACK_COLS, |s| s.cols)
}

/// Check whether stdout is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}
