// SPDX-License-Identifier: MIT
//
// Clipboard sinks.
//
// Copying is fire-and-forget: a failed write is logged at debug level and
// never reaches the caller. `Osc52Clipboard` talks to the terminal;
// `MemoryClipboard` keeps what was copied for hosts and tests to inspect.

use std::io::Write;

use crate::ansi;

/// Something text can be copied into.
pub trait Clipboard {
    /// Place `text` on the clipboard. Failures are swallowed.
    fn copy(&mut self, text: &str);
}

// ─── OSC 52 ──────────────────────────────────────────────────────────────────

/// Copies through the terminal with an OSC 52 escape written to `W`.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Clipboard on the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) {
        let result = ansi::osc52_copy(&mut self.out, text).and_then(|()| self.out.flush());
        match result {
            Ok(()) => tracing::debug!(bytes = text.len(), "copied to clipboard"),
            Err(err) => tracing::debug!(%err, "clipboard write failed"),
        }
    }
}

// ─── Memory ──────────────────────────────────────────────────────────────────

/// Records every copy in order.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    history: Vec<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent copy.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Every copy, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) {
        self.history.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn osc52_writes_sequence() {
        let mut clip = Osc52Clipboard::new(Vec::new());
        clip.copy("hi");
        assert_eq!(clip.into_inner(), b"\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn osc52_failure_is_silent() {
        let mut clip = Osc52Clipboard::new(Broken);
        clip.copy("anything");
    }

    #[test]
    fn memory_keeps_history() {
        let mut clip = MemoryClipboard::new();
        assert_eq!(clip.contents(), None);
        clip.copy("#fff");
        clip.copy("rgb(255, 255, 255)");
        assert_eq!(clip.contents(), Some("rgb(255, 255, 255)"));
        assert_eq!(clip.history().len(), 2);
    }
}
