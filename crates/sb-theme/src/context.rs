//! Theme resolution for a render.
//!
//! A document is rendered for the first theme available among:
//!
//! ```text
//! explicit (passed to the render)  ─▶  ambient (context)  ─▶  fallback (base preset)
//! ```
//!
//! The context is an ordinary value handed to the renderer. There is no
//! global lookup.

use crate::builtin;
use crate::theme::Theme;

/// Ambient theme plus the fallback used when nothing else is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeContext {
    ambient: Option<Theme>,
    fallback: Theme,
}

impl Default for ThemeContext {
    /// No ambient theme; falls back to the `base` preset.
    fn default() -> Self {
        Self {
            ambient: None,
            fallback: builtin::base(),
        }
    }
}

impl ThemeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient theme.
    #[must_use]
    pub fn with_ambient(mut self, theme: Theme) -> Self {
        self.ambient = Some(theme);
        self
    }

    /// Replace the fallback theme.
    #[must_use]
    pub fn with_fallback(mut self, theme: Theme) -> Self {
        self.fallback = theme;
        self
    }

    #[must_use]
    pub const fn ambient(&self) -> Option<&Theme> {
        self.ambient.as_ref()
    }

    /// The theme a render should use.
    #[must_use]
    pub fn resolve<'a>(&'a self, explicit: Option<&'a Theme>) -> &'a Theme {
        explicit.or(self.ambient.as_ref()).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins() {
        let ctx = ThemeContext::new().with_ambient(builtin::dark());
        let explicit = builtin::swiss();
        assert_eq!(ctx.resolve(Some(&explicit)), &explicit);
    }

    #[test]
    fn ambient_before_fallback() {
        let ctx = ThemeContext::new().with_ambient(builtin::dark());
        assert_eq!(ctx.resolve(None), &builtin::dark());
    }

    #[test]
    fn fallback_is_base_by_default() {
        assert_eq!(ThemeContext::default().resolve(None), &builtin::base());
    }

    #[test]
    fn fallback_can_be_replaced() {
        let ctx = ThemeContext::new().with_fallback(builtin::deep());
        assert_eq!(ctx.resolve(None), &builtin::deep());
        assert!(ctx.ambient().is_none());
    }
}
