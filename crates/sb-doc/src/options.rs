//! Render options: which variant to build and which pairs to check.
//!
//! | Variant   | Example card | Swatch labels       | Space / Typography | Copy targets |
//! |-----------|--------------|---------------------|--------------------|--------------|
//! | `full`    | yes          | bold, copyable      | when present       | yes          |
//! | `minimal` | no           | plain               | never              | no           |
//!
//! `full` is the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sb_theme::ContrastPair;

/// Which flavor of documentation to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocVariant {
    /// Every block, clickable names and formats, the example card.
    #[default]
    Full,
    /// Colors only, plain labels.
    Minimal,
}

impl DocVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Minimal => "minimal",
        }
    }

    /// Whether swatch names and formats are copy targets.
    #[must_use]
    pub const fn copyable(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for DocVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown variant `{other}` (expected full or minimal)")),
        }
    }
}

/// Everything a render needs besides the theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub variant: DocVariant,
    /// Pairs for the contrast diagnostics, in output order.
    pub contrast_pairs: Vec<ContrastPair>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            variant: DocVariant::Full,
            contrast_pairs: ContrastPair::defaults(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_variant(mut self, variant: DocVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Replace the contrast pairs. An empty list keeps the defaults.
    #[must_use]
    pub fn with_pairs(mut self, pairs: Vec<ContrastPair>) -> Self {
        if !pairs.is_empty() {
            self.contrast_pairs = pairs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_full_with_eight_pairs() {
        let opts = RenderOptions::default();
        assert_eq!(opts.variant, DocVariant::Full);
        assert_eq!(opts.contrast_pairs.len(), 8);
    }

    #[test]
    fn variant_round_trips_through_str() {
        for v in [DocVariant::Full, DocVariant::Minimal] {
            assert_eq!(v.as_str().parse::<DocVariant>(), Ok(v));
        }
        assert!("compact".parse::<DocVariant>().is_err());
    }

    #[test]
    fn empty_pairs_keep_defaults() {
        let opts = RenderOptions::new().with_pairs(Vec::new());
        assert_eq!(opts.contrast_pairs, ContrastPair::defaults());
    }

    #[test]
    fn pairs_override() {
        let opts = RenderOptions::new().with_pairs(vec![ContrastPair::new("accent", "background")]);
        assert_eq!(opts.contrast_pairs, [ContrastPair::new("accent", "background")]);
    }

    #[test]
    fn only_full_is_copyable() {
        assert!(DocVariant::Full.copyable());
        assert!(!DocVariant::Minimal.copyable());
    }
}
