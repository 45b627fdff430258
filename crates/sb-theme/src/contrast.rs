//! WCAG contrast evaluation for named color pairs.
//!
//! Luminance follows WCAG 2.x on the unrounded sRGB channels (linearization
//! threshold 0.03928, exponent 2.4). A pair is readable for normal text
//! when its ratio reaches [`AA_NORMAL_TEXT`].
//!
//! Lines are produced in pair-list order, never palette order. The default
//! list is [`DEFAULT_CONTRAST_PAIRS`]; callers may pass any other list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sb_term::color::Color;

use crate::error::ThemeError;
use crate::palette::ColorPalette;

/// WCAG AA minimum contrast for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// The pairs a color block checks unless told otherwise, as
/// `(foreground, background)`.
pub const DEFAULT_CONTRAST_PAIRS: [(&str, &str); 8] = [
    ("text", "background"),
    ("text", "muted"),
    ("primary", "background"),
    ("secondary", "background"),
    ("text", "primary"),
    ("text", "secondary"),
    ("muted", "primary"),
    ("muted", "secondary"),
];

// -----------------------------------------------------------------------------
// Luminance and ratio
// -----------------------------------------------------------------------------

fn linearize(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x, in [0.0, 1.0].
#[must_use]
#[allow(clippy::suboptimal_flops)] // plain sum keeps white at exactly 1.0
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// `(L_lighter + 0.05) / (L_darker + 0.05)`, in [1.0, 21.0].
///
/// Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// -----------------------------------------------------------------------------
// Verdict
// -----------------------------------------------------------------------------

/// Whether a ratio is enough for normal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "enough")]
    Enough,
    #[serde(rename = "not enough")]
    NotEnough,
}

impl Verdict {
    #[must_use]
    pub fn classify(ratio: f64) -> Self {
        if ratio >= AA_NORMAL_TEXT {
            Self::Enough
        } else {
            Self::NotEnough
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enough => "enough",
            Self::NotEnough => "not enough",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// Pairs
// -----------------------------------------------------------------------------

/// A `(foreground, background)` pair of palette names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContrastPair {
    pub fg: String,
    pub bg: String,
}

impl ContrastPair {
    #[must_use]
    pub fn new(fg: impl Into<String>, bg: impl Into<String>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
        }
    }

    /// [`DEFAULT_CONTRAST_PAIRS`] as owned pairs.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CONTRAST_PAIRS
            .iter()
            .map(|&(fg, bg)| Self::new(fg, bg))
            .collect()
    }
}

impl FromStr for ContrastPair {
    type Err = String;

    /// `fg:bg`, e.g. `text:background`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((fg, bg)) if !fg.trim().is_empty() && !bg.trim().is_empty() => {
                Ok(Self::new(fg.trim(), bg.trim()))
            }
            _ => Err(format!("expected FG:BG, got `{s}`")),
        }
    }
}

impl fmt::Display for ContrastPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.fg, self.bg)
    }
}

// -----------------------------------------------------------------------------
// Lines
// -----------------------------------------------------------------------------

/// The result for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContrastOutcome {
    /// Both colors resolved. `ratio` is full precision.
    Measured {
        ratio: f64,
        verdict: Verdict,
        fg_color: String,
        bg_color: String,
    },
    /// One of the names is not in the palette.
    Missing { name: String },
}

/// One diagnostic line of a color block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastLine {
    pub fg: String,
    pub bg: String,
    #[serde(flatten)]
    pub outcome: ContrastOutcome,
}

impl ContrastLine {
    /// The measured ratio, if both colors resolved.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        match self.outcome {
            ContrastOutcome::Measured { ratio, .. } => Some(ratio),
            ContrastOutcome::Missing { .. } => None,
        }
    }

    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        match self.outcome {
            ContrastOutcome::Measured { verdict, .. } => Some(verdict),
            ContrastOutcome::Missing { .. } => None,
        }
    }
}

impl fmt::Display for ContrastLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contrast for {} on {} is: ", self.fg, self.bg)?;
        match &self.outcome {
            ContrastOutcome::Measured { ratio, verdict, .. } => write!(f, "{ratio} ({verdict})"),
            ContrastOutcome::Missing { name } => {
                write!(f, "unavailable ({name} is not in the palette)")
            }
        }
    }
}

/// Evaluate every pair against the palette, in pair order.
///
/// # Errors
///
/// [`ThemeError::InvalidColor`] if a named entry exists but does not parse.
pub fn evaluate(palette: &ColorPalette, pairs: &[ContrastPair]) -> Result<Vec<ContrastLine>, ThemeError> {
    pairs
        .iter()
        .map(|pair| {
            let fg = palette.resolve(&pair.fg)?;
            let bg = palette.resolve(&pair.bg)?;
            let outcome = match (fg, bg) {
                (Some(fg), Some(bg)) => {
                    let ratio = contrast_ratio(bg, fg);
                    ContrastOutcome::Measured {
                        ratio,
                        verdict: Verdict::classify(ratio),
                        fg_color: fg.to_hex(),
                        bg_color: bg.to_hex(),
                    }
                }
                (None, _) => missing(pair, &pair.fg),
                (_, None) => missing(pair, &pair.bg),
            };
            Ok(ContrastLine {
                fg: pair.fg.clone(),
                bg: pair.bg.clone(),
                outcome,
            })
        })
        .collect()
}

fn missing(pair: &ContrastPair, name: &str) -> ContrastOutcome {
    tracing::warn!(pair = %pair, name, "contrast pair names a color the palette lacks");
    ContrastOutcome::Missing {
        name: name.to_string(),
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn hex(s: &str) -> Color {
        Color::parse(s).unwrap()
    }

    // ── luminance ──

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 1e-12));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_uses_wcag_threshold() {
        // 10/255 = 0.0392 sits just under 0.03928: linear segment.
        let c = Color::rgb8(10, 10, 10);
        assert!(approx_eq(relative_luminance(c), 10.0 / 255.0 / 12.92, 1e-12));
    }

    // ── ratio ──

    #[test]
    fn contrast_black_white_is_21() {
        assert!(approx_eq(contrast_ratio(Color::BLACK, Color::WHITE), 21.0, 1e-9));
    }

    #[test]
    fn contrast_same_color_is_1() {
        assert!(approx_eq(contrast_ratio(hex("#07c"), hex("#07c")), 1.0, 1e-12));
    }

    #[test]
    fn ratio_uses_unrounded_channels() {
        // hsl(230, 25%, 18%) sits between 8-bit steps; rounding first gives 14.9536.
        let ratio = contrast_ratio(hex("hsl(230, 25%, 18%)"), Color::WHITE);
        assert!(approx_eq(ratio, 14.896_19, 1e-5), "{ratio}");
    }

    #[test]
    fn contrast_is_symmetric() {
        let pairs = [("#07c", "#fff"), ("#30c", "#f6f6f6"), ("tomato", "navy"), ("#000", "#123456")];
        for (a, b) in pairs {
            assert_eq!(contrast_ratio(hex(a), hex(b)), contrast_ratio(hex(b), hex(a)));
        }
    }

    // ── verdict ──

    #[test]
    fn boundary_is_inclusive() {
        assert_eq!(Verdict::classify(4.5), Verdict::Enough);
        assert_eq!(Verdict::classify(4.49999), Verdict::NotEnough);
        assert_eq!(Verdict::classify(21.0), Verdict::Enough);
        assert_eq!(Verdict::classify(1.0), Verdict::NotEnough);
    }

    // ── pairs ──

    #[test]
    fn default_pairs_in_order() {
        let pairs: Vec<String> = ContrastPair::defaults().iter().map(ToString::to_string).collect();
        assert_eq!(
            pairs,
            [
                "text:background",
                "text:muted",
                "primary:background",
                "secondary:background",
                "text:primary",
                "text:secondary",
                "muted:primary",
                "muted:secondary",
            ]
        );
    }

    #[test]
    fn pair_parses_from_cli_form() {
        assert_eq!("accent : background".parse(), Ok(ContrastPair::new("accent", "background")));
        assert!("accent".parse::<ContrastPair>().is_err());
        assert!(":bg".parse::<ContrastPair>().is_err());
    }

    // ── evaluate ──

    #[test]
    fn black_on_white_is_21_and_enough() {
        let palette: ColorPalette = [("background", "#ffffff"), ("text", "#000000")].into_iter().collect();
        let lines = evaluate(&palette, &[ContrastPair::new("text", "background")]).unwrap();
        assert_eq!(lines[0].verdict(), Some(Verdict::Enough));
        assert!(approx_eq(lines[0].ratio().unwrap(), 21.0, 1e-9));
        assert_eq!(
            lines[0].to_string(),
            "Contrast for text on background is: 21 (enough)"
        );
    }

    #[test]
    fn white_on_white_is_1_and_not_enough() {
        let palette: ColorPalette = [("background", "#ffffff"), ("text", "#ffffff")].into_iter().collect();
        let lines = evaluate(&palette, &[ContrastPair::new("text", "background")]).unwrap();
        assert_eq!(lines[0].ratio(), Some(1.0));
        assert_eq!(
            lines[0].to_string(),
            "Contrast for text on background is: 1 (not enough)"
        );
    }

    #[test]
    fn lines_follow_pair_order_not_palette_order() {
        let palette: ColorPalette = [("a", "#fff"), ("b", "#000"), ("c", "#f00")].into_iter().collect();
        let pairs = [ContrastPair::new("c", "a"), ContrastPair::new("a", "b")];
        let lines = evaluate(&palette, &pairs).unwrap();
        let order: Vec<_> = lines.iter().map(|l| (l.fg.as_str(), l.bg.as_str())).collect();
        assert_eq!(order, [("c", "a"), ("a", "b")]);
    }

    #[test]
    fn ratio_is_unrounded() {
        let palette: ColorPalette = [("background", "#fff"), ("primary", "#07c")].into_iter().collect();
        let lines = evaluate(&palette, &[ContrastPair::new("primary", "background")]).unwrap();
        let ratio = lines[0].ratio().unwrap();
        assert!(ratio > 4.6 && ratio < 4.7, "{ratio}");
        assert_eq!(lines[0].to_string(), format!("Contrast for primary on background is: {ratio} (enough)"));
        assert!(ratio.to_string().len() > 6);
    }

    #[test]
    fn missing_name_is_reported_in_line() {
        let palette: ColorPalette = [("text", "#000")].into_iter().collect();
        let lines = evaluate(&palette, &[ContrastPair::new("text", "muted")]).unwrap();
        assert_eq!(
            lines[0].outcome,
            ContrastOutcome::Missing {
                name: "muted".into()
            }
        );
        assert_eq!(
            lines[0].to_string(),
            "Contrast for text on muted is: unavailable (muted is not in the palette)"
        );
    }

    #[test]
    fn invalid_color_is_an_error() {
        let palette: ColorPalette = [("text", "#000"), ("background", "nope")].into_iter().collect();
        assert!(matches!(
            evaluate(&palette, &ContrastPair::defaults()[..1]),
            Err(ThemeError::InvalidColor { .. })
        ));
    }
}
