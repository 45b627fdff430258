// SPDX-License-Identifier: MIT
//
// sb-term color system: CSS color values, sRGB-native.
//
// Single-character variable names (r, g, b, h, s, l, a) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Theme files describe colors the way CSS does: hex strings, named colors,
// `rgb()` and `hsl()` functions. This module parses all of those into one
// `Color` value and derives every textual representation from that single
// parsed value, so the hex, rgb and hsl strings a swatch shows can never
// disagree with each other.
//
// Conversion pipeline:
//
//   CSS string ─▶ Color (sRGB + alpha) ─▶ hex / rgb() / hsl() strings
//                        │
//                        └─▶ CellColor (terminal output, alpha resolved)
//
// Alpha blending happens in linear sRGB.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::named;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    /// The input was empty or only whitespace.
    #[error("empty color value")]
    Empty,

    /// A `#`-prefixed value with the wrong length or non-hex digits.
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    /// Not hex, not a function, and not a CSS color keyword.
    #[error("unknown color name `{0}`")]
    UnknownName(String),

    /// `rgb()`/`hsl()` with the wrong argument count or unparseable numbers.
    #[error("malformed color function `{0}`")]
    InvalidFunction(String),

    /// A channel parsed as a number but fell outside its valid range.
    #[error("channel `{channel}` out of range in `{input}`")]
    ChannelOutOfRange { input: String, channel: String },
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color stored as sRGB channels with alpha transparency.
///
/// Channels are kept as `f64` in `0.0..=1.0` so that colors parsed from
/// `hsl()` keep their exact value until they are formatted, and 8-bit
/// inputs convert to HSL without picking up single-precision error. Every output
/// representation (hex, `rgb()`, `hsl()`, terminal cell color) is derived
/// from these four numbers.
///
/// # Examples
///
/// ```
/// use sb_term::color::Color;
///
/// let primary: Color = "#07c".parse().unwrap();
/// assert_eq!(primary.to_hex(), "#0077cc");
/// assert_eq!(primary.to_css_rgb(), "rgb(0, 119, 204)");
/// assert_eq!(primary.to_css_hsl(), "hsl(205, 100%, 40%)");
///
/// let named: Color = "rebeccapurple".parse().unwrap();
/// assert_eq!(named.to_rgb8(), (102, 51, 153));
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Red channel, 0.0 to 1.0.
    pub r: f64,
    /// Green channel, 0.0 to 1.0.
    pub g: f64,
    /// Blue channel, 0.0 to 1.0.
    pub b: f64,
    /// Alpha (opacity): 0.0 (fully transparent) to 1.0 (fully opaque).
    pub alpha: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from sRGB values (0.0 to 1.0 range).
    #[inline]
    #[must_use]
    pub const fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Create a color from sRGB values with alpha.
    #[inline]
    #[must_use]
    pub const fn srgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from 8-bit sRGB values with alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::srgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Create a color from HSL values.
    ///
    /// - `h`: hue angle in degrees (any value, wrapped to 0°–360°)
    /// - `s`: saturation, 0.0 to 1.0
    /// - `l`: lightness, 0.0 to 1.0
    #[must_use]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        let (r, g, b) = hsl_to_srgb(h, s, l);
        Self::srgb(r, g, b)
    }

    /// Create a color from a hex string.
    ///
    /// Supports: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Parse any CSS color string: hex, named color, `rgb()`, `rgba()`,
    /// `hsl()` or `hsla()`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseColorError`] describing the first problem found.
    pub fn parse(input: &str) -> Result<Self, ParseColorError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseColorError::Empty);
        }

        if s.starts_with('#') {
            return parse_hex(s).ok_or_else(|| ParseColorError::InvalidHex(input.to_string()));
        }

        if let Some(caps) = FUNCTION_RE.captures(s) {
            let name = caps[1].to_ascii_lowercase();
            let args = split_args(&caps[2]);
            return if name.starts_with("rgb") {
                parse_rgb_args(input, &args)
            } else {
                parse_hsl_args(input, &args)
            };
        }

        let lower = s.to_ascii_lowercase();
        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        if let Some((r, g, b)) = named::lookup(&lower) {
            return Ok(Self::rgb8(r, g, b));
        }

        // Bare hex digits are accepted the way `hex()` accepts them.
        parse_hex(s).ok_or_else(|| ParseColorError::UnknownName(input.to_string()))
    }

    /// Pure black.
    pub const BLACK: Self = Self::srgb(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::srgb(1.0, 1.0, 1.0);

    /// Fully transparent (invisible).
    pub const TRANSPARENT: Self = Self::srgba(0.0, 0.0, 0.0, 0.0);

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha value.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Whether this color is fully transparent (alpha <= 0.0).
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    // ─── Alpha Blending ──────────────────────────────────────────────────

    /// Composite this color (source) over another (destination).
    ///
    /// Porter-Duff "source over", computed in linear sRGB.
    #[must_use]
    pub fn blend_over(self, dst: &Self) -> Self {
        if self.is_opaque() || dst.is_transparent() {
            return self;
        }
        if self.is_transparent() {
            return *dst;
        }

        let (sr, sg, sb) = self.to_linear_srgb();
        let sa = self.alpha;
        let (dr, dg, db) = dst.to_linear_srgb();
        let da = dst.alpha;

        let out_a = da.mul_add(1.0 - sa, sa);
        if out_a < 1e-6 {
            return Self::TRANSPARENT;
        }

        let inv_sa = 1.0 - sa;
        let out_r = sr.mul_add(sa, dr * da * inv_sa) / out_a;
        let out_g = sg.mul_add(sa, dg * da * inv_sa) / out_a;
        let out_b = sb.mul_add(sa, db * da * inv_sa) / out_a;

        Self {
            r: linear_to_srgb(out_r),
            g: linear_to_srgb(out_g),
            b: linear_to_srgb(out_b),
            alpha: out_a,
        }
    }

    // ─── Channel Access ──────────────────────────────────────────────────

    /// The sRGB channels, clamped to 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Convert to 8-bit sRGB.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to 8-bit sRGBA.
    #[must_use]
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, to_u8(self.alpha.clamp(0.0, 1.0)))
    }

    /// Convert to HSL.
    ///
    /// Returns `(hue, saturation, lightness)`: hue in degrees, the other two
    /// in 0.0–1.0. Achromatic colors (gray, black, white) have no hue and
    /// report `None`.
    #[must_use]
    pub fn to_hsl(self) -> (Option<f64>, f64, f64) {
        let (r, g, b) = self.to_srgb();
        srgb_to_hsl(r, g, b)
    }

    /// Convert to linear sRGB (for blending operations).
    fn to_linear_srgb(self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_srgb();
        (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    // ─── CSS Formatting ──────────────────────────────────────────────────

    /// Convert to hex string (`#rrggbb` or `#rrggbbaa` if alpha < 1.0).
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// CSS functional RGB notation with comma-space separators:
    /// `rgb(0, 119, 204)`, or `rgba(0, 119, 204, 0.5)` if alpha < 1.0.
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.is_opaque() {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", css_number(self.alpha))
        }
    }

    /// CSS functional HSL notation with comma-space separators:
    /// `hsl(205, 100%, 40%)`, or `hsla(...)` if alpha < 1.0.
    ///
    /// Every number is rounded to two decimals; achromatic colors use hue 0.
    #[must_use]
    pub fn to_css_hsl(self) -> String {
        let (h, s, l) = self.to_hsl();
        let h = css_number(h.unwrap_or(0.0));
        let s = css_number(s * 100.0);
        let l = css_number(l * 100.0);
        if self.is_opaque() {
            format!("hsl({h}, {s}%, {l}%)")
        } else {
            let a = css_number(self.alpha);
            format!("hsla({h}, {s}%, {l}%, {a})")
        }
    }

    // ─── Conversion to Terminal Output ───────────────────────────────────

    /// Convert to a [`CellColor`] for terminal rendering.
    ///
    /// Alpha is discarded. For colors with alpha, use
    /// [`resolve_over`](Self::resolve_over) to composite first.
    #[must_use]
    pub fn to_cell_color(self) -> CellColor {
        let (r, g, b) = self.to_rgb8();
        CellColor::Rgb(r, g, b)
    }

    /// Resolve this color to a terminal-ready [`CellColor`], compositing
    /// over the given background if this color has alpha < 1.0.
    ///
    /// ```
    /// use sb_term::color::{Color, CellColor};
    ///
    /// // The translucent white that nested space boxes are drawn with.
    /// let overlay: Color = "#ffffff44".parse().unwrap();
    /// let resolved = overlay.resolve_over(&CellColor::Rgb(0, 119, 204));
    /// assert!(matches!(resolved, CellColor::Rgb(_, _, _)));
    /// ```
    #[must_use]
    pub fn resolve_over(self, background: &CellColor) -> CellColor {
        if self.is_opaque() {
            return self.to_cell_color();
        }
        if self.is_transparent() {
            return *background;
        }
        let bg_color = background.to_color().unwrap_or(Self::BLACK);
        self.blend_over(&bg_color).to_cell_color()
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    /// Two colors are equal when they quantize to the same 8-bit RGBA.
    fn eq(&self, other: &Self) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color for terminal cell storage.
///
/// This is what gets written to the [`FrameBuffer`](crate::buffer::FrameBuffer)
/// and converted to ANSI escape sequences. For parsing and formatting, use
/// [`Color`] and convert with [`Color::to_cell_color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index.
    Ansi256(u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    /// Convert this cell color to a full [`Color`].
    /// Returns `None` for [`CellColor::Default`].
    #[must_use]
    pub fn to_color(self) -> Option<Color> {
        match self {
            Self::Rgb(r, g, b) => Some(Color::rgb8(r, g, b)),
            Self::Ansi256(idx) => {
                let (r, g, b) = ansi::ansi256_to_rgb(idx);
                Some(Color::rgb8(r, g, b))
            }
            Self::Default => None,
        }
    }

    /// Downgrade to the ANSI-256 palette (for terminals without `TrueColor`).
    #[must_use]
    pub fn to_ansi256(self) -> Self {
        match self {
            Self::Rgb(r, g, b) => Self::Ansi256(ansi::nearest_ansi256(r, g, b)),
            other => other,
        }
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl From<Color> for CellColor {
    fn from(color: Color) -> Self {
        color.to_cell_color()
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// HSL → sRGB. Saturation and lightness are clamped to 0.0–1.0.
fn hsl_to_srgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0f64.mul_add(l, -q);

    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            (q - p).mul_add(6.0 * t, p)
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            (q - p).mul_add((2.0 / 3.0 - t) * 6.0, p)
        } else {
            p
        }
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// sRGB → HSL. Hue is `None` for achromatic input.
fn srgb_to_hsl(r: f64, g: f64, b: f64) -> (Option<f64>, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f64::EPSILON {
        return (None, 0.0, l);
    }

    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    #[allow(clippy::float_cmp)] // max is one of r, g, b exactly
    let h = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let h = h * 60.0;
    let h = if h < 0.0 { h + 360.0 } else { h };

    (Some(h), s, l)
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(rgba?|hsla?)\s*\(\s*([^()]*?)\s*\)$").expect("color function pattern")
});

/// Split function arguments: `a, b, c[, d]` or `a b c[ / d]`.
fn split_args(body: &str) -> Vec<&str> {
    if body.contains(',') {
        body.split(',').map(str::trim).collect()
    } else {
        body.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|part| !part.is_empty())
            .collect()
    }
}

/// Parse a number that may carry a `%` suffix. Percentages are returned as
/// a fraction of `percent_of`.
fn parse_number(arg: &str, percent_of: f64) -> Option<f64> {
    let value = if let Some(pct) = arg.strip_suffix('%') {
        pct.trim().parse::<f64>().ok()? / 100.0 * percent_of
    } else {
        arg.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

fn parse_alpha(input: &str, arg: Option<&&str>) -> Result<f64, ParseColorError> {
    let Some(arg) = arg else {
        return Ok(1.0);
    };
    let alpha = parse_number(arg, 1.0)
        .ok_or_else(|| ParseColorError::InvalidFunction(input.to_string()))?;
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(ParseColorError::ChannelOutOfRange {
            input: input.to_string(),
            channel: (*arg).to_string(),
        })
    }
}

fn parse_rgb_args(input: &str, args: &[&str]) -> Result<Color, ParseColorError> {
    if !(3..=4).contains(&args.len()) {
        return Err(ParseColorError::InvalidFunction(input.to_string()));
    }

    let mut channels = [0.0f64; 3];
    for (slot, arg) in channels.iter_mut().zip(args) {
        let value = parse_number(arg, 255.0)
            .ok_or_else(|| ParseColorError::InvalidFunction(input.to_string()))?;
        if !(0.0..=255.0).contains(&value) {
            return Err(ParseColorError::ChannelOutOfRange {
                input: input.to_string(),
                channel: (*arg).to_string(),
            });
        }
        *slot = value / 255.0;
    }

    let alpha = parse_alpha(input, args.get(3))?;
    Ok(Color::srgba(channels[0], channels[1], channels[2], alpha))
}

fn parse_hsl_args(input: &str, args: &[&str]) -> Result<Color, ParseColorError> {
    if !(3..=4).contains(&args.len()) {
        return Err(ParseColorError::InvalidFunction(input.to_string()));
    }

    let hue = args[0].strip_suffix("deg").unwrap_or(args[0]);
    let h = parse_number(hue, 360.0)
        .ok_or_else(|| ParseColorError::InvalidFunction(input.to_string()))?;

    let mut sl = [0.0f64; 2];
    for (slot, arg) in sl.iter_mut().zip(&args[1..3]) {
        let bare = arg.strip_suffix('%').unwrap_or(arg);
        let value = bare
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseColorError::InvalidFunction(input.to_string()))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(ParseColorError::ChannelOutOfRange {
                input: input.to_string(),
                channel: (*arg).to_string(),
            });
        }
        *slot = value / 100.0;
    }

    let alpha = parse_alpha(input, args.get(3))?;
    Ok(Color::hsl(h, sl[0], sl[1]).with_alpha(alpha))
}

/// Parse a hex color string.
fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            let a = parse_hex_digit(bytes[3])?;
            Some(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        // #RRGGBBAA
        8 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            let a = parse_hex_byte(&bytes[6..8])?;
            Some(Color::rgba8(r, g, b, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

/// Format a number the way CSS serializers do: at most two decimals,
/// trailing zeros dropped, never `-0`.
#[must_use]
pub fn css_number(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{rounded}")
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

pub mod ansi {
    //! ANSI-256 palette and nearest-match for terminals without `TrueColor`.
    //!
    //! - Colors 0–15: standard and bright colors (xterm defaults)
    //! - Colors 16–231: a 6×6×6 RGB cube
    //! - Colors 232–255: a 24-step grayscale ramp

    /// The standard ANSI-16 palette as RGB values (xterm defaults).
    pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];

    /// Convert an ANSI-256 palette index to RGB values.
    #[must_use]
    pub fn ansi256_to_rgb(idx: u8) -> (u8, u8, u8) {
        match idx {
            0..=15 => ANSI16_RGB[idx as usize],
            16..=231 => {
                let idx = idx - 16;
                // The cube uses: 0, 95, 135, 175, 215, 255
                let to_value = |i: u8| -> u8 { if i == 0 { 0 } else { 55 + 40 * i } };
                (to_value(idx / 36), to_value((idx % 36) / 6), to_value(idx % 6))
            }
            232..=255 => {
                let v = 8 + 10 * (idx - 232);
                (v, v, v)
            }
        }
    }

    /// Find the nearest ANSI-256 color using the "redmean" weighted RGB
    /// distance, which tracks perceived difference far better than plain
    /// Euclidean RGB at negligible cost.
    #[must_use]
    pub fn nearest_ansi256(r: u8, g: u8, b: u8) -> u8 {
        let mut best_idx: u8 = 0;
        let mut best_dist = i64::MAX;

        for idx in 0u8..=255 {
            let (pr, pg, pb) = ansi256_to_rgb(idx);
            let rmean = (i64::from(r) + i64::from(pr)) / 2;
            let dr = i64::from(r) - i64::from(pr);
            let dg = i64::from(g) - i64::from(pg);
            let db = i64::from(b) - i64::from(pb);
            let dist = (((512 + rmean) * dr * dr) >> 8)
                + 4 * dg * dg
                + (((767 - rmean) * db * db) >> 8);

            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }

        best_idx
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> Color {
        s.parse().unwrap()
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_short_form_expands() {
        assert_eq!(parse("#07c").to_rgb8(), (0x00, 0x77, 0xcc));
    }

    #[test]
    fn hex_long_form() {
        assert_eq!(parse("#c86432").to_rgb8(), (200, 100, 50));
    }

    #[test]
    fn hex_without_hash() {
        assert_eq!(Color::hex("ff0000").unwrap().to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn hex_with_alpha() {
        let c = parse("#ffffff44");
        assert_eq!(c.to_rgba8(), (255, 255, 255, 0x44));
        assert!(!c.is_opaque());
    }

    #[test]
    fn hex_uppercase() {
        assert_eq!(parse("#ABCDEF").to_hex(), "#abcdef");
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(parse("#c86432").to_hex(), "#c86432");
    }

    #[test]
    fn hex_invalid_length() {
        assert_eq!(
            Color::parse("#12345"),
            Err(ParseColorError::InvalidHex("#12345".into()))
        );
    }

    #[test]
    fn hex_invalid_digit() {
        assert!(matches!(Color::parse("#ggg"), Err(ParseColorError::InvalidHex(_))));
    }

    // ── Named ────────────────────────────────────────────────────────────

    #[test]
    fn named_color_lookup() {
        assert_eq!(parse("tomato").to_rgb8(), (255, 99, 71));
        assert_eq!(parse("white").to_rgb8(), (255, 255, 255));
    }

    #[test]
    fn named_color_case_insensitive() {
        assert_eq!(parse("RebeccaPurple").to_rgb8(), (102, 51, 153));
    }

    #[test]
    fn transparent_keyword() {
        assert!(parse("transparent").is_transparent());
    }

    #[test]
    fn unknown_name_is_error() {
        assert_eq!(
            Color::parse("blurple"),
            Err(ParseColorError::UnknownName("blurple".into()))
        );
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(Color::parse("   "), Err(ParseColorError::Empty));
    }

    // ── Functions ────────────────────────────────────────────────────────

    #[test]
    fn rgb_function() {
        assert_eq!(parse("rgb(10, 20, 30)").to_rgb8(), (10, 20, 30));
    }

    #[test]
    fn rgb_function_no_spaces() {
        assert_eq!(parse("rgb(255,0,0)").to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn rgb_function_percentages() {
        assert_eq!(parse("rgb(100%, 0%, 50%)").to_rgb8(), (255, 0, 128));
    }

    #[test]
    fn rgba_function() {
        let c = parse("rgba(0, 0, 0, 0.5)");
        assert_eq!(c.to_rgba8(), (0, 0, 0, 128));
    }

    #[test]
    fn rgb_space_syntax_with_slash_alpha() {
        let c = parse("rgb(0 128 255 / 50%)");
        assert_eq!(c.to_rgba8(), (0, 128, 255, 128));
    }

    #[test]
    fn rgb_channel_out_of_range() {
        assert!(matches!(
            Color::parse("rgb(256, 0, 0)"),
            Err(ParseColorError::ChannelOutOfRange { .. })
        ));
    }

    #[test]
    fn rgb_wrong_arity() {
        assert!(matches!(
            Color::parse("rgb(1, 2)"),
            Err(ParseColorError::InvalidFunction(_))
        ));
    }

    #[test]
    fn hsl_function() {
        assert_eq!(parse("hsl(0, 100%, 50%)").to_rgb8(), (255, 0, 0));
        assert_eq!(parse("hsl(120deg, 100%, 25%)").to_rgb8(), (0, 128, 0));
    }

    #[test]
    fn hsla_function() {
        let c = parse("hsla(240, 100%, 50%, 0.25)");
        assert_eq!(c.to_rgba8(), (0, 0, 255, 64));
    }

    // ── Formatting ───────────────────────────────────────────────────────

    #[test]
    fn css_rgb_uses_comma_space() {
        assert_eq!(parse("#07c").to_css_rgb(), "rgb(0, 119, 204)");
    }

    #[test]
    fn css_rgba_when_translucent() {
        assert_eq!(parse("rgba(255, 0, 0, 0.5)").to_css_rgb(), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn css_hsl_primary() {
        assert_eq!(parse("#07c").to_css_hsl(), "hsl(205, 100%, 40%)");
    }

    #[test]
    fn css_hsl_achromatic_has_zero_hue() {
        assert_eq!(parse("#fff").to_css_hsl(), "hsl(0, 0%, 100%)");
        assert_eq!(parse("#000").to_css_hsl(), "hsl(0, 0%, 0%)");
    }

    #[test]
    fn css_hsl_rounds_to_two_decimals() {
        // #30c = (51, 0, 204): h = 255, s = 100%, l = 40%
        assert_eq!(parse("#30c").to_css_hsl(), "hsl(255, 100%, 40%)");
        // #f6f6f6: l = 246/255 = 96.470588...%
        assert_eq!(parse("#f6f6f6").to_css_hsl(), "hsl(0, 0%, 96.47%)");
    }

    #[test]
    fn css_hsl_ties_round_up_from_8_bit_channels() {
        // (0, 35, 224): hue is exactly 230.625, so the tie rounds to .63.
        assert_eq!(parse("#0023e0").to_css_hsl(), "hsl(230.63, 100%, 43.92%)");
        assert_eq!(Color::rgb8(0, 35, 224).to_css_hsl(), "hsl(230.63, 100%, 43.92%)");
    }

    #[test]
    fn formats_agree_on_the_same_color() {
        for input in ["#07c", "tomato", "rgb(12, 200, 99)", "hsl(300, 40%, 60%)"] {
            let c = parse(input);
            let from_hex = parse(&c.to_hex());
            let from_rgb = parse(&c.to_css_rgb());
            let from_hsl = parse(&c.to_css_hsl());
            let (r, g, b) = c.to_rgb8();
            for other in [from_hex, from_rgb, from_hsl] {
                let (or, og, ob) = other.to_rgb8();
                assert!(
                    r.abs_diff(or) <= 1 && g.abs_diff(og) <= 1 && b.abs_diff(ob) <= 1,
                    "{input}: {c:?} vs {other:?}"
                );
            }
        }
    }

    #[test]
    fn css_number_trims_zeros() {
        assert_eq!(css_number(205.0), "205");
        assert_eq!(css_number(33.333_333), "33.33");
        assert_eq!(css_number(-0.0), "0");
    }

    // ── Blending ─────────────────────────────────────────────────────────

    #[test]
    fn opaque_resolves_directly() {
        let c = parse("#102030");
        assert_eq!(c.resolve_over(&CellColor::Rgb(255, 255, 255)), CellColor::Rgb(16, 32, 48));
    }

    #[test]
    fn transparent_resolves_to_background() {
        let bg = CellColor::Rgb(1, 2, 3);
        assert_eq!(Color::TRANSPARENT.resolve_over(&bg), bg);
    }

    #[test]
    fn translucent_white_lightens_background() {
        let overlay = parse("#ffffff44");
        let CellColor::Rgb(r, g, b) = overlay.resolve_over(&CellColor::Rgb(0, 119, 204)) else {
            panic!("expected rgb");
        };
        assert!(r > 0 && g > 119 && b > 204);
    }

    // ── CellColor ────────────────────────────────────────────────────────

    #[test]
    fn ansi256_exact_cube_match() {
        // (95, 135, 175) is cube entry 16 + 36*1 + 6*2 + 3 = 67
        assert_eq!(CellColor::Rgb(95, 135, 175).to_ansi256(), CellColor::Ansi256(67));
    }

    #[test]
    fn ansi256_keeps_default() {
        assert_eq!(CellColor::Default.to_ansi256(), CellColor::Default);
    }

    #[test]
    fn grayscale_ramp() {
        assert_eq!(ansi::ansi256_to_rgb(232), (8, 8, 8));
        assert_eq!(ansi::ansi256_to_rgb(255), (238, 238, 238));
    }
}
