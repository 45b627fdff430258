//! # sb-theme: design-system themes for swatchbook
//!
//! The theme model and every computation the documentation blocks need
//! from it. Nothing here paints; `sb-doc` turns these values into a
//! render tree.
//!
//! # Architecture
//!
//! ```text
//! JSON / TOML / preset
//!     │
//!     ▼
//! load.rs, builtin.rs:  produce a Theme (colors required)
//!     │
//!     ▼
//! context.rs:  explicit → ambient → base fallback
//!     │
//!     ├──▶ palette.rs:   ordered color entries, mode overlays
//!     ├──▶ format.rs:    hex / rgb() / hsl() from one parsed color
//!     ├──▶ contrast.rs:  WCAG ratio and verdict per named pair
//!     └──▶ scale.rs:     labeled and nested views of a token scale
//! ```

pub mod builtin;
pub mod context;
pub mod contrast;
pub mod error;
pub mod format;
pub mod load;
pub mod palette;
pub mod scale;
pub mod theme;

pub use context::ThemeContext;
pub use contrast::{ContrastLine, ContrastOutcome, ContrastPair, Verdict};
pub use error::ThemeError;
pub use format::{ColorFormats, FormatKind};
pub use palette::ColorPalette;
pub use scale::{Scale, ScaleStep, ScaleValue};
pub use theme::Theme;
