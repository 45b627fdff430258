//! # sb-doc: documentation blocks for a theme
//!
//! Turns a [`Theme`](sb_theme::Theme) into a [`Document`]: the colors of its
//! palette with every format and a contrast check per role pair, its space
//! scale as labeled bars and nested boxes, and its typography tokens.
//!
//! # Pipeline
//!
//! ```text
//! ThemeContext + explicit theme
//!     │
//!     ▼
//! render.rs:   ThemeDocRenderer::render ─▶ Document (plain data)
//!     │
//!     ├──▶ view.rs:  paint into a FrameBuffer, record copy regions
//!     ├──▶ copy.rs:  "primary.hex" ─▶ text ─▶ Clipboard
//!     └──▶ serde:    JSON for other hosts
//! ```

pub mod copy;
pub mod document;
pub mod options;
pub mod render;
pub mod view;

pub use copy::{CopyField, CopyTarget};
pub use document::{Block, ColorBlock, Document, SpaceBlock, Swatch, TypographyBlock};
pub use options::{DocVariant, RenderOptions};
pub use render::ThemeDocRenderer;
pub use view::{CopyRegion, DocView, Painted};

use sb_theme::ThemeError;

/// Errors from building or querying a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// The target names no swatch, or the document has no copy targets.
    #[error("no copy target `{0}` in this document")]
    UnknownCopyTarget(String),
}
