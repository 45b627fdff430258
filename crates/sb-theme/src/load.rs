//! Reading themes from JSON and TOML sources.

use std::path::Path;

use crate::builtin;
use crate::error::{ThemeError, list_names};
use crate::theme::Theme;

/// Serialization format of a theme source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Json,
    Toml,
}

impl ThemeFormat {
    /// Pick the format from a file extension.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnsupportedFormat`] for anything but `.json`/`.toml`.
    pub fn from_path(path: &Path) -> Result<Self, ThemeError> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ThemeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a theme from source text and check it has colors.
///
/// # Errors
///
/// Syntax errors from the format's parser, or
/// [`ThemeError::MissingColors`].
pub fn parse_theme(source: &str, format: ThemeFormat) -> Result<Theme, ThemeError> {
    let theme: Theme = match format {
        ThemeFormat::Json => serde_json::from_str(source)?,
        ThemeFormat::Toml => toml::from_str(source)?,
    };
    theme.validate()?;
    Ok(theme)
}

/// Read and parse a theme file.
///
/// # Errors
///
/// [`ThemeError::Read`] if the file cannot be read, otherwise as
/// [`parse_theme`].
pub fn load_theme(path: &Path) -> Result<Theme, ThemeError> {
    let format = ThemeFormat::from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let theme = parse_theme(&source, format)?;
    tracing::debug!(path = %path.display(), ?format, "loaded theme");
    Ok(theme)
}

/// Look up a preset, failing with the list of known names.
///
/// # Errors
///
/// [`ThemeError::UnknownPreset`].
pub fn preset(name: &str) -> Result<Theme, ThemeError> {
    builtin::builtin_theme(name).ok_or_else(|| ThemeError::UnknownPreset {
        name: name.to_string(),
        available: list_names(builtin::builtin_names().iter().copied()),
    })
}
