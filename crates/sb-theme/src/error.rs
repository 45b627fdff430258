//! Theme errors.

use std::path::PathBuf;

use sb_term::color::ParseColorError;

/// Everything that can go wrong between a theme source and a usable theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme has no `colors` section. Every document needs one.
    #[error("theme has no `colors` section")]
    MissingColors,

    /// A palette entry is not a color the parser understands.
    #[error("color `{name}` has an invalid value")]
    InvalidColor {
        name: String,
        #[source]
        source: ParseColorError,
    },

    #[error("unknown preset `{name}` (available: {available})")]
    UnknownPreset { name: String, available: String },

    #[error("unknown color mode `{name}` (available: {available})")]
    UnknownMode { name: String, available: String },

    #[error("failed to read theme file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON theme")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML theme")]
    Toml(#[from] toml::de::Error),

    /// The file extension maps to no known theme format.
    #[error("unsupported theme file `{0}` (expected .json or .toml)")]
    UnsupportedFormat(String),
}

/// Join names for an error message, or `none` when there are none.
pub(crate) fn list_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let joined = names.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "none".to_string() } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invalid_color_keeps_source() {
        let err = ThemeError::InvalidColor {
            name: "primary".into(),
            source: ParseColorError::UnknownName("blurple".into()),
        };
        assert_eq!(err.to_string(), "color `primary` has an invalid value");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("unknown color name `blurple`"));
    }

    #[test]
    fn list_names_handles_empty() {
        assert_eq!(list_names([]), "none");
        assert_eq!(list_names(["dark", "light"]), "dark, light");
    }
}
