// SPDX-License-Identifier: MIT
//
// swatchbook.toml: defaults for the command line.
//
// Every key is optional. Command-line flags override the file; the file
// overrides the built-in defaults.
//
//   theme   = "demos/clown-town.json"
//   preset  = "deep"
//   mode    = "dark"
//   variant = "full"            # full | minimal
//   format  = "ansi"            # ansi | plain | json
//   width   = 100
//   pairs   = ["text:background", "primary:background"]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use sb_doc::DocVariant;

/// Name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "swatchbook.toml";

/// How the document reaches stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Painted cells with ANSI colors.
    #[default]
    Ansi,
    /// Painted cells, no escapes.
    Plain,
    /// The render tree as JSON.
    Json,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Theme file, relative to the config file's directory.
    #[serde(default)]
    pub theme: Option<PathBuf>,
    /// Preset used as the ambient theme.
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub variant: DocVariant,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub width: Option<u16>,
    /// Contrast pairs as `fg:bg`.
    #[serde(default)]
    pub pairs: Vec<String>,
}

impl Config {
    /// Load a config file. Relative theme paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let (Some(theme), Some(dir)) = (config.theme.as_mut(), path.parent()) {
            if theme.is_relative() {
                *theme = dir.join(&*theme);
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid swatchbook config")
    }

    /// Load `--config` if given, else `swatchbook.toml` in `dir` if present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
