// SPDX-License-Identifier: MIT
//
// swatchbook: documentation blocks for design-system themes.
//
// This binary wires the crates together:
//
//   sb-theme → theme model, presets, loading, contrast, scales
//   sb-doc   → render tree, view painting, copy targets
//   sb-term  → colors, framebuffer, ANSI output, clipboard
//
// One invocation is one pass:
//
//   args + swatchbook.toml → Settings
//   Settings → ThemeContext (preset as ambient) + explicit theme (file)
//   ThemeDocRenderer::render → Document
//   Document → ANSI / plain (DocView + write_frame) or JSON
//   --copy TARGET → OSC 52 on stdout (ANSI on a terminal) or stderr

mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sb_doc::copy;
use sb_doc::{CopyTarget, DocVariant, DocView, Document, RenderOptions, ThemeDocRenderer};
use sb_term::clipboard::Osc52Clipboard;
use sb_term::output::{ColorDepth, write_frame};
use sb_term::terminal;
use sb_theme::load::{load_theme, preset};
use sb_theme::{ContrastPair, Theme, ThemeContext};

use crate::config::{Config, OutputFormat};

/// Environment variable holding a tracing filter.
const LOG_ENV: &str = "SWATCHBOOK_LOG";

// ─── Command line ───────────────────────────────────────────────────────────

/// Render documentation blocks for a design-system theme.
#[derive(Parser, Debug)]
#[command(name = "swatchbook", version, about)]
struct Cli {
    /// Theme file (.json or .toml). Without one, the preset or `base` is used.
    theme: Option<PathBuf>,

    /// Built-in theme used when no file is given (base, dark, deep, swiss).
    #[arg(short, long)]
    preset: Option<String>,

    /// Color mode to apply to the palette.
    #[arg(short, long)]
    mode: Option<String>,

    /// Colors only, plain labels, no copy targets.
    #[arg(long)]
    minimal: bool,

    /// Output format.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output width in columns (default: terminal width).
    #[arg(short, long)]
    width: Option<u16>,

    /// Contrast pair `FG:BG`, repeatable. Replaces the default pairs.
    #[arg(long = "pair", value_name = "FG:BG")]
    pairs: Vec<ContrastPair>,

    /// Copy a swatch field to the clipboard, e.g. `primary.hex`.
    #[arg(long, value_name = "TARGET")]
    copy: Option<CopyTarget>,

    /// Config file (default: ./swatchbook.toml if present).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ─── Settings ───────────────────────────────────────────────────────────────

/// Command line merged over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    theme: Option<PathBuf>,
    preset: Option<String>,
    mode: Option<String>,
    variant: DocVariant,
    format: OutputFormat,
    width: Option<u16>,
    pairs: Vec<ContrastPair>,
    copy: Option<CopyTarget>,
}

impl Settings {
    fn resolve(cli: Cli, config: Config) -> Result<Self> {
        let pairs = if cli.pairs.is_empty() {
            config
                .pairs
                .iter()
                .map(|p| {
                    p.parse::<ContrastPair>()
                        .map_err(anyhow::Error::msg)
                        .with_context(|| format!("Invalid contrast pair in config: {p}"))
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            cli.pairs
        };

        Ok(Self {
            theme: cli.theme.or(config.theme),
            preset: cli.preset.or(config.preset),
            mode: cli.mode.or(config.mode),
            variant: if cli.minimal { DocVariant::Minimal } else { config.variant },
            format: cli.format.unwrap_or(config.format),
            width: cli.width.or(config.width),
            pairs,
            copy: cli.copy,
        })
    }

    fn options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_variant(self.variant)
            .with_pairs(self.pairs.clone())
    }

    fn context(&self) -> Result<ThemeContext> {
        let mut context = ThemeContext::new();
        if let Some(name) = &self.preset {
            context = context.with_ambient(preset(name)?);
        }
        Ok(context)
    }
}

// ─── Pipeline ───────────────────────────────────────────────────────────────

fn render(settings: &Settings) -> Result<Document> {
    let explicit = settings
        .theme
        .as_deref()
        .map(|path| {
            load_theme(path).with_context(|| format!("Failed to load theme {}", path.display()))
        })
        .transpose()?;

    let renderer = ThemeDocRenderer::new(settings.context()?, settings.options());
    let document = match &settings.mode {
        Some(mode) => {
            let theme: Theme = renderer.context().resolve(explicit.as_ref()).with_mode(mode)?;
            renderer.render(Some(&theme))?
        }
        None => renderer.render(explicit.as_ref())?,
    };
    debug!(blocks = document.blocks.len(), "document ready");
    Ok(document)
}

fn write_document(out: &mut impl Write, document: &Document, settings: &Settings) -> Result<()> {
    match settings.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, document).context("Failed to encode document")?;
            writeln!(out)?;
        }
        format => {
            let width = settings.width.unwrap_or_else(terminal::columns);
            let painted = DocView::new(width).paint(document);
            let depth = match format {
                OutputFormat::Plain => ColorDepth::None,
                _ => ColorDepth::detect(),
            };
            write_frame(out, &painted.frame, depth).context("Failed to write output")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the document, then the OSC 52 escape for `--copy`. The escape goes
/// to `out` only when that is ANSI output on a terminal; otherwise it goes to
/// `side`, so JSON and plain output stay byte-clean for pipes.
fn emit(
    out: &mut impl Write,
    side: &mut impl Write,
    document: &Document,
    settings: &Settings,
    out_is_tty: bool,
) -> Result<()> {
    write_document(out, document, settings)?;

    if let Some(target) = &settings.copy {
        if out_is_tty && settings.format == OutputFormat::Ansi {
            copy::copy(document, target, &mut Osc52Clipboard::new(&mut *out))?;
        } else {
            debug!(format = ?settings.format, "clipboard escape routed to stderr");
            copy::copy(document, target, &mut Osc52Clipboard::new(&mut *side))?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(cli, config)?;
    debug!(?settings, "settings");

    let document = render(&settings)?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    emit(
        &mut stdout.lock(),
        &mut stderr.lock(),
        &document,
        &settings,
        terminal::is_tty(),
    )
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("swatchbook: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_theme::builtin;
    use std::path::Path;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("swatchbook").chain(args.iter().copied())).unwrap()
    }

    fn settings(args: &[&str], config: Config) -> Settings {
        Settings::resolve(cli(args), config).unwrap()
    }

    // ── Arguments ───────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let s = settings(&[], Config::default());
        assert_eq!(s.variant, DocVariant::Full);
        assert_eq!(s.format, OutputFormat::Ansi);
        assert!(s.pairs.is_empty());
        assert_eq!(s.options().contrast_pairs, ContrastPair::defaults());
    }

    #[test]
    fn parses_pairs_and_copy_target() {
        let s = settings(&["--pair", "accent:background", "--copy", "primary.hex"], Config::default());
        assert_eq!(s.pairs, [ContrastPair::new("accent", "background")]);
        assert_eq!(s.copy.map(|t| t.to_string()).as_deref(), Some("primary.hex"));
    }

    #[test]
    fn malformed_pair_is_rejected() {
        assert!(Cli::try_parse_from(["swatchbook", "--pair", "nocolon"]).is_err());
    }

    #[test]
    fn verbose_counts() {
        assert_eq!(cli(&["-vv"]).verbose, 2);
    }

    // ── Config merge ────────────────────────────────────────────────────

    #[test]
    fn flags_override_config() {
        let config = Config {
            preset: Some("dark".into()),
            format: OutputFormat::Json,
            width: Some(60),
            ..Config::default()
        };
        let s = settings(&["--preset", "deep", "--format", "plain"], config);
        assert_eq!(s.preset.as_deref(), Some("deep"));
        assert_eq!(s.format, OutputFormat::Plain);
        assert_eq!(s.width, Some(60));
    }

    #[test]
    fn minimal_flag_beats_config_variant() {
        let s = settings(&["--minimal"], Config::default());
        assert_eq!(s.variant, DocVariant::Minimal);
        let config = Config {
            variant: DocVariant::Minimal,
            ..Config::default()
        };
        assert_eq!(settings(&[], config).variant, DocVariant::Minimal);
    }

    #[test]
    fn config_pairs_used_without_flags() {
        let config = Config {
            pairs: vec!["muted:background".into()],
            ..Config::default()
        };
        assert_eq!(settings(&[], config).pairs, [ContrastPair::new("muted", "background")]);
    }

    #[test]
    fn bad_config_pair_fails() {
        let config = Config {
            pairs: vec!["nope".into()],
            ..Config::default()
        };
        assert!(Settings::resolve(cli(&[]), config).is_err());
    }

    // ── Pipeline ────────────────────────────────────────────────────────

    #[test]
    fn preset_is_ambient() {
        let doc = render(&settings(&["--preset", "swiss"], Config::default())).unwrap();
        let expected = ThemeDocRenderer::default().render(Some(&builtin::swiss())).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn unknown_preset_fails() {
        let err = render(&settings(&["--preset", "neon"], Config::default())).unwrap_err();
        assert!(err.to_string().contains("unknown preset `neon`"));
    }

    #[test]
    fn unknown_mode_fails() {
        let err = render(&settings(&["--mode", "sepia"], Config::default())).unwrap_err();
        assert!(err.to_string().contains("unknown color mode `sepia`"));
    }

    #[test]
    fn json_output() {
        let s = settings(&["--format", "json"], Config::default());
        let doc = render(&s).unwrap();
        let mut out = Vec::new();
        write_document(&mut out, &doc, &s).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["blocks"][0]["kind"], "colors");
    }

    #[test]
    fn plain_output_at_width() {
        let s = settings(&["--format", "plain", "--width", "40"], Config::default());
        let doc = render(&s).unwrap();
        let mut out = Vec::new();
        write_document(&mut out, &doc, &s).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(" Colors\n"));
        assert!(text.lines().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn json_stays_parseable_with_copy() {
        let s = settings(&["--format", "json", "--copy", "primary.hex"], Config::default());
        let doc = render(&s).unwrap();
        let (mut out, mut side) = (Vec::new(), Vec::new());
        emit(&mut out, &mut side, &doc, &s, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["variant"], "full");
        assert!(String::from_utf8(side).unwrap().starts_with("\x1b]52;c;"));
    }

    #[test]
    fn piped_plain_output_has_no_clipboard_escape() {
        let s = settings(&["--format", "plain", "--copy", "primary"], Config::default());
        let doc = render(&s).unwrap();
        let (mut out, mut side) = (Vec::new(), Vec::new());
        emit(&mut out, &mut side, &doc, &s, false).unwrap();

        assert!(!out.contains(&0x1b));
        assert!(!side.is_empty());
    }

    #[test]
    fn terminal_ansi_output_carries_clipboard_escape() {
        let s = settings(&["--copy", "primary.hex"], Config::default());
        let doc = render(&s).unwrap();
        let (mut out, mut side) = (Vec::new(), Vec::new());
        emit(&mut out, &mut side, &doc, &s, true).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("\x1b]52;c;"));
        assert!(side.is_empty());
    }

    #[test]
    fn demo_theme_renders() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/clown-town.json");
        let s = settings(&[path.to_str().unwrap()], Config::default());
        let doc = render(&s).unwrap();
        assert!(doc.space().is_some());
    }
}
