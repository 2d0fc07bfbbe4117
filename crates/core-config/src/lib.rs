//! Configuration loading and parsing.
//!
//! Parses `oxmodal.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! padding_x = 1          # lateral padding inside the bordered box
//! initial_mode = "insert" # or "normal"
//!
//! [clipboard]
//! enabled = true         # use OS clipboard commands
//! timeout_ms = 500       # per-command deadline
//! osc52 = true           # also broadcast an OSC 52 sequence on copy
//!
//! [theme]                # crossterm color names
//! border = "dark_grey"
//! normal = "blue"
//! insert = "green"
//! visual = "magenta"
//! ```
//!
//! Missing files and parse errors fall back to defaults. Unknown fields are
//! ignored. Padding is clamped against the viewport in `Config::apply_context`
//! (at most `(columns - 1) / 2`); the raw parsed value is retained so a resize
//! can re-clamp.

use anyhow::Result;
use core_state::Mode;
use crossterm::style::Color;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default)]
    pub padding_x: u16,
    #[serde(default = "EditorConfig::default_initial_mode")]
    pub initial_mode: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            padding_x: 0,
            initial_mode: Self::default_initial_mode(),
        }
    }
}

impl EditorConfig {
    fn default_initial_mode() -> String {
        "insert".to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClipboardConfig {
    #[serde(default = "ClipboardConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "ClipboardConfig::default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "ClipboardConfig::default_osc52")]
    pub osc52: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            timeout_ms: Self::default_timeout_ms(),
            osc52: Self::default_osc52(),
        }
    }
}

impl ClipboardConfig {
    const fn default_enabled() -> bool {
        true
    }
    const fn default_timeout_ms() -> u64 {
        500
    }
    const fn default_osc52() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ThemeConfig {
    pub border: Option<String>,
    pub normal: Option<String>,
    pub insert: Option<String>,
    pub visual: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Resolved colors handed to the renderer.
///
/// The border keeps the host's `border` color in Insert mode and takes the
/// mode color in Normal and Visual mode. The status label always uses the
/// mode color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub border: Color,
    pub normal: Color,
    pub insert: Color,
    pub visual: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::DarkGrey,
            normal: Color::Blue,
            insert: Color::Green,
            visual: Color::Magenta,
        }
    }
}

impl Theme {
    pub fn mode_color(&self, mode: Mode) -> Color {
        match mode {
            Mode::Normal => self.normal,
            Mode::Insert => self.insert,
            Mode::Visual => self.visual,
        }
    }

    pub fn border_color(&self, mode: Mode) -> Color {
        match mode {
            Mode::Insert => self.border,
            other => self.mode_color(other),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,      // original file string (optional)
    pub file: ConfigFile,         // parsed (or default) data
    pub effective_padding_x: u16, // clamped to viewport width
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("oxmodal.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxmodal").join("oxmodal.toml");
    }
    PathBuf::from("oxmodal.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let effective_padding_x = file.editor.padding_x;
            Ok(Config {
                raw: Some(content),
                file,
                effective_padding_x,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

fn parse_color(name: Option<&str>, fallback: Color, field: &'static str) -> Color {
    let Some(name) = name else {
        return fallback;
    };
    match Color::try_from(name) {
        Ok(color) => color,
        Err(()) => {
            warn!(target: "config", field, "unknown_theme_color");
            fallback
        }
    }
}

impl Config {
    /// Apply viewport context to compute the clamped padding.
    /// Returns the effective (possibly clamped) value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.editor.padding_x;
        let max = ctx.viewport_columns.saturating_sub(1) / 2;
        let clamped = raw.min(max);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                viewport_columns = ctx.viewport_columns,
                viewport_rows = ctx.viewport_rows,
                "padding_x_clamped"
            );
        }
        self.effective_padding_x = clamped;
        clamped
    }

    /// Recompute on a viewport change. `Some(new_padding)` when it changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_padding_x;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }

    /// Mode the interpreter starts in; unknown names fall back to Insert.
    pub fn initial_mode(&self) -> Mode {
        match Mode::from_name(&self.file.editor.initial_mode) {
            Some(Mode::Visual) | None => {
                warn!(target: "config", "initial_mode_unsupported_using_insert");
                Mode::Insert
            }
            Some(mode) => mode,
        }
    }

    pub fn theme(&self) -> Theme {
        let d = Theme::default();
        let t = &self.file.theme;
        Theme {
            border: parse_color(t.border.as_deref(), d.border, "border"),
            normal: parse_color(t.normal.as_deref(), d.normal, "normal"),
            insert: parse_color(t.insert.as_deref(), d.insert, "insert"),
            visual: parse_color(t.visual.as_deref(), d.visual, "visual"),
        }
    }

    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_millis(self.file.clipboard.timeout_ms)
    }
}
