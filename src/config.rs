//! Card styling configuration.
//!
//! Handles loading, validating, and merging `config.toml` style options.
//! A fully resolved [`CardConfig`] is an immutable value that gets passed
//! into every render call — there is no global option state, so concurrent
//! generations with different per-page overrides cannot interfere.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title_color = "#FFF"          # Title text color
//! # bg_color = "#1d2440"        # Solid background (omit to use the gradient)
//! bg_gradient = ["#647DEE", "#7F53AC"]  # Background gradient stops (>= 2)
//! hide_chrome = false           # Suppress the terminal-window decoration
//! chrome_color = "#404040"      # Chrome window fill
//! custom_svg = ""               # Raw SVG fragment injected into the card
//! # custom_font = "fonts/Inter-Bold.ttf"  # Font file for the text layer
//! line_break_at = 35            # Title wrap width, in characters
//! ```
//!
//! ## Per-Page Overrides
//!
//! Config files (and CLI flags) produce the site-wide defaults; individual
//! pages can override any subset via [`CardOverrides`], an all-optional
//! mirror of [`CardConfig`]. [`CardConfig::merge`] resolves the two into
//! the value the engine actually consumes.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Resolved card styling options.
///
/// All fields have defaults matching the stock purple-gradient terminal
/// look. User config files need only specify the values they want to
/// override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Title text color.
    pub title_color: String,
    /// Solid background color. Unset (or empty) means the gradient is used.
    pub bg_color: Option<String>,
    /// Ordered gradient color stops, spread evenly across the background.
    pub bg_gradient: Vec<String>,
    /// Suppress the decorative terminal-window chrome.
    pub hide_chrome: bool,
    /// Fill color of the chrome window.
    pub chrome_color: String,
    /// Raw SVG fragment injected verbatim into the card. Trusted input:
    /// this is deliberately never escaped so callers can add structured
    /// decoration (logos, badges, shapes).
    pub custom_svg: String,
    /// Path to a font file (TTF/OTF) used for the text layer. Unset means
    /// the generic sans-serif fallback.
    pub custom_font: Option<PathBuf>,
    /// Title wrap width, in characters per row.
    pub line_break_at: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title_color: "#FFF".to_string(),
            bg_color: None,
            bg_gradient: vec!["#647DEE".to_string(), "#7F53AC".to_string()],
            hide_chrome: false,
            chrome_color: "#404040".to_string(),
            custom_svg: String::new(),
            custom_font: None,
            line_break_at: 35,
        }
    }
}

impl CardConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: CardConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_break_at == 0 {
            return Err(ConfigError::Validation(
                "line_break_at must be at least 1".into(),
            ));
        }
        if self.solid_background().is_none() && self.bg_gradient.len() < 2 {
            return Err(ConfigError::Validation(
                "bg_gradient needs at least 2 colors when no bg_color is set".into(),
            ));
        }
        Ok(())
    }

    /// The solid background color, if one is meaningfully configured.
    ///
    /// An empty string counts as unset so that TOML/JSON sources can clear
    /// an inherited color with `bg_color = ""`.
    pub fn solid_background(&self) -> Option<&str> {
        self.bg_color.as_deref().filter(|c| !c.is_empty())
    }

    /// Resolve per-page overrides over these defaults.
    ///
    /// Every `Some` field in `overrides` replaces the corresponding default
    /// wholesale; `None` fields keep the default. Returns a new resolved
    /// value — the defaults stay untouched and shareable across pages.
    pub fn merge(&self, overrides: &CardOverrides) -> CardConfig {
        CardConfig {
            title_color: overrides
                .title_color
                .clone()
                .unwrap_or_else(|| self.title_color.clone()),
            bg_color: overrides.bg_color.clone().or_else(|| self.bg_color.clone()),
            bg_gradient: overrides
                .bg_gradient
                .clone()
                .unwrap_or_else(|| self.bg_gradient.clone()),
            hide_chrome: overrides.hide_chrome.unwrap_or(self.hide_chrome),
            chrome_color: overrides
                .chrome_color
                .clone()
                .unwrap_or_else(|| self.chrome_color.clone()),
            custom_svg: overrides
                .custom_svg
                .clone()
                .unwrap_or_else(|| self.custom_svg.clone()),
            custom_font: overrides
                .custom_font
                .clone()
                .or_else(|| self.custom_font.clone()),
            line_break_at: overrides.line_break_at.unwrap_or(self.line_break_at),
        }
    }
}

/// Per-page override set: an all-optional mirror of [`CardConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardOverrides {
    pub title_color: Option<String>,
    pub bg_color: Option<String>,
    pub bg_gradient: Option<Vec<String>>,
    pub hide_chrome: Option<bool>,
    pub chrome_color: Option<String>,
    pub custom_svg: Option<String>,
    pub custom_font: Option<PathBuf>,
    pub line_break_at: Option<usize>,
}

/// The stock config.toml with all options documented.
///
/// Printed by `social-card gen-config`. Must stay in sync with
/// [`CardConfig::default`] — there is a round-trip test for that.
pub fn stock_config_toml() -> &'static str {
    r##"# social-card configuration
# All options are optional - the values below are the defaults.

# Title text color.
title_color = "#FFF"

# Solid background color. When set (non-empty), it replaces the gradient.
# bg_color = "#1d2440"

# Background gradient stops, top-left to bottom-right. Needs at least two
# colors; they are spread evenly across the card.
bg_gradient = ["#647DEE", "#7F53AC"]

# Hide the decorative terminal-window chrome.
hide_chrome = false

# Fill color of the terminal-window chrome.
chrome_color = "#404040"

# Raw SVG fragment injected into the card, verbatim. Useful for logos or
# extra decoration. This is trusted input and is never escaped.
custom_svg = ""

# Font file (TTF/OTF) for the title and site name. Omit to use whatever
# sans-serif font the build machine provides.
# custom_font = "fonts/Inter-Bold.ttf"

# Title wrap width, in characters per row.
line_break_at = 35
"##
}
