//! Terminal styling for CLI output.
//!
//! Color is decided once per command from `--color` and the usual
//! environment switches (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, `TERM`).
//! Folder names in tree output are bold blue, sizes are dimmed, and status
//! lines carry an emoji or a bracketed tag.

use std::env;

use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// `color_flag` is `always`, `never` or anything else for auto-detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Plain output, used for piping and snapshots of rendered trees.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// `name/`, bold blue when colored.
pub fn folder_label(config: &OutputConfig, name: &str) -> String {
    if config.use_color {
        format!("{}/", style(name).blue().bold().force_styling(true))
    } else {
        format!("{}/", name)
    }
}

pub fn dim(config: &OutputConfig, text: &str) -> String {
    if config.use_color {
        style(text).dim().force_styling(true).to_string()
    } else {
        text.to_string()
    }
}
