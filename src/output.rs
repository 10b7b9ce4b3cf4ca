//! # Output Configuration
//!
//! Controls how the CLI renders its per-repository summary: colors and
//! emoji when the terminal supports them, plain bracketed markers otherwise.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

use crate::sync::RepoStatus;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` forces colors on (overriding `NO_COLOR`), `never` forces them
    /// off, anything else detects support from the environment and stdout.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        color_choice(
            |name| env::var(name).ok(),
            console::Term::stdout().features().colors_supported(),
        )
    }
    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// Decide on color from environment variables, falling back to what the
/// terminal reports.
///
/// `NO_COLOR` (any value) wins, then a non-zero `CLICOLOR_FORCE`. Either
/// `CLICOLOR=0` or `TERM=dumb` turns colors off.
fn color_choice(var: impl Fn(&str) -> Option<String>, terminal_colors: bool) -> bool {
    if var("NO_COLOR").is_some() {
        return false;
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return true;
    }

    let opted_out =
        var("CLICOLOR").as_deref() == Some("0") || var("TERM").as_deref() == Some("dumb");
    terminal_colors && !opted_out
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// One summary line for a repository outcome.
pub fn status_line(config: &OutputConfig, title: &str, status: &RepoStatus) -> String {
    let (marker, detail) = match status {
        RepoStatus::Copied { files } => (
            emoji(config, "✅", "[OK]"),
            format!("{} file{} copied", files, if *files == 1 { "" } else { "s" }),
        ),
        RepoStatus::Skipped => (emoji(config, "⏭️", "[SKIP]"), "no docs found".to_string()),
        RepoStatus::Failed(message) => (emoji(config, "❌", "[FAIL]"), message.clone()),
    };

    if config.use_color {
        let title = match status {
            RepoStatus::Copied { .. } => style(title).green(),
            RepoStatus::Skipped => style(title).yellow(),
            RepoStatus::Failed(_) => style(title).red(),
        };
        // Force styling: the decision was already made by OutputConfig.
        format!("{} {}: {}", marker, title.force_styling(true), detail)
    } else {
        format!("{} {}: {}", marker, title, detail)
    }
}
