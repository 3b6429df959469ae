//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and symbol support based on terminal capabilities and
//! user preferences, and the [`Printer`] every command writes through.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dx::output::{OutputConfig, Printer};
//!
//! let printer = Printer::new(OutputConfig::from_env_and_flag("auto"));
//! printer.section("Available Services");
//! printer.pair("feed", "Feed poller");
//! ```

use std::env;

use console::style;

/// Output configuration for controlling colors and symbols.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and symbols should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
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

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the symbol. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Formats user-facing messages.
///
/// Informational output goes to stdout; errors go to stderr.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    config: OutputConfig,
}

impl Printer {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Render an informational line.
    pub fn format_info(&self, message: &str) -> String {
        let symbol = emoji(&self.config, "ℹ", "[INFO]");
        if self.config.use_color {
            format!("{} {}", style(symbol).cyan(), message)
        } else {
            format!("{symbol} {message}")
        }
    }

    /// Render a success line.
    pub fn format_success(&self, message: &str) -> String {
        let symbol = emoji(&self.config, "✓", "[OK]");
        if self.config.use_color {
            format!("{} {}", style(symbol).green(), message)
        } else {
            format!("{symbol} {message}")
        }
    }

    /// Render a warning line.
    pub fn format_warn(&self, message: &str) -> String {
        let symbol = emoji(&self.config, "⚠", "[WARN]");
        if self.config.use_color {
            format!("{} {}", style(symbol).yellow(), message)
        } else {
            format!("{symbol} {message}")
        }
    }

    /// Render an error line.
    pub fn format_error(&self, message: &str) -> String {
        let symbol = emoji(&self.config, "✗", "[ERROR]");
        if self.config.use_color {
            format!("{} {}", style(symbol).red(), message)
        } else {
            format!("{symbol} {message}")
        }
    }

    /// Render a section header (surrounded by blank lines when printed).
    pub fn format_section(&self, title: &str) -> String {
        if self.config.use_color {
            style(title).bold().blue().to_string()
        } else {
            title.to_string()
        }
    }

    /// Render an indented key/value pair.
    pub fn format_pair(&self, key: &str, value: &str) -> String {
        if self.config.use_color {
            format!("  {} {}", style(key).dim(), value)
        } else {
            format!("  {key} {value}")
        }
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.format_info(message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.format_success(message));
    }

    pub fn warn(&self, message: &str) {
        println!("{}", self.format_warn(message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_error(message));
    }

    pub fn section(&self, title: &str) {
        println!("\n{}\n", self.format_section(title));
    }

    pub fn pair(&self, key: &str, value: &str) {
        println!("{}", self.format_pair(key, value));
    }

    /// Print raw output.
    pub fn log(&self, message: &str) {
        println!("{message}");
    }
}
