//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when the stream
//! is not a terminal, so styled strings are safe to print anywhere.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Arrow used in step listings
pub const ARROW: &str = "→";

/// Cross for failed steps
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold, for headings and names
    fn emphasis(&self) -> String;
    /// Dimmed, for secondary information
    fn muted(&self) -> String;
    /// Cyan, for values
    fn accent(&self) -> String;
    /// Green, for completed work
    fn success(&self) -> String;
    /// Yellow, for things that need attention
    fn warn(&self) -> String;
    /// Bold red, for failures
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.style(Style::new().bold()).to_string()
    }

    fn muted(&self) -> String {
        self.style(Style::new().dimmed()).to_string()
    }

    fn accent(&self) -> String {
        self.style(Style::new().cyan()).to_string()
    }

    fn success(&self) -> String {
        self.style(Style::new().green()).to_string()
    }

    fn warn(&self) -> String {
        self.style(Style::new().yellow()).to_string()
    }

    fn error(&self) -> String {
        self.style(Style::new().red().bold()).to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow
pub fn arrow() -> String {
    ARROW.muted()
}

/// Styled cross
pub fn cross() -> String {
    CROSS.error()
}

/// Spinner style shared by long-running fetches
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
