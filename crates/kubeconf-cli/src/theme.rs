//! CLI theme and styling.

use colored::Colorize;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "error:".red().bold(), text)
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "warning:".yellow().bold(), text)
    }
}
