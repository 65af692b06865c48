//! Terminal output for the CLI
//!
//! Design constraints:
//! - Only the semantic colors in `colors::*`
//! - Icons come from this module, nowhere else
//! - Everything degrades to plain text when stdout is not a terminal or
//!   `DOCBINDER_NO_COLOR` is set

use crossterm::style::{style, Color, Stylize};
use is_terminal::IsTerminal;

use docbinder::LinkStatus;

pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";
}

/// Whether colored output is enabled for this process.
pub fn color_enabled() -> bool {
    std::env::var_os("DOCBINDER_NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Apply a color when the terminal supports it.
pub fn paint(text: &str, color: Color) -> String {
    if color_enabled() {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Icon and color for a link status.
pub fn status_style(status: LinkStatus) -> (&'static str, Color) {
    match status {
        LinkStatus::Found => (icons::SUCCESS, colors::SUCCESS),
        LinkStatus::Missing => (icons::WARNING, colors::WARNING),
        LinkStatus::Failed => (icons::ERROR, colors::ERROR),
    }
}

/// One progress line per processed link occurrence.
pub fn print_record(index: usize, total: usize, target: &str, status: LinkStatus) {
    let (icon, color) = status_style(status);
    println!(
        "  {} [{}/{}] {}",
        paint(icon, color),
        index + 1,
        total,
        target
    );
}
