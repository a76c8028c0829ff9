//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Ink-on-paper palette used throughout the UI.

/// Primary ink, used for borders, the active tab and the status bar.
pub const NAVY: Color = Color::Rgb(26, 26, 62);
/// Paper tone, used as text on navy backgrounds.
pub const PAPER: Color = Color::Rgb(232, 230, 225);
/// Completed todos.
pub const FADED: Color = Color::Rgb(120, 120, 140);
/// Destructive actions.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
