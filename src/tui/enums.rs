//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TodoList,
    Help,
    Confirm,
}

/// Which widget receives typed keys.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    /// Keys drive list navigation and commands.
    None,
    /// Keys edit the new-task input buffer.
    Text,
}
