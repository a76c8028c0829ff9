//! View filter selection.
//!
//! The filter is pure view state: it decides which todos are shown and never
//! changes or persists the stored list.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::todo::Todo;

/// Which subset of todos to display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Every filter in tab order.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Whether `todo` belongs to this filter's subset.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// Next filter in tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Position in tab order.
    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Active => 1,
            Filter::Completed => 2,
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "ALL",
            Filter::Active => "ACTIVE",
            Filter::Completed => "COMPLETED",
        }
    }
}
