//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers behind each subcommand. They all
//! operate on the same `TodoStore` the interactive UI uses, so a todo added
//! from a script shows up in the UI and vice versa.

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::store::TodoStore;
use crate::todo::Todo;
use crate::tui::{app::App, run::run_tui};
use crate::view::{self, TodoView};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (the default when no command is given).
    Ui,

    /// Add a new todo. Words are joined with spaces; blank text is ignored.
    Add {
        /// Todo text.
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List todos.
    List {
        /// Which todos to show: all | active | completed. Defaults to the configured filter.
        #[arg(long, short, value_enum)]
        filter: Option<Filter>,
    },

    /// Flip a todo between active and completed.
    Toggle {
        /// Todo ID.
        id: u64,
    },

    /// Delete a todo.
    Delete {
        /// Todo ID.
        id: u64,
    },

    /// Delete every completed todo.
    ClearCompleted,

    /// Show active, completed and total counts.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the interactive UI over `store`.
pub fn cmd_ui(store: TodoStore, config: &Config) -> Result<()> {
    run_tui(App::new(store, config.default_filter, config.confirm_clear))
}

/// Add a new todo to the store.
pub fn cmd_add(store: &mut TodoStore, text: Vec<String>) -> Result<()> {
    if let Some(id) = store.add(&text.join(" "))? {
        println!("Added todo {id}");
    }
    Ok(())
}

/// Print the todos selected by `filter`, followed by the counts.
pub fn cmd_list(store: &TodoStore, filter: Filter) -> Result<()> {
    let view = TodoView::project(store.todos(), filter);
    if view.visible.is_empty() {
        println!("{}", view::empty_message(filter));
    } else {
        print_table(&view.visible);
    }
    println!();
    print_counts(&view);
    Ok(())
}

/// Toggle the completion flag of a todo.
pub fn cmd_toggle(store: &mut TodoStore, id: u64) -> Result<()> {
    if !store.toggle(id)? {
        return Err(Error::TodoNotFound(id));
    }
    let state = match store.get(id) {
        Some(t) if t.completed => "completed",
        _ => "active",
    };
    println!("Marked todo {id} {state}");
    Ok(())
}

/// Delete a todo.
pub fn cmd_delete(store: &mut TodoStore, id: u64) -> Result<()> {
    if !store.delete(id)? {
        return Err(Error::TodoNotFound(id));
    }
    println!("Deleted todo {id}");
    Ok(())
}

/// Remove all completed todos.
pub fn cmd_clear_completed(store: &mut TodoStore) -> Result<()> {
    let removed = store.clear_completed()?;
    println!("Cleared {removed} completed todo(s)");
    Ok(())
}

/// Print the live counts.
pub fn cmd_stats(store: &TodoStore) -> Result<()> {
    print_counts(&TodoView::project(store.todos(), Filter::All));
    Ok(())
}

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print todos in a formatted table.
pub fn print_table(todos: &[&Todo]) {
    println!("{:<13} {:<4} {:<10} {}", "ID", "Done", "Created", "Text");
    for t in todos {
        println!(
            "{:<13} {:<4} {:<10} {}",
            t.id,
            if t.completed { "[x]" } else { "[ ]" },
            t.created_at.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            t.text
        );
    }
}

fn print_counts(view: &TodoView) {
    println!(
        "//ACTIVE: {}  //COMPLETED: {}  //TOTAL: {}",
        view.active, view.completed, view.total
    );
}
