//! # dn - terminal to-do list
//!
//! A small, keyboard-driven to-do list with an interactive terminal user
//! interface (TUI) and a scriptable CLI over the same local store.
//!
//! ## Key Features
//!
//! - **Single-page TUI**: input line, filter tabs, live counts and the list on one screen
//! - **Filters**: all, active and completed views over the same list
//! - **Local JSON Storage**: the whole list is written back after every change
//! - **Scriptable**: every UI action is also a subcommand
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! dn
//!
//! # Add a todo from the shell
//! dn add Buy milk
//!
//! # Show only what is left to do
//! dn list --filter active
//!
//! # Mark a todo as done (ids are shown by `dn list`), then tidy up
//! dn toggle 1714555800000
//! dn clear-completed
//! ```
//!
//! Todos live in `~/.dn/dn-todos.json`. Set `data_dir` in `~/.dn/config.toml`,
//! `DN_DATA_DIR` or `--data-dir` to keep them elsewhere. Logging is off unless
//! `RUST_LOG` is set (e.g. `RUST_LOG=dn=debug`).

use std::path::Path;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod filter;
pub mod storage;
pub mod store;
pub mod todo;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;
use error::Result;
use storage::FileStorage;
use store::TodoStore;

fn init_tracing() {
    // Tracing is opt-in via RUST_LOG so the UI screen stays clean.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the config and open the todo store it points at.
fn open_store(cli_data_dir: Option<&Path>) -> Result<(Config, TodoStore)> {
    let base_dir = config::base_dir();
    let config = Config::load_from_dir(&base_dir)?;
    let data_dir = config.resolve_data_dir(&base_dir, cli_data_dir);
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    let store = TodoStore::load(FileStorage::new(data_dir))?;
    Ok((config, store))
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.as_deref();

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        Commands::Ui => {
            let (config, store) = open_store(data_dir)?;
            cmd_ui(store, &config)
        }
        Commands::Add { text } => cmd_add(&mut open_store(data_dir)?.1, text),
        Commands::List { filter } => {
            let (config, store) = open_store(data_dir)?;
            cmd_list(&store, filter.unwrap_or(config.default_filter))
        }
        Commands::Toggle { id } => cmd_toggle(&mut open_store(data_dir)?.1, id),
        Commands::Delete { id } => cmd_delete(&mut open_store(data_dir)?.1, id),
        Commands::ClearCompleted => cmd_clear_completed(&mut open_store(data_dir)?.1),
        Commands::Stats => cmd_stats(&open_store(data_dir)?.1),
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
