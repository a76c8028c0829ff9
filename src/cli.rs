use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Keyboard-driven terminal to-do list.
/// Todos are stored in ~/.dn/dn-todos.json unless --data-dir or the config says otherwise.
#[derive(Parser)]
#[command(name = "dn", version, about = "Keyboard-driven terminal to-do list")]
pub struct Cli {
    /// Directory holding the todo storage file.
    #[arg(long, global = true, env = "DN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
