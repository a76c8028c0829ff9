//! Configuration loading.
//!
//! Handles the optional `config.toml` in the dn base directory (`~/.dn`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::Filter;

/// Name of the config file inside the base directory.
pub const CONFIG_FILE: &str = "config.toml";

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the todo storage file. Defaults to the base directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Filter selected when the UI starts.
    #[serde(default)]
    pub default_filter: Filter,

    /// Ask before clearing completed todos in the UI.
    #[serde(default = "default_confirm_clear")]
    pub confirm_clear: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_filter: Filter::default(),
            confirm_clear: default_confirm_clear(),
        }
    }
}

fn default_confirm_clear() -> bool {
    true
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config.toml` from `base_dir`, or return defaults if it does not exist.
    pub fn load_from_dir(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve where todos are stored. An explicit override wins over the
    /// config file, which wins over the base directory.
    pub fn resolve_data_dir(&self, base_dir: &Path, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| base_dir.to_path_buf())
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig("data_dir cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Base directory for dn state: `$HOME/.dn`, or `./.dn` without a home.
pub fn base_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".dn")
}
