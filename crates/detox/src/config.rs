//! User configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/detox/config.toml` when present:
//!
//! ```toml
//! data_dir = "/home/user/.local/share/detox"
//! export_dir = "/home/user/Downloads"
//! daily_goal_minutes = 120
//! ```
//!
//! Every key is optional. A missing file yields the defaults; a file that
//! does not parse is an error.

use crate::error::{Result, TuiError};
use detox_core::DEFAULT_DAILY_GOAL;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config/data/state dirs.
pub const APP_DIR: &str = "detox";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where session data is stored. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Where exports are written. Defaults to the download dir, then the
    /// current directory.
    pub export_dir: Option<PathBuf>,

    /// Initial daily focus goal for the tracker view.
    pub daily_goal_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            daily_goal_minutes: DEFAULT_DAILY_GOAL,
        }
    }
}

impl Config {
    /// Returns the default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Loads the config from the default location.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content).map_err(|source| TuiError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses config file content.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Returns the data directory, preferring the explicit override.
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(TuiError::NoDataDir)
    }

    /// Returns the directory exports are written to.
    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
