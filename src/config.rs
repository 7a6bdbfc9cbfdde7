//! User configuration from `<config dir>/cherrypicker/config.toml`
//!
//! Every field is optional; CLI flags override file values.

use crate::cherry_pick::{DEFAULT_BRANCH_PREFIX, DEFAULT_REMOTE};
use crate::error::{Error, Result};
use crate::resolve::{DEFAULT_DETAIL_CONCURRENCY, DEFAULT_HEAD_BRANCH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename for the config file
const CONFIG_FILE: &str = "config.toml";

/// Settings shared by `list` and `create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Branch commits are ported from
    pub head_branch: String,
    /// Remote the release branch is tracked from
    pub remote: String,
    /// Prefix for working branch names
    pub branch_prefix: String,
    /// Max concurrent PR detail fetches while building a label index
    pub detail_concurrency: usize,
    /// GitHub Enterprise host, used when the repo argument has none
    pub host: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            head_branch: DEFAULT_HEAD_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            host: None,
        }
    }
}

/// Get path to the config file, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cherrypicker").join(CONFIG_FILE))
}

/// Load the user config
///
/// Returns defaults if there is no config directory or no file.
pub fn load_config() -> Result<Config> {
    config_path().map_or_else(|| Ok(Config::default()), |path| load_config_from(&path))
}

/// Load config from an explicit path
///
/// Returns defaults if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    if config.head_branch.trim().is_empty() {
        return Err(Error::Config(format!(
            "{}: head_branch must not be empty",
            path.display()
        )));
    }

    Ok(config)
}
