use std::fs;
use std::path::{Path, PathBuf};

use super::core::MisuraConfig;
use crate::errors::{MisuraError, Result};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".misura.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> std::result::Result<MisuraConfig, String> {
    toml::from_str::<MisuraConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Try loading config from a specific path
///
/// A missing file is silent; an unreadable or malformed file is reported and
/// skipped.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<MisuraConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Search `start` and its ancestors for `.misura.toml`.
pub fn load_config_from(start: &Path) -> MisuraConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MisuraConfig::default()
        })
}

/// Load an explicitly named config file; unlike discovery, failures are errors.
pub fn load_config_file(path: &Path) -> Result<MisuraConfig> {
    let contents = fs::read_to_string(path).map_err(|e| MisuraError::io(path, e))?;
    parse_config(&contents).map_err(MisuraError::Config)
}

pub fn load_config() -> MisuraConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            MisuraConfig::default()
        }
    }
}
