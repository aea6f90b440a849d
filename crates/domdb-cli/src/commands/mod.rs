//! CLI subcommands.

pub mod bib;
pub mod config;
pub mod evid;
pub mod get;
pub mod md;

use std::path::{Path, PathBuf};

use tracing::debug;

use domdb_core::models::{DomdbConfig, expand_home};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("domdb")
        .join("config.json")
}

/// The `--config` path, or the default location.
pub fn config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<DomdbConfig> {
    let path = self::config_path(config_path);
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(DomdbConfig::from_file(&path)?)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(DomdbConfig::default())
    }
}

/// Expand a leading `~` against the user's home directory.
pub fn resolve_path(path: &Path) -> PathBuf {
    expand_home(path, dirs::home_dir().as_deref())
}
