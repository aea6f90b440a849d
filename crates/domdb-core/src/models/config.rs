//! Configuration structures for fetching and converting cases.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::EvidLayout;

/// Main configuration for domdb.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomdbConfig {
    /// Input and output locations.
    pub paths: PathConfig,

    /// Remote API configuration.
    pub api: ApiConfig,

    /// Conversion configuration.
    pub conversion: ConversionConfig,
}

/// Default locations for case files and exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding downloaded `cases_N.json` files.
    pub cases_directory: PathBuf,

    /// BibTeX output file.
    pub bib_output: PathBuf,

    /// Markdown output file.
    pub md_output: PathBuf,

    /// Root directory for EVID case directories.
    pub evid_output: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            cases_directory: PathBuf::from("~/domdatabasen/cases"),
            bib_output: PathBuf::from("resources/cases.bib"),
            md_output: PathBuf::from("resources/cases.md"),
            evid_output: PathBuf::from("evid"),
        }
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the case API.
    pub base_url: String,

    /// Timeout for each request, in seconds.
    pub timeout_secs: u64,

    /// Cases requested per page.
    pub batch_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://domsdatabasen.dk/webapi/kapi/v2".to_string(),
            timeout_secs: 10,
            batch_size: 25,
        }
    }
}

/// Conversion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Worker count for EVID conversion (0 = available parallelism).
    pub jobs: usize,

    /// Layout of generated EVID directories.
    pub evid_layout: EvidLayout,
}

impl ConversionConfig {
    /// Effective number of EVID workers.
    pub fn worker_count(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

impl DomdbConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Expand a leading `~` against `home`.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
