//! Configuration file loading
//!
//! Settings come from a TOML file found in the standard locations (or given
//! with `--config`); every key has a default so the file is optional.

use anyhow::{Context, Result};
use flightpath_geo::{ScanRange, TrackingSettings};
use flightpath_telemetry::TelemetryConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_CANDIDATES: &[&str] = &[
    "flightpath.toml",
    ".flightpath.toml",
    ".config/flightpath.toml",
];

/// Top-level configuration schema
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigSchema {
    pub dataset: DatasetConfig,
    pub tracking: TrackingSettings,
    pub logging: TelemetryConfig,
}

/// Where the airport dataset comes from and how much of it the selection list sees
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Local path or `http(s)://` URL
    pub source: String,
    pub fetch_timeout_secs: u64,
    /// Lines offered as destinations; nearest-airport lookup always scans everything
    pub selection_scan: ScanRange,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: "data/airports.csv".to_string(),
            fetch_timeout_secs: 10,
            selection_scan: ScanRange::SELECTION_DEFAULT,
        }
    }
}

impl DatasetConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; discovered files are optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|dir| dir.join("flightpath").join("config.toml"));

    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .chain(user_config)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
