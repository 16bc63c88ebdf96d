//! Optional `ats-filter.toml` configuration.
//!
//! Precedence: command-line flags, then the config file, then built-in
//! defaults.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ats-filter.toml";
pub const DEFAULT_DATA_DIR: &str = "data/demo";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Values read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub page_size: Option<usize>,
    /// Anchor for date-range filters instead of the local calendar day
    pub reference_date: Option<NaiveDate>,
}

impl FileConfig {
    /// Load an explicit config file, or `ats-filter.toml` from the working
    /// directory if present. An explicit path that does not exist is an error;
    /// a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Flags that can override file values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub reference_date: Option<NaiveDate>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub page_size: usize,
    pub reference_date: Option<NaiveDate>,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            data_dir: overrides
                .data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            page_size: overrides
                .page_size
                .or(file.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            reference_date: overrides.reference_date.or(file.reference_date),
        }
    }
}
