//! Configuration Module
//! Optional `transfers.toml` with ingest and dashboard sections.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "transfers.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ingest: IngestConfig,
    pub dashboard: DashboardConfig,
}

/// Settings for the normalization batch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub drop_invalid_age: bool,
    pub coerce_season_to_date: bool,
    /// Only files with this extension are read. `None` reads every file.
    pub file_extension: Option<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_path: PathBuf::from("dataset.csv"),
            drop_invalid_age: false,
            coerce_season_to_date: false,
            file_extension: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset.csv"),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `transfers.toml` is read
    /// when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ingest.input_dir, PathBuf::from("data"));
        assert_eq!(config.dashboard.dataset_path, PathBuf::from("dataset.csv"));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [ingest]
            drop_invalid_age = true
            file_extension = "csv"
            "#,
        )
        .unwrap();

        assert!(config.ingest.drop_invalid_age);
        assert!(!config.ingest.coerce_season_to_date);
        assert_eq!(config.ingest.file_extension.as_deref(), Some("csv"));
        assert_eq!(config.ingest.output_path, PathBuf::from("dataset.csv"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = AppConfig::from_toml("[ingest\ninput_dir = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/transfers.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
