//! Configuration file support.
//!
//! Reads the dataset location and the tunable analysis constants from a TOML
//! file. Every setting has a default, so an empty file (or no file at all)
//! yields a working configuration.

use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::RepositoryError;
use crate::models::{Region, BANNER_PERIOD_DAYS, DAY_MS};
use crate::services::shop_forecast::ForecastParams;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "HEADHUNT_CONFIG";
/// Environment variable overriding `dataset.path`.
pub const DATASET_ENV: &str = "HEADHUNT_DATASET";

/// Upper bound on `analysis.banner_period_days`.
pub const MAX_BANNER_PERIOD_DAYS: i64 = 365;
/// Upper bound on `analysis.shop_debut_cadence`.
pub const MAX_SHOP_DEBUT_CADENCE: i64 = 100;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Where the static documents live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub images_path: Option<PathBuf>,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            images_path: None,
        }
    }
}

/// Tunable constants of the derivations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Region of record for chronology, overdue and forecast queries.
    #[serde(default)]
    pub region: Region,
    #[serde(default = "default_banner_period_days")]
    pub banner_period_days: i64,
    /// One rotation-shop debut every this many banners.
    #[serde(default = "default_shop_debut_cadence")]
    pub shop_debut_cadence: i64,
    #[serde(default = "default_forecast_window")]
    pub forecast_before: usize,
    #[serde(default = "default_forecast_window")]
    pub forecast_after: usize,
    #[serde(default = "default_pie_slice_limit")]
    pub pie_slice_limit: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            region: Region::default(),
            banner_period_days: default_banner_period_days(),
            shop_debut_cadence: default_shop_debut_cadence(),
            forecast_before: default_forecast_window(),
            forecast_after: default_forecast_window(),
            pie_slice_limit: default_pie_slice_limit(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/sample_dataset.json")
}

fn default_banner_period_days() -> i64 {
    BANNER_PERIOD_DAYS
}

fn default_shop_debut_cadence() -> i64 {
    3
}

fn default_forecast_window() -> usize {
    6
}

fn default_pie_slice_limit() -> usize {
    12
}

fn default_histogram_bins() -> usize {
    10
}

impl AnalyticsConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let config: AnalyticsConfig = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
                .with_operation("load_config")
        })?;
        Self::from_toml_str(&content).map_err(|e| e.with_operation("load_config"))
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `headhunt.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// `Ok(None)` when no candidate exists. A file that exists but fails to
    /// parse or validate is an error.
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        Self::from_search_paths(&[
            PathBuf::from("headhunt.toml"),
            PathBuf::from("backend/headhunt.toml"),
            PathBuf::from("../headhunt.toml"),
        ])
    }

    /// Load the first existing file among `paths`, `Ok(None)` if none exists.
    pub fn from_search_paths(paths: &[PathBuf]) -> Result<Option<Self>, RepositoryError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve configuration the way the report binary does: `HEADHUNT_CONFIG`
    /// if set, else the default location, else built-in defaults when no file
    /// is found. The `HEADHUNT_DATASET` override is applied last.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => match Self::from_default_location()? {
                Some(config) => config,
                None => {
                    debug!("No headhunt.toml found in standard locations; using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var(DATASET_ENV) {
            if !path.is_empty() {
                self.dataset.path = PathBuf::from(path);
            }
        }
    }

    /// Reject settings the derivations cannot work with.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        let a = &self.analysis;
        if !(1..=MAX_BANNER_PERIOD_DAYS).contains(&a.banner_period_days) {
            return Err(RepositoryError::configuration(format!(
                "analysis.banner_period_days must be between 1 and {}, got {}",
                MAX_BANNER_PERIOD_DAYS, a.banner_period_days
            )));
        }
        if !(1..=MAX_SHOP_DEBUT_CADENCE).contains(&a.shop_debut_cadence) {
            return Err(RepositoryError::configuration(format!(
                "analysis.shop_debut_cadence must be between 1 and {}, got {}",
                MAX_SHOP_DEBUT_CADENCE, a.shop_debut_cadence
            )));
        }
        if a.histogram_bins == 0 {
            return Err(RepositoryError::configuration(
                "analysis.histogram_bins must be at least 1",
            ));
        }
        Ok(())
    }

    /// Forecast constants derived from the analysis settings.
    pub fn forecast_params(&self) -> ForecastParams {
        ForecastParams {
            banner_period_ms: self.analysis.banner_period_days.saturating_mul(DAY_MS),
            cadence: self.analysis.shop_debut_cadence,
        }
    }
}
