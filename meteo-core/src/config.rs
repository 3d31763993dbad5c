use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::open_meteo::{
    DEFAULT_FORECAST_ENDPOINT, DEFAULT_GEOCODING_ENDPOINT, DEFAULT_LANGUAGE,
};

pub const FORECAST_ENDPOINT_ENV: &str = "METEO_FORECAST_ENDPOINT";
pub const GEOCODING_ENDPOINT_ENV: &str = "METEO_GEOCODING_ENDPOINT";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// forecast_endpoint = "https://api.open-meteo.com/v1/forecast"
/// language = "en"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub forecast_endpoint: Option<String>,
    pub geocoding_endpoint: Option<String>,
    /// Language for geocoded place names.
    pub language: Option<String>,
    /// Transport timeout. Unset means the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn forecast_endpoint(&self) -> &str {
        self.forecast_endpoint.as_deref().unwrap_or(DEFAULT_FORECAST_ENDPOINT)
    }

    pub fn geocoding_endpoint(&self) -> &str {
        self.geocoding_endpoint.as_deref().unwrap_or(DEFAULT_GEOCODING_ENDPOINT)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Load config from disk with environment overrides applied on top.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Endpoint variables win over the file. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_blank(FORECAST_ENDPOINT_ENV) {
            self.forecast_endpoint = Some(url);
        }
        if let Some(url) = non_blank(GEOCODING_ENDPOINT_ENV) {
            self.geocoding_endpoint = Some(url);
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }
}
