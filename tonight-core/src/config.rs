use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::resolver::ResolverId;

pub const WEATHER_API_KEY_ENV: &str = "TONIGHT_WEATHER_API_KEY";
pub const GEOCODING_API_KEY_ENV: &str = "TONIGHT_GEOCODING_API_KEY";
pub const RESOLVER_ENV: &str = "TONIGHT_RESOLVER";

/// Top-level configuration stored on disk.
///
/// Credentials are never embedded in source: they come from this file or
/// from the `TONIGHT_*` environment variables, which take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key for the hourly forecast.
    pub weather_api_key: Option<String>,

    /// API key for the geocoding resolver. Unused with the bundled table.
    pub geocoding_api_key: Option<String>,

    /// Resolver id, "table" or "geocoding". Defaults to "table".
    pub resolver: Option<String>,
}

impl Config {
    /// Return the configured resolver as a strongly-typed ResolverId.
    /// An unset field means the bundled table, which needs no credentials.
    pub fn resolver_id(&self) -> Result<ResolverId> {
        match self.resolver.as_deref() {
            Some(s) => ResolverId::try_from(s),
            None => Ok(ResolverId::Table),
        }
    }

    pub fn set_resolver(&mut self, id: ResolverId) {
        self.resolver = Some(id.as_str().to_string());
    }

    pub fn weather_api_key(&self) -> Option<&str> {
        self.weather_api_key.as_deref()
    }

    pub fn set_weather_api_key(&mut self, api_key: String) {
        self.weather_api_key = Some(api_key);
    }

    pub fn geocoding_api_key(&self) -> Option<&str> {
        self.geocoding_api_key.as_deref()
    }

    pub fn set_geocoding_api_key(&mut self, api_key: String) {
        self.geocoding_api_key = Some(api_key);
    }

    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_overrides();
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

    /// Environment variables win over file contents.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var(WEATHER_API_KEY_ENV)
            && !key.is_empty()
        {
            self.weather_api_key = Some(key);
        }
        if let Ok(key) = env::var(GEOCODING_API_KEY_ENV)
            && !key.is_empty()
        {
            self.geocoding_api_key = Some(key);
        }
        if let Ok(resolver) = env::var(RESOLVER_ENV)
            && !resolver.is_empty()
        {
            self.resolver = Some(resolver);
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tonight", "tonight-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
