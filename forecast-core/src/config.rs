use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};

const DEFAULT_FORECAST_DAYS: u8 = 8;
const DEFAULT_CACHE_TTL_MINUTES: u64 = 30;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Forecast horizon in days, today included. Part of every cache key, so
    /// changing it starts fresh cache buckets.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// How long cached forecasts stay valid.
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,
}

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

fn default_cache_ttl_minutes() -> u64 {
    DEFAULT_CACHE_TTL_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
            cache_ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let cfg = Config::default();
        assert_eq!(cfg.forecast_days, 8);
        assert_eq!(cfg.cache_ttl_minutes, 30);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("forecast_days = 5").expect("valid toml");
        assert_eq!(cfg.forecast_days, 5);
        assert_eq!(cfg.cache_ttl_minutes, 30);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            forecast_days: 10,
            cache_ttl_minutes: 15,
        };
        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let back: Config = toml::from_str(&text).expect("parseable");
        assert_eq!(back.forecast_days, 10);
        assert_eq!(back.cache_ttl_minutes, 15);
    }
}
