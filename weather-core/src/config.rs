use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_FORECAST_URL: &str = "http://api.weatherapi.com/v1/forecast.json";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "weatherdash/0.1 (+https://github.com/weatherdash/weatherdash)";
pub const DEFAULT_REGION: &str = "Himachal Pradesh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Forecast provider (weatherapi.com) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Geocoding provider (Nominatim) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub base_url: String,
    /// Sent as `User-Agent`; Nominatim's usage policy requires an identifying client.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODING_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Region appended to single-word place names. Empty disables it.
    pub default_region: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { default_region: DEFAULT_REGION.to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [forecast]
/// api_key = "..."
///
/// [resolver]
/// default_region = "Himachal Pradesh"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastConfig,
    pub geocoding: GeocodingConfig,
    pub resolver: ResolverConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace the forecast API key. Blank keys clear it.
    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.forecast.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Prefer `override_key` (flag/env), falling back to the stored key.
    pub fn api_key(&self, override_key: Option<&str>) -> Result<String> {
        override_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.forecast.api_key.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(
                    "No weatherapi.com API key configured.\n\
                     Hint: run `weatherdash configure` or set WEATHERAPI_KEY."
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.forecast.base_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.resolver.default_region, "Himachal Pradesh");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            [forecast]
            api_key = "KEY"

            [resolver]
            default_region = ""
            "#,
        )
        .unwrap();

        assert_eq!(cfg.forecast.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.forecast.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.geocoding.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.resolver.default_region, "");
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".into());
        cfg.resolver.default_region = "Uttarakhand".into();

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn api_key_errors_when_missing() {
        let cfg = Config::default();
        let err = cfg.api_key(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No weatherapi.com API key configured"));
        assert!(msg.contains("Hint: run `weatherdash configure`"));
    }

    #[test]
    fn override_key_wins_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        assert_eq!(cfg.api_key(None).unwrap(), "STORED");
        assert_eq!(cfg.api_key(Some("FLAG")).unwrap(), "FLAG");
        assert_eq!(cfg.api_key(Some("  ")).unwrap(), "STORED");
    }

    #[test]
    fn blank_key_clears_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.forecast.api_key, None);
    }
}
