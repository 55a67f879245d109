//! Exporter configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Trading 212 API key.
pub const API_KEY_ENV: &str = "TRADING212_API_KEY";

/// Environment variable pointing at the config file.
pub const CONFIG_ENV: &str = "T212_CONFIG";

/// Default config file path when neither CLI flag nor env var is set.
pub const DEFAULT_CONFIG_PATH: &str = "config/exporter.toml";

/// Exporter configuration.
///
/// Everything has a default matching the live setup; a config file is only
/// needed to point at a different API host or change the cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Trading 212 API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds between portfolio polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_base_url() -> String {
    "https://live.trading212.com".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus scrape port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

fn default_metrics_port() -> u16 {
    9977
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
        }
    }
}

impl ExporterConfig {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

/// Read the API key from the environment.
///
/// A missing or empty key is startup-fatal; the scrape server must never
/// come up without a usable fetcher behind it.
pub fn load_api_key() -> AppResult<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(AppError::Config(format!(
            "{API_KEY_ENV} environment variable is not set"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExporterConfig::default();
        assert_eq!(config.base_url, "https://live.trading212.com");
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.telemetry.metrics_port, 9977);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExporterConfig = toml::from_str("poll_interval_secs = 5").expect("parse");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.base_url, "https://live.trading212.com");
        assert_eq!(config.telemetry.metrics_port, 9977);
    }

    #[test]
    fn test_full_toml_overrides() {
        let raw = r#"
            base_url = "http://127.0.0.1:8080"
            poll_interval_secs = 10

            [telemetry]
            metrics_port = 19977
        "#;
        let config: ExporterConfig = toml::from_str(raw).expect("parse");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.telemetry.metrics_port, 19977);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = ExporterConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("poll_interval_secs"));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        // Serial by virtue of being the only test touching this variable.
        std::env::remove_var(API_KEY_ENV);
        let err = load_api_key().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));

        std::env::set_var(API_KEY_ENV, "");
        assert!(load_api_key().is_err());

        std::env::set_var(API_KEY_ENV, "secret");
        assert_eq!(load_api_key().expect("key"), "secret");
        std::env::remove_var(API_KEY_ENV);
    }
}
