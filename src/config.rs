//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the remote choice URL
pub const COUNTRIES_URL_ENV: &str = "ERAT_COUNTRIES_URL";

/// Default delay before the survey is first shown
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 2000;

/// Default simulated processing time after a file upload
pub const DEFAULT_UPLOAD_DELAY_MS: u64 = 1000;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Replacement for the country list URL in the questionnaire
    pub countries_url: Option<String>,
    /// Startup loading delay in milliseconds
    pub startup_delay_ms: Option<u64>,
    /// Upload loading delay in milliseconds
    pub upload_delay_ms: Option<u64>,
    /// Log file location
    pub log_file: Option<PathBuf>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "erat", "erat-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms.unwrap_or(DEFAULT_STARTUP_DELAY_MS))
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms.unwrap_or(DEFAULT_UPLOAD_DELAY_MS))
    }

    /// Country list URL override: environment first, then the config file
    pub fn countries_url(&self) -> Option<String> {
        std::env::var(COUNTRIES_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.countries_url.clone())
    }

    /// Where logs are written; the terminal itself is owned by the UI
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("erat-tui.log"))
                .unwrap_or_else(|| std::env::temp_dir().join("erat-tui.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.countries_url.is_none());
        assert!(config.startup_delay_ms.is_none());
        assert!(config.upload_delay_ms.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_default_delays() {
        let config = TuiConfig::default();
        assert_eq!(config.startup_delay(), Duration::from_secs(2));
        assert_eq!(config.upload_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            countries_url: Some("http://localhost:8080/all".to_string()),
            startup_delay_ms: Some(500),
            upload_delay_ms: Some(250),
            log_file: Some(PathBuf::from("/tmp/erat.log")),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.countries_url,
            Some("http://localhost:8080/all".to_string())
        );
        assert_eq!(parsed.startup_delay(), Duration::from_millis(500));
        assert_eq!(parsed.upload_delay(), Duration::from_millis(250));
        assert_eq!(parsed.log_file_path(), PathBuf::from("/tmp/erat.log"));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.countries_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"upload_delay_ms": 10, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.upload_delay_ms, Some(10));
    }

    #[test]
    fn test_log_file_has_a_default() {
        let path = TuiConfig::default().log_file_path();
        assert!(path.ends_with("erat-tui.log"));
    }

    #[test]
    fn test_load_returns_ok() {
        // May or may not find a config file, but must not fail on a clean machine
        assert!(TuiConfig::load().is_ok());
    }
}
