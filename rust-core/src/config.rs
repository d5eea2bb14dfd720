//! Monitor configuration
//!
//! Loaded from TOML with per-section defaults. Search order:
//!
//! 1. `AIRWATCH_CONFIG` environment variable (path to TOML file)
//! 2. `airwatch.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ```toml
//! [history]
//! capacity = 240
//!
//! [analysis]
//! algorithm = "auto"
//! window_type = "hann"
//! fast_path_threshold = 128
//!
//! [monitor]
//! min_samples = 4
//! poll_interval_ms = 25
//! ```

use crate::spectrum::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "AIRWATCH_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "airwatch.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub analysis: AnalyzerConfig,

    #[serde(default)]
    pub monitor: MonitorSettings,
}

/// Rolling window sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Readings retained for analysis
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 120 }
    }
}

/// Host-side policy around the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Fewest finite values before a spectrum is computed
    pub min_samples: usize,

    /// Worker sleep between empty polls of the reading source
    pub poll_interval_ms: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            min_samples: 2,
            poll_interval_ms: 50,
        }
    }
}

impl MonitorConfig {
    /// Load using the standard search order, falling back to defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        info!("No config file found, using defaults");
        Self::default()
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges, collecting every violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.history.capacity == 0 {
            errors.push("history.capacity must be > 0".to_string());
        }
        if self.monitor.min_samples == 0 {
            errors.push("monitor.min_samples must be > 0".to_string());
        }
        if self.monitor.min_samples > self.history.capacity {
            errors.push(format!(
                "monitor.min_samples ({}) exceeds history.capacity ({})",
                self.monitor.min_samples, self.history.capacity
            ));
        }
        if self.analysis.fast_path_threshold < 2 {
            errors.push("analysis.fast_path_threshold must be >= 2".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{Algorithm, WindowType};

    #[test]
    fn test_defaults_are_valid() {
        let config = MonitorConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.history.capacity, 120);
        assert_eq!(config.monitor.min_samples, 2);
        assert_eq!(config.analysis.algorithm, Algorithm::Auto);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MonitorConfig::from_toml_str(
            r#"
            [analysis]
            window_type = "hann"

            [monitor]
            min_samples = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.window_type, WindowType::Hann);
        assert_eq!(config.analysis.fast_path_threshold, 256);
        assert_eq!(config.monitor.min_samples, 8);
        assert_eq!(config.monitor.poll_interval_ms, 50);
        assert_eq!(config.history.capacity, 120);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(MonitorConfig::from_toml_str("").unwrap(), MonitorConfig::default());
    }

    #[test]
    fn test_validation_collects_errors() {
        let err = MonitorConfig::from_toml_str(
            r#"
            [history]
            capacity = 0

            [analysis]
            fast_path_threshold = 1
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let err = MonitorConfig::from_toml_str("[analysis]\nalgorithm = \"quantum\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("airwatch-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[history]\ncapacity = 30\n").unwrap();

        let config = MonitorConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.history.capacity, 30);

        let missing = MonitorConfig::from_file(&path).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(..)));
    }
}
