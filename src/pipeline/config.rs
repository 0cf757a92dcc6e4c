//! Configuration structures for the predictor.
//!
//! Settings are read from a TOML file with three sections: where the model
//! artifact lives, how results are displayed, and the default log filter.
//! Every section and field is optional and falls back to its default.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model artifact location
    pub model: ModelConfig,
    /// Result display options
    pub display: DisplayConfig,
    /// Logging defaults
    pub logging: LoggingConfig,
}

/// Model artifact location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory holding the artifact
    pub model_dir: String,
    /// Artifact file name inside `model_dir`
    pub artifact_file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            model_dir: "models".to_string(),
            artifact_file: "bank_marketing_model.json".to_string(),
        }
    }
}

/// Result display options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for probabilities
    pub precision: usize,
    /// Also print the encoded feature vector
    pub show_encoded: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            precision: 4,
            show_encoded: false,
        }
    }
}

/// Logging defaults. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "depositor=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [model]
            model_dir = "/srv/models"

            [display]
            show_encoded = true
            "#,
        )
        .unwrap();

        assert_eq!(config.model.model_dir, "/srv/models");
        assert_eq!(config.model.artifact_file, "bank_marketing_model.json");
        assert_eq!(config.display.precision, 4);
        assert!(config.display.show_encoded);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("depositor-no-such-config.toml");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let path = std::env::temp_dir().join(format!(
            "depositor-{}-bad-config.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[display]\nprecision = \"four\"\n").unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, crate::error::DepositorError::Config(_)));
        std::fs::remove_file(&path).ok();
    }
}
