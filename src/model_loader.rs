//! Model artifact location and loading.
//!
//! # Examples
//!
//! ## Check if the artifact exists
//!
//! ```no_run
//! use depositor::model_loader::ModelFiles;
//!
//! let files = ModelFiles::new(None, None);
//! if files.exists() {
//!     println!("Model is ready!");
//! }
//! ```
//!
//! ## Custom model directory
//!
//! ```no_run
//! use depositor::model_loader::ModelLoaderConfig;
//!
//! let config = ModelLoaderConfig::new()
//!     .with_model_dir("/custom/models")
//!     .with_artifact_file("campaign_2024.json");
//!
//! let files = config.get_model_files();
//! ```

use crate::error::{DepositorError, Result};
use crate::pipeline::config::Config;
use std::path::PathBuf;

const DEFAULT_MODEL_DIR: &str = "models";
const DEFAULT_ARTIFACT_FILE: &str = "bank_marketing_model.json";

/// Files that make up a deployed model.
pub struct ModelFiles {
    pub artifact: PathBuf,
}

impl ModelFiles {
    /// Resolve the artifact path, using defaults for missing parts.
    pub fn new(model_dir: Option<&str>, artifact_file: Option<&str>) -> Self {
        let base = model_dir.unwrap_or(DEFAULT_MODEL_DIR);
        Self {
            artifact: PathBuf::from(base).join(artifact_file.unwrap_or(DEFAULT_ARTIFACT_FILE)),
        }
    }

    /// Check if all required files exist
    pub fn exists(&self) -> bool {
        self.artifact.is_file()
    }
}

/// Fail with a descriptive error when the model files are absent.
///
/// There is no fallback model: a missing artifact stops the request.
pub fn ensure_model_files(files: &ModelFiles) -> Result<()> {
    if files.exists() {
        return Ok(());
    }
    Err(DepositorError::ArtifactNotFound {
        path: files.artifact.clone(),
    })
}

/// Configuration for model loading
#[derive(Debug, Clone, Default)]
pub struct ModelLoaderConfig {
    pub model_dir: Option<String>,
    pub artifact_file: Option<String>,
}

impl ModelLoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_dir(mut self, dir: impl Into<String>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn with_artifact_file(mut self, file: impl Into<String>) -> Self {
        self.artifact_file = Some(file.into());
        self
    }

    pub fn get_model_files(&self) -> ModelFiles {
        ModelFiles::new(self.model_dir.as_deref(), self.artifact_file.as_deref())
    }
}

impl From<&Config> for ModelLoaderConfig {
    fn from(config: &Config) -> Self {
        ModelLoaderConfig::new()
            .with_model_dir(config.model.model_dir.clone())
            .with_artifact_file(config.model.artifact_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_files_paths() {
        let files = ModelFiles::new(None, None);
        assert_eq!(
            files.artifact,
            PathBuf::from("models/bank_marketing_model.json")
        );
    }

    #[test]
    fn test_custom_model_dir() {
        let files = ModelFiles::new(Some("/tmp/models"), Some("m.json"));
        assert_eq!(files.artifact, PathBuf::from("/tmp/models/m.json"));
    }

    #[test]
    fn test_config_builder() {
        let config = ModelLoaderConfig::new()
            .with_model_dir("custom_models")
            .with_artifact_file("v2.json");

        assert_eq!(config.model_dir, Some("custom_models".to_string()));
        assert_eq!(
            config.get_model_files().artifact,
            PathBuf::from("custom_models/v2.json")
        );
    }

    #[test]
    fn test_from_config_file_settings() {
        let mut config = Config::default();
        config.model.model_dir = "/srv/depositor".to_string();
        let loader = ModelLoaderConfig::from(&config);
        assert_eq!(
            loader.get_model_files().artifact,
            PathBuf::from("/srv/depositor/bank_marketing_model.json")
        );
    }

    #[test]
    fn test_missing_files_reported() {
        let files = ModelFiles::new(Some("/nonexistent/depositor"), None);
        assert!(!files.exists());
        assert!(matches!(
            ensure_model_files(&files),
            Err(DepositorError::ArtifactNotFound { .. })
        ));
    }
}
