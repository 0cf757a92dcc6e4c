//! Model artifact persistence.
//!
//! An artifact is a single JSON document holding the model parameters together
//! with the categorical encoding table the model was trained against. Both
//! travel under one format version so they cannot drift apart.

use super::data::FEATURE_NAMES;
use super::encoding::CategoricalEncoder;
use super::model::{Classifier, Model};
use crate::error::{DepositorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Artifact layout version understood by this crate.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Descriptive fields carried alongside the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_on: Option<String>,
}

/// A frozen classifier plus the encoding it expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    pub feature_names: Vec<String>,
    pub encoding: CategoricalEncoder,
    pub model: Model,
}

impl ModelArtifact {
    /// Wrap a model with the current feature order and the built-in encoding.
    pub fn new(model: Model, metadata: ArtifactMetadata) -> Self {
        ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            metadata,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            encoding: CategoricalEncoder::from_domains(),
            model,
        }
    }

    /// Check that the artifact can score records assembled by this crate.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(DepositorError::ArtifactVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        if self.feature_names.len() != FEATURE_NAMES.len()
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(a, b)| a != b)
        {
            return Err(DepositorError::artifact_invalid(format!(
                "feature columns {:?} do not match expected order {:?}",
                self.feature_names, FEATURE_NAMES
            )));
        }

        if self.model.n_features() != FEATURE_NAMES.len() {
            return Err(DepositorError::artifact_invalid(format!(
                "model expects {} features, records provide {}",
                self.model.n_features(),
                FEATURE_NAMES.len()
            )));
        }

        self.encoding.validate()?;
        self.model.validate()
    }

    /// Save the artifact as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            DepositorError::ArtifactCorrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    /// Load and validate an artifact.
    ///
    /// The format version is checked before the rest of the document is
    /// interpreted, so an artifact from a newer layout reports a version
    /// error rather than a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DepositorError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path).map_err(|source| DepositorError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let corrupt = |source| DepositorError::ArtifactCorrupt {
            path: path.to_path_buf(),
            source,
        };

        let document: serde_json::Value = serde_json::from_str(&json).map_err(corrupt)?;
        let found = document
            .get("format_version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| DepositorError::artifact_invalid("missing format_version"))?;
        if found != u64::from(ARTIFACT_FORMAT_VERSION) {
            return Err(DepositorError::ArtifactVersion {
                found: u32::try_from(found).unwrap_or(u32::MAX),
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        let artifact: ModelArtifact = serde_json::from_value(document).map_err(corrupt)?;
        artifact.validate()?;

        info!(
            path = %path.display(),
            name = %artifact.metadata.name,
            kind = artifact.model.kind(),
            "model artifact loaded"
        );
        Ok(artifact)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::pipeline::model::LogisticModel;
    use std::path::PathBuf;

    /// Logistic model over the 20 bank marketing features.
    pub fn sample_artifact() -> ModelArtifact {
        let model = Model::Logistic(LogisticModel {
            coefficients: vec![
                0.002, 0.01, 0.05, 0.03, -0.3, -0.01, -0.02, -0.5, -0.02, 0.01, 0.0045, -0.05,
                -0.001, 0.1, 0.4, -0.6, 0.8, 0.02, -0.2, -0.012,
            ],
            intercept: -16.0,
        });
        ModelArtifact::new(
            model,
            ArtifactMetadata {
                name: "test-logistic".to_string(),
                description: None,
                trained_on: None,
            },
        )
    }

    /// A unique path under the system temp directory.
    pub fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("depositor-{}-{}", std::process::id(), name))
    }
}
