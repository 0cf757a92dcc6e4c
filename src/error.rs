//! Error types for the prediction pipeline.
//!
//! Every failure is surfaced to the caller; nothing is retried or recovered
//! locally. Artifact errors are fatal for the process, validation errors
//! are raised before the model is ever invoked.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading the model artifact, assembling a record,
/// encoding it or running inference.
#[derive(Error, Debug)]
pub enum DepositorError {
    /// The artifact file does not exist.
    #[error("model artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not match the artifact layout.
    #[error("corrupt model artifact {path}: {source}")]
    ArtifactCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact was written by an incompatible format version.
    #[error("unsupported artifact format version {found} (expected {expected})")]
    ArtifactVersion { found: u32, expected: u32 },

    /// The artifact parsed, but its contents are inconsistent.
    #[error("invalid model artifact: {message}")]
    ArtifactInvalid { message: String },

    /// A categorical value is not part of the field's fixed domain.
    #[error("invalid value {value:?} for field `{field}` (expected one of: {expected})")]
    UnknownCategory {
        field: String,
        value: String,
        expected: String,
    },

    /// A numeric value lies outside the field's allowed range.
    #[error("value {value} for field `{field}` is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Generic input validation failure.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The model could not score the encoded record.
    #[error("inference failed: {message}")]
    Inference { message: String },

    /// The configuration file could not be parsed.
    #[error("configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Rendering the echoed input failed.
    #[error("table rendering: {0}")]
    Table(#[from] csv::Error),

    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl DepositorError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an `ArtifactInvalid` error.
    pub fn artifact_invalid(message: impl Into<String>) -> Self {
        Self::ArtifactInvalid {
            message: message.into(),
        }
    }

    /// Creates an `Inference` error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the submitted record rather than
    /// by the artifact or the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::OutOfRange { .. } | Self::InvalidInput { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DepositorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        let err = DepositorError::UnknownCategory {
            field: "job".to_string(),
            value: "astronaut".to_string(),
            expected: "admin.".to_string(),
        };
        assert!(err.is_validation());
        assert!(err.to_string().contains("astronaut"));

        let err = DepositorError::artifact_invalid("empty forest");
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "invalid model artifact: empty forest");
    }
}
