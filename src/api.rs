//! High-level API for term deposit subscription prediction
//!
//! This module provides a simple interface for loading the model artifact
//! and scoring feature records.
//!
//! # Quick Start
//!
//! ```no_run
//! use depositor::api::Predictor;
//! use depositor::FeatureRecord;
//!
//! let predictor = Predictor::new()?;
//! let result = predictor.predict(&FeatureRecord::default())?;
//! println!("{}", result.outcome); // "Subscribed" or "Not Subscribed"
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom Model Location
//!
//! ```no_run
//! use depositor::api::{Predictor, PredictorConfig};
//!
//! let config = PredictorConfig::new()
//!     .with_model_dir("/srv/models")
//!     .with_artifact_file("campaign_2024.json");
//!
//! let predictor = Predictor::with_config(config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Error Handling
//!
//! ```no_run
//! use depositor::api::Predictor;
//! use depositor::FeatureRecord;
//!
//! match Predictor::new() {
//!     Ok(predictor) => {
//!         let mut record = FeatureRecord::default();
//!         record.job = "astronaut".to_string();
//!         if let Err(e) = predictor.predict(&record) {
//!             eprintln!("Rejected: {}", e);
//!         }
//!     }
//!     Err(e) => eprintln!("Failed to load model: {}", e),
//! }
//! ```

use crate::error::Result;
use crate::model_loader::ensure_model_files;
use crate::pipeline::data::FeatureRecord;
use crate::pipeline::predict::{InferencePipeline, Subscription};
use ndarray::Array1;

pub use crate::model_loader::ModelLoaderConfig as PredictorConfig;

/// Main predictor interface. Load it once and reuse it for every request.
pub struct Predictor {
    pipeline: InferencePipeline,
}

/// Everything the presentation layer displays for one request.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// The submitted record, echoed back
    pub input: FeatureRecord,

    /// Predicted outcome
    pub outcome: Subscription,

    /// `[p(not subscribed), p(subscribed)]`
    pub probabilities: [f64; 2],

    /// Encoded feature vector the model scored
    pub encoded: Array1<f64>,
}

impl PredictionResult {
    /// Probability of the predicted outcome.
    pub fn confidence(&self) -> f64 {
        self.probabilities[self.outcome.label() as usize]
    }
}

impl Predictor {
    /// Create a predictor from the default model location (`models/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing, corrupt, or was
    /// produced for a different feature layout.
    pub fn new() -> Result<Self> {
        Self::with_config(PredictorConfig::default())
    }

    /// Create a predictor with a custom model location.
    pub fn with_config(config: PredictorConfig) -> Result<Self> {
        let files = config.get_model_files();
        ensure_model_files(&files)?;
        let pipeline = InferencePipeline::load(&files.artifact)?;
        Ok(Self { pipeline })
    }

    /// Wrap an already built pipeline.
    pub fn from_pipeline(pipeline: InferencePipeline) -> Self {
        Self { pipeline }
    }

    /// Score one record.
    ///
    /// Categorical values outside the artifact's encoding are rejected
    /// before the model runs.
    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult> {
        let prediction = self.pipeline.run(record)?;
        Ok(PredictionResult {
            input: record.clone(),
            outcome: prediction.outcome,
            probabilities: prediction.probabilities,
            encoded: prediction.features,
        })
    }

    /// Information about the loaded model
    pub fn model_info(&self) -> ModelInfo {
        let artifact = self.pipeline.artifact();
        ModelInfo {
            name: artifact.metadata.name.clone(),
            description: artifact.metadata.description.clone(),
            kind: artifact.model.kind(),
            format_version: artifact.format_version,
            n_features: artifact.feature_names.len(),
        }
    }
}

/// Information about the loaded model
#[derive(Debug)]
pub struct ModelInfo {
    pub name: String,
    pub description: Option<String>,
    pub kind: &'static str,
    pub format_version: u32,
    pub n_features: usize,
}

impl std::fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model: {}", self.name)?;
        if let Some(description) = &self.description {
            writeln!(f, "Description: {}", description)?;
        }
        writeln!(f, "Kind: {}", self.kind)?;
        writeln!(f, "Artifact format: v{}", self.format_version)?;
        write!(f, "Features: {}", self.n_features)
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction: {}", self.outcome)?;
        write!(
            f,
            "Prediction Probability: [{:.4}, {:.4}]",
            self.probabilities[0], self.probabilities[1]
        )
    }
}
