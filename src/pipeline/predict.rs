//! The inference pipeline: encode a record, score it, format the outcome.

use super::artifact::ModelArtifact;
use super::data::FeatureRecord;
use super::model::Classifier;
use crate::error::Result;
use ndarray::Array1;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Predicted outcome of the campaign contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    NotSubscribed,
    Subscribed,
}

impl Subscription {
    /// Map a model label (0 or 1) to an outcome.
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Subscription::Subscribed
        } else {
            Subscription::NotSubscribed
        }
    }

    /// Model label of the outcome.
    pub fn label(self) -> u8 {
        match self {
            Subscription::NotSubscribed => 0,
            Subscription::Subscribed => 1,
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscription::NotSubscribed => f.write_str("Not Subscribed"),
            Subscription::Subscribed => f.write_str("Subscribed"),
        }
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub outcome: Subscription,
    /// `[p(not subscribed), p(subscribed)]`
    pub probabilities: [f64; 2],
    /// The encoded feature vector handed to the model.
    pub features: Array1<f64>,
}

/// An immutable pipeline owning the loaded artifact.
///
/// Build it once at startup and share it by reference; running a record
/// never mutates it.
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    artifact: ModelArtifact,
}

impl InferencePipeline {
    /// Create a pipeline from an artifact that passes validation.
    pub fn new(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(InferencePipeline { artifact })
    }

    /// Load the artifact at `path` and build the pipeline.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let artifact = ModelArtifact::load(path)?;
        Ok(InferencePipeline { artifact })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Encode a record into the model's feature vector.
    pub fn encode(&self, record: &FeatureRecord) -> Result<Array1<f64>> {
        self.artifact.encoding.transform(record)
    }

    /// Run one record through encoding and the model.
    pub fn run(&self, record: &FeatureRecord) -> Result<Prediction> {
        let features = self.encode(record)?;
        let probabilities = self.artifact.model.predict_proba(features.view())?;
        let label = self.artifact.model.predict(features.view())?;
        debug!(label, p_subscribed = probabilities[1], "record scored");

        Ok(Prediction {
            outcome: Subscription::from_label(label),
            probabilities,
            features,
        })
    }
}
