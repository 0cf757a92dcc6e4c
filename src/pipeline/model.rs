//! Frozen binary classifiers loaded from the model artifact.
//!
//! Three model families are supported: logistic regression, random forests
//! and gradient boosted trees. All of them score a dense feature vector and
//! return the probability pair `[p(not subscribed), p(subscribed)]`.

use crate::error::{DepositorError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// A binary classifier over a fixed-length feature vector.
pub trait Classifier {
    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    /// Class probabilities `[p0, p1]`, summing to 1.
    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2]>;

    /// Most probable class. Ties resolve to class 0.
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<u8> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] > proba[0] { 1 } else { 0 })
    }
}

fn check_arity(expected: usize, features: &ArrayView1<'_, f64>) -> Result<()> {
    if features.len() != expected {
        return Err(DepositorError::inference(format!(
            "model expects {} features, got {}",
            expected,
            features.len()
        )));
    }
    if let Some(idx) = features.iter().position(|v| !v.is_finite()) {
        return Err(DepositorError::inference(format!(
            "feature {} is not a finite number",
            idx
        )));
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn binary_pair(p1: f64) -> Result<[f64; 2]> {
    if !p1.is_finite() {
        return Err(DepositorError::inference("model produced a non-finite score"));
    }
    let p1 = p1.clamp(0.0, 1.0);
    Ok([1.0 - p1, p1])
}

/// Logistic regression: `p1 = sigmoid(w·x + b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    fn validate(&self) -> Result<()> {
        let mut params = self.coefficients.iter().chain(std::iter::once(&self.intercept));
        if params.any(|v| !v.is_finite()) {
            return Err(DepositorError::artifact_invalid(
                "logistic model has non-finite parameters",
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2]> {
        check_arity(self.n_features(), &features)?;
        let z: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        binary_pair(sigmoid(z))
    }
}

/// One node of a decision tree.
///
/// Split nodes send `x[feature] <= threshold` to `left`, everything else to
/// `right`. Children always come after their parent in the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A binary decision tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Leaf values reached by `features`.
    ///
    /// Walking only ever moves forward in the node list, so a malformed tree
    /// fails instead of looping.
    fn leaf(&self, features: &ArrayView1<'_, f64>) -> Result<&[f64]> {
        let mut idx = 0;
        loop {
            let node = self.nodes.get(idx).ok_or_else(|| {
                DepositorError::inference(format!("tree has no node {}", idx))
            })?;
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = features.get(*feature).ok_or_else(|| {
                        DepositorError::inference(format!(
                            "node {} splits on missing feature {}",
                            idx, feature
                        ))
                    })?;
                    let next = if *x <= *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(DepositorError::inference(format!(
                            "node {} points back to node {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
                TreeNode::Leaf { value } => return Ok(value.as_slice()),
            }
        }
    }

    fn validate(&self, n_features: usize, leaf_width: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(DepositorError::artifact_invalid("tree has no nodes"));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(DepositorError::artifact_invalid(format!(
                            "node {} splits on feature {} of {}",
                            idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(DepositorError::artifact_invalid(format!(
                            "node {} has a non-finite threshold",
                            idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(DepositorError::artifact_invalid(format!(
                                "node {} points to invalid child {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != leaf_width || value.iter().any(|v| !v.is_finite()) {
                        return Err(DepositorError::artifact_invalid(format!(
                            "leaf {} must hold {} finite values",
                            idx, leaf_width
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Random forest; each leaf holds class counts or class fractions.
///
/// Probabilities are the mean of the normalized per-tree leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(DepositorError::artifact_invalid("random forest has no trees"));
        }
        for tree in &self.trees {
            tree.validate(self.n_features, 2)?;
            let empty_leaf = tree.nodes.iter().any(|node| match node {
                TreeNode::Leaf { value } => {
                    value.iter().any(|v| *v < 0.0) || value.iter().sum::<f64>() <= 0.0
                }
                TreeNode::Split { .. } => false,
            });
            if empty_leaf {
                return Err(DepositorError::artifact_invalid(
                    "random forest leaf has no class weight",
                ));
            }
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2]> {
        check_arity(self.n_features, &features)?;
        if self.trees.is_empty() {
            return Err(DepositorError::inference("random forest has no trees"));
        }
        let mut total: f64 = 0.0;
        for tree in &self.trees {
            match tree.leaf(&features)? {
                [neg, pos] if *neg >= 0.0 && *pos >= 0.0 && neg + pos > 0.0 => {
                    total += pos / (neg + pos);
                }
                _ => {
                    return Err(DepositorError::inference(
                        "random forest leaf is not a pair of class weights",
                    ))
                }
            }
        }
        binary_pair(total / self.trees.len() as f64)
    }
}

/// Gradient boosted regression trees with a logistic link.
///
/// `p1 = sigmoid(init + learning_rate * sum(leaf))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    pub n_features: usize,
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<DecisionTree>,
}

impl GradientBoosting {
    fn validate(&self) -> Result<()> {
        if !self.init.is_finite() || !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(DepositorError::artifact_invalid(
                "gradient boosting needs a finite init and a positive learning rate",
            ));
        }
        for tree in &self.trees {
            tree.validate(self.n_features, 1)?;
        }
        Ok(())
    }
}

impl Classifier for GradientBoosting {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2]> {
        check_arity(self.n_features, &features)?;
        let mut sum: f64 = 0.0;
        for tree in &self.trees {
            match tree.leaf(&features)? {
                [value] => sum += *value,
                _ => {
                    return Err(DepositorError::inference(
                        "gradient boosting leaf must hold one value",
                    ))
                }
            }
        }
        binary_pair(sigmoid(self.init + self.learning_rate * sum))
    }
}

/// Any of the supported model families, as stored in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    Logistic(LogisticModel),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl Model {
    /// Short name of the model family.
    pub fn kind(&self) -> &'static str {
        match self {
            Model::Logistic(_) => "logistic",
            Model::RandomForest(_) => "random_forest",
            Model::GradientBoosting(_) => "gradient_boosting",
        }
    }

    /// Structural checks run once at load time, so that scoring can index
    /// nodes and features without bounds failures.
    pub fn validate(&self) -> Result<()> {
        match self {
            Model::Logistic(m) => m.validate(),
            Model::RandomForest(m) => m.validate(),
            Model::GradientBoosting(m) => m.validate(),
        }
    }
}

impl Classifier for Model {
    fn n_features(&self) -> usize {
        match self {
            Model::Logistic(m) => m.n_features(),
            Model::RandomForest(m) => m.n_features(),
            Model::GradientBoosting(m) => m.n_features(),
        }
    }

    fn predict_proba(&self, features: ArrayView1<'_, f64>) -> Result<[f64; 2]> {
        match self {
            Model::Logistic(m) => m.predict_proba(features),
            Model::RandomForest(m) => m.predict_proba(features),
            Model::GradientBoosting(m) => m.predict_proba(features),
        }
    }
}
