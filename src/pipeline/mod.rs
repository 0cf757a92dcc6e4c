//! Feature encoding and inference pipeline for term deposit prediction.
//!
//! A customer record collected by the form is turned into the numeric
//! feature vector a pre-trained classifier expects, scored, and reported as
//! a subscription outcome with its probability pair.
//!
//! ## Flow
//!
//! ```text
//! form (defaults + overrides) ─▶ FeatureRecord ─▶ CategoricalEncoder ─▶ Model ─▶ Prediction
//! ```
//!
//! ## Categorical encoding
//!
//! The ten categorical columns (`job`, `marital`, `education`, `default`,
//! `housing`, `loan`, `contact`, `month`, `day_of_week`, `poutcome`) are
//! encoded against their complete domains, sorted by byte value. The table
//! ships inside the model artifact, so the codes seen at inference are the
//! codes the model was trained on, independent of what a single request
//! contains.
//!
//! | Column | Codes |
//! |--------|-------|
//! | marital | divorced=0, married=1, single=2, unknown=3 |
//! | contact | cellular=0, telephone=1 |
//! | poutcome | failure=0, nonexistent=1, success=2 |
//!
//! ## Model artifact
//!
//! A JSON document with `format_version`, `metadata`, `feature_names`,
//! `encoding` and `model`. The model is one of:
//!
//! - `logistic` — `coefficients`, `intercept`
//! - `random_forest` — `n_features`, `trees` with class-count leaves
//! - `gradient_boosting` — `n_features`, `init`, `learning_rate`, `trees`
//!   with single-value leaves
//!
//! ## Configuration
//!
//! ```toml
//! [model]
//! model_dir = "models"
//! artifact_file = "bank_marketing_model.json"
//!
//! [display]
//! precision = 4
//! show_encoded = false
//!
//! [logging]
//! filter = "depositor=info"
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - Configuration structures and loading
//! - [`data`] - Feature record and categorical domains
//! - [`form`] - Form schema and record assembly
//! - [`encoding`] - Fixed-domain categorical encoder
//! - [`model`] - Classifier families
//! - [`artifact`] - Model artifact persistence
//! - [`predict`] - The inference pipeline
//! - [`cli`] - Command-line interface

pub mod artifact;
pub mod cli;
pub mod config;
pub mod data;
pub mod encoding;
pub mod form;
pub mod model;
pub mod predict;

pub use cli::main_cli;
