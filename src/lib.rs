//! # Depositor - Term Deposit Subscription Predictor
//!
//! Scores bank marketing campaign records with a pre-trained binary
//! classifier and reports whether the customer is likely to subscribe to a
//! term deposit.
//!
//! ## Features
//!
//! - **Typed records**: every campaign attribute is a struct field with a
//!   fixed domain
//! - **Stable encoding**: categorical values are encoded against complete,
//!   versioned domain tables shipped with the model
//! - **Frozen models**: logistic regression, random forest and gradient
//!   boosting artifacts, loaded once and shared read-only
//! - **CLI**: the input form and result page on the command line
//!
//! ## Quick Start
//!
//! ```no_run
//! use depositor::api::Predictor;
//! use depositor::pipeline::form::assemble;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::new()?;
//!
//!     let record = assemble([("age", "45"), ("job", "technician"), ("duration", "420")])?;
//!     let result = predictor.predict(&record)?;
//!
//!     println!("Prediction: {}", result.outcome);
//!     println!("Probabilities: {:?}", result.probabilities);
//!     Ok(())
//! }
//! ```
//!
//! ## Command Line
//!
//! ```bash
//! depositor schema
//! depositor predict --age 45 --job technician --duration 420
//! depositor --config prod.toml info
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use depositor::api::Predictor;
//!
//! match Predictor::new() {
//!     Ok(_predictor) => println!("model ready"),
//!     Err(e) => eprintln!("Failed to load model: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! The binary logs through `tracing`. The default filter comes from the
//! `[logging]` section of `config.toml`; `RUST_LOG` overrides it.

pub mod api;
pub mod error;
pub mod model_loader;
pub mod pipeline;

pub use error::{DepositorError, Result};
pub use pipeline::data::FeatureRecord;
pub use pipeline::predict::{InferencePipeline, Subscription};

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
