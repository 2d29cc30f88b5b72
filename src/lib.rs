//! # ml-baseline
//!
//! Baseline evaluation pipeline for customer-value classification.
//!
//! Loads a customer dataset, derives a binary high-value label from total
//! spend, and compares an L2-regularized logistic regression against a
//! majority-class baseline on a stratified holdout. Every run is persisted
//! with its fitted preprocessing, model, schema, metrics, and a markdown
//! comparison report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ml_baseline::prelude::*;
//!
//! fn main() -> ml_baseline::Result<()> {
//!     let df = ml_baseline::data::sample::generate(100, 42)?;
//!     let evaluator = BaselineEvaluator::new(
//!         EvalConfig::default(),
//!         DatasetSchema::customer_value(),
//!     );
//!     let outcome = evaluator.evaluate(&df)?;
//!     println!("{}", outcome.report.to_markdown());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod preprocessing;
pub mod run;
pub mod split;

pub use error::{BaselineError, Result};

/// Common imports for working with the pipeline
pub mod prelude {
    pub use crate::config::{EvalConfig, PrimaryMetric};
    pub use crate::data::{DataLoader, DatasetSchema};
    pub use crate::error::{BaselineError, Result};
    pub use crate::evaluation::{BaselineEvaluator, EvaluationOutcome, EvaluationReport, MetricSet};
    pub use crate::model::{Classifier, LogisticRegression, MajorityBaseline};
    pub use crate::preprocessing::{FeaturePipeline, OneHotEncoder, StandardScaler};
    pub use crate::run::RunStore;
    pub use crate::split::{train_test_split, SplitIndices};
}
