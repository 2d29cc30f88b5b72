//! Holdout evaluation and reporting
//!
//! - Classification metrics (ROC-AUC, accuracy, precision, recall, F1)
//! - Baseline-vs-model evaluator
//! - Markdown comparison report

mod evaluator;
mod metrics;
mod report;

pub use evaluator::{BaselineEvaluator, EvaluationOutcome};
pub use metrics::{roc_auc, MetricSet};
pub use report::{EvaluationReport, MetricComparison};
