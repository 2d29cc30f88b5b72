//! Evaluation configuration
//!
//! The split ratio, seed, and model knobs are an explicit immutable value
//! passed into the split and evaluation functions rather than ambient state.

use serde::{Deserialize, Serialize};

/// Metric used to headline the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryMetric {
    RocAuc,
    Accuracy,
    F1,
}

impl PrimaryMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryMetric::RocAuc => "ROC-AUC",
            PrimaryMetric::Accuracy => "Accuracy",
            PrimaryMetric::F1 => "F1",
        }
    }
}

/// Configuration for a single evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Fraction of records held out for testing
    pub test_size: f64,

    /// Seed for the split RNG
    pub seed: u64,

    /// Whether the split preserves per-class proportions
    pub stratified: bool,

    /// Metric headlining the report
    pub primary_metric: PrimaryMetric,

    /// L2 regularization strength for the logistic model
    pub l2_alpha: f64,

    /// Iteration cap for the logistic solver
    pub max_iter: usize,

    /// Gradient-norm tolerance for solver convergence
    pub tol: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            stratified: true,
            primary_metric: PrimaryMetric::RocAuc,
            l2_alpha: 1.0,
            max_iter: 100,
            tol: 1e-6,
        }
    }
}

impl EvalConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the test fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Builder method to set the split seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the report's headline metric
    pub fn with_primary_metric(mut self, metric: PrimaryMetric) -> Self {
        self.primary_metric = metric;
        self
    }

    /// Builder method to set the regularization strength
    pub fn with_l2_alpha(mut self, alpha: f64) -> Self {
        self.l2_alpha = alpha;
        self
    }

    /// Builder method to set the solver iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}
