//! Error types for the baseline evaluation pipeline

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, BaselineError>;

/// All errors are terminal for a single evaluation run; nothing is retried.
#[derive(Error, Debug)]
pub enum BaselineError {
    /// Required input columns are absent from the dataset
    #[error("Schema error: missing required column(s): {0}")]
    SchemaError(String),

    /// Fewer than two label classes present; a stratified split is undefined
    #[error("Degenerate label: {0}")]
    DegenerateLabel(String),

    /// The solver exhausted its iteration cap without meeting tolerance
    #[error("Solver did not converge within {max_iter} iterations (gradient norm {grad_norm:.3e})")]
    NonConvergence { max_iter: usize, grad_norm: f64 },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model is not fitted yet. Call fit() before predict()")]
    ModelNotFitted,

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BaselineError::SchemaError("country, n_orders".to_string());
        assert!(err.to_string().contains("country"));

        let err = BaselineError::NonConvergence { max_iter: 100, grad_norm: 0.5 };
        assert!(err.to_string().contains("100"));
    }
}
