//! Binary classifiers
//!
//! The majority-class baseline and the logistic-regression model are two
//! implementations of one capability: fit on train, score on test.

mod logistic;
mod majority;

pub use logistic::LogisticRegression;
pub use majority::MajorityBaseline;

use crate::error::Result;
use ndarray::{Array1, Array2};

/// Binary predictor interface shared by the baseline and the model
pub trait Classifier {
    /// Fit on training data; `y` holds 0.0/1.0 labels
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Probability of the positive class per row
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Class labels at the 0.5 threshold
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}
