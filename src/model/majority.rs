//! Majority-class baseline

use crate::error::{BaselineError, Result};
use super::Classifier;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Predicts the most frequent training label for every row and scores every
/// row with the constant training positive rate. With a constant score the
/// ROC-AUC is 0.5 by the tie convention, which is the floor the model is
/// compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorityBaseline {
    /// Most frequent training label (ties favor the positive class)
    pub majority_label: Option<f64>,
    /// Fraction of positive labels in the training partition
    pub positive_rate: Option<f64>,
    pub is_fitted: bool,
}

impl Default for MajorityBaseline {
    fn default() -> Self {
        Self::new()
    }
}

impl MajorityBaseline {
    pub fn new() -> Self {
        Self {
            majority_label: None,
            positive_rate: None,
            is_fitted: false,
        }
    }
}

impl Classifier for MajorityBaseline {
    fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if y.is_empty() {
            return Err(BaselineError::DataError(
                "cannot fit baseline on an empty label vector".to_string(),
            ));
        }

        let n_pos = y.iter().filter(|&&v| v > 0.5).count();
        let n_neg = y.len() - n_pos;

        self.majority_label = Some(if n_pos >= n_neg { 1.0 } else { 0.0 });
        self.positive_rate = Some(n_pos as f64 / y.len() as f64);
        self.is_fitted = true;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }
        let rate = self.positive_rate.unwrap_or(0.0);
        Ok(Array1::from_elem(x.nrows(), rate))
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }
        let label = self.majority_label.unwrap_or(0.0);
        Ok(Array1::from_elem(x.nrows(), label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_predicts_majority_label() {
        let x = Array2::<f64>::zeros((5, 2));
        let y = array![1.0, 1.0, 1.0, 0.0, 0.0];

        let mut baseline = MajorityBaseline::new();
        baseline.fit(&x, &y).unwrap();

        let preds = baseline.predict(&x).unwrap();
        assert!(preds.iter().all(|&p| p == 1.0));
        assert_eq!(baseline.positive_rate, Some(0.6));
    }

    #[test]
    fn test_minority_positive() {
        let x = Array2::<f64>::zeros((4, 1));
        let y = array![1.0, 0.0, 0.0, 0.0];

        let mut baseline = MajorityBaseline::new();
        baseline.fit(&x, &y).unwrap();

        let preds = baseline.predict(&x).unwrap();
        assert!(preds.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_constant_proba() {
        let x = Array2::<f64>::zeros((3, 1));
        let y = array![1.0, 1.0, 0.0];

        let mut baseline = MajorityBaseline::new();
        baseline.fit(&x, &y).unwrap();

        let proba = baseline.predict_proba(&x).unwrap();
        let first = proba[0];
        assert!(proba.iter().all(|&p| p == first), "score must be constant");
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let baseline = MajorityBaseline::new();
        let x = Array2::<f64>::zeros((1, 1));
        assert!(matches!(
            baseline.predict(&x),
            Err(BaselineError::ModelNotFitted)
        ));
    }
}
