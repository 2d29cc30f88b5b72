//! Classification metrics

use crate::error::{BaselineError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The five holdout metrics computed for every predictor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSet {
    pub roc_auc: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MetricSet {
    /// Compute all metrics from hard predictions and ranking scores
    pub fn compute(
        y_true: &Array1<f64>,
        y_pred: &Array1<f64>,
        y_score: &Array1<f64>,
    ) -> Result<Self> {
        if y_true.len() != y_pred.len() || y_true.len() != y_score.len() {
            return Err(BaselineError::ShapeError {
                expected: format!("{} predictions and scores", y_true.len()),
                actual: format!("{} predictions, {} scores", y_pred.len(), y_score.len()),
            });
        }

        let (tp, fp, _tn, fn_) = confusion_counts(y_true, y_pred);

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| (*t - *p).abs() < 0.5)
            .count();
        let accuracy = correct as f64 / y_true.len() as f64;

        // 0/0 counts score 0.0, matching the zero_division convention
        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Ok(Self {
            roc_auc: roc_auc(y_true, y_score)?,
            accuracy,
            precision,
            recall,
            f1,
        })
    }

    /// Metric values in report order, paired with their display names
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("ROC-AUC", self.roc_auc),
            ("Accuracy", self.accuracy),
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1", self.f1),
        ]
    }
}

fn confusion_counts(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> (usize, usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut tn = 0;
    let mut fn_ = 0;

    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        let t_bool = *t > 0.5;
        let p_bool = *p > 0.5;
        match (t_bool, p_bool) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (false, false) => tn += 1,
            (true, false) => fn_ += 1,
        }
    }

    (tp, fp, tn, fn_)
}

/// Area under the ROC curve via the rank statistic.
///
/// Tied scores receive their average rank, so a constant score vector gives
/// exactly 0.5. Errors if the truth vector holds a single class, since the
/// curve is undefined without both.
pub fn roc_auc(y_true: &Array1<f64>, y_score: &Array1<f64>) -> Result<f64> {
    let n = y_true.len();
    let n_pos = y_true.iter().filter(|&&v| v > 0.5).count();
    let n_neg = n - n_pos;

    if n_pos == 0 || n_neg == 0 {
        return Err(BaselineError::DegenerateLabel(format!(
            "ROC-AUC undefined: {} positive and {} negative labels",
            n_pos, n_neg
        )));
    }

    // Average ranks (1-based) with ties sharing their mean rank
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        y_score[a]
            .partial_cmp(&y_score[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && y_score[order[j + 1]] == y_score[order[i]] {
            j += 1;
        }
        let avg_rank = ((i + 1) + (j + 1)) as f64 / 2.0;
        for k in i..=j {
            ranks[order[k]] = avg_rank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = y_true
        .iter()
        .zip(ranks.iter())
        .filter(|(t, _)| **t > 0.5)
        .map(|(_, r)| *r)
        .sum();

    let auc = (rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0) / (n_pos * n_neg) as f64;
    Ok(auc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_ranking_auc() {
        let y_true = array![0.0, 0.0, 1.0, 1.0];
        let y_score = array![0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&y_true, &y_score).unwrap(), 1.0);
    }

    #[test]
    fn test_inverted_ranking_auc() {
        let y_true = array![1.0, 1.0, 0.0, 0.0];
        let y_score = array![0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&y_true, &y_score).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_score_auc_exactly_half() {
        // the majority-baseline convention: constant scores tie everywhere
        for n_pos in [1usize, 4, 16] {
            for n_neg in [1usize, 4, 20] {
                let mut truth = vec![1.0; n_pos];
                truth.extend(vec![0.0; n_neg]);
                let y_true = Array1::from_vec(truth);
                let y_score = Array1::from_elem(n_pos + n_neg, 0.8);
                assert_eq!(
                    roc_auc(&y_true, &y_score).unwrap(),
                    0.5,
                    "constant scores must give AUC 0.5 exactly"
                );
            }
        }
    }

    #[test]
    fn test_single_class_auc_undefined() {
        let y_true = array![1.0, 1.0, 1.0];
        let y_score = array![0.1, 0.5, 0.9];
        assert!(matches!(
            roc_auc(&y_true, &y_score),
            Err(BaselineError::DegenerateLabel(_))
        ));
    }

    #[test]
    fn test_metric_set_all_positive_predictions() {
        // 16 true positives, 4 false positives: an always-positive predictor
        let mut truth = vec![1.0; 16];
        truth.extend(vec![0.0; 4]);
        let y_true = Array1::from_vec(truth);
        let y_pred = Array1::from_elem(20, 1.0);
        let y_score = Array1::from_elem(20, 0.8);

        let m = MetricSet::compute(&y_true, &y_pred, &y_score).unwrap();
        assert!((m.accuracy - 0.80).abs() < 1e-12);
        assert!((m.precision - 0.80).abs() < 1e-12);
        assert!((m.recall - 1.00).abs() < 1e-12);
        assert_eq!(m.roc_auc, 0.5);
    }

    #[test]
    fn test_zero_division_conventions() {
        // no positive predictions and no positive truths -> precision/recall 0
        let y_true = array![0.0, 0.0, 1.0];
        let y_pred = array![0.0, 0.0, 0.0];
        let y_score = array![0.1, 0.2, 0.3];

        let m = MetricSet::compute(&y_true, &y_pred, &y_score).unwrap();
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }
}
