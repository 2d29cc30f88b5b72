//! Markdown comparison report

use super::MetricSet;
use serde::{Deserialize, Serialize};

/// One row of the comparison table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: String,
    pub baseline: f64,
    pub model: f64,
    /// Signed difference, model minus baseline
    pub delta: f64,
}

/// Baseline-vs-model comparison produced once per evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub rows: Vec<MetricComparison>,
    pub baseline: MetricSet,
    pub model: MetricSet,
    pub primary_metric: String,
    pub n_train: usize,
    pub n_test: usize,
    /// Name of the column the label is derived from (excluded from features)
    pub label_source: String,
    pub label_column: String,
}

impl EvaluationReport {
    pub fn new(
        baseline: MetricSet,
        model: MetricSet,
        primary_metric: &str,
        n_train: usize,
        n_test: usize,
        label_source: &str,
        label_column: &str,
    ) -> Self {
        let rows = baseline
            .named()
            .into_iter()
            .zip(model.named())
            .map(|((name, b), (_, m))| MetricComparison {
                metric: name.to_string(),
                baseline: b,
                model: m,
                delta: m - b,
            })
            .collect();

        Self {
            rows,
            baseline,
            model,
            primary_metric: primary_metric.to_string(),
            n_train,
            n_test,
            label_source: label_source.to_string(),
            label_column: label_column.to_string(),
        }
    }

    /// Value of the primary metric for the model
    pub fn primary_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.metric == self.primary_metric)
            .map(|r| r.model)
    }

    /// Render the report as markdown: a metrics table followed by a
    /// caveats/recommendations section.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str("# Baseline Evaluation Report\n\n");
        out.push_str(&format!("- Train records: {}\n", self.n_train));
        out.push_str(&format!("- Test records: {}\n", self.n_test));
        out.push_str(&format!("- Primary metric: {}\n\n", self.primary_metric));

        out.push_str("| Metric | Baseline | Model | Improvement |\n");
        out.push_str("|--------|---------:|------:|------------:|\n");
        for row in &self.rows {
            out.push_str(&format!(
                "| {} | {:.4} | {:.4} | {:+.4} |\n",
                row.metric, row.baseline, row.model, row.delta
            ));
        }

        out.push_str("\n## Caveats and Recommendations\n\n");
        out.push_str(&format!(
            "- The label `{}` is derived from `{}`, so `{}` is excluded from the \
             feature set; leaving it in would leak the label and make the holdout \
             evaluation meaningless.\n",
            self.label_column, self.label_source, self.label_source
        ));
        out.push_str(&format!(
            "- The majority-class baseline scores {:.2} ROC-AUC by convention \
             (constant prediction); the model must beat it to carry any signal.\n",
            self.baseline.roc_auc
        ));
        if self.n_test < 50 {
            out.push_str(&format!(
                "- The holdout has only {} records; metric estimates carry wide \
                 uncertainty. Collect more data before trusting small deltas.\n",
                self.n_test
            ));
        }
        if self.model.roc_auc > 0.99 {
            out.push_str(
                "- Model holdout metrics are near-perfect; audit the feature set \
                 for residual leakage before shipping.\n",
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics(auc: f64) -> MetricSet {
        MetricSet {
            roc_auc: auc,
            accuracy: 0.8,
            precision: 0.8,
            recall: 1.0,
            f1: 0.888,
        }
    }

    fn sample_report() -> EvaluationReport {
        EvaluationReport::new(
            sample_metrics(0.5),
            sample_metrics(0.87),
            "ROC-AUC",
            80,
            20,
            "total_amount",
            "is_high_value",
        )
    }

    #[test]
    fn test_rows_pair_metrics_with_delta() {
        let report = sample_report();
        assert_eq!(report.rows.len(), 5);

        let auc_row = &report.rows[0];
        assert_eq!(auc_row.metric, "ROC-AUC");
        assert_eq!(auc_row.baseline, 0.5);
        assert_eq!(auc_row.model, 0.87);
        assert!((auc_row.delta - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_markdown_structure() {
        let md = sample_report().to_markdown();
        assert!(md.contains("| Metric | Baseline | Model | Improvement |"));
        assert!(md.contains("| ROC-AUC | 0.5000 | 0.8700 | +0.3700 |"));
        assert!(md.contains("## Caveats and Recommendations"));
        assert!(md.contains("total_amount"));
    }

    #[test]
    fn test_primary_value() {
        let report = sample_report();
        assert_eq!(report.primary_value(), Some(0.87));
    }

    #[test]
    fn test_small_holdout_caveat() {
        let md = sample_report().to_markdown();
        assert!(md.contains("only 20 records"));
    }
}
