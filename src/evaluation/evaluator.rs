//! Baseline-vs-model evaluation

use crate::config::EvalConfig;
use crate::data::DatasetSchema;
use crate::error::Result;
use crate::model::{Classifier, LogisticRegression, MajorityBaseline};
use crate::preprocessing::FeaturePipeline;
use crate::split::train_test_split;
use super::{EvaluationReport, MetricSet};
use polars::prelude::*;

/// Everything a run produces: the comparison report plus the fitted artifacts
/// needed to score new data later.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub report: EvaluationReport,
    pub pipeline: FeaturePipeline,
    pub model: LogisticRegression,
    pub baseline: MajorityBaseline,
}

/// Fits the majority-class baseline and the logistic-regression model on the
/// training partition and scores both on the holdout. One linear pass; the
/// input partitions are never mutated and nothing is retried.
#[derive(Debug, Clone)]
pub struct BaselineEvaluator {
    config: EvalConfig,
    schema: DatasetSchema,
}

impl BaselineEvaluator {
    pub fn new(config: EvalConfig, schema: DatasetSchema) -> Self {
        Self { config, schema }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Full pass over a raw dataset: validate, derive the label, split,
    /// evaluate.
    pub fn evaluate(&self, df: &DataFrame) -> Result<EvaluationOutcome> {
        let labeled = self.schema.derive_label(df)?;
        let y = self.schema.extract_label(&labeled)?;

        tracing::info!(rows = labeled.height(), cols = labeled.width(), "dataset loaded");

        let split = train_test_split(&y, &self.config)?;
        let (train_df, test_df) = split.apply(&labeled)?;

        self.evaluate_partitions(&train_df, &test_df)
    }

    /// Evaluate pre-built partitions that already carry the label column
    pub fn evaluate_partitions(
        &self,
        train_df: &DataFrame,
        test_df: &DataFrame,
    ) -> Result<EvaluationOutcome> {
        let y_train = self.schema.extract_label(train_df)?;
        let y_test = self.schema.extract_label(test_df)?;

        // Preprocessing statistics come from the training partition only
        let feature_columns = self.schema.feature_columns();
        let mut pipeline = FeaturePipeline::new();
        let x_train = pipeline.fit_transform(train_df, &feature_columns)?;
        let x_test = pipeline.transform(test_df)?;

        let mut baseline = MajorityBaseline::new();
        baseline.fit(&x_train, &y_train)?;

        let mut model = LogisticRegression::new()
            .with_alpha(self.config.l2_alpha)
            .with_max_iter(self.config.max_iter)
            .with_tol(self.config.tol);
        model.fit(&x_train, &y_train)?;

        let baseline_metrics = MetricSet::compute(
            &y_test,
            &baseline.predict(&x_test)?,
            &baseline.predict_proba(&x_test)?,
        )?;
        let model_metrics = MetricSet::compute(
            &y_test,
            &model.predict(&x_test)?,
            &model.predict_proba(&x_test)?,
        )?;

        tracing::info!(
            baseline_auc = baseline_metrics.roc_auc,
            model_auc = model_metrics.roc_auc,
            "holdout scoring complete"
        );
        if model_metrics.roc_auc > 0.99 {
            tracing::warn!(
                roc_auc = model_metrics.roc_auc,
                "near-perfect holdout metrics; audit features for leakage"
            );
        }

        let report = EvaluationReport::new(
            baseline_metrics,
            model_metrics,
            self.config.primary_metric.as_str(),
            train_df.height(),
            test_df.height(),
            &self.schema.label_source,
            &self.schema.label_column,
        );

        Ok(EvaluationOutcome {
            report,
            pipeline,
            model,
            baseline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample;

    #[test]
    fn test_evaluate_end_to_end() {
        let df = sample::generate_balanced(40, 20, 42).unwrap();
        let evaluator = BaselineEvaluator::new(EvalConfig::default(), DatasetSchema::customer_value());
        let outcome = evaluator.evaluate(&df).unwrap();

        assert_eq!(outcome.report.rows.len(), 5);
        assert_eq!(outcome.report.n_train + outcome.report.n_test, 60);
        assert_eq!(outcome.report.baseline.roc_auc, 0.5);
        assert!(outcome.model.is_fitted);
    }

    #[test]
    fn test_single_class_dataset_rejected() {
        // every amount above the threshold -> one label class
        let df = df!(
            "user_id" => &["u001", "u002", "u003", "u004"],
            "country" => &["US", "GB", "CA", "US"],
            "n_orders" => &[1i32, 2, 3, 4],
            "total_amount" => &[60.0, 70.0, 80.0, 90.0]
        )
        .unwrap();

        let evaluator = BaselineEvaluator::new(EvalConfig::default(), DatasetSchema::customer_value());
        let err = evaluator.evaluate(&df).unwrap_err();
        assert!(matches!(err, crate::error::BaselineError::DegenerateLabel(_)));
    }

    #[test]
    fn test_deterministic_metrics() {
        let df = sample::generate_balanced(40, 20, 42).unwrap();
        let evaluator = BaselineEvaluator::new(EvalConfig::default(), DatasetSchema::customer_value());

        let a = evaluator.evaluate(&df).unwrap();
        let b = evaluator.evaluate(&df).unwrap();
        assert_eq!(a.report.model.roc_auc, b.report.model.roc_auc);
        assert_eq!(a.report.model.accuracy, b.report.model.accuracy);
    }
}
