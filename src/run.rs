//! Run artifact persistence
//!
//! Each training run gets a timestamped directory under `models/runs/` with
//! the fitted model, the input schema, the holdout metrics, and the rendered
//! report; `models/registry/latest.txt` points at the newest run.

use crate::config::EvalConfig;
use crate::data::DatasetSchema;
use crate::error::{BaselineError, Result};
use crate::evaluation::EvaluationOutcome;
use crate::model::{Classifier, LogisticRegression};
use crate::preprocessing::FeaturePipeline;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fitted artifacts persisted together so scoring stays consistent with
/// training-time preprocessing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunModel {
    pub pipeline: FeaturePipeline,
    pub model: LogisticRegression,
}

/// Metadata written next to every run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub run_id: String,
    pub timestamp: String,
    pub config: EvalConfig,
    pub n_train: usize,
    pub n_test: usize,
}

/// Filesystem store for training runs
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn runs_dir(&self) -> PathBuf {
        self.root.join("models").join("runs")
    }

    fn registry_file(&self) -> PathBuf {
        self.root.join("models").join("registry").join("latest.txt")
    }

    /// Persist a finished evaluation run and point the registry at it.
    /// Returns the run id.
    pub fn save(
        &self,
        outcome: &EvaluationOutcome,
        schema: &DatasetSchema,
        config: &EvalConfig,
    ) -> Result<String> {
        let run_id = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let run_dir = self.runs_dir().join(&run_id);

        let model_dir = run_dir.join("model");
        let schema_dir = run_dir.join("schema");
        let metrics_dir = run_dir.join("metrics");
        fs::create_dir_all(&model_dir)?;
        fs::create_dir_all(&schema_dir)?;
        fs::create_dir_all(&metrics_dir)?;

        let run_model = RunModel {
            pipeline: outcome.pipeline.clone(),
            model: outcome.model.clone(),
        };
        fs::write(
            model_dir.join("model.json"),
            serde_json::to_string_pretty(&run_model)?,
        )?;

        schema.save(&schema_dir.join("input_schema.json"))?;

        fs::write(
            metrics_dir.join("holdout_metrics.json"),
            serde_json::to_string_pretty(&outcome.report)?,
        )?;

        fs::write(run_dir.join("report.md"), outcome.report.to_markdown())?;

        let meta = RunMeta {
            run_id: run_id.clone(),
            timestamp: chrono::Local::now().to_rfc3339(),
            config: config.clone(),
            n_train: outcome.report.n_train,
            n_test: outcome.report.n_test,
        };
        fs::write(
            run_dir.join("run_meta.json"),
            serde_json::to_string_pretty(&meta)?,
        )?;

        let registry = self.registry_file();
        if let Some(parent) = registry.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&registry, &run_id)?;

        tracing::info!(run_id = %run_id, dir = %run_dir.display(), "run artifacts saved");
        Ok(run_id)
    }

    /// Resolve `latest` or an explicit run id to its directory
    pub fn resolve(&self, run: &str) -> Result<PathBuf> {
        let run_id = if run == "latest" {
            let registry = self.registry_file();
            if !registry.exists() {
                return Err(BaselineError::RunNotFound(
                    "no 'latest' run recorded; train a model first".to_string(),
                ));
            }
            fs::read_to_string(&registry)?.trim().to_string()
        } else {
            run.to_string()
        };

        let run_dir = self.runs_dir().join(&run_id);
        if !run_dir.exists() {
            return Err(BaselineError::RunNotFound(run_id));
        }
        Ok(run_dir)
    }

    pub fn load_model(&self, run_dir: &Path) -> Result<RunModel> {
        let json = fs::read_to_string(run_dir.join("model").join("model.json"))?;
        let model: RunModel = serde_json::from_str(&json)?;
        Ok(model)
    }

    pub fn load_schema(&self, run_dir: &Path) -> Result<DatasetSchema> {
        DatasetSchema::load(&run_dir.join("schema").join("input_schema.json"))
    }

    pub fn load_report(&self, run_dir: &Path) -> Result<String> {
        Ok(fs::read_to_string(run_dir.join("report.md"))?)
    }

    /// Score new data with a persisted run.
    ///
    /// The input needs the id and feature columns; the label-source column is
    /// not required since it never enters X. Output: the id column with
    /// `prediction` and `prediction_proba` appended.
    pub fn predict(&self, run: &str, input: &DataFrame) -> Result<DataFrame> {
        let run_dir = self.resolve(run)?;
        let run_model = self.load_model(&run_dir)?;
        let schema = self.load_schema(&run_dir)?;

        let mut needed = schema.feature_columns();
        needed.push(schema.id_column.clone());
        let present: Vec<String> = input
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let missing: Vec<String> = needed
            .into_iter()
            .filter(|c| !present.contains(c))
            .collect();
        if !missing.is_empty() {
            return Err(BaselineError::SchemaError(missing.join(", ")));
        }

        let x = run_model.pipeline.transform(input)?;
        let predictions = run_model.model.predict(&x)?;
        let proba = run_model.model.predict_proba(&x)?;

        let ids = input
            .column(&schema.id_column)
            .map_err(|_| BaselineError::FeatureNotFound(schema.id_column.clone()))?
            .as_materialized_series()
            .clone();

        let pred_series = Series::new(
            "prediction".into(),
            predictions.iter().map(|&p| p as i32).collect::<Vec<i32>>(),
        );
        let proba_series = Series::new("prediction_proba".into(), proba.to_vec());

        DataFrame::new(vec![ids.into(), pred_series.into(), proba_series.into()])
            .map_err(|e| BaselineError::DataError(e.to_string()))
    }
}
