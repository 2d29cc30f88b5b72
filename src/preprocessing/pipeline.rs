//! Feature pipeline: column typing, scaling, encoding, matrix extraction

use crate::error::{BaselineError, Result};
use super::{OneHotEncoder, StandardScaler};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fits a standard scaler over numeric feature columns and a one-hot encoder
/// over categorical feature columns, on the training partition only, and turns
/// transformed frames into a row-major `Array2<f64>` with a stable column
/// order. The id, label, and label-source columns never enter the pipeline;
/// the caller passes the feature column list from the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePipeline {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    scaler: Option<StandardScaler>,
    encoder: Option<OneHotEncoder>,
    /// Ordered output feature names fixed at fit time
    output_columns: Vec<String>,
    is_fitted: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self {
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            scaler: None,
            encoder: None,
            output_columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit on the training partition, restricted to `feature_columns`
    pub fn fit(&mut self, df: &DataFrame, feature_columns: &[String]) -> Result<&mut Self> {
        self.detect_column_types(df, feature_columns)?;

        if !self.numeric_columns.is_empty() {
            let mut scaler = StandardScaler::new();
            let cols: Vec<&str> = self.numeric_columns.iter().map(|s| s.as_str()).collect();
            scaler.fit(df, &cols)?;
            self.scaler = Some(scaler);
        }

        if !self.categorical_columns.is_empty() {
            let mut encoder = OneHotEncoder::new();
            let cols: Vec<&str> = self.categorical_columns.iter().map(|s| s.as_str()).collect();
            encoder.fit(df, &cols)?;
            self.encoder = Some(encoder);
        }

        self.output_columns = self.numeric_columns.clone();
        if let Some(ref encoder) = self.encoder {
            self.output_columns.extend(encoder.output_columns());
        }

        tracing::debug!(
            numeric = ?self.numeric_columns,
            categorical = ?self.categorical_columns,
            n_output = self.output_columns.len(),
            "feature pipeline fitted"
        );

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a partition into the feature matrix. Never refits; test rows
    /// are scaled and encoded with training statistics.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }

        let mut result = df.clone();
        if let Some(ref scaler) = self.scaler {
            result = scaler.transform(&result)?;
        }
        if let Some(ref encoder) = self.encoder {
            result = encoder.transform(&result)?;
        }

        Self::columns_to_array2(&result, &self.output_columns)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, feature_columns: &[String]) -> Result<Array2<f64>> {
        self.fit(df, feature_columns)?;
        self.transform(df)
    }

    /// Ordered names of the output feature matrix columns
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    fn detect_column_types(&mut self, df: &DataFrame, feature_columns: &[String]) -> Result<()> {
        self.numeric_columns.clear();
        self.categorical_columns.clear();

        for name in feature_columns {
            let col = df
                .column(name)
                .map_err(|_| BaselineError::FeatureNotFound(name.clone()))?;

            match col.dtype() {
                DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
                DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 |
                DataType::Float32 | DataType::Float64 => {
                    self.numeric_columns.push(name.clone());
                }
                DataType::String => {
                    self.categorical_columns.push(name.clone());
                }
                other => {
                    return Err(BaselineError::DataError(format!(
                        "unsupported feature dtype {:?} for column {}",
                        other, name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Extract named columns from a DataFrame into a row-major Array2<f64>.
    /// Null cells are rejected rather than imputed.
    fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
        let n_rows = df.height();
        let n_cols = col_names.len();

        let col_data: Vec<Vec<f64>> = col_names
            .iter()
            .map(|col_name| {
                let series = df
                    .column(col_name)
                    .map_err(|_| BaselineError::FeatureNotFound(col_name.clone()))?;
                let series_f64 = series
                    .cast(&DataType::Float64)
                    .map_err(|e| BaselineError::DataError(e.to_string()))?;
                let values: Vec<f64> = series_f64
                    .f64()
                    .map_err(|e| BaselineError::DataError(e.to_string()))?
                    .into_iter()
                    .enumerate()
                    .map(|(row, v)| {
                        v.ok_or_else(|| {
                            BaselineError::DataError(format!(
                                "null value in column {} at row {}",
                                col_name, row
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?;
                Ok(values)
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
        Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| col_refs[c][r]))
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
