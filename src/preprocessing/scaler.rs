//! Standard scaling of numeric features

use crate::error::{BaselineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-column statistics fixed at fit time
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    mean: f64,
    std: f64,
}

/// Z-score scaler: (x - mean) / std, with mean and std computed on the
/// training partition only. Transform never refits, so test rows are scaled
/// with training statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    params: HashMap<String, ScalerParams>,
    is_fitted: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit scaling parameters on the given columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.params.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| BaselineError::FeatureNotFound(col_name.to_string()))?;
            let ca = column
                .cast(&DataType::Float64)
                .map_err(|e| BaselineError::DataError(e.to_string()))?;
            let ca = ca
                .f64()
                .map_err(|e| BaselineError::DataError(e.to_string()))?
                .clone();

            let mean = ca.mean().unwrap_or(0.0);
            let std = ca.std(1).unwrap_or(1.0);
            self.params.insert(
                col_name.to_string(),
                ScalerParams {
                    mean,
                    // constant columns scale by 1.0 rather than dividing by zero
                    std: if std == 0.0 { 1.0 } else { std },
                },
            );
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Scale the fitted columns, leaving all other columns untouched
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }

        let mut result = df.clone();
        for (col_name, params) in &self.params {
            let column = result
                .column(col_name)
                .map_err(|_| BaselineError::FeatureNotFound(col_name.clone()))?;
            let ca = column
                .cast(&DataType::Float64)
                .map_err(|e| BaselineError::DataError(e.to_string()))?;

            let scaled: Float64Chunked = ca
                .f64()
                .map_err(|e| BaselineError::DataError(e.to_string()))?
                .into_iter()
                .map(|opt| opt.map(|v| (v - params.mean) / params.std))
                .collect();
            let scaled = scaled.with_name(col_name.as_str().into()).into_series();

            result
                .with_column(scaled)
                .map_err(|e| BaselineError::DataError(e.to_string()))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }
}
