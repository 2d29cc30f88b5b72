//! Input schema: required columns, label derivation, feature selection

use crate::error::{BaselineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Schema of the customer dataset.
///
/// The label is derived from `label_source`, which is therefore excluded from
/// the feature set along with the id column: keeping the label's source column
/// in X would leak the label and make the holdout evaluation meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Columns that must be present in any input
    pub required_columns: Vec<String>,
    /// Opaque identifier column, passed through to outputs, never a feature
    pub id_column: String,
    /// Column the label is derived from (excluded from features)
    pub label_source: String,
    /// Threshold applied to `label_source` when deriving the label
    pub label_threshold: f64,
    /// Name of the derived binary label column
    pub label_column: String,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::customer_value()
    }
}

impl DatasetSchema {
    /// Schema for the customer value dataset: a customer is "high value"
    /// when their total spend exceeds the threshold.
    pub fn customer_value() -> Self {
        Self {
            required_columns: vec![
                "user_id".to_string(),
                "country".to_string(),
                "n_orders".to_string(),
                "total_amount".to_string(),
            ],
            id_column: "user_id".to_string(),
            label_source: "total_amount".to_string(),
            label_threshold: 50.0,
            label_column: "is_high_value".to_string(),
        }
    }

    /// Check that every required column is present.
    /// Reports all missing columns at once rather than failing on the first.
    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        let present: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = self
            .required_columns
            .iter()
            .filter(|c| !present.contains(c))
            .map(|c| c.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(BaselineError::SchemaError(missing.join(", ")));
        }

        Ok(())
    }

    /// Append the derived label column without touching existing columns.
    /// Label: `label_source > label_threshold`, encoded as 0/1. A null in the
    /// source column is a data error, not a negative label.
    pub fn derive_label(&self, df: &DataFrame) -> Result<DataFrame> {
        self.validate(df)?;

        let source = df
            .column(&self.label_source)
            .map_err(|_| BaselineError::FeatureNotFound(self.label_source.clone()))?;
        let source_f64 = source
            .cast(&DataType::Float64)
            .map_err(|e| BaselineError::DataError(e.to_string()))?;

        let labels: Vec<i32> = source_f64
            .f64()
            .map_err(|e| BaselineError::DataError(e.to_string()))?
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(amount) => Ok(if amount > self.label_threshold { 1 } else { 0 }),
                None => Err(BaselineError::DataError(format!(
                    "null value in column {} at row {}",
                    self.label_source, row
                ))),
            })
            .collect::<Result<Vec<i32>>>()?;

        let label_series = Series::new(self.label_column.as_str().into(), labels);

        let mut result = df.clone();
        result
            .with_column(label_series)
            .map_err(|e| BaselineError::DataError(e.to_string()))?;

        Ok(result)
    }

    /// Feature columns: everything required except the id and the label source.
    /// The label stays derivable even though its source column never enters X.
    pub fn feature_columns(&self) -> Vec<String> {
        self.required_columns
            .iter()
            .filter(|c| **c != self.id_column && **c != self.label_source)
            .cloned()
            .collect()
    }

    /// Extract the label column as a float array (0.0 / 1.0)
    pub fn extract_label(&self, df: &DataFrame) -> Result<ndarray::Array1<f64>> {
        let label = df
            .column(&self.label_column)
            .map_err(|_| BaselineError::FeatureNotFound(self.label_column.clone()))?;
        let label_f64 = label
            .cast(&DataType::Float64)
            .map_err(|e| BaselineError::DataError(e.to_string()))?;

        let values: Vec<f64> = label_f64
            .f64()
            .map_err(|e| BaselineError::DataError(e.to_string()))?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.ok_or_else(|| {
                    BaselineError::DataError(format!(
                        "null value in column {} at row {}",
                        self.label_column, row
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(ndarray::Array1::from_vec(values))
    }

    /// Save the schema to a JSON file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a schema from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let schema: Self = serde_json::from_str(&json)?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "user_id" => &["u001", "u002", "u003"],
            "country" => &["US", "GB", "CA"],
            "n_orders" => &[3i32, 7, 1],
            "total_amount" => &[12.5, 88.0, 50.0]
        )
        .unwrap()
    }

    #[test]
    fn test_validate_ok() {
        let schema = DatasetSchema::customer_value();
        assert!(schema.validate(&sample_df()).is_ok());
    }

    #[test]
    fn test_validate_reports_all_missing() {
        let df = df!("user_id" => &["u001"], "n_orders" => &[1i32]).unwrap();
        let schema = DatasetSchema::customer_value();
        let err = schema.validate(&df).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("country"), "missing column should be named: {}", msg);
        assert!(msg.contains("total_amount"), "missing column should be named: {}", msg);
    }

    #[test]
    fn test_derive_label_threshold() {
        let schema = DatasetSchema::customer_value();
        let labeled = schema.derive_label(&sample_df()).unwrap();
        let y = schema.extract_label(&labeled).unwrap();
        // 12.5 -> 0, 88.0 -> 1, 50.0 -> 0 (strict inequality)
        assert_eq!(y.to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_derive_label_null_amount_rejected() {
        let df = df!(
            "user_id" => &["u001", "u002"],
            "country" => &["US", "GB"],
            "n_orders" => &[3i32, 7],
            "total_amount" => &[Some(12.5), None]
        )
        .unwrap();

        let schema = DatasetSchema::customer_value();
        let err = schema.derive_label(&df).unwrap_err();
        let msg = err.to_string();
        assert!(
            msg.contains("total_amount"),
            "error should name the null column: {}",
            msg
        );
    }

    #[test]
    fn test_feature_columns_exclude_id_and_label_source() {
        let schema = DatasetSchema::customer_value();
        let features = schema.feature_columns();
        assert_eq!(features, vec!["country".to_string(), "n_orders".to_string()]);
        assert!(!features.contains(&"user_id".to_string()));
        assert!(!features.contains(&"total_amount".to_string()));
    }
}
