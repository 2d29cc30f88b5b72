//! One-hot encoding of categorical features

use crate::error::{BaselineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One-hot encoder with category sets fixed at fit time.
///
/// Each fitted column is replaced by one 0/1 column per training category,
/// named `{column}_{category}`. Categories not seen at fit time encode as
/// all zeros; the training category set is never extended at transform time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Sorted category lists per column, fixed from the training partition
    categories: HashMap<String, Vec<String>>,
    /// Column order as passed to fit, so output columns are stable
    column_order: Vec<String>,
    is_fitted: bool,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            categories: HashMap::new(),
            column_order: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fix the category set for each column from the given data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.categories.clear();
        self.column_order = columns.iter().map(|c| c.to_string()).collect();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| BaselineError::FeatureNotFound(col_name.to_string()))?;
            let ca = column
                .str()
                .map_err(|e| BaselineError::DataError(e.to_string()))?;

            let mut cats: Vec<String> = ca
                .into_iter()
                .flatten()
                .map(|s| s.to_string())
                .collect();
            cats.sort_unstable();
            cats.dedup();

            self.categories.insert(col_name.to_string(), cats);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace each fitted column with its indicator columns
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(BaselineError::ModelNotFitted);
        }

        let mut result = df.clone();
        for col_name in &self.column_order {
            let cats = self
                .categories
                .get(col_name)
                .ok_or_else(|| BaselineError::FeatureNotFound(col_name.clone()))?;

            let column = result
                .column(col_name)
                .map_err(|_| BaselineError::FeatureNotFound(col_name.clone()))?;
            let values: Vec<Option<String>> = column
                .str()
                .map_err(|e| BaselineError::DataError(e.to_string()))?
                .into_iter()
                .map(|opt| opt.map(|s| s.to_string()))
                .collect();

            for cat in cats {
                let indicator: Vec<f64> = values
                    .iter()
                    .map(|opt| match opt {
                        Some(v) if v == cat => 1.0,
                        _ => 0.0,
                    })
                    .collect();
                let name = Self::output_name(col_name, cat);
                let series = Series::new(name.as_str().into(), indicator);
                result
                    .with_column(series)
                    .map_err(|e| BaselineError::DataError(e.to_string()))?;
            }

            result = result
                .drop(col_name)
                .map_err(|e| BaselineError::DataError(e.to_string()))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Names of the indicator columns produced for the fitted columns
    pub fn output_columns(&self) -> Vec<String> {
        self.column_order
            .iter()
            .flat_map(|col| {
                self.categories
                    .get(col)
                    .map(|cats| {
                        cats.iter()
                            .map(|cat| Self::output_name(col, cat))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
            .collect()
    }

    fn output_name(col: &str, cat: &str) -> String {
        format!("{}_{}", col, cat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform_basic() {
        let df = df!("country" => &["US", "GB", "US", "CA"]).unwrap();

        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["country"]).unwrap();

        // source column dropped, one indicator per category (sorted)
        assert!(result.column("country").is_err());
        let ca = result.column("country_CA").unwrap().f64().unwrap().clone();
        assert_eq!(ca.get(3), Some(1.0));
        assert_eq!(ca.get(0), Some(0.0));
        assert_eq!(
            encoder.output_columns(),
            vec!["country_CA", "country_GB", "country_US"]
        );
    }

    #[test]
    fn test_unseen_category_all_zeros() {
        let train = df!("country" => &["US", "GB"]).unwrap();
        let test = df!("country" => &["DE"]).unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&train, &["country"]).unwrap();
        let result = encoder.transform(&test).unwrap();

        // unseen category encodes as all zeros; no new column appears
        assert!(result.column("country_DE").is_err());
        for col in ["country_GB", "country_US"] {
            let v = result.column(col).unwrap().f64().unwrap().get(0).unwrap();
            assert_eq!(v, 0.0, "{} should be 0 for unseen category", col);
        }
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let df = df!("country" => &["US"]).unwrap();
        let encoder = OneHotEncoder::new();
        assert!(matches!(
            encoder.transform(&df),
            Err(BaselineError::ModelNotFitted)
        ));
    }
}
