//! Tabular data loading

use crate::error::{BaselineError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Loader for the tabular customer dataset
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row
    pub fn load_csv(path: &Path) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| BaselineError::DataError(e.to_string()))?;

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| BaselineError::DataError(e.to_string()))
    }

    /// Load a line-delimited JSON file
    pub fn load_json(path: &Path) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| BaselineError::DataError(e.to_string()))?;

        JsonReader::new(file)
            .finish()
            .map_err(|e| BaselineError::DataError(e.to_string()))
    }

    /// Detect file format from extension and load
    pub fn load_auto(path: &Path) -> Result<DataFrame> {
        let path_lower = path.to_string_lossy().to_lowercase();

        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonl") {
            Self::load_json(path)
        } else {
            Self::load_csv(path)
        }
    }

    /// Write a DataFrame to a CSV file, creating parent directories as needed
    pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        let mut out = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut out)
            .map_err(|e| BaselineError::DataError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let df = df!(
            "user_id" => &["u001", "u002"],
            "country" => &["US", "GB"],
            "n_orders" => &[3i32, 7],
            "total_amount" => &[12.5, 88.0]
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.csv");

        DataLoader::write_csv(&df, &path).unwrap();
        let loaded = DataLoader::load_csv(&path).unwrap();

        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.width(), 4);
        assert!(loaded.column("total_amount").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = DataLoader::load_csv(Path::new("/nonexistent/features.csv"));
        assert!(result.is_err());
    }
}
