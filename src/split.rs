//! Seeded stratified train/test splitting

use crate::config::EvalConfig;
use crate::error::{BaselineError, Result};
use ndarray::Array1;
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Row indices of the two partitions. Disjoint; their union covers every row.
#[derive(Debug, Clone)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl SplitIndices {
    /// Materialize the partitions as DataFrames
    pub fn apply(&self, df: &DataFrame) -> Result<(DataFrame, DataFrame)> {
        let train = take_rows(df, &self.train)?;
        let test = take_rows(df, &self.test)?;
        Ok((train, test))
    }
}

fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx: IdxCa = IdxCa::from_vec("idx".into(), indices.iter().map(|&i| i as IdxSize).collect());
    df.take(&idx)
        .map_err(|e| BaselineError::DataError(e.to_string()))
}

/// Stratified seeded split of row indices by binary label.
///
/// Indices are grouped by class, each group is shuffled with a ChaCha8 RNG
/// seeded from the config, and `round(class_len * test_size)` indices per class
/// go to test (clamped so a class with at least two members keeps at least one
/// on each side). Classes are visited in sorted order so the assignment is
/// identical across runs for the same seed and input.
pub fn train_test_split(y: &Array1<f64>, config: &EvalConfig) -> Result<SplitIndices> {
    let n = y.len();
    if n == 0 {
        return Err(BaselineError::DataError("cannot split an empty dataset".to_string()));
    }

    // Group indices by class label; BTreeMap keeps class order deterministic
    let mut class_indices: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        class_indices.entry(label.round() as i64).or_default().push(i);
    }

    if class_indices.len() < 2 {
        return Err(BaselineError::DegenerateLabel(format!(
            "found {} label class(es); stratified split requires at least two",
            class_indices.len()
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for indices in class_indices.values() {
        let mut shuffled = indices.clone();
        if config.stratified {
            shuffled.shuffle(&mut rng);
        }

        let class_len = shuffled.len();
        let mut n_test = (class_len as f64 * config.test_size).round() as usize;
        if class_len >= 2 {
            n_test = n_test.clamp(1, class_len - 1);
        } else {
            n_test = 0; // a singleton class stays in train
        }

        test_indices.extend_from_slice(&shuffled[..n_test]);
        train_indices.extend_from_slice(&shuffled[n_test..]);
    }

    if train_indices.is_empty() || test_indices.is_empty() {
        return Err(BaselineError::DataError(
            "split resulted in an empty train or test partition".to_string(),
        ));
    }

    // Stable row order within each partition
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    tracing::info!(
        n_train = train_indices.len(),
        n_test = test_indices.len(),
        seed = config.seed,
        "stratified split complete"
    );

    Ok(SplitIndices {
        train: train_indices,
        test: test_indices,
    })
}
