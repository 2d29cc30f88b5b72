//! Seeded synthetic customer data

use crate::error::{BaselineError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const COUNTRIES: [&str; 3] = ["US", "GB", "CA"];

/// Generate `n` synthetic customer rows with a seeded RNG.
///
/// Columns match the input schema: `user_id` (`u001`, `u002`, ...), `country`
/// drawn uniformly from {US, GB, CA}, `n_orders` in 1..10, `total_amount`
/// uniform in 10..100 rounded to cents.
pub fn generate(n: usize, seed: u64) -> Result<DataFrame> {
    if n == 0 {
        return Err(BaselineError::DataError("cannot generate 0 rows".to_string()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let user_ids: Vec<String> = (1..=n).map(|i| format!("u{:03}", i)).collect();
    let countries: Vec<&str> = (0..n)
        .map(|_| COUNTRIES[rng.gen_range(0..COUNTRIES.len())])
        .collect();
    let n_orders: Vec<i32> = (0..n).map(|_| rng.gen_range(1..10)).collect();
    let total_amounts: Vec<f64> = (0..n)
        .map(|_| (rng.gen_range(10.0..100.0) * 100.0_f64).round() / 100.0)
        .collect();

    df!(
        "user_id" => user_ids,
        "country" => countries,
        "n_orders" => n_orders,
        "total_amount" => total_amounts
    )
    .map_err(|e| BaselineError::DataError(e.to_string()))
}

/// Generate a dataset with an exact positive/negative count against the
/// default $50 label threshold. Positives get `total_amount` in 51..100 and
/// `n_orders` in 6..10; negatives get `total_amount` in 10..50 and `n_orders`
/// in 1..6, so order count carries real signal about the label. Row order is
/// shuffled so class is independent of position.
pub fn generate_balanced(n_positive: usize, n_negative: usize, seed: u64) -> Result<DataFrame> {
    let n = n_positive + n_negative;
    if n == 0 {
        return Err(BaselineError::DataError("cannot generate 0 rows".to_string()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut rows: Vec<(f64, i32)> = Vec::with_capacity(n);
    for _ in 0..n_positive {
        let amount = (rng.gen_range(51.0..100.0) * 100.0_f64).round() / 100.0;
        rows.push((amount, rng.gen_range(6..10)));
    }
    for _ in 0..n_negative {
        let amount = (rng.gen_range(10.0..50.0) * 100.0_f64).round() / 100.0;
        rows.push((amount, rng.gen_range(1..6)));
    }
    rows.shuffle(&mut rng);

    let user_ids: Vec<String> = (1..=n).map(|i| format!("u{:03}", i)).collect();
    let countries: Vec<&str> = (0..n)
        .map(|_| COUNTRIES[rng.gen_range(0..COUNTRIES.len())])
        .collect();
    let amounts: Vec<f64> = rows.iter().map(|(a, _)| *a).collect();
    let n_orders: Vec<i32> = rows.iter().map(|(_, o)| *o).collect();

    df!(
        "user_id" => user_ids,
        "country" => countries,
        "n_orders" => n_orders,
        "total_amount" => amounts
    )
    .map_err(|e| BaselineError::DataError(e.to_string()))
}
