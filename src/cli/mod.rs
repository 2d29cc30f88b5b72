//! Command-line interface
//!
//! Four subcommands covering the full workflow: `sample` to generate a
//! synthetic dataset, `train` to fit and evaluate against the baseline,
//! `predict` to score new data with a saved run, and `report` to print a
//! run's markdown report.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::EvalConfig;
use crate::data::{sample, DataLoader, DatasetSchema};
use crate::evaluation::BaselineEvaluator;
use crate::run::RunStore;

#[derive(Parser)]
#[command(name = "ml-baseline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Baseline evaluation pipeline for customer-value classification")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic customer dataset
    Sample {
        /// Number of rows to generate
        #[arg(short, long, default_value = "100")]
        rows: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output CSV path
        #[arg(short, long, default_value = "data/customers.csv")]
        output: PathBuf,
    },

    /// Train the model, evaluate it against the majority baseline, and save
    /// the run artifacts
    Train {
        /// Input data file (CSV or JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Holdout fraction
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Random seed for the split
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// L2 regularization strength
        #[arg(long, default_value = "1.0")]
        alpha: f64,

        /// Root directory for run artifacts
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Score new data with a saved run
    Predict {
        /// Run id, or "latest"
        #[arg(short, long, default_value = "latest")]
        run: String,

        /// Input data file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path for predictions
        #[arg(short, long, default_value = "predictions.csv")]
        output: PathBuf,

        /// Root directory holding run artifacts
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the markdown report for a saved run
    Report {
        /// Run id, or "latest"
        #[arg(short, long, default_value = "latest")]
        run: String,

        /// Root directory holding run artifacts
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

pub fn cmd_sample(rows: usize, seed: u64, output: &Path) -> anyhow::Result<()> {
    let df = sample::generate(rows, seed)?;
    DataLoader::write_csv(&df, output)?;

    println!("Wrote {} rows to {}", df.height(), output.display());
    Ok(())
}

pub fn cmd_train(
    data: &Path,
    test_size: f64,
    seed: u64,
    alpha: f64,
    output: &Path,
) -> anyhow::Result<()> {
    let df = DataLoader::load_auto(data)?;

    let schema = DatasetSchema::customer_value();
    schema.validate(&df)?;

    let config = EvalConfig::default()
        .with_test_size(test_size)
        .with_seed(seed)
        .with_l2_alpha(alpha);

    let evaluator = BaselineEvaluator::new(config.clone(), schema.clone());
    let outcome = evaluator.evaluate(&df)?;

    let store = RunStore::new(output);
    let run_id = store.save(&outcome, &schema, &config)?;

    println!("{}", outcome.report.to_markdown());
    println!("Run saved: {}", run_id);
    Ok(())
}

pub fn cmd_predict(run: &str, input: &Path, output: &Path, root: &Path) -> anyhow::Result<()> {
    let df = DataLoader::load_auto(input)?;

    let store = RunStore::new(root);
    let predictions = store.predict(run, &df)?;
    DataLoader::write_csv(&predictions, output)?;

    println!(
        "Wrote {} predictions to {}",
        predictions.height(),
        output.display()
    );
    Ok(())
}

pub fn cmd_report(run: &str, root: &Path) -> anyhow::Result<()> {
    let store = RunStore::new(root);
    let run_dir = store.resolve(run)?;
    let report = store.load_report(&run_dir)?;

    println!("{}", report);
    Ok(())
}
