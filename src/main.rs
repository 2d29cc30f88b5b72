//! Baseline evaluation pipeline - entry point

use clap::Parser;
use ml_baseline::cli::{cmd_predict, cmd_report, cmd_sample, cmd_train, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ml_baseline=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { rows, seed, output } => {
            cmd_sample(rows, seed, &output)?;
        }
        Commands::Train {
            data,
            test_size,
            seed,
            alpha,
            output,
        } => {
            cmd_train(&data, test_size, seed, alpha, &output)?;
        }
        Commands::Predict {
            run,
            input,
            output,
            root,
        } => {
            cmd_predict(&run, &input, &output, &root)?;
        }
        Commands::Report { run, root } => {
            cmd_report(&run, &root)?;
        }
    }

    Ok(())
}
