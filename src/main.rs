mod cli_main;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;
use cli_main::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let options = cli.into_options();
    match refrectify::run_rectify(&options) {
        Ok(summary) => {
            info!(
                "Rectified {}: {} corrections, length {} -> {}",
                summary.chromosome,
                summary.corrections(),
                summary.reference_length,
                summary.output_length
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error during rectification: {}", e);
            ExitCode::FAILURE
        }
    }
}
