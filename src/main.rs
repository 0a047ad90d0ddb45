//! Entry point for the locale-merge command.

use std::process::ExitCode;

use clap::Parser;
use locale_merge::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if cli.check {
        return match locale_merge::cli::check(&cli) {
            Ok(summary) if summary.has_problems() => {
                tracing::error!(
                    incomplete = summary.incomplete(),
                    failed = summary.failed(),
                    "Some locale files are missing keys"
                );
                ExitCode::FAILURE
            }
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    match locale_merge::cli::run(&cli).await {
        Ok(summary) if summary.has_failures() => {
            tracing::error!(failed = summary.failed(), "Some locale files could not be updated");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
