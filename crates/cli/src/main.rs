//! edactl - EDA transaction client
//!
//! Main entry point for the command-line tool.

use std::process::ExitCode;

use clap::Parser;
use edactl::utils::logging;
use edactl::{commands, AppContext, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before logging so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();
    logging::init(cli.log_json);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Could not load .env file"),
    }

    let outcome = match AppContext::load(cli.config.as_deref()) {
        Ok(context) => commands::run(&context, cli.command).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "edactl failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
