//! Command handlers
//!
//! Each handler prints its result as JSON on stdout. [`run`] times the
//! handler and logs the outcome.

pub mod apply;
pub mod details;
pub mod token;

use std::process::ExitCode;
use std::time::Instant;

use tracing::debug;

use crate::cli::Command;
use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// Dispatch `command` and map its outcome to a process exit code.
pub async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<ExitCode> {
    let name = command_name(&command);
    let start = Instant::now();

    let result = match command {
        Command::Token => token::run(ctx).await,
        Command::Apply { file, op, dry_run, description } => {
            apply::run(ctx, &file, op.into(), dry_run, description).await
        }
        Command::Details { id } => details::run(ctx, &id).await,
    };

    let success = result.is_ok();
    log_command_execution(name, start.elapsed(), success);
    if let Err(e) = &result {
        debug!(command = name, error_type = error_label(e), "command returned an error");
    }

    result
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Token => "token",
        Command::Apply { .. } => "apply",
        Command::Details { .. } => "details",
    }
}

/// Print a value as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
