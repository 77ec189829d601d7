//! `edactl token`

use std::process::ExitCode;

use crate::context::AppContext;

/// Run the four-step exchange and print the application token.
pub async fn run(ctx: &AppContext) -> anyhow::Result<ExitCode> {
    let manager = ctx.token_manager()?;
    let token = manager.acquire_token().await?;
    println!("{token}");
    Ok(ExitCode::SUCCESS)
}
