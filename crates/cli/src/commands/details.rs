//! `edactl details <id>`

use std::process::ExitCode;

use eda_domain::TransactionId;

use super::print_json;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, id: &str) -> anyhow::Result<ExitCode> {
    let mut client = ctx.transaction_client()?;
    let details = client.get_transaction_details(&TransactionId::from(id)).await?;
    print_json(&details)?;

    Ok(if details.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
