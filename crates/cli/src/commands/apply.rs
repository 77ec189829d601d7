//! `edactl apply -f <file>`
//!
//! Reads one resource object or an array of resources and submits them as a
//! single transaction. A rejected transaction prints its result and exits
//! non-zero.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use eda_domain::{DynamicObject, OperationKind};
use serde_json::Value;
use tracing::info;

use super::print_json;
use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    file: &Path,
    kind: OperationKind,
    dry_run: bool,
    description: Option<String>,
) -> anyhow::Result<ExitCode> {
    let contents =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let resources =
        parse_resources(&contents).with_context(|| format!("parsing {}", file.display()))?;

    let mut client = ctx.transaction_client()?;
    for (index, resource) in resources.iter().enumerate() {
        client
            .add_operation(resource, kind)
            .with_context(|| format!("resource #{index} in {}", file.display()))?;
    }
    if dry_run {
        client.set_dry_run(true);
    }
    if let Some(description) = description {
        client.set_description(description);
    }

    info!(operations = resources.len(), %kind, dry_run, "Committing transaction");
    let result = client.commit().await?;
    print_json(&result)?;

    Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Parse a single resource object or an array of them.
pub fn parse_resources(contents: &str) -> anyhow::Result<Vec<DynamicObject>> {
    let value: Value = serde_json::from_str(contents)?;
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => bail!("expected a resource object or an array of resources"),
    };
    if items.is_empty() {
        bail!("no resources to apply");
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).with_context(|| format!("resource #{index}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use eda_domain::Resource;

    use super::*;

    const BANNER: &str = r#"{
        "apiVersion": "siteinfo.eda.nokia.com/v1alpha1",
        "kind": "Banner",
        "metadata": { "name": "demo-banner", "namespace": "clab-vlan" },
        "spec": { "motd": "managed by edactl" }
    }"#;

    #[test]
    fn parses_single_object() {
        let resources = parse_resources(BANNER).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind(), "Banner");
        assert_eq!(resources[0].name(), "demo-banner");
    }

    #[test]
    fn parses_array_in_order() {
        let second = BANNER.replace("demo-banner", "second");
        let resources = parse_resources(&format!("[{BANNER}, {second}]")).unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, ["demo-banner", "second"]);
    }

    #[test]
    fn rejects_scalars_and_empty_arrays() {
        assert!(parse_resources("42").is_err());
        assert!(parse_resources("[]").is_err());
        assert!(parse_resources("not json").is_err());
    }
}
