//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eda_domain::OperationKind;

/// edactl - submit transactions to an EDA controller
#[derive(Parser, Debug)]
#[command(name = "edactl", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML or JSON configuration file
    #[arg(short, long, env = "EDA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the token exchange and print the bearer token
    Token,

    /// Apply resources from a JSON file in one transaction
    Apply {
        /// File holding one resource object or an array of resources
        #[arg(short, long)]
        file: PathBuf,

        /// Operation applied to every resource
        #[arg(long, value_enum, default_value_t = OpArg::Replace)]
        op: OpArg,

        /// Ask the controller to validate without applying
        #[arg(long)]
        dry_run: bool,

        /// Human-readable transaction description
        #[arg(long)]
        description: Option<String>,
    },

    /// Print details of a committed transaction
    Details {
        /// Transaction id returned on commit
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpArg {
    Create,
    Replace,
    Modify,
    Delete,
}

impl From<OpArg> for OperationKind {
    fn from(op: OpArg) -> Self {
        match op {
            OpArg::Create => OperationKind::Create,
            OpArg::Replace => OperationKind::Replace,
            OpArg::Modify => OperationKind::Modify,
            OpArg::Delete => OperationKind::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apply_with_defaults() {
        let cli = Cli::try_parse_from(["edactl", "apply", "-f", "banner.json"]).unwrap();
        match cli.command {
            Command::Apply { file, op, dry_run, description } => {
                assert_eq!(file, PathBuf::from("banner.json"));
                assert_eq!(op, OpArg::Replace);
                assert!(!dry_run);
                assert!(description.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "edactl", "details", "42", "--config", "eda.toml", "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("eda.toml")));
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Details { id } if id == "42"));
    }

    #[test]
    fn rejects_unknown_operation() {
        assert!(Cli::try_parse_from(["edactl", "apply", "-f", "x.json", "--op", "upsert"]).is_err());
    }

    #[test]
    fn maps_operation_kinds() {
        assert_eq!(OperationKind::from(OpArg::Delete), OperationKind::Delete);
        assert_eq!(OperationKind::from(OpArg::Modify), OperationKind::Modify);
    }
}
