//! # edactl
//!
//! Command-line front end for the EDA transaction client.
//!
//! This crate contains:
//! - Argument parsing
//! - Application context (configuration and client wiring)
//! - Commands: `token`, `apply`, `details`
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - `anyhow` is only used at this boundary

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Command};
pub use context::AppContext;
