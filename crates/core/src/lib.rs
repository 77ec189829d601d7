//! # EDA Core
//!
//! Transaction logic with no transport code.
//!
//! This crate contains:
//! - The transaction builder and resource validation
//! - The transaction client (commit, wait for completion, details)
//! - Port interfaces for token acquisition and the controller API
//!
//! ## Architecture Principles
//! - Only depends on `eda-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits

pub mod transaction;

pub use transaction::builder::TransactionBuilder;
pub use transaction::client::{ClientState, TransactionClient};
pub use transaction::ports::{AccessTokenProvider, TransactionGateway};
