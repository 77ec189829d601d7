//! # EDA Domain
//!
//! Domain types for the EDA transaction client.
//!
//! This crate contains:
//! - The resource model (`ObjectMeta`, `ApiObject`, the `Resource` capability
//!   trait) and a few typed sample resources
//! - Transaction wire shapes (operations, transaction, details, commit result)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other EDA crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
