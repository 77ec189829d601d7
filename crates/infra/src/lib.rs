//! # EDA Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transport with bounded retry
//! - Keycloak token exchange (`AccessTokenProvider`)
//! - Controller transaction API (`TransactionGateway`)
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `eda-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod auth;
pub mod config;
pub mod connect;
pub mod controller;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use auth::KeycloakTokenManager;
pub use connect::connect;
pub use controller::ControllerClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
