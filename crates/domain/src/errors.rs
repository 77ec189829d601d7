//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Step of the token exchange that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStage {
    /// Password grant against the administrative realm.
    AdminToken,
    /// Listing clients in the application realm.
    ClientLookup,
    /// Fetching the application client's secret.
    SecretFetch,
    /// Password grant against the application realm.
    AppToken,
}

impl AuthStage {
    /// Stable label for logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdminToken => "admin_token",
            Self::ClientLookup => "client_lookup",
            Self::SecretFetch => "secret_fetch",
            Self::AppToken => "app_token",
        }
    }
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the EDA client
///
/// A transaction that the controller rejects (`success == false`) is not an
/// error; it is reported through [`crate::CommitResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdaError {
    /// A resource lacks the identity fields required to enter a transaction.
    #[error("Validation error: {0}")]
    Validation(String),

    /// One of the token exchange steps failed.
    #[error("Authentication failed at stage {stage}: {message}")]
    Auth { stage: AuthStage, message: String },

    /// Submit or detail fetch returned a non-success HTTP status.
    #[error("Controller returned status {status}: {body}")]
    Commit { status: u16, body: String },

    /// The controller answered with success but the body broke the contract.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// An operation was invoked out of order.
    #[error("Invalid state: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EdaError {
    /// Shorthand for [`EdaError::Auth`].
    pub fn auth(stage: AuthStage, message: impl Into<String>) -> Self {
        Self::Auth { stage, message: message.into() }
    }

    /// Stable label suitable for structured logging.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Auth { .. } => "auth",
            Self::Commit { .. } => "commit",
            Self::Protocol(_) => "protocol",
            Self::State(_) => "state",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether a caller-driven retry of the whole operation can succeed.
    ///
    /// The client never retries on its own; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Auth { .. } => true,
            Self::Commit { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Validation(_)
            | Self::Protocol(_)
            | Self::State(_)
            | Self::Config(_)
            | Self::Internal(_) => false,
        }
    }
}

/// Result type alias for EDA client operations
pub type Result<T> = std::result::Result<T, EdaError>;
