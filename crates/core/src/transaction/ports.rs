//! Port interfaces for the transaction client

use async_trait::async_trait;
use eda_domain::{Result, SubmitResponse, Transaction, TransactionDetails, TransactionId};

/// Source of bearer tokens for the controller.
///
/// Every call performs a fresh acquisition; implementations do not cache.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Acquire an access token
    ///
    /// # Errors
    /// Returns `EdaError::Auth` naming the step of the exchange that failed.
    async fn access_token(&self) -> Result<String>;
}

/// Controller transaction API
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Submit a transaction and return the assigned identity.
    ///
    /// # Errors
    /// Returns `EdaError::Commit` on a non-success status and
    /// `EdaError::Protocol` when the body cannot be parsed.
    async fn submit(&self, token: &str, transaction: &Transaction) -> Result<SubmitResponse>;

    /// Fetch transaction details, waiting for a terminal state.
    ///
    /// # Errors
    /// Returns `EdaError::Commit` on a non-success status and
    /// `EdaError::Protocol` when the body cannot be parsed.
    async fn details(&self, token: &str, id: &TransactionId) -> Result<TransactionDetails>;
}
