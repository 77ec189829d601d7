//! Transaction client - commit and resolve
//!
//! Owns the bearer token and the pending transaction. A commit submits the
//! pending transaction, then blocks on the details endpoint until the
//! controller reports a terminal state. A transaction the controller
//! rejects is returned as a [`CommitResult`] with `success == false`; only
//! transport and protocol failures are raised.
//!
//! The client is a single unit of work: mutating calls take `&mut self`, so
//! sharing one instance across tasks requires an external lock.

use std::sync::Arc;

use eda_domain::{
    CommitResult, EdaError, Field, OperationKind, Resource, Result, ResultType, Transaction,
    TransactionDetails, TransactionId,
};
use tracing::{debug, info, instrument, warn};

use super::builder::TransactionBuilder;
use super::ports::{AccessTokenProvider, TransactionGateway};

/// Lifecycle of a client across one commit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientState {
    /// No token acquired yet
    Unauthenticated,
    /// Token held, nothing pending
    Authenticated,
    /// Operations are being added
    Building,
    /// Transaction accepted by the controller, outcome not known
    Submitted { id: TransactionId },
    /// Controller reported a terminal state
    Resolved { id: TransactionId, success: bool },
}

/// Builds, commits and resolves transactions against one controller.
pub struct TransactionClient {
    tokens: Arc<dyn AccessTokenProvider>,
    gateway: Arc<dyn TransactionGateway>,
    token: Option<String>,
    builder: TransactionBuilder,
    state: ClientState,
}

impl std::fmt::Debug for TransactionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionClient")
            .field("has_token", &self.token.is_some())
            .field("builder", &self.builder)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TransactionClient {
    /// Create an unauthenticated client
    pub fn new(tokens: Arc<dyn AccessTokenProvider>, gateway: Arc<dyn TransactionGateway>) -> Self {
        Self {
            tokens,
            gateway,
            token: None,
            builder: TransactionBuilder::new(),
            state: ClientState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Whether a bearer token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Run the token flow and replace any held token.
    ///
    /// # Errors
    /// Propagates `EdaError::Auth` from the token provider. A previously
    /// held token is kept when re-authentication fails.
    #[instrument(skip(self))]
    pub async fn authenticate(&mut self) -> Result<()> {
        let token = self.tokens.access_token().await?;
        debug!(token_len = token.len(), "Acquired bearer token");
        self.token = Some(token);
        self.state = self.idle_state();
        Ok(())
    }

    /// Validate `resource` and append it to the pending transaction.
    ///
    /// # Errors
    /// Returns `EdaError::Validation` before any network call when the
    /// resource lacks identity fields.
    pub fn add_operation<R: Resource + ?Sized>(
        &mut self,
        resource: &R,
        kind: OperationKind,
    ) -> Result<()> {
        self.builder.add_operation(resource, kind)?;
        self.state = ClientState::Building;
        Ok(())
    }

    pub fn add_create<R: Resource + ?Sized>(&mut self, resource: &R) -> Result<()> {
        self.add_operation(resource, OperationKind::Create)
    }

    pub fn add_replace<R: Resource + ?Sized>(&mut self, resource: &R) -> Result<()> {
        self.add_operation(resource, OperationKind::Replace)
    }

    pub fn add_modify<R: Resource + ?Sized>(&mut self, resource: &R) -> Result<()> {
        self.add_operation(resource, OperationKind::Modify)
    }

    pub fn add_delete<R: Resource + ?Sized>(&mut self, resource: &R) -> Result<()> {
        self.add_operation(resource, OperationKind::Delete)
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.builder.set_description(description);
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.builder.set_dry_run(dry_run);
    }

    /// The pending transaction, if any.
    pub fn pending(&self) -> Option<&Transaction> {
        self.builder.pending()
    }

    /// Drop the pending transaction without sending it.
    pub fn discard(&mut self) {
        self.builder.discard();
        self.state = self.idle_state();
    }

    /// Submit the pending transaction and wait for its outcome.
    ///
    /// Authenticates first when no token is held. Once the submit request
    /// has been attempted the pending transaction is consumed, whatever the
    /// outcome; a failed commit is never resent.
    ///
    /// # Errors
    /// - `EdaError::State` if nothing was added (no network call is made)
    /// - `EdaError::Auth` if lazy authentication fails
    /// - `EdaError::Commit` if submit or details return a non-success status
    /// - `EdaError::Protocol` if the submit response carries no id
    #[instrument(skip(self), fields(operations = self.builder.len()))]
    pub async fn commit(&mut self) -> Result<CommitResult> {
        if self.builder.is_empty() {
            return Err(EdaError::State("commit called with no operations added".into()));
        }

        let token = self.ensure_token().await?;
        let Some(mut transaction) = self.builder.take() else {
            return Err(EdaError::Internal("pending transaction vanished before submit".into()));
        };
        transaction.retain = Field::Set(true);
        transaction.result_type = Field::Set(ResultType::Normal);

        let id = match self.submit(&token, &transaction).await {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "Transaction submit failed");
                self.state = self.idle_state();
                return Err(err);
            }
        };
        info!(id = %id, operations = transaction.len(), "Transaction submitted");
        self.state = ClientState::Submitted { id: id.clone() };

        let details = self.gateway.details(&token, &id).await?;
        info!(id = %id, state = %details.state, success = details.success, "Transaction resolved");

        let result = CommitResult::from_details(id.clone(), details);
        if !result.success {
            warn!(id = %id, errors = result.errors.len(), "Transaction rejected by controller");
        }
        self.state = ClientState::Resolved { id, success: result.success };
        Ok(result)
    }

    /// Fetch details of a committed transaction, waiting for completion.
    ///
    /// # Errors
    /// - `EdaError::Auth` if lazy authentication fails
    /// - `EdaError::Commit` on a non-success status
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get_transaction_details(
        &mut self,
        id: &TransactionId,
    ) -> Result<TransactionDetails> {
        let token = self.ensure_token().await?;
        self.gateway.details(&token, id).await
    }

    async fn submit(&self, token: &str, transaction: &Transaction) -> Result<TransactionId> {
        self.gateway
            .submit(token, transaction)
            .await?
            .id
            .ok_or_else(|| EdaError::Protocol("submit response carried no transaction id".into()))
    }

    async fn ensure_token(&mut self) -> Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        self.authenticate().await?;
        self.token
            .clone()
            .ok_or_else(|| EdaError::Internal("token missing after authentication".into()))
    }

    fn idle_state(&self) -> ClientState {
        match (&self.token, self.builder.is_empty()) {
            (_, false) => ClientState::Building,
            (Some(_), true) => ClientState::Authenticated,
            (None, true) => ClientState::Unauthenticated,
        }
    }
}
