//! Transaction builder
//!
//! Accumulates validated operations into the pending transaction. Operations
//! keep insertion order; the builder never deduplicates or reorders.

use eda_domain::{Field, OperationKind, Resource, Result, Transaction};
use tracing::debug;

use super::validation;

/// Holds at most one pending transaction.
///
/// The transaction is created by the first accepted operation. A description
/// or dry-run flag set before that is staged and applied on creation.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    pending: Option<Transaction>,
    description: Field<String>,
    dry_run: Field<bool>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `resource` and append it as an operation of `kind`.
    ///
    /// Creates the pending transaction on first use. A rejected resource
    /// leaves the pending transaction untouched.
    ///
    /// # Errors
    /// Returns `EdaError::Validation` if the resource lacks `apiVersion`,
    /// `kind` or `metadata.name`, or (for deletes) has a malformed
    /// `apiVersion`.
    pub fn add_operation<R: Resource + ?Sized>(
        &mut self,
        resource: &R,
        kind: OperationKind,
    ) -> Result<()> {
        let operation = validation::to_operation(resource, kind)?;
        let transaction = self.pending.get_or_insert_with(|| Transaction {
            description: std::mem::take(&mut self.description),
            dry_run: std::mem::take(&mut self.dry_run),
            ..Default::default()
        });
        debug!(
            kind = %kind,
            name = operation.name().unwrap_or_default(),
            position = transaction.len(),
            "Added operation"
        );
        transaction.crs.push(operation);
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

    /// Set the human-readable description of the pending transaction.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        match &mut self.pending {
            Some(transaction) => transaction.description.set(description),
            None => self.description.set(description),
        }
    }

    /// Mark the pending transaction as a dry run.
    pub fn set_dry_run(&mut self, dry_run: bool) {
        match &mut self.pending {
            Some(transaction) => transaction.dry_run.set(dry_run),
            None => self.dry_run.set(dry_run),
        }
    }

    /// The pending transaction, if any.
    pub fn pending(&self) -> Option<&Transaction> {
        self.pending.as_ref()
    }

    /// Number of operations in the pending transaction.
    pub fn len(&self) -> usize {
        self.pending.as_ref().map_or(0, Transaction::len)
    }

    /// `true` when no operation has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return the pending transaction.
    pub fn take(&mut self) -> Option<Transaction> {
        self.pending.take()
    }

    /// Drop the pending transaction and any staged settings.
    pub fn discard(&mut self) {
        self.description.clear();
        self.dry_run.clear();
        if let Some(transaction) = self.pending.take() {
            debug!(operations = transaction.len(), "Discarded pending transaction");
        }
    }
}
