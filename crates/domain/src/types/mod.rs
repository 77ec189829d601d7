//! Domain types and models

pub mod field;
pub mod resource;
pub mod transaction;

pub use field::Field;
pub use resource::{ApiObject, DynamicObject, GroupVersionKind, ObjectMeta, Resource};
pub use transaction::{
    CommitResult, DeleteRef, Operation, OperationKind, ResourceContent, ResultType, SubmitResponse,
    Transaction, TransactionDetails, TransactionId,
};
