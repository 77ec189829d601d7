//! Transaction wire shapes
//!
//! A transaction is an ordered list of operations (`crs`) applied by the
//! controller in insertion order. Each operation serializes as
//! `{"type": {"<kind>": ...}}` with exactly one kind populated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::field::Field;
use super::resource::GroupVersionKind;
use crate::errors::EdaError;

/// The four mutation kinds the controller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Replace,
    Modify,
    Delete,
}

impl OperationKind {
    pub const ALL: [Self; 4] = [Self::Create, Self::Replace, Self::Modify, Self::Delete];

    /// Wire name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Replace => "replace",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                EdaError::Validation(format!(
                    "unknown operation `{s}` (expected create, replace, modify or delete)"
                ))
            })
    }
}

/// Serialized resource content carried by create/replace/modify.
///
/// Always a JSON object; identity fields are checked before construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceContent(Map<String, Value>);

impl ResourceContent {
    /// Wrap an already-validated JSON object.
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn metadata_field(&self, key: &str) -> Option<&str> {
        self.0.get("metadata").and_then(|meta| meta.get(key)).and_then(Value::as_str)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.str_field("apiVersion")
    }

    pub fn kind(&self) -> Option<&str> {
        self.str_field("kind")
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata_field("name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata_field("namespace")
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Minimal identity of a resource to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRef {
    pub gvk: GroupVersionKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// One typed mutation within a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create(ResourceContent),
    Replace(ResourceContent),
    Modify(ResourceContent),
    Delete(DeleteRef),
}

impl Operation {
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Create(_) => OperationKind::Create,
            Self::Replace(_) => OperationKind::Replace,
            Self::Modify(_) => OperationKind::Modify,
            Self::Delete(_) => OperationKind::Delete,
        }
    }

    /// Name of the targeted resource.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Create(content) | Self::Replace(content) | Self::Modify(content) => {
                content.name()
            }
            Self::Delete(target) => Some(&target.name),
        }
    }
}

#[derive(Serialize)]
struct WireValue<'a> {
    value: &'a ResourceContent,
}

#[derive(Default, Serialize)]
struct WireType<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    create: Option<WireValue<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replace: Option<WireValue<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modify: Option<WireValue<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<&'a DeleteRef>,
}

#[derive(Serialize)]
struct WireCr<'a> {
    #[serde(rename = "type")]
    kind: WireType<'a>,
}

impl Serialize for Operation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut kind = WireType::default();
        match self {
            Self::Create(value) => kind.create = Some(WireValue { value }),
            Self::Replace(value) => kind.replace = Some(WireValue { value }),
            Self::Modify(value) => kind.modify = Some(WireValue { value }),
            Self::Delete(target) => kind.delete = Some(target),
        }
        WireCr { kind }.serialize(serializer)
    }
}

/// How much detail the controller retains for a transaction result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultType {
    #[default]
    Normal,
    ErrorsOnly,
    Debug,
}

/// An ordered batch of operations submitted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub crs: Vec<Operation>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub dry_run: Field<bool>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub retain: Field<bool>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub result_type: Field<ResultType>,
}

impl Transaction {
    pub fn len(&self) -> usize {
        self.crs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crs.is_empty()
    }
}

/// Identifier assigned by the controller on submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for TransactionId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// Canonical decimal text becomes `Number`; anything else, including
/// zero-padded digits, stays `Text` so it reaches the controller unchanged.
impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        match value.parse::<u64>() {
            Ok(id) if id.to_string() == value => Self::Number(id),
            _ => Self::Text(value.to_string()),
        }
    }
}

/// Body of a successful submit response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub id: Option<TransactionId>,
}

/// Outcome reported by the controller for a committed transaction.
///
/// `state` is controller vocabulary and is not interpreted. Fields beyond
/// the recognized set are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub state: String,
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub general_errors: Vec<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of a commit cycle.
///
/// A rejected transaction (`success == false`) is a normal result carrying
/// the controller's error strings, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub id: TransactionId,
    pub state: String,
    pub success: bool,
    pub errors: Vec<String>,
}

impl CommitResult {
    /// Build the result from resolved details.
    pub fn from_details(id: TransactionId, details: TransactionDetails) -> Self {
        let errors = if details.success { Vec::new() } else { details.general_errors };
        Self { id, state: details.state, success: details.success, errors }
    }
}
