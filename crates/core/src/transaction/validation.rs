//! Resource validation
//!
//! Checks run on the serialized form of a resource, so typed and untyped
//! resources are held to the same rules:
//! 1. The value must serialize to a JSON object
//! 2. `apiVersion`, `kind` and `metadata.name` must be non-empty strings
//! 3. Deletes additionally need a splittable `apiVersion`
//!
//! Nothing here touches the network.

use eda_domain::{
    DeleteRef, EdaError, GroupVersionKind, Operation, OperationKind, ResourceContent, Result,
};
use serde::Serialize;
use serde_json::Value;

/// Serialize a resource and check its identity fields.
///
/// # Errors
/// Returns `EdaError::Validation` if the resource does not serialize to an
/// object or lacks `apiVersion`, `kind` or `metadata.name`.
pub fn to_content<R: Serialize + ?Sized>(resource: &R) -> Result<ResourceContent> {
    let value = serde_json::to_value(resource)
        .map_err(|e| EdaError::Validation(format!("resource is not serializable: {e}")))?;

    let Value::Object(object) = value else {
        return Err(EdaError::Validation(format!(
            "resource must serialize to an object, got {}",
            json_type(&value)
        )));
    };

    let content = ResourceContent::new(object);
    require("apiVersion", content.api_version())?;
    require("kind", content.kind())?;
    require("metadata.name", content.name())?;
    Ok(content)
}

/// Reduce validated content to the identity needed for a delete.
///
/// # Errors
/// Returns `EdaError::Validation` if `apiVersion` cannot be split into group
/// and version.
pub fn to_delete_ref(content: &ResourceContent) -> Result<DeleteRef> {
    let api_version = require("apiVersion", content.api_version())?;
    let kind = require("kind", content.kind())?;
    let name = require("metadata.name", content.name())?;

    Ok(DeleteRef {
        gvk: GroupVersionKind::from_api_version(api_version, kind)?,
        name: name.to_string(),
        namespace: content.namespace().filter(|ns| !ns.is_empty()).map(str::to_string),
    })
}

/// Build the operation of the given kind for a resource.
///
/// # Errors
/// Returns `EdaError::Validation` when the resource fails the checks above.
pub fn to_operation<R: Serialize + ?Sized>(resource: &R, kind: OperationKind) -> Result<Operation> {
    let content = to_content(resource)?;
    Ok(match kind {
        OperationKind::Create => Operation::Create(content),
        OperationKind::Replace => Operation::Replace(content),
        OperationKind::Modify => Operation::Modify(content),
        OperationKind::Delete => Operation::Delete(to_delete_ref(&content)?),
    })
}

fn require<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(EdaError::Validation(format!("resource field `{field}` is empty"))),
        None => Err(EdaError::Validation(format!("resource is missing `{field}`"))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
