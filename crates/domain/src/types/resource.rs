//! Resource model
//!
//! Resources are API objects with `apiVersion`, `kind`, `metadata` and an
//! operation-specific `spec`. Typed resources are usually generated from the
//! controller's OpenAPI documents; the client only relies on the [`Resource`]
//! capability trait.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::errors::{EdaError, Result};

/// Anything that can be placed into a transaction.
///
/// Implementors must serialize to an object carrying `apiVersion`, `kind`
/// and `metadata.name`; the builder checks this on the serialized form.
pub trait Resource: Serialize {
    /// `<group>/<version>`, e.g. `interfaces.eda.nokia.com/v1alpha1`
    fn api_version(&self) -> &str;

    /// Resource kind, e.g. `Interface`
    fn kind(&self) -> &str;

    /// Object metadata
    fn metadata(&self) -> &ObjectMeta;

    /// Object name
    fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Object namespace, if namespaced
    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn api_version(&self) -> &str {
        (**self).api_version()
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn metadata(&self) -> &ObjectMeta {
        (**self).metadata()
    }
}

/// Standard object metadata.
///
/// Label and annotation maps are presence-tracked: an explicitly empty map
/// is sent, a map that was never set is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub labels: Field<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub annotations: Field<BTreeMap<String, String>>,
}

impl ObjectMeta {
    /// Metadata for a namespaced object.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: Some(namespace.into()), ..Default::default() }
    }

    /// Metadata for a cluster-scoped object.
    pub fn cluster(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.get_or_insert_default().insert(key.into(), value.into());
        self
    }

    /// Add an annotation.
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.get_or_insert_default().insert(key.into(), value.into());
        self
    }
}

/// Generic API object with a typed spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiObject<S> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S> ApiObject<S> {
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        metadata: ObjectMeta,
        spec: S,
    ) -> Self {
        Self { api_version: api_version.into(), kind: kind.into(), metadata, spec: Some(spec) }
    }
}

impl<S: Serialize> Resource for ApiObject<S> {
    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}

/// Untyped resource, e.g. read from a file.
pub type DynamicObject = ApiObject<serde_json::Value>;

/// Group, version and kind of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    /// Split `apiVersion` into group and version.
    ///
    /// `interfaces.eda.nokia.com/v1alpha1` yields group
    /// `interfaces.eda.nokia.com` and version `v1alpha1`. A bare version
    /// (`v1`) belongs to the core group and yields an empty group.
    ///
    /// # Errors
    /// Returns `EdaError::Validation` if any segment is empty or there are
    /// more than two segments.
    pub fn from_api_version(api_version: &str, kind: &str) -> Result<Self> {
        let (group, version) = match api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };

        let malformed = version.is_empty()
            || version.contains('/')
            || (api_version.contains('/') && group.is_empty());
        if malformed {
            return Err(EdaError::Validation(format!(
                "apiVersion `{api_version}` is not of the form <group>/<version>"
            )));
        }

        if kind.is_empty() {
            return Err(EdaError::Validation("kind must not be empty".into()));
        }

        Ok(Self { group: group.to_string(), version: version.to_string(), kind: kind.to_string() })
    }

    /// Reassemble the `apiVersion` string.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}
