//! `interfaces.eda.nokia.com/v1alpha1`

use serde::{Deserialize, Serialize};

use crate::types::{ApiObject, Field, ObjectMeta};

pub const API_VERSION: &str = "interfaces.eda.nokia.com/v1alpha1";
pub const INTERFACE_KIND: &str = "Interface";

/// Physical or LAG interface spanning one or more node ports.
pub type Interface = ApiObject<InterfaceSpec>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSpec {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub enabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub mtu: Field<u32>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub encap_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub lldp: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub members: Field<Vec<InterfaceMember>>,
}

/// One node port belonging to an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceMember {
    pub node: String,
    pub interface: String,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub enabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
}

impl InterfaceMember {
    pub fn new(node: impl Into<String>, interface: impl Into<String>) -> Self {
        Self { node: node.into(), interface: interface.into(), ..Default::default() }
    }
}

impl ApiObject<InterfaceSpec> {
    /// An interface with the given spec.
    pub fn interface(metadata: ObjectMeta, spec: InterfaceSpec) -> Self {
        Self::new(API_VERSION, INTERFACE_KIND, metadata, spec)
    }
}
