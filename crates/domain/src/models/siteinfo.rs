//! `siteinfo.eda.nokia.com/v1alpha1`

use serde::{Deserialize, Serialize};

use crate::types::{ApiObject, Field, ObjectMeta};

pub const API_VERSION: &str = "siteinfo.eda.nokia.com/v1alpha1";
pub const BANNER_KIND: &str = "Banner";

/// Login banner pushed to selected nodes.
pub type Banner = ApiObject<BannerSpec>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerSpec {
    /// Message of the day
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub motd: Field<String>,
    /// Banner shown before login
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub login_banner: Field<String>,
    /// Label selectors picking the target nodes
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub node_selector: Field<Vec<String>>,
    /// Explicit node names
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub nodes: Field<Vec<String>>,
}

impl ApiObject<BannerSpec> {
    /// A banner with the given message of the day.
    pub fn banner(metadata: ObjectMeta, motd: impl Into<String>) -> Self {
        Self::new(
            API_VERSION,
            BANNER_KIND,
            metadata,
            BannerSpec { motd: Field::Set(motd.into()), ..Default::default() },
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_only_set_fields() {
        let mut banner = Banner::banner(
            ObjectMeta::namespaced("clab-vlan", "banner").with_label("app", "banner"),
            "Let's have some model driven automation going on!",
        );
        if let Some(spec) = banner.spec.as_mut() {
            spec.node_selector.set(vec!["containerlab=managed".into()]);
        }

        assert_eq!(
            serde_json::to_value(&banner).unwrap(),
            json!({
                "apiVersion": "siteinfo.eda.nokia.com/v1alpha1",
                "kind": "Banner",
                "metadata": {
                    "name": "banner",
                    "namespace": "clab-vlan",
                    "labels": { "app": "banner" }
                },
                "spec": {
                    "motd": "Let's have some model driven automation going on!",
                    "nodeSelector": ["containerlab=managed"]
                }
            })
        );
    }
}
