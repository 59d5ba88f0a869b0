use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::cluster::DEFAULT_CHANNEL_GROUP;
use crate::api::enums::ProvisioningState;
use crate::api::field::FieldErrors;
use crate::api::node_pool as internal;
use crate::api::optional::{required_to_optional, required_to_optional_or_none};
use crate::api::visibility::{Shape, VisibilityEntry, VisibilityMap};
use crate::versions::common::{
    normalize_auto_scaling, normalize_identity, normalize_labels, normalize_taints,
    project_auto_scaling, project_labels, project_taints, set, Label, ManagedServiceIdentity,
    NodePoolAutoScaling, NodePoolPlatformProfile, NodePoolVersionProfile, Taint, TrackedResource,
};
use crate::versions::{build_visibility_map, VersionedResource};

pub(super) const VISIBILITY: &[VisibilityEntry] = &[
    ("id", "read nocase", Shape::Value),
    ("name", "read", Shape::Value),
    ("type", "read nocase", Shape::Value),
    ("systemData", "read", Shape::Object),
    ("location", "read create nocase", Shape::Value),
    ("tags", "read create update", Shape::Map),
    ("identity", "read create update", Shape::Object),
    ("identity.principalId", "read", Shape::Value),
    ("identity.tenantId", "read", Shape::Value),
    ("identity.userAssignedIdentities", "read create update", Shape::Map),
    ("identity.userAssignedIdentities.clientId", "read", Shape::Value),
    ("identity.userAssignedIdentities.principalId", "read", Shape::Value),
    ("properties", "read create update", Shape::Object),
    ("properties.provisioningState", "read", Shape::Value),
    ("properties.version", "read create update", Shape::Object),
    ("properties.platform", "read create", Shape::Object),
    ("properties.replicas", "read create update", Shape::Value),
    ("properties.autoRepair", "read create", Shape::Value),
    ("properties.autoScaling", "read create update", Shape::Object),
    ("properties.labels", "read create update", Shape::List),
    ("properties.taints", "read create update", Shape::List),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<NodePoolVersionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<NodePoolPlatformProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_repair: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<NodePoolAutoScaling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Option<Label>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<Option<Taint>>>,
}

/// A node pool as exchanged with 2024-06-10-preview clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HcpOpenShiftClusterNodePool {
    #[serde(flatten)]
    pub resource: TrackedResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<NodePoolProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
}

impl VersionedResource for HcpOpenShiftClusterNodePool {
    type Internal = internal::HcpOpenShiftClusterNodePool;

    fn set_default_values(&mut self) {
        let properties = self.properties.get_or_insert_with(Default::default);
        properties
            .version
            .get_or_insert_with(Default::default)
            .channel_group
            .get_or_insert_with(|| DEFAULT_CHANNEL_GROUP.to_string());
        properties
            .platform
            .get_or_insert_with(Default::default)
            .set_default_values();
        properties.auto_repair.get_or_insert(true);
    }

    fn normalize(&self, out: &mut Self::Internal) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.resource.normalize(&mut out.resource, &mut errors);

        if let Some(p) = &self.properties {
            let target = &mut out.properties;
            set(&p.provisioning_state, &mut target.provisioning_state);
            if let Some(version) = &p.version {
                version.normalize(&mut target.version);
            }
            if let Some(platform) = &p.platform {
                platform.normalize(&mut target.platform, &mut errors);
            }
            set(&p.replicas, &mut target.replicas);
            set(&p.auto_repair, &mut target.auto_repair);
            normalize_auto_scaling(&p.auto_scaling, &mut target.auto_scaling);
            normalize_labels(&p.labels, &mut target.labels);
            normalize_taints(&p.taints, &mut target.taints);
        }

        normalize_identity(&self.identity, &mut out.identity);
        errors.into_result()
    }

    fn project(from: &Self::Internal) -> Self {
        let p = &from.properties;
        Self {
            resource: TrackedResource::project(&from.resource),
            properties: Some(NodePoolProperties {
                provisioning_state: required_to_optional_or_none(p.provisioning_state),
                version: Some(NodePoolVersionProfile::project(&p.version)),
                platform: Some(NodePoolPlatformProfile::project(&p.platform)),
                replicas: required_to_optional(p.replicas),
                auto_repair: required_to_optional(p.auto_repair),
                auto_scaling: project_auto_scaling(&p.auto_scaling),
                labels: project_labels(&p.labels),
                taints: project_taints(&p.taints),
            }),
            identity: from.identity.as_ref().map(ManagedServiceIdentity::project),
        }
    }

    fn visibility_map() -> &'static VisibilityMap {
        static MAP: OnceLock<VisibilityMap> = OnceLock::new();
        MAP.get_or_init(|| build_visibility_map("v20240610preview.nodePool", VISIBILITY))
    }
}
