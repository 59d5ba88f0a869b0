//! Cluster resource in 2024-06-10-preview
//!
//! Carries no node drain timeout, etcd encryption, image registry or
//! authorized CIDRs; normalize leaves those canonical fields untouched.

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::cluster as internal;
use crate::api::enums::{ProvisioningState, Visibility};
use crate::api::field::FieldErrors;
use crate::api::optional::{required_to_optional, required_to_optional_or_none};
use crate::api::visibility::{Shape, VisibilityEntry, VisibilityMap};
use crate::versions::common::{
    normalize_identity, set, ClusterAutoscalingProfile, ConsoleProfile, DnsProfile,
    ManagedServiceIdentity, NetworkProfile, PlatformProfile, TrackedResource, VersionProfile,
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
    ("properties.version.id", "read create", Shape::Value),
    ("properties.dns", "read create update", Shape::Object),
    ("properties.dns.baseDomain", "read", Shape::Value),
    ("properties.dns.baseDomainPrefix", "read create", Shape::Value),
    ("properties.network", "read create", Shape::Object),
    ("properties.console", "read", Shape::Object),
    ("properties.api", "read create update", Shape::Object),
    ("properties.api.url", "read", Shape::Value),
    ("properties.api.visibility", "read create", Shape::Value),
    ("properties.platform", "read create", Shape::Object),
    (
        "properties.platform.operatorsAuthentication.userAssignedIdentities.controlPlaneOperators",
        "read create",
        Shape::Map,
    ),
    (
        "properties.platform.operatorsAuthentication.userAssignedIdentities.dataPlaneOperators",
        "read create",
        Shape::Map,
    ),
    ("properties.platform.issuerUrl", "read", Shape::Value),
    ("properties.autoscaling", "read create update", Shape::Object),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftClusterProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<ClusterAutoscalingProfile>,
}

/// An OpenShift cluster as exchanged with 2024-06-10-preview clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HcpOpenShiftCluster {
    #[serde(flatten)]
    pub resource: TrackedResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HcpOpenShiftClusterProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
}

impl VersionedResource for HcpOpenShiftCluster {
    type Internal = internal::HcpOpenShiftCluster;

    fn set_default_values(&mut self) {
        let properties = self.properties.get_or_insert_with(Default::default);
        properties
            .version
            .get_or_insert_with(Default::default)
            .channel_group
            .get_or_insert_with(|| internal::DEFAULT_CHANNEL_GROUP.to_string());
        properties
            .network
            .get_or_insert_with(Default::default)
            .set_default_values();
        properties
            .api
            .get_or_insert_with(Default::default)
            .visibility
            .get_or_insert(Visibility::Public);
        properties
            .platform
            .get_or_insert_with(Default::default)
            .set_default_values();
        properties
            .autoscaling
            .get_or_insert_with(Default::default)
            .set_default_values();
    }

    fn normalize(&self, out: &mut Self::Internal) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.resource.normalize(&mut out.resource, &mut errors);

        if let Some(p) = &self.properties {
            let customer = &mut out.customer_properties;
            let service = &mut out.service_provider_properties;
            set(&p.provisioning_state, &mut service.provisioning_state);
            if let Some(version) = &p.version {
                version.normalize(&mut customer.version);
            }
            if let Some(dns) = &p.dns {
                dns.normalize(&mut customer.dns, &mut service.dns);
            }
            if let Some(network) = &p.network {
                network.normalize(&mut customer.network);
            }
            if let Some(console) = &p.console {
                set(&console.url, &mut service.console.url);
            }
            if let Some(api) = &p.api {
                set(&api.url, &mut service.api.url);
                set(&api.visibility, &mut customer.api.visibility);
            }
            if let Some(platform) = &p.platform {
                platform.normalize(&mut customer.platform, &mut service.platform, &mut errors);
            }
            if let Some(autoscaling) = &p.autoscaling {
                autoscaling.normalize(&mut customer.autoscaling);
            }
        }

        normalize_identity(&self.identity, &mut out.identity);
        errors.into_result()
    }

    fn project(from: &Self::Internal) -> Self {
        let customer = &from.customer_properties;
        let service = &from.service_provider_properties;
        Self {
            resource: TrackedResource::project(&from.resource),
            properties: Some(HcpOpenShiftClusterProperties {
                provisioning_state: required_to_optional_or_none(service.provisioning_state),
                version: Some(VersionProfile::project(&customer.version)),
                dns: Some(DnsProfile::project(&customer.dns, &service.dns)),
                network: Some(NetworkProfile::project(&customer.network)),
                console: Some(ConsoleProfile {
                    url: required_to_optional_or_none(service.console.url.clone()),
                }),
                api: Some(ApiProfile {
                    url: required_to_optional_or_none(service.api.url.clone()),
                    visibility: required_to_optional(customer.api.visibility),
                }),
                platform: Some(PlatformProfile::project(&customer.platform, &service.platform)),
                autoscaling: Some(ClusterAutoscalingProfile::project(&customer.autoscaling)),
            }),
            identity: from.identity.as_ref().map(ManagedServiceIdentity::project),
        }
    }

    fn visibility_map() -> &'static VisibilityMap {
        static MAP: OnceLock<VisibilityMap> = OnceLock::new();
        MAP.get_or_init(|| build_visibility_map("v20240610preview.cluster", VISIBILITY))
    }
}
