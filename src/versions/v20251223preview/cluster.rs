use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::cluster as internal;
use crate::api::enums::{
    ClusterImageRegistryProfileState, CustomerManagedEncryptionType,
    EtcdDataEncryptionKeyManagementModeType, ProvisioningState, Visibility,
};
use crate::api::field::FieldErrors;
use crate::api::optional::{
    optional_to_slice, required_to_optional, required_to_optional_or_none, slice_to_optional,
};
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
    ("properties.api.authorizedCidrs", "read create update", Shape::List),
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
    ("properties.etcd", "read create", Shape::Object),
    ("properties.clusterImageRegistry", "read create", Shape::Object),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Absent allows access from anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_cidrs: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KmsKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KmsEncryptionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_key: Option<KmsKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerManagedEncryptionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_type: Option<CustomerManagedEncryptionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms: Option<KmsEncryptionProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtcdDataEncryptionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_management_mode: Option<EtcdDataEncryptionKeyManagementModeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_managed: Option<CustomerManagedEncryptionProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtcdProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_encryption: Option<EtcdDataEncryptionProfile>,
}

impl EtcdProfile {
    fn set_default_values(&mut self) {
        let encryption = self.data_encryption.get_or_insert_with(Default::default);
        encryption
            .key_management_mode
            .get_or_insert(EtcdDataEncryptionKeyManagementModeType::PlatformManaged);
        if let Some(customer_managed) = encryption.customer_managed.as_mut() {
            customer_managed
                .encryption_type
                .get_or_insert(CustomerManagedEncryptionType::Kms);
        }
    }

    fn normalize(&self, out: &mut internal::EtcdProfile) {
        let Some(encryption) = &self.data_encryption else {
            return;
        };
        let target = &mut out.data_encryption;
        set(&encryption.key_management_mode, &mut target.key_management_mode);
        match &encryption.customer_managed {
            Some(customer_managed) => {
                let managed = target.customer_managed.get_or_insert_with(Default::default);
                set(&customer_managed.encryption_type, &mut managed.encryption_type);
                match &customer_managed.kms {
                    Some(kms) => {
                        let profile = managed.kms.get_or_insert_with(Default::default);
                        if let Some(key) = &kms.active_key {
                            set(&key.name, &mut profile.active_key.name);
                            set(&key.vault_name, &mut profile.active_key.vault_name);
                            set(&key.version, &mut profile.active_key.version);
                        }
                    }
                    None => managed.kms = None,
                }
            }
            None => target.customer_managed = None,
        }
    }

    fn project(from: &internal::EtcdProfile) -> Self {
        let encryption = &from.data_encryption;
        Self {
            data_encryption: Some(EtcdDataEncryptionProfile {
                key_management_mode: required_to_optional(encryption.key_management_mode),
                customer_managed: encryption.customer_managed.as_ref().map(|managed| {
                    CustomerManagedEncryptionProfile {
                        encryption_type: required_to_optional(managed.encryption_type),
                        kms: managed.kms.as_ref().map(|kms| KmsEncryptionProfile {
                            active_key: Some(KmsKey {
                                name: required_to_optional(kms.active_key.name.clone()),
                                vault_name: required_to_optional(kms.active_key.vault_name.clone()),
                                version: required_to_optional(kms.active_key.version.clone()),
                            }),
                        }),
                    }
                }),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterImageRegistryProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterImageRegistryProfileState>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_drain_timeout_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etcd: Option<EtcdProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_image_registry: Option<ClusterImageRegistryProfile>,
}

/// An OpenShift cluster as exchanged with 2025-12-23-preview clients
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
        properties
            .etcd
            .get_or_insert_with(Default::default)
            .set_default_values();
        properties
            .cluster_image_registry
            .get_or_insert_with(Default::default)
            .state
            .get_or_insert(ClusterImageRegistryProfileState::Enabled);
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
                customer.api.authorized_cidrs = optional_to_slice(api.authorized_cidrs.as_deref());
            }
            if let Some(platform) = &p.platform {
                platform.normalize(&mut customer.platform, &mut service.platform, &mut errors);
            }
            if let Some(autoscaling) = &p.autoscaling {
                autoscaling.normalize(&mut customer.autoscaling);
            }
            set(&p.node_drain_timeout_minutes, &mut customer.node_drain_timeout_minutes);
            if let Some(etcd) = &p.etcd {
                etcd.normalize(&mut customer.etcd);
            }
            if let Some(registry) = &p.cluster_image_registry {
                set(&registry.state, &mut customer.cluster_image_registry.state);
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
                    authorized_cidrs: slice_to_optional(customer.api.authorized_cidrs.as_deref()),
                }),
                platform: Some(PlatformProfile::project(&customer.platform, &service.platform)),
                autoscaling: Some(ClusterAutoscalingProfile::project(&customer.autoscaling)),
                node_drain_timeout_minutes: required_to_optional(
                    customer.node_drain_timeout_minutes,
                ),
                etcd: Some(EtcdProfile::project(&customer.etcd)),
                cluster_image_registry: Some(ClusterImageRegistryProfile {
                    state: required_to_optional(customer.cluster_image_registry.state),
                }),
            }),
            identity: from.identity.as_ref().map(ManagedServiceIdentity::project),
        }
    }

    fn visibility_map() -> &'static VisibilityMap {
        static MAP: OnceLock<VisibilityMap> = OnceLock::new();
        MAP.get_or_init(|| build_visibility_map("v20251223preview.cluster", VISIBILITY))
    }
}
