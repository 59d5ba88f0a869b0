//! Canonical cluster model
//!
//! Split into the properties a customer controls and the properties the
//! service reports. Fields hold plain values; "unset" is the zero value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::arm::{ManagedServiceIdentity, TrackedResource};
use super::enums::{
    ClusterImageRegistryProfileState, CustomerManagedEncryptionType,
    EtcdDataEncryptionKeyManagementModeType, NetworkType, OutboundType, ProvisioningState,
    Visibility,
};
use super::field::FieldErrors;
use super::request::CanonicalResource;
use super::resource_id::ResourceId;
use super::validation::validate_cluster;
use crate::backend::internal_id::InternalId;

pub const DEFAULT_CHANNEL_GROUP: &str = "stable";
pub const DEFAULT_POD_CIDR: &str = "10.128.0.0/14";
pub const DEFAULT_SERVICE_CIDR: &str = "172.30.0.0/16";
pub const DEFAULT_MACHINE_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_HOST_PREFIX: i32 = 23;
pub const DEFAULT_MAX_POD_GRACE_PERIOD_SECONDS: i32 = 600;
pub const DEFAULT_MAX_NODE_PROVISION_TIME_SECONDS: i32 = 900;
pub const DEFAULT_POD_PRIORITY_THRESHOLD: i32 = -10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftCluster {
    #[serde(flatten)]
    pub resource: TrackedResource,
    pub customer_properties: CustomerProperties,
    pub service_provider_properties: ServiceProviderProperties,
    pub identity: Option<ManagedServiceIdentity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProperties {
    pub version: VersionProfile,
    pub dns: CustomerDnsProfile,
    pub network: NetworkProfile,
    pub api: CustomerApiProfile,
    pub platform: CustomerPlatformProfile,
    pub autoscaling: ClusterAutoscalingProfile,
    pub node_drain_timeout_minutes: i32,
    pub etcd: EtcdProfile,
    pub cluster_image_registry: ClusterImageRegistryProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderProperties {
    pub provisioning_state: ProvisioningState,
    pub cluster_service_id: Option<InternalId>,
    pub dns: ServiceProviderDnsProfile,
    pub console: ServiceProviderConsoleProfile,
    pub api: ServiceProviderApiProfile,
    pub platform: ServiceProviderPlatformProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionProfile {
    pub id: String,
    pub channel_group: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDnsProfile {
    pub base_domain_prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderDnsProfile {
    pub base_domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub network_type: NetworkType,
    pub pod_cidr: String,
    pub service_cidr: String,
    pub machine_cidr: String,
    pub host_prefix: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderConsoleProfile {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerApiProfile {
    pub visibility: Visibility,
    /// `None` allows access from anywhere
    pub authorized_cidrs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderApiProfile {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPlatformProfile {
    pub managed_resource_group: String,
    pub subnet_id: Option<ResourceId>,
    pub outbound_type: OutboundType,
    pub network_security_group_id: Option<ResourceId>,
    pub operators_authentication: OperatorsAuthenticationProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderPlatformProfile {
    pub issuer_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAutoscalingProfile {
    pub max_nodes_total: i32,
    pub max_pod_grace_period_seconds: i32,
    pub max_node_provision_time_seconds: i32,
    pub pod_priority_threshold: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtcdProfile {
    pub data_encryption: EtcdDataEncryptionProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtcdDataEncryptionProfile {
    pub key_management_mode: EtcdDataEncryptionKeyManagementModeType,
    pub customer_managed: Option<CustomerManagedEncryptionProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerManagedEncryptionProfile {
    pub encryption_type: CustomerManagedEncryptionType,
    pub kms: Option<KmsEncryptionProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmsEncryptionProfile {
    pub active_key: KmsKey,
}

/// A key in an Azure Key Vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmsKey {
    pub name: String,
    pub vault_name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorsAuthenticationProfile {
    pub user_assigned_identities: UserAssignedIdentitiesProfile,
}

/// Managed identities used by cluster operators, keyed by operator name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentitiesProfile {
    pub control_plane_operators: BTreeMap<String, ResourceId>,
    pub data_plane_operators: BTreeMap<String, ResourceId>,
    pub service_managed_identity: Option<ResourceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterImageRegistryProfile {
    pub state: ClusterImageRegistryProfileState,
}

impl HcpOpenShiftCluster {
    /// A cluster carrying every non-zero default
    pub fn new_default(resource_id: Option<&ResourceId>) -> Self {
        Self {
            resource: TrackedResource::new(resource_id),
            customer_properties: CustomerProperties {
                version: VersionProfile {
                    id: String::new(),
                    channel_group: DEFAULT_CHANNEL_GROUP.to_string(),
                },
                network: NetworkProfile {
                    network_type: NetworkType::OvnKubernetes,
                    pod_cidr: DEFAULT_POD_CIDR.to_string(),
                    service_cidr: DEFAULT_SERVICE_CIDR.to_string(),
                    machine_cidr: DEFAULT_MACHINE_CIDR.to_string(),
                    host_prefix: DEFAULT_HOST_PREFIX,
                },
                api: CustomerApiProfile {
                    visibility: Visibility::Public,
                    authorized_cidrs: None,
                },
                platform: CustomerPlatformProfile {
                    outbound_type: OutboundType::LoadBalancer,
                    ..Default::default()
                },
                autoscaling: ClusterAutoscalingProfile {
                    max_nodes_total: 0,
                    max_pod_grace_period_seconds: DEFAULT_MAX_POD_GRACE_PERIOD_SECONDS,
                    max_node_provision_time_seconds: DEFAULT_MAX_NODE_PROVISION_TIME_SECONDS,
                    pod_priority_threshold: DEFAULT_POD_PRIORITY_THRESHOLD,
                },
                etcd: EtcdProfile {
                    data_encryption: EtcdDataEncryptionProfile {
                        key_management_mode: EtcdDataEncryptionKeyManagementModeType::PlatformManaged,
                        customer_managed: None,
                    },
                },
                cluster_image_registry: ClusterImageRegistryProfile {
                    state: ClusterImageRegistryProfileState::Enabled,
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl CanonicalResource for HcpOpenShiftCluster {
    fn new_default(resource_id: Option<&ResourceId>) -> Self {
        HcpOpenShiftCluster::new_default(resource_id)
    }

    fn carry_service_state(&mut self, current: &Self) {
        self.service_provider_properties = current.service_provider_properties.clone();
        self.resource.system_data = current.resource.system_data.clone();
    }

    fn validate_content(&self, current: Option<&Self>) -> FieldErrors {
        validate_cluster(self, current)
    }
}
