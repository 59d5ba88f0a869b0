//! Canonical node pool model and validation against the parent cluster

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::arm::{ManagedServiceIdentity, TrackedResource};
use super::cloud_error::{CloudErrorBody, CODE_INVALID_REQUEST_CONTENT};
use super::cluster::{HcpOpenShiftCluster, DEFAULT_CHANNEL_GROUP};
use super::enums::{DiskStorageAccountType, Effect, ProvisioningState};
use super::field::FieldErrors;
use super::request::CanonicalResource;
use super::resource_id::ResourceId;
use super::validation::validate_node_pool;
use crate::backend::internal_id::InternalId;

pub const DEFAULT_OS_DISK_SIZE_GIB: i32 = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftClusterNodePool {
    #[serde(flatten)]
    pub resource: TrackedResource,
    pub properties: NodePoolProperties,
    pub service_provider_properties: NodePoolServiceProviderProperties,
    pub identity: Option<ManagedServiceIdentity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolProperties {
    pub provisioning_state: ProvisioningState,
    pub version: NodePoolVersionProfile,
    pub platform: NodePoolPlatformProfile,
    pub replicas: i32,
    pub auto_repair: bool,
    pub auto_scaling: Option<NodePoolAutoScaling>,
    pub labels: BTreeMap<String, String>,
    pub taints: Vec<Taint>,
    pub node_drain_timeout_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolServiceProviderProperties {
    pub cluster_service_id: Option<InternalId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolVersionProfile {
    pub id: String,
    pub channel_group: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolPlatformProfile {
    pub subnet_id: Option<ResourceId>,
    pub vm_size: String,
    pub enable_encryption_at_host: bool,
    pub os_disk: OsDiskProfile,
    pub availability_zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsDiskProfile {
    pub size_gib: i32,
    pub disk_storage_account_type: DiskStorageAccountType,
    pub encryption_set_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolAutoScaling {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint {
    pub effect: Effect,
    pub key: String,
    pub value: String,
}

impl HcpOpenShiftClusterNodePool {
    pub fn new_default(resource_id: Option<&ResourceId>) -> Self {
        Self {
            resource: TrackedResource::new(resource_id),
            properties: NodePoolProperties {
                version: NodePoolVersionProfile {
                    id: String::new(),
                    channel_group: DEFAULT_CHANNEL_GROUP.to_string(),
                },
                platform: NodePoolPlatformProfile {
                    os_disk: OsDiskProfile {
                        size_gib: DEFAULT_OS_DISK_SIZE_GIB,
                        disk_storage_account_type: DiskStorageAccountType::PremiumLrs,
                        encryption_set_id: None,
                    },
                    ..Default::default()
                },
                auto_repair: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Check the node pool against its parent cluster
    pub fn validate(&self, cluster: Option<&HcpOpenShiftCluster>) -> Vec<CloudErrorBody> {
        let Some(cluster) = cluster else {
            return Vec::new();
        };
        let mut errors = self.validate_version(cluster);
        errors.extend(self.validate_subnet_id(cluster));
        errors
    }

    fn validate_version(&self, cluster: &HcpOpenShiftCluster) -> Vec<CloudErrorBody> {
        let pool_channel = &self.properties.version.channel_group;
        let cluster_channel = &cluster.customer_properties.version.channel_group;
        if pool_channel == cluster_channel {
            return Vec::new();
        }
        vec![CloudErrorBody::new(
            CODE_INVALID_REQUEST_CONTENT,
            "properties.version.channelGroup",
            format!(
                "Node pool channel group '{}' must be the same as control plane channel group '{}'",
                pool_channel, cluster_channel
            ),
        )]
    }

    fn validate_subnet_id(&self, cluster: &HcpOpenShiftCluster) -> Vec<CloudErrorBody> {
        let (Some(pool_subnet), Some(cluster_subnet)) = (
            &self.properties.platform.subnet_id,
            &cluster.customer_properties.platform.subnet_id,
        ) else {
            return Vec::new();
        };
        let (Some(pool_vnet), Some(cluster_vnet)) = (pool_subnet.parent(), cluster_subnet.parent())
        else {
            return Vec::new();
        };
        if pool_vnet == cluster_vnet {
            return Vec::new();
        }
        vec![CloudErrorBody::new(
            CODE_INVALID_REQUEST_CONTENT,
            "properties.platform.subnetId",
            format!(
                "Subnet '{}' must belong to the same VNet as the parent cluster VNet '{}'",
                pool_subnet, cluster_vnet
            ),
        )]
    }
}

impl CanonicalResource for HcpOpenShiftClusterNodePool {
    fn new_default(resource_id: Option<&ResourceId>) -> Self {
        HcpOpenShiftClusterNodePool::new_default(resource_id)
    }

    fn carry_service_state(&mut self, current: &Self) {
        self.service_provider_properties = current.service_provider_properties.clone();
        self.properties.provisioning_state = current.properties.provisioning_state;
        self.resource.system_data = current.resource.system_data.clone();
    }

    fn validate_content(&self, current: Option<&Self>) -> FieldErrors {
        validate_node_pool(self, current)
    }
}

#[cfg(test)]
#[path = "node_pool_test.rs"]
mod tests;
