//! Node pool conversion to and from the backend

use super::{node_drain_grace_period, node_drain_minutes, ENCRYPTION_AT_HOST_DISABLED, ENCRYPTION_AT_HOST_ENABLED};
use crate::api::arm::TrackedResource;
use crate::api::enums::{DiskStorageAccountType, Effect};
use crate::api::error::ConversionError;
use crate::api::node_pool::{
    HcpOpenShiftClusterNodePool, NodePoolAutoScaling, NodePoolPlatformProfile, NodePoolProperties,
    NodePoolVersionProfile, OsDiskProfile, Taint,
};
use crate::api::resource_id::{resource_id_to_string, ResourceId};
use crate::backend::model::{self, AzureNodePool, EncryptionAtHost, Link, NodePoolAutoscaling, OsDisk};
use crate::backend::version::{strip_prefix, to_xyz};

/// Read a backend node pool into the canonical model.
///
/// An unrecognized disk storage account type or taint effect is returned
/// as [`ConversionError::UnknownValue`] rather than dropped, leaving the
/// caller to decide whether such legacy data is tolerable.
pub fn convert_node_pool(
    resource_id: &ResourceId,
    location: &str,
    node_pool: &model::NodePool,
) -> Result<HcpOpenShiftClusterNodePool, ConversionError> {
    let azure = node_pool.azure_node_pool.clone().unwrap_or_default();
    let os_disk = azure.os_disk.clone().unwrap_or_default();
    let version = node_pool
        .version
        .as_ref()
        .and_then(Link::inline)
        .cloned()
        .unwrap_or_default();

    let subnet_id = match node_pool.subnet.as_deref() {
        None | Some("") => None,
        Some(subnet) => Some(ResourceId::parse(subnet)?),
    };

    let disk_storage_account_type: DiskStorageAccountType = os_disk
        .storage_account_type
        .as_deref()
        .unwrap_or_default()
        .parse()?;

    let taints = node_pool
        .taints
        .iter()
        .flatten()
        .map(|taint| {
            let effect: Effect = taint.effect.as_deref().unwrap_or_default().parse()?;
            Ok(Taint {
                effect,
                key: taint.key.clone().unwrap_or_default(),
                value: taint.value.clone().unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    let mut resource = TrackedResource::new(Some(resource_id));
    resource.location = location.to_string();

    Ok(HcpOpenShiftClusterNodePool {
        resource,
        properties: NodePoolProperties {
            version: NodePoolVersionProfile {
                id: strip_prefix(version.id.as_deref().unwrap_or_default()),
                channel_group: version.channel_group.clone().unwrap_or_default(),
            },
            platform: NodePoolPlatformProfile {
                subnet_id,
                vm_size: azure.vm_size.clone().unwrap_or_default(),
                enable_encryption_at_host: azure
                    .encryption_at_host
                    .as_ref()
                    .and_then(|e| e.state.as_deref())
                    == Some(ENCRYPTION_AT_HOST_ENABLED),
                os_disk: OsDiskProfile {
                    size_gib: os_disk.size_gibibytes.unwrap_or_default(),
                    disk_storage_account_type,
                    encryption_set_id: None,
                },
                availability_zone: node_pool.availability_zone.clone().unwrap_or_default(),
            },
            replicas: node_pool.replicas.unwrap_or_default(),
            auto_repair: node_pool.auto_repair.unwrap_or_default(),
            auto_scaling: node_pool.autoscaling.as_ref().map(|a| NodePoolAutoScaling {
                min: a.min_replica.unwrap_or_default(),
                max: a.max_replica.unwrap_or_default(),
            }),
            labels: node_pool.labels.clone().unwrap_or_default(),
            taints,
            node_drain_timeout_minutes: node_drain_minutes(node_pool.node_drain_grace_period.as_ref()),
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Build the backend node pool body.
///
/// The backend fixes a node pool's identity, version, subnet and Azure
/// machine shape at creation, so those are only sent when `updating` is
/// false. Taints are always sent so that clearing them is an update.
pub fn build_node_pool(node_pool: &HcpOpenShiftClusterNodePool, updating: bool) -> model::NodePool {
    let properties = &node_pool.properties;
    let mut built = model::NodePool::default();

    if !updating {
        let name = node_pool.resource.name.to_lowercase();
        let encryption_at_host = if properties.platform.enable_encryption_at_host {
            ENCRYPTION_AT_HOST_ENABLED
        } else {
            ENCRYPTION_AT_HOST_DISABLED
        };

        built.id = Some(name.clone());
        built.version = Some(Link::Inline(model::Version {
            id: Some(to_xyz(&properties.version.id, &properties.version.channel_group)),
            channel_group: Some(properties.version.channel_group.clone()),
            ..Default::default()
        }));
        built.subnet = Some(resource_id_to_string(properties.platform.subnet_id.as_ref()));
        built.azure_node_pool = Some(AzureNodePool {
            resource_name: Some(name),
            vm_size: Some(properties.platform.vm_size.clone()),
            encryption_at_host: Some(EncryptionAtHost {
                state: Some(encryption_at_host.to_string()),
            }),
            os_disk: Some(OsDisk {
                size_gibibytes: Some(properties.platform.os_disk.size_gib),
                storage_account_type: Some(
                    properties.platform.os_disk.disk_storage_account_type.as_str().to_string(),
                ),
            }),
        });
        built.availability_zone = Some(properties.platform.availability_zone.clone());
        built.auto_repair = Some(properties.auto_repair);
    }

    built.labels = Some(properties.labels.clone());

    match &properties.auto_scaling {
        Some(auto_scaling) => {
            built.autoscaling = Some(NodePoolAutoscaling {
                min_replica: Some(auto_scaling.min),
                max_replica: Some(auto_scaling.max),
            });
        }
        None => built.replicas = Some(properties.replicas),
    }

    // Sent even when empty so an update can clear the taints.
    built.taints = Some(
        properties
            .taints
            .iter()
            .map(|taint| model::Taint {
                effect: Some(taint.effect.as_str().to_string()),
                key: Some(taint.key.clone()),
                value: Some(taint.value.clone()),
            })
            .collect(),
    );

    if let Some(minutes) = properties.node_drain_timeout_minutes {
        built.node_drain_grace_period = Some(node_drain_grace_period(minutes));
    }

    built
}

#[cfg(test)]
#[path = "node_pool_test.rs"]
mod tests;
