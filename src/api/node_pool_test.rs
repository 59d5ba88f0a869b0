//! Tests for node pool defaults and parent cluster validation

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

const VNET: &str = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet";

fn cluster_with_subnet(channel: &str, subnet: &str) -> HcpOpenShiftCluster {
    let mut cluster = HcpOpenShiftCluster::new_default(None);
    cluster.customer_properties.version.channel_group = channel.to_string();
    cluster.customer_properties.platform.subnet_id = Some(ResourceId::parse(subnet).unwrap());
    cluster
}

/// Test: defaults match the documented node pool defaults
#[test]
fn test_new_default() {
    let pool = HcpOpenShiftClusterNodePool::new_default(None);

    assert_eq!(pool.properties.version.channel_group, "stable");
    assert_eq!(pool.properties.platform.os_disk.size_gib, 64);
    assert_eq!(
        pool.properties.platform.os_disk.disk_storage_account_type,
        DiskStorageAccountType::PremiumLrs
    );
    assert!(pool.properties.auto_repair);
}

/// Test: name and type are taken from the resource ID
#[test]
fn test_new_default_with_resource_id() {
    let id = ResourceId::parse(
        "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters/c/nodePools/np",
    )
    .unwrap();
    let pool = HcpOpenShiftClusterNodePool::new_default(Some(&id));

    assert_eq!(pool.resource.name, "np");
    assert_eq!(
        pool.resource.type_,
        "Microsoft.RedHatOpenShift/hcpOpenShiftClusters/nodePools"
    );
}

/// Test: a node pool matching its cluster passes validation
#[test]
fn test_validate_matching_cluster() {
    let cluster = cluster_with_subnet("stable", &format!("{}/subnets/a", VNET));
    let mut pool = HcpOpenShiftClusterNodePool::new_default(None);
    pool.properties.platform.subnet_id =
        Some(ResourceId::parse(&format!("{}/subnets/b", VNET.to_uppercase())).unwrap());

    assert!(pool.validate(Some(&cluster)).is_empty());
    assert!(pool.validate(None).is_empty());
}

/// Test: channel group mismatch is reported on the version path
#[test]
fn test_validate_channel_group_mismatch() {
    let cluster = cluster_with_subnet("candidate", &format!("{}/subnets/a", VNET));
    let pool = HcpOpenShiftClusterNodePool::new_default(None);

    let errors = pool.validate(Some(&cluster));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target, "properties.version.channelGroup");
    assert_eq!(
        errors[0].message,
        "Node pool channel group 'stable' must be the same as control plane channel group 'candidate'"
    );
}

/// Test: a subnet in another VNet is rejected
#[test]
fn test_validate_subnet_other_vnet() {
    let cluster = cluster_with_subnet("stable", &format!("{}/subnets/a", VNET));
    let mut pool = HcpOpenShiftClusterNodePool::new_default(None);
    pool.properties.platform.subnet_id = Some(
        ResourceId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/other/subnets/b",
        )
        .unwrap(),
    );

    let errors = pool.validate(Some(&cluster));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target, "properties.platform.subnetId");
    assert!(errors[0].message.contains(VNET));
}
