//! Tests for node pool conversion to and from the backend

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::error::is_unknown_value;
use crate::versions::fixtures::*;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test: a create carries the machine shape and version
#[test]
fn test_build_create() {
    let built = build_node_pool(&full_node_pool(), false);

    assert_eq!(
        serde_json::to_value(&built).unwrap(),
        json!({
            "id": "workers",
            "version": {"id": "openshift-v4.19.7-fast", "channel_group": "fast"},
            "subnet": SUBNET_ID,
            "azure_node_pool": {
                "resource_name": "workers",
                "vm_size": "Standard_D8s_v3",
                "encryption_at_host": {"state": "enabled"},
                "os_disk": {"size_gibibytes": 128, "storage_account_type": "StandardSSD_LRS"}
            },
            "availability_zone": "2",
            "auto_repair": true,
            "autoscaling": {"min_replica": 2, "max_replica": 6},
            "labels": {"tier": "backend"},
            "taints": [{"effect": "NoSchedule", "key": "dedicated", "value": "infra"}],
            "node_drain_grace_period": {"unit": "minutes", "value": 15.0}
        })
    );
}

/// Test: an update only carries scaling, labels, taints and drain period
#[test]
fn test_build_update() {
    let mut pool = full_node_pool();
    pool.properties.auto_scaling = None;
    pool.properties.taints.clear();
    pool.properties.node_drain_timeout_minutes = None;

    let built = build_node_pool(&pool, true);

    assert_eq!(
        serde_json::to_value(&built).unwrap(),
        json!({
            "replicas": 3,
            "labels": {"tier": "backend"},
            "taints": []
        })
    );
}

/// Test: auto repair and encryption at host are sent when disabled
#[test]
fn test_build_create_disabled_flags() {
    let mut pool = full_node_pool();
    pool.properties.auto_repair = false;
    pool.properties.platform.enable_encryption_at_host = false;

    let built = build_node_pool(&pool, false);

    assert_eq!(built.auto_repair, Some(false));
    let state = built
        .azure_node_pool
        .and_then(|a| a.encryption_at_host)
        .and_then(|e| e.state);
    assert_eq!(state.as_deref(), Some("disabled"));
}

/// Test: a node pool created through the backend reads back unchanged
#[test]
fn test_round_trip() {
    let mut pool = full_node_pool();
    pool.properties.version.channel_group = "stable".to_string();
    let mut stored = build_node_pool(&pool, false);
    stored.replicas = Some(pool.properties.replicas);

    let converted = convert_node_pool(&id(NODE_POOL_ID), "eastus", &stored).unwrap();

    let mut expected = pool.properties.clone();
    expected.provisioning_state = Default::default();
    assert_eq!(converted.properties, expected);
    assert_eq!(converted.resource.name, "workers");
    assert_eq!(converted.resource.location, "eastus");
}

/// Test: the backend version keeps its patch and channel suffix
#[test]
fn test_convert_version_strips_prefix_only() {
    let stored = model::NodePool {
        version: Some(Link::Inline(model::Version {
            id: Some("openshift-v4.20.8-candidate".to_string()),
            channel_group: Some("candidate".to_string()),
            ..Default::default()
        })),
        ..Default::default()
    };

    let converted = convert_node_pool(&id(NODE_POOL_ID), "eastus", &stored).unwrap();

    assert_eq!(converted.properties.version.id, "4.20.8-candidate");
    assert_eq!(converted.properties.version.channel_group, "candidate");
}

/// Test: an unresolved version link reads as an empty version
#[test]
fn test_convert_version_link() {
    let stored = model::NodePool {
        version: Some(Link::Link {
            kind: "VersionLink".to_string(),
            href: "/api/clusters_mgmt/v1/versions/openshift-v4.19.7".to_string(),
        }),
        ..Default::default()
    };

    let converted = convert_node_pool(&id(NODE_POOL_ID), "eastus", &stored).unwrap();

    assert_eq!(converted.properties.version, NodePoolVersionProfile::default());
    assert!(converted.properties.auto_scaling.is_none());
    assert!(converted.properties.node_drain_timeout_minutes.is_none());
    assert!(converted.properties.platform.subnet_id.is_none());
}

/// Test: an unknown taint effect fails the conversion
#[test]
fn test_convert_unknown_taint_effect() {
    let stored = model::NodePool {
        taints: Some(vec![model::Taint {
            effect: Some("Evict".to_string()),
            key: Some("k".to_string()),
            value: Some("v".to_string()),
        }]),
        ..Default::default()
    };

    let err = convert_node_pool(&id(NODE_POOL_ID), "eastus", &stored).unwrap_err();
    assert!(is_unknown_value(&err));
}

/// Test: an unknown disk storage account type is returned to the caller
#[test]
fn test_convert_unknown_disk_storage_account_type() {
    let stored = model::NodePool {
        azure_node_pool: Some(AzureNodePool {
            os_disk: Some(OsDisk {
                size_gibibytes: Some(128),
                storage_account_type: Some("UltraSSD_LRS".to_string()),
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = convert_node_pool(&id(NODE_POOL_ID), "eastus", &stored).unwrap_err();

    assert!(matches!(
        &err,
        ConversionError::UnknownValue { value, to: "DiskStorageAccountType", .. }
            if value == "UltraSSD_LRS"
    ));
}
