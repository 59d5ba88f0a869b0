//! Tests for the 2025-12-23-preview cluster representation

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::cluster as internal;
use crate::api::decode_request;
use crate::api::enums::{
    ClusterImageRegistryProfileState, CustomerManagedEncryptionType,
    EtcdDataEncryptionKeyManagementModeType,
};
use crate::versions::fixtures::*;
use crate::versions::VersionedResource;
use axum::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

fn normalize(body: serde_json::Value) -> internal::HcpOpenShiftCluster {
    let mut external: HcpOpenShiftCluster = serde_json::from_value(body).unwrap();
    external.set_default_values();
    let mut out = internal::HcpOpenShiftCluster::new_default(None);
    external.normalize(&mut out).unwrap();
    out
}

/// Test: project then normalize preserves the whole canonical cluster
#[test]
fn test_round_trip() {
    let cluster = full_cluster();

    let body = serde_json::to_value(HcpOpenShiftCluster::project(&cluster)).unwrap();
    let external: HcpOpenShiftCluster = serde_json::from_value(body).unwrap();
    let mut out = internal::HcpOpenShiftCluster::new_default(None);
    external.normalize(&mut out).unwrap();

    assert_eq!(out, cluster);
}

/// Test: normalize then project reproduces a fully specified body
#[test]
fn test_external_round_trip() {
    let original = HcpOpenShiftCluster::project(&full_cluster());
    let mut internal = internal::HcpOpenShiftCluster::new_default(None);
    original.normalize(&mut internal).unwrap();

    assert_eq!(HcpOpenShiftCluster::project(&internal), original);
}

/// Test: an absent CIDR list allows all, an empty list is kept as empty
#[test]
fn test_authorized_cidrs_absent_vs_empty() {
    let absent = normalize(json!({"properties": {"api": {"visibility": "Public"}}}));
    assert_eq!(absent.customer_properties.api.authorized_cidrs, None);

    let empty = normalize(json!({"properties": {"api": {"authorizedCidrs": []}}}));
    assert_eq!(empty.customer_properties.api.authorized_cidrs, Some(vec![]));

    let listed = normalize(json!({
        "properties": {"api": {"authorizedCidrs": ["10.0.0.0/8", null, "192.168.0.1"]}}
    }));
    assert_eq!(
        listed.customer_properties.api.authorized_cidrs,
        Some(vec!["10.0.0.0/8".to_string(), "192.168.0.1".to_string()])
    );
}

/// Test: etcd encryption defaults to platform managed
#[test]
fn test_etcd_defaults() {
    let cluster = normalize(json!({"properties": {}}));
    let encryption = &cluster.customer_properties.etcd.data_encryption;
    assert_eq!(
        encryption.key_management_mode,
        EtcdDataEncryptionKeyManagementModeType::PlatformManaged
    );
    assert!(encryption.customer_managed.is_none());
    assert_eq!(
        cluster.customer_properties.cluster_image_registry.state,
        ClusterImageRegistryProfileState::Enabled
    );
}

/// Test: a customer-managed block without a type defaults to KMS
#[test]
fn test_customer_managed_encryption_type_default() {
    let cluster = normalize(json!({
        "properties": {
            "etcd": {
                "dataEncryption": {
                    "keyManagementMode": "CustomerManaged",
                    "customerManaged": {
                        "kms": {"activeKey": {"name": "k", "vaultName": "v", "version": "1"}}
                    }
                }
            }
        }
    }));

    let managed = cluster
        .customer_properties
        .etcd
        .data_encryption
        .customer_managed
        .unwrap();
    assert_eq!(managed.encryption_type, CustomerManagedEncryptionType::Kms);
    assert_eq!(managed.kms.unwrap().active_key.vault_name, "v");
}

/// Test: PATCH may replace the CIDR allow list but not the etcd settings
#[test]
fn test_patch_update_rules() {
    let current = full_cluster();
    let resource_id = id(CLUSTER_ID);

    let allowed = json!({"properties": {"api": {"authorizedCidrs": ["172.16.0.0/12"]}}});
    let updated = decode_request::<HcpOpenShiftCluster>(
        &Method::PATCH,
        &resource_id,
        allowed.to_string().as_bytes(),
        Some(&current),
    )
    .unwrap();
    assert_eq!(
        updated.customer_properties.api.authorized_cidrs,
        Some(vec!["172.16.0.0/12".to_string()])
    );

    let forbidden = json!({
        "properties": {"etcd": {"dataEncryption": {"keyManagementMode": "PlatformManaged"}}}
    });
    let err = decode_request::<HcpOpenShiftCluster>(
        &Method::PATCH,
        &resource_id,
        forbidden.to_string().as_bytes(),
        Some(&current),
    )
    .unwrap_err();
    assert_eq!(err.body.target, "properties.etcd.dataEncryption.keyManagementMode");
    assert_eq!(err.body.message, "Field 'keyManagementMode' cannot be updated");
}

/// Test: PATCH null removes the CIDR allow list
#[test]
fn test_patch_null_removes_authorized_cidrs() {
    let current = full_cluster();
    let body = json!({"properties": {"api": {"authorizedCidrs": null}}});

    let updated = decode_request::<HcpOpenShiftCluster>(
        &Method::PATCH,
        &id(CLUSTER_ID),
        body.to_string().as_bytes(),
        Some(&current),
    )
    .unwrap();

    assert_eq!(updated.customer_properties.api.authorized_cidrs, None);
    assert_eq!(updated.customer_properties.etcd, current.customer_properties.etcd);
}
