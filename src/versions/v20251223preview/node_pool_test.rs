//! Tests for the 2025-12-23-preview node pool representation

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::decode_request;
use crate::api::node_pool as internal;
use crate::versions::fixtures::*;
use crate::versions::VersionedResource;
use axum::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test: project then normalize preserves the whole canonical node pool
#[test]
fn test_round_trip() {
    let pool = full_node_pool();

    let body = serde_json::to_value(HcpOpenShiftClusterNodePool::project(&pool)).unwrap();
    let external: HcpOpenShiftClusterNodePool = serde_json::from_value(body).unwrap();
    let mut out = internal::HcpOpenShiftClusterNodePool::new_default(None);
    external.normalize(&mut out).unwrap();

    assert_eq!(out, pool);
}

/// Test: the drain timeout can be changed and cleared with PATCH
#[test]
fn test_patch_node_drain_timeout() {
    let current = full_node_pool();
    let resource_id = id(NODE_POOL_ID);

    let updated = decode_request::<HcpOpenShiftClusterNodePool>(
        &Method::PATCH,
        &resource_id,
        json!({"properties": {"nodeDrainTimeoutMinutes": 45}}).to_string().as_bytes(),
        Some(&current),
    )
    .unwrap();
    assert_eq!(updated.properties.node_drain_timeout_minutes, Some(45));

    let cleared = decode_request::<HcpOpenShiftClusterNodePool>(
        &Method::PATCH,
        &resource_id,
        json!({"properties": {"nodeDrainTimeoutMinutes": null}}).to_string().as_bytes(),
        Some(&current),
    )
    .unwrap();
    assert_eq!(cleared.properties.node_drain_timeout_minutes, None);
}

/// Test: PATCH replaces taints as a whole list
#[test]
fn test_patch_replaces_taints() {
    let current = full_node_pool();
    let body = json!({
        "properties": {"taints": [{"effect": "NoExecute", "key": "gpu", "value": "true"}]}
    });

    let updated = decode_request::<HcpOpenShiftClusterNodePool>(
        &Method::PATCH,
        &id(NODE_POOL_ID),
        body.to_string().as_bytes(),
        Some(&current),
    )
    .unwrap();

    assert_eq!(updated.properties.taints.len(), 1);
    assert_eq!(updated.properties.taints[0].key, "gpu");
    assert_eq!(updated.properties.labels, current.properties.labels);
}

/// Test: an unknown enum value is rejected as invalid content
#[test]
fn test_unknown_taint_effect_rejected() {
    let body = json!({
        "location": "eastus",
        "properties": {"taints": [{"effect": "Sometimes", "key": "k", "value": "v"}]}
    });

    let err = decode_request::<HcpOpenShiftClusterNodePool>(
        &Method::PUT,
        &id(NODE_POOL_ID),
        body.to_string().as_bytes(),
        None,
    )
    .unwrap_err();

    assert_eq!(err.status_code, 400);
    assert_eq!(err.code(), "InvalidRequestContent");
}
