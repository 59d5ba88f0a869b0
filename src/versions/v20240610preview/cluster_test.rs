//! Tests for the 2024-06-10-preview cluster representation

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::cluster as internal;
use crate::api::decode_request;
use crate::api::enums::{NetworkType, OutboundType, Visibility};
use crate::versions::fixtures::*;
use crate::versions::VersionedResource;
use axum::http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

fn round_trip(cluster: &internal::HcpOpenShiftCluster) -> internal::HcpOpenShiftCluster {
    let body = serde_json::to_value(HcpOpenShiftCluster::project(cluster)).unwrap();
    let external: HcpOpenShiftCluster = serde_json::from_value(body).unwrap();
    let mut out = internal::HcpOpenShiftCluster::new_default(None);
    external.normalize(&mut out).unwrap();
    out
}

/// Test: project then normalize preserves every field this version knows
#[test]
fn test_round_trip() {
    let mut cluster = full_cluster();
    // Not part of this version; compare against what normalize leaves behind.
    let defaults = internal::HcpOpenShiftCluster::new_default(None).customer_properties;
    cluster.customer_properties.etcd = defaults.etcd;
    cluster.customer_properties.cluster_image_registry = defaults.cluster_image_registry;
    cluster.customer_properties.api.authorized_cidrs = None;
    cluster.customer_properties.node_drain_timeout_minutes = defaults.node_drain_timeout_minutes;

    assert_eq!(round_trip(&cluster), cluster);
}

/// Test: fields unknown to this version are left untouched by normalize
#[test]
fn test_normalize_leaves_newer_fields_untouched() {
    let current = full_cluster();
    let external = HcpOpenShiftCluster::project(&current);

    let mut out = current.clone();
    out.customer_properties.version.channel_group = "candidate".to_string();
    external.normalize(&mut out).unwrap();

    assert_eq!(out.customer_properties.etcd, current.customer_properties.etcd);
    assert_eq!(
        out.customer_properties.cluster_image_registry,
        current.customer_properties.cluster_image_registry
    );
    assert_eq!(
        out.customer_properties.api.authorized_cidrs,
        current.customer_properties.api.authorized_cidrs
    );
    assert_eq!(
        out.customer_properties.node_drain_timeout_minutes,
        current.customer_properties.node_drain_timeout_minutes
    );
    assert_eq!(out.customer_properties.version.channel_group, "fast");
}

/// Test: the projection does not carry fields introduced later
#[test]
fn test_project_omits_newer_fields() {
    let body = serde_json::to_value(HcpOpenShiftCluster::project(&full_cluster())).unwrap();

    let properties = body["properties"].as_object().unwrap();
    assert!(!properties.contains_key("etcd"));
    assert!(!properties.contains_key("clusterImageRegistry"));
    assert!(!properties.contains_key("nodeDrainTimeoutMinutes"));
    assert!(!body["properties"]["api"]
        .as_object()
        .unwrap()
        .contains_key("authorizedCidrs"));
}

/// Test: defaults fill only absent leaves
#[test]
fn test_set_default_values_keeps_explicit_values() {
    let mut external: HcpOpenShiftCluster = serde_json::from_value(json!({
        "properties": {
            "network": {"hostPrefix": 0, "podCidr": ""},
            "api": {"visibility": "Private"}
        }
    }))
    .unwrap();

    external.set_default_values();

    let properties = external.properties.unwrap();
    let network = properties.network.unwrap();
    assert_eq!(network.host_prefix, Some(0));
    assert_eq!(network.pod_cidr.as_deref(), Some(""));
    assert_eq!(network.service_cidr.as_deref(), Some(internal::DEFAULT_SERVICE_CIDR));
    assert_eq!(network.network_type, Some(NetworkType::OvnKubernetes));
    assert_eq!(properties.api.unwrap().visibility, Some(Visibility::Private));
    assert_eq!(
        properties.platform.unwrap().outbound_type,
        Some(OutboundType::LoadBalancer)
    );
    assert_eq!(
        properties.version.unwrap().channel_group.as_deref(),
        Some(internal::DEFAULT_CHANNEL_GROUP)
    );
}

/// Test: zero values of defaulted fields survive a GET followed by a PUT
#[test]
fn test_zero_values_survive_get_then_put() {
    let mut current = full_cluster();
    let customer = &mut current.customer_properties;
    customer.version.channel_group = String::new();
    customer.network.network_type = NetworkType::Unset;
    customer.network.pod_cidr = String::new();
    customer.network.service_cidr = String::new();
    customer.network.machine_cidr = String::new();
    customer.network.host_prefix = 0;
    customer.api.visibility = Visibility::Unset;
    customer.platform.outbound_type = OutboundType::Unset;
    customer.autoscaling.max_pod_grace_period_seconds = 0;
    customer.autoscaling.max_node_provision_time_seconds = 0;
    customer.autoscaling.pod_priority_threshold = 0;

    let body = serde_json::to_vec(&HcpOpenShiftCluster::project(&current)).unwrap();
    let updated =
        decode_request::<HcpOpenShiftCluster>(&Method::PUT, &id(CLUSTER_ID), &body, Some(&current))
            .unwrap();

    assert_eq!(updated.customer_properties.version, current.customer_properties.version);
    assert_eq!(updated.customer_properties.network, current.customer_properties.network);
    assert_eq!(updated.customer_properties.api.visibility, Visibility::Unset);
    assert_eq!(updated.customer_properties.platform.outbound_type, OutboundType::Unset);
    assert_eq!(
        updated.customer_properties.autoscaling,
        current.customer_properties.autoscaling
    );
}

/// Test: operator identities that are not resource IDs are reported per key
#[test]
fn test_normalize_reports_bad_operator_identity() {
    let external: HcpOpenShiftCluster = serde_json::from_value(json!({
        "properties": {
            "platform": {
                "operatorsAuthentication": {
                    "userAssignedIdentities": {
                        "controlPlaneOperators": {"ingress": "bogus"}
                    }
                }
            }
        }
    }))
    .unwrap();

    let mut out = internal::HcpOpenShiftCluster::new_default(None);
    let errors = external.normalize(&mut out).unwrap_err();

    let targets: Vec<&str> = errors.iter().map(|e| e.target.as_str()).collect();
    assert_eq!(
        targets,
        vec!["properties.platform.operatorsAuthentication.userAssignedIdentities.controlPlaneOperators[\"ingress\"]"]
    );
}
