//! Tests for backend wire types

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test: a link object deserializes as a reference
#[test]
fn test_link_reference() {
    let link: Link<ClusterAutoscaler> = serde_json::from_value(json!({
        "kind": "ClusterAutoscalerLink",
        "href": "/api/aro_hcp/v1alpha1/clusters/abc/autoscaler"
    }))
    .unwrap();

    assert!(link.is_link());
    assert_eq!(link.href(), Some("/api/aro_hcp/v1alpha1/clusters/abc/autoscaler"));
    assert!(link.inline().is_none());
}

/// Test: an inline object deserializes as its value
#[test]
fn test_link_inline() {
    let link: Link<ClusterAutoscaler> = serde_json::from_value(json!({
        "kind": "ClusterAutoscaler",
        "max_node_provision_time": "15m",
        "resource_limits": {"max_nodes_total": 20}
    }))
    .unwrap();

    let autoscaler = link.inline().unwrap();
    assert_eq!(autoscaler.max_node_provision_time.as_deref(), Some("15m"));
    assert_eq!(
        autoscaler.resource_limits.as_ref().and_then(|l| l.max_nodes_total),
        Some(20)
    );
}

/// Test: a link without an href is rejected
#[test]
fn test_link_requires_href() {
    let result: Result<Link<Version>, _> =
        serde_json::from_value(json!({"kind": "VersionLink"}));
    assert!(result.is_err());
}

/// Test: links serialize back to their wire shape
#[test]
fn test_link_serialize() {
    let link: Link<Version> = Link::Link {
        kind: "VersionLink".to_string(),
        href: "/api/aro_hcp/v1alpha1/versions/openshift-v4.19.7".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&link).unwrap(),
        json!({"kind": "VersionLink", "href": "/api/aro_hcp/v1alpha1/versions/openshift-v4.19.7"})
    );

    let inline: Link<Version> = Version {
        id: Some("openshift-v4.19.7".to_string()),
        ..Default::default()
    }
    .into();
    assert_eq!(serde_json::to_value(&inline).unwrap(), json!({"id": "openshift-v4.19.7"}));
}

/// Test: absent fields are omitted and renamed fields keep their wire names
#[test]
fn test_sparse_serialization() {
    let cluster = Cluster {
        name: Some("dev".to_string()),
        network: Some(Network {
            type_: Some("OVNKubernetes".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&cluster).unwrap(),
        json!({"name": "dev", "network": {"type": "OVNKubernetes"}})
    );
}

/// Test: list pages tolerate missing counters
#[test]
fn test_list_page_defaults() {
    let page: ListPage<NodePool> = serde_json::from_value(json!({"kind": "NodePoolList"})).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}
