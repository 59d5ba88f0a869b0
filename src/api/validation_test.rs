//! Tests for content validation of canonical resources

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::node_pool::{NodePoolAutoScaling, Taint};
use crate::versions::fixtures::*;
use pretty_assertions::assert_eq;

fn targets(errors: &FieldErrors) -> Vec<&str> {
    errors.iter().map(|e| e.target.as_str()).collect()
}

/// Test: fully populated resources pass on create and on an unchanged update
#[test]
fn test_fixtures_are_valid() {
    let cluster = full_cluster();
    let pool = full_node_pool();
    let auth = full_external_auth();

    assert!(validate_cluster(&cluster, None).is_empty());
    assert!(validate_cluster(&cluster, Some(&cluster)).is_empty());
    assert!(validate_node_pool(&pool, None).is_empty());
    assert!(validate_external_auth(&auth, None).is_empty());
}

/// Test: CIDR blocks must be IPv4 with no host bits set
#[test]
fn test_parse_cidr_v4() {
    assert_eq!(
        parse_cidr_v4("10.128.0.0/14").unwrap(),
        ("10.128.0.0".parse().unwrap(), 14)
    );
    assert_eq!(parse_cidr_v4("0.0.0.0/0").unwrap().1, 0);
    assert!(parse_cidr_v4("not-a-cidr").is_err());
    assert!(parse_cidr_v4("10.0.0.0").is_err());
    assert!(parse_cidr_v4("10.0.0.0/33").is_err());
    assert!(parse_cidr_v4("fd00::/8").is_err());
    assert_eq!(parse_cidr_v4("10.0.0.1/8"), Err("host bits must be zero"));
}

/// Test: network CIDRs and host prefix are checked
#[test]
fn test_network_profile() {
    let mut cluster = full_cluster();
    let network = &mut cluster.customer_properties.network;
    network.pod_cidr = "not-a-cidr".to_string();
    network.service_cidr = "172.31.0.1/16".to_string();
    network.host_prefix = 99;

    let errors = validate_cluster(&cluster, None);

    assert_eq!(
        targets(&errors),
        vec![
            "properties.network.podCidr",
            "properties.network.serviceCidr",
            "properties.network.hostPrefix",
        ]
    );
    assert_eq!(
        errors.iter().last().unwrap().message,
        "Invalid value '99' for field 'hostPrefix' (must be at most 26)"
    );
}

/// Test: host prefix below the minimum is rejected
#[test]
fn test_host_prefix_minimum() {
    let mut cluster = full_cluster();
    cluster.customer_properties.network.host_prefix = 22;

    let errors = validate_cluster(&cluster, None);

    assert_eq!(
        errors.iter().next().unwrap().message,
        "Invalid value '22' for field 'hostPrefix' (must be at least 23)"
    );
}

/// Test: overlapping machine, service and pod networks are reported
#[test]
fn test_overlapping_cidrs() {
    let mut cluster = full_cluster();
    let network = &mut cluster.customer_properties.network;
    network.machine_cidr = "10.0.0.0/8".to_string();
    network.pod_cidr = "10.128.0.0/14".to_string();

    let errors = validate_cluster(&cluster, None);

    assert_eq!(targets(&errors), vec!["properties.network"]);
    assert_eq!(
        errors.iter().next().unwrap().message,
        "machine CIDR '10.0.0.0/8' and pod CIDR '10.128.0.0/14' overlap"
    );
}

/// Test: an authorized CIDR list, when present, is non-empty and well formed
#[test]
fn test_authorized_cidrs() {
    let mut cluster = full_cluster();
    cluster.customer_properties.api.authorized_cidrs = Some(vec![]);
    assert_eq!(
        targets(&validate_cluster(&cluster, None)),
        vec!["properties.api.authorizedCidrs"]
    );

    cluster.customer_properties.api.authorized_cidrs = Some(vec![
        "192.168.1.7".to_string(),
        "10.0.0.0/8".to_string(),
        " 10.1.0.0/16".to_string(),
        "example.com".to_string(),
    ]);
    assert_eq!(
        targets(&validate_cluster(&cluster, None)),
        vec![
            "properties.api.authorizedCidrs[2]",
            "properties.api.authorizedCidrs[3]",
        ]
    );

    cluster.customer_properties.api.authorized_cidrs =
        Some(vec!["10.0.0.0/8".to_string(); MAX_AUTHORIZED_CIDRS + 1]);
    assert_eq!(
        targets(&validate_cluster(&cluster, None)),
        vec!["properties.api.authorizedCidrs"]
    );

    cluster.customer_properties.api.authorized_cidrs = None;
    assert!(validate_cluster(&cluster, None).is_empty());
}

/// Test: the node drain timeout is bounded to one week
#[test]
fn test_node_drain_timeout() {
    let mut cluster = full_cluster();
    cluster.customer_properties.node_drain_timeout_minutes = MAX_NODE_DRAIN_TIMEOUT_MINUTES;
    assert!(validate_cluster(&cluster, None).is_empty());

    cluster.customer_properties.node_drain_timeout_minutes = 999999;
    assert_eq!(
        targets(&validate_cluster(&cluster, None)),
        vec!["properties.nodeDrainTimeoutMinutes"]
    );

    cluster.customer_properties.node_drain_timeout_minutes = -1;
    assert_eq!(
        validate_cluster(&cluster, None).iter().next().unwrap().message,
        "Invalid value '-1' for field 'nodeDrainTimeoutMinutes' (must be non-negative)"
    );

    let mut pool = full_node_pool();
    pool.properties.node_drain_timeout_minutes = Some(MAX_NODE_DRAIN_TIMEOUT_MINUTES + 1);
    assert_eq!(
        targets(&validate_node_pool(&pool, None)),
        vec!["properties.nodeDrainTimeoutMinutes"]
    );
}

/// Test: network resource IDs must reference the right resource type
#[test]
fn test_platform_resource_types() {
    let mut cluster = full_cluster();
    cluster.customer_properties.platform.subnet_id = Some(id(NSG_ID));
    cluster.customer_properties.platform.network_security_group_id = Some(id(SUBNET_ID));

    let errors = validate_cluster(&cluster, None);

    assert_eq!(
        targets(&errors),
        vec![
            "properties.platform.subnetId",
            "properties.platform.networkSecurityGroupId",
        ]
    );
    assert!(errors
        .iter()
        .next()
        .unwrap()
        .message
        .ends_with("(must be a valid 'Microsoft.Network/virtualNetworks/subnets' resource ID)"));
}

/// Test: autoscaler durations must be positive
#[test]
fn test_cluster_autoscaling() {
    let mut cluster = full_cluster();
    cluster.customer_properties.autoscaling.max_pod_grace_period_seconds = 0;
    cluster.customer_properties.autoscaling.max_node_provision_time_seconds = -5;

    assert_eq!(
        targets(&validate_cluster(&cluster, None)),
        vec![
            "properties.autoscaling.maxPodGracePeriodSeconds",
            "properties.autoscaling.maxNodeProvisionTimeSeconds",
        ]
    );
}

/// Test: values left as stored are not checked again on update
#[test]
fn test_unchanged_values_are_not_rechecked() {
    let mut current = full_cluster();
    current.customer_properties.network.host_prefix = 0;
    current.customer_properties.node_drain_timeout_minutes = 20000;
    current.customer_properties.api.authorized_cidrs = Some(vec![]);

    let updated = current.clone();
    assert!(validate_cluster(&updated, Some(&current)).is_empty());

    let mut changed = current.clone();
    changed.customer_properties.node_drain_timeout_minutes = 20001;
    assert_eq!(
        targets(&validate_cluster(&changed, Some(&current))),
        vec!["properties.nodeDrainTimeoutMinutes"]
    );
}

/// Test: replica and autoscaling limits apply only to non-zonal pools
#[test]
fn test_node_pool_scaling() {
    let mut pool = full_node_pool();
    pool.properties.replicas = 500;
    pool.properties.auto_scaling = Some(NodePoolAutoScaling { min: 1, max: 300 });
    assert!(validate_node_pool(&pool, None).is_empty());

    pool.properties.platform.availability_zone = String::new();
    assert_eq!(
        targets(&validate_node_pool(&pool, None)),
        vec!["properties.replicas", "properties.autoScaling.max"]
    );

    pool.properties.replicas = -1;
    pool.properties.auto_scaling = Some(NodePoolAutoScaling { min: 5, max: 2 });
    let errors = validate_node_pool(&pool, None);
    assert_eq!(
        targets(&errors),
        vec!["properties.replicas", "properties.autoScaling.max"]
    );
    assert_eq!(
        errors.iter().last().unwrap().message,
        "Invalid value '2' for field 'max' (must be at least the value of 'min')"
    );
}

/// Test: node pool version, disk and taint content is checked
#[test]
fn test_node_pool_content() {
    let mut pool = full_node_pool();
    pool.properties.version.id = "4.19.7.1".to_string();
    pool.properties.platform.os_disk.size_gib = 32;
    pool.properties.platform.os_disk.encryption_set_id = Some(id(NSG_ID));
    pool.properties.taints.push(Taint::default());

    let errors = validate_node_pool(&pool, None);

    assert_eq!(
        targets(&errors),
        vec![
            "properties.version.id",
            "properties.platform.osDisk.sizeGiB",
            "properties.platform.osDisk.encryptionSetId",
            "properties.taints[1].key",
        ]
    );
    assert_eq!(
        errors.iter().next().unwrap().message,
        "Invalid OpenShift version '4.19.7.1'"
    );
}

/// Test: the node pool version may omit or include the patch level
#[test]
fn test_node_pool_version_forms() {
    let mut pool = full_node_pool();
    for version in ["4.19", "4.19.7", ""] {
        pool.properties.version.id = version.to_string();
        assert!(validate_node_pool(&pool, None).is_empty(), "{}", version);
    }
    pool.properties.version.id = "4.x".to_string();
    assert!(!validate_node_pool(&pool, None).is_empty());
}

/// Test: issuer, audience and client limits are checked
#[test]
fn test_external_auth_content() {
    let mut auth = full_external_auth();
    auth.properties.issuer.url = "http://login.example.com".to_string();
    auth.properties.issuer.audiences = vec!["a".to_string(); MAX_AUDIENCES + 1];
    auth.properties.clients[0].component.auth_client_namespace = "n".repeat(64);

    let errors = validate_external_auth(&auth, None);

    assert_eq!(
        targets(&errors),
        vec![
            "properties.issuer.url",
            "properties.issuer.audiences",
            "properties.clients[0].component.authClientNamespace",
        ]
    );
    assert_eq!(
        errors.iter().next().unwrap().message,
        "Invalid value 'http://login.example.com' for field 'url' (must start with 'https://')"
    );
}
