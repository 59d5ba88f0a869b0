//! Tests for shared backend conversion helpers

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::api::error::is_unknown_value;
use chrono::{TimeZone, Utc};

/// Test: durations in the backend's formats parse to seconds
#[test]
fn test_parse_duration_seconds() {
    assert_eq!(parse_duration_seconds("15m").unwrap(), 900);
    assert_eq!(parse_duration_seconds("90s").unwrap(), 90);
    assert_eq!(parse_duration_seconds("1h30m").unwrap(), 5400);
    assert_eq!(parse_duration_seconds("20m0s").unwrap(), 1200);
    assert_eq!(parse_duration_seconds("1.5m").unwrap(), 90);
}

/// Test: malformed durations are rejected
#[test]
fn test_parse_duration_rejects_garbage() {
    for bad in ["", "15", "m", "15x", "1.2.3m", "-5m"] {
        let err = parse_duration_seconds(bad).unwrap_err();
        assert_eq!(err, ConversionError::InvalidDuration(bad.to_string()), "{:?}", bad);
    }
}

/// Test: seconds are sent as fractional minutes
#[test]
fn test_format_duration_minutes() {
    assert_eq!(format_duration_minutes(900), "15m");
    assert_eq!(format_duration_minutes(90), "1.5m");
    assert_eq!(format_duration_minutes(0), "0m");
    assert_eq!(parse_duration_seconds(&format_duration_minutes(1200)).unwrap(), 1200);
}

/// Test: node drain periods in other units are ignored
#[test]
fn test_node_drain_minutes() {
    assert_eq!(node_drain_minutes(Some(&node_drain_grace_period(30))), Some(30));
    let hours = ValueWithUnit {
        unit: Some("hours".to_string()),
        value: Some(1.0),
    };
    assert_eq!(node_drain_minutes(Some(&hours)), None);
    assert_eq!(node_drain_minutes(None), None);
}

/// Test: values outside the vocabulary are reported as unknown values
#[test]
fn test_unknown_values() {
    let errors = [
        listening_to_visibility("vpn").unwrap_err(),
        outbound_type_from_backend("nat_gateway").unwrap_err(),
        image_registry_state_from_backend("paused").unwrap_err(),
        key_management_mode_from_backend("hsm").unwrap_err(),
        encryption_type_from_backend("aes").unwrap_err(),
        prefix_policy_from_backend("Suffix").unwrap_err(),
        client_type_from_backend("robot").unwrap_err(),
        visibility_to_listening(Visibility::Unset).unwrap_err(),
    ];
    for err in &errors {
        assert!(is_unknown_value(err), "{}", err);
    }
}

/// Test: the empty prefix policy means no policy
#[test]
fn test_prefix_policy_none() {
    assert_eq!(prefix_policy_from_backend("").unwrap(), UsernameClaimPrefixPolicy::None);
    assert_eq!(prefix_policy_to_backend(UsernameClaimPrefixPolicy::None).unwrap(), "");
    assert_eq!(
        prefix_policy_to_backend(UsernameClaimPrefixPolicy::NoPrefix).unwrap(),
        "NoPrefix"
    );
}

/// Test: break-glass credentials keep their kubeconfig and expiry
#[test]
fn test_convert_admin_credential() {
    let expires = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let credential = BreakGlassCredential {
        expiration_timestamp: Some(expires),
        kubeconfig: Some("apiVersion: v1\nkind: Config\n".to_string()),
        status: Some("issued".to_string()),
        ..Default::default()
    };

    let converted = convert_admin_credential(&credential);

    assert_eq!(converted.expiration_timestamp, Some(expires));
    assert_eq!(converted.kubeconfig, "apiVersion: v1\nkind: Config\n");
}

/// Test: versions take their identity from the resource ID
#[test]
fn test_convert_version() {
    let resource_id = ResourceId::parse(
        "/subscriptions/sub-1/providers/Microsoft.RedHatOpenShift/locations/eastus/hcpOpenShiftVersions/4.19.7",
    )
    .unwrap();
    let version = Version {
        id: Some("openshift-v4.19.7".to_string()),
        channel_group: Some("stable".to_string()),
        enabled: Some(true),
        end_of_life_timestamp: Some(Utc.with_ymd_and_hms(2026, 12, 17, 0, 0, 0).unwrap()),
        ..Default::default()
    };

    let converted = convert_version(&resource_id, &version);

    assert_eq!(converted.resource.name, "4.19.7");
    assert_eq!(converted.resource.id, Some(resource_id));
    assert_eq!(converted.properties.channel_group, "stable");
    assert!(converted.properties.enabled);
    assert_eq!(
        converted.properties.end_of_life_timestamp,
        version.end_of_life_timestamp
    );
}
