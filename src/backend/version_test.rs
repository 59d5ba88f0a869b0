//! Tests for backend version strings

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

/// Test: bare minors get the default patch for their minor
#[test]
fn test_to_xyz_default_patch() {
    assert_eq!(to_xyz("4.19", "stable"), "openshift-v4.19.7");
    assert_eq!(to_xyz("4.20", "stable"), "openshift-v4.20.8");
    assert_eq!(to_xyz("4.18", "stable"), "openshift-v4.18.0");
    assert_eq!(to_xyz("4", "stable"), "openshift-v4.0.0");
}

/// Test: explicit patches and prereleases are kept
#[test]
fn test_to_xyz_keeps_patch_and_prerelease() {
    assert_eq!(to_xyz("4.19.3", "stable"), "openshift-v4.19.3");
    assert_eq!(to_xyz("4.20.0-rc.1", "candidate"), "openshift-v4.20.0-rc.1-candidate");
    assert_eq!(
        to_xyz("4.20.0-0.nightly-multi-2025-11-07-082930", "nightly"),
        "openshift-v4.20.0-0.nightly-multi-2025-11-07-082930-nightly"
    );
}

/// Test: only non-stable channels are appended
#[test]
fn test_to_xyz_channels() {
    assert_eq!(to_xyz("4.19", ""), "openshift-v4.19.7");
    assert_eq!(to_xyz("4.19", "stable"), "openshift-v4.19.7");
    assert_eq!(to_xyz("4.19", "fast"), "openshift-v4.19.7-fast");
    assert_eq!(to_xyz("4.19", "candidate"), "openshift-v4.19.7-candidate");
}

/// Test: an empty version stays empty
#[test]
fn test_to_xyz_empty() {
    assert_eq!(to_xyz("", "candidate"), "");
}

/// Test: backend versions reduce to major.minor
#[test]
fn test_to_xy() {
    assert_eq!(to_xy("openshift-v4.19.7"), "4.19");
    assert_eq!(to_xy("openshift-v4.20.0-rc.1-candidate"), "4.20");
    assert_eq!(to_xy("4.18.2"), "4.18");
    assert_eq!(to_xy("4"), "4");
}

/// Test: every supported minor and channel survives a round trip
#[test]
fn test_round_trip_per_minor_and_channel() {
    for minor in ["4.18", "4.19", "4.20"] {
        for channel in ["stable", "fast", "candidate", "nightly"] {
            let backend = to_xyz(minor, channel);
            assert!(backend.starts_with(OPENSHIFT_VERSION_PREFIX), "{}", backend);
            assert_eq!(to_xy(&backend), minor, "{} via {}", minor, channel);
        }
    }
}

/// Test: prefix helpers only touch the leading prefix
#[test]
fn test_prefix_helpers() {
    assert_eq!(strip_prefix("openshift-v4.19.7"), "4.19.7");
    assert_eq!(strip_prefix("4.19.7"), "4.19.7");

    assert_eq!(add_prefix("4.19.7"), "openshift-v4.19.7");
    assert_eq!(add_prefix("openshift-v4.19.7"), "openshift-v4.19.7");
    assert_eq!(add_prefix(""), "");
}
