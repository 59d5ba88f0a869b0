//! Tests for environment configuration

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

/// Test: nothing set yields the defaults
#[test]
fn test_defaults() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.port, 8080);
    assert_eq!(config.backend_url, "http://localhost:8000");
    assert!(config.required_properties().is_empty());
}

/// Test: every variable is read
#[test]
fn test_all_variables() {
    let config = Config::from_lookup(lookup(&[
        ("HCP_PORT", "9090"),
        ("HCP_BACKEND_URL", "https://api.backend.example.com"),
        ("HCP_BACKEND_TOKEN", "secret"),
        ("HCP_PROVISION_SHARD_ID", "shard-1"),
        ("HCP_PROVISIONER_NOOP_PROVISION", "1"),
        ("HCP_PROVISIONER_NOOP_DEPROVISION", "true"),
    ]))
    .unwrap();

    assert_eq!(config.port, 9090);
    assert_eq!(config.backend_url, "https://api.backend.example.com");
    assert_eq!(config.backend_token.as_deref(), Some("secret"));
    assert_eq!(
        config.required_properties(),
        BTreeMap::from([
            ("provision_shard_id".to_string(), "shard-1".to_string()),
            ("provisioner_noop_deprovision".to_string(), "true".to_string()),
            ("provisioner_noop_provision".to_string(), "true".to_string()),
        ])
    );
}

/// Test: flags other than true or 1 are off, empty values are unset
#[test]
fn test_flags_and_empty_values() {
    let config = Config::from_lookup(lookup(&[
        ("HCP_PROVISIONER_NOOP_PROVISION", "yes"),
        ("HCP_BACKEND_TOKEN", ""),
        ("HCP_PORT", ""),
    ]))
    .unwrap();

    assert!(!config.noop_provision);
    assert!(config.backend_token.is_none());
    assert_eq!(config.port, DEFAULT_PORT);
}

/// Test: a port that is not a number is rejected
#[test]
fn test_invalid_port() {
    let err = Config::from_lookup(lookup(&[("HCP_PORT", "http")])).unwrap_err();

    assert_eq!(
        err,
        ConfigError::Invalid {
            name: "HCP_PORT",
            value: "http".to_string()
        }
    );
}
