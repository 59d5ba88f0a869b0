//! Tests for visibility tables and request validation

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use serde_json::json;

const TABLE: &[VisibilityEntry] = &[
    ("id", "read nocase", Shape::Value),
    ("tags", "read create update", Shape::Map),
    ("properties", "read create update", Shape::Object),
    ("properties.provisioningState", "read", Shape::Value),
    ("properties.network", "read create", Shape::Object),
    ("properties.console", "read", Shape::Object),
    ("properties.autoscaling", "read create update", Shape::Object),
    ("properties.identities", "read create", Shape::Map),
    ("properties.taints", "read create update", Shape::List),
];

fn map() -> VisibilityMap {
    VisibilityMap::from_table(TABLE).unwrap()
}

fn messages(errors: &[CloudErrorBody]) -> Vec<(String, String)> {
    errors
        .iter()
        .map(|e| (e.target.clone(), e.message.clone()))
        .collect()
}

/// Test: flag words parse and read-only is read without create or update
#[test]
fn test_flags_parse() {
    let flags = VisibilityFlags::parse("read create update").unwrap();
    assert_eq!(flags, VisibilityFlags::DEFAULT);
    assert!(!flags.read_only());

    let read = VisibilityFlags::parse("read nocase").unwrap();
    assert!(read.read_only());
    assert!(read.case_insensitive());
    assert_eq!(read.to_string(), "read nocase");

    assert_eq!(
        VisibilityFlags::parse("read delete"),
        Err(VisibilityError::UnknownFlag("delete".to_string()))
    );
}

/// Test: malformed tables are rejected
#[test]
fn test_from_table_rejects_malformed() {
    let duplicate: &[VisibilityEntry] = &[("a", "read", Shape::Value), ("a", "read", Shape::Value)];
    assert_eq!(
        VisibilityMap::from_table(duplicate).unwrap_err(),
        VisibilityError::DuplicatePath("a".to_string())
    );

    let out_of_order: &[VisibilityEntry] = &[("a.b", "read", Shape::Value), ("a", "read", Shape::Object)];
    assert!(matches!(
        VisibilityMap::from_table(out_of_order),
        Err(VisibilityError::ChildBeforeParent(_, _))
    ));
}

/// Test: undeclared paths inherit the nearest declared ancestor
#[test]
fn test_flags_inherited() {
    let map = map();
    assert!(!map.flags("properties.network.podCidr").read_only());
    assert!(!map.flags("properties.network.podCidr").can_update());
    assert!(map.flags("properties.console.url").read_only());
    assert_eq!(map.flags("location"), VisibilityFlags::DEFAULT | VisibilityFlags::NULLABLE);
    assert!(map.flags("properties.autoscaling").is_nullable());
    assert!(!map.flags("properties.network").is_nullable());
}

/// Test: identical documents produce no errors
#[test]
fn test_validate_identical() {
    let doc = json!({"properties": {"network": {"podCidr": "10.128.0.0/14"}}});
    assert!(validate_visibility(&doc, &doc, &map(), true).is_empty());
}

/// Test: changing a create-only field on update is rejected
#[test]
fn test_validate_cannot_be_updated() {
    let new = json!({"properties": {"network": {"podCidr": "10.0.0.0/8"}}});
    let current = json!({"properties": {"network": {"podCidr": "10.128.0.0/14"}}});

    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(
        messages(&errors),
        vec![(
            "properties.network.podCidr".to_string(),
            "Field 'podCidr' cannot be updated".to_string()
        )]
    );

    // The same change is fine on create.
    assert!(validate_visibility(&new, &current, &map(), false).is_empty());
}

/// Test: removing a non-nullable field on update is rejected
#[test]
fn test_validate_cannot_be_removed() {
    let new = json!({"properties": {"network": {"hostPrefix": 23}}});
    let current = json!({"properties": {"network": {"hostPrefix": 23, "podCidr": "10.128.0.0/14"}}});

    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Field 'podCidr' cannot be removed");

    // An emptied create-only object is reported as a change of the object.
    let new = json!({"properties": {"network": {}}});
    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(errors[0].message, "Field 'network' cannot be updated");
}

/// Test: setting a read-only field is rejected on create
#[test]
fn test_validate_read_only() {
    let new = json!({"properties": {"provisioningState": "Succeeded"}});
    let current = json!({"properties": {}});

    let errors = validate_visibility(&new, &current, &map(), false);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target, "properties.provisioningState");
    assert_eq!(errors[0].message, "Field 'provisioningState' is read-only");
}

/// Test: null, absent and empty collections compare equal
#[test]
fn test_validate_empty_collections_equal() {
    let new = json!({"tags": {}, "properties": {"taints": null, "identities": {}}});
    let current = json!({"properties": {"taints": []}});
    assert!(validate_visibility(&new, &current, &map(), true).is_empty());
}

/// Test: non-nullable null equals the zero value
#[test]
fn test_validate_null_equals_zero_when_not_nullable() {
    let new = json!({"properties": {"network": {"hostPrefix": null}}});
    let current = json!({"properties": {"network": {"hostPrefix": 0}}});
    assert!(validate_visibility(&new, &current, &map(), true).is_empty());
}

/// Test: nocase fields compare case-insensitively
#[test]
fn test_validate_case_insensitive() {
    let new = json!({"id": "/SUBSCRIPTIONS/SUB"});
    let current = json!({"id": "/subscriptions/sub"});
    assert!(validate_visibility(&new, &current, &map(), true).is_empty());

    let changed = json!({"id": "/subscriptions/other"});
    let errors = validate_visibility(&changed, &current, &map(), true);
    assert_eq!(errors[0].message, "Field 'id' cannot be updated");
}

/// Test: map and list subscripts appear in targets
#[test]
fn test_validate_subscripts() {
    let new = json!({"properties": {"identities": {"op": "/new"}}});
    let current = json!({"properties": {"identities": {"op": "/old"}}});
    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(
        messages(&errors),
        vec![(
            "properties.identities[\"op\"]".to_string(),
            "Field 'identities[\"op\"]' cannot be updated".to_string()
        )]
    );

    let new = json!({"properties": {"network": {"list": ["a", "b"]}}});
    let current = json!({"properties": {"network": {"list": ["a", "c"]}}});
    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(errors[0].target, "properties.network.list[1]");
}

/// Test: adding a map key to a create-only map is rejected at the map
#[test]
fn test_validate_map_keys_changed() {
    let new = json!({"properties": {"identities": {"a": "/x", "b": "/y"}}});
    let current = json!({"properties": {"identities": {"a": "/x"}}});
    let errors = validate_visibility(&new, &current, &map(), true);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].target, "properties.identities");
}

/// Test: updatable tags can change freely
#[test]
fn test_validate_tags_update() {
    let new = json!({"tags": {"a": "1"}});
    let current = json!({"tags": {"b": "2"}});
    assert!(validate_visibility(&new, &current, &map(), true).is_empty());
}

/// Test: read-only values missing from the request are filled in
#[test]
fn test_copy_read_only_values() {
    let src = json!({
        "id": "/subscriptions/sub",
        "properties": {
            "provisioningState": "Succeeded",
            "console": {"url": "https://console"},
            "network": {"podCidr": "10.128.0.0/14"}
        }
    });
    let mut dst = json!({"properties": {"network": {}}});

    copy_read_only_values(&src, &mut dst, &map());

    assert_eq!(
        dst,
        json!({
            "id": "/subscriptions/sub",
            "properties": {
                "provisioningState": "Succeeded",
                "console": {"url": "https://console"},
                "network": {}
            }
        })
    );
}

/// Test: zero detection
#[test]
fn test_is_zero() {
    assert!(is_zero(&json!(null)));
    assert!(is_zero(&json!(0)));
    assert!(is_zero(&json!("")));
    assert!(is_zero(&json!({"a": {"b": false}})));
    assert!(!is_zero(&json!({"a": 1})));
}
