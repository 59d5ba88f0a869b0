//! Tests for optional/required conversion helpers

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

/// Test: an absent value normalizes to zero, a present one unchanged
#[test]
fn test_optional_to_required() {
    assert_eq!(optional_to_required::<i32>(None), 0);
    assert_eq!(optional_to_required(Some(0i32)), 0);
    assert_eq!(optional_to_required(Some(7i32)), 7);
    assert_eq!(optional_to_required::<String>(None), String::new());
}

/// Test: projection keeps zero values present
#[test]
fn test_required_to_optional_preserves_zero() {
    assert_eq!(required_to_optional(0i32), Some(0));
    assert_eq!(required_to_optional(false), Some(false));
    assert_eq!(required_to_optional(String::new()), Some(String::new()));
}

/// Test: the zero-suppressing variant omits zero values only
#[test]
fn test_required_to_optional_or_none() {
    assert_eq!(required_to_optional_or_none(String::new()), None);
    assert_eq!(
        required_to_optional_or_none("https://console".to_string()),
        Some("https://console".to_string())
    );
    assert_eq!(required_to_optional_or_none(0i32), None);
}

/// Test: slice helpers keep None and empty apart
#[test]
fn test_slice_helpers_preserve_none_vs_empty() {
    assert_eq!(optional_to_slice::<String>(None), None);
    assert_eq!(optional_to_slice::<String>(Some(&[][..])), Some(vec![]));

    let with_nulls = vec![Some("a".to_string()), None, Some("b".to_string())];
    assert_eq!(
        optional_to_slice(Some(with_nulls.as_slice())),
        Some(vec!["a".to_string(), "b".to_string()])
    );

    assert_eq!(slice_to_optional::<String>(None), None);
    assert_eq!(slice_to_optional::<String>(Some(&[][..])), Some(vec![]));
}

/// Test: null map entries are dropped
#[test]
fn test_optional_to_map_drops_nulls() {
    let mut src = BTreeMap::new();
    src.insert("keep".to_string(), Some("v".to_string()));
    src.insert("drop".to_string(), None);

    let out = optional_to_map(Some(&src));
    assert_eq!(out.len(), 1);
    assert_eq!(out.get("keep"), Some(&"v".to_string()));

    assert!(optional_to_map::<String>(None).is_empty());
}

/// Test: empty maps project to None
#[test]
fn test_map_to_optional() {
    assert_eq!(map_to_optional::<String>(&BTreeMap::new()), None);

    let mut m = BTreeMap::new();
    m.insert("k".to_string(), "v".to_string());
    let out = map_to_optional(&m).unwrap();
    assert_eq!(out.get("k"), Some(&Some("v".to_string())));
}
