//! Tests for Prometheus metrics

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

/// Test: a fresh registry encodes without error
#[test]
fn test_create_metrics() {
    let metrics = create_metrics().unwrap();
    assert!(metrics.encode().is_ok());
}

/// Test: conversions are counted per kind, versions and result
#[test]
fn test_record_conversion() {
    let metrics = create_metrics().unwrap();

    metrics.record_conversion("cluster", "2024-06-10-preview", "2025-12-23-preview", true);
    metrics.record_conversion("cluster", "2024-06-10-preview", "2025-12-23-preview", true);
    metrics.record_conversion("nodePool", "2025-12-23-preview", "2024-06-10-preview", false);

    let text = metrics.encode().unwrap();
    assert!(text.contains(
        "hcp_convert_conversions_total{kind=\"cluster\",result=\"success\",source=\"2024-06-10-preview\",target=\"2025-12-23-preview\"} 2"
    ), "{}", text);
    assert!(text.contains("result=\"failure\""), "{}", text);
}

/// Test: backend errors without a status are labelled as transport errors
#[test]
fn test_record_backend_error() {
    let metrics = create_metrics().unwrap();

    metrics.record_backend_error(Some(503));
    metrics.record_backend_error(None);

    let text = metrics.encode().unwrap();
    assert!(text.contains("hcp_convert_backend_errors_total{status=\"503\"} 1"), "{}", text);
    assert!(text.contains("hcp_convert_backend_errors_total{status=\"transport\"} 1"), "{}", text);
}
