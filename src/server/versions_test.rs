//! Tests for the versions endpoint against an in-process fake backend

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::backend::HttpBackendClient;
use crate::server::metrics::create_metrics;
use crate::server::{build_router, ReadinessState};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const LIST_PATH: &str =
    "/subscriptions/sub-1/providers/Microsoft.RedHatOpenShift/locations/eastus/hcpOpenShiftVersions";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the service against a fake backend serving `backend`
async fn start(backend: Router) -> (String, crate::server::metrics::SharedMetrics) {
    let backend_url = serve(backend).await;
    let metrics = create_metrics().unwrap();
    let state = ServerState::new(
        ReadinessState::new(),
        metrics.clone(),
        Arc::new(HttpBackendClient::new(backend_url, None)),
    );
    (serve(build_router(state)).await, metrics)
}

fn versions_backend() -> Router {
    Router::new().route(
        "/api/aro_hcp/v1alpha1/versions",
        get(|| async {
            Json(json!({
                "kind": "VersionList",
                "page": 1,
                "size": 2,
                "total": 2,
                "items": [
                    {"kind": "Version", "id": "openshift-v4.19.7", "channel_group": "stable", "enabled": true},
                    {
                        "kind": "Version",
                        "id": "openshift-v4.20.8-candidate",
                        "channel_group": "candidate",
                        "enabled": false,
                        "end_of_life_timestamp": "2026-12-01T00:00:00Z"
                    }
                ]
            }))
        }),
    )
}

/// Test: a missing or empty api-version is rejected
#[test]
fn test_api_version_required() {
    for query in [ApiVersionQuery { api_version: None }, ApiVersionQuery { api_version: Some(String::new()) }] {
        let err = api_version_from_query(&query).unwrap_err();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.code(), "MissingApiVersionParameter");
    }
}

/// Test: an unknown api-version names the resource type
#[test]
fn test_api_version_unsupported() {
    let err = api_version_from_query(&ApiVersionQuery {
        api_version: Some("2020-01-01".to_string()),
    })
    .unwrap_err();

    assert_eq!(err.status_code, 400);
    assert_eq!(err.code(), "InvalidResourceType");
    assert!(err.body.message.contains("2020-01-01"));
    assert!(err.body.message.contains(VERSIONS_RESOURCE_TYPE));
}

/// Test: every backend version is listed under the location with its prefix stripped
#[tokio::test]
async fn test_list_versions() {
    let (base, _metrics) = start(versions_backend()).await;

    let response = reqwest::get(format!("{}{}?api-version=2025-12-23-preview", base, LIST_PATH))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let value = body["value"].as_array().unwrap();
    assert_eq!(value.len(), 2);
    assert_eq!(value[0]["id"], format!("{}/4.19.7", LIST_PATH));
    assert_eq!(value[0]["name"], "4.19.7");
    assert_eq!(value[0]["properties"]["channelGroup"], "stable");
    assert_eq!(value[0]["properties"]["enabled"], true);
    assert_eq!(value[1]["name"], "4.20.8-candidate");
    assert_eq!(value[1]["properties"]["enabled"], false);
    assert_eq!(value[1]["properties"]["endOfLifeTimestamp"], "2026-12-01T00:00:00Z");
}

/// Test: the endpoint rejects a request without api-version
#[tokio::test]
async fn test_list_versions_missing_api_version() {
    let (base, _metrics) = start(versions_backend()).await;

    let response = reqwest::get(format!("{}{}", base, LIST_PATH)).await.unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "MissingApiVersionParameter");
}

/// Test: a backend failure is mapped to a cloud error and counted
#[tokio::test]
async fn test_list_versions_backend_error() {
    let backend = Router::new().route(
        "/api/aro_hcp/v1alpha1/versions",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"kind": "Error", "code": "CLUSTERS-MGMT-503", "reason": "try later"})),
            )
        }),
    );
    let (base, metrics) = start(backend).await;

    let response = reqwest::get(format!("{}{}?api-version=2024-06-10-preview", base, LIST_PATH))
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ServiceUnavailable");
    assert_eq!(body["error"]["message"], "try later");
    let text = metrics.encode().unwrap();
    assert!(text.contains("hcp_convert_backend_errors_total{status=\"503\"} 1"), "{}", text);
}
