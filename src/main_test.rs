#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use hcp_convert::server::build_router;

/// Test: the wired state serves the router with readiness shared with main
#[tokio::test]
async fn test_build_state() {
    let readiness = ReadinessState::new();
    let state = build_state(&Config::default(), readiness.clone(), create_metrics().unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    let url = format!("http://{}/readyz", addr);
    assert_eq!(reqwest::get(&url).await.unwrap().status(), 503);
    readiness.set_ready();
    assert_eq!(reqwest::get(&url).await.unwrap().status(), 200);
}

/// Test: the shipped visibility tables are valid
#[test]
fn test_visibility_tables() {
    assert!(check_visibility_tables().unwrap() > 0);
}
