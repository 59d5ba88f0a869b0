//! Health, metrics and conversion endpoints
//!
//! - `/healthz` - Liveness: Is the process alive?
//! - `/readyz` - Readiness: Is the service ready to handle requests?
//! - `/metrics` - Prometheus metrics in text format
//! - `/convert` - Batch conversion between API versions
//! - `/subscriptions/{subscription_id}/providers/Microsoft.RedHatOpenShift/locations/{location}/hcpOpenShiftVersions`
//!   - OpenShift versions offered by the backend

use crate::backend::BackendClient;
use crate::server::metrics::SharedMetrics;
use crate::server::shutdown::ShutdownSignal;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state for readiness tracking
///
/// Set to ready once the visibility tables are checked and the server is
/// bound.
#[derive(Debug, Clone)]
pub struct ReadinessState {
    ready: Arc<std::sync::atomic::AtomicBool>,
}

impl ReadinessState {
    /// Create a new readiness state (initially not ready)
    pub fn new() -> Self {
        Self {
            ready: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    pub fn set_ready(&self) {
        self.ready.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    /// Mark the service as not ready (e.g., during shutdown)
    pub fn set_not_ready(&self) {
        self.ready.store(false, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Default for ReadinessState {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by every handler
#[derive(Clone)]
pub struct ServerState {
    pub(crate) readiness: ReadinessState,
    pub(crate) metrics: SharedMetrics,
    pub(crate) backend: Arc<dyn BackendClient>,
}

impl ServerState {
    pub fn new(readiness: ReadinessState, metrics: SharedMetrics, backend: Arc<dyn BackendClient>) -> Self {
        Self {
            readiness,
            metrics,
            backend,
        }
    }
}

/// Liveness probe handler
///
/// Always returns 200 OK - if this responds, the process is alive.
async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe handler
///
/// Returns 200 OK if ready, 503 Service Unavailable if not.
async fn readyz(State(state): State<ServerState>) -> StatusCode {
    if state.readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(State(state): State<ServerState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(self::metrics))
        .route("/convert", post(super::convert::handle_convert))
        .route(
            "/subscriptions/{subscription_id}/providers/Microsoft.RedHatOpenShift/locations/{location}/hcpOpenShiftVersions",
            get(super::versions::list_versions),
        )
        .with_state(state)
}

/// Serve every endpoint on `listener` until `shutdown` fires, then drain
/// in-flight requests
pub async fn serve(
    listener: TcpListener,
    state: ServerState,
    mut shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
}

/// Bind `port` on every interface and serve every endpoint on it
pub async fn run_server(
    port: u16,
    state: ServerState,
    shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Server listening");
    serve(listener, state, shutdown).await
}
