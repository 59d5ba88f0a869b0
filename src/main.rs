use hcp_convert::backend::HttpBackendClient;
use hcp_convert::config::Config;
use hcp_convert::server::metrics::{create_metrics, SharedMetrics};
use hcp_convert::server::{run_server, shutdown_channel, wait_for_signal, ReadinessState, ServerState};
use hcp_convert::versions::check_visibility_tables;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// How long in-flight requests get to finish after a termination signal
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire the backend client and shared state from the configuration
pub fn build_state(config: &Config, readiness: ReadinessState, metrics: SharedMetrics) -> ServerState {
    let backend = HttpBackendClient::new(config.backend_url.clone(), config.backend_token.clone());
    ServerState::new(readiness, metrics, Arc::new(backend))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting HCP API version conversion service");

    let config = Config::from_env()?;
    info!(
        port = config.port,
        backend_url = %config.backend_url,
        backend_token = config.backend_token.is_some(),
        cluster_properties = ?config.required_properties(),
        "Configuration loaded"
    );

    let tables = match check_visibility_tables() {
        Ok(count) => count,
        Err(e) => {
            error!(error = %e, "Invalid visibility table");
            return Err(e.into());
        }
    };
    info!(tables, "Visibility tables checked");

    let metrics = create_metrics()?;
    info!("Prometheus metrics registry initialized");

    let (shutdown_controller, shutdown_signal) = shutdown_channel();
    let readiness = ReadinessState::new();
    let state = build_state(&config, readiness.clone(), metrics);

    let port = config.port;
    let mut server_handle = tokio::spawn(async move { run_server(port, state, shutdown_signal).await });

    readiness.set_ready();
    info!("Service ready");

    tokio::select! {
        result = &mut server_handle => {
            match result {
                Ok(Ok(())) => info!("Server stopped"),
                Ok(Err(e)) => error!(error = %e, "Server failed"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
            return Ok(());
        }
        signal = wait_for_signal() => {
            let signal = signal?;
            info!(signal, "Initiating graceful shutdown");
            // Stop receiving traffic before draining
            readiness.set_not_ready();
        }
    }

    shutdown_controller.shutdown();

    match tokio::time::timeout(DRAIN_TIMEOUT, server_handle).await {
        Ok(Ok(Ok(()))) => info!("Service shut down gracefully"),
        Ok(Ok(Err(e))) => warn!(error = %e, "Server failed during shutdown"),
        Ok(Err(e)) => warn!(error = %e, "Server task panicked during shutdown"),
        Err(_) => warn!("Drain timed out, exiting"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
