//! Prometheus metrics for conversions and backend calls

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics shared between request handlers
pub type SharedMetrics = Arc<ConversionMetrics>;

pub struct ConversionMetrics {
    registry: Registry,
    conversions: IntCounterVec,
    backend_errors: IntCounterVec,
}

impl ConversionMetrics {
    /// Record a converted object, labelled by kind, versions and outcome
    pub fn record_conversion(&self, kind: &str, source: &str, target: &str, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.conversions
            .with_label_values(&[kind, source, target, result])
            .inc();
    }

    /// Record a backend call that failed, labelled by HTTP status
    /// (`transport` when the backend was not reached)
    pub fn record_backend_error(&self, status: Option<u16>) {
        let status = status.map(|s| s.to_string());
        self.backend_errors
            .with_label_values(&[status.as_deref().unwrap_or("transport")])
            .inc();
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Create the metrics registry with every counter registered
pub fn create_metrics() -> Result<SharedMetrics, prometheus::Error> {
    let registry = Registry::new();

    let conversions = IntCounterVec::new(
        Opts::new(
            "hcp_convert_conversions_total",
            "Objects converted between API versions",
        ),
        &["kind", "source", "target", "result"],
    )?;
    registry.register(Box::new(conversions.clone()))?;

    let backend_errors = IntCounterVec::new(
        Opts::new(
            "hcp_convert_backend_errors_total",
            "Failed calls to the cluster-management backend",
        ),
        &["status"],
    )?;
    registry.register(Box::new(backend_errors.clone()))?;

    Ok(Arc::new(ConversionMetrics {
        registry,
        conversions,
        backend_errors,
    }))
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
