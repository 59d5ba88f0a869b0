//! HTTP server for conversion, version listing, health and metrics
//!
//! Provides health probes:
//! - `/healthz` - Liveness probe (process is running)
//! - `/readyz` - Readiness probe (service is ready to serve)
//!
//! Also provides graceful shutdown handling for SIGTERM/SIGINT.

pub mod convert;
mod health;
pub mod metrics;
pub mod shutdown;
pub mod versions;

pub use health::{build_router, run_server, serve, ReadinessState, ServerState};
pub use shutdown::{shutdown_channel, wait_for_signal, ShutdownController, ShutdownSignal};

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
