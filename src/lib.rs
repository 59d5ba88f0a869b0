//! API version conversion for HCP OpenShift clusters, node pools and
//! external auth configurations
//!
//! - `api` - canonical resource model and request primitives
//! - `versions` - versioned external representations
//! - `backend` - cluster-management backend model, conversions and client
//! - `server` - conversion, version listing, health and metrics endpoints

pub mod api;
pub mod backend;
pub mod config;
pub mod server;
pub mod versions;
