//! Cluster-management backend: wire model, client and conversions
//!
//! - `model` - sparse backend wire types
//! - `convert` - canonical resources to and from backend objects
//! - `client` - typed HTTP client with paged list iteration
//! - `error` - backend failures and their cloud error mapping

pub mod client;
pub mod convert;
pub mod error;
pub mod internal_id;
pub mod iterator;
pub mod model;
pub mod version;

pub use client::{BackendClient, HttpBackendClient};
pub use error::{cloud_error_from_backend, BackendError};
pub use internal_id::{InternalId, InternalIdKind};
pub use iterator::{ListIterator, Page, PageFetcher};
