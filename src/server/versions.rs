//! OpenShift versions available in a location
//!
//! ## Endpoints
//! - GET /subscriptions/{subscription_id}/providers/Microsoft.RedHatOpenShift/locations/{location}/hcpOpenShiftVersions

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::health::ServerState;
use crate::api::cloud_error::CloudError;
use crate::api::resource_id::ResourceId;
use crate::backend::convert::convert_version;
use crate::backend::version::strip_prefix;
use crate::backend::cloud_error_from_backend;
use crate::versions::ApiVersion;

pub const VERSIONS_RESOURCE_TYPE: &str = "Microsoft.RedHatOpenShift/locations/hcpOpenShiftVersions";

#[derive(Debug, Deserialize)]
pub struct ApiVersionQuery {
    #[serde(rename = "api-version")]
    pub api_version: Option<String>,
}

/// Resolve the `api-version` query parameter
pub fn api_version_from_query(query: &ApiVersionQuery) -> Result<ApiVersion, CloudError> {
    let raw = query
        .api_version
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(CloudError::missing_api_version)?;
    raw.parse()
        .map_err(|_| CloudError::unsupported_api_version(VERSIONS_RESOURCE_TYPE, raw))
}

pub fn version_resource_id(subscription_id: &str, location: &str, name: &str) -> String {
    format!(
        "/subscriptions/{}/providers/Microsoft.RedHatOpenShift/locations/{}/hcpOpenShiftVersions/{}",
        subscription_id, location, name
    )
}

/// List every version the backend offers, as `{"value": [...]}`
pub async fn list_versions(
    State(state): State<ServerState>,
    Path((subscription_id, location)): Path<(String, String)>,
    Query(query): Query<ApiVersionQuery>,
) -> Result<Json<Value>, CloudError> {
    let api_version = api_version_from_query(&query)?;
    debug!(
        subscription_id = %subscription_id,
        location = %location,
        api_version = %api_version,
        "Listing versions"
    );

    let mut iterator = state.backend.list_versions();
    let mut value = Vec::new();
    let mut failure = None;

    iterator
        .items(|version| {
            let name = strip_prefix(version.id.as_deref().unwrap_or_default());
            let raw = version_resource_id(&subscription_id, &location, &name);
            let projected = ResourceId::parse(&raw)
                .map_err(|e| {
                    error!(resource_id = %raw, error = %e, "Invalid version resource ID");
                    CloudError::internal_server_error()
                })
                .and_then(|id| api_version.project_version(&convert_version(&id, &version)));
            match projected {
                Ok(v) => {
                    value.push(v);
                    true
                }
                Err(e) => {
                    failure = Some(e);
                    false
                }
            }
        })
        .await;

    if let Some(err) = iterator.get_error() {
        state.metrics.record_backend_error(err.status());
        return Err(cloud_error_from_backend(err, None));
    }
    if let Some(err) = failure {
        return Err(err);
    }

    Ok(Json(json!({ "value": value })))
}

#[cfg(test)]
#[path = "versions_test.rs"]
mod tests;
