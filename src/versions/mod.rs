//! Versioned external representations of the canonical resources
//!
//! Each API version owns its wire structs and its visibility tables. Types
//! unchanged between versions live in `common` and are re-exported.
//!
//! ## Conversion rules:
//! - external -> canonical: only fields present in the request overwrite the
//!   canonical value; fields unknown to the version are left untouched
//! - canonical -> external: every field the version knows is emitted,
//!   including zero values, so a GET body can be sent back as a PUT

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::api::cloud_error::CloudError;
use crate::api::error::ConversionError;
use crate::api::field::FieldErrors;
use crate::api::request::{decode_request, CanonicalResource};
use crate::api::resource_id::ResourceId;
use crate::api::visibility::{VisibilityEntry, VisibilityError, VisibilityMap};
use crate::api::{
    HcpOpenShiftCluster, HcpOpenShiftClusterAdminCredential, HcpOpenShiftClusterExternalAuth,
    HcpOpenShiftClusterNodePool, HcpOpenShiftVersion,
};

pub mod common;
pub mod external_auth;
pub mod v20240610preview;
pub mod v20251223preview;

#[cfg(test)]
pub(crate) mod fixtures;

/// An external representation of a canonical resource in one API version
pub trait VersionedResource: Serialize + DeserializeOwned + Default {
    type Internal: CanonicalResource;

    /// Fill every absent field that has a non-zero default
    fn set_default_values(&mut self);

    /// Overwrite `out` with every field present in `self`
    fn normalize(&self, out: &mut Self::Internal) -> Result<(), FieldErrors>;

    fn project(from: &Self::Internal) -> Self;

    fn visibility_map() -> &'static VisibilityMap;
}

/// Build a visibility map for a static table.
///
/// Tables are checked at startup by [`check_visibility_tables`]; a malformed
/// table here falls back to the permissive default map.
pub(crate) fn build_visibility_map(name: &str, table: &[VisibilityEntry]) -> VisibilityMap {
    VisibilityMap::from_table(table).unwrap_or_else(|e| {
        error!(table = name, error = %e, "Invalid visibility table");
        VisibilityMap::default()
    })
}

/// Validate every visibility table of every API version
pub fn check_visibility_tables() -> Result<usize, VisibilityError> {
    let tables = v20240610preview::visibility_tables()
        .into_iter()
        .chain(v20251223preview::visibility_tables());
    let mut count = 0;
    for (_, table) in tables {
        VisibilityMap::from_table(table)?;
        count += 1;
    }
    Ok(count)
}

/// Supported API versions, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "2024-06-10-preview")]
    V20240610Preview,
    #[serde(rename = "2025-12-23-preview")]
    V20251223Preview,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V20240610Preview, ApiVersion::V20251223Preview];

    pub const LATEST: ApiVersion = ApiVersion::V20251223Preview;

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V20240610Preview => "2024-06-10-preview",
            ApiVersion::V20251223Preview => "2025-12-23-preview",
        }
    }

    pub fn decode_cluster(
        &self,
        method: &Method,
        resource_id: &ResourceId,
        body: &[u8],
        current: Option<&HcpOpenShiftCluster>,
    ) -> Result<HcpOpenShiftCluster, CloudError> {
        match self {
            ApiVersion::V20240610Preview => decode_request::<v20240610preview::HcpOpenShiftCluster>(
                method,
                resource_id,
                body,
                current,
            ),
            ApiVersion::V20251223Preview => decode_request::<v20251223preview::HcpOpenShiftCluster>(
                method,
                resource_id,
                body,
                current,
            ),
        }
    }

    pub fn decode_node_pool(
        &self,
        method: &Method,
        resource_id: &ResourceId,
        body: &[u8],
        current: Option<&HcpOpenShiftClusterNodePool>,
    ) -> Result<HcpOpenShiftClusterNodePool, CloudError> {
        match self {
            ApiVersion::V20240610Preview => decode_request::<v20240610preview::HcpOpenShiftClusterNodePool>(
                method,
                resource_id,
                body,
                current,
            ),
            ApiVersion::V20251223Preview => decode_request::<v20251223preview::HcpOpenShiftClusterNodePool>(
                method,
                resource_id,
                body,
                current,
            ),
        }
    }

    pub fn decode_external_auth(
        &self,
        method: &Method,
        resource_id: &ResourceId,
        body: &[u8],
        current: Option<&HcpOpenShiftClusterExternalAuth>,
    ) -> Result<HcpOpenShiftClusterExternalAuth, CloudError> {
        // External auth has the same shape in every version.
        decode_request::<external_auth::HcpOpenShiftClusterExternalAuth>(method, resource_id, body, current)
    }

    pub fn project_cluster(&self, cluster: &HcpOpenShiftCluster) -> Result<Value, CloudError> {
        match self {
            ApiVersion::V20240610Preview => to_json(&v20240610preview::HcpOpenShiftCluster::project(cluster)),
            ApiVersion::V20251223Preview => to_json(&v20251223preview::HcpOpenShiftCluster::project(cluster)),
        }
    }

    pub fn project_node_pool(&self, node_pool: &HcpOpenShiftClusterNodePool) -> Result<Value, CloudError> {
        match self {
            ApiVersion::V20240610Preview => {
                to_json(&v20240610preview::HcpOpenShiftClusterNodePool::project(node_pool))
            }
            ApiVersion::V20251223Preview => {
                to_json(&v20251223preview::HcpOpenShiftClusterNodePool::project(node_pool))
            }
        }
    }

    pub fn project_external_auth(&self, auth: &HcpOpenShiftClusterExternalAuth) -> Result<Value, CloudError> {
        to_json(&external_auth::HcpOpenShiftClusterExternalAuth::project(auth))
    }

    pub fn project_admin_credential(
        &self,
        credential: &HcpOpenShiftClusterAdminCredential,
    ) -> Result<Value, CloudError> {
        to_json(&common::HcpOpenShiftClusterAdminCredential::project(credential))
    }

    pub fn project_version(&self, version: &HcpOpenShiftVersion) -> Result<Value, CloudError> {
        to_json(&common::HcpOpenShiftVersion::project(version))
    }

    /// Re-express an external body of this version in `target`
    pub fn convert(&self, kind: ResourceKind, target: ApiVersion, body: Value) -> Result<Value, CloudError> {
        match kind {
            ResourceKind::Cluster => {
                let cluster = match self {
                    ApiVersion::V20240610Preview => normalize_value::<v20240610preview::HcpOpenShiftCluster>(body)?,
                    ApiVersion::V20251223Preview => normalize_value::<v20251223preview::HcpOpenShiftCluster>(body)?,
                };
                target.project_cluster(&cluster)
            }
            ResourceKind::NodePool => {
                let node_pool = match self {
                    ApiVersion::V20240610Preview => {
                        normalize_value::<v20240610preview::HcpOpenShiftClusterNodePool>(body)?
                    }
                    ApiVersion::V20251223Preview => {
                        normalize_value::<v20251223preview::HcpOpenShiftClusterNodePool>(body)?
                    }
                };
                target.project_node_pool(&node_pool)
            }
            ResourceKind::ExternalAuth => {
                let auth = normalize_value::<external_auth::HcpOpenShiftClusterExternalAuth>(body)?;
                target.project_external_auth(&auth)
            }
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiVersion::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ConversionError::UnsupportedApiVersion(s.to_string()))
    }
}

/// Resource kinds that have a versioned representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Cluster,
    NodePool,
    ExternalAuth,
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, CloudError> {
    serde_json::to_value(value).map_err(|e| {
        error!(error = %e, "Failed to serialize external representation");
        CloudError::internal_server_error()
    })
}

fn normalize_value<V: VersionedResource>(body: Value) -> Result<V::Internal, CloudError> {
    let mut external: V =
        serde_json::from_value(body).map_err(|e| CloudError::invalid_request_content("", e))?;
    external.set_default_values();
    let mut out = V::Internal::new_default(None);
    external.normalize(&mut out).map_err(|errs| {
        errs.into_cloud_error()
            .unwrap_or_else(CloudError::internal_server_error)
    })?;
    Ok(out)
}

#[cfg(test)]
#[path = "versions_test.rs"]
mod tests;
