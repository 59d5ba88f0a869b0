//! Identifiers of backend resources
//!
//! An `InternalId` is the backend API path of a resource. Paths are
//! lowercased and must match one of the supported path shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::BackendError;

pub const V1_PREFIX: &str = "/api/clusters_mgmt/v1";
pub const ARO_HCP_PREFIX: &str = "/api/aro_hcp/v1alpha1";

const V1_CLUSTER: &str = "/api/clusters_mgmt/v1/clusters/*";
const V1_NODE_POOL: &str = "/api/clusters_mgmt/v1/clusters/*/node_pools/*";
const V1_BREAK_GLASS_CREDENTIAL: &str = "/api/clusters_mgmt/v1/clusters/*/break_glass_credentials/*";
const ARO_HCP_CLUSTER: &str = "/api/aro_hcp/v1alpha1/clusters/*";
const ARO_HCP_NODE_POOL: &str = "/api/aro_hcp/v1alpha1/clusters/*/node_pools/*";
const ARO_HCP_EXTERNAL_AUTH: &str = "/api/aro_hcp/v1alpha1/clusters/*/external_auths/*";

const PATTERNS: &[(&str, InternalIdKind)] = &[
    (V1_CLUSTER, InternalIdKind::Cluster),
    (V1_NODE_POOL, InternalIdKind::NodePool),
    (V1_BREAK_GLASS_CREDENTIAL, InternalIdKind::BreakGlassCredential),
    (ARO_HCP_CLUSTER, InternalIdKind::Cluster),
    (ARO_HCP_NODE_POOL, InternalIdKind::NodePool),
    (ARO_HCP_EXTERNAL_AUTH, InternalIdKind::ExternalAuth),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalIdKind {
    Cluster,
    NodePool,
    ExternalAuth,
    BreakGlassCredential,
}

impl fmt::Display for InternalIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InternalIdKind::Cluster => "Cluster",
            InternalIdKind::NodePool => "NodePool",
            InternalIdKind::ExternalAuth => "ExternalAuth",
            InternalIdKind::BreakGlassCredential => "BreakGlassCredential",
        };
        f.write_str(name)
    }
}

/// A backend resource path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalId {
    path: String,
    kind: InternalIdKind,
}

/// Match `path` against a pattern where `*` stands for exactly one
/// non-empty segment
fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(segment)) if !segment.is_empty() => {}
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return false,
        }
    }
}

impl InternalId {
    pub fn parse(path: &str) -> Result<Self, BackendError> {
        let path = path.to_lowercase();
        PATTERNS
            .iter()
            .find(|(pattern, _)| matches(pattern, &path))
            .map(|(_, kind)| InternalId {
                path: path.clone(),
                kind: *kind,
            })
            .ok_or(BackendError::InvalidInternalId(path))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> InternalIdKind {
        self.kind
    }

    /// The last path element
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Path of the cluster this resource belongs to, in the ARO-HCP API.
    ///
    /// Clusters created through the legacy API are addressed through the
    /// ARO-HCP API as well.
    pub fn cluster_path(&self) -> String {
        let cluster: String = self.path.split('/').take(6).collect::<Vec<_>>().join("/");
        cluster.replacen(V1_PREFIX, ARO_HCP_PREFIX, 1)
    }

    /// Path of the cluster this resource belongs to, in the legacy API
    pub fn legacy_cluster_path(&self) -> String {
        self.cluster_path().replacen(ARO_HCP_PREFIX, V1_PREFIX, 1)
    }

    /// Fail unless the identifier addresses a resource of `kind`
    pub fn expect_kind(&self, kind: InternalIdKind) -> Result<&Self, BackendError> {
        if self.kind == kind {
            Ok(self)
        } else {
            Err(BackendError::WrongKind {
                expected: kind,
                path: self.path.clone(),
            })
        }
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for InternalId {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for InternalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}

impl<'de> Deserialize<'de> for InternalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        InternalId::parse(&path).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "internal_id_test.rs"]
mod tests;
