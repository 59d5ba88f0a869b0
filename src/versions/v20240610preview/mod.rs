//! API version 2024-06-10-preview
//!
//! The first preview. Clusters have no `api.authorizedCidrs`, `etcd`,
//! `clusterImageRegistry` or `nodeDrainTimeoutMinutes`; node pools have no
//! `nodeDrainTimeoutMinutes` either.

mod cluster;
mod node_pool;

pub use cluster::{ApiProfile, HcpOpenShiftCluster, HcpOpenShiftClusterProperties};
pub use node_pool::{HcpOpenShiftClusterNodePool, NodePoolProperties};

// Re-export types shared with later versions
pub use super::common::{
    ClusterAutoscalingProfile, ConsoleProfile, DnsProfile, HcpOpenShiftClusterAdminCredential,
    HcpOpenShiftVersion, Label, ManagedServiceIdentity, NetworkProfile, NodePoolAutoScaling,
    NodePoolPlatformProfile, NodePoolVersionProfile, OperatorsAuthenticationProfile, OsDiskProfile,
    PlatformProfile, ProxyResource, SystemData, Taint, TrackedResource, UserAssignedIdentitiesProfile,
    UserAssignedIdentity, VersionProfile,
};
pub use super::external_auth::HcpOpenShiftClusterExternalAuth;

use crate::api::visibility::VisibilityEntry;

pub const API_VERSION: &str = "2024-06-10-preview";

/// Every visibility table of this version, by resource kind
pub fn visibility_tables() -> [(&'static str, &'static [VisibilityEntry]); 3] {
    [
        ("cluster", cluster::VISIBILITY),
        ("nodePool", node_pool::VISIBILITY),
        ("externalAuth", super::external_auth::VISIBILITY),
    ]
}

#[cfg(test)]
#[path = "cluster_test.rs"]
mod cluster_tests;

#[cfg(test)]
#[path = "node_pool_test.rs"]
mod node_pool_tests;
