//! API version 2025-12-23-preview
//!
//! New in this version:
//! - `properties.api.authorizedCidrs` on clusters
//! - `properties.etcd` customer-managed data encryption on clusters
//! - `properties.clusterImageRegistry` on clusters
//! - `properties.nodeDrainTimeoutMinutes` on clusters and node pools

mod cluster;
mod node_pool;

pub use cluster::{
    ApiProfile, ClusterImageRegistryProfile, CustomerManagedEncryptionProfile,
    EtcdDataEncryptionProfile, EtcdProfile, HcpOpenShiftCluster, HcpOpenShiftClusterProperties,
    KmsEncryptionProfile, KmsKey,
};
pub use node_pool::{HcpOpenShiftClusterNodePool, NodePoolProperties};

// Re-export unchanged types from 2024-06-10-preview
pub use super::v20240610preview::{
    ClusterAutoscalingProfile, ConsoleProfile, DnsProfile, HcpOpenShiftClusterAdminCredential,
    HcpOpenShiftClusterExternalAuth, HcpOpenShiftVersion, Label, ManagedServiceIdentity,
    NetworkProfile, NodePoolAutoScaling, NodePoolPlatformProfile, NodePoolVersionProfile,
    OperatorsAuthenticationProfile, OsDiskProfile, PlatformProfile, ProxyResource, SystemData,
    Taint, TrackedResource, UserAssignedIdentitiesProfile, UserAssignedIdentity, VersionProfile,
};

use crate::api::visibility::VisibilityEntry;

pub const API_VERSION: &str = "2025-12-23-preview";

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
