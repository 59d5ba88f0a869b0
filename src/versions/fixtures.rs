//! Fully populated canonical resources shared by the conversion tests

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::api::arm::{ManagedServiceIdentity, SystemData, UserAssignedIdentity};
use crate::api::cluster::{
    CustomerManagedEncryptionProfile, HcpOpenShiftCluster, KmsEncryptionProfile, KmsKey,
};
use crate::api::enums::{
    ClusterImageRegistryProfileState, ConditionStatusType, CreatedByType,
    CustomerManagedEncryptionType, DiskStorageAccountType, Effect,
    EtcdDataEncryptionKeyManagementModeType, ExternalAuthClientType, ExternalAuthConditionType,
    ManagedServiceIdentityType, ProvisioningState, TokenValidationRuleType,
    UsernameClaimPrefixPolicy, Visibility,
};
use crate::api::external_auth::{
    ExternalAuthClientComponentProfile, ExternalAuthClientProfile, ExternalAuthCondition,
    GroupClaimProfile, HcpOpenShiftClusterExternalAuth, TokenClaimValidationRule,
    TokenRequiredClaim,
};
use crate::api::node_pool::{HcpOpenShiftClusterNodePool, NodePoolAutoScaling, Taint};
use crate::api::resource_id::ResourceId;

pub const CLUSTER_ID: &str =
    "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters/dev";
pub const NODE_POOL_ID: &str = "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters/dev/nodePools/workers";
pub const EXTERNAL_AUTH_ID: &str = "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters/dev/externalAuths/entra";
pub const SUBNET_ID: &str =
    "/subscriptions/sub-1/resourceGroups/net/providers/Microsoft.Network/virtualNetworks/vnet/subnets/nodes";
pub const NSG_ID: &str =
    "/subscriptions/sub-1/resourceGroups/net/providers/Microsoft.Network/networkSecurityGroups/nsg";

pub fn id(s: &str) -> ResourceId {
    ResourceId::parse(s).unwrap()
}

pub fn identity_id(name: &str) -> String {
    format!(
        "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.ManagedIdentity/userAssignedIdentities/{}",
        name
    )
}

pub fn system_data() -> SystemData {
    SystemData {
        created_by: "alice@example.com".to_string(),
        created_by_type: CreatedByType::User,
        created_at: Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()),
        last_modified_by: "alice@example.com".to_string(),
        last_modified_by_type: CreatedByType::User,
        last_modified_at: Some(Utc.with_ymd_and_hms(2025, 1, 3, 3, 4, 5).unwrap()),
    }
}

pub fn managed_identity() -> ManagedServiceIdentity {
    let mut identities = BTreeMap::new();
    identities.insert(
        identity_id("cp-ingress"),
        Some(UserAssignedIdentity {
            client_id: Some("11111111-1111-1111-1111-111111111111".to_string()),
            principal_id: Some("22222222-2222-2222-2222-222222222222".to_string()),
        }),
    );
    ManagedServiceIdentity {
        type_: ManagedServiceIdentityType::UserAssigned,
        principal_id: String::new(),
        tenant_id: String::new(),
        user_assigned_identities: identities,
    }
}

/// A cluster with every field the latest version knows set to a non-default value
pub fn full_cluster() -> HcpOpenShiftCluster {
    let mut cluster = HcpOpenShiftCluster::new_default(Some(&id(CLUSTER_ID)));
    cluster.resource.location = "eastus".to_string();
    cluster.resource.tags.insert("team".to_string(), "platform".to_string());
    cluster.resource.system_data = Some(system_data());
    cluster.identity = Some(managed_identity());

    let customer = &mut cluster.customer_properties;
    customer.version.id = "4.19".to_string();
    customer.version.channel_group = "fast".to_string();
    customer.dns.base_domain_prefix = "dev".to_string();
    customer.network.pod_cidr = "10.132.0.0/14".to_string();
    customer.network.service_cidr = "172.31.0.0/16".to_string();
    customer.network.machine_cidr = "10.1.0.0/16".to_string();
    customer.network.host_prefix = 24;
    customer.api.visibility = Visibility::Private;
    customer.api.authorized_cidrs = Some(vec!["10.0.0.0/8".to_string()]);
    customer.platform.managed_resource_group = "dev-managed".to_string();
    customer.platform.subnet_id = Some(id(SUBNET_ID));
    customer.platform.network_security_group_id = Some(id(NSG_ID));
    let identities = &mut customer.platform.operators_authentication.user_assigned_identities;
    identities
        .control_plane_operators
        .insert("ingress".to_string(), id(&identity_id("cp-ingress")));
    identities
        .data_plane_operators
        .insert("disk-csi-driver".to_string(), id(&identity_id("dp-disk")));
    identities.service_managed_identity = Some(id(&identity_id("service")));
    customer.autoscaling.max_nodes_total = 100;
    customer.autoscaling.max_pod_grace_period_seconds = 300;
    customer.autoscaling.max_node_provision_time_seconds = 1200;
    customer.autoscaling.pod_priority_threshold = -5;
    customer.node_drain_timeout_minutes = 30;
    customer.etcd.data_encryption.key_management_mode =
        EtcdDataEncryptionKeyManagementModeType::CustomerManaged;
    customer.etcd.data_encryption.customer_managed = Some(CustomerManagedEncryptionProfile {
        encryption_type: CustomerManagedEncryptionType::Kms,
        kms: Some(KmsEncryptionProfile {
            active_key: KmsKey {
                name: "etcd-key".to_string(),
                vault_name: "dev-vault".to_string(),
                version: "0123456789abcdef".to_string(),
            },
        }),
    });
    customer.cluster_image_registry.state = ClusterImageRegistryProfileState::Disabled;

    let service = &mut cluster.service_provider_properties;
    service.provisioning_state = ProvisioningState::Succeeded;
    service.dns.base_domain = "dev.abcd.example.com".to_string();
    service.console.url = "https://console.dev.example.com".to_string();
    service.api.url = "https://api.dev.example.com:443".to_string();
    service.platform.issuer_url = "https://oidc.example.com/dev".to_string();
    cluster
}

pub fn full_node_pool() -> HcpOpenShiftClusterNodePool {
    let mut pool = HcpOpenShiftClusterNodePool::new_default(Some(&id(NODE_POOL_ID)));
    pool.resource.location = "eastus".to_string();
    pool.resource.system_data = Some(system_data());

    let p = &mut pool.properties;
    p.provisioning_state = ProvisioningState::Succeeded;
    p.version.id = "4.19.7".to_string();
    p.version.channel_group = "fast".to_string();
    p.platform.subnet_id = Some(id(SUBNET_ID));
    p.platform.vm_size = "Standard_D8s_v3".to_string();
    p.platform.enable_encryption_at_host = true;
    p.platform.os_disk.size_gib = 128;
    p.platform.os_disk.disk_storage_account_type = DiskStorageAccountType::StandardSsdLrs;
    p.platform.availability_zone = "2".to_string();
    p.replicas = 3;
    p.auto_repair = true;
    p.auto_scaling = Some(NodePoolAutoScaling { min: 2, max: 6 });
    p.labels.insert("tier".to_string(), "backend".to_string());
    p.taints.push(Taint {
        effect: Effect::NoSchedule,
        key: "dedicated".to_string(),
        value: "infra".to_string(),
    });
    p.node_drain_timeout_minutes = Some(15);
    pool
}

pub fn full_external_auth() -> HcpOpenShiftClusterExternalAuth {
    let mut auth = HcpOpenShiftClusterExternalAuth::new_default(Some(&id(EXTERNAL_AUTH_ID)));
    auth.resource.system_data = Some(system_data());

    let p = &mut auth.properties;
    p.provisioning_state = ProvisioningState::Succeeded;
    p.condition = Some(ExternalAuthCondition {
        type_: ExternalAuthConditionType::Available,
        status: ConditionStatusType::True,
        last_transition_time: Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
        reason: "AsExpected".to_string(),
        message: "All is well".to_string(),
    });
    p.issuer.url = "https://login.example.com/tenant/v2.0".to_string();
    p.issuer.audiences = vec!["openshift".to_string(), "console".to_string()];
    p.issuer.ca = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----".to_string();
    p.clients.push(ExternalAuthClientProfile {
        component: ExternalAuthClientComponentProfile {
            name: "console".to_string(),
            auth_client_namespace: "openshift-console".to_string(),
        },
        client_id: "console-client".to_string(),
        extra_scopes: vec!["email".to_string()],
        type_: ExternalAuthClientType::Confidential,
    });
    p.claim.mappings.username.claim = "email".to_string();
    p.claim.mappings.username.prefix = "sso:".to_string();
    p.claim.mappings.username.prefix_policy = UsernameClaimPrefixPolicy::Prefix;
    p.claim.mappings.groups = Some(GroupClaimProfile {
        claim: "groups".to_string(),
        prefix: "sso:".to_string(),
    });
    p.claim.validation_rules.push(TokenClaimValidationRule {
        type_: TokenValidationRuleType::RequiredClaim,
        required_claim: TokenRequiredClaim {
            claim: "tid".to_string(),
            required_value: "tenant".to_string(),
        },
    });
    auth
}
