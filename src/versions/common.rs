//! Wire types shared by every API version
//!
//! Every leaf is optional so that an absent field can be told apart from an
//! explicit zero value. `normalize` copies present leaves into the canonical
//! model; `project` builds a fully populated wire value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::arm as canonical;
use crate::api::cluster as internal;
use crate::api::enums::{
    CreatedByType, DiskStorageAccountType, Effect, ManagedServiceIdentityType, NetworkType,
    OutboundType,
};
use crate::api::field::{join, FieldErrors};
use crate::api::node_pool as internal_pool;
use crate::api::optional::{
    map_to_optional, optional_to_map, optional_to_required, required_to_optional,
    required_to_optional_or_none,
};
use crate::api::resource_id::{resource_id_to_string, ResourceId};

/// Parse an optional identifier; an empty string clears it
pub(crate) fn normalize_resource_id(
    value: &Option<String>,
    target: &str,
    out: &mut Option<ResourceId>,
    errors: &mut FieldErrors,
) {
    match value.as_deref() {
        None => {}
        Some("") => *out = None,
        Some(s) => {
            if let Some(id) = errors.collect(ResourceId::parse_field(s, target)) {
                *out = Some(id);
            }
        }
    }
}

/// Overwrite `out` when the wire value is present
pub(crate) fn set<T: Clone>(value: &Option<T>, out: &mut T) {
    if let Some(v) = value {
        *out = v.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl SystemData {
    pub fn normalize(&self) -> canonical::SystemData {
        canonical::SystemData {
            created_by: optional_to_required(self.created_by.clone()),
            created_by_type: optional_to_required(self.created_by_type),
            created_at: self.created_at,
            last_modified_by: optional_to_required(self.last_modified_by.clone()),
            last_modified_by_type: optional_to_required(self.last_modified_by_type),
            last_modified_at: self.last_modified_at,
        }
    }

    pub fn project(from: &canonical::SystemData) -> Self {
        Self {
            created_by: required_to_optional(from.created_by.clone()),
            created_by_type: required_to_optional(from.created_by_type),
            created_at: from.created_at,
            last_modified_by: required_to_optional(from.last_modified_by.clone()),
            last_modified_by_type: required_to_optional(from.last_modified_by_type),
            last_modified_at: from.last_modified_at,
        }
    }
}

/// Envelope of a top-level resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackedResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, Option<String>>>,
}

impl TrackedResource {
    pub fn normalize(&self, out: &mut canonical::TrackedResource, errors: &mut FieldErrors) {
        let mut id = out.id.take();
        normalize_resource_id(&self.id, "id", &mut id, errors);
        out.id = id;
        set(&self.name, &mut out.name);
        set(&self.type_, &mut out.type_);
        if let Some(system_data) = &self.system_data {
            out.system_data = Some(system_data.normalize());
        }
        set(&self.location, &mut out.location);
        // Tags are replaced wholesale, never merged.
        out.tags = optional_to_map(self.tags.as_ref());
    }

    pub fn project(from: &canonical::TrackedResource) -> Self {
        Self {
            id: from.id.as_ref().map(ToString::to_string),
            name: required_to_optional(from.name.clone()),
            type_: required_to_optional(from.type_.clone()),
            system_data: from.system_data.as_ref().map(SystemData::project),
            location: required_to_optional(from.location.clone()),
            tags: map_to_optional(&from.tags),
        }
    }
}

/// Envelope of a nested resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
}

impl ProxyResource {
    pub fn normalize(&self, out: &mut canonical::ProxyResource, errors: &mut FieldErrors) {
        let mut id = out.id.take();
        normalize_resource_id(&self.id, "id", &mut id, errors);
        out.id = id;
        set(&self.name, &mut out.name);
        set(&self.type_, &mut out.type_);
        if let Some(system_data) = &self.system_data {
            out.system_data = Some(system_data.normalize());
        }
    }

    pub fn project(from: &canonical::ProxyResource) -> Self {
        Self {
            id: from.id.as_ref().map(ToString::to_string),
            name: required_to_optional(from.name.clone()),
            type_: required_to_optional(from.type_.clone()),
            system_data: from.system_data.as_ref().map(SystemData::project),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagedServiceIdentity {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ManagedServiceIdentityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_assigned_identities: Option<BTreeMap<String, Option<UserAssignedIdentity>>>,
}

impl ManagedServiceIdentity {
    pub fn normalize(&self, out: &mut canonical::ManagedServiceIdentity) {
        set(&self.type_, &mut out.type_);
        set(&self.principal_id, &mut out.principal_id);
        set(&self.tenant_id, &mut out.tenant_id);
        if let Some(identities) = &self.user_assigned_identities {
            out.user_assigned_identities = identities
                .iter()
                .map(|(key, value)| {
                    let identity = value.as_ref().map(|v| canonical::UserAssignedIdentity {
                        client_id: v.client_id.clone(),
                        principal_id: v.principal_id.clone(),
                    });
                    (key.clone(), identity)
                })
                .collect();
        }
    }

    pub fn project(from: &canonical::ManagedServiceIdentity) -> Self {
        let identities: BTreeMap<String, Option<UserAssignedIdentity>> = from
            .user_assigned_identities
            .iter()
            .map(|(key, value)| {
                let identity = value.as_ref().map(|v| UserAssignedIdentity {
                    client_id: v.client_id.clone(),
                    principal_id: v.principal_id.clone(),
                });
                (key.clone(), identity)
            })
            .collect();
        Self {
            type_: required_to_optional(from.type_),
            principal_id: required_to_optional_or_none(from.principal_id.clone()),
            tenant_id: required_to_optional_or_none(from.tenant_id.clone()),
            user_assigned_identities: (!identities.is_empty()).then_some(identities),
        }
    }
}

/// Normalize an optional identity block; an absent block removes it
pub fn normalize_identity(
    from: &Option<ManagedServiceIdentity>,
    out: &mut Option<canonical::ManagedServiceIdentity>,
) {
    match from {
        Some(identity) => identity.normalize(out.get_or_insert_with(Default::default)),
        None => *out = None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_group: Option<String>,
}

impl VersionProfile {
    pub fn normalize(&self, out: &mut internal::VersionProfile) {
        set(&self.id, &mut out.id);
        set(&self.channel_group, &mut out.channel_group);
    }

    pub fn project(from: &internal::VersionProfile) -> Self {
        Self {
            id: required_to_optional(from.id.clone()),
            channel_group: required_to_optional(from.channel_group.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_domain_prefix: Option<String>,
}

impl DnsProfile {
    pub fn normalize(&self, customer: &mut internal::CustomerDnsProfile, service: &mut internal::ServiceProviderDnsProfile) {
        set(&self.base_domain, &mut service.base_domain);
        set(&self.base_domain_prefix, &mut customer.base_domain_prefix);
    }

    pub fn project(customer: &internal::CustomerDnsProfile, service: &internal::ServiceProviderDnsProfile) -> Self {
        Self {
            base_domain: required_to_optional_or_none(service.base_domain.clone()),
            base_domain_prefix: required_to_optional(customer.base_domain_prefix.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_prefix: Option<i32>,
}

impl NetworkProfile {
    pub fn set_default_values(&mut self) {
        self.network_type.get_or_insert(NetworkType::OvnKubernetes);
        self.pod_cidr
            .get_or_insert_with(|| internal::DEFAULT_POD_CIDR.to_string());
        self.service_cidr
            .get_or_insert_with(|| internal::DEFAULT_SERVICE_CIDR.to_string());
        self.machine_cidr
            .get_or_insert_with(|| internal::DEFAULT_MACHINE_CIDR.to_string());
        self.host_prefix.get_or_insert(internal::DEFAULT_HOST_PREFIX);
    }

    pub fn normalize(&self, out: &mut internal::NetworkProfile) {
        set(&self.network_type, &mut out.network_type);
        set(&self.pod_cidr, &mut out.pod_cidr);
        set(&self.service_cidr, &mut out.service_cidr);
        set(&self.machine_cidr, &mut out.machine_cidr);
        set(&self.host_prefix, &mut out.host_prefix);
    }

    pub fn project(from: &internal::NetworkProfile) -> Self {
        Self {
            network_type: required_to_optional(from.network_type),
            pod_cidr: required_to_optional(from.pod_cidr.clone()),
            service_cidr: required_to_optional(from.service_cidr.clone()),
            machine_cidr: required_to_optional(from.machine_cidr.clone()),
            host_prefix: required_to_optional(from.host_prefix),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentitiesProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane_operators: Option<BTreeMap<String, Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_plane_operators: Option<BTreeMap<String, Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_managed_identity: Option<String>,
}

fn normalize_operator_map(
    from: &Option<BTreeMap<String, Option<String>>>,
    target: &str,
    out: &mut BTreeMap<String, ResourceId>,
    errors: &mut FieldErrors,
) {
    let Some(entries) = from else {
        return;
    };
    let mut parsed = BTreeMap::new();
    for (name, value) in entries {
        let entry = match value {
            Some(s) => {
                let entry_target = format!("{}[{:?}]", target, name);
                match errors.collect(ResourceId::parse_field(s, &entry_target)) {
                    Some(id) => Some(id),
                    None => continue,
                }
            }
            None => None,
        };
        parsed.insert(name.clone(), entry);
    }
    *out = optional_to_map(Some(&parsed));
}

fn project_operator_map(from: &BTreeMap<String, ResourceId>) -> Option<BTreeMap<String, Option<String>>> {
    let as_strings: BTreeMap<String, String> = from
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    map_to_optional(&as_strings)
}

impl UserAssignedIdentitiesProfile {
    pub fn normalize(&self, base: &str, out: &mut internal::UserAssignedIdentitiesProfile, errors: &mut FieldErrors) {
        normalize_operator_map(
            &self.control_plane_operators,
            &join(base, "controlPlaneOperators"),
            &mut out.control_plane_operators,
            errors,
        );
        normalize_operator_map(
            &self.data_plane_operators,
            &join(base, "dataPlaneOperators"),
            &mut out.data_plane_operators,
            errors,
        );
        normalize_resource_id(
            &self.service_managed_identity,
            &join(base, "serviceManagedIdentity"),
            &mut out.service_managed_identity,
            errors,
        );
    }

    pub fn project(from: &internal::UserAssignedIdentitiesProfile) -> Self {
        Self {
            control_plane_operators: project_operator_map(&from.control_plane_operators),
            data_plane_operators: project_operator_map(&from.data_plane_operators),
            service_managed_identity: Some(resource_id_to_string(from.service_managed_identity.as_ref())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorsAuthenticationProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_assigned_identities: Option<UserAssignedIdentitiesProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_type: Option<OutboundType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_security_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operators_authentication: Option<OperatorsAuthenticationProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_url: Option<String>,
}

impl PlatformProfile {
    pub fn set_default_values(&mut self) {
        self.outbound_type.get_or_insert(OutboundType::LoadBalancer);
    }

    pub fn normalize(
        &self,
        customer: &mut internal::CustomerPlatformProfile,
        service: &mut internal::ServiceProviderPlatformProfile,
        errors: &mut FieldErrors,
    ) {
        const BASE: &str = "properties.platform";
        set(&self.managed_resource_group, &mut customer.managed_resource_group);
        normalize_resource_id(&self.subnet_id, &join(BASE, "subnetId"), &mut customer.subnet_id, errors);
        set(&self.outbound_type, &mut customer.outbound_type);
        normalize_resource_id(
            &self.network_security_group_id,
            &join(BASE, "networkSecurityGroupId"),
            &mut customer.network_security_group_id,
            errors,
        );
        if let Some(identities) = self
            .operators_authentication
            .as_ref()
            .and_then(|auth| auth.user_assigned_identities.as_ref())
        {
            identities.normalize(
                "properties.platform.operatorsAuthentication.userAssignedIdentities",
                &mut customer.operators_authentication.user_assigned_identities,
                errors,
            );
        }
        set(&self.issuer_url, &mut service.issuer_url);
    }

    pub fn project(customer: &internal::CustomerPlatformProfile, service: &internal::ServiceProviderPlatformProfile) -> Self {
        Self {
            managed_resource_group: required_to_optional(customer.managed_resource_group.clone()),
            subnet_id: Some(resource_id_to_string(customer.subnet_id.as_ref())),
            outbound_type: required_to_optional(customer.outbound_type),
            network_security_group_id: Some(resource_id_to_string(customer.network_security_group_id.as_ref())),
            operators_authentication: Some(OperatorsAuthenticationProfile {
                user_assigned_identities: Some(UserAssignedIdentitiesProfile::project(
                    &customer.operators_authentication.user_assigned_identities,
                )),
            }),
            issuer_url: required_to_optional_or_none(service.issuer_url.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAutoscalingProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pod_grace_period_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_node_provision_time_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_priority_threshold: Option<i32>,
}

impl ClusterAutoscalingProfile {
    pub fn set_default_values(&mut self) {
        self.max_pod_grace_period_seconds
            .get_or_insert(internal::DEFAULT_MAX_POD_GRACE_PERIOD_SECONDS);
        self.max_node_provision_time_seconds
            .get_or_insert(internal::DEFAULT_MAX_NODE_PROVISION_TIME_SECONDS);
        self.pod_priority_threshold
            .get_or_insert(internal::DEFAULT_POD_PRIORITY_THRESHOLD);
    }

    pub fn normalize(&self, out: &mut internal::ClusterAutoscalingProfile) {
        set(&self.max_nodes_total, &mut out.max_nodes_total);
        set(&self.max_pod_grace_period_seconds, &mut out.max_pod_grace_period_seconds);
        set(&self.max_node_provision_time_seconds, &mut out.max_node_provision_time_seconds);
        set(&self.pod_priority_threshold, &mut out.pod_priority_threshold);
    }

    pub fn project(from: &internal::ClusterAutoscalingProfile) -> Self {
        Self {
            max_nodes_total: required_to_optional(from.max_nodes_total),
            max_pod_grace_period_seconds: required_to_optional(from.max_pod_grace_period_seconds),
            max_node_provision_time_seconds: required_to_optional(
                from.max_node_provision_time_seconds,
            ),
            pod_priority_threshold: required_to_optional(from.pod_priority_threshold),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolVersionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_group: Option<String>,
}

impl NodePoolVersionProfile {
    pub fn normalize(&self, out: &mut internal_pool::NodePoolVersionProfile) {
        set(&self.id, &mut out.id);
        set(&self.channel_group, &mut out.channel_group);
    }

    pub fn project(from: &internal_pool::NodePoolVersionProfile) -> Self {
        Self {
            id: required_to_optional(from.id.clone()),
            channel_group: required_to_optional(from.channel_group.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OsDiskProfile {
    #[serde(rename = "sizeGiB", skip_serializing_if = "Option::is_none")]
    pub size_gib: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_storage_account_type: Option<DiskStorageAccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_set_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolPlatformProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_encryption_at_host: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_disk: Option<OsDiskProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

impl NodePoolPlatformProfile {
    pub fn set_default_values(&mut self) {
        let os_disk = self.os_disk.get_or_insert_with(Default::default);
        os_disk.size_gib.get_or_insert(internal_pool::DEFAULT_OS_DISK_SIZE_GIB);
        os_disk
            .disk_storage_account_type
            .get_or_insert(DiskStorageAccountType::PremiumLrs);
    }

    pub fn normalize(&self, out: &mut internal_pool::NodePoolPlatformProfile, errors: &mut FieldErrors) {
        const BASE: &str = "properties.platform";
        normalize_resource_id(&self.subnet_id, &join(BASE, "subnetId"), &mut out.subnet_id, errors);
        set(&self.vm_size, &mut out.vm_size);
        set(&self.enable_encryption_at_host, &mut out.enable_encryption_at_host);
        if let Some(os_disk) = &self.os_disk {
            set(&os_disk.size_gib, &mut out.os_disk.size_gib);
            set(&os_disk.disk_storage_account_type, &mut out.os_disk.disk_storage_account_type);
            normalize_resource_id(
                &os_disk.encryption_set_id,
                "properties.platform.osDisk.encryptionSetId",
                &mut out.os_disk.encryption_set_id,
                errors,
            );
        }
        set(&self.availability_zone, &mut out.availability_zone);
    }

    pub fn project(from: &internal_pool::NodePoolPlatformProfile) -> Self {
        Self {
            subnet_id: Some(resource_id_to_string(from.subnet_id.as_ref())),
            vm_size: required_to_optional(from.vm_size.clone()),
            enable_encryption_at_host: required_to_optional(from.enable_encryption_at_host),
            os_disk: Some(OsDiskProfile {
                size_gib: required_to_optional(from.os_disk.size_gib),
                disk_storage_account_type: required_to_optional(
                    from.os_disk.disk_storage_account_type,
                ),
                encryption_set_id: Some(resource_id_to_string(from.os_disk.encryption_set_id.as_ref())),
            }),
            availability_zone: required_to_optional(from.availability_zone.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodePoolAutoScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Taint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Replace canonical labels when the request carries a label list
pub fn normalize_labels(from: &Option<Vec<Option<Label>>>, out: &mut BTreeMap<String, String>) {
    if let Some(labels) = from {
        *out = labels
            .iter()
            .flatten()
            .map(|label| {
                (
                    optional_to_required(label.key.clone()),
                    optional_to_required(label.value.clone()),
                )
            })
            .collect();
    }
}

pub fn project_labels(from: &BTreeMap<String, String>) -> Option<Vec<Option<Label>>> {
    if from.is_empty() {
        return None;
    }
    Some(
        from.iter()
            .map(|(k, v)| {
                Some(Label {
                    key: required_to_optional(k.clone()),
                    value: required_to_optional(v.clone()),
                })
            })
            .collect(),
    )
}

pub fn normalize_taints(from: &Option<Vec<Option<Taint>>>, out: &mut Vec<internal_pool::Taint>) {
    if let Some(taints) = from {
        *out = taints
            .iter()
            .flatten()
            .map(|taint| internal_pool::Taint {
                effect: optional_to_required(taint.effect),
                key: optional_to_required(taint.key.clone()),
                value: optional_to_required(taint.value.clone()),
            })
            .collect();
    }
}

pub fn project_taints(from: &[internal_pool::Taint]) -> Option<Vec<Option<Taint>>> {
    if from.is_empty() {
        return None;
    }
    Some(
        from.iter()
            .map(|taint| {
                Some(Taint {
                    effect: required_to_optional(taint.effect),
                    key: required_to_optional(taint.key.clone()),
                    value: required_to_optional(taint.value.clone()),
                })
            })
            .collect(),
    )
}

pub fn normalize_auto_scaling(
    from: &Option<NodePoolAutoScaling>,
    out: &mut Option<internal_pool::NodePoolAutoScaling>,
) {
    match from {
        Some(scaling) => {
            let target = out.get_or_insert_with(Default::default);
            set(&scaling.min, &mut target.min);
            set(&scaling.max, &mut target.max);
        }
        None => *out = None,
    }
}

pub fn project_auto_scaling(from: &Option<internal_pool::NodePoolAutoScaling>) -> Option<NodePoolAutoScaling> {
    from.map(|scaling| NodePoolAutoScaling {
        min: required_to_optional(scaling.min),
        max: required_to_optional(scaling.max),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftClusterAdminCredential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
}

impl HcpOpenShiftClusterAdminCredential {
    pub fn project(from: &crate::api::HcpOpenShiftClusterAdminCredential) -> Self {
        Self {
            expiration_timestamp: from.expiration_timestamp,
            kubeconfig: required_to_optional(from.kubeconfig.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftVersionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_life_timestamp: Option<DateTime<Utc>>,
}

/// A version offered for new clusters; read-only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HcpOpenShiftVersion {
    #[serde(flatten)]
    pub resource: ProxyResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HcpOpenShiftVersionProperties>,
}

impl HcpOpenShiftVersion {
    pub fn project(from: &crate::api::HcpOpenShiftVersion) -> Self {
        Self {
            resource: ProxyResource::project(&from.resource),
            properties: Some(HcpOpenShiftVersionProperties {
                channel_group: required_to_optional(from.properties.channel_group.clone()),
                enabled: required_to_optional(from.properties.enabled),
                end_of_life_timestamp: from.properties.end_of_life_timestamp,
            }),
        }
    }
}
