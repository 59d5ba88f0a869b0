//! Cluster conversion to and from the backend

use std::collections::BTreeMap;

use axum::http::HeaderMap;
use uuid::Uuid;

use super::{
    encryption_type_from_backend, encryption_type_to_backend, format_duration_minutes,
    image_registry_state_from_backend, image_registry_state_to_backend,
    key_management_mode_from_backend, key_management_mode_to_backend, listening_to_visibility,
    node_drain_grace_period, node_drain_minutes, outbound_type_from_backend,
    outbound_type_to_backend, parse_duration_seconds, visibility_to_listening,
    CIDR_ACCESS_ALLOW_ALL, CIDR_ACCESS_ALLOW_LIST, CCS_ENABLED, CLOUD_PROVIDER, FLAVOUR_ID,
    HYPERSHIFT_ENABLED, PRODUCT_ID,
};
use crate::api::arm::{
    ManagedServiceIdentity, TrackedResource, UserAssignedIdentity, HEADER_NAME_HOME_TENANT_ID,
    HEADER_NAME_IDENTITY_URL,
};
use crate::api::cluster::{
    ClusterAutoscalingProfile, ClusterImageRegistryProfile, CustomerApiProfile,
    CustomerDnsProfile, CustomerManagedEncryptionProfile, CustomerPlatformProfile,
    CustomerProperties, EtcdDataEncryptionProfile, EtcdProfile, HcpOpenShiftCluster,
    KmsEncryptionProfile, KmsKey, NetworkProfile, ServiceProviderApiProfile,
    ServiceProviderConsoleProfile, ServiceProviderDnsProfile, ServiceProviderProperties,
    VersionProfile,
};
use crate::api::enums::{EtcdDataEncryptionKeyManagementModeType, NetworkType};
use crate::api::error::ConversionError;
use crate::api::resource_id::{resource_id_to_string, ResourceId};
use crate::backend::model::{
    self, AutoscalerResourceLimits, Azure, CidrBlockAccess, CidrBlockAllowAccess, ClusterApi,
    ClusterAutoscaler, Enabled, EtcdCustomerManaged, EtcdDataEncryption, EtcdEncryption, IdRef,
    ImageRegistry, KmsEncryption, ManagedIdentities, ManagedIdentity, Network,
    NodesOutboundConnectivity, OperatorsAuthentication,
};
use crate::backend::version::{to_xy, to_xyz};

/// Longest cluster name prefix used in a generated managed resource group
const MANAGED_RESOURCE_GROUP_NAME_PREFIX_LEN: usize = 45;

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn parse_optional_resource_id(value: &Option<String>) -> Result<Option<ResourceId>, ConversionError> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(id) => Ok(Some(ResourceId::parse(id)?)),
    }
}

/// Convert a backend cluster into a canonical cluster.
///
/// Provisioning state is not derived from the backend; it is tracked with the
/// rest of the resource metadata.
pub fn convert_cluster(
    resource_id: &ResourceId,
    location: &str,
    cluster: &model::Cluster,
) -> Result<HcpOpenShiftCluster, ConversionError> {
    let api = cluster.api.clone().unwrap_or_default();
    let azure = cluster.azure.clone().unwrap_or_default();
    let network = cluster.network.clone().unwrap_or_default();
    let version = cluster.version.clone().unwrap_or_default();

    let visibility = listening_to_visibility(opt_str(&api.listening))?;
    let outbound_type = outbound_type_from_backend(
        azure
            .nodes_outbound_connectivity
            .as_ref()
            .map(|c| opt_str(&c.outbound_type))
            .unwrap_or_default(),
    )?;
    let image_registry_state = image_registry_state_from_backend(
        cluster
            .image_registry
            .as_ref()
            .map(|r| opt_str(&r.state))
            .unwrap_or_default(),
    )?;
    let autoscaling = convert_autoscaler(cluster.autoscaler.as_ref().and_then(|a| a.inline()))?;
    let network_type: NetworkType = opt_str(&network.type_).parse()?;

    let mut resource = TrackedResource::new(Some(resource_id));
    resource.location = location.to_string();

    let mut converted = HcpOpenShiftCluster {
        resource,
        customer_properties: CustomerProperties {
            version: VersionProfile {
                id: to_xy(opt_str(&version.id)),
                channel_group: version.channel_group.clone().unwrap_or_default(),
            },
            dns: CustomerDnsProfile {
                base_domain_prefix: cluster.domain_prefix.clone().unwrap_or_default(),
            },
            network: NetworkProfile {
                network_type,
                pod_cidr: network.pod_cidr.clone().unwrap_or_default(),
                service_cidr: network.service_cidr.clone().unwrap_or_default(),
                machine_cidr: network.machine_cidr.clone().unwrap_or_default(),
                host_prefix: network.host_prefix.unwrap_or_default(),
            },
            api: CustomerApiProfile {
                visibility,
                authorized_cidrs: authorized_cidrs(&api),
            },
            platform: CustomerPlatformProfile {
                managed_resource_group: azure.managed_resource_group_name.clone().unwrap_or_default(),
                subnet_id: parse_optional_resource_id(&azure.subnet_resource_id)?,
                outbound_type,
                network_security_group_id: parse_optional_resource_id(
                    &azure.network_security_group_resource_id,
                )?,
                ..Default::default()
            },
            autoscaling,
            node_drain_timeout_minutes: node_drain_minutes(cluster.node_drain_grace_period.as_ref())
                .unwrap_or_default(),
            etcd: EtcdProfile::default(),
            cluster_image_registry: ClusterImageRegistryProfile {
                state: image_registry_state,
            },
        },
        service_provider_properties: ServiceProviderProperties {
            dns: ServiceProviderDnsProfile {
                base_domain: cluster
                    .dns
                    .as_ref()
                    .and_then(|d| d.base_domain.clone())
                    .unwrap_or_default(),
            },
            console: ServiceProviderConsoleProfile {
                url: cluster
                    .console
                    .as_ref()
                    .and_then(|c| c.url.clone())
                    .unwrap_or_default(),
            },
            api: ServiceProviderApiProfile {
                url: api.url.clone().unwrap_or_default(),
            },
            ..Default::default()
        },
        identity: None,
    };

    if let Some(data_encryption) = azure
        .etcd_encryption
        .as_ref()
        .and_then(|e| e.data_encryption.as_ref())
    {
        converted.customer_properties.etcd.data_encryption = convert_etcd(data_encryption)?;
    }

    if let Some(identities) = azure
        .operators_authentication
        .as_ref()
        .and_then(|o| o.managed_identities.as_ref())
    {
        convert_managed_identities(&mut converted, identities)?;
    }

    Ok(converted)
}

fn authorized_cidrs(api: &ClusterApi) -> Option<Vec<String>> {
    api.cidr_block_access
        .as_ref()
        .and_then(|access| access.allow.as_ref())
        .and_then(|allow| allow.values.clone())
}

fn convert_autoscaler(
    autoscaler: Option<&ClusterAutoscaler>,
) -> Result<ClusterAutoscalingProfile, ConversionError> {
    let Some(autoscaler) = autoscaler else {
        return Ok(ClusterAutoscalingProfile::default());
    };

    let max_node_provision_time_seconds = match autoscaler.max_node_provision_time.as_deref() {
        None | Some("") => 0,
        Some(duration) => parse_duration_seconds(duration)?,
    };

    Ok(ClusterAutoscalingProfile {
        max_nodes_total: autoscaler
            .resource_limits
            .as_ref()
            .and_then(|l| l.max_nodes_total)
            .unwrap_or_default(),
        max_pod_grace_period_seconds: autoscaler.max_pod_grace_period.unwrap_or_default(),
        max_node_provision_time_seconds,
        pod_priority_threshold: autoscaler.pod_priority_threshold.unwrap_or_default(),
    })
}

fn convert_etcd(data_encryption: &EtcdDataEncryption) -> Result<EtcdDataEncryptionProfile, ConversionError> {
    let customer_managed = match &data_encryption.customer_managed {
        None => None,
        Some(customer_managed) => {
            let kms = customer_managed
                .kms
                .as_ref()
                .and_then(|k| k.active_key.as_ref())
                .map(|key| KmsEncryptionProfile {
                    active_key: KmsKey {
                        name: opt_str(&key.key_name).to_string(),
                        vault_name: opt_str(&key.key_vault_name).to_string(),
                        version: opt_str(&key.key_version).to_string(),
                    },
                });
            Some(CustomerManagedEncryptionProfile {
                encryption_type: encryption_type_from_backend(opt_str(&customer_managed.encryption_type))?,
                kms,
            })
        }
    };

    Ok(EtcdDataEncryptionProfile {
        key_management_mode: key_management_mode_from_backend(opt_str(
            &data_encryption.key_management_mode,
        ))?,
        customer_managed,
    })
}

/// Record backend operator identities in both places the cluster keeps them:
/// the identity map with client and principal IDs, and the per-operator maps.
/// Data plane identities are not part of the identity map.
fn convert_managed_identities(
    cluster: &mut HcpOpenShiftCluster,
    identities: &ManagedIdentities,
) -> Result<(), ConversionError> {
    let operators = &mut cluster
        .customer_properties
        .platform
        .operators_authentication
        .user_assigned_identities;

    for (operator, identity) in identities
        .control_plane_operators_managed_identities
        .iter()
        .flatten()
    {
        let raw = opt_str(&identity.resource_id);
        let resource_id = ResourceId::parse(raw)?;
        cluster
            .identity
            .get_or_insert_with(ManagedServiceIdentity::default)
            .user_assigned_identities
            .insert(raw.to_string(), Some(user_assigned_identity(identity)));
        operators
            .control_plane_operators
            .insert(operator.clone(), resource_id);
    }

    for (operator, identity) in identities
        .data_plane_operators_managed_identities
        .iter()
        .flatten()
    {
        let resource_id = ResourceId::parse(opt_str(&identity.resource_id))?;
        operators.data_plane_operators.insert(operator.clone(), resource_id);
    }

    if let Some(service) = &identities.service_managed_identity {
        let raw = opt_str(&service.resource_id);
        if !raw.is_empty() {
            let resource_id = ResourceId::parse(raw)?;
            cluster
                .identity
                .get_or_insert_with(ManagedServiceIdentity::default)
                .user_assigned_identities
                .insert(raw.to_string(), Some(user_assigned_identity(service)));
            operators.service_managed_identity = Some(resource_id);
        }
    }

    Ok(())
}

fn user_assigned_identity(identity: &ManagedIdentity) -> UserAssignedIdentity {
    UserAssignedIdentity {
        client_id: Some(identity.client_id.clone().unwrap_or_default()),
        principal_id: Some(identity.principal_id.clone().unwrap_or_default()),
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// The managed resource group the customer chose, or a generated one
fn managed_resource_group_name(cluster: &HcpOpenShiftCluster) -> String {
    let chosen = &cluster.customer_properties.platform.managed_resource_group;
    if !chosen.is_empty() {
        return chosen.clone();
    }
    let name: String = cluster
        .resource
        .name
        .chars()
        .take(MANAGED_RESOURCE_GROUP_NAME_PREFIX_LEN)
        .collect();
    format!("arohcp-{}-{}", name, Uuid::new_v4())
}

/// Build the backend cluster and its autoscaler from a canonical cluster.
///
/// `old` is the cluster currently stored in the backend; when present the
/// body is an update and attributes fixed at creation are left out. The
/// backend properties are the old properties overlaid with
/// `required_properties`.
pub fn build_cluster(
    resource_id: &ResourceId,
    headers: &HeaderMap,
    cluster: &HcpOpenShiftCluster,
    required_properties: &BTreeMap<String, String>,
    old: Option<&model::Cluster>,
) -> Result<(model::Cluster, ClusterAutoscaler), ConversionError> {
    let tenant_id = header(headers, HEADER_NAME_HOME_TENANT_ID)
        .ok_or(ConversionError::MissingHeader(HEADER_NAME_HOME_TENANT_ID))?;

    let customer = &cluster.customer_properties;
    let mut built = model::Cluster::default();
    let mut api = ClusterApi::default();

    if old.is_none() {
        with_immutable_attributes(
            &mut built,
            cluster,
            resource_id,
            tenant_id,
            header(headers, HEADER_NAME_IDENTITY_URL),
        )?;
        api.listening = Some(visibility_to_listening(customer.api.visibility)?.to_string());
    }

    built.node_drain_grace_period = Some(node_drain_grace_period(customer.node_drain_timeout_minutes));

    api.cidr_block_access = Some(cidr_block_access(&customer.api)?);
    built.api = Some(api);

    let autoscaler = ClusterAutoscaler {
        max_node_provision_time: Some(format_duration_minutes(
            customer.autoscaling.max_node_provision_time_seconds,
        )),
        max_pod_grace_period: Some(customer.autoscaling.max_pod_grace_period_seconds),
        pod_priority_threshold: Some(customer.autoscaling.pod_priority_threshold),
        resource_limits: Some(AutoscalerResourceLimits {
            max_nodes_total: Some(customer.autoscaling.max_nodes_total),
        }),
        ..Default::default()
    };

    let mut properties = old
        .and_then(|o| o.properties.clone())
        .unwrap_or_default();
    properties.extend(
        required_properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    built.properties = Some(properties);

    Ok((built, autoscaler))
}

fn cidr_block_access(api: &CustomerApiProfile) -> Result<CidrBlockAccess, ConversionError> {
    let allow = match &api.authorized_cidrs {
        None => CidrBlockAllowAccess {
            mode: Some(CIDR_ACCESS_ALLOW_ALL.to_string()),
            values: None,
        },
        Some(cidrs) if !cidrs.is_empty() => CidrBlockAllowAccess {
            mode: Some(CIDR_ACCESS_ALLOW_LIST.to_string()),
            values: Some(cidrs.clone()),
        },
        Some(_) => return Err(ConversionError::EmptyAuthorizedCidrs),
    };
    Ok(CidrBlockAccess { allow: Some(allow) })
}

fn with_immutable_attributes(
    built: &mut model::Cluster,
    cluster: &HcpOpenShiftCluster,
    resource_id: &ResourceId,
    tenant_id: &str,
    identity_url: Option<&str>,
) -> Result<(), ConversionError> {
    let customer = &cluster.customer_properties;
    let image_registry_state = image_registry_state_to_backend(customer.cluster_image_registry.state)?;
    let outbound_type = outbound_type_to_backend(customer.platform.outbound_type)?;
    let name = cluster.resource.name.to_lowercase();

    built.name = Some(name.clone());
    built.flavour = Some(IdRef::new(FLAVOUR_ID));
    built.region = Some(IdRef::new(cluster.resource.location.clone()));
    built.cloud_provider = Some(IdRef::new(CLOUD_PROVIDER));
    built.product = Some(IdRef::new(PRODUCT_ID));
    built.hypershift = Some(Enabled {
        enabled: Some(HYPERSHIFT_ENABLED),
    });
    built.ccs = Some(Enabled {
        enabled: Some(CCS_ENABLED),
    });
    built.version = Some(model::Version {
        id: Some(to_xyz(&customer.version.id, &customer.version.channel_group)),
        channel_group: Some(customer.version.channel_group.clone()),
        ..Default::default()
    });
    built.network = Some(Network {
        type_: Some(customer.network.network_type.as_str().to_string()),
        pod_cidr: Some(customer.network.pod_cidr.clone()),
        service_cidr: Some(customer.network.service_cidr.clone()),
        machine_cidr: Some(customer.network.machine_cidr.clone()),
        host_prefix: Some(customer.network.host_prefix),
    });
    built.image_registry = Some(ImageRegistry {
        state: Some(image_registry_state.to_string()),
    });

    let mut azure = Azure {
        tenant_id: Some(tenant_id.to_string()),
        subscription_id: Some(resource_id.subscription_id().to_lowercase()),
        resource_group_name: Some(
            resource_id
                .resource_group_name()
                .unwrap_or_default()
                .to_lowercase(),
        ),
        resource_name: Some(name),
        managed_resource_group_name: Some(managed_resource_group_name(cluster)),
        subnet_resource_id: Some(resource_id_to_string(customer.platform.subnet_id.as_ref())),
        nodes_outbound_connectivity: Some(NodesOutboundConnectivity {
            outbound_type: Some(outbound_type.to_string()),
        }),
        ..Default::default()
    };

    let data_encryption = &customer.etcd.data_encryption;
    if data_encryption.key_management_mode != EtcdDataEncryptionKeyManagementModeType::Unset
        || data_encryption.customer_managed.is_some()
    {
        azure.etcd_encryption = Some(build_etcd(&customer.etcd)?);
    }

    // The backend rejects an empty network security group ID
    if let Some(nsg) = &customer.platform.network_security_group_id {
        azure.network_security_group_resource_id = Some(nsg.to_string());
    }

    let identities = &customer.platform.operators_authentication.user_assigned_identities;
    let to_managed = |operators: &BTreeMap<String, ResourceId>| {
        operators
            .iter()
            .map(|(name, id)| (name.clone(), ManagedIdentity::new(id.to_string())))
            .collect::<BTreeMap<_, _>>()
    };
    azure.operators_authentication = Some(OperatorsAuthentication {
        managed_identities: Some(ManagedIdentities {
            managed_identities_data_plane_identity_url: identity_url.map(str::to_string),
            control_plane_operators_managed_identities: Some(to_managed(
                &identities.control_plane_operators,
            )),
            data_plane_operators_managed_identities: Some(to_managed(&identities.data_plane_operators)),
            service_managed_identity: identities
                .service_managed_identity
                .as_ref()
                .map(|id| ManagedIdentity::new(id.to_string())),
        }),
    });

    built.azure = Some(azure);

    // The backend rejects an empty domain prefix
    if !customer.dns.base_domain_prefix.is_empty() {
        built.domain_prefix = Some(customer.dns.base_domain_prefix.clone());
    }

    Ok(())
}

fn build_etcd(etcd: &EtcdProfile) -> Result<EtcdEncryption, ConversionError> {
    let data_encryption = &etcd.data_encryption;
    let customer_managed = match &data_encryption.customer_managed {
        None => None,
        Some(customer_managed) => Some(EtcdCustomerManaged {
            encryption_type: Some(encryption_type_to_backend(customer_managed.encryption_type)?.to_string()),
            kms: customer_managed.kms.as_ref().map(|kms| KmsEncryption {
                active_key: Some(model::KmsKey {
                    key_name: Some(kms.active_key.name.clone()),
                    key_vault_name: Some(kms.active_key.vault_name.clone()),
                    key_version: Some(kms.active_key.version.clone()),
                }),
            }),
        }),
    };

    Ok(EtcdEncryption {
        data_encryption: Some(EtcdDataEncryption {
            key_management_mode: Some(
                key_management_mode_to_backend(data_encryption.key_management_mode)?.to_string(),
            ),
            customer_managed,
        }),
    })
}

#[cfg(test)]
#[path = "cluster_test.rs"]
mod tests;
