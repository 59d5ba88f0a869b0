//! Conversion between canonical resources and backend objects
//!
//! `convert_*` functions read a backend object into a canonical resource.
//! `build_*` functions produce the backend body for a create or an update;
//! fields the backend does not allow to change are only sent on create.

pub mod cluster;
pub mod external_auth;
pub mod node_pool;

pub use cluster::{build_cluster, convert_cluster};
pub use external_auth::{build_external_auth, convert_external_auth};
pub use node_pool::{build_node_pool, convert_node_pool};

use super::model::{BreakGlassCredential, Version, ValueWithUnit};
use crate::api::admin_credential::HcpOpenShiftClusterAdminCredential;
use crate::api::enums::{
    ClusterImageRegistryProfileState, CustomerManagedEncryptionType,
    EtcdDataEncryptionKeyManagementModeType, ExternalAuthClientType, OutboundType,
    UsernameClaimPrefixPolicy, Visibility,
};
use crate::api::error::ConversionError;
use crate::api::resource_id::ResourceId;
use crate::api::version::HcpOpenShiftVersion;

pub const FLAVOUR_ID: &str = "osd-4";
pub const CLOUD_PROVIDER: &str = "azure";
pub const PRODUCT_ID: &str = "aro";
pub const HYPERSHIFT_ENABLED: bool = true;
pub const CCS_ENABLED: bool = true;

const CUSTOMER_MANAGED_ENCRYPTION_TYPE_KMS: &str = "kms";
const ENCRYPTION_AT_HOST_ENABLED: &str = "enabled";
const ENCRYPTION_AT_HOST_DISABLED: &str = "disabled";
const IMAGE_REGISTRY_ENABLED: &str = "enabled";
const IMAGE_REGISTRY_DISABLED: &str = "disabled";
const KEY_MANAGEMENT_CUSTOMER_MANAGED: &str = "customer_managed";
const KEY_MANAGEMENT_PLATFORM_MANAGED: &str = "platform_managed";
const NODE_DRAIN_GRACE_PERIOD_UNIT: &str = "minutes";
const OUTBOUND_TYPE_LOAD_BALANCER: &str = "load_balancer";
const PREFIX_POLICY_PREFIX: &str = "Prefix";
const PREFIX_POLICY_NO_PREFIX: &str = "NoPrefix";
const CIDR_ACCESS_ALLOW_ALL: &str = "allow_all";
const CIDR_ACCESS_ALLOW_LIST: &str = "allow_list";
const LISTENING_EXTERNAL: &str = "external";
const LISTENING_INTERNAL: &str = "internal";
const CLIENT_TYPE_CONFIDENTIAL: &str = "confidential";
const CLIENT_TYPE_PUBLIC: &str = "public";

fn listening_to_visibility(listening: &str) -> Result<Visibility, ConversionError> {
    match listening {
        LISTENING_EXTERNAL => Ok(Visibility::Public),
        LISTENING_INTERNAL => Ok(Visibility::Private),
        "" => Ok(Visibility::Unset),
        other => Err(ConversionError::unknown_value("ListeningMethod", other, "Visibility")),
    }
}

fn visibility_to_listening(visibility: Visibility) -> Result<&'static str, ConversionError> {
    match visibility {
        Visibility::Public => Ok(LISTENING_EXTERNAL),
        Visibility::Private => Ok(LISTENING_INTERNAL),
        Visibility::Unset => Err(ConversionError::unknown_value(
            "Visibility",
            visibility.as_str(),
            "ListeningMethod",
        )),
    }
}

fn outbound_type_from_backend(outbound_type: &str) -> Result<OutboundType, ConversionError> {
    match outbound_type {
        OUTBOUND_TYPE_LOAD_BALANCER => Ok(OutboundType::LoadBalancer),
        "" => Ok(OutboundType::Unset),
        other => Err(ConversionError::unknown_value("string", other, "OutboundType")),
    }
}

fn outbound_type_to_backend(outbound_type: OutboundType) -> Result<&'static str, ConversionError> {
    match outbound_type {
        OutboundType::LoadBalancer => Ok(OUTBOUND_TYPE_LOAD_BALANCER),
        OutboundType::Unset => Err(ConversionError::unknown_value(
            "OutboundType",
            outbound_type.as_str(),
            "string",
        )),
    }
}

fn image_registry_state_from_backend(
    state: &str,
) -> Result<ClusterImageRegistryProfileState, ConversionError> {
    match state {
        IMAGE_REGISTRY_ENABLED => Ok(ClusterImageRegistryProfileState::Enabled),
        IMAGE_REGISTRY_DISABLED => Ok(ClusterImageRegistryProfileState::Disabled),
        "" => Ok(ClusterImageRegistryProfileState::Unset),
        other => Err(ConversionError::unknown_value(
            "string",
            other,
            "ClusterImageRegistryProfileState",
        )),
    }
}

fn image_registry_state_to_backend(
    state: ClusterImageRegistryProfileState,
) -> Result<&'static str, ConversionError> {
    match state {
        ClusterImageRegistryProfileState::Enabled => Ok(IMAGE_REGISTRY_ENABLED),
        ClusterImageRegistryProfileState::Disabled => Ok(IMAGE_REGISTRY_DISABLED),
        ClusterImageRegistryProfileState::Unset => Err(ConversionError::unknown_value(
            "ClusterImageRegistryProfileState",
            state.as_str(),
            "string",
        )),
    }
}

fn key_management_mode_from_backend(
    mode: &str,
) -> Result<EtcdDataEncryptionKeyManagementModeType, ConversionError> {
    match mode {
        KEY_MANAGEMENT_PLATFORM_MANAGED => Ok(EtcdDataEncryptionKeyManagementModeType::PlatformManaged),
        KEY_MANAGEMENT_CUSTOMER_MANAGED => Ok(EtcdDataEncryptionKeyManagementModeType::CustomerManaged),
        "" => Ok(EtcdDataEncryptionKeyManagementModeType::Unset),
        other => Err(ConversionError::unknown_value(
            "string",
            other,
            "EtcdDataEncryptionKeyManagementModeType",
        )),
    }
}

fn key_management_mode_to_backend(
    mode: EtcdDataEncryptionKeyManagementModeType,
) -> Result<&'static str, ConversionError> {
    match mode {
        EtcdDataEncryptionKeyManagementModeType::PlatformManaged => Ok(KEY_MANAGEMENT_PLATFORM_MANAGED),
        EtcdDataEncryptionKeyManagementModeType::CustomerManaged => Ok(KEY_MANAGEMENT_CUSTOMER_MANAGED),
        EtcdDataEncryptionKeyManagementModeType::Unset => Err(ConversionError::unknown_value(
            "EtcdDataEncryptionKeyManagementModeType",
            mode.as_str(),
            "string",
        )),
    }
}

fn encryption_type_from_backend(
    encryption_type: &str,
) -> Result<CustomerManagedEncryptionType, ConversionError> {
    match encryption_type {
        CUSTOMER_MANAGED_ENCRYPTION_TYPE_KMS => Ok(CustomerManagedEncryptionType::Kms),
        other => Err(ConversionError::unknown_value(
            "string",
            other,
            "CustomerManagedEncryptionType",
        )),
    }
}

fn encryption_type_to_backend(
    encryption_type: CustomerManagedEncryptionType,
) -> Result<&'static str, ConversionError> {
    match encryption_type {
        CustomerManagedEncryptionType::Kms => Ok(CUSTOMER_MANAGED_ENCRYPTION_TYPE_KMS),
        CustomerManagedEncryptionType::Unset => Err(ConversionError::unknown_value(
            "CustomerManagedEncryptionType",
            encryption_type.as_str(),
            "string",
        )),
    }
}

fn prefix_policy_from_backend(policy: &str) -> Result<UsernameClaimPrefixPolicy, ConversionError> {
    match policy {
        PREFIX_POLICY_PREFIX => Ok(UsernameClaimPrefixPolicy::Prefix),
        PREFIX_POLICY_NO_PREFIX => Ok(UsernameClaimPrefixPolicy::NoPrefix),
        "" => Ok(UsernameClaimPrefixPolicy::None),
        other => Err(ConversionError::unknown_value(
            "string",
            other,
            "UsernameClaimPrefixPolicy",
        )),
    }
}

fn prefix_policy_to_backend(policy: UsernameClaimPrefixPolicy) -> Result<&'static str, ConversionError> {
    match policy {
        UsernameClaimPrefixPolicy::Prefix => Ok(PREFIX_POLICY_PREFIX),
        UsernameClaimPrefixPolicy::NoPrefix => Ok(PREFIX_POLICY_NO_PREFIX),
        UsernameClaimPrefixPolicy::None => Ok(""),
        UsernameClaimPrefixPolicy::Unset => Err(ConversionError::unknown_value(
            "UsernameClaimPrefixPolicy",
            policy.as_str(),
            "string",
        )),
    }
}

fn client_type_from_backend(client_type: &str) -> Result<ExternalAuthClientType, ConversionError> {
    match client_type {
        CLIENT_TYPE_CONFIDENTIAL => Ok(ExternalAuthClientType::Confidential),
        CLIENT_TYPE_PUBLIC => Ok(ExternalAuthClientType::Public),
        other => Err(ConversionError::unknown_value(
            "ExternalAuthClientType",
            other,
            "ExternalAuthClientType",
        )),
    }
}

fn client_type_to_backend(client_type: ExternalAuthClientType) -> Result<&'static str, ConversionError> {
    match client_type {
        ExternalAuthClientType::Confidential => Ok(CLIENT_TYPE_CONFIDENTIAL),
        ExternalAuthClientType::Public => Ok(CLIENT_TYPE_PUBLIC),
        ExternalAuthClientType::Unset => Err(ConversionError::unknown_value(
            "ExternalAuthClientType",
            client_type.as_str(),
            "ExternalAuthClientType",
        )),
    }
}

/// A node drain grace period, always expressed in minutes
fn node_drain_grace_period(minutes: i32) -> ValueWithUnit {
    ValueWithUnit {
        unit: Some(NODE_DRAIN_GRACE_PERIOD_UNIT.to_string()),
        value: Some(f64::from(minutes)),
    }
}

/// Minutes of a grace period, `None` when it is in another unit
fn node_drain_minutes(period: Option<&ValueWithUnit>) -> Option<i32> {
    let period = period?;
    if period.unit.as_deref() != Some(NODE_DRAIN_GRACE_PERIOD_UNIT) {
        return None;
    }
    Some(period.value.unwrap_or_default() as i32)
}

/// Parse a duration such as `15m`, `90s` or `1h30m` into whole seconds
pub fn parse_duration_seconds(duration: &str) -> Result<i32, ConversionError> {
    let invalid = || ConversionError::InvalidDuration(duration.to_string());
    if duration.is_empty() {
        return Err(invalid());
    }

    let mut total = 0.0_f64;
    let mut rest = duration;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 0.001,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];
        total += value * scale;
    }
    Ok(total as i32)
}

/// Format whole seconds as fractional minutes, e.g. `900` as `15m`
pub fn format_duration_minutes(seconds: i32) -> String {
    format!("{}m", f64::from(seconds) / 60.0)
}

pub fn convert_admin_credential(
    credential: &BreakGlassCredential,
) -> HcpOpenShiftClusterAdminCredential {
    HcpOpenShiftClusterAdminCredential {
        expiration_timestamp: credential.expiration_timestamp,
        kubeconfig: credential.kubeconfig.clone().unwrap_or_default(),
    }
}

pub fn convert_version(resource_id: &ResourceId, version: &Version) -> HcpOpenShiftVersion {
    let mut converted = HcpOpenShiftVersion::new(Some(resource_id));
    converted.properties.channel_group = version.channel_group.clone().unwrap_or_default();
    converted.properties.enabled = version.enabled.unwrap_or_default();
    converted.properties.end_of_life_timestamp = version.end_of_life_timestamp;
    converted
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
