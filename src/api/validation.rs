//! Content validation of canonical resources
//!
//! Runs on the normalized resource after the visibility rules have passed.
//! Targets use the external field paths. On update, a value equal to the one
//! already stored is not checked again, so resources accepted under older
//! rules remain updatable.

use std::net::Ipv4Addr;

use super::cluster::{
    CustomerApiProfile, CustomerProperties, HcpOpenShiftCluster, NetworkProfile,
};
use super::external_auth::{ExternalAuthProperties, HcpOpenShiftClusterExternalAuth};
use super::field::{FieldError, FieldErrors};
use super::node_pool::{HcpOpenShiftClusterNodePool, NodePoolProperties};
use super::resource_id::ResourceId;

pub const MIN_HOST_PREFIX: i32 = 23;
pub const MAX_HOST_PREFIX: i32 = 26;
pub const MAX_NODE_DRAIN_TIMEOUT_MINUTES: i32 = 10080;
pub const MAX_AUTHORIZED_CIDRS: usize = 500;
pub const MAX_NODE_POOL_NODES: i32 = 200;
pub const MIN_OS_DISK_SIZE_GIB: i32 = 64;
pub const MAX_AUDIENCES: usize = 10;
pub const MAX_CLIENTS: usize = 20;

const SUBNET_TYPE: &str = "Microsoft.Network/virtualNetworks/subnets";
const NETWORK_SECURITY_GROUP_TYPE: &str = "Microsoft.Network/networkSecurityGroups";
const DISK_ENCRYPTION_SET_TYPE: &str = "Microsoft.Compute/diskEncryptionSets";

/// True when an update leaves the value as it was
fn unchanged<T: PartialEq>(new: &T, old: Option<&T>) -> bool {
    old.is_some_and(|old| old == new)
}

fn invalid(
    target: &str,
    value: impl std::fmt::Display,
    hint: impl std::fmt::Display,
) -> FieldError {
    let field = target.rsplit('.').next().unwrap_or(target);
    FieldError::new(
        target,
        format!("Invalid value '{}' for field '{}' ({})", value, field, hint),
    )
}

fn check_range(
    errors: &mut FieldErrors,
    target: &str,
    value: i32,
    old: Option<&i32>,
    min: i32,
    max: Option<i32>,
) {
    if unchanged(&value, old) {
        return;
    }
    if value < min {
        let hint = if min == 0 {
            "must be non-negative".to_string()
        } else {
            format!("must be at least {}", min)
        };
        errors.push(invalid(target, value, hint));
    } else if let Some(max) = max.filter(|max| value > *max) {
        errors.push(invalid(target, value, format!("must be at most {}", max)));
    }
}

/// Parse an IPv4 CIDR block whose host bits are all zero
pub fn parse_cidr_v4(s: &str) -> Result<(Ipv4Addr, u8), &'static str> {
    let (addr, prefix) = s.split_once('/').ok_or("must be a v4 CIDR range")?;
    let addr: Ipv4Addr = addr.parse().map_err(|_| "must be a v4 CIDR range")?;
    let prefix: u8 = prefix
        .parse()
        .ok()
        .filter(|p| *p <= 32)
        .ok_or("must be a v4 CIDR range")?;
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    if u32::from(addr) & !mask != 0 {
        return Err("host bits must be zero");
    }
    Ok((addr, prefix))
}

fn cidrs_overlap(a: (Ipv4Addr, u8), b: (Ipv4Addr, u8)) -> bool {
    let prefix = a.1.min(b.1);
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    u32::from(a.0) & mask == u32::from(b.0) & mask
}

fn check_cidr(errors: &mut FieldErrors, target: &str, value: &str, old: Option<&String>) {
    if value.is_empty() || old.is_some_and(|old| old == value) {
        return;
    }
    if let Err(hint) = parse_cidr_v4(value) {
        errors.push(invalid(target, value, hint));
    }
}

fn check_resource_type(
    errors: &mut FieldErrors,
    target: &str,
    value: Option<&ResourceId>,
    old: Option<&ResourceId>,
    expected: &str,
) {
    let Some(value) = value else {
        return;
    };
    if old.is_some_and(|old| old == value) {
        return;
    }
    if !value.full_type().eq_ignore_ascii_case(expected) {
        errors.push(invalid(
            target,
            value,
            format!("must be a valid '{}' resource ID", expected),
        ));
    }
}

fn check_max_items(errors: &mut FieldErrors, target: &str, len: usize, max: usize) {
    if len > max {
        let field = target.rsplit('.').next().unwrap_or(target);
        errors.push(FieldError::new(
            target,
            format!("Field '{}' must have at most {} items", field, max),
        ));
    }
}

fn check_max_len(errors: &mut FieldErrors, target: &str, value: &str, max: usize) {
    if value.len() > max {
        errors.push(invalid(target, value, format!("maximum length is {}", max)));
    }
}

/// Accept `MAJOR.MINOR`, and `MAJOR.MINOR.PATCH` when `micro` is allowed
fn check_openshift_version(
    errors: &mut FieldErrors,
    target: &str,
    value: &str,
    old: Option<&String>,
    micro: bool,
) {
    if value.is_empty() || old.is_some_and(|old| old == value) {
        return;
    }
    let parts: Vec<&str> = value.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    let valid = numeric && (parts.len() == 2 || (micro && parts.len() == 3));
    if !valid {
        errors.push(FieldError::new(
            target,
            format!("Invalid OpenShift version '{}'", value),
        ));
    }
}

fn validate_network(errors: &mut FieldErrors, new: &NetworkProfile, old: Option<&NetworkProfile>) {
    check_cidr(
        errors,
        "properties.network.podCidr",
        &new.pod_cidr,
        old.map(|o| &o.pod_cidr),
    );
    check_cidr(
        errors,
        "properties.network.serviceCidr",
        &new.service_cidr,
        old.map(|o| &o.service_cidr),
    );
    check_cidr(
        errors,
        "properties.network.machineCidr",
        &new.machine_cidr,
        old.map(|o| &o.machine_cidr),
    );
    check_range(
        errors,
        "properties.network.hostPrefix",
        new.host_prefix,
        old.map(|o| &o.host_prefix),
        MIN_HOST_PREFIX,
        Some(MAX_HOST_PREFIX),
    );

    if unchanged(new, old) {
        return;
    }
    let pod = parse_cidr_v4(&new.pod_cidr).ok();
    let service = parse_cidr_v4(&new.service_cidr).ok();
    let machine = parse_cidr_v4(&new.machine_cidr).ok();
    let pairs = [
        (machine, "machine", &new.machine_cidr, service, "service", &new.service_cidr),
        (machine, "machine", &new.machine_cidr, pod, "pod", &new.pod_cidr),
        (service, "service", &new.service_cidr, pod, "pod", &new.pod_cidr),
    ];
    for (a, a_name, a_value, b, b_name, b_value) in pairs {
        if let (Some(a), Some(b)) = (a, b) {
            if cidrs_overlap(a, b) {
                errors.push(FieldError::new(
                    "properties.network",
                    format!(
                        "{} CIDR '{}' and {} CIDR '{}' overlap",
                        a_name, a_value, b_name, b_value
                    ),
                ));
            }
        }
    }
}

fn validate_api(
    errors: &mut FieldErrors,
    new: &CustomerApiProfile,
    old: Option<&CustomerApiProfile>,
) {
    const TARGET: &str = "properties.api.authorizedCidrs";
    let Some(cidrs) = &new.authorized_cidrs else {
        return;
    };
    if old.is_some_and(|old| old.authorized_cidrs.as_ref() == Some(cidrs)) {
        return;
    }
    if cidrs.is_empty() {
        errors.push(FieldError::new(
            TARGET,
            "Field 'authorizedCidrs' must have at least 1 item",
        ));
    }
    check_max_items(errors, TARGET, cidrs.len(), MAX_AUTHORIZED_CIDRS);
    for (i, cidr) in cidrs.iter().enumerate() {
        let target = format!("{}[{}]", TARGET, i);
        if cidr.trim() != cidr.as_str() {
            errors.push(invalid(&target, cidr, "must not contain extra whitespace"));
        } else if cidr.parse::<Ipv4Addr>().is_err() && parse_cidr_v4(cidr).is_err() {
            let hint = "must be an IPv4 address or a v4 CIDR range";
            errors.push(invalid(&target, cidr, hint));
        }
    }
}

fn validate_customer_properties(
    errors: &mut FieldErrors,
    new: &CustomerProperties,
    old: Option<&CustomerProperties>,
) {
    validate_network(errors, &new.network, old.map(|o| &o.network));
    validate_api(errors, &new.api, old.map(|o| &o.api));

    let platform = &new.platform;
    let old_platform = old.map(|o| &o.platform);
    check_resource_type(
        errors,
        "properties.platform.subnetId",
        platform.subnet_id.as_ref(),
        old_platform.and_then(|o| o.subnet_id.as_ref()),
        SUBNET_TYPE,
    );
    check_resource_type(
        errors,
        "properties.platform.networkSecurityGroupId",
        platform.network_security_group_id.as_ref(),
        old_platform.and_then(|o| o.network_security_group_id.as_ref()),
        NETWORK_SECURITY_GROUP_TYPE,
    );

    let autoscaling = &new.autoscaling;
    let old_autoscaling = old.map(|o| &o.autoscaling);
    check_range(
        errors,
        "properties.autoscaling.maxPodGracePeriodSeconds",
        autoscaling.max_pod_grace_period_seconds,
        old_autoscaling.map(|o| &o.max_pod_grace_period_seconds),
        1,
        None,
    );
    check_range(
        errors,
        "properties.autoscaling.maxNodeProvisionTimeSeconds",
        autoscaling.max_node_provision_time_seconds,
        old_autoscaling.map(|o| &o.max_node_provision_time_seconds),
        1,
        None,
    );

    check_range(
        errors,
        "properties.nodeDrainTimeoutMinutes",
        new.node_drain_timeout_minutes,
        old.map(|o| &o.node_drain_timeout_minutes),
        0,
        Some(MAX_NODE_DRAIN_TIMEOUT_MINUTES),
    );
}

/// Check the cluster content; `old` is the stored cluster on update
pub fn validate_cluster(
    new: &HcpOpenShiftCluster,
    old: Option<&HcpOpenShiftCluster>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_customer_properties(
        &mut errors,
        &new.customer_properties,
        old.map(|o| &o.customer_properties),
    );
    errors
}

fn validate_node_pool_properties(
    errors: &mut FieldErrors,
    new: &NodePoolProperties,
    old: Option<&NodePoolProperties>,
) {
    check_openshift_version(
        errors,
        "properties.version.id",
        &new.version.id,
        old.map(|o| &o.version.id),
        true,
    );

    let platform = &new.platform;
    let old_platform = old.map(|o| &o.platform);
    check_resource_type(
        errors,
        "properties.platform.subnetId",
        platform.subnet_id.as_ref(),
        old_platform.and_then(|o| o.subnet_id.as_ref()),
        SUBNET_TYPE,
    );
    check_range(
        errors,
        "properties.platform.osDisk.sizeGiB",
        platform.os_disk.size_gib,
        old_platform.map(|o| &o.os_disk.size_gib),
        MIN_OS_DISK_SIZE_GIB,
        None,
    );
    check_resource_type(
        errors,
        "properties.platform.osDisk.encryptionSetId",
        platform.os_disk.encryption_set_id.as_ref(),
        old_platform.and_then(|o| o.os_disk.encryption_set_id.as_ref()),
        DISK_ENCRYPTION_SET_TYPE,
    );

    // Zonal pools have no node limit
    let max_nodes = platform
        .availability_zone
        .is_empty()
        .then_some(MAX_NODE_POOL_NODES);
    check_range(
        errors,
        "properties.replicas",
        new.replicas,
        old.map(|o| &o.replicas),
        0,
        max_nodes,
    );
    if let Some(scaling) = &new.auto_scaling {
        let old_scaling = old.and_then(|o| o.auto_scaling.as_ref());
        let before = errors.len();
        check_range(
            errors,
            "properties.autoScaling.min",
            scaling.min,
            old_scaling.map(|o| &o.min),
            0,
            max_nodes,
        );
        check_range(
            errors,
            "properties.autoScaling.max",
            scaling.max,
            old_scaling.map(|o| &o.max),
            0,
            max_nodes,
        );
        let ordered = scaling.max >= scaling.min || unchanged(scaling, old_scaling);
        if errors.len() == before && !ordered {
            errors.push(invalid(
                "properties.autoScaling.max",
                scaling.max,
                "must be at least the value of 'min'",
            ));
        }
    }

    for (i, taint) in new.taints.iter().enumerate() {
        if old.is_some_and(|o| o.taints.contains(taint)) {
            continue;
        }
        if taint.key.is_empty() {
            errors.push(FieldError::new(
                format!("properties.taints[{}].key", i),
                "Missing required field 'key'",
            ));
        }
    }

    if let Some(minutes) = new.node_drain_timeout_minutes {
        check_range(
            errors,
            "properties.nodeDrainTimeoutMinutes",
            minutes,
            old.and_then(|o| o.node_drain_timeout_minutes.as_ref()),
            0,
            Some(MAX_NODE_DRAIN_TIMEOUT_MINUTES),
        );
    }
}

/// Check the node pool content; `old` is the stored node pool on update
pub fn validate_node_pool(
    new: &HcpOpenShiftClusterNodePool,
    old: Option<&HcpOpenShiftClusterNodePool>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_node_pool_properties(&mut errors, &new.properties, old.map(|o| &o.properties));
    errors
}

fn validate_external_auth_properties(
    errors: &mut FieldErrors,
    new: &ExternalAuthProperties,
    old: Option<&ExternalAuthProperties>,
) {
    let issuer = &new.issuer;
    let old_issuer = old.map(|o| &o.issuer);
    if !issuer.url.is_empty()
        && !unchanged(&issuer.url, old_issuer.map(|o| &o.url))
        && !issuer.url.starts_with("https://")
    {
        errors.push(invalid(
            "properties.issuer.url",
            &issuer.url,
            "must start with 'https://'",
        ));
    }
    if !unchanged(&issuer.audiences, old_issuer.map(|o| &o.audiences)) {
        check_max_items(
            errors,
            "properties.issuer.audiences",
            issuer.audiences.len(),
            MAX_AUDIENCES,
        );
    }

    if !unchanged(&new.clients, old.map(|o| &o.clients)) {
        check_max_items(errors, "properties.clients", new.clients.len(), MAX_CLIENTS);
        for (i, client) in new.clients.iter().enumerate() {
            let component = &client.component;
            check_max_len(
                errors,
                &format!("properties.clients[{}].component.name", i),
                &component.name,
                256,
            );
            check_max_len(
                errors,
                &format!("properties.clients[{}].component.authClientNamespace", i),
                &component.auth_client_namespace,
                63,
            );
        }
    }

    if let Some(groups) = &new.claim.mappings.groups {
        let old_groups = old.and_then(|o| o.claim.mappings.groups.as_ref());
        if !unchanged(&groups.claim, old_groups.map(|o| &o.claim)) {
            check_max_len(
                errors,
                "properties.claim.mappings.groups.claim",
                &groups.claim,
                256,
            );
        }
    }
}

/// Check the external auth content; `old` is the stored external auth on update
pub fn validate_external_auth(
    new: &HcpOpenShiftClusterExternalAuth,
    old: Option<&HcpOpenShiftClusterExternalAuth>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_external_auth_properties(&mut errors, &new.properties, old.map(|o| &o.properties));
    errors
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
