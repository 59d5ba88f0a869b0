//! OpenShift version strings as the backend spells them
//!
//! Customers name versions `X.Y`; the backend names them
//! `openshift-vX.Y.Z[-prerelease][-channel]`.

pub const OPENSHIFT_VERSION_PREFIX: &str = "openshift-v";

const STABLE_CHANNEL_GROUP: &str = "stable";

/// Patch versions installed for a bare `X.Y`
const DEFAULT_PATCH_VERSIONS: &[(&str, &str)] = &[("4.19", "7"), ("4.20", "8")];

pub fn strip_prefix(version: &str) -> String {
    version.replacen(OPENSHIFT_VERSION_PREFIX, "", 1)
}

pub fn add_prefix(version: &str) -> String {
    if !version.is_empty() && !version.starts_with(OPENSHIFT_VERSION_PREFIX) {
        format!("{}{}", OPENSHIFT_VERSION_PREFIX, version)
    } else {
        version.to_string()
    }
}

/// Reduce a backend version to `X.Y`
pub fn to_xy(version: &str) -> String {
    let version = strip_prefix(version);
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 2 {
        format!("{}.{}", parts[0], parts[1])
    } else {
        version
    }
}

/// Expand a customer version into the backend version for `channel_group`.
///
/// A missing patch is filled from the default patch table (`0` for
/// versions outside it). Channels other than stable are appended as a
/// suffix.
pub fn to_xyz(version: &str, channel_group: &str) -> String {
    if version.is_empty() {
        return String::new();
    }

    let (version_part, prerelease) = match version.find('-') {
        Some(index) => version.split_at(index),
        None => (version, ""),
    };

    let mut parts: Vec<&str> = version_part.split('.').collect();
    if parts.len() == 1 {
        parts.push("0");
    }
    if parts.len() == 2 {
        let patch = DEFAULT_PATCH_VERSIONS
            .iter()
            .find(|(minor, _)| *minor == version)
            .map(|(_, patch)| *patch)
            .unwrap_or("0");
        parts.push(patch);
    }

    let mut backend_version = format!("{}{}{}", OPENSHIFT_VERSION_PREFIX, parts.join("."), prerelease);
    if !channel_group.is_empty() && channel_group != STABLE_CHANNEL_GROUP {
        backend_version.push('-');
        backend_version.push_str(channel_group);
    }
    backend_version
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
