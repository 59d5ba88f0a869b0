//! ARM resource envelope shared by every canonical resource

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{CreatedByType, ManagedServiceIdentityType};
use super::resource_id::ResourceId;

/// Tenant of the subscription owning the resource
pub const HEADER_NAME_HOME_TENANT_ID: &str = "x-ms-home-tenant-id";
/// Data-plane endpoint for the resource's managed identities
pub const HEADER_NAME_IDENTITY_URL: &str = "x-ms-identity-url";

/// Metadata about creation and last modification of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    pub created_by: String,
    pub created_by_type: CreatedByType,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified_by: String,
    pub last_modified_by_type: CreatedByType,
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// A top-level resource with a location and tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedResource {
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub location: String,
    pub tags: BTreeMap<String, String>,
    pub system_data: Option<SystemData>,
}

impl TrackedResource {
    pub fn new(resource_id: Option<&ResourceId>) -> Self {
        let mut resource = Self::default();
        if let Some(id) = resource_id {
            resource.name = id.name().to_string();
            resource.type_ = id.full_type();
            resource.id = Some(id.clone());
        }
        resource
    }
}

/// A nested resource without location or tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResource {
    pub id: Option<ResourceId>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub system_data: Option<SystemData>,
}

impl ProxyResource {
    pub fn new(resource_id: Option<&ResourceId>) -> Self {
        let mut resource = Self::default();
        if let Some(id) = resource_id {
            resource.name = id.name().to_string();
            resource.type_ = id.full_type();
            resource.id = Some(id.clone());
        }
        resource
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    pub client_id: Option<String>,
    pub principal_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedServiceIdentity {
    #[serde(rename = "type")]
    pub type_: ManagedServiceIdentityType,
    pub principal_id: String,
    pub tenant_id: String,
    /// Keyed by the identity's resource ID string; a `None` value is an
    /// identity whose client and principal IDs are not known yet
    pub user_assigned_identities: BTreeMap<String, Option<UserAssignedIdentity>>,
}
