use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::arm::ProxyResource;
use super::resource_id::ResourceId;

/// An OpenShift version offered for new clusters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftVersion {
    #[serde(flatten)]
    pub resource: ProxyResource,
    pub properties: HcpOpenShiftVersionProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftVersionProperties {
    pub channel_group: String,
    pub enabled: bool,
    pub end_of_life_timestamp: Option<DateTime<Utc>>,
}

impl HcpOpenShiftVersion {
    pub fn new(resource_id: Option<&ResourceId>) -> Self {
        Self {
            resource: ProxyResource::new(resource_id),
            properties: HcpOpenShiftVersionProperties::default(),
        }
    }
}
