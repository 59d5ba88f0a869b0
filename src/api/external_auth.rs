//! Canonical external authentication model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::arm::ProxyResource;
use super::enums::{
    ConditionStatusType, ExternalAuthClientType, ExternalAuthConditionType, ProvisioningState,
    TokenValidationRuleType, UsernameClaimPrefixPolicy,
};
use super::field::FieldErrors;
use super::request::CanonicalResource;
use super::resource_id::ResourceId;
use super::validation::validate_external_auth;
use crate::backend::internal_id::InternalId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcpOpenShiftClusterExternalAuth {
    #[serde(flatten)]
    pub resource: ProxyResource,
    pub properties: ExternalAuthProperties,
    pub service_provider_properties: ExternalAuthServiceProviderProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthProperties {
    pub provisioning_state: ProvisioningState,
    pub condition: Option<ExternalAuthCondition>,
    pub issuer: TokenIssuerProfile,
    pub clients: Vec<ExternalAuthClientProfile>,
    pub claim: ExternalAuthClaimProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthServiceProviderProperties {
    pub cluster_service_id: Option<InternalId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthCondition {
    #[serde(rename = "type")]
    pub type_: ExternalAuthConditionType,
    pub status: ConditionStatusType,
    pub last_transition_time: Option<DateTime<Utc>>,
    pub reason: String,
    pub message: String,
}

/// The OIDC token issuer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenIssuerProfile {
    pub url: String,
    pub audiences: Vec<String>,
    /// PEM bundle used to validate the issuer's certificate
    pub ca: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClientProfile {
    pub component: ExternalAuthClientComponentProfile,
    pub client_id: String,
    pub extra_scopes: Vec<String>,
    #[serde(rename = "type")]
    pub type_: ExternalAuthClientType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClientComponentProfile {
    pub name: String,
    pub auth_client_namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClaimProfile {
    pub mappings: TokenClaimMappingsProfile,
    pub validation_rules: Vec<TokenClaimValidationRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaimMappingsProfile {
    pub username: UsernameClaimProfile,
    pub groups: Option<GroupClaimProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameClaimProfile {
    pub claim: String,
    pub prefix: String,
    pub prefix_policy: UsernameClaimPrefixPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupClaimProfile {
    pub claim: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaimValidationRule {
    #[serde(rename = "type")]
    pub type_: TokenValidationRuleType,
    pub required_claim: TokenRequiredClaim,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequiredClaim {
    pub claim: String,
    pub required_value: String,
}

impl HcpOpenShiftClusterExternalAuth {
    pub fn new_default(resource_id: Option<&ResourceId>) -> Self {
        let mut auth = Self {
            resource: ProxyResource::new(resource_id),
            ..Default::default()
        };
        auth.properties.claim.mappings.username.prefix_policy = UsernameClaimPrefixPolicy::None;
        auth
    }
}

impl CanonicalResource for HcpOpenShiftClusterExternalAuth {
    fn new_default(resource_id: Option<&ResourceId>) -> Self {
        HcpOpenShiftClusterExternalAuth::new_default(resource_id)
    }

    fn carry_service_state(&mut self, current: &Self) {
        self.service_provider_properties = current.service_provider_properties.clone();
        self.properties.provisioning_state = current.properties.provisioning_state;
        self.properties.condition = current.properties.condition.clone();
        self.resource.system_data = current.resource.system_data.clone();
    }

    fn validate_content(&self, current: Option<&Self>) -> FieldErrors {
        validate_external_auth(self, current)
    }
}
