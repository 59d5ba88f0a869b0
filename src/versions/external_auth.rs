//! External authentication wire types
//!
//! The representation is identical in every supported API version, so both
//! version modules re-export it.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{set, ProxyResource};
use super::{build_visibility_map, VersionedResource};
use crate::api::enums::{
    ConditionStatusType, ExternalAuthClientType, ExternalAuthConditionType, ProvisioningState,
    TokenValidationRuleType, UsernameClaimPrefixPolicy,
};
use crate::api::external_auth as internal;
use crate::api::field::FieldErrors;
use crate::api::optional::{
    optional_to_required, optional_to_slice, required_to_optional, required_to_optional_or_none,
    slice_to_optional,
};
use crate::api::visibility::{Shape, VisibilityEntry, VisibilityMap};

pub const VISIBILITY: &[VisibilityEntry] = &[
    ("id", "read nocase", Shape::Value),
    ("name", "read", Shape::Value),
    ("type", "read nocase", Shape::Value),
    ("systemData", "read", Shape::Object),
    ("properties", "read create update", Shape::Object),
    ("properties.provisioningState", "read", Shape::Value),
    ("properties.condition", "read", Shape::Object),
    ("properties.issuer", "read create update", Shape::Object),
    ("properties.clients", "read create update", Shape::List),
    ("properties.claim", "read create update", Shape::Object),
    ("properties.claim.validationRules", "read create update", Shape::List),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HcpOpenShiftClusterExternalAuth {
    #[serde(flatten)]
    pub resource: ProxyResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ExternalAuthProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ExternalAuthCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<TokenIssuerProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Option<ExternalAuthClientProfile>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<ExternalAuthClaimProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthCondition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ExternalAuthConditionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConditionStatusType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenIssuerProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audiences: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClientComponentProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_client_namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClientProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ExternalAuthClientComponentProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_scopes: Option<Vec<Option<String>>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<ExternalAuthClientType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsernameClaimProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_policy: Option<UsernameClaimPrefixPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupClaimProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaimMappingsProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<UsernameClaimProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<GroupClaimProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequiredClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaimValidationRule {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<TokenValidationRuleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_claim: Option<TokenRequiredClaim>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAuthClaimProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<TokenClaimMappingsProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<Vec<Option<TokenClaimValidationRule>>>,
}

impl ExternalAuthClientProfile {
    fn normalize(&self) -> internal::ExternalAuthClientProfile {
        let component = self.component.clone().unwrap_or_default();
        internal::ExternalAuthClientProfile {
            component: internal::ExternalAuthClientComponentProfile {
                name: optional_to_required(component.name),
                auth_client_namespace: optional_to_required(component.auth_client_namespace),
            },
            client_id: optional_to_required(self.client_id.clone()),
            extra_scopes: optional_to_slice(self.extra_scopes.as_deref()).unwrap_or_default(),
            type_: optional_to_required(self.type_),
        }
    }

    fn project(from: &internal::ExternalAuthClientProfile) -> Self {
        Self {
            component: Some(ExternalAuthClientComponentProfile {
                name: required_to_optional(from.component.name.clone()),
                auth_client_namespace: required_to_optional(
                    from.component.auth_client_namespace.clone(),
                ),
            }),
            client_id: required_to_optional(from.client_id.clone()),
            extra_scopes: slice_to_optional(Some(from.extra_scopes.as_slice())),
            type_: required_to_optional(from.type_),
        }
    }
}

impl TokenClaimValidationRule {
    fn normalize(&self) -> internal::TokenClaimValidationRule {
        let required = self.required_claim.clone().unwrap_or_default();
        internal::TokenClaimValidationRule {
            type_: optional_to_required(self.type_),
            required_claim: internal::TokenRequiredClaim {
                claim: optional_to_required(required.claim),
                required_value: optional_to_required(required.required_value),
            },
        }
    }

    fn project(from: &internal::TokenClaimValidationRule) -> Self {
        Self {
            type_: required_to_optional(from.type_),
            required_claim: Some(TokenRequiredClaim {
                claim: required_to_optional(from.required_claim.claim.clone()),
                required_value: required_to_optional(from.required_claim.required_value.clone()),
            }),
        }
    }
}

impl ExternalAuthClaimProfile {
    fn normalize(&self, out: &mut internal::ExternalAuthClaimProfile) {
        if let Some(mappings) = &self.mappings {
            if let Some(username) = &mappings.username {
                set(&username.claim, &mut out.mappings.username.claim);
                set(&username.prefix, &mut out.mappings.username.prefix);
                set(&username.prefix_policy, &mut out.mappings.username.prefix_policy);
            }
            match &mappings.groups {
                Some(groups) => {
                    let target = out.mappings.groups.get_or_insert_with(Default::default);
                    set(&groups.claim, &mut target.claim);
                    set(&groups.prefix, &mut target.prefix);
                }
                None => out.mappings.groups = None,
            }
        }
        if let Some(rules) = &self.validation_rules {
            out.validation_rules = rules.iter().flatten().map(TokenClaimValidationRule::normalize).collect();
        }
    }

    fn project(from: &internal::ExternalAuthClaimProfile) -> Self {
        let username = &from.mappings.username;
        Self {
            mappings: Some(TokenClaimMappingsProfile {
                username: Some(UsernameClaimProfile {
                    claim: required_to_optional(username.claim.clone()),
                    prefix: required_to_optional(username.prefix.clone()),
                    prefix_policy: required_to_optional(username.prefix_policy),
                }),
                groups: from.mappings.groups.as_ref().map(|groups| GroupClaimProfile {
                    claim: required_to_optional(groups.claim.clone()),
                    prefix: required_to_optional(groups.prefix.clone()),
                }),
            }),
            validation_rules: Some(
                from.validation_rules
                    .iter()
                    .map(|rule| Some(TokenClaimValidationRule::project(rule)))
                    .collect(),
            ),
        }
    }
}

impl VersionedResource for HcpOpenShiftClusterExternalAuth {
    type Internal = internal::HcpOpenShiftClusterExternalAuth;

    fn set_default_values(&mut self) {
        let properties = self.properties.get_or_insert_with(Default::default);
        let claim = properties.claim.get_or_insert_with(Default::default);
        let mappings = claim.mappings.get_or_insert_with(Default::default);
        let username = mappings.username.get_or_insert_with(Default::default);
        username.prefix_policy.get_or_insert(UsernameClaimPrefixPolicy::None);
    }

    fn normalize(&self, out: &mut Self::Internal) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.resource.normalize(&mut out.resource, &mut errors);

        if let Some(properties) = &self.properties {
            let target = &mut out.properties;
            set(&properties.provisioning_state, &mut target.provisioning_state);
            if let Some(condition) = &properties.condition {
                let current = target.condition.get_or_insert_with(Default::default);
                set(&condition.type_, &mut current.type_);
                set(&condition.status, &mut current.status);
                if condition.last_transition_time.is_some() {
                    current.last_transition_time = condition.last_transition_time;
                }
                set(&condition.reason, &mut current.reason);
                set(&condition.message, &mut current.message);
            }
            if let Some(issuer) = &properties.issuer {
                set(&issuer.url, &mut target.issuer.url);
                if let Some(audiences) = optional_to_slice(issuer.audiences.as_deref()) {
                    target.issuer.audiences = audiences;
                }
                set(&issuer.ca, &mut target.issuer.ca);
            }
            if let Some(clients) = &properties.clients {
                target.clients = clients
                    .iter()
                    .flatten()
                    .map(ExternalAuthClientProfile::normalize)
                    .collect();
            }
            if let Some(claim) = &properties.claim {
                claim.normalize(&mut target.claim);
            }
        }

        errors.into_result()
    }

    fn project(from: &Self::Internal) -> Self {
        let p = &from.properties;
        let clients: Vec<Option<ExternalAuthClientProfile>> = p
            .clients
            .iter()
            .map(|client| Some(ExternalAuthClientProfile::project(client)))
            .collect();
        Self {
            resource: ProxyResource::project(&from.resource),
            properties: Some(ExternalAuthProperties {
                provisioning_state: required_to_optional_or_none(p.provisioning_state),
                condition: p.condition.as_ref().map(|c| ExternalAuthCondition {
                    type_: required_to_optional(c.type_),
                    status: required_to_optional(c.status),
                    last_transition_time: c.last_transition_time,
                    reason: required_to_optional(c.reason.clone()),
                    message: required_to_optional(c.message.clone()),
                }),
                issuer: Some(TokenIssuerProfile {
                    url: required_to_optional(p.issuer.url.clone()),
                    audiences: slice_to_optional(Some(p.issuer.audiences.as_slice())),
                    ca: required_to_optional(p.issuer.ca.clone()),
                }),
                clients: required_to_optional(clients),
                claim: Some(ExternalAuthClaimProfile::project(&p.claim)),
            }),
        }
    }

    fn visibility_map() -> &'static VisibilityMap {
        static MAP: OnceLock<VisibilityMap> = OnceLock::new();
        MAP.get_or_init(|| build_visibility_map("externalAuth", VISIBILITY))
    }
}

#[cfg(test)]
#[path = "external_auth_test.rs"]
mod tests;
