//! External auth conversion to and from the backend

use super::{
    client_type_from_backend, client_type_to_backend, prefix_policy_from_backend,
    prefix_policy_to_backend,
};
use crate::api::arm::ProxyResource;
use crate::api::enums::TokenValidationRuleType;
use crate::api::error::ConversionError;
use crate::api::external_auth::{
    ExternalAuthClaimProfile, ExternalAuthClientComponentProfile, ExternalAuthClientProfile,
    ExternalAuthProperties, GroupClaimProfile, HcpOpenShiftClusterExternalAuth,
    TokenClaimMappingsProfile, TokenClaimValidationRule, TokenIssuerProfile, TokenRequiredClaim,
    UsernameClaimProfile,
};
use crate::api::resource_id::ResourceId;
use crate::backend::model::{
    self, ClientComponent, ExternalAuthClaim, ExternalAuthClient, GroupsClaim, TokenClaimMappings,
    TokenIssuer, UsernameClaim,
};

/// Convert a backend external auth into a canonical external auth.
///
/// The backend has a single kind of validation rule, so every rule reads
/// back as a required claim. Conditions are not reported by the backend.
pub fn convert_external_auth(
    resource_id: &ResourceId,
    external_auth: &model::ExternalAuth,
) -> Result<HcpOpenShiftClusterExternalAuth, ConversionError> {
    let issuer = external_auth.issuer.clone().unwrap_or_default();
    let claim = external_auth.claim.clone().unwrap_or_default();
    let mappings = claim.mappings.unwrap_or_default();
    let user_name = mappings.user_name.unwrap_or_default();

    let prefix_policy = prefix_policy_from_backend(user_name.prefix_policy.as_deref().unwrap_or_default())?;

    let clients = external_auth
        .clients
        .iter()
        .flatten()
        .map(|client| {
            let component = client.component.clone().unwrap_or_default();
            Ok(ExternalAuthClientProfile {
                component: ExternalAuthClientComponentProfile {
                    name: component.name.unwrap_or_default(),
                    auth_client_namespace: component.namespace.unwrap_or_default(),
                },
                client_id: client.id.clone().unwrap_or_default(),
                extra_scopes: client.extra_scopes.clone().unwrap_or_default(),
                type_: client_type_from_backend(client.type_.as_deref().unwrap_or_default())?,
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    let validation_rules = claim
        .validation_rules
        .iter()
        .flatten()
        .map(|rule| TokenClaimValidationRule {
            type_: TokenValidationRuleType::RequiredClaim,
            required_claim: TokenRequiredClaim {
                claim: rule.claim.clone().unwrap_or_default(),
                required_value: rule.required_value.clone().unwrap_or_default(),
            },
        })
        .collect();

    Ok(HcpOpenShiftClusterExternalAuth {
        resource: ProxyResource::new(Some(resource_id)),
        properties: ExternalAuthProperties {
            issuer: TokenIssuerProfile {
                url: issuer.url.unwrap_or_default(),
                audiences: issuer.audiences.unwrap_or_default(),
                ca: issuer.ca.unwrap_or_default(),
            },
            clients,
            claim: ExternalAuthClaimProfile {
                mappings: TokenClaimMappingsProfile {
                    username: UsernameClaimProfile {
                        claim: user_name.claim.unwrap_or_default(),
                        prefix: user_name.prefix.unwrap_or_default(),
                        prefix_policy,
                    },
                    groups: mappings.groups.map(|groups| GroupClaimProfile {
                        claim: groups.claim.unwrap_or_default(),
                        prefix: groups.prefix.unwrap_or_default(),
                    }),
                },
                validation_rules,
            },
            ..Default::default()
        },
        ..Default::default()
    })
}

/// Build the backend external auth body. The ID is only sent on create.
pub fn build_external_auth(
    external_auth: &HcpOpenShiftClusterExternalAuth,
    updating: bool,
) -> Result<model::ExternalAuth, ConversionError> {
    let properties = &external_auth.properties;
    let username = &properties.claim.mappings.username;

    let clients = properties
        .clients
        .iter()
        .map(|client| {
            Ok(ExternalAuthClient {
                id: Some(client.client_id.clone()),
                component: Some(ClientComponent {
                    name: Some(client.component.name.clone()),
                    namespace: Some(client.component.auth_client_namespace.clone()),
                }),
                extra_scopes: Some(client.extra_scopes.clone()),
                type_: Some(client_type_to_backend(client.type_)?.to_string()),
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    let validation_rules = if properties.claim.validation_rules.is_empty() {
        None
    } else {
        Some(
            properties
                .claim
                .validation_rules
                .iter()
                .map(|rule| model::TokenClaimValidationRule {
                    claim: Some(rule.required_claim.claim.clone()),
                    required_value: Some(rule.required_claim.required_value.clone()),
                })
                .collect(),
        )
    };

    Ok(model::ExternalAuth {
        id: (!updating).then(|| external_auth.resource.name.clone()),
        issuer: Some(TokenIssuer {
            url: Some(properties.issuer.url.clone()),
            ca: Some(properties.issuer.ca.clone()),
            audiences: Some(properties.issuer.audiences.clone()),
        }),
        clients: Some(clients),
        claim: Some(ExternalAuthClaim {
            mappings: Some(TokenClaimMappings {
                user_name: Some(UsernameClaim {
                    claim: Some(username.claim.clone()),
                    prefix: Some(username.prefix.clone()),
                    prefix_policy: Some(prefix_policy_to_backend(username.prefix_policy)?.to_string()),
                }),
                groups: properties.claim.mappings.groups.as_ref().map(|groups| GroupsClaim {
                    claim: Some(groups.claim.clone()),
                    prefix: Some(groups.prefix.clone()),
                }),
            }),
            validation_rules,
        }),
        ..Default::default()
    })
}

#[cfg(test)]
#[path = "external_auth_test.rs"]
mod tests;
