//! ARM-style structured error bodies
//!
//! Every failure that reaches a client is shaped as
//! `{"error": {"code", "message", "target", "details"}}` together with an
//! HTTP status code that is not serialized.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::resource_id::{ResourceId, ResourceType};

pub const CODE_INTERNAL_SERVER_ERROR: &str = "InternalServerError";
pub const CODE_INVALID_REQUEST_CONTENT: &str = "InvalidRequestContent";
pub const CODE_MULTIPLE_ERRORS_OCCURRED: &str = "MultipleErrorsOccurred";
pub const CODE_CONFLICT: &str = "Conflict";
pub const CODE_NOT_FOUND: &str = "NotFound";
pub const CODE_SERVICE_UNAVAILABLE: &str = "ServiceUnavailable";
pub const CODE_RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
pub const CODE_RESOURCE_GROUP_NOT_FOUND: &str = "ResourceGroupNotFound";
pub const CODE_SUBSCRIPTION_NOT_FOUND: &str = "SubscriptionNotFound";
pub const CODE_INVALID_RESOURCE_TYPE: &str = "InvalidResourceType";
pub const CODE_MISSING_API_VERSION_PARAMETER: &str = "MissingApiVersionParameter";

/// Message used when several content validation errors are reported together
pub const MULTIPLE_VALIDATION_ERRORS_MESSAGE: &str = "Content validation failed on multiple fields";

/// The body of a cloud error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudErrorBody {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudErrorBody>,
}

impl CloudErrorBody {
    pub fn new(code: &str, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            target: target.into(),
            details: Vec::new(),
        }
    }

    /// Collapse a list of errors into a single body.
    ///
    /// Returns `None` for an empty list, the error itself for a single
    /// entry, and a `MultipleErrorsOccurred` wrapper otherwise.
    pub fn from_slice(errors: Vec<CloudErrorBody>, multiple_errors_message: &str) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.into_iter().next(),
            _ => Some(Self {
                code: CODE_MULTIPLE_ERRORS_OCCURRED.to_string(),
                message: multiple_errors_message.to_string(),
                target: String::new(),
                details: errors,
            }),
        }
    }
}

impl std::fmt::Display for CloudErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.code)?;
        if !self.target.is_empty() {
            write!(f, "{}: ", self.target)?;
        }
        write!(f, "{}", self.message)?;
        if !self.details.is_empty() {
            write!(f, " Details: ")?;
            for (i, detail) in self.details.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", detail)?;
            }
        }
        Ok(())
    }
}

/// A cloud error with the HTTP status it should be returned with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudError {
    #[serde(skip)]
    pub status_code: u16,

    #[serde(rename = "error")]
    pub body: CloudErrorBody,
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code, self.body)
    }
}

impl std::error::Error for CloudError {}

impl CloudError {
    pub fn new(
        status_code: u16,
        code: &str,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            body: CloudErrorBody::new(code, target, message),
        }
    }

    pub fn code(&self) -> &str {
        &self.body.code
    }

    pub fn internal_server_error() -> Self {
        Self::new(500, CODE_INTERNAL_SERVER_ERROR, "", "Internal server error.")
    }

    pub fn conflict(resource_id: &ResourceId, message: impl Into<String>) -> Self {
        Self::new(409, CODE_CONFLICT, resource_id.to_string(), message)
    }

    /// Build a 400 error from a list of content validation errors.
    ///
    /// Returns `None` when the list is empty.
    pub fn content_validation(errors: Vec<CloudErrorBody>) -> Option<Self> {
        CloudErrorBody::from_slice(errors, MULTIPLE_VALIDATION_ERRORS_MESSAGE).map(|body| Self {
            status_code: 400,
            body,
        })
    }

    pub fn invalid_request_content(target: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::new(
            400,
            CODE_INVALID_REQUEST_CONTENT,
            target,
            format!(
                "The request content was invalid and could not be deserialized: {:?}",
                err.to_string()
            ),
        )
    }

    /// 404 scoped to a resource identifier
    pub fn resource_not_found(resource_id: &ResourceId) -> Self {
        let (code, message) = match resource_id.resource_type() {
            ResourceType::Subscription => (
                CODE_SUBSCRIPTION_NOT_FOUND,
                format!(
                    "The subscription '{}' was not found.",
                    resource_id.subscription_id()
                ),
            ),
            ResourceType::ResourceGroup => (
                CODE_RESOURCE_GROUP_NOT_FOUND,
                format!(
                    "The resource group '{}' under subscription '{}' was not found.",
                    resource_id.resource_group_name().unwrap_or_default(),
                    resource_id.subscription_id()
                ),
            ),
            ResourceType::Provider => (
                CODE_RESOURCE_NOT_FOUND,
                format!(
                    "The resource '{}/{}' under resource group '{}' was not found.",
                    resource_id.type_path(),
                    resource_id.name(),
                    resource_id.resource_group_name().unwrap_or_default()
                ),
            ),
        };
        Self::new(404, code, resource_id.to_string(), message)
    }

    pub fn missing_api_version() -> Self {
        Self::new(
            400,
            CODE_MISSING_API_VERSION_PARAMETER,
            "",
            "The api-version query parameter (?api-version=) is required for all requests.",
        )
    }

    pub fn unsupported_api_version(resource_type: &str, api_version: &str) -> Self {
        Self::new(
            400,
            CODE_INVALID_RESOURCE_TYPE,
            "",
            format!(
                "The resource type '{}' could not be found for api version '{}'.",
                resource_type, api_version
            ),
        )
    }
}

impl IntoResponse for CloudError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
#[path = "cloud_error_test.rs"]
mod tests;
