//! Backend failures and their mapping onto cloud errors

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::internal_id::InternalIdKind;
use crate::api::cloud_error::{
    CloudError, CODE_CONFLICT, CODE_INVALID_REQUEST_CONTENT, CODE_NOT_FOUND,
    CODE_SERVICE_UNAVAILABLE,
};
use crate::api::error::ConversionError;
use crate::api::resource_id::ResourceId;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a structured error
    #[error("backend returned {status}: {reason}")]
    Api {
        status: u16,
        code: String,
        reason: String,
    },

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid InternalID: {0}")]
    InvalidInternalId(String),

    #[error("backend path is not a {expected}: {path}")]
    WrongKind {
        expected: InternalIdKind,
        path: String,
    },

    #[error("empty {0} response body")]
    EmptyBody(&'static str),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reason: String,
}

impl BackendError {
    /// Build an API error from a non-success response body
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ApiErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let reason = if parsed.reason.is_empty() {
            String::from_utf8_lossy(body).into_owned()
        } else {
            parsed.reason
        };
        BackendError::Api {
            status,
            code: parsed.code,
            reason,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map a backend failure onto the cloud error returned to the client.
///
/// Only 400, 404, 409 and 503 carry the backend's reason; anything else is
/// an internal server error with no backend detail.
pub fn cloud_error_from_backend(err: &BackendError, resource_id: Option<&ResourceId>) -> CloudError {
    let mapped = match err {
        BackendError::Api { status: 400, reason, .. } => {
            CloudError::new(400, CODE_INVALID_REQUEST_CONTENT, "", reason.clone())
        }
        BackendError::Api { status: 404, reason, .. } => match resource_id {
            Some(id) => CloudError::resource_not_found(id),
            None => CloudError::new(404, CODE_NOT_FOUND, "", reason.clone()),
        },
        BackendError::Api { status: 409, reason, .. } => {
            let target = resource_id.map(ToString::to_string).unwrap_or_default();
            CloudError::new(409, CODE_CONFLICT, target, reason.clone())
        }
        BackendError::Api { status: 503, reason, .. } => {
            CloudError::new(503, CODE_SERVICE_UNAVAILABLE, "", reason.clone())
        }
        _ => CloudError::internal_server_error(),
    };
    warn!(
        error = %err,
        status = mapped.status_code,
        code = %mapped.code(),
        "Backend error mapped to cloud error"
    );
    mapped
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
