//! Decoding of create and update request bodies into the canonical model
//!
//! The pipeline is: apply the body (PUT replaces, PATCH merges into the
//! current resource), fill defaults, copy read-only values the client left
//! out, validate field visibility, normalize into the canonical model, then
//! validate the normalized content.

use axum::http::Method;
use serde_json::{Map, Value};
use tracing::debug;

use super::cloud_error::CloudError;
use super::field::FieldErrors;
use super::resource_id::ResourceId;
use super::visibility::{copy_read_only_values, validate_visibility};
use crate::versions::VersionedResource;

/// Canonical resources that can be the target of a create or update request
pub trait CanonicalResource: Clone {
    /// A new resource carrying every non-zero default
    fn new_default(resource_id: Option<&ResourceId>) -> Self;

    /// Copy the state a client can never set from the current resource
    fn carry_service_state(&mut self, current: &Self);

    /// Check field content; `current` is the stored resource on update
    fn validate_content(&self, current: Option<&Self>) -> FieldErrors;
}

/// Combine a request body with the current external representation.
///
/// PUT bodies are taken as-is. PATCH bodies are applied as a JSON
/// merge-patch, except for `tags`, which the request replaces wholesale.
pub fn apply_request_body(method: &Method, body: &[u8], current: &Value) -> Result<Value, CloudError> {
    let request: Value =
        serde_json::from_slice(body).map_err(|e| CloudError::invalid_request_content("", e))?;

    if method != Method::PATCH {
        return Ok(request);
    }

    let mut merged = current.clone();
    json_patch::merge(&mut merged, &request);
    if let (Some(tags), Value::Object(members)) = (request.get("tags"), &mut merged) {
        match tags {
            Value::Object(entries) => {
                let replaced: Map<String, Value> = entries
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                members.insert("tags".to_string(), Value::Object(replaced));
            }
            _ => {
                members.remove("tags");
            }
        }
    }
    Ok(merged)
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, CloudError> {
    serde_json::to_value(value).map_err(|_| CloudError::internal_server_error())
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, CloudError> {
    serde_json::from_value(value).map_err(|e| CloudError::invalid_request_content("", e))
}

/// Decode a create (`current` is `None`) or update request.
pub fn decode_request<V: VersionedResource>(
    method: &Method,
    resource_id: &ResourceId,
    body: &[u8],
    current: Option<&V::Internal>,
) -> Result<V::Internal, CloudError> {
    let updating = current.is_some();
    let current_external = match current {
        Some(resource) => V::project(resource),
        None => {
            let mut empty = V::default();
            empty.set_default_values();
            empty
        }
    };
    let current_json = to_value(&current_external)?;

    let applied = apply_request_body(method, body, &current_json)?;
    let mut external: V = from_value(applied)?;
    external.set_default_values();

    let mut request_json = to_value(&external)?;
    copy_read_only_values(&current_json, &mut request_json, V::visibility_map());

    let errors = validate_visibility(&request_json, &current_json, V::visibility_map(), updating);
    if let Some(err) = CloudError::content_validation(errors) {
        debug!(resource_id = %resource_id, code = %err.code(), "request rejected by visibility rules");
        return Err(err);
    }

    let external: V = from_value(request_json)?;
    let mut out = match current {
        Some(resource) if method == Method::PATCH => resource.clone(),
        Some(resource) => {
            let mut fresh = V::Internal::new_default(Some(resource_id));
            fresh.carry_service_state(resource);
            fresh
        }
        None => V::Internal::new_default(Some(resource_id)),
    };
    external.normalize(&mut out).map_err(|errs| {
        errs.into_cloud_error()
            .unwrap_or_else(CloudError::internal_server_error)
    })?;

    if let Some(err) = out.validate_content(current).into_cloud_error() {
        debug!(
            resource_id = %resource_id,
            code = %err.code(),
            "request rejected by content validation"
        );
        return Err(err);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
