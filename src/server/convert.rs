//! Batch conversion between API versions
//!
//! ## Endpoints
//! - POST /convert - re-express external resources of one kind in another
//!   API version
//!
//! Every object is read in the source version into the canonical model and
//! projected in the desired version, so fields the desired version does not
//! know are dropped and fields it adds come back with their defaults.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::health::ServerState;
use crate::versions::{ApiVersion, ResourceKind};

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_FAILED: &str = "Failed";

#[derive(Debug, Deserialize)]
pub struct ConversionReview {
    pub request: ConversionRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub uid: String,
    pub kind: ResourceKind,
    pub source_api_version: String,
    pub desired_api_version: String,
    pub objects: Vec<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ConversionResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub uid: String,
    pub result: ConversionResult,
    pub converted_objects: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ConversionReviewResponse {
    pub response: ConversionResponse,
}

fn failed(uid: String, message: String) -> ConversionResponse {
    ConversionResponse {
        uid,
        result: ConversionResult {
            status: STATUS_FAILED.to_string(),
            message: Some(message),
        },
        converted_objects: vec![],
    }
}

/// Convert every object of a request; the first failure fails the batch
pub fn convert_resources(request: ConversionRequest) -> ConversionResponse {
    let source: ApiVersion = match request.source_api_version.parse() {
        Ok(v) => v,
        Err(e) => return failed(request.uid, format!("source: {}", e)),
    };
    let target: ApiVersion = match request.desired_api_version.parse() {
        Ok(v) => v,
        Err(e) => return failed(request.uid, format!("desired: {}", e)),
    };

    let mut converted_objects = Vec::with_capacity(request.objects.len());
    for (index, object) in request.objects.into_iter().enumerate() {
        match source.convert(request.kind, target, object) {
            Ok(converted) => converted_objects.push(converted),
            Err(e) => return failed(request.uid, format!("objects[{}]: {}", index, e)),
        }
    }

    ConversionResponse {
        uid: request.uid,
        result: ConversionResult {
            status: STATUS_SUCCESS.to_string(),
            message: None,
        },
        converted_objects,
    }
}

pub fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Cluster => "cluster",
        ResourceKind::NodePool => "nodePool",
        ResourceKind::ExternalAuth => "externalAuth",
    }
}

/// Metric label for a requested version; unknown versions share one label
fn version_label(version: &str) -> &'static str {
    version
        .parse::<ApiVersion>()
        .map(|v| v.as_str())
        .unwrap_or("unsupported")
}

/// Axum handler for the /convert endpoint
pub async fn handle_convert(
    State(state): State<ServerState>,
    Json(review): Json<ConversionReview>,
) -> impl IntoResponse {
    let request = review.request;
    info!(
        uid = %request.uid,
        kind = kind_label(request.kind),
        source_version = %request.source_api_version,
        desired_version = %request.desired_api_version,
        object_count = request.objects.len(),
        "Processing conversion request"
    );

    let kind = kind_label(request.kind);
    let source = version_label(&request.source_api_version);
    let target = version_label(&request.desired_api_version);
    let response = convert_resources(request);
    let success = response.result.status == STATUS_SUCCESS;

    if success {
        info!(
            uid = %response.uid,
            converted_count = response.converted_objects.len(),
            "Conversion successful"
        );
        for _ in &response.converted_objects {
            state.metrics.record_conversion(kind, source, target, true);
        }
    } else {
        warn!(
            uid = %response.uid,
            error = ?response.result.message,
            "Conversion failed"
        );
        state.metrics.record_conversion(kind, source, target, false);
    }

    (StatusCode::OK, Json(ConversionReviewResponse { response }))
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
