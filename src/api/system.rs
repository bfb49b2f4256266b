//! Service-level endpoints that sit outside the anime resource.

use axum::{
    Json,
    http::{Method, Uri},
};

use super::{ApiError, HealthResponse};
use crate::constants::messages;

/// Liveness probe.
///
/// # Endpoint
/// `GET /health`
///
/// Does not touch the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: messages::HEALTH_OK,
    })
}

/// Fallback for unknown paths and for known paths hit with an unsupported
/// method.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
