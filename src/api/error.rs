use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::constants::messages;
use crate::services::AnimeError;

#[derive(Debug)]
pub enum ApiError {
    InvalidId,

    ValidationError(Vec<String>),

    BadRequest(String),

    NotFound(String),

    RouteNotFound { method: String, path: String },

    Conflict(String),

    InvalidReference(String),

    InternalError(String),
}

/// Full internal error text, attached to 500 responses so that
/// [`super::observability::expose_error_details`] can surface it outside
/// production.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "Invalid ID parameter"),
            Self::ValidationError(errors) => write!(f, "Validation error: {}", errors.join(", ")),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::RouteNotFound { method, path } => {
                write!(f, "Route {method} {path} not found")
            }
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InvalidReference(msg) => write!(f, "Invalid reference: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidId => (StatusCode::BAD_REQUEST, ErrorBody::new("Invalid ID parameter")),
            Self::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Validation failed").with_details(errors),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            Self::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("Not found").with_message(format!("Route {method} {path} not found")),
            ),
            Self::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorBody::new("Duplicate entry").with_message(messages::DUPLICATE_TITLE),
                )
            }
            Self::InvalidReference(msg) => {
                tracing::warn!("Invalid reference: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new("Invalid reference").with_message(messages::MISSING_REFERENCE),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Internal server error")),
                )
                    .into_response();
                response.extensions_mut().insert(InternalErrorDetail(msg));
                return response;
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnimeError> for ApiError {
    fn from(err: AnimeError) -> Self {
        match err {
            AnimeError::Duplicate(detail) => Self::Conflict(detail),
            AnimeError::InvalidReference(detail) => Self::InvalidReference(detail),
            AnimeError::Database(detail) => Self::InternalError(detail),
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn anime_not_found() -> Self {
        Self::NotFound(messages::ANIME_NOT_FOUND.to_string())
    }

    #[must_use]
    pub fn validation(errors: Vec<String>) -> Self {
        Self::ValidationError(errors)
    }
}
