use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::{auth::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, detail: Option<String>) -> Self {
        Self { status, error: error.to_string(), detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => Self::bad_request(e.to_string()),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Storage(_) | ServiceError::Corrupt { .. } => {
                error!(err = %e, "content storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(e.to_string()))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenError(_) => {
                error!(err = %e, code = e.code(), "token handling failed");
                Self::unauthorized(e.to_string())
            }
            _ => Self::unauthorized(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
