//! Error types for the compliance API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compliance_engine::{ServiceError, WorkflowError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::AuthorizationDenied(msg) => {
                (StatusCode::FORBIDDEN, "AUTHORIZATION_DENIED", msg.clone())
            }
            ApiError::ValidationFailed(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", msg.clone())
            }
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            ApiError::DocumentNotFound(id) => (
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                format!("Document '{}' not found", id),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Workflow(WorkflowError::AuthorizationDenied(msg)) => {
                ApiError::AuthorizationDenied(msg)
            }
            ServiceError::Workflow(WorkflowError::ValidationFailed(msg)) => {
                ApiError::ValidationFailed(msg)
            }
            ServiceError::Unauthenticated(msg) => ApiError::Unauthenticated(msg),
            ServiceError::NotFound(id) => ApiError::DocumentNotFound(id),
            ServiceError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailed(rejection.body_text())
    }
}
