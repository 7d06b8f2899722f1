//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

use app_services::ServiceError;
use domain_billing::BillingError;
use domain_leasing::LeaseError;
use domain_property::PropertyError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::NotFound { .. } => ApiError::NotFound(message),
            ServiceError::Unauthenticated => ApiError::Unauthorized(message),
            ServiceError::Forbidden { .. } => ApiError::Forbidden(message),
            ServiceError::Validation(_) => ApiError::Validation(message),
            ServiceError::Billing(e) => match e {
                BillingError::AlreadyPaid(_)
                | BillingError::BillClosed(_)
                | BillingError::Superseded { .. } => ApiError::Conflict(message),
                _ => ApiError::Validation(message),
            },
            ServiceError::Lease(e) => match e {
                LeaseError::Validation(_) => ApiError::Validation(message),
                _ => ApiError::Conflict(message),
            },
            ServiceError::Property(e) => match e {
                PropertyError::MeterRegression { .. } | PropertyError::InvalidField { .. } => {
                    ApiError::Validation(message)
                }
                _ => ApiError::Conflict(message),
            },
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
