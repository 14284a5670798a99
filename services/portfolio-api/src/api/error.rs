//! API error types and helpers.
//!
//! # Purpose and responsibility
//! Centralizes HTTP error response construction so every endpoint answers
//! with the same `{ message, error? }` body.
//!
//! # Key invariants and assumptions
//! - Not-found errors carry a fixed message and no detail.
//! - Validation (400) and internal (500) errors carry the underlying error
//!   text in `error` so clients can see what was rejected.
//! - Status codes must align with the error category.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::fmt::Display;

/// Structured API error returned by handlers.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use portfolio_api::api::error::ApiError;
/// use portfolio_api::api::types::ErrorResponse;
///
/// let err = ApiError {
///     status: StatusCode::NOT_FOUND,
///     body: ErrorResponse {
///         message: "Image not found".to_string(),
///         error: None,
///     },
/// };
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Build a 404 Not Found error with a fixed message.
pub fn api_not_found(message: &str) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        body: ErrorResponse {
            message: message.to_string(),
            error: None,
        },
    }
}

/// Build a 400 Bad Request error for a rejected write.
///
/// # What it does
/// Pairs the caller's message (e.g. `Error creating image`) with the text of
/// whatever rejected the write: a validation failure, an unreadable body or a
/// store error.
pub fn api_validation_error(message: &str, err: &dyn Display) -> ApiError {
    tracing::debug!(error = %err, "{message}");
    ApiError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse {
            message: message.to_string(),
            error: Some(err.to_string()),
        },
    }
}

/// Map an unreadable JSON body to an API error.
///
/// Oversized bodies keep their 413 status; every other rejection (bad syntax,
/// wrong content type, uncoercible field) is a 400 with `message`.
pub fn api_body_rejection(message: &str, rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            body: ErrorResponse {
                message: message.to_string(),
                error: Some(rejection.body_text()),
            },
        };
    }
    api_validation_error(message, &rejection.body_text())
}

/// Build a 400 Bad Request error from a failed store write.
///
/// Writes map every failure other than not-found to 400; store outages are
/// still logged at error level so they are not mistaken for client mistakes.
pub fn api_write_error(message: &str, err: &StoreError) -> ApiError {
    if let StoreError::Unexpected(_) = err {
        tracing::error!(error = ?err, "portfolio storage error");
    }
    api_validation_error(message, err)
}

/// Build a 500 Internal Server Error from a store error.
///
/// # What it does
/// Logs the store error and returns the generic message plus its text.
pub fn api_internal(message: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "portfolio storage error");
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorResponse {
            message: message.to_string(),
            error: Some(err.to_string()),
        },
    }
}
