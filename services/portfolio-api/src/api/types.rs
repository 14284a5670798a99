//! HTTP API response types.
//!
//! # Purpose
//! Defines the non-document payload shapes returned by the portfolio REST API
//! and used for OpenAPI schema generation.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform error body: `{ "message": ..., "error"?: ... }`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Confirmation body returned by successful deletes.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Storage health reported by `/api/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub backend: String,
    pub durable: bool,
}
