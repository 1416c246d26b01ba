//! Response types for the contractor billing API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::InvalidInput { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("The value of '{}' is not accepted", field),
                ),
            ),
            EngineError::UnknownContractType { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_CONTRACT_TYPE",
                    message,
                    "Supported tags are 1 (employment), 2 (mandate) and 3 (B2B)",
                ),
            ),
            EngineError::InvalidPeriod { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::ContractorNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("CONTRACTOR_NOT_FOUND", message),
            ),
            EngineError::BillingNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("BILLING_NOT_FOUND", message),
            ),
            EngineError::PeriodNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("PERIOD_NOT_FOUND", message))
            }
            EngineError::ContractorConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("CONTRACTOR_CONFLICT", message),
            ),
            EngineError::BillingConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("BILLING_CONFLICT", message),
            ),
            EngineError::ValueUnchanged { .. } => {
                (StatusCode::CONFLICT, ApiError::new("VALUE_UNCHANGED", message))
            }
            EngineError::StoreUnavailable { message: cause } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Record store unavailable", cause),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
