//! Error handling for the dashboard HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Common error: {0}")]
    Common(#[from] common::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let (status, code, details) = match &self {
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict", None),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                common::error::Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error", None),

                // Upstream exchange errors
                common::error::Error::Network(_) => (StatusCode::BAD_GATEWAY, "network_error", None),
                common::error::Error::Parse(_) => (StatusCode::BAD_GATEWAY, "parse_error", None),
                common::error::Error::Api { code, .. } => (
                    StatusCode::BAD_GATEWAY,
                    "exchange_error",
                    Some(serde_json::json!({ "exchange_code": code })),
                ),

                // Server errors (5xx)
                common::error::Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error", None),
                common::error::Error::Csv(_) => (StatusCode::INTERNAL_SERVER_ERROR, "csv_error", None),
                common::error::Error::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error", None)
                }
                common::error::Error::ConfigurationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", None)
                }
                common::error::Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
            },
        };

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}
