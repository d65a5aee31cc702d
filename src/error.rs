//! Error types for LifeGuard Signals

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during signal generation and scoring
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Insufficient readings for computation: {0}")]
    InsufficientReadings(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors returned by a reply provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider API error: {0}")]
    ApiError(String),
}

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Computation failed: {0}")]
    Compute(#[from] ComputeError),

    #[error("Reply provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Compute(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Signal computation failed".to_string(),
                Some(err.to_string()),
            ),
            ApiError::Provider(err) => (
                StatusCode::BAD_GATEWAY,
                "Reply provider failed".to_string(),
                Some(err.to_string()),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg),
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %error, details = ?details, "Request failed");
        }

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
