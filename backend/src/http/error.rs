//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::OccupancyError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Sales data could not be loaded; no partial result is served
    DataLoad(OccupancyError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::DataLoad(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("DATA_LOAD_ERROR", "Failed to load sales data")
                    .with_details(err.to_string()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<OccupancyError> for AppError {
    fn from(err: OccupancyError) -> Self {
        match err {
            OccupancyError::InvalidParameters(msg) => AppError::BadRequest(msg),
            err @ (OccupancyError::Io { .. }
            | OccupancyError::MissingColumn { .. }
            | OccupancyError::Parse { .. }) => AppError::DataLoad(err),
            other => AppError::Internal(other.to_string()),
        }
    }
}
