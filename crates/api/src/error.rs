//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use inference_engine::ArtifactError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by JSON endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Request-level failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad user input; the client should correct it and resubmit
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Scaler or classifier failed; retrying will not help
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Artifact(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Invalid(ValidationError::Parse { .. }) => "input_parse_error",
            ApiError::Invalid(ValidationError::MissingField(_)) => "missing_field",
            ApiError::Invalid(ValidationError::OutOfRange { .. }) => "out_of_range",
            ApiError::Invalid(ValidationError::NonFiniteFeature(_)) => "non_finite_feature",
            ApiError::Artifact(_) => "artifact_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
