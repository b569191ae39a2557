//! Error taxonomy for the text-processing pipeline.
//!
//! The core returns these by kind; only this module knows which HTTP
//! status each kind maps to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request text was empty after trimming. No provider call is made.
    #[error("Text cannot be empty")]
    InvalidInput,

    /// The completion provider call failed (network, auth, rate limit,
    /// or a non-2xx response). Not retried.
    #[error("AI provider request failed: {0}")]
    Upstream(String),

    /// The provider returned content that is not valid JSON.
    #[error("Failed to parse AI response: {0}")]
    MalformedResponse(String),

    /// The parsed JSON is missing a required field or has a wrong type.
    #[error("Error processing text: {0}")]
    SchemaValidation(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_)
            | ApiError::MalformedResponse(_)
            | ApiError::SchemaValidation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            eprintln!("🔥 [API] {}", self);
        }
        let body = Json(ErrorBody {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_maps_to_400() {
        let response = ApiError::InvalidInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pipeline_failures_map_to_500() {
        for err in [
            ApiError::Upstream("connection refused".into()),
            ApiError::MalformedResponse("expected value at line 1".into()),
            ApiError::SchemaValidation("missing field `keywords`".into()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
