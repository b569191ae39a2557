//! HTTP handlers and wire types.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::llm::LlmClient;
use crate::sentiment;

/// Shared application state: the one completion client, created at
/// startup and never mutated.
pub struct AppState {
    pub llm: LlmClient,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TextInput {
    pub text: String,
}

/// Structured analysis returned to the visualization frontend.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct SentimentResponse {
    /// -1.0 (very negative) to 1.0 (very positive).
    pub sentiment: f64,
    /// One of: joyful, calm, loving, melancholic, angry, anxious,
    /// surprised, neutral.
    pub sentiment_label: String,
    /// 3-5 key words or short phrases from the text.
    pub keywords: Vec<String>,
    /// 0.0 (very subdued) to 1.0 (very intense).
    pub emotion_intensity: f64,
    /// 0.0 (very calm) to 1.0 (very energetic).
    pub energy_level: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "sentiment",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Sentiment Analysis API is running".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/process_text",
    tag = "sentiment",
    request_body = TextInput,
    responses(
        (status = 200, description = "Structured sentiment analysis", body = SentimentResponse),
        (status = 400, description = "Text was empty", body = ErrorBody),
        (status = 500, description = "Provider call or response validation failed", body = ErrorBody)
    )
)]
pub async fn process_text(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Result<Json<SentimentResponse>, ApiError> {
    let result = sentiment::analyze(&state.llm, &input.text).await?;
    Ok(Json(result))
}
