//! OpenAI chat-completions client.
//!
//! This is the only place the crate talks to the outside world. The rest
//! of the pipeline sees `complete(system, user) -> raw text` and nothing
//! about transport, auth, or the provider's wire format.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ApiError;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4-turbo-preview";
/// Low temperature keeps the structured output consistent across calls.
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Completion client. Built once at startup, immutable afterwards, shared
/// by all in-flight requests.
pub struct LlmClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }

    /// Send one system + user message pair and return the content of the
    /// first completion choice. Single attempt, no retry; the provider is
    /// asked for JSON-formatted output.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ApiError> {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .http_client
            .post(OPENAI_CHAT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            eprintln!("⚠️ [LLM] Provider returned {}: {}", status, detail);
            return Err(ApiError::Upstream(format!("provider returned {}", status)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("unreadable provider payload: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ApiError::Upstream("provider returned no completion choices".to_string()))
    }
}
