//! Sentiment analysis pipeline: input validation, prompt construction,
//! response parsing, and label normalization.
//!
//! The normalization step is the part that matters. The frontend maps
//! `sentiment_label` straight to visualization presets, so an unknown
//! label must never escape this module: a missing or out-of-vocabulary
//! label is rebuilt from the numeric sentiment/energy signals with a
//! fixed rule table.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;

use crate::api::SentimentResponse;
use crate::error::ApiError;
use crate::llm::LlmClient;

/// Labels the frontend understands.
static VALID_LABELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "joyful",
        "calm",
        "loving",
        "melancholic",
        "angry",
        "anxious",
        "surprised",
        "neutral",
    ]
    .into_iter()
    .collect()
});

const SYSTEM_PROMPT: &str = r#"You are an expert sentiment analyzer. Analyze the given text and return a JSON object with:
- sentiment: a float from -1.0 (very negative) to 1.0 (very positive)
- sentiment_label: MUST be exactly one of these words (no variations):
  * "joyful" - for happiness, excitement, delight
  * "calm" - for peace, serenity, relaxation
  * "loving" - for affection, warmth, care
  * "melancholic" - for sadness, depression, sorrow (LOW energy)
  * "angry" - for rage, frustration, irritation (HIGH energy)
  * "anxious" - for nervousness, worry, tension
  * "surprised" - for shock, amazement
  * "neutral" - for no strong emotion
  IMPORTANT: Use exactly these words, no synonyms or variations
- keywords: an array of 3-5 key words or short phrases from the text
- emotion_intensity: a float from 0.0 (very subdued) to 1.0 (very intense)
- energy_level: a float from 0.0 (very calm/low energy) to 1.0 (very energetic/high energy)

Be nuanced in your analysis. Return ONLY the JSON object, no other text."#;

fn user_prompt(text: &str) -> String {
    format!("Analyze this text:\n\n{}", text)
}

/// Map numeric signals to a label. First matching tier wins; tier
/// thresholds are inclusive on the lower bound, the energy splits are
/// strict.
fn fallback_label(sentiment: f64, energy: f64) -> &'static str {
    if sentiment >= 0.4 {
        if energy > 0.6 {
            "joyful"
        } else {
            "calm"
        }
    } else if sentiment >= 0.1 {
        "calm"
    } else if sentiment >= -0.1 {
        "neutral"
    } else if sentiment >= -0.3 {
        "melancholic"
    } else {
        // Very negative: high energy reads as anger, low energy as sadness.
        if energy > 0.7 {
            "angry"
        } else {
            "melancholic"
        }
    }
}

/// Parse the raw completion text as JSON. Single attempt, fail fast.
fn parse_model_output(raw_text: &str) -> Result<Value, ApiError> {
    serde_json::from_str(raw_text).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Validate and normalize one parsed model result.
///
/// A label already in the vocabulary is kept (lower-cased, trimmed).
/// A missing or unknown label is replaced via [`fallback_label`], reading
/// `sentiment` (default 0.0) and `energy_level` (default 0.5) from the
/// raw result. Every other field passes through untouched and is then
/// shape-checked against [`SentimentResponse`]. Numeric values are not
/// clamped to their documented ranges.
pub fn normalize(mut raw: Value) -> Result<SentimentResponse, ApiError> {
    let label = raw
        .get("sentiment_label")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let final_label = if !label.is_empty() && VALID_LABELS.contains(label.as_str()) {
        label
    } else {
        let sentiment = raw.get("sentiment").and_then(Value::as_f64).unwrap_or(0.0);
        let energy = raw
            .get("energy_level")
            .and_then(Value::as_f64)
            .unwrap_or(0.5);
        fallback_label(sentiment, energy).to_string()
    };

    let obj = raw
        .as_object_mut()
        .ok_or_else(|| ApiError::SchemaValidation("expected a JSON object".to_string()))?;
    obj.insert("sentiment_label".to_string(), Value::String(final_label));

    serde_json::from_value(raw).map_err(|e| ApiError::SchemaValidation(e.to_string()))
}

/// Full pipeline for one request: validate the input, query the model,
/// parse and normalize the result.
pub async fn analyze(llm: &LlmClient, text: &str) -> Result<SentimentResponse, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::InvalidInput);
    }

    println!("🧠 [Analyze] Processing {} chars", text.len());

    let raw_text = llm.complete(SYSTEM_PROMPT, &user_prompt(text)).await?;
    let raw = parse_model_output(&raw_text)?;
    normalize(raw)
}
