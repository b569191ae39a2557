mod api;
mod error;
mod llm;
mod sentiment;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(api::root, api::process_text),
    components(
        schemas(
            api::TextInput,
            api::SentimentResponse,
            api::HealthResponse,
            api::ErrorBody
        )
    ),
    tags(
        (name = "sentiment", description = "Sentiment Analysis API")
    )
)]
struct ApiDoc;

/// Comma-separated origin list, e.g. "http://localhost:3000,https://viz.example.com".
fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn cors_layer() -> CorsLayer {
    let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let origins: Vec<HeaderValue> = parse_allowed_origins(&raw)
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    println!("🌐 CORS allows {} origin(s): {}", origins.len(), raw);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let api_key = env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY must be set (add it to the backend .env file)");

    let state = Arc::new(api::AppState {
        llm: llm::LlmClient::new(api_key),
    });

    let app = Router::new()
        .merge(SwaggerUi::new("/sentiment-api-swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::root))
        .route("/process_text", post(api::process_text))
        .layer(cors_layer())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    println!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        assert_eq!(
            parse_allowed_origins("http://localhost:3000"),
            vec!["http://localhost:3000"]
        );
        assert_eq!(
            parse_allowed_origins(" http://a.com , https://b.com ,"),
            vec!["http://a.com", "https://b.com"]
        );
        assert!(parse_allowed_origins("").is_empty());
    }
}
