//! Relay service for layers
//!
//! Accepts `{ "prompt": ... }` from journal clients and forwards it to the
//! upstream model API with the server-held key. Responses are reduced to
//! `{ "text": ... }`; failures become `{ "error": ... }` with a status.

pub mod config;

pub use config::RelayConfig;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Path prompts are posted to
pub const RELAY_PATH: &str = "/api/gemini";

/// Maximum accepted request body
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Errors returned to relay clients as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Server missing GEMINI_API_KEY")]
    MissingApiKey,

    /// Upstream answered with a non-2xx status; its body is passed through
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("Gemini request failed")]
    RequestFailed,
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::MissingApiKey | RelayError::RequestFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub text: String,
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayConfig>,
    client: reqwest::Client,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

pub fn build_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(liveness))
        .route(RELAY_PATH, get(liveness).post(generate))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Layers relay is running"
}

async fn generate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<RelayResponse>, RelayError> {
    let Some(api_key) = state.config.api_key() else {
        warn!("Rejecting prompt: GEMINI_API_KEY is not set");
        return Err(RelayError::MissingApiKey);
    };

    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or(RelayError::MissingPrompt)?;

    let response = state
        .client
        .post(state.config.upstream_url())
        .header("x-goog-api-key", api_key)
        .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
        .send()
        .await
        .map_err(|e| {
            warn!("Upstream request failed: {}", e);
            RelayError::RequestFailed
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Upstream returned {}", status);
        return Err(RelayError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let data: Value = response.json().await.map_err(|e| {
        warn!("Upstream response unreadable: {}", e);
        RelayError::RequestFailed
    })?;

    let text = candidate_text(&data);
    info!(
        "Relayed prompt ({} chars) -> {} chars",
        prompt.len(),
        text.len()
    );
    Ok(Json(RelayResponse { text }))
}

/// Text parts of the first candidate, joined; empty when absent
fn candidate_text(data: &Value) -> String {
    data.pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::extract::Path;
    use axum::http::{HeaderMap, Request};
    use axum::routing::post;
    use tower::ServiceExt;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn app(api_key: Option<&str>, upstream_base: &str) -> Router {
        let config = RelayConfig {
            gemini_api_key: api_key.map(String::from),
            upstream_base: upstream_base.to_string(),
            ..Default::default()
        };
        build_app(AppState::new(config).unwrap())
    }

    fn prompt_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(RELAY_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        for uri in ["/", RELAY_PATH] {
            let response = app(None, "http://unused")
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_missing_key() {
        let response = app(None, "http://unused")
            .oneshot(prompt_request(r#"{"prompt": "hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Server missing GEMINI_API_KEY" })
        );
    }

    #[tokio::test]
    async fn test_missing_prompt() {
        for body in [r#"{}"#, r#"{"prompt": 7}"#, r#"{"prompt": ""}"#] {
            let response = app(Some("key"), "http://unused")
                .oneshot(prompt_request(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await, json!({ "error": "Missing prompt" }));
        }
    }

    #[tokio::test]
    async fn test_non_json_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri(RELAY_PATH)
            .header("content-type", "text/plain")
            .body(Body::from("hello"))
            .unwrap();
        let response = app(Some("key"), "http://unused").oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_forwards_prompt_and_joins_parts() {
        let upstream = Router::new().route(
            "/models/*call",
            post(|Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(call, "gemini-2.0-flash:generateContent");
                assert_eq!(headers["x-goog-api-key"], "key");
                assert_eq!(body["contents"][0]["parts"][0]["text"], "What now?");
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Why " }, { "text": "now?" }] }
                    }]
                }))
            }),
        );
        let base = serve(upstream).await;

        let response = app(Some("key"), &base)
            .oneshot(prompt_request(r#"{"prompt": "What now?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "text": "Why now?" }));
    }

    #[tokio::test]
    async fn test_upstream_error_passes_through() {
        let upstream = Router::new().route(
            "/models/*call",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base = serve(upstream).await;

        let response = app(Some("key"), &base)
            .oneshot(prompt_request(r#"{"prompt": "hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json_body(response).await, json!({ "error": "quota exceeded" }));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let response = app(Some("key"), &format!("http://{}", addr))
            .oneshot(prompt_request(r#"{"prompt": "hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Gemini request failed" })
        );
    }

    #[test]
    fn test_candidate_text() {
        assert_eq!(candidate_text(&json!({})), "");
        assert_eq!(candidate_text(&json!({ "candidates": [] })), "");
        assert_eq!(
            candidate_text(&json!({ "candidates": [{ "content": { "parts": [{ "text": "a" }, {}] } }] })),
            "a"
        );
    }
}
