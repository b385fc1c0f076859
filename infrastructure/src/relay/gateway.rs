//! HTTP relay gateway implementation

use async_trait::async_trait;
use layers_application::ports::model_gateway::{GatewayError, ModelGateway};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path of the prompt endpoint on the relay
pub const RELAY_PATH: &str = "/api/gemini";

#[derive(Serialize)]
struct RelayRequest<'a> {
    prompt: &'a str,
}

/// Model gateway that posts prompts to the layers relay
///
/// The relay holds the model credential; this client only knows its URL.
pub struct HttpRelayGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpRelayGateway {
    /// Create a gateway for the relay at `endpoint` (base URL).
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let url = format!("{}{}", endpoint.trim().trim_end_matches('/'), RELAY_PATH);
        info!("HttpRelayGateway initialized for {}", url);

        Ok(Self { client, url })
    }

    /// Full URL prompts are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// `text` of a relay success body; anything else is treated as empty
fn response_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => {
                warn!("Relay response has no text field");
                String::new()
            }
        },
        Err(e) => {
            warn!("Relay response is not JSON: {}", e);
            String::new()
        }
    }
}

#[async_trait]
impl ModelGateway for HttpRelayGateway {
    async fn call(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .json(&RelayRequest { prompt })
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Relay returned {}: {}", status, body);
            return Err(GatewayError::status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        debug!("Relay responded with {} bytes", body.len());

        Ok(response_text(&body))
    }
}
