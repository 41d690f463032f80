//! Chat-completions session

use super::protocol::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope};
use async_trait::async_trait;
use audit_application::ports::llm_gateway::{GatewayError, LlmSession};
use std::sync::Arc;
use tracing::debug;

/// Shared HTTP settings for every session of one gateway
pub(crate) struct ClientSettings {
    pub client: reqwest::Client,
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
}

/// A single system prompt plus stateless request/response exchanges
pub struct OpenAiSession {
    settings: Arc<ClientSettings>,
    system_prompt: String,
}

impl OpenAiSession {
    pub(crate) fn new(settings: Arc<ClientSettings>, system_prompt: impl Into<String>) -> Self {
        Self {
            settings,
            system_prompt: system_prompt.into(),
        }
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Message for a non-success status, preferring the server's own error text
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), detail))
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(content),
            ],
            temperature: self.settings.temperature,
        };

        let mut builder = self.settings.client.post(&self.settings.url).json(&request);
        if let Some(key) = &self.settings.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status();
        debug!("chat/completions responded {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        body.first_content()
            .ok_or_else(|| GatewayError::MalformedResponse("response had no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_server_message() {
        let err = status_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error": {"message": "bad key"}}"#,
        );
        assert_eq!(err, GatewayError::RequestFailed("HTTP 401: bad key".to_string()));
    }

    #[test]
    fn test_status_error_falls_back_to_body() {
        let err = status_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err,
            GatewayError::RequestFailed("HTTP 502: upstream down".to_string())
        );
    }
}
