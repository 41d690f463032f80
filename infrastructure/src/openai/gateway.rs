//! OpenAI-compatible LLM Gateway implementation

use super::session::{ClientSettings, OpenAiSession};
use crate::config::FileJudgmentConfig;
use async_trait::async_trait;
use audit_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Gateway for any server exposing `/chat/completions`
pub struct OpenAiCompatGateway {
    settings: Arc<ClientSettings>,
}

impl OpenAiCompatGateway {
    /// Build a gateway from the `[judgment]` section; the API key is read
    /// from the environment variable it names.
    pub fn from_config(config: &FileJudgmentConfig) -> Result<Self, GatewayError> {
        Self::new(
            &config.endpoint,
            &config.model,
            config.api_key(),
            Duration::from_secs(config.timeout_seconds),
        )
        .map(|gateway| gateway.with_temperature(config.temperature))
    }

    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("consult-audit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let url = completions_url(endpoint);
        info!("Judgment gateway: {} ({})", url, model);

        Ok(Self {
            settings: Arc::new(ClientSettings {
                client,
                url,
                api_key,
                model: model.to_string(),
                temperature: None,
            }),
        })
    }

    fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        if let Some(settings) = Arc::get_mut(&mut self.settings) {
            settings.temperature = temperature;
        }
        self
    }

    pub fn url(&self) -> &str {
        &self.settings.url
    }
}

fn completions_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            Arc::clone(&self.settings),
            system_prompt,
        )))
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}
