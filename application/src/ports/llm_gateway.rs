//! LLM Gateway port
//!
//! Defines the interface to the external judgment capability. The same
//! capability serves criterion judgments and person-name detection.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Errors worth retrying once more
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_) | GatewayError::Timeout | GatewayError::RequestFailed(_)
        )
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer; tests use
/// scripted in-memory gateways.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session carrying a system prompt
    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Identifier of the model behind this gateway
    fn model_name(&self) -> &str;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &str;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
