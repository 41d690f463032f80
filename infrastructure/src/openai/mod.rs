//! OpenAI-compatible chat-completions adapter for the judgment capability.

mod gateway;
mod protocol;
mod session;

pub use gateway::OpenAiCompatGateway;
pub use session::OpenAiSession;
