//! AI Brain - market analysis and operator advice
//!
//! The dashboard talks to a text-generation model through [`TextGenerator`].
//! [`Advisor`] builds the localized prompts and turns every outcome,
//! including failures, into text the operator can read. [`ChatSession`]
//! keeps the advice transcript.

pub mod advisor;
pub mod chat;
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;

pub use advisor::{Advisor, Completion};
pub use chat::{ChatExchange, ChatSession, LatchGuard, LoadingLatch};
pub use gemini::GeminiClient;

/// One generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API key is not configured")]
    NotConfigured,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("[{status}] {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text")]
    EmptyResponse,
}

/// Text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Whether a credential is available. Unconfigured generators are
    /// never called.
    fn is_configured(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;
}
