//! Market analysis and operator advice

use std::sync::Arc;
use tracing::{error, info, warn};

use super::prompts;
use super::{GenerationRequest, TextGenerator};
use crate::i18n::Language;

/// Outcome of an AI request. Every variant carries operator-facing text;
/// failures are reported, never raised.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Generated(String),
    NotConfigured(String),
    Failed(String),
}

impl Completion {
    pub fn text(&self) -> &str {
        match self {
            Completion::Generated(t) | Completion::NotConfigured(t) | Completion::Failed(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::Generated(t) | Completion::NotConfigured(t) | Completion::Failed(t) => t,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Completion::Generated(_))
    }
}

#[derive(Clone)]
pub struct Advisor {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl Advisor {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Market commentary on `topic`, written in `lang`
    pub async fn request_analysis(&self, topic: &str, lang: Language) -> Completion {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompts::market_analysis_prompt(lang, topic),
            system_instruction: None,
        };
        info!(topic = %topic, lang = %lang, "market_analysis_requested");
        self.complete(request, lang).await
    }

    /// Strategic advice answering the operator's `query`
    pub async fn request_advice(&self, query: &str, lang: Language) -> Completion {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: query.to_string(),
            system_instruction: Some(prompts::advisor_system_instruction(lang).to_string()),
        };
        info!(lang = %lang, "advice_requested");
        self.complete(request, lang).await
    }

    async fn complete(&self, request: GenerationRequest, lang: Language) -> Completion {
        if !self.generator.is_configured() {
            warn!("{} API key not configured; skipping call", self.generator.name());
            return Completion::NotConfigured(prompts::not_configured_message(lang).to_string());
        }

        match self.generator.generate(&request).await {
            Ok(text) => Completion::Generated(text),
            Err(e) => {
                error!("Error calling {} API: {}", self.generator.name(), e);
                let detail = e.to_string();
                if detail.trim().is_empty() {
                    Completion::Failed(prompts::unknown_failure_message(lang).to_string())
                } else {
                    Completion::Failed(prompts::call_failed_message(lang, &detail))
                }
            }
        }
    }
}
