//! Advice chat transcript and the in-flight request latch

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use super::advisor::{Advisor, Completion};
use crate::error::{DashboardError, Result};
use crate::i18n::Language;
use crate::models::ChatMessage;

/// At most one request in flight per surface
#[derive(Debug, Default)]
pub struct LoadingLatch {
    busy: AtomicBool,
}

impl LoadingLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latch, or `None` while another request holds it
    pub fn try_acquire(&self) -> Option<LatchGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LatchGuard { latch: self })
    }

    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the latch on drop
#[derive(Debug)]
pub struct LatchGuard<'a> {
    latch: &'a LoadingLatch,
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.busy.store(false, Ordering::Release);
    }
}

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub reply: ChatMessage,
    pub messages: Vec<ChatMessage>,
    pub completion: Completion,
}

/// Append-only advice conversation
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: RwLock<Vec<ChatMessage>>,
    latch: LoadingLatch,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.latch.is_loading()
    }

    /// Ask the advisor, then append the operator's message and its reply together.
    /// Blank input, submissions while a reply is pending, and a submission
    /// dropped before the reply arrives all leave the transcript untouched.
    pub async fn submit(&self, advisor: &Advisor, input: &str, lang: Language) -> Result<ChatExchange> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DashboardError::Validation("message must not be blank".to_string()));
        }
        let _guard = self.latch.try_acquire().ok_or(DashboardError::Busy)?;

        let completion = advisor.request_advice(input, lang).await;
        let reply = ChatMessage::ai(completion.text());

        let messages = {
            let mut messages = self.messages.write().await;
            messages.push(ChatMessage::user(input));
            messages.push(reply.clone());
            messages.clone()
        };
        debug!("Chat transcript now {} messages", messages.len());

        Ok(ChatExchange {
            reply,
            messages,
            completion,
        })
    }
}
