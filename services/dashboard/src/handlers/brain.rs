//! AI Brain handlers: market analysis and advice chat

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use std::time::Instant;

use crate::brain::Completion;
use crate::error::DashboardError;
use crate::models::*;
use crate::observability::{metrics, Logger};
use crate::AppState;

async fn record_outcome(state: &AppState, surface: &str, completion: &Completion, started: Instant) {
    state.metrics.increment(metrics::AI_REQUESTS, 1).await;
    let outcome = match completion {
        Completion::Generated(_) => "generated",
        Completion::NotConfigured(_) => "not_configured",
        Completion::Failed(_) => {
            state.metrics.increment(metrics::AI_FAILURES, 1).await;
            "failed"
        }
    };
    Logger::ai_event(surface, outcome, started.elapsed().as_millis());
}

/// POST /ai/analysis - Market commentary for a topic
pub async fn request_analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, (StatusCode, String)> {
    let lang = state.lang(&query);
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err((StatusCode::BAD_REQUEST, state.translator.t(lang, "error_enterTopic")));
    }

    let Some(_guard) = state.analysis_latch.try_acquire() else {
        state.metrics.increment(metrics::AI_REJECTED_BUSY, 1).await;
        return Err(DashboardError::Busy.localized(&state.translator, lang));
    };

    let started = Instant::now();
    let completion = state.advisor.request_analysis(topic, lang).await;
    record_outcome(&state, "analysis", &completion, started).await;

    Ok(Json(AnalysisResponse {
        topic: topic.to_string(),
        analysis: completion.into_text(),
    }))
}

/// POST /ai/chat - Ask the AI Brain for advice
pub async fn send_chat(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let lang = state.lang(&query);
    let started = Instant::now();

    let exchange = match state.chat.submit(&state.advisor, &req.message, lang).await {
        Ok(exchange) => exchange,
        Err(e) => {
            if matches!(e, DashboardError::Busy) {
                state.metrics.increment(metrics::AI_REJECTED_BUSY, 1).await;
            }
            return Err(e.localized(&state.translator, lang));
        }
    };
    record_outcome(&state, "chat", &exchange.completion, started).await;

    Ok(Json(ChatResponse {
        reply: exchange.reply,
        messages: exchange.messages,
    }))
}

/// GET /ai/chat - Transcript so far
pub async fn get_chat(State(state): State<Arc<AppState>>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        messages: state.chat.messages().await,
        loading: state.chat.is_loading(),
    })
}
