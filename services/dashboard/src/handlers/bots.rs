//! Bot handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

use crate::{
    editor,
    models::*,
    observability::{metrics, Logger},
    AppState,
};

/// GET /bots - All bots in creation order
pub async fn list_bots(State(state): State<Arc<AppState>>) -> Json<ListBotsResponse> {
    let dashboard = state.dashboard.read().await;
    let bots = dashboard.registry.list().to_vec();
    let total = bots.len();

    Json(ListBotsResponse { bots, total })
}

/// GET /bots/{id}
pub async fn get_bot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Bot>, (StatusCode, String)> {
    let dashboard = state.dashboard.read().await;
    let bot = dashboard.registry.get(&BotId::from(id))?;

    Ok(Json(bot.clone()))
}

/// POST /bots - Create a stopped bot with default settings
pub async fn create_bot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
    Json(req): Json<CreateBotRequest>,
) -> Result<Json<Bot>, (StatusCode, String)> {
    if let Err(errors) = req.validate() {
        warn!("Rejected bot creation: {}", errors);
        let lang = state.lang(&query);
        return Err((StatusCode::BAD_REQUEST, state.translator.t(lang, "error_fillFields")));
    }

    let bot = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.registry.add(&req.name, &req.symbol, req.strategy)?.clone()
    };

    state.metrics.increment(metrics::BOT_CREATED, 1).await;
    Logger::bot_event(bot.id.as_str(), "created", bot.strategy().as_str());

    Ok(Json(bot))
}

/// POST /bots/{id}/toggle - Start or stop a bot
pub async fn toggle_bot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Bot>, (StatusCode, String)> {
    let id = BotId::from(id);
    let bot = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.registry.toggle_status(&id)?;
        dashboard.registry.get(&id)?.clone()
    };

    state.metrics.increment(metrics::BOT_TOGGLED, 1).await;
    Logger::bot_event(id.as_str(), "toggled", bot.status.as_str());

    Ok(Json(bot))
}

/// GET /bots/{id}/config
pub async fn get_bot_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BotConfigResponse>, (StatusCode, String)> {
    let dashboard = state.dashboard.read().await;
    let bot = dashboard.registry.get(&BotId::from(id))?;

    Ok(Json(BotConfigResponse {
        bot_id: bot.id.clone(),
        config: bot.config.clone(),
        editable_fields: editor::editable_fields(bot.strategy()).to_vec(),
    }))
}

/// PUT /bots/{id}/config - Replace the whole config
pub async fn save_bot_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(config): Json<StrategyConfig>,
) -> Result<Json<Bot>, (StatusCode, String)> {
    let id = BotId::from(id);
    let bot = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.registry.save_config(&id, config)?.clone()
    };

    state.metrics.increment(metrics::CONFIG_SAVED, 1).await;
    Logger::bot_event(id.as_str(), "config_saved", bot.strategy().as_str());

    Ok(Json(bot))
}

/// PATCH /bots/{id}/config - Set one settings-form field
pub async fn edit_bot_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<EditConfigFieldRequest>,
) -> Result<Json<Bot>, (StatusCode, String)> {
    req.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let id = BotId::from(id);
    let bot = {
        let mut dashboard = state.dashboard.write().await;
        let current = dashboard.registry.get(&id)?.config.clone();
        let edited = editor::apply_field(&current, &req.field, &req.value)?;
        dashboard.registry.save_config(&id, edited)?.clone()
    };

    state.metrics.increment(metrics::CONFIG_SAVED, 1).await;
    Logger::bot_event(id.as_str(), "config_field_edited", &req.field);

    Ok(Json(bot))
}
