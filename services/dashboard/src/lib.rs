pub mod brain;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod health;
pub mod i18n;
pub mod market;
pub mod models;
pub mod observability;
pub mod registry;
pub mod simulation;
pub mod handlers {
    pub mod bots;
    pub mod brain;
    pub mod dashboard;
    pub mod i18n;
    pub mod market;
}

use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use brain::{Advisor, ChatSession, GeminiClient, LoadingLatch};
pub use crate::config::AppConfig;
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use i18n::{Language, Translator};
pub use market::MarketData;
pub use models::*;
pub use observability::{Logger, MetricsCollector};

/// Application state shared across handlers
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub translator: Translator,
    pub advisor: Advisor,
    pub chat: ChatSession,
    /// Guards the market analysis form; the chat has its own
    pub analysis_latch: LoadingLatch,
    pub market: MarketData,
    pub metrics: MetricsCollector,
    pub default_language: Language,
}

impl AppState {
    /// Fresh state: demo bot roster, new price series, empty chat
    pub fn new(advisor: Advisor, translator: Translator, default_language: Language) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(Dashboard::seeded())),
            translator,
            advisor,
            chat: ChatSession::new(),
            analysis_latch: LoadingLatch::new(),
            market: MarketData::generate(&mut rand::thread_rng(), Utc::now().date_naive()),
            metrics: MetricsCollector::new(),
            default_language,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, brain::AiError> {
        let client = GeminiClient::new(&config.gemini)?;
        let advisor = Advisor::new(Arc::new(client), config.gemini.model.clone());
        let translator = Translator::from_dir_or_embedded(config.locales_dir.as_deref());
        Ok(Self::new(advisor, translator, config.default_language))
    }

    /// Language from `?lang=`, or the configured default
    pub fn lang(&self, query: &LangQuery) -> Language {
        query.lang.unwrap_or(self.default_language)
    }
}

/// Build the API router
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/bots", get(handlers::bots::list_bots).post(handlers::bots::create_bot))
        .route("/bots/{id}", get(handlers::bots::get_bot))
        .route("/bots/{id}/toggle", post(handlers::bots::toggle_bot))
        .route(
            "/bots/{id}/config",
            get(handlers::bots::get_bot_config)
                .put(handlers::bots::save_bot_config)
                .patch(handlers::bots::edit_bot_config),
        )
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/allocation", get(handlers::dashboard::get_allocation))
        .route("/system/components", get(health::list_components))
        .route("/market/pairs", get(handlers::market::list_pairs))
        .route("/market/prices/{base}/{quote}", get(handlers::market::get_prices))
        .route("/ai/analysis", post(handlers::brain::request_analysis))
        .route("/ai/chat", get(handlers::brain::get_chat).post(handlers::brain::send_chat))
        .route("/i18n/{lang}", get(handlers::i18n::get_table))
        .route("/i18n/{lang}/{key}", get(handlers::i18n::translate));

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/health", get(health::health_detail))
        .nest("/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
