//! Health endpoints and the platform component status board

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::i18n::{Language, Translator};
use crate::models::{LangQuery, SystemComponent, SystemStatus};
use crate::AppState;

/// Component id, display name, status, description key
const COMPONENTS: [(&str, &str, SystemStatus, &str); 8] = [
    ("1", "Data Layer (Market Ingest)", SystemStatus::Online, "component_data_layer"),
    ("2", "AI Brain (Decision Engine)", SystemStatus::Online, "component_ai_brain"),
    ("3", "Orchestrator", SystemStatus::Online, "component_orchestrator"),
    ("4", "Bot Workers", SystemStatus::Online, "component_bot_workers"),
    ("5", "Execution Layer (Binance)", SystemStatus::Degraded, "component_execution_layer"),
    ("6", "Risk & Compliance Module", SystemStatus::Online, "component_risk"),
    ("7", "Secure Vault", SystemStatus::Online, "component_vault"),
    ("8", "Monitoring & Alerting", SystemStatus::Offline, "component_monitoring"),
];

pub fn system_components(tr: &Translator, lang: Language) -> Vec<SystemComponent> {
    COMPONENTS
        .iter()
        .map(|(id, name, status, description_key)| SystemComponent {
            id: id.to_string(),
            name: name.to_string(),
            status: *status,
            status_label: tr.t(lang, status.as_str()),
            description: tr.t(lang, description_key),
        })
        .collect()
}

/// Basic health check - fast, no external dependencies
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// GET /v1/system/components
pub async fn list_components(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Json<Vec<SystemComponent>> {
    let lang = state.lang(&query);
    Json(system_components(&state.translator, lang))
}

/// Detailed health check with service checks and counters
pub async fn health_detail(State(state): State<Arc<AppState>>) -> Json<DetailedHealthResponse> {
    let (bots, active) = {
        let dashboard = state.dashboard.read().await;
        (dashboard.registry.len(), dashboard.registry.active_count())
    };

    let checks = vec![
        HealthCheck {
            name: "ai_credential".to_string(),
            status: if state.advisor.is_configured() { "configured" } else { "missing" }.to_string(),
        },
        HealthCheck {
            name: "bots".to_string(),
            status: format!("{} active / {} total", active, bots),
        },
    ];

    let metrics = state.metrics.snapshot().await;

    Json(DetailedHealthResponse {
        status: if state.advisor.is_configured() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
        metrics: HealthMetrics {
            uptime_secs: metrics.uptime_secs,
            counters: metrics.counters,
        },
    })
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub version: String,
    pub checks: Vec<HealthCheck>,
    pub metrics: HealthMetrics,
}

#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct HealthMetrics {
    pub uptime_secs: u64,
    pub counters: HashMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_board() {
        let tr = Translator::embedded();
        let components = system_components(&tr, Language::En);
        assert_eq!(components.len(), 8);

        let degraded: Vec<&str> = components
            .iter()
            .filter(|c| c.status == SystemStatus::Degraded)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(degraded, vec!["Execution Layer (Binance)"]);
        assert_eq!(components[7].status, SystemStatus::Offline);
        assert_eq!(components[7].status_label, "Offline");
        assert_eq!(components[0].description, "Receives data from WebSocket and REST feeds.");
    }

    #[test]
    fn test_component_board_vietnamese() {
        let tr = Translator::embedded();
        let components = system_components(&tr, Language::Vi);
        assert_eq!(components[6].description, "Lưu trữ API keys an toàn.");
    }
}
