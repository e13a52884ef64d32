//! Observability: in-process metrics and structured event logging

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Metrics collector shared by handlers and background tasks
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<RwLock<MetricsInner>>,
}

struct MetricsInner {
    counters: HashMap<String, u64>,
    gauges: HashMap<String, f64>,
    start_time: Instant,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsInner {
                counters: HashMap::new(),
                gauges: HashMap::new(),
                start_time: Instant::now(),
            })),
        }
    }

    /// Increment a counter
    pub async fn increment(&self, name: &str, value: u64) {
        let mut inner = self.inner.write().await;
        let counter = inner.counters.entry(name.to_string()).or_insert(0);
        *counter += value;
    }

    /// Set a gauge value
    pub async fn gauge(&self, name: &str, value: f64) {
        let mut inner = self.inner.write().await;
        inner.gauges.insert(name.to_string(), value);
    }

    pub async fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.read().await;
        MetricsSnapshot {
            counters: inner.counters.clone(),
            gauges: inner.gauges.clone(),
            uptime_secs: inner.start_time.elapsed().as_secs(),
        }
    }

    pub async fn get_counter(&self, name: &str) -> u64 {
        let inner = self.inner.read().await;
        inner.counters.get(name).copied().unwrap_or(0)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSnapshot {
    pub counters: HashMap<String, u64>,
    pub gauges: HashMap<String, f64>,
    pub uptime_secs: u64,
}

/// Structured logger for consistent log formatting
pub struct Logger;

impl Logger {
    /// Log a bot lifecycle event
    pub fn bot_event(bot_id: &str, event_type: &str, details: &str) {
        tracing::info!(
            bot_id = %bot_id,
            event_type = %event_type,
            details = %details,
            "bot_event"
        );
    }

    /// Log the outcome of an AI request
    pub fn ai_event(surface: &str, outcome: &str, elapsed_ms: u128) {
        tracing::info!(
            surface = %surface,
            outcome = %outcome,
            elapsed_ms = elapsed_ms as u64,
            "ai_event"
        );
    }
}

/// Predefined metric names
pub mod metrics {
    // Bots
    pub const BOT_CREATED: &str = "bot_created_total";
    pub const BOT_TOGGLED: &str = "bot_toggled_total";
    pub const CONFIG_SAVED: &str = "config_saved_total";

    // Simulation
    pub const BOT_TICKS: &str = "bot_pnl_ticks_total";
    pub const AGGREGATE_TICKS: &str = "aggregate_pnl_ticks_total";
    pub const AGGREGATE_PNL: &str = "aggregate_pnl";
    pub const ACTIVE_BOTS: &str = "active_bots";

    // AI
    pub const AI_REQUESTS: &str = "ai_requests_total";
    pub const AI_FAILURES: &str = "ai_failures_total";
    pub const AI_REJECTED_BUSY: &str = "ai_rejected_busy_total";
}
