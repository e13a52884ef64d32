//! Background tasks that move the mock PnL figures
//!
//! Two independent timers: one walks every running bot's PnL, the other walks
//! the headline figure. Neither waits for the other and neither coordinates
//! with user edits; whichever write lands last wins.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, trace};

use crate::dashboard::Dashboard;
use crate::observability::{metrics, MetricsCollector};

/// Handles for the running timers; dropping them leaves the tasks running
pub struct SimulationTasks {
    pub bot_ticker: JoinHandle<()>,
    pub aggregate_ticker: JoinHandle<()>,
}

impl SimulationTasks {
    pub fn abort(&self) {
        self.bot_ticker.abort();
        self.aggregate_ticker.abort();
    }
}

/// Walk per-bot PnL every `period`. The first step happens one period after
/// start.
pub fn spawn_bot_ticker(
    dashboard: Arc<RwLock<Dashboard>>,
    collector: MetricsCollector,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let (moved, active) = {
                let mut dashboard = dashboard.write().await;
                let moved = dashboard.registry.tick(&mut rng);
                (moved, dashboard.registry.active_count())
            };

            collector.increment(metrics::BOT_TICKS, 1).await;
            collector.gauge(metrics::ACTIVE_BOTS, active as f64).await;
            trace!("Bot tick moved {} bots", moved);
        }
    })
}

/// Walk the headline PnL every `period`
pub fn spawn_aggregate_ticker(
    dashboard: Arc<RwLock<Dashboard>>,
    collector: MetricsCollector,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let value = dashboard.write().await.tick_aggregate(&mut rng);

            collector.increment(metrics::AGGREGATE_TICKS, 1).await;
            collector.gauge(metrics::AGGREGATE_PNL, value).await;
        }
    })
}

pub fn spawn_all(
    dashboard: Arc<RwLock<Dashboard>>,
    collector: MetricsCollector,
    bot_period: Duration,
    aggregate_period: Duration,
) -> SimulationTasks {
    info!(
        "Starting PnL simulation (bots every {:?}, aggregate every {:?})",
        bot_period, aggregate_period
    );
    SimulationTasks {
        bot_ticker: spawn_bot_ticker(dashboard.clone(), collector.clone(), bot_period),
        aggregate_ticker: spawn_aggregate_ticker(dashboard, collector, aggregate_period),
    }
}
