//! Dashboard state container
//!
//! Owns the bot registry and the headline PnL figure. The headline figure is
//! its own random walk and is never reconciled with per-bot PnL.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::i18n::{Language, Translator};
use crate::models::BotStatus;
use crate::registry::BotRegistry;

pub const INITIAL_AGGREGATE_PNL: f64 = 1256.78;

/// Above this the PnL card renders as positive
const PNL_POSITIVE_THRESHOLD: f64 = 1200.0;

const ALLOCATED_CAPITAL: f64 = 8500.0;
const WIN_RATE_24H: f64 = 68.0;

/// Per-tick step for the headline PnL: `(u - 0.5) * 50`, `u` in `[0, 1)`
pub fn aggregate_pnl_step(u: f64) -> f64 {
    (u - 0.5) * 50.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub source: String,
    pub message: String,
    pub time_ago: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_pnl: f64,
    pub total_pnl_change: String,
    pub pnl_trend: Trend,
    pub allocated_capital: f64,
    pub active_bots: usize,
    pub total_bots: usize,
    pub win_rate_24h: f64,
    pub win_rate_change: String,
    pub recent_activity: Vec<ActivityEntry>,
}

/// One slice of the capital allocation chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: u8,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub registry: BotRegistry,
    pub aggregate_pnl: f64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Dashboard {
    pub fn new(registry: BotRegistry) -> Self {
        Self {
            registry,
            aggregate_pnl: INITIAL_AGGREGATE_PNL,
        }
    }

    pub fn seeded() -> Self {
        Self::new(BotRegistry::seeded())
    }

    pub fn tick_aggregate_with(&mut self, mut sample: impl FnMut() -> f64) -> f64 {
        self.aggregate_pnl += aggregate_pnl_step(sample());
        debug!("Aggregate PnL now {:.2}", self.aggregate_pnl);
        self.aggregate_pnl
    }

    pub fn tick_aggregate<R: Rng>(&mut self, rng: &mut R) -> f64 {
        self.tick_aggregate_with(|| rng.gen::<f64>())
    }

    pub fn pnl_trend(&self) -> Trend {
        if self.aggregate_pnl > PNL_POSITIVE_THRESHOLD {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }

    pub fn summary(&self, tr: &Translator, lang: Language) -> DashboardSummary {
        DashboardSummary {
            total_pnl: self.aggregate_pnl,
            total_pnl_change: "+2.5%".to_string(),
            pnl_trend: self.pnl_trend(),
            allocated_capital: ALLOCATED_CAPITAL,
            active_bots: self.registry.active_count(),
            total_bots: self.registry.len(),
            win_rate_24h: WIN_RATE_24H,
            win_rate_change: "+1.2%".to_string(),
            recent_activity: recent_activity(tr, lang),
        }
    }

    /// Capital share per allocated, non-failing bot, largest first, plus
    /// whatever is left over as "reserved"
    pub fn allocation(&self, tr: &Translator, lang: Language) -> Vec<AllocationSlice> {
        let mut slices: Vec<AllocationSlice> = self
            .registry
            .list()
            .iter()
            .filter(|b| b.status != BotStatus::Error && b.capital_allocation > 0)
            .map(|b| {
                let base = b.symbol.split('/').next().unwrap_or(&b.symbol);
                AllocationSlice {
                    name: format!("{} ({})", b.name, base),
                    value: b.capital_allocation,
                }
            })
            .collect();
        slices.sort_by(|a, b| b.value.cmp(&a.value));

        let used: u32 = slices.iter().map(|s| u32::from(s.value)).sum();
        if used < 100 {
            slices.push(AllocationSlice {
                name: tr.t(lang, "reserved"),
                value: (100 - used) as u8,
            });
        }
        slices
    }
}

fn recent_activity(tr: &Translator, lang: Language) -> Vec<ActivityEntry> {
    let ago = |minutes: &str| tr.t_with(lang, "minutesAgo", &[("count", minutes)]);
    vec![
        ActivityEntry {
            source: "AI Brain".to_string(),
            message: tr.t_with(
                lang,
                "activity_ai_brain_increase",
                &[("botName", "Grid Bot (ETH/USDT)"), ("percentage", "15")],
            ),
            time_ago: ago("2"),
        },
        ActivityEntry {
            source: "DCA Bot".to_string(),
            message: tr.t_with(
                lang,
                "activity_dca_buy",
                &[("amount", "0.001"), ("coin", "BTC"), ("pair", "BTC/USDT")],
            ),
            time_ago: ago("15"),
        },
        ActivityEntry {
            source: "Risk".to_string(),
            message: tr.t_with(lang, "activity_risk_pause", &[("botName", "Scalping Bot")]),
            time_ago: ago("45"),
        },
    ]
}
