//! Bot registry
//!
//! Ordered, in-memory collection of bot records. All mutation goes through
//! `&mut self` methods; the service wraps the registry in its own lock.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::models::*;

/// Per-tick PnL step for a running bot: `(u - 0.45) * 5`, `u` in `[0, 1)`.
/// Lands in `[-2.25, 2.75)`, drifting slightly positive.
pub fn bot_pnl_step(u: f64) -> f64 {
    (u - 0.45) * 5.0
}

#[derive(Debug, Clone, Default)]
pub struct BotRegistry {
    bots: Vec<Bot>,
}

impl BotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the demo roster
    pub fn seeded() -> Self {
        Self { bots: seed_bots() }
    }

    pub fn list(&self) -> &[Bot] {
        &self.bots
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.bots.iter().filter(|b| b.is_active()).count()
    }

    pub fn get(&self, id: &BotId) -> Result<&Bot> {
        self.bots
            .iter()
            .find(|b| &b.id == id)
            .ok_or_else(|| DashboardError::BotNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &BotId) -> Result<&mut Bot> {
        self.bots
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| DashboardError::BotNotFound(id.clone()))
    }

    /// Create a stopped bot with the strategy's default config.
    /// Blank name or symbol leaves the registry untouched.
    pub fn add(&mut self, name: &str, symbol: &str, strategy: Strategy) -> Result<&Bot> {
        if name.trim().is_empty() || symbol.trim().is_empty() {
            return Err(DashboardError::Validation(
                "name and symbol are required".to_string(),
            ));
        }

        let bot = Bot {
            id: BotId::generate(),
            name: name.to_string(),
            symbol: symbol.to_uppercase(),
            status: BotStatus::Inactive,
            pnl: 0.0,
            capital_allocation: 0,
            config: StrategyConfig::default_for(strategy),
        };
        info!("Added bot {} ({}, {})", bot.id, bot.name, strategy);
        self.bots.push(bot);

        let idx = self.bots.len() - 1;
        Ok(&self.bots[idx])
    }

    /// Flip Active <-> Inactive. Error bots are started.
    pub fn toggle_status(&mut self, id: &BotId) -> Result<BotStatus> {
        let bot = self.get_mut(id)?;
        let previous = bot.status;
        bot.status = previous.toggled();
        info!("Bot {} status {:?} -> {:?}", id, previous, bot.status);
        Ok(bot.status)
    }

    /// Replace a bot's config wholesale. The new config must be for the
    /// bot's own strategy.
    pub fn save_config(&mut self, id: &BotId, config: StrategyConfig) -> Result<&Bot> {
        let bot = self.get_mut(id)?;
        let expected = bot.strategy();
        let found = config.strategy();
        if expected != found {
            return Err(DashboardError::StrategyMismatch { expected, found });
        }
        bot.config = config;
        info!("Saved config for bot {}", id);
        Ok(&*bot)
    }

    /// Advance every running bot's PnL by one step, drawing `u` from `sample`
    pub fn tick_with(&mut self, mut sample: impl FnMut() -> f64) -> usize {
        let mut touched = 0;
        for bot in self.bots.iter_mut().filter(|b| b.status == BotStatus::Active) {
            bot.pnl += bot_pnl_step(sample());
            touched += 1;
        }
        debug!("PnL tick moved {} bots", touched);
        touched
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> usize {
        self.tick_with(|| rng.gen::<f64>())
    }
}

fn seed_bot(
    id: &str,
    name: &str,
    symbol: &str,
    status: BotStatus,
    pnl: f64,
    capital_allocation: u8,
    config: StrategyConfig,
) -> Bot {
    Bot {
        id: BotId::from(id),
        name: name.to_string(),
        symbol: symbol.to_string(),
        status,
        pnl,
        capital_allocation,
        config,
    }
}

/// Demo roster the dashboard starts with
pub fn seed_bots() -> Vec<Bot> {
    vec![
        seed_bot(
            "1",
            "DCA Master",
            "BTC/USDT",
            BotStatus::Active,
            450.21,
            30,
            StrategyConfig::Dca(DcaConfig {
                investment: 100.0,
                frequency: DcaFrequency::Daily,
            }),
        ),
        seed_bot(
            "2",
            "Grid Runner",
            "ETH/USDT",
            BotStatus::Active,
            731.55,
            45,
            StrategyConfig::Grid(GridConfig {
                lower_price: 2800.0,
                upper_price: 3500.0,
                grids: 20,
            }),
        ),
        seed_bot(
            "3",
            "RSI Momentum",
            "SOL/USDT",
            BotStatus::Active,
            75.02,
            15,
            StrategyConfig::Rsi(RsiConfig {
                oversold: 30.0,
                overbought: 70.0,
                order_size: 5.0,
            }),
        ),
        seed_bot(
            "4",
            "Arbitrage Finder",
            "Multiple",
            BotStatus::Inactive,
            0.0,
            0,
            StrategyConfig::Arbitrage(ArbitrageConfig {}),
        ),
        seed_bot(
            "5",
            "Scalp Pro",
            "BNB/USDT",
            BotStatus::Error,
            -120.80,
            10,
            StrategyConfig::Scalping(ScalpingConfig {
                take_profit: 0.5,
                stop_loss: 0.3,
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_roster() {
        let registry = BotRegistry::seeded();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.active_count(), 3);
        let ids: Vec<&str> = registry.list().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        for bot in registry.list() {
            assert!(bot.capital_allocation <= 100);
        }
    }

    #[test]
    fn test_tick_with_fixed_sample() {
        let mut registry = BotRegistry::seeded();
        let moved = registry.tick_with(|| 0.5);
        assert_eq!(moved, 3);

        let dca = registry.get(&BotId::from("1")).unwrap();
        assert!((dca.pnl - 450.46).abs() < 1e-9);
    }

    #[test]
    fn test_tick_step_range_for_active_bots() {
        let mut registry = BotRegistry::seeded();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let before: Vec<f64> = registry.list().iter().map(|b| b.pnl).collect();
            registry.tick(&mut rng);
            for (bot, old) in registry.list().iter().zip(before) {
                let delta = bot.pnl - old;
                if bot.is_active() {
                    assert!(delta >= -2.25 - 1e-9 && delta < 2.75 + 1e-9, "delta {}", delta);
                } else {
                    assert_eq!(delta, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_step_bounds() {
        assert!((bot_pnl_step(0.0) + 2.25).abs() < 1e-12);
        assert!(bot_pnl_step(0.999_999) < 2.75);
    }

    #[test]
    fn test_tick_leaves_inactive_and_error_untouched() {
        let mut registry = BotRegistry::seeded();
        registry.tick_with(|| 0.99);
        assert_eq!(registry.get(&BotId::from("4")).unwrap().pnl, 0.0);
        assert_eq!(registry.get(&BotId::from("5")).unwrap().pnl, -120.80);
    }

    #[test]
    fn test_add_defaults() {
        let mut registry = BotRegistry::seeded();
        for strategy in Strategy::ALL {
            let bot = registry.add("New Bot", "ada/usdt", strategy).unwrap().clone();
            assert_eq!(bot.status, BotStatus::Inactive);
            assert_eq!(bot.pnl, 0.0);
            assert_eq!(bot.capital_allocation, 0);
            assert_eq!(bot.symbol, "ADA/USDT");
            assert_eq!(bot.strategy(), strategy);
            assert_eq!(bot.config, StrategyConfig::default_for(strategy));
            assert!(bot.id.as_str().starts_with("bot-"));
        }
        assert_eq!(registry.len(), 10);

        let dca = registry.add("Dca", "BTC/USDT", Strategy::Dca).unwrap();
        let json = serde_json::to_value(&dca.config).unwrap();
        let fields: Vec<&String> = json["config"].as_object().unwrap().keys().collect();
        assert_eq!(fields.len(), 2);
        assert!(json["config"].get("investment").is_some());
        assert!(json["config"].get("frequency").is_some());
    }

    #[test]
    fn test_add_unique_ids() {
        let mut registry = BotRegistry::new();
        let a = registry.add("A", "X", Strategy::Rsi).unwrap().id.clone();
        let b = registry.add("A", "X", Strategy::Rsi).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut registry = BotRegistry::seeded();
        assert!(registry.add("", "BTC/USDT", Strategy::Dca).is_err());
        assert!(registry.add("Bot", "   ", Strategy::Dca).is_err());
        assert_eq!(registry.list(), BotRegistry::seeded().list());
    }

    #[test]
    fn test_toggle_two_step_cycle() {
        let mut registry = BotRegistry::seeded();
        let id = BotId::from("1");
        assert_eq!(registry.toggle_status(&id).unwrap(), BotStatus::Inactive);
        assert_eq!(registry.toggle_status(&id).unwrap(), BotStatus::Active);

        let errored = BotId::from("5");
        assert_eq!(registry.toggle_status(&errored).unwrap(), BotStatus::Active);

        assert!(matches!(
            registry.toggle_status(&BotId::from("nope")),
            Err(DashboardError::BotNotFound(_))
        ));
    }

    #[test]
    fn test_save_config_replaces_only_target() {
        let mut registry = BotRegistry::seeded();
        let before = registry.clone();
        let id = BotId::from("2");
        let new_config = StrategyConfig::Grid(GridConfig {
            lower_price: 3000.0,
            upper_price: 3300.0,
            grids: 8,
        });

        registry.save_config(&id, new_config.clone()).unwrap();

        for (after, orig) in registry.list().iter().zip(before.list()) {
            if after.id == id {
                assert_eq!(after.config, new_config);
                assert_eq!(after.name, orig.name);
                assert_eq!(after.pnl, orig.pnl);
                assert_eq!(after.status, orig.status);
            } else {
                assert_eq!(after, orig);
            }
        }
    }

    #[test]
    fn test_save_config_rejects_other_strategy() {
        let mut registry = BotRegistry::seeded();
        let err = registry
            .save_config(&BotId::from("2"), StrategyConfig::default_for(Strategy::Dca))
            .unwrap_err();
        assert!(matches!(
            err,
            DashboardError::StrategyMismatch { expected: Strategy::Grid, found: Strategy::Dca }
        ));
        assert_eq!(registry.list(), BotRegistry::seeded().list());
    }
}
