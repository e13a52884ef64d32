//! Config editor
//!
//! Applies settings-form edits (field name + raw input text) onto a bot's
//! strategy config. Edits never change the variant, so the result can always
//! be saved back onto the same bot.

use crate::error::{DashboardError, Result};
use crate::models::*;

fn parse_number(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_count(field: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| DashboardError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn unknown(strategy: Strategy, field: &str) -> DashboardError {
    DashboardError::UnknownField {
        strategy,
        field: field.to_string(),
    }
}

/// Field names the settings form offers for a strategy
pub fn editable_fields(strategy: Strategy) -> &'static [&'static str] {
    match strategy {
        Strategy::Dca => &["investment", "frequency"],
        Strategy::Grid => &["lowerPrice", "upperPrice", "grids"],
        Strategy::Rsi => &["oversold", "overbought", "orderSize"],
        Strategy::Scalping => &["takeProfit", "stopLoss"],
        Strategy::Arbitrage => &[],
    }
}

/// Return `config` with `field` set from the raw form input `value`
pub fn apply_field(config: &StrategyConfig, field: &str, value: &str) -> Result<StrategyConfig> {
    let strategy = config.strategy();
    let mut edited = config.clone();

    match &mut edited {
        StrategyConfig::Dca(c) => match field {
            "investment" => c.investment = parse_number(field, value)?,
            "frequency" => {
                c.frequency = value.trim().parse().map_err(|_| DashboardError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                })?
            }
            _ => return Err(unknown(strategy, field)),
        },
        StrategyConfig::Grid(c) => match field {
            "lowerPrice" => c.lower_price = parse_number(field, value)?,
            "upperPrice" => c.upper_price = parse_number(field, value)?,
            "grids" => c.grids = parse_count(field, value)?,
            _ => return Err(unknown(strategy, field)),
        },
        StrategyConfig::Rsi(c) => match field {
            "oversold" => c.oversold = parse_number(field, value)?,
            "overbought" => c.overbought = parse_number(field, value)?,
            "orderSize" => c.order_size = parse_number(field, value)?,
            _ => return Err(unknown(strategy, field)),
        },
        StrategyConfig::Scalping(c) => match field {
            "takeProfit" => c.take_profit = parse_number(field, value)?,
            "stopLoss" => c.stop_loss = parse_number(field, value)?,
            _ => return Err(unknown(strategy, field)),
        },
        StrategyConfig::Arbitrage(_) => return Err(unknown(strategy, field)),
    }

    Ok(edited)
}
