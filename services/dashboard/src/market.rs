//! Mock market price series
//!
//! Each supported pair gets a daily random-walk series generated once at
//! startup. Points are labelled with short US dates ("Mar 5") and prices are
//! rounded to cents.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{DashboardError, Result};

pub const SERIES_LENGTH: usize = 30;

/// Per-step volatility as a share of the current price
const VOLATILITY: f64 = 0.03;

/// Pair, opening price, chart color
const PAIRS: [(&str, f64, &str); 3] = [
    ("BTC/USDT", 68000.0, "#f7931a"),
    ("ETH/USDT", 3500.0, "#8884d8"),
    ("SOL/USDT", 150.0, "#00e676"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    pub pair: String,
    pub color: String,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSummary {
    pub pair: String,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub last_price: Option<Decimal>,
}

fn to_cents(price: f64) -> Decimal {
    Decimal::from_f64(price)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Daily series of `num_points` prices starting `num_points` days before
/// `today`. Each step moves by `(u - 0.48) * 3%` of the current price; a
/// walk that reaches zero restarts at that step's volatility.
pub fn generate_series(
    start_price: f64,
    num_points: usize,
    today: NaiveDate,
    mut sample: impl FnMut() -> f64,
) -> Vec<PricePoint> {
    let start_date = today - Duration::days(num_points as i64);
    let mut price = start_price;

    (0..num_points)
        .map(|i| {
            let date = start_date + Duration::days(i as i64);
            let point = PricePoint {
                date: date.format("%b %-d").to_string(),
                price: to_cents(price),
            };
            let volatility = price * VOLATILITY;
            price += (sample() - 0.48) * volatility;
            if price <= 0.0 {
                price = volatility;
            }
            point
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MarketData {
    series: Vec<PriceSeries>,
}

impl MarketData {
    pub fn generate<R: Rng>(rng: &mut R, today: NaiveDate) -> Self {
        let series = PAIRS
            .iter()
            .map(|(pair, start, color)| PriceSeries {
                pair: pair.to_string(),
                color: color.to_string(),
                points: generate_series(*start, SERIES_LENGTH, today, || rng.gen::<f64>()),
            })
            .collect();
        Self { series }
    }

    pub fn pairs(&self) -> Vec<PairSummary> {
        self.series
            .iter()
            .map(|s| PairSummary {
                pair: s.pair.clone(),
                color: s.color.clone(),
                last_price: s.points.last().map(|p| p.price),
            })
            .collect()
    }

    pub fn series(&self, pair: &str) -> Result<&PriceSeries> {
        self.series
            .iter()
            .find(|s| s.pair.eq_ignore_ascii_case(pair))
            .ok_or_else(|| DashboardError::NotFound(format!("trading pair {}", pair)))
    }
}
