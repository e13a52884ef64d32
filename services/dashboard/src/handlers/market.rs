//! Market price handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::market::{PairSummary, PriceSeries};
use crate::AppState;

/// GET /market/pairs
pub async fn list_pairs(State(state): State<Arc<AppState>>) -> Json<Vec<PairSummary>> {
    Json(state.market.pairs())
}

/// GET /market/prices/{base}/{quote}
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Path((base, quote)): Path<(String, String)>,
) -> Result<Json<PriceSeries>, (StatusCode, String)> {
    let pair = format!("{}/{}", base, quote);
    let series = state.market.series(&pair)?;
    Ok(Json(series.clone()))
}
