//! Overview and capital allocation handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::dashboard::{AllocationSlice, DashboardSummary};
use crate::models::LangQuery;
use crate::AppState;

/// GET /dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Json<DashboardSummary> {
    let lang = state.lang(&query);
    let dashboard = state.dashboard.read().await;
    Json(dashboard.summary(&state.translator, lang))
}

/// GET /allocation
pub async fn get_allocation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LangQuery>,
) -> Json<Vec<AllocationSlice>> {
    let lang = state.lang(&query);
    let dashboard = state.dashboard.read().await;
    Json(dashboard.allocation(&state.translator, lang))
}
