//! Translation lookup handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::i18n::Language;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub key: String,
    pub text: String,
}

fn parse_language(code: &str) -> Result<Language, (StatusCode, String)> {
    code.parse().map_err(|e: String| (StatusCode::NOT_FOUND, e))
}

/// GET /i18n/{lang} - Full table, sorted by key
pub async fn get_table(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<BTreeMap<String, String>>, (StatusCode, String)> {
    let lang = parse_language(&code)?;
    let table: BTreeMap<String, String> = state
        .translator
        .table(lang)
        .map(|t| t.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();
    Ok(Json(table))
}

/// GET /i18n/{lang}/{key}?name=value - One string with placeholders filled
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Path((code, key)): Path<(String, String)>,
    Query(values): Query<HashMap<String, String>>,
) -> Result<Json<TranslationResponse>, (StatusCode, String)> {
    let lang = parse_language(&code)?;
    let values: Vec<(&str, &str)> = values.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let text = state.translator.t_with(lang, &key, &values);
    Ok(Json(TranslationResponse { key, text }))
}
