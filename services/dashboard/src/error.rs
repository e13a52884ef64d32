//! Error types for dashboard state operations

use axum::http::StatusCode;

use crate::i18n::{Language, Translator};
use crate::models::{BotId, Strategy};

/// Errors raised by registry, editor and request handling
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Bot not found: {0}")]
    BotNotFound(BotId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Config for {found} cannot be saved on a {expected} bot")]
    StrategyMismatch { expected: Strategy, found: Strategy },

    #[error("Unknown config field '{field}' for {strategy}")]
    UnknownField { strategy: Strategy, field: String },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    #[error("A request is already in progress")]
    Busy,
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::BotNotFound(_) | DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Validation(_)
            | DashboardError::StrategyMismatch { .. }
            | DashboardError::UnknownField { .. }
            | DashboardError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
            DashboardError::Busy => StatusCode::CONFLICT,
        }
    }

    /// Status plus a message in the operator's language where the table has one
    pub fn localized(&self, tr: &Translator, lang: Language) -> (StatusCode, String) {
        let message = match self {
            DashboardError::Busy => tr.t(lang, "error_busy"),
            _ => self.to_string(),
        };
        (self.status_code(), message)
    }
}

impl From<DashboardError> for (StatusCode, String) {
    fn from(err: DashboardError) -> Self {
        (err.status_code(), err.to_string())
    }
}

impl From<validator::ValidationErrors> for DashboardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DashboardError::Validation(errors.to_string())
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
