use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::i18n::Language;

/// Bot identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(String);

impl BotId {
    /// Fresh id for a bot created at runtime
    pub fn generate() -> Self {
        Self(format!("bot-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bot run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotStatus {
    Active,
    Inactive,
    Error,
}

impl BotStatus {
    /// Wire tag, also used as the translation key
    pub fn as_str(&self) -> &'static str {
        match self {
            BotStatus::Active => "ACTIVE",
            BotStatus::Inactive => "INACTIVE",
            BotStatus::Error => "ERROR",
        }
    }

    /// Start/stop flip. Anything that isn't running gets started.
    pub fn toggled(self) -> Self {
        match self {
            BotStatus::Active => BotStatus::Inactive,
            BotStatus::Inactive | BotStatus::Error => BotStatus::Active,
        }
    }
}

/// Trading approach, determines which config a bot owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "DCA")]
    Dca,
    #[serde(rename = "GRID")]
    Grid,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "ARBITRAGE")]
    Arbitrage,
    #[serde(rename = "SCALPING")]
    Scalping,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Dca,
        Strategy::Grid,
        Strategy::Rsi,
        Strategy::Arbitrage,
        Strategy::Scalping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Dca => "DCA",
            Strategy::Grid => "GRID",
            Strategy::Rsi => "RSI",
            Strategy::Arbitrage => "ARBITRAGE",
            Strategy::Scalping => "SCALPING",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DCA buy cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DcaFrequency {
    #[serde(rename = "freq_1h")]
    Hourly,
    #[serde(rename = "freq_4h")]
    FourHours,
    #[serde(rename = "freq_1d")]
    Daily,
    #[serde(rename = "freq_1w")]
    Weekly,
}

impl DcaFrequency {
    pub const ALL: [DcaFrequency; 4] = [
        DcaFrequency::Hourly,
        DcaFrequency::FourHours,
        DcaFrequency::Daily,
        DcaFrequency::Weekly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DcaFrequency::Hourly => "freq_1h",
            DcaFrequency::FourHours => "freq_4h",
            DcaFrequency::Daily => "freq_1d",
            DcaFrequency::Weekly => "freq_1w",
        }
    }
}

impl FromStr for DcaFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DcaFrequency::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown frequency: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DcaConfig {
    pub investment: f64,
    pub frequency: DcaFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GridConfig {
    pub lower_price: f64,
    pub upper_price: f64,
    pub grids: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RsiConfig {
    pub oversold: f64,
    pub overbought: f64,
    pub order_size: f64,
}

/// Arbitrage bots carry no tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ArbitrageConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScalpingConfig {
    /// Percent
    pub take_profit: f64,
    /// Percent
    pub stop_loss: f64,
}

/// Strategy-specific configuration.
///
/// The variant is the bot's strategy, so a bot can never hold a config
/// shaped for a different strategy. Serialized adjacently as
/// `{"strategy": "GRID", "config": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "config")]
pub enum StrategyConfig {
    #[serde(rename = "DCA")]
    Dca(DcaConfig),
    #[serde(rename = "GRID")]
    Grid(GridConfig),
    #[serde(rename = "RSI")]
    Rsi(RsiConfig),
    #[serde(rename = "ARBITRAGE")]
    Arbitrage(ArbitrageConfig),
    #[serde(rename = "SCALPING")]
    Scalping(ScalpingConfig),
}

impl StrategyConfig {
    /// Config a freshly added bot starts with
    pub fn default_for(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Dca => StrategyConfig::Dca(DcaConfig {
                investment: 50.0,
                frequency: DcaFrequency::Daily,
            }),
            Strategy::Grid => StrategyConfig::Grid(GridConfig {
                lower_price: 2000.0,
                upper_price: 4000.0,
                grids: 10,
            }),
            Strategy::Rsi => StrategyConfig::Rsi(RsiConfig {
                oversold: 30.0,
                overbought: 70.0,
                order_size: 1.0,
            }),
            Strategy::Arbitrage => StrategyConfig::Arbitrage(ArbitrageConfig {}),
            Strategy::Scalping => StrategyConfig::Scalping(ScalpingConfig {
                take_profit: 0.5,
                stop_loss: 0.3,
            }),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyConfig::Dca(_) => Strategy::Dca,
            StrategyConfig::Grid(_) => Strategy::Grid,
            StrategyConfig::Rsi(_) => Strategy::Rsi,
            StrategyConfig::Arbitrage(_) => Strategy::Arbitrage,
            StrategyConfig::Scalping(_) => Strategy::Scalping,
        }
    }
}

/// Bot record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    pub symbol: String,
    pub status: BotStatus,
    pub pnl: f64,
    /// Percent of capital, 0-100
    pub capital_allocation: u8,
    #[serde(flatten)]
    pub config: StrategyConfig,
}

impl Bot {
    pub fn strategy(&self) -> Strategy {
        self.config.strategy()
    }

    pub fn is_active(&self) -> bool {
        self.status == BotStatus::Active
    }
}

/// Health state of a platform component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Online,
    Degraded,
    Offline,
}

impl SystemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemStatus::Online => "ONLINE",
            SystemStatus::Degraded => "DEGRADED",
            SystemStatus::Offline => "OFFLINE",
        }
    }
}

/// Platform component shown on the system health page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemComponent {
    pub id: String,
    pub name: String,
    pub status: SystemStatus,
    pub status_label: String,
    pub description: String,
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self { sender: Sender::Ai, text: text.into() }
    }
}

// Request types for API

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBotRequest {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    #[validate(custom = "validate_not_blank")]
    pub symbol: String,
    pub strategy: Strategy,
}

/// Single form-field edit, as sent by the settings modal
#[derive(Debug, Deserialize, Validate)]
pub struct EditConfigFieldRequest {
    #[validate(length(min = 1))]
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `?lang=vi|en`
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<Language>,
}

// Response types for API

#[derive(Debug, Serialize)]
pub struct ListBotsResponse {
    pub bots: Vec<Bot>,
    pub total: usize,
}

/// A bot's config together with the form fields it accepts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfigResponse {
    pub bot_id: BotId,
    #[serde(flatten)]
    pub config: StrategyConfig,
    pub editable_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub topic: String,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: ChatMessage,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<ChatMessage>,
    pub loading: bool,
}
