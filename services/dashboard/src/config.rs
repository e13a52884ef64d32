//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `dashboard.toml`, then `DASHBOARD__*` environment variables
//! (`DASHBOARD__SERVER__PORT=8080`, `DASHBOARD__GEMINI__API_KEY=...`).
//! The Gemini key additionally falls back to `GEMINI_API_KEY` and `API_KEY`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

use crate::i18n::Language;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
const ENV_PREFIX: &str = "DASHBOARD";

/// Environment variables consulted, in order, when no key is configured
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured key, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Timers for the mock market movement
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub bot_tick_ms: u64,
    pub aggregate_tick_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bot_tick_ms: 2000,
            aggregate_tick_ms: 3000,
        }
    }
}

impl SimulationConfig {
    pub fn bot_tick(&self) -> Duration {
        Duration::from_millis(self.bot_tick_ms.max(1))
    }

    pub fn aggregate_tick(&self) -> Duration {
        Duration::from_millis(self.aggregate_tick_ms.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log_level: String,
    pub default_language: Language,
    /// Directory with `vi.json` / `en.json` overriding the embedded tables
    pub locales_dir: Option<PathBuf>,
    pub gemini: GeminiConfig,
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: "info".to_string(),
            default_language: Language::Vi,
            locales_dir: None,
            gemini: GeminiConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (optional file) and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config: AppConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.gemini.api_key =
            resolve_api_key(config.gemini.api_key.take(), |var| std::env::var(var).ok());
        Ok(config)
    }

    /// Load from the default file location, falling back to defaults on error
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        Self::load_or_default_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Defaults (key fallback still applied) plus the load error; the caller reports it
    pub fn load_or_default_from(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(err) => {
                let mut config = AppConfig::default();
                config.gemini.api_key = resolve_api_key(None, |var| std::env::var(var).ok());
                (config, Some(err))
            }
        }
    }

    pub fn log_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }
}

/// Configured key if present, otherwise the first non-blank fallback variable
pub fn resolve_api_key(
    configured: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            API_KEY_FALLBACK_VARS
                .iter()
                .filter_map(|var| lookup(var))
                .find(|k| !k.trim().is_empty())
        })
}
