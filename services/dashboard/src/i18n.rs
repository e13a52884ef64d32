//! Localized string lookup
//!
//! Tables are flat `key -> text` JSON maps, one per language. Text may carry
//! `{{name}}` placeholders that are filled from named values at lookup time.
//! The vi/en tables ship embedded in the binary and can be overridden from a
//! directory holding `vi.json` / `en.json`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

const EMBEDDED_VI: &str = include_str!("../locales/vi.json");
const EMBEDDED_EN: &str = include_str!("../locales/en.json");

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Vi, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vi" => Ok(Language::Vi),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

type Table = HashMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("Failed to read translation file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid translation file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Translation tables for every loaded language
#[derive(Debug, Clone, Default)]
pub struct Translator {
    tables: HashMap<Language, Table>,
}

impl Translator {
    /// No tables loaded; every lookup returns its key
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables compiled into the binary
    pub fn embedded() -> Self {
        let mut tables = HashMap::new();
        for (lang, raw) in [(Language::Vi, EMBEDDED_VI), (Language::En, EMBEDDED_EN)] {
            match serde_json::from_str::<Table>(raw) {
                Ok(table) => {
                    tables.insert(lang, table);
                }
                Err(e) => warn!("Embedded {} translations are invalid: {}", lang, e),
            }
        }
        Self { tables }
    }

    /// Load `<dir>/vi.json` and `<dir>/en.json`
    pub fn load_dir(dir: &Path) -> Result<Self, I18nError> {
        let mut tables = HashMap::new();
        for lang in Language::ALL {
            let path = dir.join(format!("{}.json", lang.code()));
            let display = path.display().to_string();
            let raw = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
                path: display.clone(),
                source,
            })?;
            let table: Table = serde_json::from_str(&raw)
                .map_err(|source| I18nError::Parse { path: display, source })?;
            tables.insert(lang, table);
        }
        Ok(Self { tables })
    }

    /// Directory tables when configured and readable, embedded tables otherwise
    pub fn from_dir_or_embedded(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return Self::embedded();
        };
        match Self::load_dir(dir) {
            Ok(translator) => {
                info!("Loaded translations from {}", dir.display());
                translator
            }
            Err(e) => {
                warn!("{}. Using embedded translations.", e);
                Self::embedded()
            }
        }
    }

    pub fn table(&self, lang: Language) -> Option<&Table> {
        self.tables.get(&lang)
    }

    /// Look up `key`, falling back to the key itself when missing or empty
    pub fn t(&self, lang: Language, key: &str) -> String {
        self.t_with(lang, key, &[])
    }

    /// Look up `key` and fill `{{name}}` placeholders from `values`
    pub fn t_with(&self, lang: Language, key: &str, values: &[(&str, &str)]) -> String {
        let Some(table) = self.tables.get(&lang) else {
            return key.to_string();
        };

        let mut text = table
            .get(key)
            .filter(|text| !text.is_empty())
            .cloned()
            .unwrap_or_else(|| key.to_string());
        for (name, value) in values {
            text = text.replace(&format!("{{{{{}}}}}", name), value);
        }
        text
    }
}
