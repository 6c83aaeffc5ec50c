use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Display language for localized content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Hi,
}

/// An English/Hindi text pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Localized {
    pub en: String,
    #[serde(default)]
    pub hi: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    /// Text for `language`. Missing Hindi text falls back to English.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Hi if !self.hi.trim().is_empty() => &self.hi,
            _ => &self.en,
        }
    }
}
