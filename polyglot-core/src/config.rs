use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::phrasebook::normalize;

fn default_max_entries() -> usize {
    150
}

fn default_max_pairs() -> usize {
    10
}

fn default_max_field_len() -> usize {
    20
}

fn default_max_text_len() -> usize {
    150
}

fn default_primary_language() -> String {
    "English".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CoreConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Source pair included.
    #[serde(default = "default_max_pairs")]
    pub max_pairs: usize,
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    /// Entries holding a pair in this language are listed first.
    #[serde(default = "default_primary_language")]
    pub primary_language: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_pairs: default_max_pairs(),
            max_field_len: default_max_field_len(),
            max_text_len: default_max_text_len(),
            primary_language: default_primary_language(),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("POLYGLOT_MAX_ENTRIES", default_max_entries(), 1),
            max_pairs: env_or("POLYGLOT_MAX_PAIRS", default_max_pairs(), 2),
            max_field_len: env_or("POLYGLOT_MAX_FIELD_LEN", default_max_field_len(), 1),
            max_text_len: env_or("POLYGLOT_MAX_TEXT_LEN", default_max_text_len(), 1),
            primary_language: env::var("POLYGLOT_PRIMARY_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize::title_case(v.trim()))
                .unwrap_or_else(default_primary_language),
        }
    }
}

fn env_or<T>(key: &str, default: T, min: T) -> T
where
    T: FromStr + PartialOrd,
{
    match env::var(key).ok().map(|v| v.trim().parse::<T>()) {
        Some(Ok(v)) if v >= min => v,
        Some(_) => {
            tracing::warn!("ignoring invalid value for {key}, using default");
            default
        }
        None => default,
    }
}
