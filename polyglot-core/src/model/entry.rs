use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct LangPair {
    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub translation: String,
}

impl LangPair {
    /// Builds a pair as-is. Callers at an ingestion boundary go through
    /// `normalize::pair` instead so casing is applied exactly once.
    pub fn new(language: impl Into<String>, translation: impl Into<String>) -> Self {
        LangPair {
            language: language.into(),
            translation: translation.into(),
        }
    }
}

/// A phrase record. `pairs[0]` is the source pair, the rest are targets.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    #[serde(default)]
    pub pairs: Vec<LangPair>,
}

impl Entry {
    pub fn with_source(source: LangPair) -> Self {
        Entry {
            pairs: vec![source],
        }
    }

    pub fn count(&self) -> usize {
        self.pairs.len()
    }

    pub fn source(&self) -> Option<&LangPair> {
        self.pairs.first()
    }

    pub fn targets(&self) -> &[LangPair] {
        self.pairs.get(1..).unwrap_or(&[])
    }

    /// An entry needs a source and at least one target to be part of a store.
    pub fn is_active(&self) -> bool {
        self.pairs.len() >= 2
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.pairs.iter().any(|p| p.language == language)
    }

    /// First target pair written in `language`, skipping the source pair.
    pub fn target_in(&self, language: &str) -> Option<&LangPair> {
        self.targets().iter().find(|p| p.language == language)
    }
}
