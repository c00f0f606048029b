use serde::Serialize;

use crate::model::entry::{Entry, LangPair};

/// Which pairs of each entry take part in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairScope {
    #[default]
    All,
    SourceOnly,
}

impl PairScope {
    fn pairs(self, entry: &Entry) -> &[LangPair] {
        match self {
            PairScope::All => &entry.pairs,
            PairScope::SourceOnly => &entry.pairs[..entry.pairs.len().min(1)],
        }
    }
}

/// Indices of matching entries in store order, one per entry at most.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchList {
    pub indices: Vec<usize>,
}

impl MatchList {
    pub fn found(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

pub fn find_pair(entries: &[Entry], language: &str, translation: &str, scope: PairScope) -> MatchList {
    collect(entries, scope, |p| p.language == language && p.translation == translation)
}

pub fn find_word(entries: &[Entry], translation: &str, scope: PairScope) -> MatchList {
    collect(entries, scope, |p| p.translation == translation)
}

fn collect<F>(entries: &[Entry], scope: PairScope, is_match: F) -> MatchList
where
    F: Fn(&LangPair) -> bool,
{
    let indices = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| scope.pairs(e).iter().any(&is_match))
        .map(|(i, _)| i)
        .collect();

    MatchList { indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<Entry> {
        vec![
            Entry {
                pairs: vec![LangPair::new("English", "dog"), LangPair::new("French", "chien")],
            },
            Entry {
                pairs: vec![LangPair::new("English", "cat"), LangPair::new("Spanish", "gato")],
            },
            Entry {
                pairs: vec![
                    LangPair::new("Spanish", "gato"),
                    LangPair::new("English", "cat"),
                    LangPair::new("Italian", "gatto"),
                ],
            },
        ]
    }

    #[test]
    fn pair_search_hits_only_exact_pairs() {
        let entries = store();

        let hit = find_pair(&entries, "English", "dog", PairScope::All);
        assert_eq!(hit.indices, vec![0]);
        assert!(hit.found());

        let miss = find_pair(&entries, "English", "bird", PairScope::All);
        assert!(miss.indices.is_empty());
        assert!(!miss.found());

        // right translation, wrong language
        assert!(!find_pair(&entries, "French", "dog", PairScope::All).found());
    }

    #[test]
    fn pair_search_records_each_entry_once() {
        let entries = store();
        let hit = find_pair(&entries, "English", "cat", PairScope::All);
        assert_eq!(hit.indices, vec![1, 2]);
    }

    #[test]
    fn source_scope_ignores_targets() {
        let entries = store();
        let hit = find_pair(&entries, "English", "cat", PairScope::SourceOnly);
        assert_eq!(hit.indices, vec![1]);
        assert!(!find_pair(&entries, "French", "chien", PairScope::SourceOnly).found());
    }

    #[test]
    fn word_search_ignores_language() {
        let entries = store();
        assert_eq!(find_word(&entries, "gato", PairScope::All).indices, vec![1, 2]);
        assert_eq!(find_word(&entries, "gato", PairScope::SourceOnly).indices, vec![2]);
        assert!(find_word(&entries, "Gato", PairScope::All).is_empty());
    }

    #[test]
    fn empty_store_finds_nothing() {
        assert!(!find_word(&[], "dog", PairScope::All).found());
    }
}
