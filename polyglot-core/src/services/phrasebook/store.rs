use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::entry::{Entry, LangPair};

use super::canonical;
use super::matcher::{self, MatchList, PairScope};
use super::translator::{self, Translation};

/// What `PhraseStore::delete_pair` ended up removing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairRemoval {
    Pair(LangPair),
    /// The pair was the last target, so the whole entry went with it.
    Entry(Entry),
}

/// Bounded, ordered collection of phrase entries.
#[derive(Debug, Clone)]
pub struct PhraseStore {
    entries: Vec<Entry>,
    max_entries: usize,
    max_pairs: usize,
    primary_language: String,
}

impl Default for PhraseStore {
    fn default() -> Self {
        Self::with_config(&CoreConfig::default())
    }
}

impl PhraseStore {
    pub fn new(max_entries: usize, max_pairs: usize, primary_language: impl Into<String>) -> Self {
        PhraseStore {
            entries: Vec::new(),
            max_entries,
            max_pairs,
            primary_language: primary_language.into(),
        }
    }

    pub fn with_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.max_entries, cfg.max_pairs, cfg.primary_language.clone())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs
    }

    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    /// Starts a new entry holding only `source`. Callers must follow up with
    /// at least one `add_pair` for the entry to become active.
    pub fn add_entry(&mut self, source: LangPair) -> CoreResult<usize> {
        self.ensure_entry_room()?;
        self.entries.push(Entry::with_source(source));
        Ok(self.entries.len() - 1)
    }

    /// Returns the entry's new pair count.
    pub fn add_pair(&mut self, index: usize, pair: LangPair) -> CoreResult<usize> {
        let max_pairs = self.max_pairs;
        let entry = self.entry_mut(index)?;

        if entry.pairs.len() >= max_pairs {
            return Err(CoreError::PairCapacityExceeded {
                entry: index,
                limit: max_pairs,
            });
        }

        entry.pairs.push(pair);
        Ok(entry.pairs.len())
    }

    /// Adds a complete entry in one step; the store is untouched on failure.
    pub fn add_entry_with_targets(&mut self, source: LangPair, targets: Vec<LangPair>) -> CoreResult<usize> {
        if targets.is_empty() {
            return Err(CoreError::MissingTarget);
        }

        let mut entry = Entry::with_source(source);
        entry.pairs.extend(targets);
        self.push_entry(entry)
    }

    /// Appends an already assembled entry, e.g. one read from a file.
    pub fn push_entry(&mut self, entry: Entry) -> CoreResult<usize> {
        self.ensure_entry_room()?;

        if entry.pairs.len() > self.max_pairs {
            return Err(CoreError::PairCapacityExceeded {
                entry: self.entries.len(),
                limit: self.max_pairs,
            });
        }

        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Removes the entry and shifts every later entry down by one.
    pub fn delete_entry(&mut self, index: usize) -> CoreResult<Entry> {
        self.check_entry(index)?;
        let removed = self.entries.remove(index);
        tracing::debug!(index, remaining = self.entries.len(), "entry deleted");
        Ok(removed)
    }

    /// Deletes a target pair. Pair 0 is the source and is refused; removing
    /// the last target removes the whole entry.
    pub fn delete_pair(&mut self, index: usize, pair: usize) -> CoreResult<PairRemoval> {
        let entry = self.entry_mut(index)?;

        if pair == 0 {
            return Err(CoreError::SourcePairProtected { entry: index });
        }
        if pair >= entry.pairs.len() {
            return Err(CoreError::PairOutOfRange { entry: index, pair });
        }

        if entry.pairs.len() <= 2 {
            return self.delete_entry(index).map(PairRemoval::Entry);
        }

        Ok(PairRemoval::Pair(entry.pairs.remove(pair)))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Puts entries and their target pairs in display order.
    pub fn canonicalize(&mut self) {
        canonical::canonicalize(&mut self.entries, &self.primary_language);
    }

    /// Source-pair lookup in current order, without reordering. Used to spot
    /// duplicates before adding an entry.
    pub fn find_source(&self, language: &str, translation: &str) -> MatchList {
        matcher::find_pair(&self.entries, language, translation, PairScope::SourceOnly)
    }

    pub fn search_pair(&mut self, language: &str, translation: &str) -> MatchList {
        self.canonicalize();
        matcher::find_pair(&self.entries, language, translation, PairScope::All)
    }

    pub fn search_word(&mut self, translation: &str) -> MatchList {
        self.canonicalize();
        matcher::find_word(&self.entries, translation, PairScope::All)
    }

    pub fn translate(&mut self, source_lang: &str, target_lang: &str, text: &str) -> Translation {
        self.canonicalize();
        translator::translate(&self.entries, source_lang, target_lang, text)
    }

    fn ensure_entry_room(&self) -> CoreResult<()> {
        if self.is_full() {
            tracing::warn!(limit = self.max_entries, "entry capacity reached");
            return Err(CoreError::EntryCapacityExceeded {
                limit: self.max_entries,
            });
        }
        Ok(())
    }

    fn check_entry(&self, index: usize) -> CoreResult<()> {
        if index >= self.entries.len() {
            return Err(CoreError::EntryOutOfRange {
                index,
                count: self.entries.len(),
            });
        }
        Ok(())
    }

    fn entry_mut(&mut self, index: usize) -> CoreResult<&mut Entry> {
        self.check_entry(index)?;
        Ok(&mut self.entries[index])
    }
}
