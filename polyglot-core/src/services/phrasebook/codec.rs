use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::model::entry::{Entry, LangPair};
use crate::services::encoding;

use super::normalize;
use super::store::PhraseStore;

pub const MIN_FILENAME_LEN: usize = 5;
pub const MAX_FILENAME_LEN: usize = 30;
pub const FILE_EXTENSION: &str = ".txt";
pub const INVALID_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

fn pair_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "<language>: <translation>"; the translation starts at the first
    // non-blank character after the colon and stops at the next colon.
    RE.get_or_init(|| Regex::new(r"^(?P<lang>[^:\n]+):\s*(?P<tl>[^:\s][^:\n]*)").unwrap())
}

pub fn validate_filename(name: &str) -> CoreResult<()> {
    let invalid = |reason| CoreError::InvalidFilename {
        name: name.to_string(),
        reason,
    };

    let len = name.chars().count();
    if !(MIN_FILENAME_LEN..=MAX_FILENAME_LEN).contains(&len) {
        return Err(invalid("must be between 5 and 30 characters"));
    }
    if !name.ends_with(FILE_EXTENSION) {
        return Err(invalid("must end with .txt"));
    }
    if name.chars().any(|c| INVALID_FILENAME_CHARS.contains(&c)) {
        return Err(invalid("must not contain \\ / : * ? \" < > |"));
    }

    Ok(())
}

pub fn render(entries: &[Entry]) -> String {
    let mut out = String::new();
    for e in entries {
        for p in &e.pairs {
            out.push_str(&p.language);
            out.push_str(": ");
            out.push_str(&p.translation);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Writes the store in canonical order, replacing `path`. Returns the number
/// of entries written.
pub fn export_store(store: &mut PhraseStore, path: &Path) -> CoreResult<usize> {
    store.canonicalize();

    let file = File::create(path).map_err(|source| CoreError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let write_err = |source| CoreError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    writer
        .write_all(render(store.entries()).as_bytes())
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    tracing::info!(path = %path.display(), entries = store.len(), "store exported");
    Ok(store.len())
}

/// Parses one `Language: translation` line. Anything else is a block boundary.
pub fn parse_line(line: &str, max_len: usize) -> Option<LangPair> {
    let caps = pair_line().captures(line)?;
    Some(normalize::imported_pair(&caps["lang"], &caps["tl"], max_len))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockOutcome {
    Imported,
    Declined,
    /// Fewer than two pairs; such a block cannot form an entry.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportedBlock {
    /// 1-based position among the non-empty blocks of the file.
    pub number: usize,
    pub entry: Entry,
    pub outcome: BlockOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub blocks: Vec<ImportedBlock>,
    pub imported: usize,
    /// Pair lines beyond the per-entry cap.
    pub dropped_pairs: usize,
    /// Pairs read after the last boundary line; they are not imported.
    pub unterminated_pairs: usize,
    pub limit_reached: bool,
    pub encoding: String,
}

/// Reads blocks of pair lines from `text`. Each finished block is offered to
/// `confirm` and appended to the store when accepted. Scanning stops as soon
/// as the store is full.
pub fn import_text<F>(store: &mut PhraseStore, text: &str, max_len: usize, mut confirm: F) -> ImportReport
where
    F: FnMut(usize, &Entry) -> bool,
{
    let mut report = ImportReport::default();
    let mut pending = Entry::default();

    for line in text.lines() {
        if store.is_full() {
            break;
        }

        if let Some(pair) = parse_line(line, max_len) {
            if pending.count() < store.max_pairs() {
                pending.pairs.push(pair);
            } else {
                report.dropped_pairs += 1;
            }
            continue;
        }

        let entry = std::mem::take(&mut pending);
        if entry.pairs.is_empty() {
            continue;
        }

        let number = report.blocks.len() + 1;
        let outcome = if !entry.is_active() {
            tracing::warn!(block = number, "skipping block with a single pair");
            BlockOutcome::Skipped
        } else if !confirm(number, &entry) {
            BlockOutcome::Declined
        } else {
            match store.push_entry(entry.clone()) {
                Ok(_) => {
                    report.imported += 1;
                    BlockOutcome::Imported
                }
                Err(e) => {
                    tracing::warn!(block = number, "could not import block: {e}");
                    BlockOutcome::Skipped
                }
            }
        };

        report.blocks.push(ImportedBlock {
            number,
            entry,
            outcome,
        });
    }

    report.limit_reached = store.is_full();
    report.unterminated_pairs = pending.count();
    if report.unterminated_pairs > 0 {
        tracing::warn!(
            pairs = report.unterminated_pairs,
            "file ended without a blank line; last block was not imported"
        );
    }

    report
}

pub fn import_store<F>(store: &mut PhraseStore, path: &Path, max_len: usize, confirm: F) -> CoreResult<ImportReport>
where
    F: FnMut(usize, &Entry) -> bool,
{
    let decoded = encoding::read_text(path)?;

    let mut report = import_text(store, &decoded.text, max_len, confirm);
    report.encoding = decoded.encoding;

    tracing::info!(
        path = %path.display(),
        blocks = report.blocks.len(),
        imported = report.imported,
        "import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pair(l: &str, t: &str) -> LangPair {
        LangPair::new(l, t)
    }

    fn sample() -> PhraseStore {
        let mut store = PhraseStore::default();
        store
            .add_entry_with_targets(pair("Spanish", "gato"), vec![pair("French", "chat")])
            .unwrap();
        store
            .add_entry_with_targets(
                pair("English", "dog"),
                vec![pair("Tagalog", "aso"), pair("French", "chien")],
            )
            .unwrap();
        store
    }

    #[test]
    fn filename_rules() {
        assert!(validate_filename("words.txt").is_ok());
        assert!(validate_filename("a.txt").is_ok());
        assert!(validate_filename(".txt").is_err());
        assert!(validate_filename("words.csv").is_err());
        assert!(validate_filename("my:words.txt").is_err());
        assert!(validate_filename("dir/words.txt").is_err());
        assert!(validate_filename(&format!("{}.txt", "w".repeat(27))).is_err());
        assert!(validate_filename(&format!("{}.txt", "w".repeat(26))).is_ok());
    }

    #[test]
    fn parse_line_follows_the_pair_pattern() {
        assert_eq!(parse_line("English: dog", 20), Some(pair("English", "dog")));
        assert_eq!(parse_line("english:DOG", 20), Some(pair("English", "dog")));
        assert_eq!(parse_line("Old norse:   hundr", 20), Some(pair("Old Norse", "hundr")));
        // the translation stops at a second colon
        assert_eq!(parse_line("English: a:b", 20), Some(pair("English", "a")));
        assert_eq!(parse_line("", 20), None);
        assert_eq!(parse_line("English:", 20), None);
        assert_eq!(parse_line("English:   ", 20), None);
        assert_eq!(parse_line(": dog", 20), None);
        assert_eq!(parse_line("no colon here", 20), None);
    }

    #[test]
    fn render_writes_blocks_with_blank_separators() {
        let mut store = sample();
        store.canonicalize();
        assert_eq!(
            render(store.entries()),
            "English: dog\nFrench: chien\nTagalog: aso\n\nSpanish: gato\nFrench: chat\n\n"
        );
    }

    #[test]
    fn import_asks_for_each_block() {
        let text = "English: dog\nFrench: chien\n\nEnglish: cat\nSpanish: gato\n\n";
        let mut store = PhraseStore::default();
        let mut seen = Vec::new();

        let report = import_text(&mut store, text, 20, |n, e| {
            seen.push((n, e.pairs[0].translation.clone()));
            n == 2
        });

        assert_eq!(seen, vec![(1, "dog".to_string()), (2, "cat".to_string())]);
        assert_eq!(report.imported, 1);
        assert_eq!(report.blocks[0].outcome, BlockOutcome::Declined);
        assert_eq!(report.blocks[1].outcome, BlockOutcome::Imported);
        assert_eq!(store.len(), 1);
        assert_eq!(store.entry(0).unwrap().pairs[0].translation, "cat");
    }

    #[test]
    fn any_non_pair_line_ends_a_block() {
        let text = "English: dog\nFrench: chien\n# comment\nEnglish: cat\nSpanish: gato\n\n";
        let mut store = PhraseStore::default();
        let report = import_text(&mut store, text, 20, |_, _| true);
        assert_eq!(report.imported, 2);
    }

    #[test]
    fn pending_block_at_eof_is_not_flushed() {
        let text = "English: dog\nFrench: chien\n\nEnglish: cat\nSpanish: gato";
        let mut store = PhraseStore::default();
        let report = import_text(&mut store, text, 20, |_, _| true);
        assert_eq!(report.imported, 1);
        assert_eq!(report.unterminated_pairs, 2);
    }

    #[test]
    fn pairs_past_the_cap_are_dropped() {
        let mut text = String::from("English: one\n");
        for i in 0..12 {
            text.push_str(&format!("Lang{i}: x\n"));
        }
        text.push('\n');

        let mut store = PhraseStore::default();
        let report = import_text(&mut store, &text, 20, |_, _| true);
        assert_eq!(report.imported, 1);
        assert_eq!(report.dropped_pairs, 3);
        assert_eq!(store.entry(0).unwrap().count(), 10);
    }

    #[test]
    fn empty_and_single_pair_blocks_are_not_offered() {
        let text = "\n\nEnglish: lonely\n\nEnglish: dog\nFrench: chien\n\n";
        let mut store = PhraseStore::default();
        let mut offered = 0;
        let report = import_text(&mut store, text, 20, |_, _| {
            offered += 1;
            true
        });
        assert_eq!(offered, 1);
        assert_eq!(report.blocks.len(), 2);
        assert_eq!(report.blocks[0].outcome, BlockOutcome::Skipped);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn import_stops_when_the_store_fills_up() {
        let text = "English: a\nFrench: a\n\nEnglish: b\nFrench: b\n\nEnglish: c\nFrench: c\n\n";
        let mut store = PhraseStore::new(2, 10, "English");
        let report = import_text(&mut store, text, 20, |_, _| true);
        assert_eq!(report.imported, 2);
        assert!(report.limit_reached);
        assert_eq!(report.blocks.len(), 2);
    }

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");

        let mut original = sample();
        assert_eq!(export_store(&mut original, &path).unwrap(), 2);

        let mut restored = PhraseStore::default();
        let report = import_store(&mut restored, &path, 20, |_, _| true).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.encoding, "utf-8");

        restored.canonicalize();
        original.canonicalize();
        assert_eq!(restored.entries(), original.entries());
    }

    #[test]
    fn export_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "stale contents that should disappear\n").unwrap();

        let mut store = sample();
        export_store(&mut store, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("English: dog\n"));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn missing_import_file_leaves_store_untouched() {
        let dir = tempdir().unwrap();
        let mut store = sample();
        let err = import_store(&mut store, &dir.path().join("nope.txt"), 20, |_, _| true).unwrap_err();
        assert!(matches!(err, CoreError::FileUnavailable { .. }));
        assert_eq!(store.len(), 2);
    }
}
