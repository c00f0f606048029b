use serde::Serialize;

use crate::model::entry::Entry;

pub const STRIPPED_SYMBOLS: [char; 4] = [',', '.', '!', '?'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub text: String,
    pub tokens: usize,
    pub translated: usize,
}

/// Removes the punctuation the translator ignores. Nothing is put in its place.
pub fn strip_symbols(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED_SYMBOLS.contains(c)).collect()
}

/// Splits on every single space, so runs of spaces yield empty tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ')
}

/// Looks `token` up among the source pairs. The first entry whose source is
/// `(source_lang, token)` and which has a `target_lang` pair wins, and within
/// it the first such pair.
pub fn translate_token<'a>(
    entries: &'a [Entry],
    source_lang: &str,
    target_lang: &str,
    token: &str,
) -> Option<&'a str> {
    entries
        .iter()
        .filter(|e| {
            e.source()
                .is_some_and(|s| s.language == source_lang && s.translation == token)
        })
        .find_map(|e| e.target_in(target_lang))
        .map(|p| p.translation.as_str())
}

pub fn translate(entries: &[Entry], source_lang: &str, target_lang: &str, text: &str) -> Translation {
    let cleaned = strip_symbols(text);

    let mut out: Vec<&str> = Vec::new();
    let mut translated = 0usize;

    for token in tokenize(&cleaned) {
        match translate_token(entries, source_lang, target_lang, token) {
            Some(word) => {
                translated += 1;
                out.push(word);
            }
            None => out.push(token),
        }
    }

    Translation {
        tokens: out.len(),
        text: out.join(" "),
        translated,
    }
}
