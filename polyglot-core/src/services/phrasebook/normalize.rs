use crate::error::{CoreError, CoreResult};
use crate::model::entry::LangPair;

/// "mIDDLE eNGLISH" -> "Middle English". Only ASCII letters change case.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if prev.map_or(true, |p| p == ' ') {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
        prev = Some(ch);
    }

    out
}

pub fn lowercase(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Cuts `text` down to at most `max_len` characters.
pub fn truncate(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn check_len(field: &'static str, value: &str, max_len: usize) -> CoreResult<()> {
    let len = value.chars().count();
    if len == 0 || len > max_len {
        return Err(CoreError::InvalidField { field, max: max_len });
    }
    Ok(())
}

pub fn language(value: &str, max_len: usize) -> CoreResult<String> {
    check_len("language", value, max_len)?;
    Ok(title_case(value))
}

/// Validates and normalizes a pair typed in by a user.
pub fn pair(language: &str, translation: &str, max_len: usize) -> CoreResult<LangPair> {
    check_len("language", language, max_len)?;
    check_len("translation", translation, max_len)?;
    Ok(LangPair::new(title_case(language), lowercase(translation)))
}

/// Normalizes a pair read from a file. Over-long fields are cut rather than
/// rejected so a block keeps its shape.
pub fn imported_pair(language: &str, translation: &str, max_len: usize) -> LangPair {
    LangPair::new(
        title_case(truncate(language, max_len)),
        lowercase(truncate(translation, max_len)),
    )
}
