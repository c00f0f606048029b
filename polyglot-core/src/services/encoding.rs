use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Serialize)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
    /// Some bytes could not be mapped and were replaced.
    pub had_errors: bool,
}

pub fn read_text(path: &Path) -> CoreResult<DecodedText> {
    let bytes = fs::read(path).map_err(|source| CoreError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decode(&bytes))
}

/// Decodes phrase files written by other tools. BOMs win, then plain UTF-8,
/// then whatever `chardetng` guesses.
pub fn decode(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..], true);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText {
            text: text.to_string(),
            encoding: UTF_8.name().to_lowercase(),
            had_errors: false,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    tracing::debug!(encoding = encoding.name(), "import file is not utf-8");
    decode_with(encoding, bytes, false)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8], bom: bool) -> DecodedText {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    let mut name = encoding.name().to_lowercase();
    if bom && encoding == UTF_8 {
        name.push_str("-sig");
    }

    if had_errors {
        tracing::warn!(encoding = %name, "import file contains undecodable bytes");
    }

    DecodedText {
        text: text.into_owned(),
        encoding: name,
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_passes_through() {
        let d = decode("English: dog\nFrench: chien\n".as_bytes());
        assert_eq!(d.encoding, "utf-8");
        assert!(d.text.starts_with("English: dog"));
        assert!(!d.had_errors);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"English: dog\n");
        let d = decode(&bytes);
        assert_eq!(d.encoding, "utf-8-sig");
        assert_eq!(d.text, "English: dog\n");
    }

    #[test]
    fn legacy_bytes_are_decoded() {
        // "Français: garçon" in windows-1252
        let bytes = b"Fran\xe7ais: gar\xe7on\n";
        let d = decode(bytes);
        assert_ne!(d.encoding, "utf-8");
        assert!(d.text.starts_with("Fran"), "decoded as {}: {:?}", d.encoding, d.text);
        assert!(d.text.contains(": gar"));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = read_text(Path::new("definitely-missing-file.txt")).unwrap_err();
        assert_eq!(err.code(), "file_unavailable");
    }
}
